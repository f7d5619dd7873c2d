use quiz_core::{
    Config, QuestionBank, Session, SessionEvent, SessionEventHandler, SessionMode,
    SessionRegistry,
};
use quiz_types::{Difficulty, Question};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Creates a bank with two categories of three questions each on a 200/400
/// ladder; every question's correct option is "right".
pub fn sample_bank() -> QuestionBank {
    let make = |text: &str, difficulty: Difficulty| Question {
        text: text.to_string(),
        options: vec!["right".to_string(), "wrong".to_string()],
        answer: "right".to_string(),
        difficulty: Some(difficulty),
    };
    QuestionBank::new(vec![
        (
            "science".to_string(),
            vec![
                make("S1?", Difficulty::Easy),
                make("S2?", Difficulty::Medium),
                make("S3?", Difficulty::Hard),
            ],
        ),
        (
            "history".to_string(),
            vec![
                make("H1?", Difficulty::Easy),
                make("H2?", Difficulty::Medium),
                make("H3?", Difficulty::Hard),
            ],
        ),
    ])
    .with_point_values(vec![200, 400])
}

pub fn seeded_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

/// Creates a judged board session over the sample bank.
pub fn judged_session(players: &[&str]) -> Session {
    let board = sample_bank().build_board(&mut seeded_rng()).unwrap();
    Session::start(Uuid::new_v4(), names(players), SessionMode::Judged { board }).unwrap()
}

/// Creates a self-scored board session over the sample bank.
pub fn self_scored_session(players: &[&str]) -> Session {
    let board = sample_bank().build_board(&mut seeded_rng()).unwrap();
    Session::start(
        Uuid::new_v4(),
        names(players),
        SessionMode::SelfScored { board },
    )
    .unwrap()
}

/// Creates a registry over the sample bank with default config.
pub fn test_registry() -> SessionRegistry {
    SessionRegistry::new(sample_bank(), Config::default())
}

/// Picks a cell and immediately answers it with the real clock running.
pub fn play_cell(session: &mut Session, category: &str, points: i32, picked: &str) {
    session.pick(category, points).unwrap();
    session.submit_answer(picked, None).unwrap();
}

pub fn score_of(session: &Session, name: &str) -> i32 {
    session
        .players()
        .iter()
        .find(|p| p.name == name)
        .unwrap()
        .score
}

/// Event collector for testing event emissions
#[derive(Clone)]
pub struct EventCollector {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn has_event(&self, check_fn: impl Fn(&SessionEvent) -> bool) -> bool {
        self.events.lock().unwrap().iter().any(check_fn)
    }
}

impl SessionEventHandler for EventCollector {
    fn handle_event(&mut self, event: SessionEvent) {
        self.events.lock().unwrap().push(event);
    }
}
