use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Result, anyhow};
use quiz_types::{Difficulty, SessionId};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::events::{EventBus, SessionEvent};
use crate::question_bank::QuestionBank;
use crate::session::{AnswerOutcome, Session, SessionMode};

/// Owner of every live session. Sessions share nothing; the session id keys
/// all state, so concurrent front-ends (one per tab or terminal) stay
/// isolated from each other.
pub struct SessionRegistry {
    pub active: HashMap<SessionId, Session>,
    bank: QuestionBank,
    pub event_bus: EventBus,
    config: Config,
}

impl SessionRegistry {
    pub fn new(bank: QuestionBank, config: Config) -> Self {
        Self {
            active: HashMap::new(),
            bank,
            event_bus: EventBus::new(),
            config,
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a single-player linear quiz over one category.
    pub fn start_quiz(
        &mut self,
        name: &str,
        category: &str,
        difficulty: Option<Difficulty>,
    ) -> Result<SessionId> {
        let questions = self
            .bank
            .questions(category, difficulty, &mut rand::thread_rng())?;
        let mode = SessionMode::Quiz {
            questions,
            category: category.to_string(),
        };
        self.insert(vec![name.to_string()], mode)
    }

    /// Start a board session, judged or self-scored, on a fresh board.
    pub fn start_board(&mut self, names: Vec<String>, judged: bool) -> Result<SessionId> {
        if names.len() > self.config.max_players {
            return Err(anyhow!(
                "Invalid number of players: {}",
                names.len()
            ));
        }
        let board = self.bank.build_board(&mut rand::thread_rng())?;
        let mode = if judged {
            SessionMode::Judged { board }
        } else {
            SessionMode::SelfScored { board }
        };
        self.insert(names, mode)
    }

    fn insert(&mut self, names: Vec<String>, mode: SessionMode) -> Result<SessionId> {
        let id = Uuid::new_v4();
        let session = Session::start(id, names, mode)?;

        let event = SessionEvent::SessionStarted {
            session_id: id,
            players: session.players().iter().map(|p| p.name.clone()).collect(),
            mode: session.mode_name(),
        };
        self.event_bus.publish(event);
        info!(session = %id, mode = session.mode_name(), "session started");

        self.active.insert(id, session);
        Ok(id)
    }

    pub fn session(&self, id: &SessionId) -> Option<&Session> {
        self.active.get(id)
    }

    pub fn session_mut(&mut self, id: &SessionId) -> Option<&mut Session> {
        self.active.get_mut(id)
    }

    pub fn pick(&mut self, id: SessionId, category: &str, points: i32) -> Result<()> {
        let session = self.get_mut(id)?;
        session.pick(category, points)?;

        self.event_bus.publish(SessionEvent::QuestionPicked {
            session_id: id,
            category: category.to_string(),
            points,
        });
        Ok(())
    }

    pub fn submit_answer(
        &mut self,
        id: SessionId,
        picked: &str,
        responder: Option<&str>,
    ) -> Result<AnswerOutcome> {
        let session = self.get_mut(id)?;
        let outcome = session.submit_answer(picked, responder)?;

        self.event_bus.publish(SessionEvent::AnswerSubmitted {
            session_id: id,
            entry: outcome.entry.clone(),
            next_phase: outcome.phase,
        });
        self.publish_if_completed(id);
        Ok(outcome)
    }

    pub fn skip(&mut self, id: SessionId) -> Result<AnswerOutcome> {
        let session = self.get_mut(id)?;
        let outcome = session.skip()?;

        let (category, points) = (outcome.entry.category.clone(), outcome.entry.points);
        self.event_bus.publish(SessionEvent::CellSkipped {
            session_id: id,
            category,
            points,
        });
        self.publish_if_completed(id);
        Ok(outcome)
    }

    pub fn advance_turn(&mut self, id: SessionId) -> Result<String> {
        let session = self.get_mut(id)?;
        let player = session.advance_turn()?.name.clone();

        self.event_bus.publish(SessionEvent::TurnAdvanced {
            session_id: id,
            player: player.clone(),
        });
        Ok(player)
    }

    /// Explicit reset-to-start: the session is dropped and a new one is
    /// started from scratch.
    pub fn remove(&mut self, id: SessionId, reason: &str) -> Option<Session> {
        let session = self.active.remove(&id)?;
        self.event_bus.publish(SessionEvent::SessionRemoved {
            session_id: id,
            reason: reason.to_string(),
        });
        info!(session = %id, reason, "session removed");
        Some(session)
    }

    /// Evict sessions idle past the configured timeout.
    pub fn cleanup_idle(&mut self) {
        let timeout = Duration::from_secs(self.config.idle_timeout_secs);
        let idle: Vec<SessionId> = self
            .active
            .iter()
            .filter(|(_, session)| session.is_idle(timeout))
            .map(|(id, _)| *id)
            .collect();

        for id in idle {
            self.remove(id, "Inactivity timeout");
        }
    }

    fn get_mut(&mut self, id: SessionId) -> Result<&mut Session> {
        self.active
            .get_mut(&id)
            .ok_or_else(|| anyhow!("Session not found: {id}"))
    }

    fn publish_if_completed(&mut self, id: SessionId) {
        let Some(session) = self.active.get(&id) else {
            return;
        };
        if session.phase() == quiz_types::Phase::Final {
            let standings = session.standings();
            self.event_bus.publish(SessionEvent::SessionCompleted {
                session_id: id,
                standings,
            });
            info!(session = %id, "session completed");
        }
    }
}
