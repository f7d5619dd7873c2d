use std::collections::HashSet;
use std::time::{Duration, SystemTime};

use quiz_types::{GameError, HistoryEntry, Phase, Player, Question, SessionId, Standing};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, CellKey};
use crate::clock::QuestionClock;
use crate::scoring;

/// Hard ceiling on players in one session.
pub const MAX_PLAYERS: usize = 6;

/// What a session plays through. Mode and question source are one value, so
/// a board operation can never reach a linear session and vice versa.
#[derive(Debug)]
pub enum SessionMode {
    /// Single-player linear quiz over one category's questions.
    Quiz {
        questions: Vec<Question>,
        category: String,
    },
    /// Board game where the picking player answers their own question and
    /// earns the cell value plus a flat speed bonus.
    SelfScored { board: Board },
    /// Board game where the cell value is scaled by a speed multiplier; the
    /// clock can be frozen while the judge reveals the answer.
    Judged { board: Board },
}

#[derive(Debug)]
enum Prompt {
    Cell(CellKey),
    Linear(usize),
}

#[derive(Debug)]
struct ActiveQuestion {
    prompt: Prompt,
    clock: QuestionClock,
}

/// What one answer (or skip) did to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub entry: HistoryEntry,
    pub phase: Phase,
}

/// One play-through from setup to final standings. The session value is the
/// whole game state; every operation takes `&mut self` and there is no
/// process-wide state behind it.
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    mode: SessionMode,
    players: Vec<Player>,
    used: HashSet<CellKey>,
    answered: usize,
    turn: usize,
    history: Vec<HistoryEntry>,
    phase: Phase,
    active: Option<ActiveQuestion>,
    pub created_at: String, // ISO 8601 string
    last_activity: SystemTime,
}

impl Session {
    /// Validate the roster and start a session on the board screen.
    ///
    /// Blank names become "Player N" placeholders; duplicates (after
    /// substitution) and rosters outside 1..=6 are configuration errors.
    pub fn start(id: SessionId, names: Vec<String>, mode: SessionMode) -> Result<Self, GameError> {
        let names = fill_placeholder_names(names);
        if names.is_empty() {
            return Err(GameError::Configuration(
                "at least one player is required".to_string(),
            ));
        }
        if names.len() > MAX_PLAYERS {
            return Err(GameError::Configuration(format!(
                "at most {MAX_PLAYERS} players, got {}",
                names.len()
            )));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(GameError::Configuration(format!(
                    "duplicate player name: {name}"
                )));
            }
        }

        match &mode {
            SessionMode::Quiz { questions, .. } => {
                if names.len() != 1 {
                    return Err(GameError::Configuration(
                        "quiz sessions are single-player".to_string(),
                    ));
                }
                if questions.is_empty() {
                    return Err(GameError::Configuration(
                        "quiz session needs at least one question".to_string(),
                    ));
                }
            }
            SessionMode::SelfScored { board } | SessionMode::Judged { board } => {
                if board.total_cells() == 0 {
                    return Err(GameError::Configuration("board has no cells".to_string()));
                }
            }
        }

        let players = names
            .into_iter()
            .map(|name| Player { name, score: 0 })
            .collect();

        Ok(Self {
            id,
            mode,
            players,
            used: HashSet::new(),
            answered: 0,
            turn: 0,
            history: Vec::new(),
            phase: Phase::Board,
            active: None,
            created_at: chrono::Utc::now().to_rfc3339(),
            last_activity: SystemTime::now(),
        })
    }

    /// Put a board cell in flight and start its clock.
    pub fn pick(&mut self, category: &str, points: i32) -> Result<&Question, GameError> {
        self.require_phase(Phase::Board, "pick")?;
        let board = match self.board() {
            Some(board) => board,
            None => return Err(GameError::WrongMode { op: "pick" }),
        };
        if !board.contains(category, points) {
            return Err(GameError::InvalidSelection {
                category: category.to_string(),
                points,
            });
        }
        let key = (category.to_string(), points);
        if self.used.contains(&key) {
            return Err(GameError::InvalidSelection {
                category: key.0,
                points,
            });
        }

        self.active = Some(ActiveQuestion {
            prompt: Prompt::Cell(key),
            clock: QuestionClock::start(),
        });
        self.phase = Phase::Question;
        self.touch();
        self.current_question().ok_or(GameError::NoActiveQuestion)
    }

    /// Put the next linear question in flight and start its clock.
    pub fn next_question(&mut self) -> Result<&Question, GameError> {
        match self.phase {
            Phase::Board | Phase::Result => {}
            phase => {
                return Err(GameError::WrongPhase {
                    op: "next_question",
                    phase,
                });
            }
        }
        let SessionMode::Quiz { questions, .. } = &self.mode else {
            return Err(GameError::WrongMode {
                op: "next_question",
            });
        };
        if self.answered >= questions.len() {
            return Err(GameError::QuestionsExhausted);
        }

        self.active = Some(ActiveQuestion {
            prompt: Prompt::Linear(self.answered),
            clock: QuestionClock::start(),
        });
        self.phase = Phase::Question;
        self.touch();
        self.current_question().ok_or(GameError::NoActiveQuestion)
    }

    /// The prompt currently in flight, if any.
    pub fn current_question(&self) -> Option<&Question> {
        let active = self.active.as_ref()?;
        match &active.prompt {
            Prompt::Cell((category, points)) => self.board()?.question(category, *points),
            Prompt::Linear(index) => match &self.mode {
                SessionMode::Quiz { questions, .. } => questions.get(*index),
                _ => None,
            },
        }
    }

    /// Freeze the answer clock while the answer is being revealed.
    pub fn pause_clock(&mut self) -> Result<(), GameError> {
        match self.active.as_mut() {
            Some(active) => {
                active.clock.pause();
                Ok(())
            }
            None => Err(GameError::NoActiveQuestion),
        }
    }

    pub fn resume_clock(&mut self) -> Result<(), GameError> {
        match self.active.as_mut() {
            Some(active) => {
                active.clock.resume();
                Ok(())
            }
            None => Err(GameError::NoActiveQuestion),
        }
    }

    /// Seconds the in-flight question has been answerable (pauses excluded).
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.active.as_ref().map(|active| active.clock.elapsed_secs())
    }

    /// Seconds left on the in-flight question's answer window.
    pub fn time_remaining(&self) -> Option<f64> {
        self.elapsed_secs().map(scoring::time_remaining)
    }

    /// Score the in-flight question for `responder` (current-turn player
    /// when `None`), log it, and advance to the result screen, or straight
    /// to the final screen when that was the last cell.
    pub fn submit_answer(
        &mut self,
        picked: &str,
        responder: Option<&str>,
    ) -> Result<AnswerOutcome, GameError> {
        let elapsed_secs = match self.active.as_ref() {
            Some(active) => active.clock.elapsed_secs(),
            None => return Err(GameError::NoActiveQuestion),
        };
        self.answer_with_elapsed(picked, responder, elapsed_secs)
    }

    pub(crate) fn answer_with_elapsed(
        &mut self,
        picked: &str,
        responder: Option<&str>,
        elapsed_secs: f64,
    ) -> Result<AnswerOutcome, GameError> {
        self.require_phase(Phase::Question, "submit_answer")?;
        if self.active.is_none() {
            return Err(GameError::NoActiveQuestion);
        }
        let responder_idx = match responder {
            Some(name) => self
                .players
                .iter()
                .position(|p| p.name == name)
                .ok_or_else(|| GameError::PlayerNotFound(name.to_string()))?,
            None => self.turn,
        };

        let active = self.active.take().ok_or(GameError::NoActiveQuestion)?;
        let (category, value, question) = match (&active.prompt, &self.mode) {
            (Prompt::Cell((category, points)), _) => {
                let question = self
                    .board()
                    .and_then(|b| b.question(category, *points))
                    .ok_or(GameError::NoActiveQuestion)?;
                (category.clone(), *points, question.clone())
            }
            (Prompt::Linear(index), SessionMode::Quiz { questions, category }) => {
                let question = questions.get(*index).ok_or(GameError::NoActiveQuestion)?;
                (category.clone(), scoring::QUIZ_QUESTION_VALUE, question.clone())
            }
            (Prompt::Linear(_), _) => return Err(GameError::NoActiveQuestion),
        };

        let correct = question.is_correct(picked);
        let (earned, bonus) = match &self.mode {
            SessionMode::Quiz { .. } => (scoring::quiz_points(correct, elapsed_secs), None),
            SessionMode::SelfScored { .. } => {
                (scoring::board_points(correct, value, elapsed_secs), None)
            }
            SessionMode::Judged { .. } => scoring::judged_points(correct, value, elapsed_secs),
        };

        self.players[responder_idx].score += earned;
        match active.prompt {
            Prompt::Cell(key) => {
                self.used.insert(key);
            }
            Prompt::Linear(_) => {
                self.answered += 1;
            }
        }

        let entry = HistoryEntry {
            player: self.players[responder_idx].name.clone(),
            category,
            question: question.text,
            picked: picked.to_string(),
            answer: question.answer,
            correct,
            earned,
            points: value,
            elapsed_secs: round_tenths(elapsed_secs),
            bonus,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.history.push(entry.clone());

        self.phase = if self.is_exhausted() {
            Phase::Final
        } else {
            Phase::Result
        };
        self.touch();
        debug!(session = %self.id, player = %entry.player, earned, "answer scored");

        Ok(AnswerOutcome {
            entry,
            phase: self.phase,
        })
    }

    /// Retire the in-flight cell with a zero-delta "Nobody" entry.
    pub fn skip(&mut self) -> Result<AnswerOutcome, GameError> {
        self.require_phase(Phase::Question, "skip")?;
        if self.board().is_none() {
            return Err(GameError::WrongMode { op: "skip" });
        }
        let active = self.active.take().ok_or(GameError::NoActiveQuestion)?;
        let Prompt::Cell(key) = active.prompt else {
            return Err(GameError::NoActiveQuestion);
        };
        let question = self
            .board()
            .and_then(|b| b.question(&key.0, key.1))
            .ok_or(GameError::NoActiveQuestion)?
            .clone();
        let elapsed_secs = active.clock.elapsed_secs();

        let entry = HistoryEntry {
            player: "Nobody".to_string(),
            category: key.0.clone(),
            question: question.text,
            picked: String::new(),
            answer: question.answer,
            correct: false,
            earned: 0,
            points: key.1,
            elapsed_secs: round_tenths(elapsed_secs),
            bonus: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        self.used.insert(key);
        self.history.push(entry.clone());

        self.phase = if self.is_exhausted() {
            Phase::Final
        } else {
            Phase::Result
        };
        self.touch();

        Ok(AnswerOutcome {
            entry,
            phase: self.phase,
        })
    }

    /// Hand the pick to the next player and return to the board screen.
    pub fn advance_turn(&mut self) -> Result<&Player, GameError> {
        self.require_phase(Phase::Result, "advance_turn")?;
        self.turn = (self.turn + 1) % self.players.len();
        self.phase = Phase::Board;
        self.touch();
        Ok(&self.players[self.turn])
    }

    /// End the session early from the board or result screen.
    pub fn finish(&mut self) -> Result<(), GameError> {
        match self.phase {
            Phase::Board | Phase::Result => {
                self.active = None;
                self.phase = Phase::Final;
                self.touch();
                Ok(())
            }
            phase => Err(GameError::WrongPhase { op: "finish", phase }),
        }
    }

    /// Players ranked by score descending; ties keep join order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(p.score));
        ranked
            .into_iter()
            .enumerate()
            .map(|(i, p)| Standing {
                rank: (i + 1) as u32,
                name: p.name.clone(),
                score: p.score,
            })
            .collect()
    }

    /// Ceiling a perfect session could score, for leaderboard ratios.
    pub fn max_possible(&self) -> i32 {
        match &self.mode {
            SessionMode::Quiz { questions, .. } => {
                scoring::QUIZ_QUESTION_VALUE * questions.len() as i32
            }
            SessionMode::SelfScored { board } | SessionMode::Judged { board } => {
                board.point_values().iter().sum::<i32>() * board.categories().len() as i32
            }
        }
    }

    /// Category-or-mode label for saved score records.
    pub fn score_label(&self) -> &str {
        match &self.mode {
            SessionMode::Quiz { category, .. } => category,
            SessionMode::SelfScored { .. } | SessionMode::Judged { .. } => "jeopardy",
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match &self.mode {
            SessionMode::Quiz { .. } => "quiz",
            SessionMode::SelfScored { .. } => "board",
            SessionMode::Judged { .. } => "judged",
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.turn]
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn board(&self) -> Option<&Board> {
        match &self.mode {
            SessionMode::SelfScored { board } | SessionMode::Judged { board } => Some(board),
            SessionMode::Quiz { .. } => None,
        }
    }

    pub fn is_cell_used(&self, category: &str, points: i32) -> bool {
        self.used.contains(&(category.to_string(), points))
    }

    /// Cells (or linear questions) already played. Only ever grows.
    pub fn used_count(&self) -> usize {
        match &self.mode {
            SessionMode::Quiz { .. } => self.answered,
            _ => self.used.len(),
        }
    }

    pub fn total_cells(&self) -> usize {
        match &self.mode {
            SessionMode::Quiz { questions, .. } => questions.len(),
            SessionMode::SelfScored { board } | SessionMode::Judged { board } => {
                board.total_cells()
            }
        }
    }

    pub fn is_idle(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed().unwrap_or(Duration::ZERO) > timeout
    }

    fn is_exhausted(&self) -> bool {
        self.used_count() >= self.total_cells()
    }

    fn require_phase(&self, want: Phase, op: &'static str) -> Result<(), GameError> {
        if self.phase == want {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                op,
                phase: self.phase,
            })
        }
    }

    fn touch(&mut self) {
        self.last_activity = SystemTime::now();
    }
}

fn fill_placeholder_names(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim().to_string();
            if name.is_empty() {
                format!("Player {}", i + 1)
            } else {
                name
            }
        })
        .collect()
}

/// History entries carry elapsed time rounded to one decimal.
fn round_tenths(secs: f64) -> f64 {
    (secs * 10.0).round() / 10.0
}
