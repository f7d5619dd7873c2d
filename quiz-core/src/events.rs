use quiz_types::{HistoryEntry, Phase, SessionId, Standing};

#[derive(Debug, Clone)]
pub enum SessionEvent {
    SessionStarted {
        session_id: SessionId,
        players: Vec<String>,
        mode: &'static str,
    },
    QuestionPicked {
        session_id: SessionId,
        category: String,
        points: i32,
    },
    AnswerSubmitted {
        session_id: SessionId,
        entry: HistoryEntry,
        next_phase: Phase,
    },
    CellSkipped {
        session_id: SessionId,
        category: String,
        points: i32,
    },
    TurnAdvanced {
        session_id: SessionId,
        player: String,
    },
    SessionCompleted {
        session_id: SessionId,
        standings: Vec<Standing>,
    },
    SessionRemoved {
        session_id: SessionId,
        reason: String,
    },
}

impl SessionEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            SessionEvent::SessionStarted { session_id, .. } => *session_id,
            SessionEvent::QuestionPicked { session_id, .. } => *session_id,
            SessionEvent::AnswerSubmitted { session_id, .. } => *session_id,
            SessionEvent::CellSkipped { session_id, .. } => *session_id,
            SessionEvent::TurnAdvanced { session_id, .. } => *session_id,
            SessionEvent::SessionCompleted { session_id, .. } => *session_id,
            SessionEvent::SessionRemoved { session_id, .. } => *session_id,
        }
    }
}

/// Event handler trait for observing session lifecycles
pub trait SessionEventHandler {
    fn handle_event(&mut self, event: SessionEvent);
}

/// Simple event bus for distributing session events
pub struct EventBus {
    handlers: Vec<Box<dyn SessionEventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn SessionEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: SessionEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
