//! Input events and the notifications they produce.
//!
//! Every front end (TUI buttons, shell commands, `apply` steps) turns its input
//! into an [`Action`] and goes through [`dispatch`], so they all agree on
//! what gets announced.
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use super::engine::{QubitEngine, UndoOutcome};
use super::error::BlochError;
use super::gates::Gate;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Apply(Gate),
    Undo,
    Reset,
}

impl FromStr for Action {
    type Err = BlochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undo" | "u" => Ok(Action::Undo),
            "reset" | "clear" => Ok(Action::Reset),
            _ => s
                .parse::<Gate>()
                .map(Action::Apply)
                .map_err(|_| BlochError::UnknownAction(s.trim().to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(title: &'static str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, title, message: message.into() }
    }

    pub fn warning(title: &'static str, message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, title, message: message.into() }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Runs one action against the engine. Gate applications are silent; undo
/// and reset report back.
pub fn dispatch(engine: &mut QubitEngine, action: Action) -> Option<Notice> {
    match action {
        Action::Apply(gate) => {
            let state = engine.apply_gate(gate);
            debug!(gate = gate.symbol(), %state, depth = engine.history_len(), "gate applied");
            None
        }
        Action::Undo => match engine.undo() {
            UndoOutcome::Undone(gate) => {
                info!(gate = gate.symbol(), depth = engine.history_len(), "undo");
                Some(Notice::info("Undo", format!("Undid {}", gate.label())))
            }
            UndoOutcome::NothingToUndo => {
                debug!("undo requested with empty history");
                Some(Notice::warning("Undo", "No operations to undo"))
            }
        },
        Action::Reset => {
            engine.reset();
            info!("timeline cleared");
            Some(Notice::info("Clear", "Timeline and state cleared"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::QubitState;

    #[test]
    fn parses_steps() {
        assert_eq!("undo".parse::<Action>().unwrap(), Action::Undo);
        assert_eq!("Clear".parse::<Action>().unwrap(), Action::Reset);
        assert_eq!("h".parse::<Action>().unwrap(), Action::Apply(Gate::H));
        assert!(matches!(
            "redo".parse::<Action>(),
            Err(BlochError::UnknownAction(ref s)) if s == "redo"
        ));
    }

    #[test]
    fn gate_dispatch_is_silent() {
        let mut e = QubitEngine::new();
        assert_eq!(dispatch(&mut e, Action::Apply(Gate::X)), None);
        assert_eq!(e.current_state(), QubitState::excited());
    }

    #[test]
    fn undo_reports_gate_name() {
        let mut e = QubitEngine::new();
        dispatch(&mut e, Action::Apply(Gate::H));
        let n = dispatch(&mut e, Action::Undo).unwrap();
        assert_eq!(n.level, NoticeLevel::Info);
        assert_eq!(n.to_string(), "Undo: Undid Hadamard Gate");
    }

    #[test]
    fn empty_undo_warns() {
        let mut e = QubitEngine::new();
        let n = dispatch(&mut e, Action::Undo).unwrap();
        assert_eq!(n, Notice::warning("Undo", "No operations to undo"));
    }

    #[test]
    fn reset_announces_clear() {
        let mut e = QubitEngine::new();
        dispatch(&mut e, Action::Apply(Gate::Y));
        let n = dispatch(&mut e, Action::Reset).unwrap();
        assert_eq!(n.to_string(), "Clear: Timeline and state cleared");
        assert_eq!(e.history_len(), 0);
    }
}
