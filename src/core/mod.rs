//! Qubit model: gate table, state vector, engine with undo history, and the
//! pieces the front ends share (events, timeline text, Bloch geometry,
//! challenge, tutorial).

pub mod bloch;
pub mod challenge;
pub mod engine;
pub mod error;
pub mod events;
pub mod gates;
pub mod lessons;
pub mod state;
pub mod timeline;

pub use engine::{HistoryEntry, QubitEngine, UndoOutcome};
pub use error::{BlochError, BlochResult};
pub use events::{dispatch, Action, Notice, NoticeLevel};
pub use gates::Gate;
pub use state::QubitState;
