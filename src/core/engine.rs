//! Qubit state engine: current state plus an append/pop history of snapshots.
//!
//! The engine knows nothing about rendering or notifications; callers read
//! [`QubitEngine::current_state`] and [`QubitEngine::history`] after each
//! operation and redraw whatever they own.
use std::fmt;

use super::gates::Gate;
use super::state::QubitState;
use super::timeline;

/// A gate together with the state recorded right after it was applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub gate: Gate,
    pub state: QubitState,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&timeline::format_entry(self))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UndoOutcome {
    Undone(Gate),
    /// History was empty; nothing changed.
    NothingToUndo,
}

#[derive(Clone, Debug, Default)]
pub struct QubitEngine {
    state: QubitState,
    history: Vec<HistoryEntry>,
}

impl QubitEngine {
    /// Fresh engine at `|0⟩` with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Left-multiplies the gate's unitary into the state and records the result.
    pub fn apply_gate(&mut self, gate: Gate) -> QubitState {
        self.state = self.state.evolve(gate.matrix());
        self.history.push(HistoryEntry { gate, state: self.state });
        self.state
    }

    /// Drops the newest entry and restores the state recorded before it
    /// (`|0⟩` once the history runs out).
    pub fn undo(&mut self) -> UndoOutcome {
        match self.history.pop() {
            Some(undone) => {
                self.state = self
                    .history
                    .last()
                    .map(|e| e.state)
                    .unwrap_or_else(QubitState::ground);
                UndoOutcome::Undone(undone.gate)
            }
            None => UndoOutcome::NothingToUndo,
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
        self.state = QubitState::ground();
    }

    pub fn current_state(&self) -> QubitState {
        self.state
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn history_snapshot(&self) -> Vec<HistoryEntry> {
        self.history.clone()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
