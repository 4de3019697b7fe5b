//! Text form of the operation history.
//!
//! Each line keeps only the real parts of α and β, two decimals. After a Y
//! gate that hides the whole state (`(0, i)` shows as `[0.00, 0.00]`); the
//! full amplitudes are shown separately by the state panels.
use super::engine::HistoryEntry;

pub fn format_entry(entry: &HistoryEntry) -> String {
    format!(
        "{} -> State: [{:.2}, {:.2}]",
        entry.gate.label(),
        entry.state.alpha().re,
        entry.state.beta().re
    )
}

pub fn render(history: &[HistoryEntry]) -> Vec<String> {
    history.iter().map(format_entry).collect()
}
