//! Tutorial text shared by the TUI overlay and the shell's `tutorial` command.
use super::gates::Gate;

pub const INTRO: &[&str] = &[
    "A qubit state is α|0⟩ + β|1⟩ with |α|² + |β|² = 1.",
    "On the Bloch sphere |0⟩ is the north pole, |1⟩ the south pole,",
    "and equal superpositions such as |+⟩ and |−⟩ lie on the equator.",
    "A global phase (multiplying both amplitudes by the same e^{iφ})",
    "does not move the point, so i|1⟩ sits exactly where |1⟩ does.",
];

pub const TIMELINE_NOTE: &str =
    "Timeline lines show only the real parts of α and β; the state panel shows both parts.";

/// Full tutorial as lines: intro, one line per gate, then the controls given.
pub fn tutorial_lines(controls: &[(&str, &str)]) -> Vec<String> {
    let mut out: Vec<String> = INTRO.iter().map(|s| s.to_string()).collect();
    out.push(String::new());
    out.push("Gates".to_string());
    for g in Gate::ALL {
        out.push(format!("  {:<14} {}", g.label(), g.summary()));
    }
    out.push(String::new());
    out.push(TIMELINE_NOTE.to_string());
    if !controls.is_empty() {
        out.push(String::new());
        out.push("Controls".to_string());
        for (keys, what) in controls {
            out.push(format!("  {:<14} {}", keys, what));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_gate_and_control() {
        let lines = tutorial_lines(&[("u", "undo")]);
        for g in Gate::ALL {
            assert!(lines.iter().any(|l| l.contains(g.label())));
        }
        assert!(lines.last().unwrap().contains("undo"));
    }
}
