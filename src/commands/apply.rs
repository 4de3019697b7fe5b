//! `blochlab apply <STEP>...` — scripted, non-interactive run.
use std::io::Write;

use anyhow::Result;
use num_complex::Complex64 as C64;
use serde_json::{json, Value};

use crate::core::state::format_amplitude;
use crate::core::{dispatch, timeline, Action, NoticeLevel, QubitEngine, QubitState};

pub fn main(steps: Vec<Action>, json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&mut out, &steps, json)
}

pub fn run(out: &mut impl Write, steps: &[Action], json: bool) -> Result<()> {
    let mut engine = QubitEngine::new();
    let mut notices = Vec::new();
    for step in steps {
        if let Some(n) = dispatch(&mut engine, *step) {
            notices.push(n);
        }
    }

    if json {
        let doc = json!({
            "state": state_json(&engine.current_state()),
            "history": engine
                .history()
                .iter()
                .map(|e| json!({
                    "gate": e.gate.symbol(),
                    "label": e.gate.label(),
                    "state": state_json(&e.state),
                }))
                .collect::<Vec<_>>(),
            "notices": notices
                .iter()
                .map(|n| json!({
                    "level": level_name(n.level),
                    "title": n.title,
                    "message": n.message,
                }))
                .collect::<Vec<_>>(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        return Ok(());
    }

    for n in &notices {
        writeln!(out, "{}: {n}", level_name(n.level))?;
    }
    writeln!(out, "Operation Timeline")?;
    let lines = timeline::render(engine.history());
    if lines.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for l in lines {
        writeln!(out, "  {l}")?;
    }
    let s = engine.current_state();
    let b = s.bloch();
    writeln!(
        out,
        "Final state: α = {}, β = {}",
        format_amplitude(s.alpha()),
        format_amplitude(s.beta())
    )?;
    writeln!(out, "Bloch vector: ({:.4}, {:.4}, {:.4})", b.x + 0.0, b.y + 0.0, b.z + 0.0)?;
    Ok(())
}

fn level_name(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
    }
}

fn amp_json(z: C64) -> Value {
    json!([z.re, z.im])
}

fn state_json(s: &QubitState) -> Value {
    json!({ "alpha": amp_json(s.alpha()), "beta": amp_json(s.beta()) })
}
