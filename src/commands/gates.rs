//! `blochlab gates` — print the fixed gate table.
use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use crate::core::state::format_amplitude;
use crate::core::Gate;

pub fn main() -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for g in Gate::ALL {
        writeln!(out, "{}  {}", g.label().bold().truecolor(0, 255, 180), g.summary())?;
        for line in matrix_lines(g) {
            writeln!(out, "    {line}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn matrix_lines(g: Gate) -> [String; 2] {
    let m = g.matrix();
    [0usize, 1].map(|r| {
        format!(
            "[ {:>16}  {:>16} ]",
            format_amplitude(m[(r, 0)]),
            format_amplitude(m[(r, 1)])
        )
    })
}
