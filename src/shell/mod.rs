use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::commands::gates::matrix_lines;
use crate::config::BlochConfig;
use crate::core::bloch::Camera;
use crate::core::challenge::{pulse_notice, GateChallenge};
use crate::core::lessons::tutorial_lines;
use crate::core::state::format_amplitude;
use crate::core::{dispatch, timeline, Action, Gate, Notice, NoticeLevel, QubitEngine};

pub fn start(config_path: Option<PathBuf>, cfg: &BlochConfig) -> Result<()> {
    banner(config_path.as_ref());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(cfg.camera());
    session.run(stdin.lock(), stdout.lock(), true)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Engine plus the shell-side state around it.
pub struct Session {
    engine: QubitEngine,
    challenge: Option<GateChallenge>,
    camera: Camera,
}

impl Session {
    pub fn new(camera: Camera) -> Self {
        Self { engine: QubitEngine::new(), challenge: None, camera }
    }

    pub fn engine(&self) -> &QubitEngine {
        &self.engine
    }

    pub fn run(&mut self, input: impl BufRead, mut out: impl Write, prompt: bool) -> Result<()> {
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "{} ", "⟦BLOCH⟧ ›".bold().truecolor(225, 0, 180))?;
                out.flush()?;
            }
            let line = match lines.next() {
                Some(l) => l?,
                None => {
                    writeln!(out)?;
                    break;
                }
            };
            if self.execute(&line, &mut out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let mut parts = shell_words(line);
        if parts.is_empty() {
            return Ok(Flow::Continue);
        }
        let cmd = parts.remove(0).to_ascii_lowercase();

        match cmd.as_str() {
            "help" | "?" => print_help(out)?,
            "exit" | "quit" => return Ok(Flow::Exit),

            "apply" => match parts.first() {
                Some(name) => match name.parse::<Gate>() {
                    Ok(g) => self.act(Action::Apply(g), out)?,
                    Err(e) => writeln!(out, "{} {}", "err:".red().bold(), e)?,
                },
                None => usage(out, "apply <x|y|h>")?,
            },
            "undo" => self.act(Action::Undo, out)?,
            "clear" | "reset" => self.act(Action::Reset, out)?,

            "state" => self.print_state(out)?,
            "timeline" | "history" => self.print_timeline(out)?,
            "bloch" => self.print_bloch(out)?,
            "gates" => {
                for g in Gate::ALL {
                    writeln!(out, "{}  {}", g.label().bold().truecolor(0, 255, 180), g.summary())?;
                    for l in matrix_lines(g) {
                        writeln!(out, "    {l}")?;
                    }
                }
            }
            "tutorial" => {
                for l in tutorial_lines(&SHELL_CONTROLS) {
                    writeln!(out, "{l}")?;
                }
            }
            "challenge" => {
                let sub = parts.first().map(|s| s.as_str()).unwrap_or("start");
                self.challenge_cmd(sub, out)?;
            }
            "pulse" => print_notice(out, &pulse_notice())?,

            other => match other.parse::<Gate>() {
                Ok(g) => self.act(Action::Apply(g), out)?,
                Err(_) => writeln!(
                    out,
                    "{} unknown command: {other} (try 'help')",
                    "err:".red().bold()
                )?,
            },
        }
        Ok(Flow::Continue)
    }

    fn act(&mut self, action: Action, out: &mut impl Write) -> Result<()> {
        let notice = dispatch(&mut self.engine, action);
        if let Some(n) = &notice {
            print_notice(out, n)?;
        }
        if let Action::Apply(_) = action {
            if let Some(last) = self.engine.history().last() {
                writeln!(out, "{}", last.to_string().truecolor(190, 190, 200))?;
            }
        }
        let state = self.engine.current_state();
        if let Some(ch) = self.challenge.as_mut() {
            if let Some(done) = ch.record(action, &state) {
                let n = Notice::info(
                    "Gate Challenge",
                    format!(
                        "Reached {} in {} move(s). Next target: {}",
                        done.target,
                        done.moves,
                        ch.target().name
                    ),
                );
                print_notice(out, &n)?;
            }
        }
        Ok(())
    }

    fn challenge_cmd(&mut self, sub: &str, out: &mut impl Write) -> Result<()> {
        match sub {
            "start" => {
                self.engine.reset();
                let ch = GateChallenge::new(&self.engine.current_state());
                let n = Notice::info(
                    "Gate Challenge",
                    format!("Apply gates to reach the target state {}", ch.target().name),
                );
                self.challenge = Some(ch);
                print_notice(out, &n)?;
            }
            "status" => match &self.challenge {
                Some(ch) => writeln!(
                    out,
                    "target {}  moves {}  solved {}",
                    ch.target().name.bold(),
                    ch.moves(),
                    ch.solved()
                )?,
                None => writeln!(out, "no challenge running (try 'challenge start')")?,
            },
            "stop" => match self.challenge.take() {
                Some(ch) => {
                    let msg = format!("Stopped after {} target(s)", ch.solved());
                    print_notice(out, &Notice::info("Gate Challenge", msg))?
                }
                None => writeln!(out, "no challenge running")?,
            },
            _ => usage(out, "challenge [start|status|stop]")?,
        }
        Ok(())
    }

    fn print_state(&self, out: &mut impl Write) -> Result<()> {
        let s = self.engine.current_state();
        writeln!(out, "α = {}", format_amplitude(s.alpha()).truecolor(255, 240, 0))?;
        writeln!(out, "β = {}", format_amplitude(s.beta()).truecolor(255, 240, 0))?;
        writeln!(
            out,
            "|α|² = {:.4}  |β|² = {:.4}",
            s.alpha().norm_sqr(),
            s.beta().norm_sqr()
        )?;
        Ok(())
    }

    fn print_timeline(&self, out: &mut impl Write) -> Result<()> {
        writeln!(out, "{}", "Operation Timeline".bold().truecolor(130, 0, 200))?;
        let lines = timeline::render(self.engine.history());
        if lines.is_empty() {
            writeln!(out, "  (empty)")?;
        }
        for (i, l) in lines.iter().enumerate() {
            writeln!(out, "{:>3}. {}", i + 1, l)?;
        }
        Ok(())
    }

    fn print_bloch(&self, out: &mut impl Write) -> Result<()> {
        let b = self.engine.current_state().bloch();
        let a = b.angles();
        let p = self.camera.project(&b);
        writeln!(
            out,
            "Bloch vector (x, y, z) = ({:.4}, {:.4}, {:.4})",
            b.x + 0.0,
            b.y + 0.0,
            b.z + 0.0
        )?;
        writeln!(
            out,
            "θ = {:.1}°  φ = {:.1}°",
            a.theta.to_degrees(),
            a.phi.to_degrees()
        )?;
        writeln!(
            out,
            "view (az {:.0}°, el {:.0}°): screen ({:.3}, {:.3}) {}",
            self.camera.azimuth,
            self.camera.elevation,
            p.u,
            p.v,
            if p.is_front() { "front" } else { "back" }
        )?;
        Ok(())
    }
}

const SHELL_CONTROLS: [(&str, &str); 9] = [
    ("x | y | h", "apply a gate (also: apply <gate>)"),
    ("undo", "undo the last gate"),
    ("clear", "reset to |0⟩ and clear the timeline"),
    ("state", "full amplitudes"),
    ("timeline", "operation history"),
    ("bloch", "Bloch vector and angles"),
    ("challenge", "start | status | stop"),
    ("pulse", "about the pulse challenge"),
    ("exit", "leave the shell"),
];

fn print_notice(out: &mut impl Write, n: &Notice) -> io::Result<()> {
    let tag = match n.level {
        NoticeLevel::Info => "info:".truecolor(0, 255, 180).bold(),
        NoticeLevel::Warning => "warn:".yellow().bold(),
    };
    writeln!(out, "{} {}", tag, n)
}

fn banner(config_path: Option<&PathBuf>) {
    println!(
        "\n{}  \n{}  \n",
        "╔══════════════════════════════════════════════════╗".truecolor(225, 0, 180),
        "║                 B l o c h   L a b                ║"
            .truecolor(255, 240, 0)
            .bold(),
    );
    println!(
        "{}  {}",
        "╚══════════════════════════════════════════════════╝".truecolor(225, 0, 180),
        "type 'help' for commands".truecolor(130, 0, 200)
    );
    if let Some(p) = config_path {
        let note = if p.exists() { "" } else { " (not found, using defaults)" };
        println!("{}", format!("config: {}{note}", p.display()).truecolor(190, 190, 200));
    }
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{}\n\
         {}\n  x | y | h           # apply X, Y or Hadamard\n  apply <gate>        # same, by name (X-Gate, hadamard, …)\n  undo                # undo the last gate\n  clear | reset       # back to |0⟩, empty timeline\n\
         {}\n  state               # α and β with both parts\n  timeline | history  # operation timeline\n  bloch               # Bloch vector, angles, projection\n  gates               # gate table\n\
         {}\n  tutorial            # how the sphere and gates work\n  challenge [start|status|stop]\n  pulse               # about the pulse challenge\n\
         {}\n  help                # show this help\n  exit                # quit shell\n",
        "Bloch Lab — single-qubit gate shell".bold().truecolor(0, 255, 180),
        "Gates:".truecolor(130, 0, 200),
        "Inspect:".truecolor(130, 0, 200),
        "Learn:".truecolor(255, 180, 0),
        "Shell:".truecolor(130, 0, 200),
    )
}

fn usage(out: &mut impl Write, s: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "usage:".yellow().bold(), s)
}

fn shell_words(s: &str) -> Vec<String> {
    // minimal split by whitespace respecting "quoted strings"
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut in_q = false;
    for c in s.chars() {
        match (c, in_q) {
            ('"', false) => in_q = true,
            ('"', true) => in_q = false,
            (c, _) if c.is_whitespace() && !in_q => {
                if !buf.is_empty() {
                    out.push(std::mem::take(&mut buf));
                }
            }
            (c, _) => buf.push(c),
        }
    }
    if !buf.is_empty() {
        out.push(buf);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QubitState;

    fn exec(session: &mut Session, line: &str) -> (Flow, String) {
        let mut buf = Vec::new();
        let flow = session.execute(line, &mut buf).unwrap();
        (flow, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn splits_quoted_words() {
        assert_eq!(shell_words(r#"apply "Hadamard Gate""#), vec!["apply", "Hadamard Gate"]);
        assert!(shell_words("   ").is_empty());
    }

    #[test]
    fn gate_commands_drive_the_engine() {
        let mut s = Session::new(Camera::default());
        let (_, out) = exec(&mut s, "x");
        assert!(out.contains("X-Gate -> State: [0.00, 1.00]"));
        exec(&mut s, r#"apply "Hadamard Gate""#);
        assert_eq!(s.engine().history_len(), 2);
        let (_, out) = exec(&mut s, "undo");
        assert!(out.contains("Undo: Undid Hadamard Gate"));
        assert_eq!(s.engine().current_state(), QubitState::excited());
    }

    #[test]
    fn empty_undo_warns_and_keeps_state() {
        let mut s = Session::new(Camera::default());
        let (flow, out) = exec(&mut s, "undo");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("Undo: No operations to undo"));
        assert_eq!(s.engine().current_state(), QubitState::ground());
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut s = Session::new(Camera::default());
        let (_, out) = exec(&mut s, "z");
        assert!(out.contains("unknown command: z"));
        assert_eq!(s.engine().history_len(), 0);
    }

    #[test]
    fn challenge_lifecycle() {
        let mut s = Session::new(Camera::default());
        exec(&mut s, "x");
        let (_, out) = exec(&mut s, "challenge");
        assert!(out.contains("Apply gates to reach the target state"));
        assert_eq!(s.engine().history_len(), 0);
        let (_, out) = exec(&mut s, "challenge status");
        assert!(out.contains("moves 0"));
        let (_, out) = exec(&mut s, "challenge stop");
        assert!(out.contains("Stopped after 0 target(s)"));
    }

    #[test]
    fn pulse_only_explains() {
        let mut s = Session::new(Camera::default());
        exec(&mut s, "h");
        let (flow, out) = exec(&mut s, "pulse");
        assert_eq!(flow, Flow::Continue);
        assert!(out.contains("Pulse Challenge: Continuous pulses"));
        assert_eq!(s.engine().history_len(), 1);
    }

    #[test]
    fn run_stops_at_exit_or_eof() {
        let mut s = Session::new(Camera::default());
        let input = b"h\nexit\nx\n" as &[u8];
        let mut buf = Vec::new();
        s.run(input, &mut buf, false).unwrap();
        assert_eq!(s.engine().history_len(), 1);

        let mut s = Session::new(Camera::default());
        s.run(b"y\ny" as &[u8], &mut buf, false).unwrap();
        assert_eq!(s.engine().current_state(), QubitState::ground());
    }
}
