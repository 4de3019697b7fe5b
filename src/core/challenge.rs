//! Gate challenge: reach a target state with X, Y and H.
//!
//! From `|0⟩` those three gates only ever reach four states up to global
//! phase, so targets are drawn from that set. A target counts as reached when
//! `|⟨target|ψ⟩|² ≥ 1 − FIDELITY_TOLERANCE`.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use num_complex::Complex64 as C64;

use super::events::{Action, Notice};
use super::state::QubitState;

pub const FIDELITY_TOLERANCE: f64 = 1e-9;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Target {
    pub name: &'static str,
    pub state: QubitState,
}

impl Target {
    pub fn is_reached_by(&self, state: &QubitState) -> bool {
        self.state.fidelity(state) >= 1.0 - FIDELITY_TOLERANCE
    }
}

pub fn targets() -> [Target; 4] {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let c = |r: f64| C64::new(r, 0.0);
    [
        Target { name: "|0⟩", state: QubitState::ground() },
        Target { name: "|1⟩", state: QubitState::excited() },
        Target { name: "|+⟩", state: QubitState::from_amplitudes(c(s), c(s)) },
        Target { name: "|−⟩", state: QubitState::from_amplitudes(c(s), c(-s)) },
    ]
}

/// The pulse challenge needs continuous rotations, which the fixed gate table
/// cannot express; the menu entry only explains that.
pub fn pulse_notice() -> Notice {
    Notice::info(
        "Pulse Challenge",
        "Continuous pulses are not part of the fixed X/Y/H gate table; try the gate challenge",
    )
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Solved {
    pub target: &'static str,
    pub moves: usize,
}

#[derive(Debug)]
pub struct GateChallenge<R = StdRng> {
    rng: R,
    target: Target,
    moves: usize,
    solved: usize,
}

impl GateChallenge<StdRng> {
    pub fn new(current: &QubitState) -> Self {
        Self::with_rng(StdRng::from_entropy(), current)
    }
}

impl<R: Rng> GateChallenge<R> {
    pub fn with_rng(mut rng: R, current: &QubitState) -> Self {
        let target = pick_target(&mut rng, current);
        Self { rng, target, moves: 0, solved: 0 }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Gates applied since the current target was drawn.
    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn solved(&self) -> usize {
        self.solved
    }

    /// Feed the action just dispatched and the engine's state after it.
    /// Returns the solved target and draws a new one when it was reached.
    /// Clearing back to `|0⟩` restarts the count but never solves a target.
    pub fn record(&mut self, action: Action, state: &QubitState) -> Option<Solved> {
        match action {
            Action::Apply(_) => self.moves += 1,
            Action::Reset => {
                self.moves = 0;
                return None;
            }
            Action::Undo => {}
        }
        if !self.target.is_reached_by(state) {
            return None;
        }
        let done = Solved { target: self.target.name, moves: self.moves };
        self.solved += 1;
        self.moves = 0;
        self.target = pick_target(&mut self.rng, state);
        Some(done)
    }
}

fn pick_target<R: Rng>(rng: &mut R, current: &QubitState) -> Target {
    let all = targets();
    let open: Vec<Target> = all.iter().copied().filter(|t| !t.is_reached_by(current)).collect();
    open.choose(rng).copied().unwrap_or(all[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::QubitEngine;
    use crate::core::events::dispatch;
    use crate::core::gates::Gate;

    fn seeded(current: &QubitState) -> GateChallenge<StdRng> {
        GateChallenge::with_rng(StdRng::seed_from_u64(7), current)
    }

    #[test]
    fn never_targets_the_current_state() {
        for seed in 0..32 {
            let ch = GateChallenge::with_rng(StdRng::seed_from_u64(seed), &QubitState::ground());
            assert_ne!(ch.target().name, "|0⟩");
        }
    }

    #[test]
    fn all_targets_are_reachable_from_ground() {
        let mut e = QubitEngine::new();
        let paths: [&[Gate]; 4] = [&[], &[Gate::X], &[Gate::H], &[Gate::X, Gate::H]];
        for (t, path) in targets().iter().zip(paths) {
            e.reset();
            for g in path {
                e.apply_gate(*g);
            }
            assert!(t.is_reached_by(&e.current_state()), "{} not reached", t.name);
        }
    }

    #[test]
    fn global_phase_does_not_matter() {
        let mut e = QubitEngine::new();
        e.apply_gate(Gate::Y); // i|1⟩
        assert!(targets()[1].is_reached_by(&e.current_state()));
    }

    #[test]
    fn solving_counts_moves_and_draws_a_new_target() {
        let mut e = QubitEngine::new();
        let mut ch = seeded(&e.current_state());
        let goal = *ch.target();
        let path: &[Gate] = match goal.name {
            "|1⟩" => &[Gate::X],
            "|+⟩" => &[Gate::H],
            _ => &[Gate::X, Gate::H],
        };
        let mut solved = None;
        for g in path {
            dispatch(&mut e, Action::Apply(*g));
            solved = ch.record(Action::Apply(*g), &e.current_state());
        }
        assert_eq!(solved, Some(Solved { target: goal.name, moves: path.len() }));
        assert_eq!(ch.solved(), 1);
        assert_eq!(ch.moves(), 0);
        assert!(!ch.target().is_reached_by(&e.current_state()));
    }

    #[test]
    fn undo_can_reach_the_target() {
        let mut e = QubitEngine::new();
        e.apply_gate(Gate::X);
        e.apply_gate(Gate::H);
        let here = e.current_state();
        let mut ch = (0..)
            .map(|seed| GateChallenge::with_rng(StdRng::seed_from_u64(seed), &here))
            .find(|ch| ch.target().name == "|1⟩")
            .unwrap();
        e.undo();
        let solved = ch.record(Action::Undo, &e.current_state());
        assert_eq!(solved, Some(Solved { target: "|1⟩", moves: 0 }));
    }

    #[test]
    fn pulse_entry_is_informational() {
        let n = pulse_notice();
        assert_eq!(n.title, "Pulse Challenge");
        assert!(n.message.contains("gate table"));
    }

    #[test]
    fn clearing_to_ground_does_not_solve() {
        let mut e = QubitEngine::new();
        e.apply_gate(Gate::X);
        let here = e.current_state();
        let mut ch = (0..)
            .map(|seed| GateChallenge::with_rng(StdRng::seed_from_u64(seed), &here))
            .find(|ch| ch.target().name == "|0⟩")
            .unwrap();
        ch.record(Action::Apply(Gate::X), &here);
        assert_eq!(ch.moves(), 1);

        dispatch(&mut e, Action::Reset);
        assert_eq!(ch.record(Action::Reset, &e.current_state()), None);
        assert_eq!(ch.solved(), 0);
        assert_eq!(ch.moves(), 0);
        assert_eq!(ch.target().name, "|0⟩");

        // the same state reached by a gate still counts
        dispatch(&mut e, Action::Apply(Gate::X));
        dispatch(&mut e, Action::Apply(Gate::X));
        ch.record(Action::Apply(Gate::X), &QubitState::excited());
        let solved = ch.record(Action::Apply(Gate::X), &e.current_state());
        assert_eq!(solved, Some(Solved { target: "|0⟩", moves: 2 }));
    }
}
