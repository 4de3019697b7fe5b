//! Engine behaviour through the public API: gate results, undo and reset.
use blochlab::core::{Gate, QubitEngine, QubitState, UndoOutcome};
use num_complex::Complex64 as C64;

const S: f64 = std::f64::consts::FRAC_1_SQRT_2;

fn close(a: &QubitState, alpha: C64, beta: C64) -> bool {
    (a.alpha() - alpha).norm() < 1e-12 && (a.beta() - beta).norm() < 1e-12
}

#[test]
fn gates_from_ground() {
    let mut e = QubitEngine::new();
    assert!(close(&e.apply_gate(Gate::X), C64::new(0.0, 0.0), C64::new(1.0, 0.0)));

    let mut e2 = QubitEngine::new();
    assert!(close(&e2.apply_gate(Gate::H), C64::new(S, 0.0), C64::new(S, 0.0)));

    let mut e3 = QubitEngine::new();
    assert!(close(&e3.apply_gate(Gate::Y), C64::new(0.0, 0.0), C64::new(0.0, 1.0)));

    e.apply_gate(Gate::X);
    assert_eq!(e.current_state(), QubitState::ground());
}

#[test]
fn apply_then_undo_restores_exactly() {
    let prefixes: [&[Gate]; 4] =
        [&[], &[Gate::H], &[Gate::H, Gate::Y], &[Gate::X, Gate::H, Gate::Y]];
    for prefix in prefixes {
        for g in Gate::ALL {
            let mut e = QubitEngine::new();
            for p in prefix {
                e.apply_gate(*p);
            }
            let before = e.current_state();
            e.apply_gate(g);
            assert_eq!(e.undo(), UndoOutcome::Undone(g));
            assert_eq!(e.current_state(), before, "prefix {prefix:?} then {g}");
            assert_eq!(e.history_len(), prefix.len());
        }
    }
}

#[test]
fn undo_on_empty_is_a_no_op() {
    let mut e = QubitEngine::new();
    assert_eq!(e.undo(), UndoOutcome::NothingToUndo);
    assert_eq!(e.current_state(), QubitState::ground());
    assert!(e.history().is_empty());
}

#[test]
fn undoing_the_first_gate_returns_to_ground() {
    let mut e = QubitEngine::new();
    e.apply_gate(Gate::Y);
    e.undo();
    assert_eq!(e.current_state(), QubitState::ground());
}

#[test]
fn reset_always_yields_ground_and_empty_history() {
    for n in 0..6 {
        let mut e = QubitEngine::new();
        for i in 0..n {
            e.apply_gate(Gate::ALL[i % 3]);
        }
        e.reset();
        assert_eq!(e.current_state(), QubitState::ground());
        assert_eq!(e.history_len(), 0);
    }
}

#[test]
fn history_length_is_applies_minus_undos() {
    let n = 7;
    for k in 0..=n {
        let mut e = QubitEngine::new();
        for i in 0..n {
            e.apply_gate(Gate::ALL[(i * 2) % 3]);
        }
        for _ in 0..k {
            e.undo();
        }
        assert_eq!(e.history_len(), n - k);
    }
}

#[test]
fn norm_is_preserved_along_a_long_sequence() {
    let mut e = QubitEngine::new();
    for i in 0..50 {
        let s = e.apply_gate(Gate::ALL[(i * 7 + 1) % 3]);
        assert!((s.norm_sqr() - 1.0).abs() < 1e-9);
        assert!((s.bloch().magnitude() - 1.0).abs() < 1e-9);
    }
}

#[test]
fn snapshots_are_detached_from_later_changes() {
    let mut e = QubitEngine::new();
    e.apply_gate(Gate::H);
    let snap = e.history_snapshot();
    e.apply_gate(Gate::Y);
    e.reset();
    assert_eq!(snap.len(), 1);
    assert_eq!(snap[0].gate, Gate::H);
}
