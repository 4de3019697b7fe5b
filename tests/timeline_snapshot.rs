//! Timeline text keeps only the real parts, two decimals each.
use blochlab::core::{timeline, Gate, QubitEngine};

#[test]
fn x_h_y_timeline() {
    let mut e = QubitEngine::new();
    for g in [Gate::X, Gate::H, Gate::Y] {
        e.apply_gate(g);
    }
    insta::assert_snapshot!(timeline::render(e.history()).join("\n"), @r###"
    X-Gate -> State: [0.00, 1.00]
    Hadamard Gate -> State: [0.71, -0.71]
    Y-Gate -> State: [0.00, 0.00]
    "###);
}

#[test]
fn undo_drops_the_last_line() {
    let mut e = QubitEngine::new();
    e.apply_gate(Gate::H);
    e.apply_gate(Gate::X);
    e.undo();
    assert_eq!(timeline::render(e.history()), vec!["Hadamard Gate -> State: [0.71, 0.71]"]);
}
