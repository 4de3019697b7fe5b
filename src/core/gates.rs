//! Fixed single-qubit gate table (X, Y, Hadamard).
//!
//! The matrices are built once on first use and looked up by [`Gate`]; nothing
//! reconstructs them per application.
use std::fmt;
use std::str::FromStr;

use nalgebra::Matrix2;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;

use super::error::BlochError;

#[inline]
fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    X,
    Y,
    H,
}

static GATE_TABLE: Lazy<[Matrix2<C64>; 3]> = Lazy::new(|| {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    [
        // X
        Matrix2::new(c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)),
        // Y
        Matrix2::new(c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)),
        // H
        Matrix2::new(c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)),
    ]
});

impl Gate {
    pub const ALL: [Gate; 3] = [Gate::X, Gate::Y, Gate::H];

    fn index(self) -> usize {
        match self {
            Gate::X => 0,
            Gate::Y => 1,
            Gate::H => 2,
        }
    }

    /// The unitary for this gate, shared process-wide.
    pub fn matrix(self) -> &'static Matrix2<C64> {
        &GATE_TABLE[self.index()]
    }

    /// Name used in the operation timeline.
    pub fn label(self) -> &'static str {
        match self {
            Gate::X => "X-Gate",
            Gate::Y => "Y-Gate",
            Gate::H => "Hadamard Gate",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::H => "H",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Gate::X => "bit flip: |0⟩ ↔ |1⟩, a half turn about the x axis",
            Gate::Y => "bit and phase flip: a half turn about the y axis",
            Gate::H => "superposition: swaps the z and x axes (|0⟩ → |+⟩)",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gate {
    type Err = BlochError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match norm.as_str() {
            "x" | "x-gate" | "pauli-x" | "not" => Ok(Gate::X),
            "y" | "y-gate" | "pauli-y" => Ok(Gate::Y),
            "h" | "h-gate" | "hadamard" | "hadamard-gate" => Ok(Gate::H),
            _ => Err(BlochError::UnknownGate(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_diff(a: &Matrix2<C64>, b: &Matrix2<C64>) -> f64 {
        (a - b).iter().map(|z| z.norm()).fold(0.0_f64, f64::max)
    }

    #[test]
    fn every_gate_is_unitary() {
        for g in Gate::ALL {
            let m = g.matrix();
            let u_dag_u = m.adjoint() * m;
            assert!(max_diff(&u_dag_u, &Matrix2::identity()) < 1e-12, "{g} not unitary");
        }
    }

    #[test]
    fn every_gate_is_its_own_inverse() {
        for g in Gate::ALL {
            let m = g.matrix();
            assert!(max_diff(&(m * m), &Matrix2::identity()) < 1e-12, "{g}² ≠ I");
        }
    }

    #[test]
    fn y_has_imaginary_off_diagonal() {
        let y = Gate::Y.matrix();
        assert_eq!(y[(0, 1)], c(0.0, -1.0));
        assert_eq!(y[(1, 0)], c(0.0, 1.0));
    }

    #[test]
    fn table_lookup_returns_the_same_matrix() {
        assert!(std::ptr::eq(Gate::H.matrix(), Gate::H.matrix()));
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("x".parse::<Gate>().unwrap(), Gate::X);
        assert_eq!("X-Gate".parse::<Gate>().unwrap(), Gate::X);
        assert_eq!(" pauli_y ".parse::<Gate>().unwrap(), Gate::Y);
        assert_eq!("Hadamard Gate".parse::<Gate>().unwrap(), Gate::H);
        assert_eq!("hadamard".parse::<Gate>().unwrap(), Gate::H);
    }

    #[test]
    fn rejects_gates_outside_the_table() {
        let err = "z".parse::<Gate>().unwrap_err();
        assert!(matches!(err, BlochError::UnknownGate(ref s) if s == "z"));
    }
}
