//! Single-qubit state vector `α|0⟩ + β|1⟩`.
use std::fmt;

use nalgebra::{Matrix2, Vector2};
use num_complex::Complex64 as C64;

use super::bloch::BlochVector;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QubitState {
    amps: Vector2<C64>,
}

impl QubitState {
    /// `|0⟩`, the state the engine starts from and resets to.
    pub fn ground() -> Self {
        Self::from_amplitudes(C64::new(1.0, 0.0), C64::new(0.0, 0.0))
    }

    pub fn excited() -> Self {
        Self::from_amplitudes(C64::new(0.0, 0.0), C64::new(1.0, 0.0))
    }

    /// Raw constructor; the caller is responsible for normalization.
    pub fn from_amplitudes(alpha: C64, beta: C64) -> Self {
        Self { amps: Vector2::new(alpha, beta) }
    }

    pub fn alpha(&self) -> C64 {
        self.amps[0]
    }

    pub fn beta(&self) -> C64 {
        self.amps[1]
    }

    pub fn amplitudes(&self) -> [C64; 2] {
        [self.amps[0], self.amps[1]]
    }

    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|z| z.norm_sqr()).sum()
    }

    /// `U · ψ`, written out row by row: four products, two sums.
    pub fn evolve(&self, u: &Matrix2<C64>) -> Self {
        let (a, b) = (self.amps[0], self.amps[1]);
        Self::from_amplitudes(u[(0, 0)] * a + u[(0, 1)] * b, u[(1, 0)] * a + u[(1, 1)] * b)
    }

    /// `⟨self|other⟩`.
    pub fn inner(&self, other: &QubitState) -> C64 {
        self.amps.dotc(&other.amps)
    }

    /// `|⟨self|other⟩|²`; insensitive to global phase.
    pub fn fidelity(&self, other: &QubitState) -> f64 {
        self.inner(other).norm_sqr()
    }

    pub fn approx_eq(&self, other: &QubitState, tol: f64) -> bool {
        self.amps
            .iter()
            .zip(other.amps.iter())
            .all(|(a, b)| (a - b).norm() <= tol)
    }

    pub fn bloch(&self) -> BlochVector {
        BlochVector::from_state(&self.amplitudes())
    }
}

impl Default for QubitState {
    fn default() -> Self {
        Self::ground()
    }
}

/// `a+bi` with four decimals.
pub fn format_amplitude(z: C64) -> String {
    let sign = if z.im < 0.0 { '-' } else { '+' };
    // + 0.0 folds -0.0 into 0.0
    format!("{:.4}{}{:.4}i", z.re + 0.0, sign, z.im.abs())
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            format_amplitude(self.alpha()),
            format_amplitude(self.beta())
        )
    }
}
