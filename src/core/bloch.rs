//! Bloch sphere geometry: state → point on the unit sphere, and the camera
//! projection the renderers draw with.
//!
//! For `|ψ⟩ = α|0⟩ + β|1⟩`:
//!
//! - `x = 2 Re(ᾱβ)`
//! - `y = 2 Im(ᾱβ)`
//! - `z = |α|² − |β|²`
//!
//! `|0⟩` sits on the north pole (+z), `|1⟩` on the south pole, `|+⟩` on +x.
use std::f64::consts::{PI, TAU};

use num_complex::Complex64 as C64;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlochVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Spherical angles, θ ∈ [0, π] from +z and φ ∈ [0, 2π) from +x.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlochAngles {
    pub theta: f64,
    pub phi: f64,
}

impl BlochVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_state(state: &[C64; 2]) -> Self {
        let (alpha, beta) = (state[0], state[1]);
        let ab = alpha.conj() * beta;
        Self {
            x: 2.0 * ab.re,
            y: 2.0 * ab.im,
            z: alpha.norm_sqr() - beta.norm_sqr(),
        }
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn angles(&self) -> BlochAngles {
        let r = self.magnitude();
        if r < 1e-10 {
            return BlochAngles { theta: 0.0, phi: 0.0 };
        }
        let theta = (self.z / r).clamp(-1.0, 1.0).acos();
        // phi is meaningless at the poles; pin it to 0 there
        let phi = if self.x.abs() < 1e-12 && self.y.abs() < 1e-12 {
            0.0
        } else {
            let p = self.y.atan2(self.x);
            if p < 0.0 { p + TAU } else { p }
        };
        BlochAngles { theta, phi }
    }
}

/// Orthographic camera, angles in degrees (matplotlib's `view_init` convention).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    pub azimuth: f64,
    pub elevation: f64,
}

/// Screen coordinates of a projected point; `depth > 0` faces the viewer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub u: f64,
    pub v: f64,
    pub depth: f64,
}

impl Projection {
    pub fn is_front(&self) -> bool {
        self.depth >= 0.0
    }
}

impl Camera {
    pub fn new(azimuth: f64, elevation: f64) -> Self {
        Self { azimuth, elevation }
    }

    pub fn project(&self, p: &BlochVector) -> Projection {
        let (sa, ca) = self.azimuth.to_radians().sin_cos();
        let (se, ce) = self.elevation.to_radians().sin_cos();
        Projection {
            u: -p.x * sa + p.y * ca,
            v: -p.x * ca * se - p.y * sa * se + p.z * ce,
            depth: p.x * ca * ce + p.y * sa * ce + p.z * se,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(60.0, 30.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Circle {
    /// z = 0
    Equator,
    /// y = 0
    MeridianXZ,
    /// x = 0
    MeridianYZ,
}

/// `samples` points evenly spaced around a unit great circle.
pub fn great_circle(circle: Circle, samples: usize) -> Vec<BlochVector> {
    (0..samples)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / samples as f64;
            let (s, c) = t.sin_cos();
            match circle {
                Circle::Equator => BlochVector::new(c, s, 0.0),
                Circle::MeridianXZ => BlochVector::new(s, 0.0, c),
                Circle::MeridianYZ => BlochVector::new(0.0, s, c),
            }
        })
        .collect()
}
