//! Bloch Lab: single-qubit gates (X, Y, Hadamard) on a Bloch sphere, with an
//! undoable operation timeline.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;
pub mod shell;
pub mod tui;
