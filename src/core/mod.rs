//! Core processing modules
//!
//! Contains the paragraph-reflow normalizer. Everything in here is pure:
//! no I/O, no shared state, no failure modes.

pub mod normalizer;

pub use normalizer::clean;
