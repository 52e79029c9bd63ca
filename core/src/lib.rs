//! Finite automaton engine: DFA/NFA definitions, structural validation, determinism checks,
//! subset construction and traced simulation.

#![warn(clippy::all)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(missing_docs)]

mod error;

/// Automaton definitions: states, symbols, transitions and the automaton itself.
pub mod automaton;

/// Serialized automaton records and stream helpers.
pub mod io;

pub mod operations;

pub mod run;

pub mod simulation;

pub mod validate;

pub use error::*;
