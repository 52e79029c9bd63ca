mod automaton;
mod state;
mod transition;

pub use {automaton::*, state::*, transition::*};
