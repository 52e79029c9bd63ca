use {
    crate::automaton::{State, Symbol, Transition},
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Whether an automaton is declared deterministic or not.
///
/// The tag is advisory: it is set by whoever builds the automaton and is never derived from the
/// transition table. A DFA-tagged automaton with a non-deterministic table is reported by
/// [crate::operations::check_consistency].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AutomatonKind {
    /// Deterministic finite automaton.
    #[default]
    #[serde(rename = "DFA")]
    Dfa,

    /// Non-deterministic finite automaton.
    #[serde(rename = "NFA")]
    Nfa,
}

impl Display for AutomatonKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Dfa => f.write_str("DFA"),
            Self::Nfa => f.write_str("NFA"),
        }
    }
}

/// A finite automaton definition.
///
/// States, alphabet, transitions and accept states keep their declaration order. That order is
/// only meaningful for display, for the first-match tie-break of [crate::run::run] and for the
/// order in which [crate::operations::to_dfa] explores symbols.
///
/// An `Automaton` is never edited in place. Edits are made by building a new value (see
/// [Builder]) and validating it as a whole with [crate::validate::validate].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Automaton {
    #[serde(rename = "type")]
    kind: AutomatonKind,

    states: Vec<State>,

    alphabet: Vec<Symbol>,

    transitions: Vec<Transition>,

    #[serde(rename = "startState")]
    start: State,

    #[serde(rename = "acceptingStates")]
    accepting: Vec<State>,
}

impl Automaton {
    /// Create a new automaton from its parts. No validation is performed.
    pub fn new(
        kind: AutomatonKind,
        states: Vec<State>,
        alphabet: Vec<Symbol>,
        transitions: Vec<Transition>,
        start: State,
        accepting: Vec<State>,
    ) -> Self {
        Self {
            kind,
            states,
            alphabet,
            transitions,
            start,
            accepting,
        }
    }

    /// Returns a [Builder] for an automaton of the given kind.
    pub fn builder(kind: AutomatonKind) -> Builder {
        Builder::new(kind)
    }

    /// Returns a copy of this automaton with a different kind tag.
    pub fn with_kind(&self, kind: AutomatonKind) -> Self {
        Self {
            kind,
            ..self.clone()
        }
    }

    /// Returns the declared kind.
    #[inline]
    pub fn get_kind(&self) -> AutomatonKind {
        self.kind
    }

    /// Returns the declared states, in order.
    #[inline]
    pub fn get_states(&self) -> &[State] {
        &self.states
    }

    /// Returns the alphabet, in order.
    #[inline]
    pub fn get_alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// Returns the transitions, in order.
    #[inline]
    pub fn get_transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Returns the start state.
    #[inline]
    pub fn get_start_state(&self) -> &State {
        &self.start
    }

    /// Returns the accept states.
    #[inline]
    pub fn get_accept_states(&self) -> &[State] {
        &self.accepting
    }

    /// Returns the number of declared states.
    #[inline]
    pub fn get_num_states(&self) -> usize {
        self.states.len()
    }

    /// Returns true if `state` is declared in this automaton.
    pub fn has_state(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    /// Returns true if `symbol` is part of this automaton's alphabet.
    pub fn has_symbol(&self, symbol: Symbol) -> bool {
        self.alphabet.contains(&symbol)
    }

    /// Returns true if `state` is an accept state.
    pub fn is_accept(&self, state: &State) -> bool {
        self.accepting.contains(state)
    }

    /// Returns the first declared transition leaving `from` on `symbol`, if any.
    ///
    /// On a non-deterministic table the earliest transition in declaration order wins.
    pub fn find_transition(&self, from: &State, symbol: Symbol) -> Option<&Transition> {
        self.transitions.iter().find(|t| &t.from == from && t.symbol == symbol)
    }
}

/// Builds an [Automaton] one piece at a time. The builder never validates; call
/// [crate::validate::validate] on the result.
#[derive(Debug, Default)]
pub struct Builder {
    kind: AutomatonKind,
    states: Vec<State>,
    alphabet: Vec<Symbol>,
    transitions: Vec<Transition>,
    start: Option<State>,
    accepting: Vec<State>,
}

impl Builder {
    /// Create a new, empty builder.
    pub fn new(kind: AutomatonKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Declare a state.
    pub fn with_state(mut self, state: impl Into<State>) -> Self {
        self.states.push(state.into());
        self
    }

    /// Declare several states at once, in order.
    pub fn with_states<S: Into<State>>(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add a symbol to the alphabet.
    pub fn with_symbol(mut self, symbol: Symbol) -> Self {
        self.alphabet.push(symbol);
        self
    }

    /// Add every character of `symbols` to the alphabet, in order.
    pub fn with_alphabet(mut self, symbols: &str) -> Self {
        self.alphabet.extend(symbols.chars());
        self
    }

    /// Add a transition.
    pub fn with_transition(mut self, from: impl Into<State>, symbol: Symbol, to: impl Into<State>) -> Self {
        self.transitions.push(Transition::new(from, symbol, to));
        self
    }

    /// Set the start state. If never called, the first declared state is used.
    pub fn with_start(mut self, state: impl Into<State>) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Mark a state as accepting.
    pub fn with_accepting(mut self, state: impl Into<State>) -> Self {
        self.accepting.push(state.into());
        self
    }

    /// Finish building.
    pub fn build(self) -> Automaton {
        let start = match self.start {
            Some(start) => start,
            None => self.states.first().cloned().unwrap_or_default(),
        };

        Automaton {
            kind: self.kind,
            states: self.states,
            alphabet: self.alphabet,
            transitions: self.transitions,
            start,
            accepting: self.accepting,
        }
    }
}
