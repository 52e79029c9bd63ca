use {
    crate::automaton::{State, Symbol},
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// One entry of a transition table: reading `symbol` in state `from` moves to state `to`.
///
/// Several transitions may share the same `(from, symbol)` pair; that is exactly what makes a
/// table non-deterministic.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Transition {
    /// Source state.
    #[serde(rename = "fromState")]
    pub from: State,

    /// Symbol consumed by this transition.
    #[serde(rename = "inputSymbol")]
    pub symbol: Symbol,

    /// Destination state.
    #[serde(rename = "toState")]
    pub to: State,
}

impl Transition {
    /// Create a new transition.
    pub fn new(from: impl Into<State>, symbol: Symbol, to: impl Into<State>) -> Self {
        Self {
            from: from.into(),
            symbol,
            to: to.into(),
        }
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} -{}-> {}", self.from, self.symbol, self.to)
    }
}
