use {
    serde::{Deserialize, Serialize},
    std::{
        borrow::Borrow,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
    },
};

/// An opaque state label. Labels are unique within an automaton's state list.
#[derive(Clone, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct State(String);

impl State {
    /// Create a new state with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Returns the label of this state.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "State({:?})", self.0)
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl AsRef<str> for State {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for State {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A symbol of an automaton's alphabet. Symbols are single characters; input strings are consumed
/// one `char` at a time.
pub type Symbol = char;
