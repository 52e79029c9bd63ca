use {
    crate::automaton::{State, Symbol},
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        io::Error as IoError,
    },
};

/// The part of a transition that failed validation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransitionField {
    /// The source state.
    From,

    /// The input symbol.
    Symbol,

    /// The destination state.
    To,
}

impl Display for TransitionField {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::From => f.write_str("source state"),
            Self::Symbol => f.write_str("input symbol"),
            Self::To => f.write_str("destination state"),
        }
    }
}

/// Structural problems found by [crate::validate::validate].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// The automaton declares no states.
    EmptyStates,

    /// The start state is not a declared state.
    UnknownStartState(State),

    /// An accept state is not a declared state.
    UnknownAcceptingState(State),

    /// A transition refers to an undeclared state or symbol.
    MalformedTransition {
        /// Position of the transition in the transition list.
        index: usize,

        /// Which part of the transition is wrong.
        field: TransitionField,

        /// The offending value, rendered as a string.
        value: String,
    },

    /// A state is declared more than once.
    DuplicateState(State),

    /// A symbol is declared more than once.
    DuplicateSymbol(Symbol),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::EmptyStates => write!(f, "States list cannot be empty"),
            Self::UnknownStartState(state) => write!(f, "Start state '{state}' is not in the list of states"),
            Self::UnknownAcceptingState(state) => {
                write!(f, "Accepting state '{state}' is not in the list of states")
            }
            Self::MalformedTransition {
                index,
                field,
                value,
            } => match field {
                TransitionField::Symbol => write!(f, "Transition {index} uses undefined symbol '{value}'"),
                _ => write!(f, "Transition {index} uses undefined {field} '{value}'"),
            },
            Self::DuplicateState(state) => write!(f, "State '{state}' is declared more than once"),
            Self::DuplicateSymbol(symbol) => write!(f, "Symbol '{symbol}' is declared more than once"),
        }
    }
}

impl Error for ValidationError {}

/// A policy problem: the automaton is structurally valid but its declared kind disagrees with its
/// transition table. The engine only reports this; it never re-tags the automaton.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsistencyWarning {
    /// The automaton is declared a DFA but some `(state, symbol)` pairs lead to more than one
    /// destination.
    NondeterministicDfa {
        /// The offending pairs, in order of first occurrence.
        pairs: Vec<(State, Symbol)>,
    },
}

impl Display for ConsistencyWarning {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::NondeterministicDfa {
                pairs,
            } => {
                write!(
                    f,
                    "Automaton is declared as a DFA but its transition table is non-deterministic (NFA); \
                     choose NFA or modify the transitions for"
                )?;
                for (i, (state, symbol)) in pairs.iter().enumerate() {
                    let sep = if i == 0 {
                        " "
                    } else {
                        ", "
                    };
                    write!(f, "{sep}({state}, {symbol})")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for ConsistencyWarning {}

/// Subset construction gave up because it would need more work than allowed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TooComplexToDeterminizeError {
    /// The work limit that was exceeded.
    pub determinize_work_limit: usize,

    /// Work units spent when the construction stopped.
    pub effort_spent: usize,

    /// DFA states materialized so far.
    pub materialized_states: usize,
}

impl TooComplexToDeterminizeError {
    /// Create a new `TooComplexToDeterminizeError`.
    pub fn new(determinize_work_limit: usize, effort_spent: usize, materialized_states: usize) -> Self {
        Self {
            determinize_work_limit,
            effort_spent,
            materialized_states,
        }
    }
}

impl Display for TooComplexToDeterminizeError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "Determinizing this automaton would require more than {} work units \
             (stopped after {} units with {} states)",
            self.determinize_work_limit, self.effort_spent, self.materialized_states
        )
    }
}

impl Error for TooComplexToDeterminizeError {}

/// Errors that can occur in the automaton engine.
#[derive(Debug)]
pub enum AutomataError {
    /// The automaton is structurally invalid.
    Validation(ValidationError),

    /// The automaton's declared kind does not match its transition table.
    Inconsistent(ConsistencyWarning),

    /// Subset construction exceeded its work limit.
    TooComplex(TooComplexToDeterminizeError),

    /// Two different subsets of states would receive the same DFA state name.
    StateNameCollision(String),

    /// A serialized automaton could not be encoded or decoded.
    Json(serde_json::Error),

    /// Reading or writing a serialized automaton failed.
    Io(IoError),
}

impl Display for AutomataError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Validation(e) => write!(f, "Invalid automaton: {e}"),
            Self::Inconsistent(e) => write!(f, "Inconsistent automaton: {e}"),
            Self::TooComplex(e) => Display::fmt(e, f),
            Self::StateNameCollision(name) => {
                write!(f, "Subset construction produced two different state sets named {name:?}")
            }
            Self::Json(e) => write!(f, "Invalid automaton JSON: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for AutomataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Inconsistent(e) => Some(e),
            Self::TooComplex(e) => Some(e),
            Self::StateNameCollision(_) => None,
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ValidationError> for AutomataError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<ConsistencyWarning> for AutomataError {
    fn from(e: ConsistencyWarning) -> Self {
        Self::Inconsistent(e)
    }
}

impl From<TooComplexToDeterminizeError> for AutomataError {
    fn from(e: TooComplexToDeterminizeError) -> Self {
        Self::TooComplex(e)
    }
}

impl From<serde_json::Error> for AutomataError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<IoError> for AutomataError {
    fn from(e: IoError) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{AutomataError, ConsistencyWarning, TooComplexToDeterminizeError, TransitionField, ValidationError},
        pretty_assertions::assert_eq,
        std::error::Error,
        test_log::test,
    };

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyStates.to_string(), "States list cannot be empty");
        assert_eq!(
            ValidationError::UnknownAcceptingState("q9".into()).to_string(),
            "Accepting state 'q9' is not in the list of states"
        );
        let e = ValidationError::MalformedTransition {
            index: 2,
            field: TransitionField::To,
            value: "q7".to_string(),
        };
        assert_eq!(e.to_string(), "Transition 2 uses undefined destination state 'q7'");
        let e = ValidationError::MalformedTransition {
            index: 0,
            field: TransitionField::Symbol,
            value: "z".to_string(),
        };
        assert_eq!(e.to_string(), "Transition 0 uses undefined symbol 'z'");
    }

    #[test]
    fn test_consistency_message_lists_pairs() {
        let w = ConsistencyWarning::NondeterministicDfa {
            pairs: vec![("q0".into(), 'a'), ("q1".into(), 'b')],
        };
        assert!(w.to_string().ends_with("for (q0, a), (q1, b)"));
    }

    #[test]
    fn test_source_chain() {
        let e: AutomataError = TooComplexToDeterminizeError::new(5, 52, 9).into();
        assert!(e.source().is_some());
        assert_eq!(
            e.to_string(),
            "Determinizing this automaton would require more than 5 work units (stopped after 52 units with 9 states)"
        );

        let e = AutomataError::StateNameCollision("a,b".to_string());
        assert!(e.source().is_none());
    }
}
