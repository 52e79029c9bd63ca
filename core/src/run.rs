//! Traced simulation of an automaton on an input string.
use {
    crate::automaton::{Automaton, State, Symbol},
    log::debug,
    serde::{Serialize, Serializer},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Label used for [StepTarget::Error] when rendering or serializing a trace.
pub const ERROR_STATE: &str = "ERROR";

/// Where a step of a trace ended up.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum StepTarget {
    /// The transition moved to this state.
    State(State),

    /// No transition was possible: the symbol is outside the alphabet or the current state has no
    /// move on it. This is never an accept state.
    Error,
}

impl StepTarget {
    /// Returns the reached state, or `None` for the error sentinel.
    pub fn state(&self) -> Option<&State> {
        match self {
            Self::State(state) => Some(state),
            Self::Error => None,
        }
    }

    /// Returns true for the error sentinel.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl Display for StepTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::State(state) => Display::fmt(state, f),
            Self::Error => f.write_str(ERROR_STATE),
        }
    }
}

impl Serialize for StepTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::State(state) => state.serialize(serializer),
            Self::Error => serializer.serialize_str(ERROR_STATE),
        }
    }
}

/// One recorded move of a simulation run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionStep {
    /// Zero-based ordinal of this step.
    pub step: usize,

    /// State the automaton was in before reading the symbol.
    #[serde(rename = "fromState")]
    pub from: State,

    /// Symbol consumed by this step.
    #[serde(rename = "inputSymbol")]
    pub symbol: Symbol,

    /// State reached, or the error sentinel.
    #[serde(rename = "toState")]
    pub to: StepTarget,
}

impl Display for TransitionStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {} -{}-> {}", self.step, self.from, self.symbol, self.to)
    }
}

/// The outcome of one simulation run. Produced once by [run] and never modified afterwards;
/// playback state lives in [crate::simulation::TraceCursor].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Whether the input was accepted.
    pub accepted: bool,

    /// The trace, one entry per consumed symbol.
    pub steps: Vec<TransitionStep>,

    /// The full input string.
    #[serde(rename = "inputString")]
    pub input: String,

    /// Prefix of the input that was consumed, including a symbol that caused an error step.
    #[serde(rename = "processedInput")]
    pub processed: String,

    /// Suffix of the input that was never consumed.
    #[serde(rename = "remainingInput")]
    pub remaining: String,

    /// State the run stopped in, or `None` if it ended on an error step.
    #[serde(rename = "finalState")]
    pub final_state: Option<State>,
}

impl SimulationResult {
    /// Returns true if the run stopped on an error step.
    pub fn is_error(&self) -> bool {
        self.steps.last().map(|s| s.to.is_error()).unwrap_or(false)
    }

    /// Returns the number of recorded steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if no step was recorded (the input was empty).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Runs `a` on `input`, one `char` at a time, and records every move.
///
/// The run stops at the first symbol that is not in the alphabet or that has no transition from
/// the current state; that symbol is recorded as a step to [StepTarget::Error] and the rest of
/// the input is left unconsumed. The input is accepted iff every symbol was consumed and the
/// final state is an accept state. An empty input is accepted iff the start state accepts.
///
/// On a non-deterministic table the first declared transition is taken. `a` must be valid; no
/// validation is done here.
///
/// Complexity: linear in the length of the string times the number of transitions.
pub fn run(a: &Automaton, input: &str) -> SimulationResult {
    let mut state = a.get_start_state();
    let mut steps = Vec::new();
    let mut consumed = input.len();
    let mut failed = false;

    for (offset, symbol) in input.char_indices() {
        let next = if a.has_symbol(symbol) {
            a.find_transition(state, symbol).map(|t| &t.to)
        } else {
            None
        };

        match next {
            Some(next) => {
                steps.push(TransitionStep {
                    step: steps.len(),
                    from: state.clone(),
                    symbol,
                    to: StepTarget::State(next.clone()),
                });
                state = next;
            }
            None => {
                steps.push(TransitionStep {
                    step: steps.len(),
                    from: state.clone(),
                    symbol,
                    to: StepTarget::Error,
                });
                consumed = offset + symbol.len_utf8();
                failed = true;
                break;
            }
        }
    }

    let accepted = !failed && a.is_accept(state);
    let (processed, remaining) = input.split_at(consumed);
    debug!(
        "Ran {:?}: {} steps, stopped in {}, accepted={accepted}",
        input,
        steps.len(),
        if failed {
            ERROR_STATE
        } else {
            state.as_str()
        }
    );

    SimulationResult {
        accepted,
        steps,
        input: input.to_string(),
        processed: processed.to_string(),
        remaining: remaining.to_string(),
        final_state: if failed {
            None
        } else {
            Some(state.clone())
        },
    }
}
