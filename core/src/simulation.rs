//! The caller-facing pipeline: validate, check consistency, convert when needed, then run.
use {
    crate::{
        automaton::{Automaton, AutomatonKind, State},
        operations::{check_consistency, to_dfa, to_dfa_with_limit},
        run::{run, SimulationResult, TransitionStep},
        validate::validate,
        AutomataError,
    },
    log::debug,
    serde::{Deserialize, Serialize},
    std::borrow::Cow,
};

/// What to do with an automaton declared as a DFA whose transition table is non-deterministic.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InconsistentDfaPolicy {
    /// Refuse to simulate and report [crate::ConsistencyWarning::NondeterministicDfa].
    #[default]
    Reject,

    /// Treat the automaton as an NFA and convert it before simulating.
    Convert,
}

/// Settings for [prepare] and [simulate].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationOptions {
    /// Work limit handed to [to_dfa_with_limit]. `None` converts with [to_dfa], which has no limit.
    pub determinize_work_limit: Option<usize>,

    /// Handling of DFA-tagged automata with a non-deterministic table.
    pub inconsistent_dfa: InconsistentDfaPolicy,

    /// Convert NFA-tagged automata to a DFA before running them. When false, NFAs are run
    /// directly and the first declared transition wins on ambiguous moves.
    pub convert_nfa: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            determinize_work_limit: None,
            inconsistent_dfa: InconsistentDfaPolicy::Reject,
            convert_nfa: true,
        }
    }
}

impl SimulationOptions {
    /// Bound the work spent converting to a DFA.
    pub fn with_determinize_work_limit(mut self, work_limit: usize) -> Self {
        self.determinize_work_limit = Some(work_limit);
        self
    }

    /// Set the handling of DFA-tagged automata with a non-deterministic table.
    pub fn with_inconsistent_dfa(mut self, policy: InconsistentDfaPolicy) -> Self {
        self.inconsistent_dfa = policy;
        self
    }

    /// Set whether NFA-tagged automata are converted before running.
    pub fn with_convert_nfa(mut self, convert_nfa: bool) -> Self {
        self.convert_nfa = convert_nfa;
        self
    }

    /// Read options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, AutomataError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An automaton that passed validation and the consistency policy, ready to be run.
#[derive(Clone, Debug)]
pub struct Prepared<'a> {
    automaton: Cow<'a, Automaton>,
    converted: bool,
}

impl<'a> Prepared<'a> {
    /// The automaton that will actually be simulated.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Returns true if the automaton was converted to a DFA first.
    pub fn is_converted(&self) -> bool {
        self.converted
    }

    /// Run the prepared automaton on `input`.
    pub fn run(&self, input: &str) -> SimulationResult {
        run(&self.automaton, input)
    }
}

/// Gets an automaton ready for [run]:
/// 1. [validate] it;
/// 2. apply [check_consistency] according to `options.inconsistent_dfa`;
/// 3. convert NFAs (and inconsistent DFAs under [InconsistentDfaPolicy::Convert]) with
///    [to_dfa], or [to_dfa_with_limit] when `options.determinize_work_limit` is set.
///
/// NFA state labels containing [crate::operations::STATE_NAME_DELIMITER] can make the conversion
/// fail with [AutomataError::StateNameCollision].
pub fn prepare<'a>(a: &'a Automaton, options: &SimulationOptions) -> Result<Prepared<'a>, AutomataError> {
    validate(a)?;

    let convert = match check_consistency(a) {
        Ok(()) => a.get_kind() == AutomatonKind::Nfa && options.convert_nfa,
        Err(warning) => match options.inconsistent_dfa {
            InconsistentDfaPolicy::Reject => return Err(warning.into()),
            InconsistentDfaPolicy::Convert => true,
        },
    };

    if !convert {
        return Ok(Prepared {
            automaton: Cow::Borrowed(a),
            converted: false,
        });
    }

    let nfa = a.with_kind(AutomatonKind::Nfa);
    let dfa = match options.determinize_work_limit {
        Some(work_limit) => to_dfa_with_limit(&nfa, work_limit)?,
        None => to_dfa(&nfa)?,
    };
    debug!("{} converted to DFA for simulation ({} states)", a.get_kind(), dfa.get_num_states());
    Ok(Prepared {
        automaton: Cow::Owned(dfa),
        converted: true,
    })
}

/// [prepare]s `a` and runs it on `input`.
pub fn simulate(a: &Automaton, input: &str, options: &SimulationOptions) -> Result<SimulationResult, AutomataError> {
    Ok(prepare(a, options)?.run(input))
}

/// Playback status of a [TraceCursor].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackStatus {
    /// Nothing is highlighted.
    #[default]
    Idle,

    /// Playing the trace on a timer owned by the caller.
    Running,

    /// Stopped on a step.
    Paused,

    /// The last step has been reached.
    Finished,
}

/// Presentation-side position in a [SimulationResult]'s trace.
///
/// The result itself is never modified; the cursor only stores an index into its steps. Timing
/// is up to the caller, which calls [TraceCursor::tick] at whatever pace it likes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TraceCursor {
    len: usize,
    index: usize,
    status: PlaybackStatus,
}

impl TraceCursor {
    /// Create an idle cursor for `result`.
    pub fn new(result: &SimulationResult) -> Self {
        Self {
            len: result.steps.len(),
            index: 0,
            status: PlaybackStatus::Idle,
        }
    }

    /// Current playback status.
    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Index of the highlighted step, if any.
    pub fn current(&self) -> Option<usize> {
        if self.status == PlaybackStatus::Idle || self.index >= self.len {
            None
        } else {
            Some(self.index)
        }
    }

    /// Returns true if step `index` is the highlighted one.
    pub fn is_active(&self, index: usize) -> bool {
        self.current() == Some(index)
    }

    /// The highlighted step of `result`.
    pub fn active_step<'r>(&self, result: &'r SimulationResult) -> Option<&'r TransitionStep> {
        self.current().and_then(|i| result.steps.get(i))
    }

    /// The state reached by the highlighted step. `None` for an error step.
    pub fn active_state<'r>(&self, result: &'r SimulationResult) -> Option<&'r State> {
        self.active_step(result).and_then(|s| s.to.state())
    }

    /// Start (or resume) playback from the current position.
    pub fn play(&mut self) {
        if self.status != PlaybackStatus::Finished {
            self.status = PlaybackStatus::Running;
        }
    }

    /// Pause playback. Does nothing unless running.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Running {
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Advance one step by hand. From idle this highlights the first step; at the last step the
    /// cursor finishes. The cursor is left paused unless it finished.
    pub fn step_forward(&mut self) -> Option<usize> {
        match self.status {
            PlaybackStatus::Idle => self.status = PlaybackStatus::Paused,
            PlaybackStatus::Finished => (),
            PlaybackStatus::Running | PlaybackStatus::Paused => {
                self.advance();
                if self.status != PlaybackStatus::Finished {
                    self.status = PlaybackStatus::Paused;
                }
            }
        }

        self.current()
    }

    /// Timer-driven advance; only moves while running.
    pub fn tick(&mut self) -> Option<usize> {
        if self.status == PlaybackStatus::Running {
            self.advance();
        }

        self.current()
    }

    /// Back to idle at the first step.
    pub fn reset(&mut self) {
        self.index = 0;
        self.status = PlaybackStatus::Idle;
    }

    fn advance(&mut self) {
        if self.index + 1 >= self.len {
            self.status = PlaybackStatus::Finished;
        } else {
            self.index += 1;
        }
    }
}
