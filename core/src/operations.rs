//! Automata operations: determinism checks and subset construction.
use {
    crate::{
        automaton::{Automaton, AutomatonKind, State, Symbol, Transition},
        AutomataError, ConsistencyWarning, TooComplexToDeterminizeError,
    },
    bitvec::prelude::*,
    log::{debug, trace, warn},
    std::collections::{hash_map::Entry, HashMap, HashSet, VecDeque},
};

/// Separator placed between NFA state labels when naming a DFA state.
pub const STATE_NAME_DELIMITER: &str = ",";

/// Name of the DFA state standing for the empty set of NFA states.
pub const EMPTY_SET_STATE: &str = "∅";

/// Returns true if no two transitions share a `(from, symbol)` pair while leading to different
/// states.
///
/// Missing pairs are fine: a partial transition function is still deterministic. Repeating the
/// exact same transition twice is also fine.
pub fn is_deterministic(transitions: &[Transition]) -> bool {
    let mut dest: HashMap<(&State, Symbol), &State> = HashMap::with_capacity(transitions.len());

    for t in transitions {
        match dest.entry((&t.from, t.symbol)) {
            Entry::Vacant(e) => {
                e.insert(&t.to);
            }
            Entry::Occupied(e) => {
                if *e.get() != &t.to {
                    return false;
                }
            }
        }
    }

    true
}

/// Returns every `(from, symbol)` pair that leads to more than one distinct state, in order of the
/// pair's first appearance in `transitions`.
pub fn nondeterministic_pairs(transitions: &[Transition]) -> Vec<(State, Symbol)> {
    let mut first_dest: HashMap<(&State, Symbol), (usize, &State)> = HashMap::new();
    let mut flagged = HashSet::new();

    for t in transitions {
        let next = first_dest.len();
        let (order, dest) = *first_dest.entry((&t.from, t.symbol)).or_insert((next, &t.to));
        if dest != &t.to {
            flagged.insert(order);
        }
    }

    let mut pairs: Vec<(usize, State, Symbol)> = first_dest
        .into_iter()
        .filter(|(_, (order, _))| flagged.contains(order))
        .map(|((from, symbol), (order, _))| (order, from.clone(), symbol))
        .collect();
    pairs.sort_by_key(|(order, _, _)| *order);
    pairs.into_iter().map(|(_, from, symbol)| (from, symbol)).collect()
}

/// Checks that an automaton's declared kind agrees with its transition table.
///
/// A DFA-tagged automaton with a non-deterministic table is reported; it is never silently
/// re-tagged. NFA-tagged automata always pass, whatever their table looks like.
pub fn check_consistency(a: &Automaton) -> Result<(), ConsistencyWarning> {
    if a.get_kind() == AutomatonKind::Nfa || is_deterministic(a.get_transitions()) {
        return Ok(());
    }

    let pairs = nondeterministic_pairs(a.get_transitions());
    warn!("Automaton is declared as a DFA but has {} non-deterministic (state, symbol) pairs", pairs.len());
    Err(ConsistencyWarning::NondeterministicDfa {
        pairs,
    })
}

/// Converts an NFA into an equivalent DFA by subset construction. A DFA-tagged automaton is
/// returned unchanged.
///
/// Each DFA state stands for a set of NFA states and is named by the sorted member labels joined
/// with [STATE_NAME_DELIMITER]; the empty set is named [EMPTY_SET_STATE] and becomes a rejecting
/// sink. Only sets reachable from `{start}` are materialized, in breadth-first order, and every
/// materialized state gets one transition per alphabet symbol. A DFA state accepts iff its set
/// contains an NFA accept state.
///
/// There is no limit on the work done; use [to_dfa_with_limit] to bound it.
///
/// The input automaton must be valid (see [crate::validate::validate]). NFA labels should not
/// contain [STATE_NAME_DELIMITER] or be equal to [EMPTY_SET_STATE]: such labels can make two
/// different sets share a name, and the conversion then fails.
///
/// Worst case complexity: exponential in number of states.
///
/// # Errors
/// * [AutomataError::StateNameCollision] if two different sets would get the same name.
pub fn to_dfa(nfa: &Automaton) -> Result<Automaton, AutomataError> {
    determinize(nfa, None)
}

/// Like [to_dfa], but gives up once the construction needs more than `work_limit` "effort". Each
/// processed set costs its size (at least one unit), and the effort budget is `work_limit * 10`.
///
/// # Errors
/// * [AutomataError::TooComplex] if the budget runs out.
/// * [AutomataError::StateNameCollision] as for [to_dfa].
pub fn to_dfa_with_limit(nfa: &Automaton, work_limit: usize) -> Result<Automaton, AutomataError> {
    determinize(nfa, Some(work_limit))
}

fn determinize(nfa: &Automaton, work_limit: Option<usize>) -> Result<Automaton, AutomataError> {
    if nfa.get_kind() == AutomatonKind::Dfa {
        // Already determinized
        return Ok(nfa.clone());
    }

    let mut b = SubsetBuilder::new(nfa);
    let mut effort_spent = 0;

    let mut initial = bitvec![0; nfa.get_num_states()];
    if let Some(&start) = b.index.get(nfa.get_start_state()) {
        initial.set(start, true);
    }
    let start = b.intern(initial)?;

    while let Some((set, name)) = b.worklist.pop_front() {
        effort_spent += set.count_ones().max(1);
        if let Some(work_limit) = work_limit {
            if effort_spent >= work_limit.saturating_mul(10) {
                debug!("Giving up on subset construction after {effort_spent} units of work");
                return Err(TooComplexToDeterminizeError::new(work_limit, effort_spent, b.states.len()).into());
            }
        }

        for &symbol in nfa.get_alphabet() {
            let mut next = bitvec![0; nfa.get_num_states()];
            for s in set.iter_ones() {
                if let Some(dests) = b.moves.get(&(s, symbol)) {
                    for &d in dests {
                        next.set(d, true);
                    }
                }
            }

            let dest = b.intern(next)?;
            trace!("{name} -{symbol}-> {dest}");
            b.transitions.push(Transition::new(name.clone(), symbol, dest));
        }
    }

    debug!(
        "Subset construction turned {} NFA states into {} DFA states ({} accepting) after {effort_spent} units of work",
        nfa.get_num_states(),
        b.states.len(),
        b.accepting.len()
    );

    Ok(Automaton::new(AutomatonKind::Dfa, b.states, nfa.get_alphabet().to_vec(), b.transitions, start, b.accepting))
}

/// Working state for [determinize].
struct SubsetBuilder<'a> {
    nfa: &'a Automaton,

    /// NFA state label to its declaration index (first declaration wins).
    index: HashMap<&'a State, usize>,

    /// NFA accept states by declaration index.
    accept: BitVec,

    /// `(source index, symbol)` to destination indices.
    moves: HashMap<(usize, Symbol), Vec<usize>>,

    /// Materialized sets and their names.
    newstate: HashMap<BitVec, State>,

    /// Names already handed out, to catch collisions.
    names: HashSet<State>,

    /// Materialized but not yet processed sets.
    worklist: VecDeque<(BitVec, State)>,

    states: Vec<State>,
    accepting: Vec<State>,
    transitions: Vec<Transition>,
}

impl<'a> SubsetBuilder<'a> {
    fn new(nfa: &'a Automaton) -> Self {
        let mut index = HashMap::with_capacity(nfa.get_num_states());
        let mut accept = bitvec![0; nfa.get_num_states()];

        for (i, state) in nfa.get_states().iter().enumerate() {
            index.entry(state).or_insert(i);
            if nfa.is_accept(state) {
                accept.set(i, true);
            }
        }

        let mut moves: HashMap<(usize, Symbol), Vec<usize>> = HashMap::new();
        for t in nfa.get_transitions() {
            if let (Some(&from), Some(&to)) = (index.get(&t.from), index.get(&t.to)) {
                moves.entry((from, t.symbol)).or_default().push(to);
            }
        }

        Self {
            nfa,
            index,
            accept,
            moves,
            newstate: HashMap::new(),
            names: HashSet::new(),
            worklist: VecDeque::new(),
            states: Vec::new(),
            accepting: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Returns the DFA state for `set`, creating and queueing it on first sight.
    fn intern(&mut self, set: BitVec) -> Result<State, AutomataError> {
        if let Some(name) = self.newstate.get(&set) {
            return Ok(name.clone());
        }

        let name = self.name_of(&set);
        if !self.names.insert(name.clone()) {
            return Err(AutomataError::StateNameCollision(name.to_string()));
        }

        let accepts = set.iter_ones().any(|s| self.accept[s]);
        debug!("Materialized DFA state {name} (accepting={accepts})");

        self.states.push(name.clone());
        if accepts {
            self.accepting.push(name.clone());
        }

        self.newstate.insert(set.clone(), name.clone());
        self.worklist.push_back((set, name.clone()));
        Ok(name)
    }

    fn name_of(&self, set: &BitVec) -> State {
        if set.not_any() {
            return State::from(EMPTY_SET_STATE);
        }

        let states = self.nfa.get_states();
        let mut labels: Vec<&str> = set.iter_ones().map(|s| states[s].as_str()).collect();
        labels.sort_unstable();
        State::new(labels.join(STATE_NAME_DELIMITER))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{
            check_consistency, is_deterministic, nondeterministic_pairs, to_dfa, to_dfa_with_limit, EMPTY_SET_STATE,
        },
        crate::{
            automaton::{Automaton, AutomatonKind, State, Transition},
            AutomataError, ConsistencyWarning,
        },
        pretty_assertions::assert_eq,
        test_log::test,
    };

    fn states(names: &[&str]) -> Vec<State> {
        names.iter().map(|&n| State::from(n)).collect()
    }

    #[test]
    fn test_empty_table_is_deterministic() {
        assert!(is_deterministic(&[]));
        assert!(nondeterministic_pairs(&[]).is_empty());
    }

    #[test]
    fn test_partial_table_is_deterministic() {
        let t = vec![Transition::new("q0", 'a', "q1")];
        assert!(is_deterministic(&t));
    }

    #[test]
    fn test_duplicate_transition_is_deterministic() {
        let t = vec![Transition::new("q0", 'a', "q1"), Transition::new("q0", 'a', "q1")];
        assert!(is_deterministic(&t));
    }

    #[test]
    fn test_diverging_pairs() {
        let t = vec![
            Transition::new("q1", 'b', "q0"),
            Transition::new("q0", 'a', "q1"),
            Transition::new("q1", 'b', "q1"),
            Transition::new("q0", 'b', "q0"),
            Transition::new("q0", 'a', "q2"),
            Transition::new("q0", 'a', "q1"),
        ];
        assert!(!is_deterministic(&t));
        assert_eq!(nondeterministic_pairs(&t), vec![("q1".into(), 'b'), ("q0".into(), 'a')]);
    }

    #[test]
    fn test_consistency() {
        let builder = || {
            Automaton::builder(AutomatonKind::Dfa)
                .with_states(["q0", "q1", "q2"])
                .with_alphabet("a")
                .with_transition("q0", 'a', "q1")
                .with_transition("q0", 'a', "q2")
        };

        let dfa = builder().build();
        assert_eq!(
            check_consistency(&dfa),
            Err(ConsistencyWarning::NondeterministicDfa {
                pairs: vec![("q0".into(), 'a')]
            })
        );
        assert_eq!(check_consistency(&dfa.with_kind(AutomatonKind::Nfa)), Ok(()));
    }

    #[test]
    fn test_dfa_is_returned_unchanged() {
        let dfa = Automaton::builder(AutomatonKind::Dfa)
            .with_states(["q0", "q1"])
            .with_alphabet("a")
            .with_transition("q0", 'a', "q1")
            .build();
        assert_eq!(to_dfa(&dfa).unwrap(), dfa);
    }

    #[test]
    fn test_branching_nfa() {
        let nfa = Automaton::builder(AutomatonKind::Nfa)
            .with_states(["q0", "q1", "q2"])
            .with_alphabet("a")
            .with_transition("q0", 'a', "q1")
            .with_transition("q0", 'a', "q2")
            .with_accepting("q2")
            .build();

        let dfa = to_dfa(&nfa).unwrap();
        assert_eq!(dfa.get_kind(), AutomatonKind::Dfa);
        assert_eq!(dfa.get_start_state(), &State::from("q0"));
        assert_eq!(dfa.get_states(), states(&["q0", "q1,q2", EMPTY_SET_STATE]).as_slice());
        assert_eq!(dfa.get_accept_states(), states(&["q1,q2"]).as_slice());
        assert_eq!(
            dfa.get_transitions(),
            &[
                Transition::new("q0", 'a', "q1,q2"),
                Transition::new("q1,q2", 'a', EMPTY_SET_STATE),
                Transition::new(EMPTY_SET_STATE, 'a', EMPTY_SET_STATE),
            ]
        );
        assert!(is_deterministic(dfa.get_transitions()));

        // The source automaton is left alone.
        assert_eq!(nfa.get_num_states(), 3);
        assert_eq!(nfa.get_kind(), AutomatonKind::Nfa);
    }

    #[test]
    fn test_names_are_sorted_not_declaration_ordered() {
        let nfa = Automaton::builder(AutomatonKind::Nfa)
            .with_states(["s", "b", "a"])
            .with_alphabet("x")
            .with_start("s")
            .with_transition("s", 'x', "b")
            .with_transition("s", 'x', "a")
            .with_transition("a", 'x', "a")
            .with_transition("b", 'x', "b")
            .build();

        let dfa = to_dfa(&nfa).unwrap();
        assert_eq!(dfa.get_states(), states(&["s", "a,b"]).as_slice());
        assert_eq!(dfa.find_transition(&"a,b".into(), 'x').map(|t| &t.to), Some(&State::from("a,b")));
    }

    #[test]
    fn test_every_materialized_state_is_total() {
        let nfa = Automaton::builder(AutomatonKind::Nfa)
            .with_states(["q0", "q1"])
            .with_alphabet("ab")
            .with_transition("q0", 'a', "q0")
            .with_transition("q0", 'a', "q1")
            .with_accepting("q1")
            .build();

        let dfa = to_dfa(&nfa).unwrap();
        for state in dfa.get_states() {
            for &symbol in dfa.get_alphabet() {
                assert!(dfa.find_transition(state, symbol).is_some(), "{state} has no move on {symbol}");
            }
        }
    }

    #[test]
    fn test_work_limit() {
        let nfa = Automaton::builder(AutomatonKind::Nfa)
            .with_states(["q0", "q1", "q2"])
            .with_alphabet("a")
            .with_transition("q0", 'a', "q1")
            .with_transition("q0", 'a', "q2")
            .build();

        // Processing {q0}, {q1,q2} and the empty set costs 1 + 2 + 1 units.
        match to_dfa_with_limit(&nfa, 0) {
            Err(AutomataError::TooComplex(e)) => assert_eq!(e.determinize_work_limit, 0),
            other => panic!("Expected TooComplex, got {other:?}"),
        }
        assert!(to_dfa_with_limit(&nfa, 1).is_ok());
    }

    #[test]
    fn test_limit_does_not_change_the_result() {
        let nfa = Automaton::builder(AutomatonKind::Nfa)
            .with_states(["q0", "q1", "q2"])
            .with_alphabet("ab")
            .with_transition("q0", 'a', "q1")
            .with_transition("q0", 'a', "q2")
            .with_transition("q1", 'b', "q0")
            .with_accepting("q2")
            .build();

        let unbounded = to_dfa(&nfa).unwrap();
        assert_eq!(to_dfa_with_limit(&nfa, 100).unwrap(), unbounded);
        assert_eq!(to_dfa_with_limit(&nfa, usize::MAX).unwrap(), unbounded);
    }

    #[test]
    fn test_name_collision() {
        let nfa = Automaton::builder(AutomatonKind::Nfa)
            .with_states(["s", "a", "b", "a,b"])
            .with_alphabet("xy")
            .with_start("s")
            .with_transition("s", 'x', "a")
            .with_transition("s", 'x', "b")
            .with_transition("s", 'y', "a,b")
            .build();

        match to_dfa(&nfa) {
            Err(AutomataError::StateNameCollision(name)) => assert_eq!(name, "a,b"),
            other => panic!("Expected StateNameCollision, got {other:?}"),
        }
    }
}
