//! Structural validation of automata.
use {
    crate::{
        automaton::Automaton,
        TransitionField, ValidationError,
    },
    log::debug,
    std::collections::HashSet,
};

/// Checks that an automaton is structurally well-formed.
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. at least one state is declared;
/// 2. the start state is declared;
/// 3. every accept state is declared;
/// 4. every transition uses declared states and symbols (source, then destination, then symbol);
/// 5. no state is declared twice;
/// 6. no symbol is declared twice.
///
/// This does not look at determinism; see [crate::operations::check_consistency].
///
/// State labels are not restricted. A label containing [crate::operations::STATE_NAME_DELIMITER]
/// is valid here, but can make [crate::operations::to_dfa] fail with
/// [crate::AutomataError::StateNameCollision].
pub fn validate(a: &Automaton) -> Result<(), ValidationError> {
    let result = check(a);
    if let Err(e) = &result {
        debug!("Automaton failed validation: {e}");
    }
    result
}

fn check(a: &Automaton) -> Result<(), ValidationError> {
    if a.get_states().is_empty() {
        return Err(ValidationError::EmptyStates);
    }

    if !a.has_state(a.get_start_state()) {
        return Err(ValidationError::UnknownStartState(a.get_start_state().clone()));
    }

    for state in a.get_accept_states() {
        if !a.has_state(state) {
            return Err(ValidationError::UnknownAcceptingState(state.clone()));
        }
    }

    for (index, t) in a.get_transitions().iter().enumerate() {
        let (field, value) = if !a.has_state(&t.from) {
            (TransitionField::From, t.from.to_string())
        } else if !a.has_state(&t.to) {
            (TransitionField::To, t.to.to_string())
        } else if !a.has_symbol(t.symbol) {
            (TransitionField::Symbol, t.symbol.to_string())
        } else {
            continue;
        };

        return Err(ValidationError::MalformedTransition {
            index,
            field,
            value,
        });
    }

    let mut seen = HashSet::with_capacity(a.get_num_states());
    for state in a.get_states() {
        if !seen.insert(state) {
            return Err(ValidationError::DuplicateState(state.clone()));
        }
    }

    let mut seen = HashSet::with_capacity(a.get_alphabet().len());
    for &symbol in a.get_alphabet() {
        if !seen.insert(symbol) {
            return Err(ValidationError::DuplicateSymbol(symbol));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::validate,
        crate::{
            automaton::{Automaton, AutomatonKind, Builder},
            TransitionField, ValidationError,
        },
        pretty_assertions::assert_eq,
        test_log::test,
    };

    fn base() -> Builder {
        Automaton::builder(AutomatonKind::Dfa).with_states(["q0", "q1"]).with_alphabet("ab")
    }

    #[test]
    fn test_valid() {
        let a = base().with_transition("q0", 'a', "q1").with_transition("q1", 'b', "q0").with_accepting("q0").build();
        assert_eq!(validate(&a), Ok(()));
    }

    #[test]
    fn test_empty_states() {
        let a = Automaton::builder(AutomatonKind::Dfa).with_alphabet("a").with_start("q0").build();
        assert_eq!(validate(&a), Err(ValidationError::EmptyStates));
    }

    #[test]
    fn test_unknown_start_state() {
        let a = base().with_start("q5").build();
        assert_eq!(validate(&a), Err(ValidationError::UnknownStartState("q5".into())));
    }

    #[test]
    fn test_unknown_accepting_state() {
        let a = base().with_accepting("q1").with_accepting("qx").build();
        assert_eq!(validate(&a), Err(ValidationError::UnknownAcceptingState("qx".into())));
    }

    #[test]
    fn test_malformed_transition_fields() {
        let a = base().with_transition("q0", 'a', "q1").with_transition("qx", 'a', "q1").build();
        assert_eq!(
            validate(&a),
            Err(ValidationError::MalformedTransition {
                index: 1,
                field: TransitionField::From,
                value: "qx".to_string()
            })
        );

        let a = base().with_transition("q0", 'c', "q1").build();
        assert_eq!(
            validate(&a),
            Err(ValidationError::MalformedTransition {
                index: 0,
                field: TransitionField::Symbol,
                value: "c".to_string()
            })
        );

        let a = base().with_transition("q0", 'a', "qy").build();
        assert_eq!(
            validate(&a),
            Err(ValidationError::MalformedTransition {
                index: 0,
                field: TransitionField::To,
                value: "qy".to_string()
            })
        );
    }

    #[test]
    fn test_destination_reported_before_symbol() {
        let a = base().with_transition("q0", 'z', "qx").build();
        assert_eq!(
            validate(&a),
            Err(ValidationError::MalformedTransition {
                index: 0,
                field: TransitionField::To,
                value: "qx".to_string()
            })
        );

        // A bad source still wins over everything else in the same transition.
        let a = base().with_transition("qw", 'z', "qx").build();
        assert_eq!(
            validate(&a),
            Err(ValidationError::MalformedTransition {
                index: 0,
                field: TransitionField::From,
                value: "qw".to_string()
            })
        );
    }

    #[test]
    fn test_checks_short_circuit_in_order() {
        // Both the start state and a transition are bad; the start state is reported.
        let a = base().with_start("nope").with_transition("q0", 'z', "q1").build();
        assert_eq!(validate(&a), Err(ValidationError::UnknownStartState("nope".into())));
    }

    #[test]
    fn test_duplicates() {
        let a = base().with_state("q1").build();
        assert_eq!(validate(&a), Err(ValidationError::DuplicateState("q1".into())));

        let a = base().with_symbol('a').build();
        assert_eq!(validate(&a), Err(ValidationError::DuplicateSymbol('a')));
    }

    #[test]
    fn test_validation_is_repeatable() {
        let a = base().with_transition("q0", 'c', "q1").build();
        assert_eq!(validate(&a), validate(&a));
    }
}
