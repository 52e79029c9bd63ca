use {
    crate::{automaton::Automaton, AutomataError},
    serde::{Deserialize, Serialize},
    serde_json::Value,
};

impl Automaton {
    /// Decode an automaton record:
    ///
    /// ```json
    /// {
    ///   "type": "DFA",
    ///   "states": ["q0", "q1"],
    ///   "alphabet": ["a", "b"],
    ///   "transitions": [{"fromState": "q0", "inputSymbol": "a", "toState": "q1"}],
    ///   "startState": "q0",
    ///   "acceptingStates": ["q0"]
    /// }
    /// ```
    ///
    /// Alphabet entries and transition symbols must be exactly one character long. The result is
    /// not validated.
    pub fn from_json(json: &str) -> Result<Self, AutomataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode this automaton as a pretty-printed JSON record.
    pub fn to_json(&self) -> Result<String, AutomataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An exported automaton configuration: the automaton plus the editor state saved alongside it.
///
/// Node positions belong to the presentation layer. They are kept as opaque JSON so that
/// importing and re-exporting a file does not lose them.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutomatonDocument {
    /// The automaton definition.
    pub automaton: Automaton,

    /// The input string last entered by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_string: Option<String>,

    /// Layout information, untouched by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_positions: Option<Value>,
}

impl AutomatonDocument {
    /// Create a document holding just an automaton.
    pub fn new(automaton: Automaton) -> Self {
        Self {
            automaton,
            test_string: None,
            node_positions: None,
        }
    }

    /// Set the saved input string.
    pub fn with_test_string(mut self, test_string: impl Into<String>) -> Self {
        self.test_string = Some(test_string.into());
        self
    }

    /// Decode a document. Fails if the `automaton` member is missing or malformed.
    pub fn from_json(json: &str) -> Result<Self, AutomataError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AutomataError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Encode this document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AutomataError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
