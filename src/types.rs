//! This module defines the core data structures and types used throughout the Turing Machine
//! engine, including control states, transitions, programs, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// The default blank symbol used on the Turing Machine tape.
pub const DEFAULT_BLANK_SYMBOL: char = '_';
/// The step cap used by callers that want a bounded run but don't pick their own.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// An opaque control state label.
///
/// States compare by their full label, so `q1` and `Q1` are two unrelated states. No label is
/// special to the engine: a machine halts when the current (state, symbol) pair has no rule,
/// whatever the state happens to be called.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(Arc<str>);

impl State {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for State {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for State {
    fn from(label: String) -> Self {
        Self(Arc::from(label))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents the possible directions the head can move.
///
/// Every move is exactly one cell; there is no stay move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Signed head displacement of this move.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// The lookup key of a rule: the current state paired with the symbol under the head.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransitionKey {
    pub state: State,
    pub symbol: char,
}

impl TransitionKey {
    pub fn new(state: impl Into<State>, symbol: char) -> Self {
        Self {
            state: state.into(),
            symbol,
        }
    }
}

/// The body of a rule: what to write, where to move, and which state comes next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol written to the cell under the head.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
    /// The next state the machine transitions to.
    pub next_state: State,
}

/// A transition table for a single-tape machine.
///
/// Keys are unique and carry no ordering. The blank symbol is the value of every cell the
/// machine materializes while growing its tape.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The name of the Turing Machine program.
    pub name: String,
    /// The blank symbol used on the tape.
    pub blank: char,
    /// The transition rules, keyed by (state, symbol read).
    pub rules: HashMap<TransitionKey, Transition>,
}

impl Program {
    /// Creates an empty program using [`DEFAULT_BLANK_SYMBOL`].
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blank: DEFAULT_BLANK_SYMBOL,
            rules: HashMap::new(),
        }
    }

    /// Replaces the blank symbol.
    pub fn with_blank(mut self, blank: char) -> Self {
        self.blank = blank;
        self
    }

    /// Adds a rule, builder style. A later rule for the same key replaces the earlier one.
    pub fn rule(
        mut self,
        state: impl Into<State>,
        read: char,
        write: char,
        direction: Direction,
        next_state: impl Into<State>,
    ) -> Self {
        self.insert(
            TransitionKey::new(state, read),
            Transition {
                write,
                direction,
                next_state: next_state.into(),
            },
        );
        self
    }

    /// Inserts a rule, returning the one it replaced, if any.
    pub fn insert(&mut self, key: TransitionKey, transition: Transition) -> Option<Transition> {
        self.rules.insert(key, transition)
    }

    /// Looks up the rule for `state` reading `symbol`.
    pub fn get(&self, state: &State, symbol: char) -> Option<&Transition> {
        self.rules.get(&TransitionKey {
            state: state.clone(),
            symbol,
        })
    }

    /// Returns the number of rules in the program.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// States that have at least one outgoing rule.
    pub fn source_states(&self) -> BTreeSet<State> {
        self.rules.keys().map(|key| key.state.clone()).collect()
    }

    /// Every state the program mentions, either as a source or as a target.
    pub fn states(&self) -> BTreeSet<State> {
        let mut states = self.source_states();
        states.extend(self.rules.values().map(|t| t.next_state.clone()));
        states
    }

    /// Symbols read by at least one rule.
    pub fn read_symbols(&self) -> BTreeSet<char> {
        self.rules.keys().map(|key| key.symbol).collect()
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A rule matched and was applied.
    Advanced,
    /// No rule exists for the current (state, symbol) pair. Nothing was mutated.
    Halted,
}

/// Represents various errors that can occur while building or driving a Turing Machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The initial head position lies outside the initial tape.
    #[error("Head position {head} is outside the tape (length {len})")]
    InvalidHead { head: usize, len: usize },
    /// A bounded run used up its step budget without halting.
    #[error("Machine did not halt within {0} steps")]
    StepLimitExceeded(usize),
    /// Indicates an error during the validation of a program's structure or logic.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// No built-in program matches the requested name or index.
    #[error("Unknown program: {0}")]
    UnknownProgram(String),
    /// A snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_direction_offset() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
    }

    #[test]
    fn test_state_labels_are_distinct() {
        assert_ne!(State::from("q1"), State::from("Q1"));
        assert_ne!(State::from("halt"), State::from("halt "));
        assert_eq!(State::from("q0"), State::from("q0".to_string()));
        assert_eq!(State::from("q0").to_string(), "q0");
    }

    #[test]
    fn test_state_serializes_as_plain_string() {
        let json = serde_json::to_string(&State::from("qXOR3")).unwrap();
        assert_eq!(json, "\"qXOR3\"");
    }

    #[test]
    fn test_program_builder() {
        let program = Program::new("Builder")
            .rule("q0", '0', '1', Direction::Right, "q1")
            .rule("q1", '_', '_', Direction::Left, "done");

        assert_eq!(program.len(), 2);
        assert_eq!(program.blank, DEFAULT_BLANK_SYMBOL);

        let transition = program.get(&State::from("q0"), '0').unwrap();
        assert_eq!(transition.write, '1');
        assert_eq!(transition.direction, Direction::Right);
        assert_eq!(transition.next_state, State::from("q1"));

        assert!(program.get(&State::from("q0"), '1').is_none());
        assert!(program.get(&State::from("done"), '_').is_none());
    }

    #[test]
    fn test_program_later_rule_replaces_earlier() {
        let mut program = Program::new("Replace").rule("q0", '0', '1', Direction::Right, "q1");

        let replaced = program.insert(
            TransitionKey::new("q0", '0'),
            Transition {
                write: '0',
                direction: Direction::Left,
                next_state: State::from("q2"),
            },
        );

        assert_eq!(replaced.map(|t| t.write), Some('1'));
        assert_eq!(program.len(), 1);
        assert_eq!(
            program.get(&State::from("q0"), '0').map(|t| t.direction),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_program_states() {
        let program = Program::new("States")
            .rule("a", '0', '0', Direction::Right, "b")
            .rule("b", '0', '0', Direction::Right, "end");

        let sources: Vec<_> = program.source_states().into_iter().collect();
        assert_eq!(sources, vec![State::from("a"), State::from("b")]);
        assert!(program.states().contains(&State::from("end")));
        assert_eq!(program.read_symbols().into_iter().collect::<Vec<_>>(), vec!['0']);
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::InvalidHead { head: 5, len: 2 };
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Head position 5"));
        assert!(error_msg.contains("length 2"));

        let error = TuringMachineError::StepLimitExceeded(10);
        assert_eq!(error.to_string(), "Machine did not halt within 10 steps");
    }
}
