//! This module defines the `TuringMachine` struct, the execution engine of a deterministic
//! single-tape Turing Machine. It handles the machine's state, tape operations, head movements,
//! and the application of transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use crate::tape::Tape;
use crate::types::{Program, State, Step, Transition, TuringMachineError};

/// Represents a single-tape Turing Machine.
///
/// The machine owns its program and never hands out a mutable reference to it, so the rule
/// table stays fixed for the machine's whole life. The only halting condition is a missing
/// rule for the current (state, symbol) pair.
#[derive(Debug, Clone)]
pub struct TuringMachine {
    state: State,
    tape: Tape,
    program: Program,
    step_count: usize,
    initial_state: State,
    initial_tape: Tape,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` ready to run.
    ///
    /// # Arguments
    ///
    /// * `program` - The transition table. Its blank symbol fills newly materialized cells.
    /// * `tape` - The initial tape content. An empty content becomes a single blank cell.
    /// * `head` - The initial head position, conventionally 0.
    /// * `initial_state` - The state the machine starts in.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidHead)` if `head` is outside the initial tape.
    pub fn new(
        program: Program,
        tape: impl IntoIterator<Item = char>,
        head: usize,
        initial_state: impl Into<State>,
    ) -> Result<Self, TuringMachineError> {
        let tape = Tape::new(tape, head, program.blank)?;
        let state = initial_state.into();

        Ok(Self {
            initial_state: state.clone(),
            initial_tape: tape.clone(),
            state,
            tape,
            program,
            step_count: 0,
        })
    }

    /// Executes a single step of the machine's computation.
    ///
    /// # Returns
    ///
    /// * `Step::Advanced` if a rule matched: its symbol was written, the head moved and the
    ///   state changed.
    /// * `Step::Halted` if no rule exists for the current state and symbol. The machine is left
    ///   untouched, so calling `step` again keeps returning `Step::Halted`.
    pub fn step(&mut self) -> Step {
        let symbol = self.tape.read();

        let Some(transition) = self.program.get(&self.state, symbol) else {
            debug!(
                state = %self.state,
                symbol = %symbol,
                steps = self.step_count,
                "no rule matches, machine halted"
            );
            return Step::Halted;
        };

        self.tape.write(transition.write);
        if self.tape.shift(transition.direction) {
            debug!(
                direction = ?transition.direction,
                len = self.tape.len(),
                "tape grew by one blank cell"
            );
        }
        self.state = transition.next_state.clone();
        self.step_count += 1;

        trace!(
            step = self.step_count,
            read = %symbol,
            state = %self.state,
            head = self.tape.head(),
            "applied transition"
        );

        Step::Advanced
    }

    /// Runs the machine until it halts and returns the number of steps this call performed.
    ///
    /// There is no step bound: a program that never reaches an unmapped (state, symbol) pair
    /// makes this loop forever. Use [`TuringMachine::run_with_limit`] for untrusted programs.
    pub fn run(&mut self) -> usize {
        let mut steps = 0;
        while self.step() == Step::Advanced {
            steps += 1;
        }
        steps
    }

    /// Runs the machine for at most `max_steps` steps.
    ///
    /// Returns the number of steps performed if the machine halted, or
    /// `TuringMachineError::StepLimitExceeded` if it would still advance after the budget.
    pub fn run_with_limit(&mut self, max_steps: usize) -> Result<usize, TuringMachineError> {
        for steps in 0..max_steps {
            if self.step() == Step::Halted {
                return Ok(steps);
            }
        }

        if self.is_halted() {
            Ok(max_steps)
        } else {
            debug!(max_steps, state = %self.state, "step limit reached");
            Err(TuringMachineError::StepLimitExceeded(max_steps))
        }
    }

    /// Returns the current state of the machine.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the state the machine was created with.
    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    /// Resets the machine to the configuration it was created with.
    pub fn reset(&mut self) {
        self.state = self.initial_state.clone();
        self.tape = self.initial_tape.clone();
        self.step_count = 0;
    }

    /// Returns the total number of steps executed since creation or the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Checks whether the next call to `step` would halt.
    ///
    /// Halting depends on the pair of state and symbol, not on the state alone: the same state
    /// may halt on one symbol and advance on another.
    pub fn is_halted(&self) -> bool {
        self.transition().is_none()
    }

    /// Returns the rule that the next step would apply, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.program.get(&self.state, self.tape.read())
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the materialized tape as a string.
    pub fn tape_string(&self) -> String {
        self.tape.to_string()
    }

    /// Returns the head position within the materialized tape.
    pub fn head(&self) -> usize {
        self.tape.head()
    }

    /// Returns the symbol currently under the head.
    pub fn symbol(&self) -> char {
        self.tape.read()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Captures the current configuration.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step: self.step_count,
            state: self.state.clone(),
            head: self.tape.head(),
            symbol: self.tape.read(),
            tape: self.tape.to_string(),
        }
    }
}

/// A serializable view of a machine configuration, taken between steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub step: usize,
    pub state: State,
    pub head: usize,
    pub symbol: char,
    pub tape: String,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, TuringMachineError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| TuringMachineError::Serialization(e.to_string()))
    }
}

impl fmt::Display for Snapshot {
    /// Formats as `state | symbol | head | tape`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.state, self.symbol, self.head, self.tape
        )
    }
}
