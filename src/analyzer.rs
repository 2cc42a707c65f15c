//! This module provides checks for catching mistakes in a preset before running it: an
//! out-of-range head, a start state with no rules, states that can never be entered, and
//! input symbols no rule reads.
//!
//! None of these stop a machine from running. A missing rule is how a machine halts, so a
//! misspelled state name never shows up as an error at run time; it just halts early. The
//! analyzer is how callers find out.

use crate::programs::Preset;
use crate::types::{Program, State, TuringMachineError};
use std::collections::{BTreeSet, HashSet};

/// Represents the problems the analyzer can find in a preset.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The initial head position is outside the initial tape.
    InvalidHead(usize),
    /// The initial state has no rules, so the machine halts before its first step.
    InvalidStartState(String),
    /// States that have rules but cannot be reached from the initial state.
    UnreachableStates(Vec<String>),
    /// Symbols on the initial tape that no rule reads.
    InvalidTapeSymbols(Vec<char>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidHead(pos) => {
                TuringMachineError::ValidationError(format!("Invalid head position: {}", pos))
            }
            AnalysisError::InvalidStartState(state) => {
                TuringMachineError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
            AnalysisError::InvalidTapeSymbols(symbols) => {
                TuringMachineError::ValidationError(format!(
                    "Initial tape contains symbols not handled by any transition: {:?}",
                    symbols
                ))
            }
        }
    }
}

/// Analyzes a preset and reports the first problem found.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(TuringMachineError::ValidationError)` describing the first violated check.
pub fn analyze(preset: &Preset) -> Result<(), TuringMachineError> {
    let checks: [fn(&Preset) -> Result<(), AnalysisError>; 4] = [
        check_head,
        check_valid_start_state,
        check_unreachable_states,
        check_tape_symbols,
    ];

    match checks.iter().find_map(|check| check(preset).err()) {
        Some(error) => Err(error.into()),
        None => Ok(()),
    }
}

/// Lists the states that only ever appear as transition targets.
///
/// Entering any of these halts the machine on every symbol. That is usually intended
/// (`HALT`, `done`), but a misspelled target lands here too.
pub fn halting_states(program: &Program) -> Vec<State> {
    let sources = program.source_states();

    program
        .rules
        .values()
        .map(|transition| &transition.next_state)
        .filter(|state| !sources.contains(*state))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Checks that the head starts on the initial tape. An empty tape is a single blank cell.
fn check_head(preset: &Preset) -> Result<(), AnalysisError> {
    let len = preset.tape.chars().count().max(1);

    if preset.head >= len {
        return Err(AnalysisError::InvalidHead(preset.head));
    }

    Ok(())
}

/// Checks that at least one rule starts from the initial state.
fn check_valid_start_state(preset: &Preset) -> Result<(), AnalysisError> {
    if !preset.program.source_states().contains(&preset.initial_state) {
        return Err(AnalysisError::InvalidStartState(
            preset.initial_state.to_string(),
        ));
    }

    Ok(())
}

/// Checks for unreachable states with a depth-first traversal from the initial state.
///
/// Only states that have rules are reported; pure targets are covered by [`halting_states`].
fn check_unreachable_states(preset: &Preset) -> Result<(), AnalysisError> {
    let program = &preset.program;
    let mut visited = HashSet::new();
    let mut queue = vec![preset.initial_state.clone()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state.clone()) {
            continue;
        }

        queue.extend(
            program
                .rules
                .iter()
                .filter(|(key, _)| key.state == state)
                .map(|(_, transition)| transition.next_state.clone())
                .filter(|next| !visited.contains(next)),
        );
    }

    let unreachable: Vec<String> = program
        .source_states()
        .into_iter()
        .filter(|state| !visited.contains(state))
        .map(|state| state.to_string())
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

/// Checks that every non-blank symbol on the initial tape is read by at least one rule.
fn check_tape_symbols(preset: &Preset) -> Result<(), AnalysisError> {
    let handled = preset.program.read_symbols();

    let unhandled: Vec<char> = preset
        .tape
        .chars()
        .filter(|c| *c != preset.program.blank && !handled.contains(c))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if !unhandled.is_empty() {
        return Err(AnalysisError::InvalidTapeSymbols(unhandled));
    }

    Ok(())
}
