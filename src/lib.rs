//! This crate provides the core logic for a deterministic single-tape Turing Machine.
//! It includes the execution engine and its lazily grown tape, a set of built-in programs,
//! and an analyzer for catching mistakes in a program before running it.

pub mod analyzer;
pub mod machine;
pub mod programs;
pub mod tape;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, halting_states, AnalysisError};
/// Re-exports the `TuringMachine` struct and its `Snapshot` view from the machine module.
pub use machine::{Snapshot, TuringMachine};
/// Re-exports `Preset`, `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{Preset, ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports various types related to Turing Machine definition and execution from the types module.
pub use types::{
    Direction, Program, State, Step, Transition, TransitionKey, TuringMachineError,
    DEFAULT_BLANK_SYMBOL, MAX_EXECUTION_STEPS,
};
