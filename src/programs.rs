//! Built-in programs. Each preset bundles a transition table with the start configuration it
//! is meant to run from, so drivers can pick one by name and swap in their own input.

use crate::machine::TuringMachine;
use crate::types::{Program, State, TuringMachineError};

use crate::types::Direction::{Left, Right};

/// A program together with its default start configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub program: Program,
    pub description: String,
    pub initial_state: State,
    pub tape: String,
    pub head: usize,
}

impl Preset {
    pub fn name(&self) -> &str {
        &self.program.name
    }

    /// Returns a copy of this preset starting from a different tape, with the head at 0.
    pub fn with_input(&self, tape: &str) -> Self {
        Self {
            tape: tape.to_string(),
            head: 0,
            ..self.clone()
        }
    }

    /// Builds a machine at this preset's start configuration.
    pub fn machine(&self) -> Result<TuringMachine, TuringMachineError> {
        TuringMachine::new(
            self.program.clone(),
            self.tape.chars(),
            self.head,
            self.initial_state.clone(),
        )
    }
}

/// One-bit half adder.
///
/// The tape holds `A B _ _`; the machine remembers A in its state, combines it with B, and
/// writes SUM (A xor B) and CARRY (A and B) into the two blank cells.
pub fn half_adder() -> Preset {
    let program = Program::new("half-adder")
        // Read A
        .rule("q0", '0', '0', Right, "qStoreA0")
        .rule("q0", '1', '1', Right, "qStoreA1")
        // Read B
        .rule("qStoreA0", '0', '0', Right, "qXOR0")
        .rule("qStoreA0", '1', '1', Right, "qXOR1")
        .rule("qStoreA1", '0', '0', Right, "qXOR2")
        .rule("qStoreA1", '1', '1', Right, "qXOR3")
        // A=0, B=0
        .rule("qXOR0", '_', '0', Right, "qAND0")
        .rule("qAND0", '_', '0', Right, "HALT")
        // A=0, B=1
        .rule("qXOR1", '_', '1', Right, "qAND1")
        .rule("qAND1", '_', '0', Right, "HALT")
        // A=1, B=0
        .rule("qXOR2", '_', '1', Right, "qAND2")
        .rule("qAND2", '_', '0', Right, "HALT")
        // A=1, B=1
        .rule("qXOR3", '_', '0', Right, "qAND3")
        .rule("qAND3", '_', '1', Right, "HALT");

    Preset {
        program,
        description: "Adds two bits A and B, writing SUM and CARRY after them".to_string(),
        initial_state: State::from("q0"),
        tape: "11__".to_string(),
        head: 0,
    }
}

/// Adds one to a binary number written most significant bit first.
pub fn binary_increment() -> Preset {
    let program = Program::new("binary-increment")
        .rule("right", '0', '0', Right, "right")
        .rule("right", '1', '1', Right, "right")
        .rule("right", '_', '_', Left, "carry")
        .rule("carry", '1', '0', Left, "carry")
        .rule("carry", '0', '1', Left, "done")
        .rule("carry", '_', '1', Left, "done");

    Preset {
        program,
        description: "Increments a binary number by one".to_string(),
        initial_state: State::from("right"),
        tape: "1011".to_string(),
        head: 0,
    }
}

/// The two-state, two-symbol busy beaver. It grows the tape on both sides before halting.
pub fn busy_beaver_2() -> Preset {
    let program = Program::new("busy-beaver-2")
        .with_blank('0')
        .rule("A", '0', '1', Right, "B")
        .rule("A", '1', '1', Left, "B")
        .rule("B", '0', '1', Left, "A")
        .rule("B", '1', '1', Right, "H");

    Preset {
        program,
        description: "2-state busy beaver: writes four 1s in six steps".to_string(),
        initial_state: State::from("A"),
        tape: String::new(),
        head: 0,
    }
}

/// Appends a `1` to a unary number.
pub fn unary_successor() -> Preset {
    let program = Program::new("unary-successor")
        .rule("scan", '1', '1', Right, "scan")
        .rule("scan", '_', '1', Right, "done");

    Preset {
        program,
        description: "Computes n + 1 for a unary number".to_string(),
        initial_state: State::from("scan"),
        tape: "111".to_string(),
        head: 0,
    }
}

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Preset> = vec![
        half_adder(),
        binary_increment(),
        busy_beaver_2(),
        unary_successor(),
    ];
}

/// Summary of a built-in program, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub description: String,
    pub initial_state: State,
    pub initial_tape: String,
    pub state_count: usize,
    pub transition_count: usize,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Preset, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::UnknownProgram(format!(
                "index {} out of range (have {})",
                index,
                PROGRAMS.len()
            ))
        })
    }

    /// Get a program by its exact name
    pub fn get_program_by_name(name: &str) -> Result<Preset, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|preset| preset.name() == name)
            .cloned()
            .ok_or_else(|| TuringMachineError::UnknownProgram(name.to_string()))
    }

    /// Get all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS
            .iter()
            .map(|preset| preset.name().to_string())
            .collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let preset = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: preset.name().to_string(),
            description: preset.description.clone(),
            initial_state: preset.initial_state.clone(),
            initial_tape: preset.tape.clone(),
            state_count: preset.program.states().len(),
            transition_count: preset.program.len(),
        })
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, preset)| preset.name().to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Snapshot;
    use crate::types::Step;

    fn add(a: char, b: char) -> (char, char, TuringMachine) {
        let input = format!("{}{}__", a, b);
        let mut machine = half_adder().with_input(&input).machine().unwrap();
        machine.run();

        let tape = machine.tape().symbols();
        (tape[2], tape[3], machine)
    }

    #[test]
    fn test_half_adder_one_plus_one() {
        let (sum, carry, machine) = add('1', '1');

        assert_eq!((sum, carry), ('0', '1'));
        assert_eq!(machine.tape_string(), "1101_");
        assert_eq!(machine.head(), 4);
        assert_eq!(machine.state(), &State::from("HALT"));
        assert_eq!(machine.step_count(), 4);
    }

    #[test]
    fn test_half_adder_truth_table() {
        let cases = [
            (('0', '0'), ('0', '0')),
            (('0', '1'), ('1', '0')),
            (('1', '0'), ('1', '0')),
            (('1', '1'), ('0', '1')),
        ];

        for ((a, b), expected) in cases {
            let (sum, carry, machine) = add(a, b);
            assert_eq!((sum, carry), expected, "A={} B={}", a, b);
            assert_eq!(machine.state(), &State::from("HALT"));
        }
    }

    #[test]
    fn test_half_adder_default_input() {
        let mut machine = half_adder().machine().unwrap();
        assert_eq!(machine.run(), 4);
        assert_eq!(machine.tape_string(), "1101_");
        assert_eq!(machine.step(), Step::Halted);
    }

    #[test]
    fn test_runs_are_deterministic() {
        fn trace(preset: &Preset) -> Vec<Snapshot> {
            let mut machine = preset.machine().unwrap();
            let mut snapshots = vec![machine.snapshot()];
            while machine.step() == Step::Advanced {
                snapshots.push(machine.snapshot());
            }
            snapshots
        }

        for preset in PROGRAMS.iter() {
            assert_eq!(trace(preset), trace(preset), "{}", preset.name());
        }
    }

    #[test]
    fn test_binary_increment() {
        let mut machine = binary_increment().machine().unwrap();
        machine.run();
        assert_eq!(machine.tape_string(), "1100_");
        assert_eq!(machine.state(), &State::from("done"));

        let mut machine = binary_increment().with_input("111").machine().unwrap();
        machine.run();
        assert_eq!(machine.tape_string(), "_1000_");
        assert_eq!(machine.head(), 0);
    }

    #[test]
    fn test_busy_beaver_grows_both_sides() {
        let mut machine = busy_beaver_2().machine().unwrap();

        assert_eq!(machine.run(), 6);
        assert_eq!(machine.tape_string(), "1111");
        assert_eq!(machine.head(), 2);
        assert_eq!(machine.state(), &State::from("H"));
    }

    #[test]
    fn test_unary_successor() {
        let mut machine = unary_successor().machine().unwrap();
        assert_eq!(machine.run(), 4);
        assert_eq!(machine.tape_string(), "1111_");
    }

    #[test]
    fn test_program_manager_lookup() {
        assert_eq!(ProgramManager::get_program_count(), 4);

        let preset = ProgramManager::get_program_by_name("half-adder").unwrap();
        assert_eq!(preset.initial_state, State::from("q0"));

        assert!(matches!(
            ProgramManager::get_program_by_name("half adder"),
            Err(TuringMachineError::UnknownProgram(_))
        ));
        assert!(ProgramManager::get_program_by_index(99).is_err());
    }

    #[test]
    fn test_program_info() {
        let info = ProgramManager::get_program_info(0).unwrap();
        assert_eq!(info.name, "half-adder");
        assert_eq!(info.transition_count, 14);
        // 11 source states plus HALT.
        assert_eq!(info.state_count, 12);
        assert_eq!(info.initial_tape, "11__");
    }

    #[test]
    fn test_search_programs() {
        assert_eq!(ProgramManager::search_programs("BINARY"), vec![1]);
        assert_eq!(ProgramManager::search_programs("beaver"), vec![2]);
        assert!(ProgramManager::search_programs("palindrome").is_empty());
        assert_eq!(ProgramManager::list_program_names()[2], "busy-beaver-2");
    }
}
