use clap::Parser;
use std::error::Error;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tur_engine::{
    analyze, halting_states, ProgramManager, Step, TuringMachine, TuringMachineError,
    MAX_EXECUTION_STEPS,
};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  tur-cli --program half-adder --input 01__
  tur-cli --program busy-beaver-2 --debug --delay-ms 200")]
struct Cli {
    /// The built-in program to execute
    #[clap(short, long, default_value = "half-adder")]
    program: String,

    /// The initial tape content (head starts at 0 unless --head is given)
    #[clap(short, long)]
    input: Option<String>,

    /// The initial head position
    #[clap(long)]
    head: Option<usize>,

    /// The initial state, overriding the program's default
    #[clap(short, long)]
    state: Option<String>,

    /// Stop with an error after this many steps; 0 runs until the machine halts
    #[clap(short, long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Pause between steps, in milliseconds
    #[clap(long, default_value_t = 0)]
    delay_ms: u64,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,

    /// Print the final configuration as JSON
    #[clap(long)]
    json: bool,

    /// Check the program for mistakes before running it
    #[clap(short, long)]
    analyze: bool,

    /// List the built-in programs and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        for index in 0..ProgramManager::get_program_count() {
            let info = ProgramManager::get_program_info(index)?;
            println!(
                "{:<18} {} (start: {}, tape: {:?}, {} states, {} rules)",
                info.name,
                info.description,
                info.initial_state,
                info.initial_tape,
                info.state_count,
                info.transition_count
            );
        }
        return Ok(());
    }

    let mut preset = ProgramManager::get_program_by_name(&cli.program)?;
    if let Some(input) = &cli.input {
        preset = preset.with_input(input);
    }
    if let Some(head) = cli.head {
        preset.head = head;
    }
    if let Some(state) = &cli.state {
        preset.initial_state = state.as_str().into();
    }

    if cli.analyze {
        analyze(&preset)?;
        let halting = halting_states(&preset.program);
        info!(program = preset.name(), halting_states = ?halting, "analysis passed");
    }

    let mut machine = preset.machine()?;
    info!(
        program = preset.name(),
        state = %machine.state(),
        tape = %machine.tape_string(),
        "starting machine"
    );

    match drive(&mut machine, &cli) {
        Ok(steps) => info!(steps, state = %machine.state(), "machine halted"),
        Err(e) => {
            warn!(error = %e, "machine stopped before halting");
            return Err(e.into());
        }
    }

    if cli.json {
        println!("{}", machine.snapshot().to_json()?);
    } else {
        println!("Final Tape: {}", machine.tape_string());
    }

    Ok(())
}

/// Runs the machine, printing and pausing between steps when asked to.
fn drive(machine: &mut TuringMachine, cli: &Cli) -> Result<usize, TuringMachineError> {
    if !cli.debug && cli.delay_ms == 0 {
        return match cli.max_steps {
            0 => Ok(machine.run()),
            max => machine.run_with_limit(max),
        };
    }

    let delay = Duration::from_millis(cli.delay_ms);
    let mut steps = 0;

    while cli.max_steps == 0 || steps < cli.max_steps {
        if machine.step() == Step::Halted {
            return Ok(steps);
        }
        steps += 1;

        if cli.debug {
            println!("{}", machine.snapshot());
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    if machine.is_halted() {
        Ok(steps)
    } else {
        Err(TuringMachineError::StepLimitExceeded(cli.max_steps))
    }
}
