use beaver::bounds::BoundTable;
use beaver::{
    survey_shape, BeaverError, CsvWriter, JsonLinesWriter, MachineTable, RecordSink, RunOutcome,
    Shape, Stats, Step, TuringMachine,
};
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Configurations to survey, as STATESxSYMBOLS pairs (e.g. 3x2)
    #[clap(
        short = 'c',
        long,
        value_delimiter = ',',
        default_value = "1x2,2x2,3x2,4x2"
    )]
    shapes: Vec<Shape>,

    /// Results file for the per-machine records
    #[clap(short, long, default_value = "machine_results.csv")]
    output: PathBuf,

    /// Write JSON lines instead of CSV
    #[clap(long)]
    json: bool,

    /// Step bound override, replacing the built-in bound table for every shape
    #[clap(short, long)]
    steps: Option<u64>,

    /// Run shapes whose recorded step bound is marked unverified
    #[clap(long)]
    allow_unverified: bool,

    /// Run a single machine given in standard text format instead of a survey
    #[clap(short, long)]
    machine: Option<String>,

    /// Print each step of the single-machine run
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.machine.clone() {
        Some(text) => run_machine(&cli, &text),
        None => run_survey(&cli),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Surveys every requested shape into one results file, sharing a single
/// statistics accumulator so the halting probability is cumulative across
/// shapes, then prints the final summary.
fn run_survey(cli: &Cli) -> Result<(), BeaverError> {
    let bounds = BoundTable::known();

    let file = File::create(&cli.output).map_err(|e| {
        BeaverError::FileError(format!("failed to create {}: {e}", cli.output.display()))
    })?;
    let buffered = BufWriter::new(file);
    let mut sink: Box<dyn RecordSink> = if cli.json {
        Box::new(JsonLinesWriter::new(buffered))
    } else {
        Box::new(CsvWriter::new(buffered))
    };

    let mut stats = Stats::new();
    for &shape in &cli.shapes {
        let steps = resolve_steps(cli, &bounds, shape)?;
        let total = survey_shape(shape, steps, &mut stats, sink.as_mut())?;
        println!("surveyed {shape}: {total} machines within {steps} steps");
    }
    sink.flush()?;

    let summary = stats.summary();
    println!(
        "Number of halting and non-halting machines: {}, {}",
        summary.halting, summary.non_halting
    );
    println!("Halting probability: {}", summary.halting_probability);

    Ok(())
}

/// Runs one machine from its standard text form and reports its outcome.
fn run_machine(cli: &Cli, text: &str) -> Result<(), BeaverError> {
    let table: MachineTable = text.parse()?;
    let shape = table.shape();
    let steps = resolve_steps(cli, &BoundTable::known(), shape)?;

    let mut machine = TuringMachine::new(table, steps);
    let outcome = if cli.debug {
        run_traced(&mut machine, steps)
    } else {
        machine.run()
    };

    match outcome {
        RunOutcome::Halted(count) => println!("halted after {count} steps"),
        RunOutcome::DidNotHalt => println!("did not halt within {steps} steps"),
    }

    Ok(())
}

fn resolve_steps(cli: &Cli, bounds: &BoundTable, shape: Shape) -> Result<u64, BeaverError> {
    match cli.steps {
        Some(steps) => Ok(steps),
        None => bounds.resolve(shape, cli.allow_unverified),
    }
}

fn run_traced(machine: &mut TuringMachine, steps: u64) -> RunOutcome {
    print_state(machine);

    for _ in 0..steps {
        let step = machine.step();
        print_state(machine);
        if step == Step::Halted {
            return RunOutcome::Halted(machine.step_count());
        }
    }

    RunOutcome::DidNotHalt
}

/// Prints the current state letter and a tape window around the head, with the
/// head cell bracketed.
fn print_state(machine: &TuringMachine) {
    let head = machine.head();
    let tape = machine.tape();
    let lo = head.saturating_sub(10);
    let hi = (head + 11).min(tape.len());

    let state = if machine.is_halted() {
        'Z'
    } else {
        char::from_u32('A' as u32 + machine.state()).unwrap_or('?')
    };

    let mut window = String::new();
    for (i, &symbol) in tape.iter().enumerate().take(hi).skip(lo) {
        if i == head {
            window.push('[');
        }
        window.push(char::from_digit(symbol as u32, 36).unwrap_or('?'));
        if i == head {
            window.push(']');
        }
    }

    println!(
        "Step: {}, State: {}, Tape: {}",
        machine.step_count(),
        state,
        window
    );
}
