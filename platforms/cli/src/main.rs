use clap::Parser;
use gridwalk::{encode, GridWalker, GridWalkerError, Halt, Outcome, Scenario, ScenarioLoader, Step};
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  gridwalk-cli scenario.txt
  cat scenario.txt | gridwalk-cli --json")]
struct Cli {
    /// The scenario file to walk. Reads standard input when omitted.
    scenario: Option<String>,

    /// Print the outcome as JSON
    #[clap(short, long)]
    json: bool,

    /// Print each step of the walk
    #[clap(short = 'd', long)]
    debug: bool,

    /// Report the failure reason and exit with an error instead of printing `-1 -1 0`
    #[clap(short, long)]
    strict: bool,

    /// Print the scenario in canonical form and exit
    #[clap(short, long)]
    canonical: bool,
}

/// Builds the log filter. `RUST_LOG` wins when set; otherwise only warnings from the
/// library are shown. `--debug` always turns on the per-step debug events.
fn log_filter(env: Option<&str>, debug: bool) -> EnvFilter {
    let mut filter = env
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("gridwalk=warn"));

    if debug {
        if let Ok(d) = "gridwalk=debug".parse() {
            filter = filter.add_directive(d);
        }
    }

    filter
}

fn init_logging(debug: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    fmt()
        .with_env_filter(log_filter(env.as_deref(), debug))
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let result = load_scenario(&cli).and_then(|scenario| {
        if cli.canonical {
            print_canonical(&scenario);
            return Ok(None);
        }

        walk(scenario, cli.debug).map(Some)
    });

    match result {
        Ok(Some(outcome)) => {
            print_outcome(&outcome, cli.json);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) if cli.strict => {
            if cli.json {
                println!("{}", serde_json::json!({ "error": e.to_string() }));
            }
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            print_outcome(&invalid_outcome(&e), cli.json);
            ExitCode::SUCCESS
        }
    }
}

/// Loads the scenario from the given file, or from stdin when it is piped.
fn load_scenario(cli: &Cli) -> Result<Scenario, GridWalkerError> {
    if let Some(file_path) = &cli.scenario {
        ScenarioLoader::load_scenario(Path::new(file_path))
    } else if atty::isnt(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| GridWalkerError::FileError(format!("Failed to read from stdin: {}", e)))?;
        ScenarioLoader::load_scenario_from_string(&buffer)
    } else {
        Err(GridWalkerError::FileError(
            "No scenario file given and nothing piped on stdin".to_string(),
        ))
    }
}

fn walk(scenario: Scenario, debug: bool) -> Result<Outcome, GridWalkerError> {
    let mut walker = GridWalker::new(scenario)?;

    if !debug {
        return walker.run();
    }

    let print_state = |walker: &GridWalker| {
        let remaining: String = walker.remaining().iter().map(|d| d.symbol()).collect();

        println!(
            "Step: {}, Position: {}, Coins: {}, Remaining: [{}]",
            walker.step_count(),
            walker.position(),
            walker.coins(),
            remaining
        );
    };

    print_state(&walker);

    loop {
        match walker.step() {
            Step::Moved { .. } => print_state(&walker),
            Step::Blocked { at } => {
                println!("Blocked by wall at {}", at);
                print_state(&walker);
            }
            Step::Halt(Halt::Ok) => {
                println!("\nWalk finished.");
                return Ok(walker.outcome());
            }
            Step::Halt(Halt::Err(e)) => {
                println!("\nWalk aborted: {}", e);
                return Err(e);
            }
        }
    }
}

/// Collapses a failed run into the sentinel. The library already warns about the
/// failure, so this only adds a debug event.
fn invalid_outcome(error: &GridWalkerError) -> Outcome {
    tracing::debug!(%error, "reporting invalid run");
    Outcome::INVALID
}

fn print_canonical(scenario: &Scenario) {
    match encode(scenario) {
        Some(text) => print!("{}", text),
        None => eprintln!("Scenario has no movements and cannot be written as text"),
    }
}

fn print_outcome(outcome: &Outcome, json: bool) {
    if json {
        match serde_json::to_string(outcome) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Failed to serialize outcome: {}", e),
        }
    } else {
        println!("{}", outcome);
    }
}
