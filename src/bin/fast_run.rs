use clap::Parser;
use fast_sfunc::{FastLibrary, FastSFunc, InputFrame, Inputs, Parameters, Runner};
use simple_logger::SimpleLogger;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

struct Timer {
    time: Instant,
}
impl Timer {
    pub fn tic() -> Self {
        Self {
            time: Instant::now(),
        }
    }
    pub fn toc(self) -> f64 {
        self.time.elapsed().as_secs_f64()
    }
    pub fn print_toc(self) {
        println!("... in {:3}s", self.toc());
    }
}

/// Runs a FAST model through the gateway without a simulation host
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// FAST primary input file
    #[arg(short, long)]
    input_file: String,
    /// Maximum simulation time [s]
    #[arg(short, long, default_value_t = 60.)]
    t_max: f64,
    /// Number of inputs added to the fixed FAST inputs
    #[arg(short, long, default_value_t = 0)]
    additional_inputs: i64,
    /// FAST initialization inputs
    #[arg(long, value_delimiter = ',')]
    init_inputs: Vec<f64>,
    /// Pickle file with one row of block inputs per step
    #[arg(long)]
    inputs: Option<PathBuf>,
    /// Pickle file the run record is written to
    #[arg(short, long, default_value = "fast_run.pkl")]
    output: PathBuf,
    /// Restart from this checkpoint root
    #[arg(long)]
    restart: Option<String>,
    /// Checkpoint root, checkpoints are written as `<root>.<step>`
    #[arg(long, requires = "checkpoint_every")]
    checkpoint: Option<String>,
    /// Steps between checkpoints
    #[arg(long)]
    checkpoint_every: Option<u64>,
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: log::LevelFilter,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    SimpleLogger::new().with_level(cli.log_level).init()?;

    let mut parameters = Parameters::new(cli.input_file.as_str())
        .t_max(cli.t_max)
        .additional_inputs(cli.additional_inputs)
        .init_inputs(cli.init_inputs.clone());
    if let Some(root) = &cli.restart {
        parameters = parameters.restart_from(root.as_str());
    }
    let n_input = parameters.validate()?;

    // INPUTS
    let inputs = match &cli.inputs {
        Some(path) => {
            let tic = Timer::tic();
            println!("Loading inputs from {:?} ...", path);
            let inputs = Inputs::from_pickle(path)?;
            tic.print_toc();
            inputs
        }
        None => Inputs::constant(InputFrame::new(n_input - fast_sfunc::NUM_FIXED_INPUTS)),
    };

    // FAST
    let mut runner = Runner::new(FastSFunc::new(FastLibrary::open()?));
    if let (Some(root), Some(n_step)) = (&cli.checkpoint, cli.checkpoint_every) {
        runner = runner.checkpoint_every(root.as_str(), n_step);
    }
    let tic = Timer::tic();
    println!("Running FAST ...");
    let record = runner.run(&parameters, &inputs)?;
    tic.print_toc();
    println!(
        "{} samples of {} channels at {}s",
        record.time.len(),
        record.channels.len(),
        record.dt
    );

    // OUTPUTS
    record.to_pickle(&cli.output)?;
    println!("Run record written to {:?}", cli.output);
    Ok(())
}
