use std::io;

use ak8_report::{
    report::{AK8_JETS, DEFAULT_STOP_AT, SOFT_DROP},
    run_log::DEFAULT_LOG_FILE,
    ReportConfig, RunLog, DEFAULT_INPUT,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Print transverse momenta of AK8 jets and their soft-drop subjets
#[derive(Parser, Debug)]
#[command(name = "ak8-report", version, about)]
struct Opt {
    /// Input event file; may be given several times
    #[arg(short = 'i', long = "inputPath", default_value = DEFAULT_INPUT)]
    input: Vec<String>,

    /// Log file, truncated on each run
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: String,

    /// Do not write a log file
    #[arg(long)]
    no_log: bool,

    /// Stop before the event with this number
    #[arg(long, default_value_t = DEFAULT_STOP_AT)]
    stop_at: u64,

    /// Read all events
    #[arg(long, conflicts_with = "stop_at")]
    no_stop: bool,

    /// Label of the jet collection
    #[arg(long, default_value = AK8_JETS)]
    jets: String,

    /// Grooming algorithm of the reported subjets
    #[arg(long, default_value = SOFT_DROP)]
    algorithm: String,

    /// Append the size of this subjet collection to each row
    #[arg(long)]
    subjet_collection: Option<String>,
}

impl Opt {
    fn config(&self) -> ReportConfig {
        ReportConfig {
            jet_label: self.jets.clone(),
            subjet_algorithm: self.algorithm.clone(),
            stop_at: (!self.no_stop).then_some(self.stop_at),
            subjet_collection: self.subjet_collection.clone(),
        }
    }
}

fn init_diagnostics() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    init_diagnostics();
    debug!("settings: {opt:#?}");

    let log = if opt.no_log {
        None
    } else {
        let log = RunLog::create(&opt.log_file)
            .with_context(|| format!("unable to create log file {}", opt.log_file))?;
        Some(log)
    };

    let config = opt.config();
    let mut source = ak8_report::open_all(opt.input.as_slice())
        .with_context(|| format!("unable to open input {}", opt.input.join(", ")))?;
    let summary = ak8_report::run(&mut source, io::stdout().lock(), &config, log.as_ref())?;
    debug!(?summary, "done");

    if let Some(log) = log {
        log.close();
    }
    Ok(())
}
