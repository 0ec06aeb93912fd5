use std::{fmt, io::Write};

use itertools::Itertools;
use tracing::info;

use crate::{
    error::Error,
    event::{EventId, Jet, Subjet},
    run_log::RunLog,
    source::EventSource,
};

/// Label of the large-radius jet collection in MiniAOD
pub const AK8_JETS: &str = "slimmedJetsAK8";
/// Grooming algorithm producing the subjets
pub const SOFT_DROP: &str = "SoftDrop";
/// Packed soft-drop subjet collection stored next to the AK8 jets
pub const SOFT_DROP_SUBJETS: &str = "slimmedJetsAK8PFCHSSoftDropPacked:SubJets";
/// Event number at which reading stops by default
pub const DEFAULT_STOP_AT: u64 = 2403;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// Label of the jet collection
    pub jet_label: String,
    /// Grooming algorithm whose subjets are reported
    pub subjet_algorithm: String,
    /// Stop before the event with this number
    pub stop_at: Option<u64>,
    /// Label of a subjet collection whose size is appended to each row
    pub subjet_collection: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            jet_label: AK8_JETS.to_owned(),
            subjet_algorithm: SOFT_DROP.to_owned(),
            stop_at: Some(DEFAULT_STOP_AT),
            subjet_collection: None,
        }
    }
}

/// What a report run went through
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    /// Entries announced by the source
    pub entries: u64,
    /// Events reported on
    pub events: u64,
    /// Rows printed, one per jet
    pub rows: u64,
    /// Whether reading ended at the configured stop event
    pub stopped: bool,
}

/// Print one row per jet and event to `out`
///
/// If `log` is given, the same information is written to it, one
/// line per quantity. Errors are passed on as soon as they occur.
pub fn run<S, W>(
    source: &mut S,
    out: W,
    config: &ReportConfig,
    log: Option<&RunLog>,
) -> Result<Summary, Error>
where
    S: EventSource + ?Sized,
    W: Write,
{
    match log {
        Some(log) => log.in_scope(|| report(source, out, config)),
        None => report(source, out, config),
    }
}

fn report<S, W>(source: &mut S, mut out: W, config: &ReportConfig) -> Result<Summary, Error>
where
    S: EventSource + ?Sized,
    W: Write,
{
    let header = header(config);
    writeln!(out, "{header}").map_err(Error::Output)?;
    info!("{header}");

    let mut summary = Summary {
        entries: source.entries()?,
        ..Default::default()
    };
    if summary.entries == 0 {
        return Ok(summary);
    }

    while let Some(event) = source.next_event() {
        let event = event?;
        let EventId { run, lumi, event: event_id } = event.id;
        if config.stop_at == Some(event_id) {
            summary.stopped = true;
            break;
        }
        let jets: &Vec<Jet> = event.fetch(&config.jet_label)?;
        let n_subjet_col = match &config.subjet_collection {
            Some(label) => Some(event.fetch::<Vec<Subjet>>(label)?.len()),
            None => None,
        };
        summary.events += 1;

        info!("run: {run}");
        info!("lumi: {lumi}");
        info!("eventId: {event_id}");

        for jet in jets {
            let subjets = jet.subjets(&config.subjet_algorithm);
            let n_subjets = subjets.len();
            let pts = SubjetPts(subjets);
            write!(
                out,
                "{run:6} {lumi:10} {event_id:9} {:10.3} {:10.3} {pts}",
                jet.pt, n_subjets as f64
            )
            .map_err(Error::Output)?;
            if let Some(n) = n_subjet_col {
                write!(out, " {n:10}").map_err(Error::Output)?;
            }
            writeln!(out).map_err(Error::Output)?;
            summary.rows += 1;

            info!("jet pt: {:.3}", jet.pt);
            info!("nSubjets: {n_subjets}");
            info!("subjetPts: {pts}");
        }
    }
    out.flush().map_err(Error::Output)?;
    Ok(summary)
}

/// Column header line
pub fn header(config: &ReportConfig) -> String {
    let mut header = format!(
        "{:>6} {:>10} {:>9} {:>10} {:>10} {:>10}",
        "run", "lumi", "event", "jet.pt", "nSubJets", "subjetPts"
    );
    if config.subjet_collection.is_some() {
        header += &format!(" {:>10}", "nSubjetCol");
    }
    header
}

/// Subjet transverse momenta, rendered as a list of floats
#[derive(Copy, Clone, Debug)]
pub struct SubjetPts<'a>(pub &'a [Subjet]);

impl fmt::Display for SubjetPts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().map(|sj| ShortFloat(sj.pt)).format(", "))
    }
}

/// Shortest representation that reads back to the same value,
/// with exponents for very small and very large magnitudes
/// (`10.0`, `1e+16`, `1e-05`).
#[derive(Copy, Clone, Debug)]
struct ShortFloat(f64);

impl fmt::Display for ShortFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            return f.write_str("nan");
        }
        let repr = format!("{:?}", self.0);
        match repr.split_once('e') {
            Some((mantissa, exp)) => {
                let (sign, digits) = match exp.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exp),
                };
                write!(f, "{mantissa}e{sign}{digits:0>2}")
            }
            None => f.write_str(&repr),
        }
    }
}
