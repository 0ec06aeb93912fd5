pub mod error;
pub mod event;
pub mod report;
pub mod run_log;
pub mod source;
#[cfg(feature = "dump")]
pub mod dump;

pub use crate::error::Error;
pub use crate::event::Event;
pub use crate::report::{run, ReportConfig, Summary};
pub use crate::run_log::RunLog;
pub use crate::source::{open, open_all, EventSource};

/// Input read when none is given
pub const DEFAULT_INPUT: &str = "root://cms-xrd-global.cern.ch//store/mc/RunIIFall15MiniAODv2/SMS-T1tttt_mGluino-1500_mLSP-100_TuneCUETP8M1_13TeV-madgraphMLM-pythia8/MINIAODSIM/PU25nsData2015v1_76X_mcRun2_asymptotic_v12-v2/20000/A6A3AF86-9FC1-E511-918B-901B0E542962.root";
