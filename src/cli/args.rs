use crate::utils::constants::DEFAULT_MAX_STATES;
use crate::writers::ReportTimeZone;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "climate")]
#[command(about = "Summarise NOAA climate observations per state from tab-delimited files")]
#[command(version)]
pub struct Cli {
    /// Tab-delimited observation files, processed in order
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[arg(short, long, action = ArgAction::Count, help = "Log processing details to stderr (-vv for every skipped line)")]
    pub verbose: u8,

    #[arg(
        long,
        default_value_t = DEFAULT_MAX_STATES,
        help = "Maximum number of distinct states to track (0 = unlimited)"
    )]
    pub max_states: usize,

    #[arg(long, help = "Show extreme-temperature times in UTC instead of local time")]
    pub utc: bool,
}

impl Cli {
    pub fn state_capacity(&self) -> Option<usize> {
        match self.max_states {
            0 => None,
            n => Some(n),
        }
    }

    pub fn time_zone(&self) -> ReportTimeZone {
        if self.utc {
            ReportTimeZone::Utc
        } else {
            ReportTimeZone::Local
        }
    }
}
