use crate::error::Result;
use crate::models::{AccumulatorTable, StateAccumulator};
use crate::utils::constants::CTIME_FORMAT;
use crate::utils::units::kelvin_to_fahrenheit;
use chrono::{Local, TimeZone, Utc};
use std::fmt::{self, Write as _};
use std::io::Write;

/// Zone used to render extrema timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportTimeZone {
    #[default]
    Local,
    Utc,
}

impl ReportTimeZone {
    /// Render seconds since the epoch in ctime(3) layout, without the
    /// trailing newline. Unrepresentable instants fall back to the raw value.
    pub fn format_timestamp(&self, seconds: i64) -> String {
        match self {
            ReportTimeZone::Local => format_in(&Local, seconds),
            ReportTimeZone::Utc => format_in(&Utc, seconds),
        }
    }
}

fn format_in<Tz>(zone: &Tz, seconds: i64) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match zone.timestamp_opt(seconds, 0).earliest() {
        Some(datetime) => datetime.format(CTIME_FORMAT).to_string(),
        None => seconds.to_string(),
    }
}

/// Renders the per-state summary printed at the end of a run
pub struct ReportWriter {
    time_zone: ReportTimeZone,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self {
            time_zone: ReportTimeZone::Local,
        }
    }

    pub fn with_time_zone(time_zone: ReportTimeZone) -> Self {
        Self { time_zone }
    }

    pub fn render(&self, table: &AccumulatorTable) -> String {
        let mut report = String::from("States found: ");
        for code in table.codes() {
            report.push_str(code);
            report.push(' ');
        }
        report.push('\n');

        for state in table.iter() {
            // Writing into a String cannot fail
            let _ = self.render_state(&mut report, state);
        }

        report
    }

    fn render_state(&self, report: &mut String, state: &StateAccumulator) -> fmt::Result {
        writeln!(report, "-- State: {} --", state.code())?;
        writeln!(report, "Number of Records: {}", state.record_count)?;
        writeln!(report, "Average Humidity: {:.1}%", state.average_humidity())?;
        writeln!(
            report,
            "Average Temperature: {:.1}F",
            kelvin_to_fahrenheit(state.average_temperature())
        )?;
        writeln!(
            report,
            "Max Temperature: {:.1}F",
            kelvin_to_fahrenheit(state.max_temperature)
        )?;
        writeln!(
            report,
            "Max Temperature on: {}",
            self.time_zone.format_timestamp(state.max_temperature_time)
        )?;
        writeln!(
            report,
            "Min Temperature: {:.1}F",
            kelvin_to_fahrenheit(state.min_temperature)
        )?;
        writeln!(
            report,
            "Min Temperature on: {}",
            self.time_zone.format_timestamp(state.min_temperature_time)
        )?;
        writeln!(report, "Lightning Strikes: {}", state.lightning_strikes)?;
        writeln!(report, "Records with Snow Cover: {}", state.snow_records)?;
        writeln!(
            report,
            "Average Cloud Cover: {:.1}%",
            state.average_cloud_cover()
        )
    }

    pub fn write_report<W: Write>(&self, table: &AccumulatorTable, out: &mut W) -> Result<()> {
        out.write_all(self.render(table).as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
