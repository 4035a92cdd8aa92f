use std::io::{self, Write};
use std::path::Path;
use chrono::{SecondsFormat, Utc};
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::Serialize;
use crate::display::{format_schedule, print_schedule, write_schedule_to_file};
use crate::error::Result;
use crate::schedule::Schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// JSON envelope around a schedule
#[derive(Debug, Serialize)]
pub struct ScheduleReport<'a> {
    pub generated_at: String,
    pub team_count: usize,
    pub round_count: usize,
    pub complete: bool,
    pub schedule: &'a Schedule,
}

impl<'a> ScheduleReport<'a> {
    pub fn new(schedule: &'a Schedule) -> Self {
        ScheduleReport {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            team_count: schedule.real_teams().count(),
            round_count: schedule.rounds.len(),
            complete: schedule.is_complete(),
            schedule,
        }
    }
}

/// Writes one `round,home,away` row per match
pub fn write_csv<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);
    wtr.write_record(["round", "home", "away"])?;
    for round in &schedule.rounds {
        let number = round.number.to_string();
        for pair in &round.matches {
            let home = pair.first.to_string();
            let away = pair.second.to_string();
            wtr.write_record([number.as_str(), home.as_str(), away.as_str()])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(schedule: &Schedule, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, &ScheduleReport::new(schedule))?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_text<W: Write>(schedule: &Schedule, mut writer: W) -> Result<()> {
    writer.write_all(format_schedule(schedule).as_bytes())?;
    Ok(())
}

/// Writes a schedule in the given format to `path`, or to stdout when no path is given
pub fn export_schedule(schedule: &Schedule, format: OutputFormat, path: Option<&Path>) -> Result<()> {
    match (format, path) {
        (OutputFormat::Text, None) => print_schedule(schedule),
        (OutputFormat::Text, Some(path)) => {
            write_schedule_to_file(schedule, path)?;
            log::info!("Schedule saved to {}", path.display());
        }
        (format, Some(path)) => {
            let file = std::fs::File::create(path)?;
            write_format(schedule, format, io::BufWriter::new(file))?;
            log::info!("Schedule saved to {}", path.display());
        }
        (format, None) => write_format(schedule, format, io::stdout().lock())?,
    }
    Ok(())
}

fn write_format<W: Write>(schedule: &Schedule, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Text => write_text(schedule, writer),
        OutputFormat::Json => write_json(schedule, writer),
        OutputFormat::Csv => write_csv(schedule, writer),
    }
}
