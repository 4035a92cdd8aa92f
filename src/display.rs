use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::schedule::{Round, Schedule};

/// Formats a single round:
///
/// ```text
///
/// Ronde 1
/// -------
/// A-B
/// Free teams: C
/// ```
pub fn format_round(round: &Round) -> String {
    let header = format!("Ronde {}", round.number);
    let separator = "-".repeat(header.len());
    let mut lines = vec![String::new(), header, separator];
    lines.extend(round.matches.iter().map(|pair| pair.to_string()));
    if !round.free_teams.is_empty() {
        let free: Vec<String> = round.free_teams.iter().map(|team| team.to_string()).collect();
        lines.push(format!("Free teams: {}", free.join(", ")));
    }
    lines.join("\n") + "\n"
}

/// Formats every round, followed by a warning block if pairs were left unscheduled
pub fn format_schedule(schedule: &Schedule) -> String {
    let mut out: String = schedule.rounds.iter().map(format_round).collect();
    if !schedule.is_complete() {
        out.push_str(&format!("\nWarning: {} pairs could not be scheduled:\n", schedule.unscheduled.len()));
        for pair in &schedule.unscheduled {
            out.push_str(&format!("  {}\n", pair));
        }
    }
    out
}

/// Prints a schedule to stdout
pub fn print_schedule(schedule: &Schedule) {
    print!("{}", format_schedule(schedule));
}

/// Writes the text rendering of a schedule to a file
pub fn write_schedule_to_file<P: AsRef<Path>>(schedule: &Schedule, filename: P) -> std::io::Result<()> {
    let mut file = File::create(filename)?;
    file.write_all(format_schedule(schedule).as_bytes())?;
    Ok(())
}
