use std::io::{self, Write};

use colored::Colorize;
use log::debug;

use crate::types::{FindingRecord, ValidationError};

/// Column headings and widths of the findings table.
const COLUMNS: [(&str, usize); 4] = [("", 6), ("TargetName", 40), ("Type", 25), ("Details", 50)];

fn pad(cell: &str, width: usize) -> String {
    let truncated: String = cell.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

/// Renders one table row; multi-line cells grow the row downwards.
fn render_row(cells: [&str; 4]) -> String {
    let cell_lines: Vec<Vec<&str>> = cells.iter().map(|c| c.lines().collect()).collect();
    let height = cell_lines.iter().map(Vec::len).max().unwrap_or(0).max(1);

    (0..height)
        .map(|line| {
            cell_lines
                .iter()
                .zip(COLUMNS)
                .map(|(lines, (_, width))| pad(lines.get(line).copied().unwrap_or(""), width))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn row_separator() -> String {
    "-".repeat(COLUMNS.iter().map(|(_, width)| width).sum::<usize>() - 1)
}

/// Renders the findings as a plain text table, without colors.
pub fn render_table(errors: &[ValidationError]) -> String {
    let separator = row_separator();
    let mut out = separator.clone();

    let mut push_row = |row: String| {
        out.push('\n');
        out.push_str(&row);
        out.push('\n');
        out.push_str(&separator);
    };

    push_row(render_row(COLUMNS.map(|(heading, _)| heading)));
    for (idx, error) in errors.iter().enumerate() {
        let number = format!("{}.", idx + 1);
        let message = error.message();
        push_row(render_row([
            number.as_str(),
            error.target_name(),
            error.type_description(),
            message.as_str(),
        ]));
    }

    out
}

pub fn print_no_errors_message<W: Write>(writer: &mut W) -> io::Result<()> {
    debug!("No errors found");
    writeln!(writer, "{} No errors found!", "✓".green().bold())?;
    writer.flush()?;
    Ok(())
}

pub fn print_table<W: Write>(writer: &mut W, errors: &[ValidationError]) -> io::Result<()> {
    if errors.is_empty() {
        return print_no_errors_message(writer);
    }

    debug!("Printing table for {} errors", errors.len());
    writeln!(
        writer,
        "{}\n",
        format!("Number of errors found: {}", errors.len()).red().bold()
    )?;
    writeln!(writer, "{}", render_table(errors).white())?;

    print_summary(writer, errors)?;

    writer.flush()?;
    Ok(())
}

fn print_summary<W: Write>(writer: &mut W, errors: &[ValidationError]) -> io::Result<()> {
    const KINDS: [&str; 4] =
        ["Missing Dependency", "Unused Dependency", "Redundant Import", "Redundant Dependency"];

    writeln!(writer, "\n{}", "Summary".bold())?;
    for kind in KINDS {
        let count = errors.iter().filter(|e| e.type_description() == kind).count();
        if count > 0 {
            writeln!(writer, "  {}: {}", kind, count.to_string().yellow().bold())?;
        }
    }
    Ok(())
}

/// Writes the findings as a pretty printed JSON array of
/// `{targetName, type, details}` records.
pub fn print_json<W: Write>(writer: &mut W, errors: &[ValidationError]) -> io::Result<()> {
    debug!("Printing JSON for {} errors", errors.len());
    let records: Vec<FindingRecord> = errors.iter().map(ValidationError::to_record).collect();
    serde_json::to_writer_pretty(&mut *writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
