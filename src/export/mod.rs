//! File exports of a scheduled goal.

pub mod csv;
pub mod ical;
pub mod json;
pub mod markdown;

use crate::error::UnknownVariant;
use crate::goal::Goal;
use polars::prelude::PolarsError;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataframe conversion error: {0}")]
    Frame(#[from] PolarsError),
}

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
    Ical,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Markdown,
        ExportFormat::Ical,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
            ExportFormat::Ical => "ics",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Ical => "text/calendar",
        }
    }

    /// `<title with whitespace runs replaced by '_'>.<extension>`
    pub fn file_name(&self, title: &str) -> String {
        let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
        let stem = if stem.is_empty() { "plan".to_string() } else { stem };
        format!("{stem}.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "ics" | "ical" | "icalendar" => Ok(ExportFormat::Ical),
            _ => Err(UnknownVariant::new("export format", s)),
        }
    }
}

pub fn render(goal: &Goal, format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Json => json::render_json(goal),
        ExportFormat::Csv => csv::render_csv(goal),
        ExportFormat::Markdown => Ok(markdown::render_markdown(goal)),
        ExportFormat::Ical => Ok(ical::render_ical(goal)),
    }
}

pub fn save_export<P: AsRef<Path>>(goal: &Goal, format: ExportFormat, path: P) -> ExportResult<()> {
    let content = render(goal, format)?;
    fs::write(path.as_ref(), content)?;
    tracing::info!(path = %path.as_ref().display(), %format, "exported plan");
    Ok(())
}
