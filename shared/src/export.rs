use crate::week::{format_api_date, parse_api_date, Week};
use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Xlsx];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel (XLSX)",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportRangeError {
    #[error("Date invalide : {0}")]
    InvalidDate(String),
    #[error("La date de fin doit être postérieure à la date de début.")]
    EndBeforeStart,
}

/// Inclusive date range for stats and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ExportRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ExportRangeError> {
        if end < start {
            return Err(ExportRangeError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    /// From the two `<input type="date">` values
    pub fn parse(start: &str, end: &str) -> Result<Self, ExportRangeError> {
        let parse = |value: &str| {
            parse_api_date(value).ok_or_else(|| ExportRangeError::InvalidDate(value.to_string()))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn for_week(week: Week) -> Self {
        Self {
            start: week.monday(),
            end: week.end(),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `start_date=...&end_date=...`
    pub fn query(&self) -> String {
        format!(
            "start_date={}&end_date={}",
            format_api_date(self.start),
            format_api_date(self.end)
        )
    }

    pub fn export_query(&self, format: ExportFormat) -> String {
        format!("format={}&{}", format, self.query())
    }
}

/// Range of the latest stats preview request. A reply is shown only if it
/// answers that range; earlier requests may finish later.
#[derive(Debug, Default)]
pub struct StatsRequests {
    latest: Option<ExportRange>,
}

impl StatsRequests {
    pub fn start(&mut self, range: ExportRange) {
        self.latest = Some(range);
    }

    /// No request is current, e.g. the range no longer parses
    pub fn clear(&mut self) {
        self.latest = None;
    }

    pub fn is_current(&self, range: ExportRange) -> bool {
        self.latest == Some(range)
    }
}
