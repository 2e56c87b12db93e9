use crate::pagination::cursor::Cursor;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Identifier of an establishment (branch) whose sales are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EstablishmentId(pub u64);

impl FromStr for EstablishmentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(EstablishmentId)
    }
}

impl fmt::Display for EstablishmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Start date {from} is after end date {to}")]
pub struct InvalidDateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Inclusive reporting window, both ends at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, InvalidDateRange> {
        if from > to {
            return Err(InvalidDateRange { from, to });
        }
        Ok(DateRange { from, to })
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// `range_from` request value, e.g. `2024-01-31T00:00:00`.
    pub fn range_from(&self) -> String {
        format_midnight(self.from)
    }

    pub fn range_to(&self) -> String {
        format_midnight(self.to)
    }
}

fn format_midnight(date: NaiveDate) -> String {
    format!("{}T00:00:00", date.format("%Y-%m-%d"))
}

/// Optional report filters; each enabled flag is sent as `<name>=1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFlags {
    pub show_opened: bool,
    pub show_unpaid: bool,
    pub show_irregular: bool,
}

impl ReportFlags {
    pub fn enabled(&self) -> Vec<&'static str> {
        [
            ("show_opened", self.show_opened),
            ("show_unpaid", self.show_unpaid),
            ("show_irregular", self.show_irregular),
        ]
        .into_iter()
        .filter_map(|(name, on)| on.then_some(name))
        .collect()
    }
}

impl Default for ReportFlags {
    fn default() -> Self {
        ReportFlags {
            show_opened: false,
            show_unpaid: true,
            show_irregular: true,
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        ApiCredentials {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Value of the authentication header: `key:secret`.
    pub fn header_value(&self) -> String {
        format!("{}:{}", self.api_key, self.api_secret)
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}

/// Everything needed to ask for one page of one establishment's report.
///
/// A fresh value is built for every request; advancing produces a new
/// request rather than mutating the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub establishment: EstablishmentId,
    pub range: DateRange,
    pub flags: ReportFlags,
    pub cursor: Cursor,
}

impl ReportRequest {
    pub fn first_page(establishment: EstablishmentId, range: DateRange, flags: ReportFlags) -> Self {
        ReportRequest {
            establishment,
            range,
            flags,
            cursor: Cursor::start(),
        }
    }

    pub fn next_page(&self) -> Self {
        ReportRequest {
            cursor: self.cursor.next(),
            ..self.clone()
        }
    }

    pub fn offset(&self) -> usize {
        self.cursor.offset
    }
}
