use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMode {
    AllTime,
    Bounded,
}

impl RangeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeMode::AllTime => "all-time",
            RangeMode::Bounded => "bounded",
        }
    }
}

/// Inclusive date window applied to the commit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
}

impl TimeRange {
    pub fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> AppResult<Self> {
        if let (Some(start), Some(end)) = (since, until) {
            if start > end {
                return Err(AppError::InvalidArgument(format!(
                    "since ({}) is after until ({})",
                    start.format(DATE_FORMAT),
                    end.format(DATE_FORMAT)
                )));
            }
        }
        Ok(Self { since, until })
    }

    pub fn parse(since: Option<&str>, until: Option<&str>) -> AppResult<Self> {
        let since = since.map(|value| parse_date(value, "since")).transpose()?;
        let until = until.map(|value| parse_date(value, "until")).transpose()?;
        Self::new(since, until)
    }

    pub fn since(&self) -> Option<NaiveDate> {
        self.since
    }

    pub fn until(&self) -> Option<NaiveDate> {
        self.until
    }

    pub fn mode(&self) -> RangeMode {
        if self.since.is_none() && self.until.is_none() {
            RangeMode::AllTime
        } else {
            RangeMode::Bounded
        }
    }

    /// Human phrase used inside narrative sentences.
    pub fn label(&self) -> String {
        match (self.since, self.until) {
            (None, None) => "across the full repository history".to_string(),
            (Some(start), Some(end)) => format!(
                "between {} and {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ),
            (Some(start), None) => format!("from {} onward", start.format(DATE_FORMAT)),
            (None, Some(end)) => format!("up to {}", end.format(DATE_FORMAT)),
        }
    }

    pub fn since_arg(&self) -> Option<String> {
        self.since
            .map(|date| format!("{}T00:00:00", date.format(DATE_FORMAT)))
    }

    pub fn until_arg(&self) -> Option<String> {
        self.until
            .map(|date| format!("{}T23:59:59", date.format(DATE_FORMAT)))
    }
}

pub fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::InvalidArgument(format!(
            "invalid {field} date '{value}', expected format YYYY-MM-DD"
        ))
    })
}
