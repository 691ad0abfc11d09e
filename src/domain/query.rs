//! Query parameters for the notifications API
//!
//! [`QueryParameters`] can only be obtained through [`QueryParametersBuilder::build`],
//! so every value reaching the fetcher has already been validated.

use super::errors::DjenError;
use super::result::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted on input and sent upstream
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Court code the upstream form uses to mean "any court"
const COURT_SENTINEL: &str = "null";

/// Parses an ISO `YYYY-MM-DD` date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        DjenError::Validation(format!(
            "{field} must be a date in YYYY-MM-DD format, got '{value}'"
        ))
    })
}

/// Inclusive availability date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DjenError::Validation(format!(
                "Start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parses both ends from ISO strings
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date("start date", start)?, parse_date("end date", end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Validated search parameters
///
/// At least one of party name, license number or free text is present, and the
/// license jurisdiction is present whenever a license number is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    party_name: Option<String>,
    license_number: Option<String>,
    license_jurisdiction: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    text: Option<String>,
    court: Option<String>,
}

impl QueryParameters {
    /// Returns a new builder
    pub fn builder() -> QueryParametersBuilder {
        QueryParametersBuilder::default()
    }

    pub fn party_name(&self) -> Option<&str> {
        self.party_name.as_deref()
    }

    pub fn license_number(&self) -> Option<&str> {
        self.license_number.as_deref()
    }

    pub fn license_jurisdiction(&self) -> Option<&str> {
        self.license_jurisdiction.as_deref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn court(&self) -> Option<&str> {
        self.court.as_deref()
    }

    /// Short description used in log fields
    pub fn describe(&self) -> String {
        if let (Some(number), Some(uf)) = (self.license_number(), self.license_jurisdiction()) {
            format!("OAB {number}/{uf}")
        } else if let Some(name) = self.party_name() {
            format!("party '{name}'")
        } else {
            format!("text '{}'", self.text().unwrap_or_default())
        }
    }
}

/// Builder for [`QueryParameters`]
///
/// Setters take raw user input. Blank values are treated as absent; dates are
/// parsed in [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use djen::domain::query::QueryParameters;
///
/// let params = QueryParameters::builder()
///     .license_number("118093")
///     .license_jurisdiction("rj")
///     .start_date("2024-01-01")
///     .end_date("2024-01-31")
///     .build()
///     .unwrap();
///
/// assert_eq!(params.license_jurisdiction(), Some("RJ"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct QueryParametersBuilder {
    party_name: Option<String>,
    license_number: Option<String>,
    license_jurisdiction: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    text: Option<String>,
    court: Option<String>,
}

fn non_blank(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl QueryParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn party_name(mut self, value: impl Into<String>) -> Self {
        self.party_name = non_blank(value);
        self
    }

    pub fn license_number(mut self, value: impl Into<String>) -> Self {
        self.license_number = non_blank(value);
        self
    }

    pub fn license_jurisdiction(mut self, value: impl Into<String>) -> Self {
        self.license_jurisdiction = non_blank(value).map(|uf| uf.to_uppercase());
        self
    }

    pub fn start_date(mut self, value: impl Into<String>) -> Self {
        self.start_date = non_blank(value);
        self
    }

    pub fn end_date(mut self, value: impl Into<String>) -> Self {
        self.end_date = non_blank(value);
        self
    }

    /// Sets both dates from an already validated range
    pub fn date_range(mut self, range: &DateRange) -> Self {
        self.start_date = Some(range.start().format(DATE_FORMAT).to_string());
        self.end_date = Some(range.end().format(DATE_FORMAT).to_string());
        self
    }

    pub fn text(mut self, value: impl Into<String>) -> Self {
        self.text = non_blank(value);
        self
    }

    pub fn court(mut self, value: impl Into<String>) -> Self {
        self.court = non_blank(value).filter(|c| c != COURT_SENTINEL);
        self
    }

    /// Validates and builds the parameters
    ///
    /// # Errors
    ///
    /// Returns [`DjenError::Validation`] when no search criterion is given, when a
    /// license number has no jurisdiction, or when the dates are malformed or reversed.
    pub fn build(self) -> Result<QueryParameters> {
        if self.party_name.is_none() && self.license_number.is_none() && self.text.is_none() {
            return Err(DjenError::Validation(
                "At least one of party name, OAB number or text is required".to_string(),
            ));
        }

        if self.license_number.is_some() && self.license_jurisdiction.is_none() {
            return Err(DjenError::Validation(
                "OAB state (UF) is required when an OAB number is given".to_string(),
            ));
        }

        let start_date = self
            .start_date
            .as_deref()
            .map(|d| parse_date("start date", d))
            .transpose()?;
        let end_date = self
            .end_date
            .as_deref()
            .map(|d| parse_date("end date", d))
            .transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            DateRange::new(start, end)?;
        }

        Ok(QueryParameters {
            party_name: self.party_name,
            license_number: self.license_number,
            license_jurisdiction: self.license_jurisdiction,
            start_date,
            end_date,
            text: self.text,
            court: self.court,
        })
    }
}
