use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use shared::models::HistoryFilters;
use shared::{tokens, Error, Result};

/// Filters the history view opens with
pub fn initial_filters(limit: u32) -> HistoryFilters {
    HistoryFilters {
        page: Some(1),
        limit: Some(limit),
        symbol: Some(tokens::default_history_symbol().to_string()),
        ..Default::default()
    }
}

/// Raw filter form fields, as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFilterInput {
    pub symbol: String,
    pub sender: String,
    pub receiver: String,
    pub start_time: String,
    pub end_time: String,
}

impl Default for HistoryFilterInput {
    fn default() -> Self {
        Self {
            symbol: tokens::default_history_symbol().to_string(),
            sender: String::new(),
            receiver: String::new(),
            start_time: String::new(),
            end_time: String::new(),
        }
    }
}

impl HistoryFilterInput {
    /// Turn the form into query filters, back on the first page
    pub fn apply(&self, limit: u32) -> Result<HistoryFilters> {
        Ok(HistoryFilters {
            page: Some(1),
            limit: Some(limit),
            symbol: non_empty(&self.symbol),
            sender: non_empty(&self.sender),
            receiver: non_empty(&self.receiver),
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Normalise a timestamp to ISO-8601 UTC with millisecond precision.
///
/// Accepts RFC 3339 or the `datetime-local` form (`YYYY-MM-DDTHH:MM[:SS]`),
/// the latter read as UTC.
fn parse_time(value: &str) -> Result<Option<String>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let parsed = match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .map_err(|_| Error::Validation(format!("Invalid date/time: {}", value)))?,
    };

    Ok(Some(parsed.to_rfc3339_opts(SecondsFormat::Millis, true)))
}
