use chrono::NaiveDate;
use serde_json::Value;

use crate::{
    codec::Payload,
    error::{ConsoleError, Result},
};

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inclusive calendar date range, sent as whole days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(ConsoleError::Validation(
                "From date must not be later than to date".to_string(),
            ));
        }
        Ok(Self { from, to })
    }

    /// `YYYY-MM-DD 00:00:00` of the first day.
    pub fn from_text(&self) -> String {
        self.from
            .and_hms_opt(0, 0, 0)
            .map(|at| at.format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// `YYYY-MM-DD 23:59:59` of the last day.
    pub fn to_text(&self) -> String {
        self.to
            .and_hms_opt(23, 59, 59)
            .map(|at| at.format(DATE_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// Query parameters of a list page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub date_range: Option<DateRange>,
    pub account: Option<String>,
    pub merchant_code: Option<String>,
    pub search: Option<String>,
}

impl Filter {
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn with_merchant_code(mut self, merchant_code: impl Into<String>) -> Self {
        self.merchant_code = Some(merchant_code.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Fails unless a date range is set.
    pub fn require_date_range(&self) -> Result<DateRange> {
        self.date_range
            .ok_or_else(|| ConsoleError::Validation("Please select a date range".to_string()))
    }

    /// Set fields as request parameters. Blank text counts as unset.
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        if let Some(range) = &self.date_range {
            payload.insert("from_date".to_string(), Value::String(range.from_text()));
            payload.insert("to_date".to_string(), Value::String(range.to_text()));
        }
        insert_text(&mut payload, "account", self.account.as_deref());
        insert_text(&mut payload, "merchant_code", self.merchant_code.as_deref());
        insert_text(&mut payload, "search", self.search.as_deref());
        payload
    }
}

fn insert_text(payload: &mut Payload, key: &str, value: Option<&str>) {
    if let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) {
        payload.insert(key.to_string(), Value::String(value.to_string()));
    }
}
