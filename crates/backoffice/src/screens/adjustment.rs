use std::time::Duration;

use api_types::adjustment::{AdjustmentExecute, AdjustmentRow};

use crate::{
    codec::{Endpoint, Payload, to_payload},
    error::{ConsoleError, Result},
    filter::Filter,
    grid::{Column, GridRow},
    page::{Command, Screen},
    screens::{opt_cell, required},
};

pub const LIST: Endpoint = Endpoint::encrypted("transactionAdjustment_list.php");
/// Balance recalculation on the backend can take a while.
pub const EXECUTE: Endpoint = Endpoint::encrypted("transactionAdjustment_execute.php")
    .with_timeout(Duration::from_secs(120));

/// Manual credit/debit adjustments on agent accounts.
pub struct Adjustments;

impl Screen for Adjustments {
    type Row = AdjustmentRow;

    const NAME: &'static str = "adjustment";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("id", "ID"),
        Column::new("created_at", "Created"),
        Column::new("account", "Account"),
        Column::new("amount", "Amount"),
        Column::new("reason", "Reason"),
        Column::new("operator", "Operator"),
    ];

    fn list_payload(filter: &Filter) -> Result<Payload> {
        filter.require_date_range()?;
        Ok(filter.to_payload())
    }
}

impl GridRow for AdjustmentRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.created_at.clone(),
            self.account.clone(),
            self.amount.clone(),
            self.reason.clone(),
            opt_cell(self.operator.as_deref()),
        ]
    }
}

/// Signed decimal with at most two fraction digits, `+` dropped.
fn normalize_amount(raw: &str) -> Result<String> {
    let raw = required(raw, "Please input amount")?;
    let invalid = || ConsoleError::Validation("Invalid amount".to_string());

    let unsigned = raw
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(raw.as_str());
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) {
        return Err(invalid());
    }
    if let Some(fraction) = fraction {
        if !digits(fraction) || fraction.len() > 2 {
            return Err(invalid());
        }
    }

    let zero = |part: &str| part.bytes().all(|b| b == b'0');
    if zero(whole) && fraction.is_none_or(zero) {
        return Err(ConsoleError::Validation(
            "Amount must not be zero".to_string(),
        ));
    }

    Ok(raw.trim_start_matches('+').to_string())
}

impl Command for AdjustmentExecute {
    fn endpoint(&self) -> Endpoint {
        EXECUTE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&AdjustmentExecute {
            account: required(&self.account, "Please input account")?,
            amount: normalize_amount(&self.amount)?,
            reason: required(&self.reason, "Please input reason")?,
        })
    }

    fn confirmation(&self) -> Option<String> {
        Some(format!(
            "Execute adjustment of {} on account {}?",
            self.amount.trim().trim_start_matches('+'),
            self.account.trim()
        ))
    }
}
