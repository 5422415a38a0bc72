//! Concrete back-office screens.
//!
//! Each screen is a [`Screen`](crate::page::Screen) marker plus the
//! [`Command`](crate::page::Command)s its grid offers. Commands are
//! implemented directly on the request types from `api_types`.
pub mod adjustment;
pub mod agent_group;
pub mod bank_account;
pub mod callback;
pub mod merchant;
pub mod sms_ack;
pub mod whitelist;

use crate::error::{ConsoleError, Result};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this record?";

/// Trimmed value, or a validation error carrying `message` when blank.
fn required(value: &str, message: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConsoleError::Validation(message.to_string()));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn record_id(id: &str) -> Result<String> {
    required(id, "Please select a record")
}

fn opt_cell(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("  M001 ", "x").unwrap(), "M001");
        let err = required(" \t", "Please input merchant code").unwrap_err();
        assert_eq!(err.to_string(), "Please input merchant code");
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some("  ")), None);
        assert_eq!(optional(Some(" a ")), Some("a".to_string()));
        assert_eq!(optional(None), None);
    }
}
