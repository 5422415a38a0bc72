use api_types::callback::{CallbackResend, CallbackRow, CallbackSave};
use reqwest::Url;

use crate::{
    codec::{Endpoint, Payload, to_payload},
    error::{ConsoleError, Result},
    grid::{Column, GridRow, RowAction},
    page::{Command, Screen},
    screens::{opt_cell, record_id, required},
};

pub const LIST: Endpoint = Endpoint::encrypted("callbackService_list.php");
pub const SAVE: Endpoint = Endpoint::encrypted("callbackService_save.php");
pub const RESEND: Endpoint = Endpoint::encrypted("callbackService_resend.php");

pub const RESEND_PROMPT: &str = "Resend this callback?";

/// Merchant callback services.
pub struct Callbacks;

impl Screen for Callbacks {
    type Row = CallbackRow;

    const NAME: &'static str = "callback";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("id", "ID"),
        Column::new("merchant_code", "Merchant"),
        Column::new("service_name", "Service"),
        Column::new("callback_url", "Callback URL"),
        Column::new("status", "Status"),
        Column::new("last_attempt_at", "Last attempt"),
        Column::new("retries", "Retries"),
    ];
    const ACTIONS: &'static [RowAction] = &[
        RowAction::new("edit", "Edit URL"),
        RowAction::new("resend", "Resend"),
    ];
}

impl GridRow for CallbackRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.merchant_code.clone(),
            self.service_name.clone(),
            self.callback_url.clone(),
            self.status.clone(),
            opt_cell(self.last_attempt_at.as_deref()),
            opt_cell(self.retries.as_deref()),
        ]
    }
}

fn callback_url(raw: &str) -> Result<String> {
    let raw = required(raw, "Please input callback URL")?;
    match Url::parse(&raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(raw),
        _ => Err(ConsoleError::Validation("Invalid callback URL".to_string())),
    }
}

impl Command for CallbackSave {
    fn endpoint(&self) -> Endpoint {
        SAVE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&CallbackSave {
            id: record_id(&self.id)?,
            callback_url: callback_url(&self.callback_url)?,
        })
    }
}

impl Command for CallbackResend {
    fn endpoint(&self) -> Endpoint {
        RESEND
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&CallbackResend {
            id: record_id(&self.id)?,
        })
    }

    fn confirmation(&self) -> Option<String> {
        Some(RESEND_PROMPT.to_string())
    }
}
