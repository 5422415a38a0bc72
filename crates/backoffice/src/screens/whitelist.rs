use std::net::IpAddr;

use api_types::whitelist::{WhitelistAdd, WhitelistDelete, WhitelistEntryRow};

use crate::{
    codec::{Endpoint, Payload, to_payload},
    error::{ConsoleError, Result},
    grid::{Column, GridRow, RowAction},
    page::{Command, Screen},
    screens::{DELETE_PROMPT, opt_cell, optional, record_id, required},
};

pub const LIST: Endpoint = Endpoint::plain("whitelistMerchantIp_list.php");
pub const ADD: Endpoint = Endpoint::plain("whitelistMerchantIp_add.php");
pub const DELETE: Endpoint = Endpoint::plain("whitelistMerchantIp_delete.php");

/// Merchant IP whitelist.
pub struct Whitelist;

impl Screen for Whitelist {
    type Row = WhitelistEntryRow;

    const NAME: &'static str = "whitelist";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("id", "ID"),
        Column::new("merchant_code", "Merchant"),
        Column::new("ip_address", "IP address"),
        Column::new("remark", "Remark"),
        Column::new("created_at", "Created"),
    ];
    const ACTIONS: &'static [RowAction] = &[RowAction::new("delete", "Delete")];
}

impl GridRow for WhitelistEntryRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.merchant_code.clone(),
            self.ip_address.clone(),
            opt_cell(self.remark.as_deref()),
            opt_cell(self.created_at.as_deref()),
        ]
    }
}

impl Command for WhitelistAdd {
    fn endpoint(&self) -> Endpoint {
        ADD
    }

    fn payload(&self) -> Result<Payload> {
        let merchant_code = required(&self.merchant_code, "Please input merchant code")?;
        let ip_address = required(&self.ip_address, "Please input IP address")?;
        if ip_address.parse::<IpAddr>().is_err() {
            return Err(ConsoleError::Validation("Invalid IP address".to_string()));
        }

        to_payload(&WhitelistAdd {
            merchant_code,
            ip_address,
            remark: optional(self.remark.as_deref()),
        })
    }
}

impl Command for WhitelistDelete {
    fn endpoint(&self) -> Endpoint {
        DELETE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&WhitelistDelete {
            id: record_id(&self.id)?,
        })
    }

    fn confirmation(&self) -> Option<String> {
        Some(DELETE_PROMPT.to_string())
    }
}
