use api_types::bank_account::{BankAccountDelete, BankAccountRow, BankAccountSave};

use crate::{
    codec::{Endpoint, Payload, to_payload},
    error::Result,
    grid::{Column, GridRow, RowAction},
    page::{Command, Screen},
    screens::{DELETE_PROMPT, opt_cell, optional, record_id, required},
};

pub const LIST: Endpoint = Endpoint::encrypted("bankAccount_list.php");
pub const SAVE: Endpoint = Endpoint::encrypted("bankAccount_save.php");
pub const DELETE: Endpoint = Endpoint::encrypted("bankAccount_delete.php");

/// Settlement bank accounts of merchants.
pub struct BankAccounts;

impl Screen for BankAccounts {
    type Row = BankAccountRow;

    const NAME: &'static str = "bank_account";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("id", "ID"),
        Column::new("merchant_code", "Merchant"),
        Column::new("bank_name", "Bank"),
        Column::new("account_no", "Account no."),
        Column::new("account_name", "Account name"),
        Column::new("status", "Status"),
    ];
    const ACTIONS: &'static [RowAction] = &[
        RowAction::new("edit", "Edit"),
        RowAction::new("delete", "Delete"),
    ];
}

impl GridRow for BankAccountRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.merchant_code.clone(),
            self.bank_name.clone(),
            self.account_no.clone(),
            self.account_name.clone(),
            opt_cell(self.status.as_deref()),
        ]
    }
}

impl Command for BankAccountSave {
    fn endpoint(&self) -> Endpoint {
        SAVE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&BankAccountSave {
            id: optional(self.id.as_deref()),
            merchant_code: required(&self.merchant_code, "Please input merchant code")?,
            bank_name: required(&self.bank_name, "Please input bank name")?,
            account_no: required(&self.account_no, "Please input account number")?,
            account_name: required(&self.account_name, "Please input account name")?,
        })
    }
}

impl Command for BankAccountDelete {
    fn endpoint(&self) -> Endpoint {
        DELETE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&BankAccountDelete {
            id: record_id(&self.id)?,
        })
    }

    fn confirmation(&self) -> Option<String> {
        Some(DELETE_PROMPT.to_string())
    }
}
