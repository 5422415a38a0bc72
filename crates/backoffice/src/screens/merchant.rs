use api_types::{
    envelope::ResponseEnvelope,
    merchant::{MerchantRow, MerchantSave},
};

use crate::{
    codec::{Endpoint, Payload, to_payload},
    error::Result,
    grid::{Column, GridRow, RowAction},
    navigation::Route,
    page::{Command, NextStep, Screen},
    screens::{opt_cell, optional, required},
};

pub const LIST: Endpoint = Endpoint::encrypted("merchant_list.php");
pub const SAVE: Endpoint = Endpoint::encrypted("merchant_save.php");

/// State the merchant form returns to after a save.
pub const LIST_STATE: &str = "merchant.list";

/// Merchant master data.
pub struct Merchants;

impl Screen for Merchants {
    type Row = MerchantRow;

    const NAME: &'static str = "merchant";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("id", "ID"),
        Column::new("merchant_code", "Code"),
        Column::new("merchant_name", "Name"),
        Column::new("status", "Status"),
        Column::new("contact_email", "Contact"),
        Column::new("created_at", "Created"),
    ];
    const ACTIONS: &'static [RowAction] = &[RowAction::new("edit", "Edit")];
}

impl GridRow for MerchantRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.merchant_code.clone(),
            self.merchant_name.clone(),
            self.status.clone(),
            opt_cell(self.contact_email.as_deref()),
            opt_cell(self.created_at.as_deref()),
        ]
    }
}

impl Command for MerchantSave {
    fn endpoint(&self) -> Endpoint {
        SAVE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&MerchantSave {
            id: optional(self.id.as_deref()),
            merchant_code: required(&self.merchant_code, "Please input merchant code")?,
            merchant_name: required(&self.merchant_name, "Please input merchant name")?,
            status: self.status,
        })
    }

    fn next_step(&self, _envelope: &ResponseEnvelope) -> NextStep {
        NextStep::Navigate(
            Route::new(LIST_STATE).param("merchant_code", self.merchant_code.trim()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        filter::Filter,
        page::{Completion, ListPage},
        testing::{Reply, test_console},
    };
    use api_types::merchant::MerchantStatus;
    use serde_json::json;

    fn save(code: &str, name: &str) -> MerchantSave {
        MerchantSave {
            id: None,
            merchant_code: code.to_string(),
            merchant_name: name.to_string(),
            status: MerchantStatus::Active,
        }
    }

    #[tokio::test]
    async fn list_request_and_response_are_sealed() {
        let console = test_console(vec![Reply::sealed(json!({
            "status": "success",
            "records": [{
                "id": 10,
                "merchant_code": "M010",
                "merchant_name": "Kedai%20Ali",
                "status": 1
            }]
        }))]);
        let mut page = ListPage::<Merchants>::new(Filter::default().with_search("kedai"));

        assert_eq!(page.refresh(&console).await.unwrap(), 1);
        assert_eq!(
            console.transport().sealed_payload(0),
            json!({ "search": "kedai" })
        );
        let row = &page.grid.rows[0];
        assert_eq!(row.merchant_name, "Kedai Ali");
        assert_eq!(row.status, "1");
    }

    #[tokio::test]
    async fn save_navigates_back_to_list() {
        let console = test_console(vec![Reply::sealed(json!({ "status": "ok" }))]);
        let mut page = ListPage::<Merchants>::new(Filter::default());

        let done = page.execute(&console, &save(" M011 ", "Toko Budi")).await.unwrap();

        assert_eq!(done, Completion::Navigated);
        assert_eq!(
            console.transport().sealed_payload(0),
            json!({
                "id": null,
                "merchant_code": "M011",
                "merchant_name": "Toko Budi",
                "status": "active"
            })
        );
        assert_eq!(
            console.router().routes(),
            vec![Route::new(LIST_STATE).param("merchant_code", "M011")]
        );
        assert_eq!(console.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn rejected_save_stays_put() {
        let console = test_console(vec![Reply::sealed(
            json!({ "status": "fail", "message": "Merchant code already exists" }),
        )]);
        let mut page = ListPage::<Merchants>::new(Filter::default());

        assert!(page.execute(&console, &save("M001", "Dup")).await.is_err());
        assert_eq!(
            console.dialogs().alerts(),
            vec!["Merchant code already exists"]
        );
        assert!(console.router().routes().is_empty());
    }

    #[tokio::test]
    async fn plain_failure_on_sealed_endpoint_is_alerted() {
        let console = test_console(vec![Reply::json(json!({
            "status": "fail",
            "message": "Session expired",
            "data": "Session expired"
        }))]);
        let mut page = ListPage::<Merchants>::new(Filter::default());

        let err = page.refresh(&console).await.unwrap_err();

        assert_eq!(err.to_string(), "Session expired");
        assert!(err.is_surfaced());
        assert_eq!(console.dialogs().alerts(), vec!["Session expired"]);
    }

    #[test]
    fn name_is_required() {
        let err = save("M001", "").payload().unwrap_err();
        assert_eq!(err.to_string(), "Please input merchant name");
    }
}
