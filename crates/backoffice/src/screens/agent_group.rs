use api_types::agent_group::{AgentGroupDelete, AgentGroupRow, AgentGroupSave};

use crate::{
    codec::{Endpoint, Payload, to_payload},
    error::Result,
    grid::{Column, GridRow, RowAction},
    page::{Command, Screen},
    screens::{DELETE_PROMPT, opt_cell, optional, record_id, required},
};

pub const LIST: Endpoint = Endpoint::plain("agentGroup_list.php");
pub const SAVE: Endpoint = Endpoint::plain("agentGroup_save.php");
pub const DELETE: Endpoint = Endpoint::plain("agentGroup_delete.php");

pub struct AgentGroups;

impl Screen for AgentGroups {
    type Row = AgentGroupRow;

    const NAME: &'static str = "agent_group";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("id", "ID"),
        Column::new("group_name", "Group"),
        Column::new("description", "Description"),
        Column::new("created_at", "Created"),
    ];
    const ACTIONS: &'static [RowAction] = &[
        RowAction::new("edit", "Edit"),
        RowAction::new("delete", "Delete"),
    ];
}

impl GridRow for AgentGroupRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.group_name.clone(),
            opt_cell(self.description.as_deref()),
            opt_cell(self.created_at.as_deref()),
        ]
    }
}

impl Command for AgentGroupSave {
    fn endpoint(&self) -> Endpoint {
        SAVE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&AgentGroupSave {
            id: optional(self.id.as_deref()),
            group_name: required(&self.group_name, "Please input group name")?,
            description: optional(self.description.as_deref()),
        })
    }
}

impl Command for AgentGroupDelete {
    fn endpoint(&self) -> Endpoint {
        DELETE
    }

    fn payload(&self) -> Result<Payload> {
        to_payload(&AgentGroupDelete {
            id: record_id(&self.id)?,
        })
    }

    fn confirmation(&self) -> Option<String> {
        Some(DELETE_PROMPT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ConsoleError,
        filter::Filter,
        page::{Completion, ListPage},
        testing::{Reply, test_console},
    };
    use serde_json::json;

    #[tokio::test]
    async fn empty_group_name_is_alerted_and_not_sent() {
        let console = test_console(vec![]);
        let mut page = ListPage::<AgentGroups>::new(Filter::default());

        let save = AgentGroupSave {
            id: None,
            group_name: "   ".to_string(),
            description: Some("north".to_string()),
        };
        let err = page.execute(&console, &save).await.unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(_)));
        assert_eq!(console.dialogs().alerts(), vec!["Please input group name"]);
        assert!(console.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn save_posts_trimmed_fields_then_refreshes() {
        let console = test_console(vec![
            Reply::json(json!({ "status": "ok" })),
            Reply::json(json!({
                "status": "ok",
                "records": [{ "id": 4, "group_name": "North%20Region" }]
            })),
        ]);
        let mut page = ListPage::<AgentGroups>::new(Filter::default());

        let save = AgentGroupSave {
            id: Some("".to_string()),
            group_name: " North Region ".to_string(),
            description: None,
        };
        let done = page.execute(&console, &save).await.unwrap();

        assert_eq!(done, Completion::Refreshed(1));
        let requests = console.transport().requests();
        assert_eq!(requests[0].path, "agentGroup_save.php");
        assert_eq!(
            console.transport().fields(0),
            vec![("group_name".to_string(), "North Region".to_string())]
        );
        assert_eq!(requests[1].path, "agentGroup_list.php");
        assert_eq!(page.grid.rows[0].group_name, "North Region");
    }

    #[tokio::test]
    async fn delete_without_id_asks_for_selection() {
        let console = test_console(vec![]);
        let mut page = ListPage::<AgentGroups>::new(Filter::default());

        let err = page
            .execute(&console, &AgentGroupDelete { id: String::new() })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please select a record");
        assert!(console.dialogs().confirms().is_empty());
        assert!(console.transport().requests().is_empty());
    }

    #[test]
    fn cells_follow_columns() {
        let row = AgentGroupRow {
            id: "1".to_string(),
            group_name: "West".to_string(),
            description: None,
            created_at: Some("2024-01-02 10:00:00".to_string()),
        };
        let cells = row.cells();
        assert_eq!(cells.len(), AgentGroups::COLUMNS.len());
        assert_eq!(cells[2], "-");
    }
}
