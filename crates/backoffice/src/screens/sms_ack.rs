use api_types::sms_ack::SmsAckRow;

use crate::{
    codec::{Endpoint, Payload},
    error::Result,
    filter::Filter,
    grid::{Column, Grid, GridRow, Rgb},
    page::Screen,
    screens::opt_cell,
};

pub const LIST: Endpoint = Endpoint::plain("smsAckLog_list.php");

/// Read-only log of SMS delivery acknowledgements.
pub struct SmsAckLog;

impl Screen for SmsAckLog {
    type Row = SmsAckRow;

    const NAME: &'static str = "sms_ack";
    const LIST: Endpoint = LIST;
    const COLUMNS: &'static [Column] = &[
        Column::new("sent_at", "Sent"),
        Column::new("reference", "Reference"),
        Column::new("account", "Account"),
        Column::new("phone", "Phone"),
        Column::new("ack_status", "Ack"),
        Column::new("ack_at", "Ack at"),
        Column::new("message", "Message"),
    ];

    fn list_payload(filter: &Filter) -> Result<Payload> {
        filter.require_date_range()?;
        Ok(filter.to_payload())
    }
}

impl GridRow for SmsAckRow {
    fn cells(&self) -> Vec<String> {
        vec![
            self.sent_at.clone(),
            self.reference.clone(),
            self.account.clone(),
            self.phone.clone(),
            self.ack_status.clone(),
            opt_cell(self.ack_at.as_deref()),
            self.message.clone(),
        ]
    }
}

/// Rows sharing a transaction reference share a colour.
pub fn group_colors(grid: &Grid<SmsAckRow>) -> Vec<Rgb> {
    grid.group_colors(|row| row.reference.as_str())
}
