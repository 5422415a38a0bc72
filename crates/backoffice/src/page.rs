//! The list page protocol shared by every screen.
//!
//! A page owns its filter and grid. Fetching replaces the rows wholesale;
//! every successful mutation is followed by exactly one refresh (or a
//! navigation, if the command asks for it). Nothing is patched locally.
use api_types::envelope::ResponseEnvelope;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    codec::{Endpoint, Payload},
    console::Console,
    dialogs::Dialogs,
    error::{ConsoleError, Result},
    filter::Filter,
    grid::{Column, Grid, GridRow, RowAction},
    navigation::{Route, Router},
    status::Outcome,
    transport::Transport,
};

pub trait Screen {
    type Row: DeserializeOwned + GridRow;

    const NAME: &'static str;
    const LIST: Endpoint;
    const COLUMNS: &'static [Column];
    const ACTIONS: &'static [RowAction] = &[];

    /// Builds the list request; a `Validation` error stops the fetch.
    fn list_payload(filter: &Filter) -> Result<Payload> {
        Ok(filter.to_payload())
    }
}

/// What happens after a command succeeded.
#[derive(Clone, Debug, PartialEq)]
pub enum NextStep {
    Refresh,
    Navigate(Route),
}

/// A user-triggered mutation: save, delete, execute.
pub trait Command {
    fn endpoint(&self) -> Endpoint;

    /// Validates the input and builds the request mapping.
    fn payload(&self) -> Result<Payload>;

    /// Question asked before anything is sent.
    fn confirmation(&self) -> Option<String> {
        None
    }

    fn next_step(&self, _envelope: &ResponseEnvelope) -> NextStep {
        NextStep::Refresh
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The list was refetched and now holds this many rows.
    Refreshed(usize),
    Navigated,
    /// The command went through but the follow-up refresh failed. The
    /// refresh error was already alerted or logged; rows are unchanged.
    Applied,
    /// The operator declined the confirmation; nothing was sent.
    Cancelled,
}

pub struct ListPage<S: Screen> {
    pub filter: Filter,
    pub grid: Grid<S::Row>,
    /// Advisory only; it does not block a second fetch.
    pub loading: bool,
}

impl<S: Screen> ListPage<S> {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            grid: Grid::new(S::COLUMNS, S::ACTIONS),
            loading: false,
        }
    }

    pub async fn refresh<T, D, R>(&mut self, console: &Console<T, D, R>) -> Result<usize>
    where
        T: Transport,
        D: Dialogs,
        R: Router,
    {
        let payload = S::list_payload(&self.filter).map_err(|err| surface(console, err))?;

        self.loading = true;
        let outcome = console.call(S::LIST, &payload).await;
        self.loading = false;

        match outcome? {
            Outcome::Success(envelope) => {
                let rows = parse_rows::<S::Row>(envelope).inspect_err(|err| {
                    tracing::error!(screen = S::NAME, "unexpected row shape: {err}");
                })?;
                tracing::debug!(screen = S::NAME, rows = rows.len(), "list refreshed");
                self.grid.replace(rows);
                Ok(self.grid.len())
            }
            Outcome::Failure { message } => Err(reject(console, message)),
        }
    }

    pub async fn execute<C, T, D, R>(
        &mut self,
        console: &Console<T, D, R>,
        command: &C,
    ) -> Result<Completion>
    where
        C: Command,
        T: Transport,
        D: Dialogs,
        R: Router,
    {
        let payload = command.payload().map_err(|err| surface(console, err))?;

        if let Some(question) = command.confirmation() {
            if !console.dialogs().confirm(&question) {
                return Ok(Completion::Cancelled);
            }
        }

        let endpoint = command.endpoint();
        match console.call(endpoint, &payload).await? {
            Outcome::Success(envelope) => {
                tracing::info!(screen = S::NAME, path = endpoint.path, "command succeeded");
                match command.next_step(&envelope) {
                    NextStep::Refresh => match self.refresh(console).await {
                        Ok(rows) => Ok(Completion::Refreshed(rows)),
                        Err(err) => {
                            tracing::warn!(
                                screen = S::NAME,
                                "command applied, list not refreshed: {err}"
                            );
                            Ok(Completion::Applied)
                        }
                    },
                    NextStep::Navigate(route) => {
                        tracing::debug!(route = %route.name, "navigating");
                        console.router().go(route);
                        Ok(Completion::Navigated)
                    }
                }
            }
            Outcome::Failure { message } => Err(reject(console, message)),
        }
    }
}

/// Shows validation errors to the operator and hands the error back.
fn surface<T, D: Dialogs, R>(console: &Console<T, D, R>, err: ConsoleError) -> ConsoleError {
    if let ConsoleError::Validation(message) = &err {
        console.dialogs().alert(message);
    }
    err
}

fn reject<T, D: Dialogs, R>(console: &Console<T, D, R>, message: String) -> ConsoleError {
    console.dialogs().alert(&message);
    ConsoleError::Rejected(message)
}

/// Rows live in `records`, or in `data` as an array or as `{records: [...]}`.
fn row_values(envelope: ResponseEnvelope) -> Vec<Value> {
    if let Some(records) = envelope.records {
        return records;
    }
    match envelope.data {
        Some(Value::Array(rows)) => rows,
        Some(Value::Object(mut map)) => match map.remove("records") {
            Some(Value::Array(rows)) => rows,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn parse_rows<R: DeserializeOwned>(envelope: ResponseEnvelope) -> Result<Vec<R>> {
    row_values(envelope)
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(ConsoleError::from))
        .collect()
}
