//! Client side of the payment back-office console.
//!
//! Every screen is a filterable grid over one backend list endpoint plus a
//! handful of mutations. Requests are form-encoded POSTs; sensitive
//! endpoints carry their payload AES-GCM sealed in a single `data` field.
pub use crate::codec::{Encoding, Endpoint, EnvelopeCodec, Payload};
pub use crate::config::ConsoleConfig;
pub use crate::console::Console;
pub use crate::crypto::{Cipher, CipherError, SharedSecretCipher, Unkeyed};
pub use crate::dialogs::Dialogs;
pub use crate::error::{ConsoleError, Result};
pub use crate::filter::{DateRange, Filter};
pub use crate::grid::{Column, Grid, GridRow, Rgb, RowAction, group_color};
pub use crate::navigation::{Route, Router};
pub use crate::page::{Command, Completion, ListPage, NextStep, Screen};
pub use crate::status::{Outcome, classify};
pub use crate::transport::{HttpTransport, Request, Transport};

pub mod codec;
pub mod config;
pub mod console;
pub mod crypto;
pub mod dialogs;
pub mod error;
pub mod filter;
pub mod grid;
pub mod navigation;
pub mod page;
pub mod screens;
pub mod status;
pub mod transport;

#[cfg(test)]
mod testing;
