//! # Command Layer
//!
//! Each operation lives in its own submodule as a plain function over a
//! [`Workspace`](crate::workspace::Workspace). Commands:
//!
//! - Operate on banks, entries and resolved values
//! - Return a structured [`CmdResult`] with data and leveled messages
//! - Never print, never exit, never assume a terminal
//!
//! The UI layer decides how to render a `CmdResult`.
//!
//! ## Testing Strategy
//!
//! Command tests use [`MemStore`](crate::store::memory::MemStore) and check the
//! returned `CmdResult` and the resulting store contents.
//!
//! ## Command Modules
//!
//! - [`open`]: Load a bank, creating it if storage has none
//! - [`preload`]: Load every bank in storage
//! - [`list`]: Summaries of loaded banks
//! - [`show`]: Raw entries of a bank, optionally filtered
//! - [`edit`]: Insert or delete single entries
//! - [`save`]: Write a bank back to storage
//! - [`resolve`]: Fully expand a bank or an arbitrary value
//! - [`export`]: JSON export of a bank with raw and resolved values
//! - [`config`]: Show the active configuration

use crate::config::Config;
use crate::model::{AddressId, Bank, BankId, RegisterId};
use crate::resolve::ResolvedEntry;
use serde::Serialize;
use std::path::PathBuf;

pub mod config;
pub mod edit;
pub mod export;
pub mod list;
pub mod open;
pub mod preload;
pub mod resolve;
pub mod save;
pub mod show;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One line in a bank listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankSummary {
    pub id: BankId,
    pub stem: String,
    pub title: String,
    pub entries: usize,
    pub dirty: bool,
}

impl BankSummary {
    pub fn new(bank: &Bank, config: &Config, dirty: bool) -> Self {
        Self {
            id: bank.id,
            stem: config.bank_stem(bank.id),
            title: bank.title.clone(),
            entries: bank.entry_count(),
            dirty,
        }
    }
}

/// One raw entry of a bank, as shown to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRow {
    pub register: RegisterId,
    pub address: AddressId,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub banks: Vec<BankSummary>,
    pub rows: Vec<EntryRow>,
    pub resolved: Vec<ResolvedEntry>,
    /// Text produced by the command (resolved document, JSON, single value).
    pub output: Option<String>,
    pub paths: Vec<PathBuf>,
    pub config: Option<Config>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_banks(mut self, banks: Vec<BankSummary>) -> Self {
        self.banks = banks;
        self
    }

    pub fn with_rows(mut self, rows: Vec<EntryRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_resolved(mut self, resolved: Vec<ResolvedEntry>) -> Self {
        self.resolved = resolved;
        self
    }

    pub fn with_output(mut self, output: String) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }
}

/// Where a command that produces a document should put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write an artefact through the store.
    Store,
    /// Return the text in [`CmdResult::output`].
    Inline,
}
