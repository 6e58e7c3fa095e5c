//! # Storage Layer
//!
//! The [`BankStore`] trait is everything the core needs from its environment:
//! reading and writing bank documents by id, reading named resources for
//! `@file(...)` inclusion, and writing export artefacts.
//!
//! A store knows the deterministic location of every bank (prefix plus padded
//! id, e.g. `x00001.txt`), so it carries its own copy of the
//! [`Config`](crate::config::Config).
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── config.json          # Configuration
//! ├── x00001.txt           # Bank documents
//! ├── <resources>          # Targets of @file(name)
//! └── out/                 # Export artefacts (resolved text, JSON)
//! ```
//!
//! ## Implementations
//!
//! - [`fs::FsStore`]: Production store over a directory.
//! - [`memory::MemStore`]: For testing logic without filesystem I/O.
//!
//! Writes are whole-document overwrites; there are no transactions.

use crate::error::Result;
use crate::model::BankId;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Directory (relative to the store root) that export artefacts go to.
pub const OUTPUT_DIR: &str = "out";

/// Abstract interface for bank storage I/O.
///
/// All methods take `&self`; stores that keep state use interior mutability.
pub trait BankStore {
    /// True if a document exists for the bank.
    fn exists(&self, id: BankId) -> bool;

    /// Read the raw document for a bank.
    /// Returns Ok(None) if there is none, Err only on actual I/O errors.
    fn read_bank_text(&self, id: BankId) -> Result<Option<String>>;

    /// Overwrite the document for a bank.
    fn write_bank_text(&self, id: BankId, text: &str) -> Result<()>;

    /// Read an external resource by name (the target of `@file(name)`).
    /// Returns Ok(None) if there is no such resource.
    fn read_named_resource(&self, name: &str) -> Result<Option<String>>;

    /// Where the document for a bank lives (whether or not it exists yet).
    fn bank_location(&self, id: BankId) -> PathBuf;

    /// Ids of all bank documents present in storage, ascending.
    fn list_bank_ids(&self) -> Result<Vec<BankId>>;

    /// Write an export artefact and return where it went.
    fn write_output(&self, name: &str, text: &str) -> Result<PathBuf>;
}
