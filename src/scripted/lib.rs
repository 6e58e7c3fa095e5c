//! # Scripted Architecture
//!
//! Scripted keeps numbered "banks" of short text values in plain-text files and
//! expands the cross-references between them. It is a library with a thin CLI
//! client on top.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (bank stems, numerals → ids)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - open, preload, list, show, edit, save, resolve, export   │
//! │  - Returns CmdResult, no I/O assumptions                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - workspace: loaded banks, lazy loading, dirty tracking    │
//! │  - resolve: include / triple / pair expansion               │
//! │  - format: bank text grammar, codec: numerals               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract BankStore trait                                 │
//! │  - FsStore (production), MemStore (testing)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Bank Format
//!
//! ```text
//! x00001	(Greetings){
//! 01
//! 	0001	Hello 2.1.7
//! 	0002	see x00002.0003
//! }
//! ```
//!
//! A header line with the bank stem and title, then optional register lines
//! and one indented line per address. See [`format`].
//!
//! ## References
//!
//! Values may contain `@file(name)`, `bank.register.address` (decimal) and
//! `<prefix><bank>.<address>` (configured base, register 1). [`resolve`]
//! expands them recursively, loading banks on demand and replacing anything it
//! cannot follow with a bracketed marker such as `[Missing 9.9.9]`.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests against [`store::memory::MemStore`].
//! 2. **API** (`api.rs`): dispatch and input normalization.
//! 3. **Integration** (`tests/`): `FsStore` on a temp dir and the binary end to end.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`workspace`]: Loaded banks and lazy loading
//! - [`resolve`]: Reference expansion
//! - [`format`]: Parse and write bank documents
//! - [`codec`]: Base 2-36 numerals with zero padding
//! - [`model`]: `Bank` and id types
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod resolve;
pub mod store;
pub mod workspace;
