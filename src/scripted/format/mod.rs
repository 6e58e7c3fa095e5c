//! # Bank Text Format
//!
//! Banks are stored as plain-text documents:
//!
//! ```text
//! x00001	(Greetings){
//! 	0001	Hello, 2.1.7!
//! 	0002	See also x00003.0010
//! 02
//! 	0001	a value in register 2
//! }
//! ```
//!
//! - The header is `<prefix><bank id>`, a tab, the title in parentheses, and `{`.
//! - Unindented body lines are register headers. Before the first one, entries
//!   go to register 1; when register 1 is the only register the writer leaves
//!   its header out.
//! - Indented lines are `<address><TAB><value>`. The value is kept verbatim.
//! - `}` on its own line closes the body.
//!
//! All ids are numerals in the configured base (see [`crate::codec`]).
//! [`parse_bank`] accepts any padding and a space instead of a tab as the
//! address separator; [`write_bank`] always emits the canonical layout, so
//! `parse_bank(&write_bank(&b, c), c) == b`.

mod parse;
mod write;

pub use parse::parse_bank;
pub use write::write_bank;
