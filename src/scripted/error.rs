use crate::model::BankId;
use std::fmt;
use thiserror::Error;

/// The grammar rule a bank document broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    EmptyInput,
    MissingBrace,
    BadBankId,
    InvalidRegisterLine,
    InvalidAddressId,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseErrorKind::EmptyInput => "empty input",
            ParseErrorKind::MissingBrace => "missing '{'",
            ParseErrorKind::BadBankId => "bad bank id",
            ParseErrorKind::InvalidRegisterLine => "invalid register line",
            ParseErrorKind::InvalidAddressId => "invalid address id",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub detail: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("empty numeral")]
    Empty,

    #[error("invalid digit '{digit}' for base {base}")]
    InvalidDigit { digit: char, base: u32 },

    #[error("numeral overflows: {0}")]
    Overflow(String),
}

#[derive(Error, Debug)]
pub enum ScriptedError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Bad numeral: {0}")]
    Codec(#[from] CodecError),

    #[error("No bank content for id {0}")]
    MissingContext(BankId),

    #[error("Bank {0} is not loaded")]
    NotLoaded(BankId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ScriptedError>;
