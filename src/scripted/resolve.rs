//! # Reference Resolution
//!
//! Values may refer to other values. Resolution expands them into plain text
//! in three passes, always in this order:
//!
//! 1. **Inclusion** `@file(name)`: replaced by the named resource's text.
//! 2. **Triple** `bank.register.address`: three ASCII decimal numbers. These are
//!    always base 10, whatever the configured base.
//! 3. **Pair** `<prefix><bank>.<address>`: numerals in the configured base,
//!    always register 1. A pair starting with any other letter is left alone.
//!
//! Each pass cuts the current text into literal and match segments
//! (non-overlapping, left to right) and replaces every match. Included text
//! goes through the later passes; a resolved triple does not, so the pair pass
//! only scans the literal text around triples. Referenced values are resolved recursively, loading
//! banks from storage on first use.
//!
//! ## Cycles
//!
//! Every recursive step carries its own copy of the [`Visited`] keys on the
//! path from the root to that step. A reference whose key is already on the
//! path becomes `[Circular Ref: ...]`. Two independent references converging
//! on the same value (a diamond) are not a cycle and expand normally.
//!
//! ## Failure markers
//!
//! Resolution never fails. Problems become inline markers and the rest of the
//! text is still resolved:
//!
//! | Marker | Cause |
//! |--------|-------|
//! | `[Missing file: name]` | No such resource |
//! | `[Missing 2.1.7]` | Bank, register or address not found |
//! | `[Circular Ref: 2.1.7]` | Reference re-enters its own path |
//! | `[BadRef x0g.1]` | Numeral does not decode |
//! | `[Depth limit: 2.1.7]` | Nesting deeper than `max_depth` |

use crate::codec;
use crate::config::Config;
use crate::error::{Result, ScriptedError};
use crate::model::{AddressId, BankId, RegisterId, DEFAULT_REGISTER};
use crate::store::BankStore;
use crate::workspace::Workspace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

static INCLUDE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@file\(([^)]*)\)").expect("valid include pattern"));
static TRIPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\.([0-9]+)\.([0-9]+)").expect("valid triple pattern"));
static PAIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z])([0-9A-Za-z]+)\.([0-9A-Za-z]+)").expect("valid pair pattern")
});

/// Reference keys on the path from the resolution root to the current step.
///
/// Extending produces a new set; the parent's set is never modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visited(BTreeSet<String>);

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn with(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.insert(key.into());
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Key for a triple reference: `bank.register.address` in decimal.
pub fn triple_key(bank: BankId, reg: RegisterId, addr: AddressId) -> String {
    format!("{bank}.{reg}.{addr}")
}

/// Key for a pair reference: `<prefix><bank>.<address>` in the configured base.
pub fn pair_key(config: &Config, bank: BankId, addr: AddressId) -> String {
    format!(
        "{}{}.{}",
        config.prefix,
        codec::encode(bank, config.base, 0),
        codec::encode(addr, config.base, 0)
    )
}

/// One entry of a bank with its resolved value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    pub register: RegisterId,
    pub address: AddressId,
    pub raw: String,
    pub resolved: String,
}

enum Segment<'t> {
    Literal(&'t str),
    Match(Captures<'t>),
}

/// Cut `text` into literal runs and non-overlapping matches, left to right.
fn segments<'t>(re: &Regex, text: &'t str) -> Vec<Segment<'t>> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            out.push(Segment::Literal(&text[last..whole.start()]));
        }
        last = whole.end();
        out.push(Segment::Match(caps));
    }
    if last < text.len() {
        out.push(Segment::Literal(&text[last..]));
    }
    out
}

/// A reference that passed syntax checks and now needs a value.
struct Target<'m> {
    matched: &'m str,
    key: String,
    bank: BankId,
    reg: RegisterId,
    addr: AddressId,
}

pub struct Resolver<'w, S: BankStore> {
    workspace: &'w mut Workspace<S>,
    max_depth: usize,
}

impl<'w, S: BankStore> Resolver<'w, S> {
    pub fn new(workspace: &'w mut Workspace<S>) -> Self {
        let max_depth = workspace.config().max_depth;
        Self {
            workspace,
            max_depth,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand every reference in `value`.
    ///
    /// `origin` is the bank the value came from; `visited` holds the keys
    /// already on the path (empty for a fresh resolution).
    pub fn resolve(&mut self, value: &str, origin: BankId, visited: &Visited) -> String {
        self.expand(value, origin, visited, 0)
    }

    /// Resolve the value stored at one cell. The cell's own key seeds the
    /// visited set, so a value that leads back to itself is caught on first
    /// re-entry.
    pub fn resolve_cell(
        &mut self,
        bank: BankId,
        reg: RegisterId,
        addr: AddressId,
    ) -> Result<String> {
        let raw = self
            .workspace
            .ensure_loaded(bank)?
            .get(reg, addr)
            .map(str::to_string)
            .ok_or_else(|| {
                ScriptedError::Api(format!("No value at {}", triple_key(bank, reg, addr)))
            })?;
        let visited = Visited::new().with(triple_key(bank, reg, addr));
        Ok(self.expand(&raw, bank, &visited, 0))
    }

    /// Resolve every entry of a bank, in register then address order.
    pub fn resolve_bank(&mut self, bank: BankId) -> Result<Vec<ResolvedEntry>> {
        let entries: Vec<(RegisterId, AddressId, String)> = self
            .workspace
            .ensure_loaded(bank)?
            .entries()
            .map(|(reg, addr, value)| (reg, addr, value.to_string()))
            .collect();

        debug!(bank, entries = entries.len(), "resolving bank");
        Ok(entries
            .into_iter()
            .map(|(reg, addr, raw)| {
                let visited = Visited::new().with(triple_key(bank, reg, addr));
                let resolved = self.expand(&raw, bank, &visited, 0);
                ResolvedEntry {
                    register: reg,
                    address: addr,
                    raw,
                    resolved,
                }
            })
            .collect())
    }

    fn expand(&mut self, value: &str, origin: BankId, visited: &Visited, depth: usize) -> String {
        trace!(origin, depth, value, "expanding");

        let mut current = String::with_capacity(value.len());
        for seg in segments(&INCLUDE_RE, value) {
            match seg {
                Segment::Literal(s) => current.push_str(s),
                Segment::Match(caps) => current.push_str(&self.include(&caps)),
            }
        }

        // Triple substitutions are already fully resolved, so the pair pass
        // only sees the literal text between them.
        let mut out = String::with_capacity(current.len());
        for seg in segments(&TRIPLE_RE, &current) {
            match seg {
                Segment::Literal(s) => self.expand_pairs(s, visited, depth, &mut out),
                Segment::Match(caps) => out.push_str(&self.triple(&caps, visited, depth)),
            }
        }
        out
    }

    fn expand_pairs(&mut self, text: &str, visited: &Visited, depth: usize, out: &mut String) {
        for seg in segments(&PAIR_RE, text) {
            match seg {
                Segment::Literal(s) => out.push_str(s),
                Segment::Match(caps) => out.push_str(&self.pair(&caps, visited, depth)),
            }
        }
    }

    fn include(&self, caps: &Captures<'_>) -> String {
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        match self.workspace.store().read_named_resource(name) {
            Ok(Some(text)) => text,
            Ok(None) => format!("[Missing file: {name}]"),
            Err(e) => {
                warn!(resource = name, error = %e, "cannot read resource");
                format!("[Missing file: {name}]")
            }
        }
    }

    fn triple(&mut self, caps: &Captures<'_>, visited: &Visited, depth: usize) -> String {
        let matched = &caps[0];
        let numbers = (
            codec::decode(&caps[1], 10),
            codec::decode(&caps[2], 10),
            codec::decode(&caps[3], 10),
        );
        let (Ok(bank), Ok(reg), Ok(addr)) = numbers else {
            return format!("[BadRef {matched}]");
        };
        self.follow(
            Target {
                matched,
                key: triple_key(bank, reg, addr),
                bank,
                reg,
                addr,
            },
            visited,
            depth,
        )
    }

    fn pair(&mut self, caps: &Captures<'_>, visited: &Visited, depth: usize) -> String {
        let matched = &caps[0];
        let config = self.workspace.config();
        if !caps[1].starts_with(config.prefix) {
            return matched.to_string();
        }

        let (Ok(bank), Ok(addr)) = (
            codec::decode(&caps[2], config.base),
            codec::decode(&caps[3], config.base),
        ) else {
            return format!("[BadRef {matched}]");
        };
        let key = pair_key(config, bank, addr);
        self.follow(
            Target {
                matched,
                key,
                bank,
                reg: DEFAULT_REGISTER,
                addr,
            },
            visited,
            depth,
        )
    }

    fn follow(&mut self, target: Target<'_>, visited: &Visited, depth: usize) -> String {
        if visited.contains(&target.key) {
            debug!(key = %target.key, "circular reference");
            return format!("[Circular Ref: {}]", target.matched);
        }
        if depth >= self.max_depth {
            warn!(key = %target.key, depth, "reference nesting too deep");
            return format!("[Depth limit: {}]", target.matched);
        }

        let raw = match self.workspace.ensure_loaded(target.bank) {
            Ok(bank) => bank.get(target.reg, target.addr).map(str::to_string),
            Err(ScriptedError::MissingContext(_)) => None,
            Err(e) => {
                warn!(bank = target.bank, error = %e, "cannot load referenced bank");
                None
            }
        };
        let Some(raw) = raw else {
            return format!("[Missing {}]", target.matched);
        };

        let next = visited.with(target.key);
        self.expand(&raw, target.bank, &next, depth + 1)
    }
}
