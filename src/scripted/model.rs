//! # Bank Model
//!
//! A **bank** is a numbered document holding registers of addressed values:
//!
//! ```text
//! Bank { id, title, registers: { reg_id: { addr_id: value } } }
//! ```
//!
//! Both levels are `BTreeMap`s so iteration is always in ascending numeric
//! order, which is the order the serializer writes and the resolver walks.
//!
//! Values are raw text and may themselves contain reference syntax; nothing in
//! the model interprets them.

use std::collections::BTreeMap;

pub type BankId = i64;
pub type RegisterId = i64;
pub type AddressId = i64;

/// Register used when a document has no register header, and the only
/// register pair references can reach.
pub const DEFAULT_REGISTER: RegisterId = 1;

/// Title given to banks synthesized on open when storage has nothing yet.
pub const NEW_BANK_TITLE: &str = "new";

pub type Register = BTreeMap<AddressId, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bank {
    pub id: BankId,
    pub title: String,
    pub registers: BTreeMap<RegisterId, Register>,
}

impl Bank {
    pub fn new(id: BankId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            registers: BTreeMap::new(),
        }
    }

    /// The minimal bank used when a referenced or opened bank has no content:
    /// an empty default register and the title `new`.
    pub fn fresh(id: BankId) -> Self {
        let mut bank = Self::new(id, NEW_BANK_TITLE);
        bank.registers.insert(DEFAULT_REGISTER, Register::new());
        bank
    }

    pub fn get(&self, reg: RegisterId, addr: AddressId) -> Option<&str> {
        self.registers
            .get(&reg)
            .and_then(|r| r.get(&addr))
            .map(String::as_str)
    }

    /// Insert or overwrite a value, creating the register if needed.
    /// Returns the previous value, if any.
    pub fn insert(
        &mut self,
        reg: RegisterId,
        addr: AddressId,
        value: impl Into<String>,
    ) -> Option<String> {
        self.registers
            .entry(reg)
            .or_default()
            .insert(addr, value.into())
    }

    /// Remove a single entry. The register itself is kept even when it becomes empty.
    pub fn remove(&mut self, reg: RegisterId, addr: AddressId) -> Option<String> {
        self.registers.get_mut(&reg).and_then(|r| r.remove(&addr))
    }

    /// Every `(register, address, value)` in ascending order.
    pub fn entries(&self) -> impl Iterator<Item = (RegisterId, AddressId, &str)> + '_ {
        self.registers.iter().flat_map(|(reg, addrs)| {
            addrs
                .iter()
                .map(move |(addr, value)| (*reg, *addr, value.as_str()))
        })
    }

    pub fn entry_count(&self) -> usize {
        self.registers.values().map(|r| r.len()).sum()
    }

    /// True when the register header can be left out of the written document.
    pub fn has_implicit_register_only(&self) -> bool {
        self.registers.len() <= 1
            && self
                .registers
                .keys()
                .all(|reg| *reg == DEFAULT_REGISTER)
    }
}
