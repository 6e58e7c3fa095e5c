//! # Workspace
//!
//! The set of banks loaded during a run, keyed by bank id.
//!
//! - Banks are loaded lazily through the [`BankStore`], once, and stay resident
//!   until the workspace is dropped. There is no eviction.
//! - A failed load is not remembered: the next request probes storage again.
//! - Each loaded bank remembers where it came from so [`Workspace::save`] can
//!   write it back.
//! - Mutations mark the bank dirty until it is saved.
//!
//! The workspace is not synchronized. Callers serialize mutation against any
//! resolution in flight (a [`Resolver`](crate::resolve::Resolver) holds
//! `&mut Workspace` for its whole pass, so the borrow checker does this for
//! in-process callers).

use crate::config::Config;
use crate::error::{Result, ScriptedError};
use crate::format::{parse_bank, write_bank};
use crate::model::{AddressId, Bank, BankId, RegisterId};
use crate::store::BankStore;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub struct Workspace<S: BankStore> {
    store: S,
    config: Config,
    banks: BTreeMap<BankId, Bank>,
    sources: BTreeMap<BankId, PathBuf>,
    dirty: BTreeSet<BankId>,
}

impl<S: BankStore> Workspace<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            store,
            config,
            banks: BTreeMap::new(),
            sources: BTreeMap::new(),
            dirty: BTreeSet::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_loaded(&self, id: BankId) -> bool {
        self.banks.contains_key(&id)
    }

    pub fn bank(&self, id: BankId) -> Option<&Bank> {
        self.banks.get(&id)
    }

    pub fn banks(&self) -> impl Iterator<Item = &Bank> {
        self.banks.values()
    }

    pub fn ids(&self) -> Vec<BankId> {
        self.banks.keys().copied().collect()
    }

    pub fn source(&self, id: BankId) -> Option<&Path> {
        self.sources.get(&id).map(PathBuf::as_path)
    }

    pub fn lookup(&self, bank: BankId, reg: RegisterId, addr: AddressId) -> Option<&str> {
        self.banks.get(&bank).and_then(|b| b.get(reg, addr))
    }

    /// Make sure a bank is resident, reading it from storage on first use.
    ///
    /// Fails with [`ScriptedError::MissingContext`] when storage has no document
    /// for the bank, or with a parse error when the document is malformed.
    pub fn ensure_loaded(&mut self, id: BankId) -> Result<&Bank> {
        self.load(id)?;
        self.banks.get(&id).ok_or(ScriptedError::NotLoaded(id))
    }

    /// Like [`ensure_loaded`](Self::ensure_loaded), but a bank with no document
    /// is created fresh (empty register 1, title `new`) and marked dirty.
    pub fn open(&mut self, id: BankId) -> Result<&Bank> {
        match self.load(id) {
            Ok(_) => {}
            Err(ScriptedError::MissingContext(_)) => {
                debug!(bank = id, "no document, creating a fresh bank");
                self.banks.insert(id, Bank::fresh(id));
                self.sources.insert(id, self.store.bank_location(id));
                self.dirty.insert(id);
            }
            Err(e) => return Err(e),
        }
        self.banks.get(&id).ok_or(ScriptedError::NotLoaded(id))
    }

    /// Load every bank storage knows about. Documents that fail to parse are
    /// skipped. Returns how many banks were newly loaded.
    pub fn preload_all(&mut self) -> Result<usize> {
        let mut loaded = 0;
        for id in self.store.list_bank_ids()? {
            match self.load(id) {
                Ok(true) => loaded += 1,
                Ok(false) => {}
                Err(e) => warn!(bank = id, error = %e, "skipping bank during preload"),
            }
        }
        Ok(loaded)
    }

    /// Insert or overwrite a value in a loaded bank.
    ///
    /// Values are single lines without `}`, which closes a bank body.
    pub fn insert(
        &mut self,
        bank: BankId,
        reg: RegisterId,
        addr: AddressId,
        value: impl Into<String>,
    ) -> Result<()> {
        let value = value.into();
        if let Some(c) = value.chars().find(|c| matches!(c, '}' | '\n' | '\r')) {
            return Err(ScriptedError::InvalidValue(format!(
                "{c:?} may not appear in a value: {value:?}"
            )));
        }
        self.banks
            .get_mut(&bank)
            .ok_or(ScriptedError::NotLoaded(bank))?
            .insert(reg, addr, value);
        self.dirty.insert(bank);
        Ok(())
    }

    /// Remove a value. Returns false if there was nothing to remove.
    pub fn delete(&mut self, bank: BankId, reg: RegisterId, addr: AddressId) -> bool {
        let removed = self
            .banks
            .get_mut(&bank)
            .and_then(|b| b.remove(reg, addr))
            .is_some();
        if removed {
            self.dirty.insert(bank);
        }
        removed
    }

    /// Write a loaded bank back to storage in canonical form.
    pub fn save(&mut self, id: BankId) -> Result<PathBuf> {
        let bank = self.banks.get(&id).ok_or(ScriptedError::NotLoaded(id))?;
        let text = write_bank(bank, &self.config);
        self.store.write_bank_text(id, &text)?;
        self.dirty.remove(&id);

        let location = self
            .sources
            .entry(id)
            .or_insert_with(|| self.store.bank_location(id));
        Ok(location.clone())
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_bank_dirty(&self, id: BankId) -> bool {
        self.dirty.contains(&id)
    }

    /// Returns true if the bank was read from storage by this call.
    fn load(&mut self, id: BankId) -> Result<bool> {
        if self.banks.contains_key(&id) {
            return Ok(false);
        }

        let text = self
            .store
            .read_bank_text(id)?
            .ok_or(ScriptedError::MissingContext(id))?;
        let mut bank = parse_bank(&text, &self.config)?;
        if bank.id != id {
            warn!(
                bank = id,
                header = bank.id,
                "document header names a different bank, keeping the storage id"
            );
            bank.id = id;
        }

        debug!(bank = id, entries = bank.entry_count(), "loaded bank");
        self.sources.insert(id, self.store.bank_location(id));
        self.banks.insert(id, bank);
        Ok(true)
    }
}
