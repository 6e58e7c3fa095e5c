use super::{BankStore, OUTPUT_DIR};
use crate::config::Config;
use crate::error::{Result, ScriptedError};
use crate::model::BankId;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// In-memory store for testing.
///
/// Uses `RefCell` for interior mutability since the engine is single-threaded,
/// which lets the `BankStore` trait keep `&self` for every method.
pub struct MemStore {
    config: Config,
    banks: RefCell<BTreeMap<BankId, String>>,
    resources: RefCell<HashMap<String, String>>,
    outputs: RefCell<HashMap<String, String>>,
    reads: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MemStore {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            banks: RefCell::new(BTreeMap::new()),
            resources: RefCell::new(HashMap::new()),
            outputs: RefCell::new(HashMap::new()),
            reads: Cell::new(0),
            simulate_write_error: Cell::new(false),
        }
    }

    pub fn with_bank(self, id: BankId, text: impl Into<String>) -> Self {
        self.banks.borrow_mut().insert(id, text.into());
        self
    }

    pub fn with_resource(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.resources.borrow_mut().insert(name.into(), text.into());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of bank documents read so far.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    pub fn bank_text(&self, id: BankId) -> Option<String> {
        self.banks.borrow().get(&id).cloned()
    }

    pub fn output(&self, name: &str) -> Option<String> {
        self.outputs.borrow().get(name).cloned()
    }
}

impl BankStore for MemStore {
    fn exists(&self, id: BankId) -> bool {
        self.banks.borrow().contains_key(&id)
    }

    fn read_bank_text(&self, id: BankId) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.banks.borrow().get(&id).cloned())
    }

    fn write_bank_text(&self, id: BankId, text: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(ScriptedError::Store("Simulated write error".to_string()));
        }
        self.banks.borrow_mut().insert(id, text.to_string());
        Ok(())
    }

    fn read_named_resource(&self, name: &str) -> Result<Option<String>> {
        Ok(self.resources.borrow().get(name).cloned())
    }

    fn bank_location(&self, id: BankId) -> PathBuf {
        PathBuf::from(format!("memory://{}.txt", self.config.bank_stem(id)))
    }

    fn list_bank_ids(&self) -> Result<Vec<BankId>> {
        Ok(self.banks.borrow().keys().copied().collect())
    }

    fn write_output(&self, name: &str, text: &str) -> Result<PathBuf> {
        if self.simulate_write_error.get() {
            return Err(ScriptedError::Store("Simulated write error".to_string()));
        }
        self.outputs
            .borrow_mut()
            .insert(name.to_string(), text.to_string());
        Ok(PathBuf::from(format!("memory://{OUTPUT_DIR}/{name}")))
    }
}
