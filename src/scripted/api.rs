//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every scripted operation, whatever UI sits on top.
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: bank stems (`x00001`, `00001`, `x00001.txt`) and
//!   register/address numerals in the configured base become integer ids
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal I/O and no formatting.
//!
//! ## Generic Over BankStore
//!
//! - Production: `ScriptedApi<FsStore>`
//! - Testing: `ScriptedApi<MemStore>`
//!
//! ## Testing Strategy
//!
//! API tests check that inputs are normalized and reach the right command.
//! Command logic is tested in the command modules.

use crate::codec;
use crate::commands;
use crate::config::Config;
use crate::error::Result;
use crate::model::{AddressId, BankId, RegisterId, DEFAULT_REGISTER};
use crate::store::BankStore;
use crate::workspace::Workspace;

/// The main API facade for scripted operations.
pub struct ScriptedApi<S: BankStore> {
    workspace: Workspace<S>,
}

impl<S: BankStore> ScriptedApi<S> {
    pub fn new(store: S, config: Config) -> Self {
        Self {
            workspace: Workspace::new(store, config),
        }
    }

    pub fn workspace(&self) -> &Workspace<S> {
        &self.workspace
    }

    pub fn config(&self) -> &Config {
        self.workspace.config()
    }

    pub fn open(&mut self, bank: &str) -> Result<commands::CmdResult> {
        let id = self.bank_id(bank)?;
        commands::open::run(&mut self.workspace, id)
    }

    pub fn preload(&mut self) -> Result<commands::CmdResult> {
        commands::preload::run(&mut self.workspace)
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.workspace)
    }

    pub fn show(&mut self, bank: &str, filter: Option<&str>) -> Result<commands::CmdResult> {
        let id = self.bank_id(bank)?;
        commands::show::run(&mut self.workspace, id, filter)
    }

    pub fn set_entry(
        &mut self,
        bank: &str,
        reg: Option<&str>,
        addr: &str,
        value: &str,
    ) -> Result<commands::CmdResult> {
        let (id, reg, addr) = self.cell(bank, reg, addr)?;
        commands::edit::insert(&mut self.workspace, id, reg, addr, value)
    }

    pub fn delete_entry(
        &mut self,
        bank: &str,
        reg: Option<&str>,
        addr: &str,
    ) -> Result<commands::CmdResult> {
        let (id, reg, addr) = self.cell(bank, reg, addr)?;
        commands::edit::delete(&mut self.workspace, id, reg, addr)
    }

    pub fn save(&mut self, bank: &str) -> Result<commands::CmdResult> {
        let id = self.bank_id(bank)?;
        commands::save::run(&mut self.workspace, id)
    }

    pub fn save_dirty(&mut self) -> Result<commands::CmdResult> {
        commands::save::run_dirty(&mut self.workspace)
    }

    pub fn resolve_bank(
        &mut self,
        bank: &str,
        target: commands::OutputTarget,
    ) -> Result<commands::CmdResult> {
        let id = self.bank_id(bank)?;
        commands::resolve::bank(&mut self.workspace, id, target)
    }

    /// Resolve free text. Pair and triple references are absolute, so the
    /// origin bank only matters for logging; it defaults to bank 0.
    pub fn resolve_value(
        &mut self,
        text: &str,
        origin: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let origin = match origin {
            Some(bank) => self.bank_id(bank)?,
            None => 0,
        };
        commands::resolve::value(&mut self.workspace, text, origin)
    }

    pub fn export_json(
        &mut self,
        bank: &str,
        target: commands::OutputTarget,
    ) -> Result<commands::CmdResult> {
        let id = self.bank_id(bank)?;
        commands::export::run(&mut self.workspace, id, target)
    }

    pub fn show_config(&self) -> Result<commands::CmdResult> {
        commands::config::run(&self.workspace)
    }

    fn bank_id(&self, input: &str) -> Result<BankId> {
        self.config().parse_bank_stem(input)
    }

    fn cell(
        &self,
        bank: &str,
        reg: Option<&str>,
        addr: &str,
    ) -> Result<(BankId, RegisterId, AddressId)> {
        let base = self.config().base;
        let id = self.bank_id(bank)?;
        let reg = match reg {
            Some(r) => codec::decode(r.trim(), base)?,
            None => DEFAULT_REGISTER,
        };
        let addr = codec::decode(addr.trim(), base)?;
        Ok((id, reg, addr))
    }
}

pub use crate::commands::{
    BankSummary, CmdMessage, CmdResult, EntryRow, MessageLevel, OutputTarget,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptedError;
    use crate::store::memory::MemStore;

    fn api() -> ScriptedApi<MemStore> {
        let store = MemStore::default().with_bank(1, "x00001\t(Doc){\n\t0001\tHello\n}\n");
        ScriptedApi::new(store, Config::default())
    }

    #[test]
    fn test_bank_stem_forms() {
        let mut api = api();
        for stem in ["x00001", "00001", "x00001.txt", "1"] {
            let result = api.show(stem, None).unwrap();
            assert_eq!(result.banks[0].id, 1, "stem {stem}");
        }
    }

    #[test]
    fn test_bad_bank_stem() {
        let mut api = api();
        let err = api.show("xzz", None).unwrap_err();
        assert!(matches!(err, ScriptedError::Codec(_)));
    }

    #[test]
    fn test_set_defaults_to_register_one() {
        let mut api = api();
        api.set_entry("x00001", None, "0002", "world").unwrap();
        assert_eq!(api.workspace().lookup(1, 1, 2), Some("world"));
    }

    #[test]
    fn test_numerals_use_configured_base() {
        let config = Config {
            base: 16,
            ..Default::default()
        };
        let store = MemStore::new(config.clone()).with_bank(1, "x00001\t(t){\n}\n");
        let mut api = ScriptedApi::new(store, config);

        api.set_entry("x00001", Some("a"), "ff", "v").unwrap();
        assert_eq!(api.workspace().lookup(1, 10, 255), Some("v"));

        api.delete_entry("x00001", Some("A"), "FF").unwrap();
        assert_eq!(api.workspace().lookup(1, 10, 255), None);
    }

    #[test]
    fn test_set_then_save_dirty() {
        let mut api = api();
        api.set_entry("1", None, "3", "three").unwrap();
        let result = api.save_dirty().unwrap();
        assert_eq!(result.paths.len(), 1);
        assert!(api
            .workspace()
            .store()
            .bank_text(1)
            .unwrap()
            .contains("\t0003\tthree\n"));
    }

    #[test]
    fn test_set_refuses_multiline_or_brace_values() {
        let mut api = api();
        for value in [r#"{"a":1}"#, "a\nb"] {
            let err = api.set_entry("x00001", None, "2", value).unwrap_err();
            assert!(matches!(err, ScriptedError::InvalidValue(_)), "{value:?}");
        }
        assert!(!api.workspace().is_dirty());
    }

    #[test]
    fn test_save_by_stem() {
        let mut api = api();
        api.set_entry("x00001.txt", None, "1", "changed").unwrap();
        let result = api.save("00001").unwrap();
        assert_eq!(
            result.paths,
            vec![std::path::PathBuf::from("memory://x00001.txt")]
        );
        assert!(!api.workspace().is_dirty());
    }

    #[test]
    fn test_resolve_value_without_origin() {
        let mut api = api();
        let result = api.resolve_value("say 1.1.1", None).unwrap();
        assert_eq!(result.output.as_deref(), Some("say Hello"));
    }

    #[test]
    fn test_show_config() {
        let api = api();
        assert_eq!(api.show_config().unwrap().config, Some(Config::default()));
    }
}
