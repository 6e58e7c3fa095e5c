use super::{BankStore, OUTPUT_DIR};
use crate::codec;
use crate::config::Config;
use crate::error::{Result, ScriptedError};
use crate::model::BankId;
use std::fs;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

const BANK_EXT: &str = ".txt";

/// Directory-backed store: one `<stem>.txt` file per bank under `root`.
pub struct FsStore {
    root: PathBuf,
    config: Config,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bank_filename(&self, id: BankId) -> String {
        format!("{}{}", self.config.bank_stem(id), BANK_EXT)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ScriptedError::Io)?;
        }
        Ok(())
    }

    /// Write via a temp file and rename, so readers never see a partial document.
    fn write_atomic(&self, dir: &Path, target: &Path, content: &str) -> Result<()> {
        self.ensure_dir(dir)?;
        let tmp_path = dir.join(format!(".scripted-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(ScriptedError::Io)?;
        fs::rename(&tmp_path, target).map_err(ScriptedError::Io)?;
        Ok(())
    }

    /// Resource names are relative to the root and may not climb out of it.
    fn resource_path(&self, name: &str) -> Result<PathBuf> {
        let rel = Path::new(name);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if name.is_empty() || escapes {
            return Err(ScriptedError::Store(format!(
                "Resource name must be a relative path inside the store: {name:?}"
            )));
        }
        Ok(self.root.join(rel))
    }

    fn parse_bank_file_name(&self, name: &str) -> Option<BankId> {
        let stem = name.strip_suffix(BANK_EXT)?;
        let token = stem.strip_prefix(self.config.prefix)?;
        codec::decode(token, self.config.base).ok()
    }
}

impl BankStore for FsStore {
    fn exists(&self, id: BankId) -> bool {
        self.bank_location(id).is_file()
    }

    fn read_bank_text(&self, id: BankId) -> Result<Option<String>> {
        let path = self.bank_location(id);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(ScriptedError::Io)?;
        Ok(Some(content))
    }

    fn write_bank_text(&self, id: BankId, text: &str) -> Result<()> {
        let target = self.bank_location(id);
        self.write_atomic(&self.root, &target, text)
    }

    fn read_named_resource(&self, name: &str) -> Result<Option<String>> {
        let path = self.resource_path(name)?;
        if !path.is_file() {
            return Ok(None);
        }
        // Resources are spliced as they are; invalid UTF-8 becomes U+FFFD.
        let bytes = fs::read(path).map_err(ScriptedError::Io)?;
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn bank_location(&self, id: BankId) -> PathBuf {
        self.root.join(self.bank_filename(id))
    }

    fn list_bank_ids(&self) -> Result<Vec<BankId>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(ScriptedError::Io)? {
            let path = entry.map_err(ScriptedError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(id) = path
                .file_name()
                .and_then(|s| s.to_str())
                .and_then(|name| self.parse_bank_file_name(name))
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    fn write_output(&self, name: &str, text: &str) -> Result<PathBuf> {
        let dir = self.root.join(OUTPUT_DIR);
        let target = dir.join(name);
        self.write_atomic(&dir, &target, text)?;
        Ok(target)
    }
}
