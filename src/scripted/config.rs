//! # Configuration
//!
//! Stored as `config.json` in the bank root: a flat JSON object.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `prefix` | `"x"` | Letter that starts pair references and bank file names |
//! | `base` | `10` | Numeral base for ids (2–36) |
//! | `widthBank` | `5` | Zero-pad width for bank ids |
//! | `widthReg` | `2` | Zero-pad width for register ids |
//! | `widthAddr` | `4` | Zero-pad width for address ids |
//! | `maxDepth` | `256` | Maximum nesting of reference expansion |
//!
//! Loading is lenient per field: a missing, mistyped or out-of-range value
//! falls back to its default without affecting the other fields. A file that
//! is not a JSON object at all yields the defaults.

use crate::codec;
use crate::error::{Result, ScriptedError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "config.json";

const DEFAULT_PREFIX: char = 'x';
const DEFAULT_BASE: u32 = 10;
const DEFAULT_WIDTH_BANK: usize = 5;
const DEFAULT_WIDTH_REG: usize = 2;
const DEFAULT_WIDTH_ADDR: usize = 4;
const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub prefix: char,
    pub base: u32,
    pub width_bank: usize,
    pub width_reg: usize,
    pub width_addr: usize,
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX,
            base: DEFAULT_BASE,
            width_bank: DEFAULT_WIDTH_BANK,
            width_reg: DEFAULT_WIDTH_REG,
            width_addr: DEFAULT_WIDTH_ADDR,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Load config from the given directory, or return defaults if not found.
    ///
    /// Only I/O failures other than "not found" are reported.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ScriptedError::Io)?;
        Ok(Self::from_json_str(&content))
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ScriptedError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ScriptedError::Serialization)?;
        fs::write(config_path, content).map_err(ScriptedError::Io)?;
        Ok(())
    }

    pub fn from_json_str(content: &str) -> Self {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            _ => Self::default(),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            prefix: map
                .get("prefix")
                .and_then(Value::as_str)
                .and_then(single_letter)
                .unwrap_or(defaults.prefix),
            base: map
                .get("base")
                .and_then(Value::as_u64)
                .and_then(|b| u32::try_from(b).ok())
                .filter(|b| codec::is_valid_base(*b))
                .unwrap_or(defaults.base),
            width_bank: width_field(map, "widthBank").unwrap_or(defaults.width_bank),
            width_reg: width_field(map, "widthReg").unwrap_or(defaults.width_reg),
            width_addr: width_field(map, "widthAddr").unwrap_or(defaults.width_addr),
            max_depth: width_field(map, "maxDepth")
                .filter(|d| *d > 0)
                .unwrap_or(defaults.max_depth),
        }
    }

    /// The file stem for a bank: prefix plus padded id, e.g. `x00001`.
    pub fn bank_stem(&self, id: i64) -> String {
        format!("{}{}", self.prefix, codec::encode(id, self.base, self.width_bank))
    }

    pub fn reg_label(&self, reg: i64) -> String {
        codec::encode(reg, self.base, self.width_reg)
    }

    pub fn addr_label(&self, addr: i64) -> String {
        codec::encode(addr, self.base, self.width_addr)
    }

    /// Parse a bank reference as typed by a user: `x00001`, `00001`, `x00001.txt`.
    pub fn parse_bank_stem(&self, input: &str) -> Result<i64> {
        let stem = input.trim();
        let stem = stem.strip_suffix(".txt").unwrap_or(stem);
        let token = stem.strip_prefix(self.prefix).unwrap_or(stem);
        Ok(codec::decode(token, self.base)?)
    }
}

fn single_letter(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

fn width_field(map: &Map<String, Value>, key: &str) -> Option<usize> {
    map.get(key)
        .and_then(Value::as_u64)
        .and_then(|w| usize::try_from(w).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.prefix, 'x');
        assert_eq!(config.base, 10);
        assert_eq!(
            (config.width_bank, config.width_reg, config.width_addr),
            (5, 2, 4)
        );
    }

    #[test]
    fn test_full_config_parses() {
        let config = Config::from_json_str(
            r#"{"prefix":"q","base":16,"widthBank":3,"widthReg":1,"widthAddr":2,"maxDepth":8}"#,
        );
        assert_eq!(
            config,
            Config {
                prefix: 'q',
                base: 16,
                width_bank: 3,
                width_reg: 1,
                width_addr: 2,
                max_depth: 8,
            }
        );
    }

    #[test]
    fn test_malformed_fields_fall_back_individually() {
        let config = Config::from_json_str(
            r#"{"prefix":"long","base":99,"widthBank":-1,"widthReg":"3","widthAddr":6}"#,
        );
        assert_eq!(config.prefix, 'x');
        assert_eq!(config.base, 10);
        assert_eq!(config.width_bank, 5);
        assert_eq!(config.width_reg, 2);
        assert_eq!(config.width_addr, 6);
    }

    #[test]
    fn test_non_object_is_all_defaults() {
        assert_eq!(Config::from_json_str("[1,2,3]"), Config::default());
        assert_eq!(Config::from_json_str("not json"), Config::default());
        assert_eq!(Config::from_json_str(""), Config::default());
    }

    #[test]
    fn test_zero_depth_is_rejected() {
        assert_eq!(Config::from_json_str(r#"{"maxDepth":0}"#).max_depth, 256);
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            prefix: 'b',
            base: 36,
            ..Default::default()
        };
        config.save(dir.path()).unwrap();

        let on_disk = fs::read_to_string(dir.path().join(CONFIG_FILENAME)).unwrap();
        assert!(on_disk.contains("\"widthBank\""));

        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_bank_stem_roundtrip() {
        let config = Config::default();
        assert_eq!(config.bank_stem(1), "x00001");
        assert_eq!(config.parse_bank_stem("x00001").unwrap(), 1);
        assert_eq!(config.parse_bank_stem("00042").unwrap(), 42);
        assert_eq!(config.parse_bank_stem("x00007.txt").unwrap(), 7);
        assert!(config.parse_bank_stem("x").is_err());
    }
}
