use crate::commands::{CmdMessage, CmdResult, OutputTarget};
use crate::config::Config;
use crate::error::{Result, ScriptedError};
use crate::model::{AddressId, Bank, BankId, RegisterId};
use crate::resolve::{ResolvedEntry, Resolver};
use crate::store::BankStore;
use crate::workspace::Workspace;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BankExport<'a> {
    bank: String,
    id: BankId,
    title: &'a str,
    registers: Vec<RegisterExport<'a>>,
}

#[derive(Debug, Serialize)]
struct RegisterExport<'a> {
    register: String,
    id: RegisterId,
    entries: Vec<EntryExport<'a>>,
}

#[derive(Debug, Serialize)]
struct EntryExport<'a> {
    address: String,
    id: AddressId,
    raw: &'a str,
    resolved: &'a str,
}

/// Export a bank as JSON with raw and resolved values side by side.
pub fn run<S: BankStore>(
    ws: &mut Workspace<S>,
    id: BankId,
    target: OutputTarget,
) -> Result<CmdResult> {
    let entries = Resolver::new(ws).resolve_bank(id)?;
    let config = ws.config().clone();
    let bank = ws.ensure_loaded(id)?;
    let json = to_json(bank, &entries, &config)?;

    match target {
        OutputTarget::Inline => Ok(CmdResult::default().with_output(json)),
        OutputTarget::Store => {
            let name = format!("{}.json", config.bank_stem(id));
            let path = ws.store().write_output(&name, &json)?;
            let mut result = CmdResult::default().with_paths(vec![path.clone()]);
            result.add_message(CmdMessage::success(format!(
                "Exported JSON -> {}",
                path.display()
            )));
            Ok(result)
        }
    }
}

fn to_json(bank: &Bank, entries: &[ResolvedEntry], config: &Config) -> Result<String> {
    let mut registers: Vec<RegisterExport> = bank
        .registers
        .keys()
        .map(|reg| RegisterExport {
            register: config.reg_label(*reg),
            id: *reg,
            entries: Vec::new(),
        })
        .collect();

    // `entries` comes out of the resolver in register order, like `registers`.
    for entry in entries {
        if let Some(reg) = registers.iter_mut().find(|r| r.id == entry.register) {
            reg.entries.push(EntryExport {
                address: config.addr_label(entry.address),
                id: entry.address,
                raw: &entry.raw,
                resolved: &entry.resolved,
            });
        }
    }

    let export = BankExport {
        bank: config.bank_stem(bank.id),
        id: bank.id,
        title: &bank.title,
        registers,
    };
    serde_json::to_string_pretty(&export).map_err(ScriptedError::Serialization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemStore;
    use serde_json::{json, Value};

    #[test]
    fn test_export_shape() {
        let store = MemStore::default()
            .with_bank(
                1,
                "x00001\t(Doc){\n01\n\t0001\tsee 1.2.5\n02\n\t0005\tfive\n}\n",
            );
        let mut ws = Workspace::new(store, Config::default());

        let result = run(&mut ws, 1, OutputTarget::Inline).unwrap();
        let parsed: Value = serde_json::from_str(result.output.as_deref().unwrap()).unwrap();
        assert_eq!(
            parsed,
            json!({
                "bank": "x00001",
                "id": 1,
                "title": "Doc",
                "registers": [
                    { "register": "01", "id": 1, "entries": [
                        { "address": "0001", "id": 1, "raw": "see 1.2.5", "resolved": "see five" }
                    ]},
                    { "register": "02", "id": 2, "entries": [
                        { "address": "0005", "id": 5, "raw": "five", "resolved": "five" }
                    ]}
                ]
            })
        );
    }

    #[test]
    fn test_export_to_store() {
        let store = MemStore::default().with_bank(3, "x00003\t(t){\n}\n");
        let mut ws = Workspace::new(store, Config::default());

        let result = run(&mut ws, 3, OutputTarget::Store).unwrap();
        assert!(result.messages[0].content.starts_with("Exported JSON -> "));
        let written = ws.store().output("x00003.json").unwrap();
        assert!(written.contains("\"registers\""));
    }

    #[test]
    fn test_export_write_failure() {
        let store = MemStore::default().with_bank(3, "x00003\t(t){\n}\n");
        store.set_simulate_write_error(true);
        let mut ws = Workspace::new(store, Config::default());
        assert!(run(&mut ws, 3, OutputTarget::Store).is_err());
    }
}
