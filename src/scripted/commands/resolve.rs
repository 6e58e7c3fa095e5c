use crate::commands::{CmdMessage, CmdResult, OutputTarget};
use crate::config::Config;
use crate::error::{Result, ScriptedError};
use crate::model::{Bank, BankId};
use crate::resolve::{ResolvedEntry, Resolver, Visited};
use crate::store::BankStore;
use crate::workspace::Workspace;

/// Resolve every entry of a bank into a flat text document.
pub fn bank<S: BankStore>(
    ws: &mut Workspace<S>,
    id: BankId,
    target: OutputTarget,
) -> Result<CmdResult> {
    let entries = Resolver::new(ws).resolve_bank(id)?;
    ws.ensure_loaded(id)?;
    let header = ws.bank(id).ok_or(ScriptedError::NotLoaded(id))?;
    let text = render_resolved_text(header, &entries, ws.config());

    let result = CmdResult::default().with_resolved(entries);
    match target {
        OutputTarget::Inline => Ok(result.with_output(text)),
        OutputTarget::Store => {
            let name = format!("{}.resolved.txt", ws.config().bank_stem(id));
            let path = ws.store().write_output(&name, &text)?;
            let mut result = result.with_paths(vec![path.clone()]);
            result.add_message(CmdMessage::success(format!(
                "Resolved -> {}",
                path.display()
            )));
            Ok(result)
        }
    }
}

/// Resolve an arbitrary value as if it were stored in bank `origin`.
pub fn value<S: BankStore>(ws: &mut Workspace<S>, text: &str, origin: BankId) -> Result<CmdResult> {
    let resolved = Resolver::new(ws).resolve(text, origin, &Visited::new());
    Ok(CmdResult::default().with_output(resolved))
}

/// `<stem>\t(<title>)` followed by one `<reg>.<addr>\t<resolved>` line per entry.
pub fn render_resolved_text(bank: &Bank, entries: &[ResolvedEntry], config: &Config) -> String {
    let mut out = format!("{}\t({})\n", config.bank_stem(bank.id), bank.title);
    for entry in entries {
        out.push_str(&config.reg_label(entry.register));
        out.push('.');
        out.push_str(&config.addr_label(entry.address));
        out.push('\t');
        out.push_str(&entry.resolved);
        out.push('\n');
    }
    out
}
