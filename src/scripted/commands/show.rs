use crate::commands::{BankSummary, CmdResult, EntryRow};
use crate::error::Result;
use crate::model::BankId;
use crate::store::BankStore;
use crate::workspace::Workspace;

/// Raw entries of a bank. With a filter, only rows whose register label,
/// address label or value contain it (case-insensitively) are kept.
pub fn run<S: BankStore>(
    ws: &mut Workspace<S>,
    id: BankId,
    filter: Option<&str>,
) -> Result<CmdResult> {
    let config = ws.config().clone();
    let dirty = ws.is_bank_dirty(id);
    let bank = ws.ensure_loaded(id)?;
    let needle = filter.map(str::to_lowercase).filter(|f| !f.is_empty());

    let rows: Vec<EntryRow> = bank
        .entries()
        .filter(|(reg, addr, value)| match &needle {
            None => true,
            Some(n) => {
                config.reg_label(*reg).contains(n.as_str())
                    || config.addr_label(*addr).contains(n.as_str())
                    || value.to_lowercase().contains(n.as_str())
            }
        })
        .map(|(register, address, value)| EntryRow {
            register,
            address,
            value: value.to_string(),
        })
        .collect();

    let summary = BankSummary::new(bank, &config, dirty);
    Ok(CmdResult::default()
        .with_banks(vec![summary])
        .with_rows(rows))
}
