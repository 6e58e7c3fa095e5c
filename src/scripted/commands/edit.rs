use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AddressId, BankId, RegisterId};
use crate::store::BankStore;
use crate::workspace::Workspace;

/// Insert or overwrite one entry. Loads the bank first if needed.
pub fn insert<S: BankStore>(
    ws: &mut Workspace<S>,
    bank: BankId,
    reg: RegisterId,
    addr: AddressId,
    value: &str,
) -> Result<CmdResult> {
    ws.ensure_loaded(bank)?;
    let previous = ws.lookup(bank, reg, addr).map(str::to_string);
    ws.insert(bank, reg, addr, value)?;

    let label = entry_label(ws, reg, addr);
    let mut result = CmdResult::default();
    let message = match previous {
        Some(_) => format!("Updated {label}"),
        None => format!("Inserted {label}"),
    };
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

/// Delete one entry. Deleting something that is not there is reported, not an error.
pub fn delete<S: BankStore>(
    ws: &mut Workspace<S>,
    bank: BankId,
    reg: RegisterId,
    addr: AddressId,
) -> Result<CmdResult> {
    ws.ensure_loaded(bank)?;
    let label = entry_label(ws, reg, addr);

    let mut result = CmdResult::default();
    if ws.delete(bank, reg, addr) {
        result.add_message(CmdMessage::success(format!("Deleted {label}")));
    } else {
        result.add_message(CmdMessage::warning(format!("Nothing at {label}")));
    }
    Ok(result)
}

fn entry_label<S: BankStore>(ws: &Workspace<S>, reg: RegisterId, addr: AddressId) -> String {
    let config = ws.config();
    format!("{}.{}", config.reg_label(reg), config.addr_label(addr))
}
