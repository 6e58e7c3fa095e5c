use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BankId;
use crate::store::BankStore;
use crate::workspace::Workspace;

pub fn run<S: BankStore>(ws: &mut Workspace<S>, id: BankId) -> Result<CmdResult> {
    let path = ws.save(id)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Saved {}", path.display())));
    Ok(result.with_paths(vec![path]))
}

/// Save every bank with unsaved changes.
pub fn run_dirty<S: BankStore>(ws: &mut Workspace<S>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for id in ws.ids() {
        if ws.is_bank_dirty(id) {
            let path = ws.save(id)?;
            result.add_message(CmdMessage::success(format!("Saved {}", path.display())));
            result.paths.push(path);
        }
    }
    Ok(result)
}
