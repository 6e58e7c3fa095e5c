use crate::commands::{BankSummary, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::BankId;
use crate::store::BankStore;
use crate::workspace::Workspace;

/// Load a bank, creating and saving an empty one if storage has none.
pub fn run<S: BankStore>(ws: &mut Workspace<S>, id: BankId) -> Result<CmdResult> {
    let existed = ws.is_loaded(id) || ws.store().exists(id);
    ws.open(id)?;

    let mut result = CmdResult::default();
    let stem = ws.config().bank_stem(id);
    if existed {
        result.add_message(CmdMessage::info(format!("Opened {stem}")));
    } else {
        let path = ws.save(id)?;
        result.add_message(CmdMessage::success(format!(
            "Created new bank {stem} at {}",
            path.display()
        )));
    }

    let summary = ws
        .bank(id)
        .map(|b| BankSummary::new(b, ws.config(), ws.is_bank_dirty(id)));
    Ok(result.with_banks(summary.into_iter().collect()))
}
