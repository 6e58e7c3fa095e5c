use crate::commands::{list, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::BankStore;
use crate::workspace::Workspace;

pub fn run<S: BankStore>(ws: &mut Workspace<S>) -> Result<CmdResult> {
    let loaded = ws.preload_all()?;
    let mut result = list::run(ws)?;
    result.add_message(CmdMessage::info(format!(
        "Preloaded {} new, {} banks total",
        loaded,
        result.banks.len()
    )));
    Ok(result)
}
