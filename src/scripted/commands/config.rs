use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::BankStore;
use crate::workspace::Workspace;

pub fn run<S: BankStore>(ws: &Workspace<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_config(ws.config().clone()))
}
