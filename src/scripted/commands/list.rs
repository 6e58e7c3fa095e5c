use crate::commands::{BankSummary, CmdResult};
use crate::error::Result;
use crate::store::BankStore;
use crate::workspace::Workspace;

/// Summaries of every loaded bank, ascending by id.
pub fn run<S: BankStore>(ws: &Workspace<S>) -> Result<CmdResult> {
    let banks = ws
        .banks()
        .map(|b| BankSummary::new(b, ws.config(), ws.is_bank_dirty(b.id)))
        .collect();
    Ok(CmdResult::default().with_banks(banks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::store::memory::MemStore;

    #[test]
    fn test_list_marks_dirty_banks() {
        let mut ws = Workspace::new(MemStore::default(), Config::default());
        ws.open(3).unwrap();
        ws.open(1).unwrap();
        ws.save(1).unwrap();

        let result = run(&ws).unwrap();
        let got: Vec<_> = result
            .banks
            .iter()
            .map(|b| (b.stem.as_str(), b.dirty))
            .collect();
        assert_eq!(got, vec![("x00001", false), ("x00003", true)]);
    }
}
