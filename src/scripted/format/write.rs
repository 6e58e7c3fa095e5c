use crate::config::Config;
use crate::model::Bank;

/// Serialize a bank into its canonical document form.
pub fn write_bank(bank: &Bank, config: &Config) -> String {
    let mut out = String::new();
    out.push_str(&config.bank_stem(bank.id));
    out.push_str("\t(");
    out.push_str(&bank.title);
    out.push_str("){\n");

    let headers = !bank.has_implicit_register_only();
    for (reg, addrs) in &bank.registers {
        if headers {
            out.push_str(&config.reg_label(*reg));
            out.push('\n');
        }
        for (addr, value) in addrs {
            out.push('\t');
            out.push_str(&config.addr_label(*addr));
            out.push('\t');
            out.push_str(value);
            out.push('\n');
        }
    }

    out.push_str("}\n");
    out
}
