use colored::Colorize;
use scripted::api::{BankSummary, CmdMessage, EntryRow, MessageLevel};
use scripted::config::Config;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DIRTY_MARKER: &str = "*";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_banks(banks: &[BankSummary]) {
    if banks.is_empty() {
        println!("No banks found.");
        return;
    }

    for bank in banks {
        let marker = if bank.dirty { DIRTY_MARKER } else { " " };
        let count = format!("{} entries", bank.entries);
        let fixed = bank.stem.width() + count.width() + 4;
        let title = truncate_to_width(&bank.title, LINE_WIDTH.saturating_sub(fixed));
        let padding = LINE_WIDTH.saturating_sub(fixed + title.width());

        println!(
            "{}{} {}{} {}",
            marker.red(),
            bank.stem.yellow(),
            title.bold(),
            " ".repeat(padding),
            count.dimmed()
        );
    }
}

pub(super) fn print_rows(rows: &[EntryRow], config: &Config) {
    if rows.is_empty() {
        println!("No entries.");
        return;
    }

    for row in rows {
        let label = format!(
            "{}.{}",
            config.reg_label(row.register),
            config.addr_label(row.address)
        );
        let available = LINE_WIDTH.saturating_sub(label.width() + 2);
        println!(
            "  {} {}",
            label.yellow(),
            truncate_to_width(&row.value, available)
        );
    }
}

pub(super) fn print_config(config: &Config) {
    let fields = [
        ("prefix", config.prefix.to_string()),
        ("base", config.base.to_string()),
        ("widthBank", config.width_bank.to_string()),
        ("widthReg", config.width_reg.to_string()),
        ("widthAddr", config.width_addr.to_string()),
        ("maxDepth", config.max_depth.to_string()),
    ];
    for (key, value) in fields {
        println!("{} {}", format!("{key:<10}").dimmed(), value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
