use crate::codec;
use crate::config::Config;
use crate::error::{ParseError, ParseErrorKind};
use crate::model::{Bank, Register, DEFAULT_REGISTER};

/// Parse a bank document.
///
/// Fails on the first grammar violation; nothing is partially returned.
pub fn parse_bank(text: &str, config: &Config) -> Result<Bank, ParseError> {
    let lines: Vec<&str> = text.lines().collect();

    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyInput, "no header line"))?;

    // The header may wrap over several lines; it ends at the first '{'.
    let mut header = String::new();
    let mut brace_line = None;
    for (i, line) in lines.iter().enumerate().skip(start) {
        if i > start {
            header.push(' ');
        }
        header.push_str(line);
        if line.contains('{') {
            brace_line = Some(i);
            break;
        }
    }
    let (brace_line, (head, after_brace)) = brace_line
        .zip(header.split_once('{'))
        .ok_or_else(|| {
            ParseError::new(
                ParseErrorKind::MissingBrace,
                format!("header never opens a body: {:?}", header.trim()),
            )
        })?;

    let (id_token, title) = split_header(head);
    let id_token = id_token.strip_prefix(config.prefix).unwrap_or(id_token);
    let id = codec::decode(id_token, config.base).map_err(|e| {
        ParseError::new(ParseErrorKind::BadBankId, format!("{id_token:?}: {e}"))
    })?;
    if id < 0 {
        return Err(ParseError::new(
            ParseErrorKind::BadBankId,
            format!("{id_token:?}: bank ids are non-negative"),
        ));
    }

    let mut bank = Bank::new(id, title);
    if after_brace.contains('}') {
        bank.registers.insert(DEFAULT_REGISTER, Register::new());
        return Ok(bank);
    }

    let mut current = DEFAULT_REGISTER;
    let mut saw_register_header = false;

    for (offset, line) in lines[brace_line + 1..].iter().enumerate() {
        if line.contains('}') {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let line_no = brace_line + offset + 2;

        if line.starts_with(['\t', ' ']) {
            let rest = line.trim_start_matches(['\t', ' ']);
            let (addr_token, value) = rest
                .split_once('\t')
                .or_else(|| rest.split_once(' '))
                .unwrap_or((rest, ""));
            let addr = codec::decode(addr_token, config.base).map_err(|e| {
                ParseError::new(
                    ParseErrorKind::InvalidAddressId,
                    format!("line {line_no}: {addr_token:?}: {e}"),
                )
            })?;
            bank.insert(current, addr, value);
        } else {
            let token = line.trim();
            current = codec::decode(token, config.base).map_err(|e| {
                ParseError::new(
                    ParseErrorKind::InvalidRegisterLine,
                    format!("line {line_no}: {token:?}: {e}"),
                )
            })?;
            bank.registers.entry(current).or_default();
            saw_register_header = true;
        }
    }

    if !saw_register_header {
        bank.registers.entry(DEFAULT_REGISTER).or_default();
    }

    Ok(bank)
}

/// Split `<id>\t(<title>)` into the id token and the title.
/// The title runs from the first '(' to the last ')'.
fn split_header(head: &str) -> (&str, &str) {
    match head.find('(') {
        Some(open) => {
            let rest = &head[open + 1..];
            let title = match rest.rfind(')') {
                Some(close) => &rest[..close],
                None => rest,
            };
            (head[..open].trim(), title.trim())
        }
        None => (head.trim(), ""),
    }
}
