//! # CLI Layer
//!
//! One possible UI client for scripted. It is the **only** place that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs the log subscriber
//! - Formats output for human consumption
//!
//! Every invocation is one shot: commands that change a bank save it before
//! returning.
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Picks the bank root, loads config, builds the API
//! - `handle_*()`: Per-command handlers that call the API and print the result
//! - `print`: Output formatting

mod print;
mod setup;

use clap::Parser;
use directories::ProjectDirs;
use print::{print_banks, print_config, print_messages, print_rows};
use scripted::api::{CmdResult, OutputTarget, ScriptedApi};
use scripted::config::Config;
use scripted::error::{Result, ScriptedError};
use scripted::store::fs::FsStore;
use setup::{Cli, Commands};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Overrides the default bank root.
pub const HOME_ENV: &str = "SCRIPTED_HOME";

struct AppContext {
    api: ScriptedApi<FsStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Open { bank }) => handle_open(&mut ctx, &bank),
        Some(Commands::Preload) => handle_preload(&mut ctx),
        Some(Commands::List) | None => handle_list(&mut ctx),
        Some(Commands::Show { bank, filter }) => handle_show(&mut ctx, &bank, filter.as_deref()),
        Some(Commands::Set {
            bank,
            addr,
            value,
            reg,
        }) => handle_set(&mut ctx, &bank, reg.as_deref(), &addr, &value.join(" ")),
        Some(Commands::Delete { bank, addr, reg }) => {
            handle_delete(&mut ctx, &bank, reg.as_deref(), &addr)
        }
        Some(Commands::Resolve { bank, stdout }) => handle_resolve(&mut ctx, &bank, stdout),
        Some(Commands::Export { bank, stdout }) => handle_export(&mut ctx, &bank, stdout),
        Some(Commands::Get { text }) => handle_get(&mut ctx, &text.join(" ")),
        Some(Commands::Config) => handle_config(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("scripted=debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let root = bank_root(cli)?;
    let config = Config::load(&root)?;
    debug!(root = %root.display(), "using bank root");

    let store = FsStore::new(root, config.clone());
    Ok(AppContext {
        api: ScriptedApi::new(store, config),
    })
}

fn bank_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(root) = &cli.root {
        return Ok(root.clone());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let dirs = ProjectDirs::from("com", "scripted", "scripted")
        .ok_or_else(|| ScriptedError::Store("Could not determine data dir".to_string()))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn handle_open(ctx: &mut AppContext, bank: &str) -> Result<()> {
    let result = ctx.api.open(bank)?;
    print_banks(&result.banks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_preload(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.preload()?;
    print_banks(&result.banks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &mut AppContext) -> Result<()> {
    // A fresh process has nothing loaded; listing means listing the directory.
    ctx.api.preload()?;
    let result = ctx.api.list()?;
    print_banks(&result.banks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, bank: &str, filter: Option<&str>) -> Result<()> {
    let result = ctx.api.show(bank, filter)?;
    print_banks(&result.banks);
    print_rows(&result.rows, ctx.api.config());
    print_messages(&result.messages);
    Ok(())
}

fn handle_set(
    ctx: &mut AppContext,
    bank: &str,
    reg: Option<&str>,
    addr: &str,
    value: &str,
) -> Result<()> {
    let result = ctx.api.set_entry(bank, reg, addr, value)?;
    print_messages(&result.messages);
    save_changes(ctx)
}

fn handle_delete(ctx: &mut AppContext, bank: &str, reg: Option<&str>, addr: &str) -> Result<()> {
    let result = ctx.api.delete_entry(bank, reg, addr)?;
    print_messages(&result.messages);
    save_changes(ctx)
}

fn handle_resolve(ctx: &mut AppContext, bank: &str, stdout: bool) -> Result<()> {
    let result = ctx.api.resolve_bank(bank, output_target(stdout))?;
    print_document(&result);
    Ok(())
}

fn handle_export(ctx: &mut AppContext, bank: &str, stdout: bool) -> Result<()> {
    let result = ctx.api.export_json(bank, output_target(stdout))?;
    print_document(&result);
    Ok(())
}

fn handle_get(ctx: &mut AppContext, text: &str) -> Result<()> {
    let result = ctx.api.resolve_value(text, None)?;
    if let Some(output) = &result.output {
        println!("{output}");
    }
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.show_config()?;
    if let Some(config) = &result.config {
        print_config(config);
    }
    Ok(())
}

fn save_changes(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.save_dirty()?;
    print_messages(&result.messages);
    Ok(())
}

fn output_target(stdout: bool) -> OutputTarget {
    if stdout {
        OutputTarget::Inline
    } else {
        OutputTarget::Store
    }
}

/// Documents go to stdout verbatim so they can be piped.
fn print_document(result: &CmdResult) {
    match &result.output {
        Some(output) => print!("{output}"),
        None => print_messages(&result.messages),
    }
}
