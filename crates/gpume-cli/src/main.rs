use std::io;

use clap::{Parser, Subcommand};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::Style;
use gpume_core::{
    estimate::{self, Estimate},
    session::{self, Session, SessionState},
    GpumeError, Precision,
};
use tracing_subscriber::EnvFilter;

// ── Palette ──────────────────────────────────────────────────────────

fn s_header() -> Style { Style::new().color256(252).bold() }  // bright gray, bold
fn s_tree() -> Style   { Style::new().color256(245) }         // mid gray
fn s_hint() -> Style   { Style::new().color256(243) }         // soft gray
fn s_err() -> Style    { Style::new().color256(167) }         // red

fn sep(width: usize) -> String {
    s_tree().apply_to("\u{2500}".repeat(width)).to_string()
}

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "gpume",
    about = "Estimate the GPU memory needed to hold an LLM's weights",
    version,
    after_help = "examples:\n  \
        gpume                     (interactive prompt)\n  \
        gpume 7 fp16              (7B model at FP16)\n  \
        gpume 70 INT4 --json\n  \
        gpume precisions          (supported precisions)"
)]
struct Cli {
    /// Parameter count in billions, e.g. 7 or 70.6
    #[arg(requires = "precision", allow_negative_numbers = true)]
    params: Option<String>,

    /// FP32, FP16, FP8, INT8, FP4 or INT4 (any case)
    precision: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, short)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported precisions and their cost per parameter.
    Precisions,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GPUME_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Precisions) => cmd_precisions(),
        None => match (cli.params.as_deref(), cli.precision.as_deref()) {
            (Some(params), Some(precision)) => cmd_estimate(params, precision, cli.json)?,
            _ => cmd_interactive()?,
        },
    }
    Ok(())
}

// ── Interactive ──────────────────────────────────────────────────────

fn cmd_interactive() -> anyhow::Result<()> {
    let mut session = Session::new(io::stdin().lock(), io::stdout().lock());
    match session.run()? {
        SessionState::Done(est) => tracing::info!(vram_gb = est.vram_gb, "session done"),
        SessionState::Failed(e) => tracing::info!(error = %e, "session failed"),
        SessionState::AwaitingInput => {}
    }
    Ok(())
}

// ── One-shot ─────────────────────────────────────────────────────────

fn resolve(params: &str, precision: &str) -> gpume_core::error::Result<Estimate> {
    let params_billion = session::parse_param_count(params)?;
    let precision = Precision::parse_loose(precision)?;
    Ok(estimate::estimate_for(params_billion, precision))
}

fn cmd_estimate(params: &str, precision: &str, json: bool) -> anyhow::Result<()> {
    let result = resolve(params, precision);
    if json {
        println!("{}", render_json(&result)?);
        return Ok(());
    }
    match result {
        Ok(est) => println!("{}", est.summary()),
        Err(e) => println!("{}", s_err().apply_to(format!("Error: {e}"))),
    }
    Ok(())
}

fn render_json(result: &Result<Estimate, GpumeError>) -> serde_json::Result<String> {
    match result {
        Ok(est) => serde_json::to_string_pretty(est),
        Err(e) => serde_json::to_string_pretty(&serde_json::json!({ "error": e.to_string() })),
    }
}

// ── Precisions ───────────────────────────────────────────────────────

fn cmd_precisions() {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("  Precision").fg(Color::AnsiValue(243)),
        Cell::new("Format").fg(Color::AnsiValue(243)),
        Cell::new("Bytes/param").fg(Color::AnsiValue(243)),
        Cell::new("GB per 1B").fg(Color::AnsiValue(243)),
    ]);
    for p in Precision::ALL {
        table.add_row(vec![
            Cell::new(format!("  {}", p.label())).fg(Color::AnsiValue(109)),
            Cell::new(p.description()).fg(Color::AnsiValue(248)),
            Cell::new(p.bytes_per_param()).fg(Color::AnsiValue(248)),
            Cell::new(format!("{:.2}", estimate::vram_gb(1.0, p))).fg(Color::AnsiValue(248)),
        ]);
    }

    println!();
    println!("  {}", s_header().apply_to("supported precisions"));
    println!("{}", sep(56));
    println!("{table}");
    println!("{}", sep(56));
    println!(
        "{}",
        s_hint().apply_to("  weights only: no KV cache, activations or optimizer state")
    );
    println!();
}
