//! multiCAD console: reads natural-language CAD instructions from stdin, one
//! per line, and writes one JSON report per instruction to stdout.
//!
//! Commands run against the in-memory dry-run backend.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use mc_console::ConsoleConfig;
use mc_console::session::{self, Session};
use mc_executor::DryRunExecutor;
use mc_nlp::Interpreter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "mc-console starting");

    // ── Load config ─────────────────────────────────────────────
    let config_path = std::env::args().nth(1);
    let config = ConsoleConfig::load(config_path.as_deref())?;
    tracing::info!(
        strict_mode = config.nlp.strict_mode,
        pretty = config.pretty,
        "config loaded"
    );

    // ── Session ─────────────────────────────────────────────────
    let backend = DryRunExecutor::new();
    let session = Session::new(Interpreter::from_config(&config.nlp), &backend);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut handled = 0usize;

    while let Some(line) = lines.next_line().await? {
        if !session::is_instruction(&line) {
            continue;
        }
        let report = session.handle(line.trim()).await;
        let mut out = if config.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
        handled += 1;
    }

    tracing::info!(
        instructions = handled,
        entities = backend.entities().len(),
        "mc-console finished"
    );
    Ok(())
}
