//! Quillpane - render markdown to sanitized HTML, once or on every save.
//!
//! # Usage
//!
//! ```bash
//! quillpane README.md
//! quillpane README.md -o preview.html
//! quillpane --watch --json README.md
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use quillpane::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use quillpane::render::{DEFAULT_DEBOUNCE_MS, RenderOutput, RenderPipeline};
use quillpane::watcher::SourceWatcher;

/// How long file events must be quiet before the source is re-read.
const WATCH_SETTLE_MS: u64 = 25;
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Render markdown to sanitized HTML
#[derive(Parser, Debug)]
#[command(name = "quillpane", version, about, long_about = None)]
struct Cli {
    /// Markdown file to render
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write HTML to PATH instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Emit JSON with html, generation and failed fields
    #[arg(long)]
    json: bool,

    /// Keep running and re-render when the file changes
    #[arg(short, long)]
    watch: bool,

    /// Quiet period before re-rendering, in milliseconds
    #[arg(long, value_name = "N")]
    debounce_ms: Option<u64>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn emit(output: &RenderOutput, flags: &ConfigFlags) -> Result<()> {
    let mut body = if flags.json {
        serde_json::to_string(output).context("Failed to serialize render output")?
    } else {
        output.html.clone()
    };
    if !body.ends_with('\n') {
        body.push('\n');
    }

    if let Some(path) = &flags.output {
        fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            generation = output.generation,
            "preview written"
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(body.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write to stdout")?;
    }
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn watch(path: &Path, flags: &ConfigFlags, mut pipeline: RenderPipeline) -> Result<()> {
    let mut watcher = SourceWatcher::new(path, WATCH_SETTLE_MS)
        .with_context(|| format!("Failed to watch {}", path.display()))?;
    tracing::info!(path = %watcher.target_path().display(), "watching for changes");

    let start = Instant::now();
    loop {
        let now_ms = elapsed_ms(start);
        if watcher.poll_settled(now_ms) {
            match read_source(path) {
                Ok(source) => pipeline.submit(source, now_ms),
                // Mid-save renames can briefly remove the file.
                Err(err) => tracing::warn!(error = %err, "skipping unreadable source"),
            }
        }
        if pipeline.tick(now_ms) {
            emit(pipeline.output(), flags)?;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let debounce_ms = effective.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS);
    let mut pipeline = RenderPipeline::new(debounce_ms);
    pipeline.submit(read_source(&cli.file)?, 0);
    pipeline.flush();
    emit(pipeline.output(), &effective)?;

    if effective.watch {
        watch(&cli.file, &effective, pipeline)
    } else {
        Ok(())
    }
}
