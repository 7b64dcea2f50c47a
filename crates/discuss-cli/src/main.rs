//! `discuss`: drive a discussion tree from the terminal.
//!
//! # Usage
//!
//! ```text
//! discuss                      # demo data, commands from stdin
//! discuss --no-seed --labels   # empty discussion, labelled containers
//! discuss --script session.txt
//! ```
//!
//! Settings are read from `discuss.toml` (or `--config`) and `DISCUSS_*`
//! environment variables; flags override both.

use std::{
  fs::File,
  io::{self, BufRead, BufReader, Write},
  path::PathBuf,
};

use anyhow::{Context as _, Result};
use clap::Parser;
use discuss_cli::{
  FormCollaborator, FormRequest, Session, Settings,
  command::{Command, HELP, Response},
  seed,
};
use discuss_core::DiscussionTree;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "discuss", about = "Interactive nested discussion tree")]
struct Args {
  /// Path to the TOML configuration file.
  #[arg(short, long, value_name = "FILE", default_value = "discuss.toml")]
  config: PathBuf,

  /// Start with an empty discussion instead of the sample data.
  #[arg(long)]
  no_seed: bool,

  /// Label child-list containers from the start.
  #[arg(long)]
  labels: bool,

  /// Read commands from FILE instead of stdin.
  #[arg(long, value_name = "FILE")]
  script: Option<PathBuf>,
}

// ─── Terminal form ────────────────────────────────────────────────────────────

/// Prints form prompts; values arrive later through `submit`.
struct TerminalForm;

impl FormCollaborator for TerminalForm {
  fn present(&mut self, form: &FormRequest) {
    println!("{} on {}:", form.action, form.target);
    for field in &form.fields {
      if field.choices.is_empty() {
        println!("  {} ({})", field.label, field.name);
      } else {
        println!(
          "  {} ({}), one of: {}",
          field.label,
          field.name,
          field.choices.join(", ")
        );
      }
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr; stdout carries the markup.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let settings: Settings = config::Config::builder()
    .add_source(config::File::from(args.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("DISCUSS"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise Settings")?;

  let tree = if settings.seed_demo && !args.no_seed {
    seed::demo().context("failed to build sample discussion")?
  } else {
    DiscussionTree::new()
  };

  let mut session =
    Session::new(tree, TerminalForm).context("failed to render discussion")?;
  if settings.container_labels || args.labels {
    session.page_mut().add_container_labels();
  }
  tracing::info!(
    entities = session.tree().registry().len(),
    labels = session.page().labels_enabled(),
    "discussion ready"
  );

  let input: Box<dyn BufRead> = match &args.script {
    Some(path) => Box::new(BufReader::new(
      File::open(path)
        .with_context(|| format!("opening script {}", path.display()))?,
    )),
    None => {
      println!("{HELP}");
      Box::new(io::stdin().lock())
    }
  };

  run(&mut session, input)
}

// ─── Command loop ─────────────────────────────────────────────────────────────

fn run(session: &mut Session<TerminalForm>, input: Box<dyn BufRead>) -> Result<()> {
  let mut stdout = io::stdout();
  for line in input.lines() {
    let line = line.context("reading command")?;
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
      continue;
    }

    let result = line
      .parse::<Command>()
      .and_then(|cmd| cmd.execute(session));
    match result {
      Ok(Response::Text(text)) => writeln!(stdout, "{text}")?,
      Ok(Response::Quit) => break,
      // A bad command or a rejected form is reported, not fatal.
      Err(e) => {
        tracing::warn!(command = %line, "{e}");
        writeln!(stdout, "error: {e}")?;
      }
    }
    stdout.flush()?;
  }
  Ok(())
}
