//! `schoolbook`: console front end for the school records store.
//!
//! # Usage
//!
//! ```text
//! schoolbook login TanárÚr
//! schoolbook grades add --subject Matematika --value 4 --description Dolgozat
//! schoolbook grades list
//! schoolbook logout
//! ```

mod app;
mod cli;
mod forms;
mod render;
mod settings;

use std::io::{self, BufRead, Write};

use anyhow::{Context as _, Result};
use app::App;
use clap::Parser;
use cli::{Cli, Command};
use schoolbook_store_sqlite::SqliteStorage;
use settings::AppConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let storage = SqliteStorage::open(&cfg.store_path)
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let mut app = App::new(cfg.directory(), storage);

  let output = match cli.command {
    Command::Login { username, password } => {
      let password = match password {
        Some(p) => p,
        None => read_line("Password: ")?,
      };
      app.login(&username, &password)?
    }
    Command::Logout => app.logout()?,
    Command::Whoami => app.whoami(),
    Command::Schedule(cmd) => app.schedule(cmd, confirm)?,
    Command::Grades(cmd) => app.grades(cmd, confirm)?,
    Command::Absences(cmd) => app.absences(cmd, confirm)?,
  };

  println!("{}", output.trim_end());
  Ok(())
}

/// Print `prompt` and read one line from stdin, without the line ending.
fn read_line(prompt: &str) -> io::Result<String> {
  print!("{prompt}");
  io::stdout().flush().ok();
  let mut line = String::new();
  io::stdin().lock().read_line(&mut line)?;
  Ok(line.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

/// Ask a yes/no question; anything but `y`/`yes` declines.
fn confirm(question: &str) -> io::Result<bool> {
  let answer = read_line(&format!("{question} [y/N] "))?;
  Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
