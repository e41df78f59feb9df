//! Terminal front end for the contacts view.
//!
//! Opens the contacts database, optionally seeds demo data, and drives
//! [`contacts_core::MainView`] from typed commands.

mod commands;
mod render;
mod session;

use anyhow::Context;
use clap::Parser;
use contacts_core::db::{open_db, open_db_in_memory};
use contacts_core::{
    init_logging, seed_demo_data, AppConfig, CompanyRepository, MainView,
    SqliteCompanyRepository, SqliteContactRepository,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contacts")]
#[command(about = "Browse, filter and edit contacts", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database file (overrides the config)
    #[arg(long, value_name = "FILE", conflicts_with = "in_memory")]
    db: Option<PathBuf>,

    /// Use a throwaway in-memory database
    #[arg(long)]
    in_memory: bool,

    /// trace | debug | info | warn | error
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Insert demo companies and contacts into an empty database
    #[arg(long)]
    seed: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }
    config.validate()?;

    if let Some(dir) = &config.log_dir {
        let dir = dir
            .to_str()
            .context("log directory must be valid UTF-8")?;
        init_logging(&config.log_level, dir).map_err(anyhow::Error::msg)?;
    }

    let conn = if cli.in_memory {
        open_db_in_memory()?
    } else {
        open_db(&config.db_path)
            .with_context(|| format!("failed to open `{}`", config.db_path.display()))?
    };

    if cli.seed || cli.in_memory {
        let inserted = seed_demo_data(&conn)?;
        info!("event=cli_seed module=cli status=ok inserted={inserted}");
    }

    let companies = SqliteCompanyRepository::new(&conn).find_all_companies()?;
    let mut view = MainView::new(
        SqliteContactRepository::new(&conn),
        companies,
        config.view_options(),
    )?;

    println!("contacts {}", contacts_core::core_version());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    session::run_session(&mut view, stdin.lock(), &mut stdout)
}
