//! `ncahp-wizard` -- command-line companion to the registration wizard.
//!
//! Lists form schemas and professions, previews a code's step sequence,
//! inspects or clears the saved draft and resolves portal routes.
//!
//! # Environment variables
//!
//! | Variable                       | Default       | Description                          |
//! |--------------------------------|---------------|--------------------------------------|
//! | `NCAHP_VALIDATION_MODE`        | `bypass`      | `strict` or `bypass` step validation |
//! | `NCAHP_DRAFT_DIR`              | `data/drafts` | Directory holding the draft file     |
//! | `NCAHP_DRAFT_FRESHNESS_HOURS`  | `24`          | Age after which a draft is discarded |
//! | `NCAHP_AUTOSAVE_INTERVAL_SECS` | unset         | Enables interval autosave            |

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ncahp_core::config::WizardConfig;
use ncahp_wizard::cli::Cli;
use ncahp_wizard::commands;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ncahp_wizard=info,ncahp_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = WizardConfig::from_env().context("Invalid wizard configuration")?;
    tracing::debug!(
        validation_mode = config.validation_mode.as_str(),
        draft_dir = %config.draft_dir.display(),
        "Loaded wizard configuration"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli.cmd, &config, &mut out)?;
    out.flush()?;
    Ok(())
}
