use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ncahp-wizard",
    version,
    about = "Registration wizard schemas, drafts and routes"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// List registration type codes and the form each one uses
    Schemas,
    /// Show the step list for a registration type code
    Steps { code: String },
    /// Walk every step of a code's form with validation bypassed
    Preview { code: String },
    /// List the profession catalog
    Professions,
    /// Inspect or discard the saved draft
    Draft {
        #[command(subcommand)]
        action: DraftAction,
    },
    /// Resolve a portal path to its page
    Route { path: String },
}

#[derive(Debug, Subcommand)]
pub enum DraftAction {
    Show,
    Clear,
}
