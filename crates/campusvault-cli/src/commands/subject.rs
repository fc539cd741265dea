//! Subject maintenance CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};

use crate::output;
use campusvault_core::error::AppError;
use campusvault_database::repositories::resource::ResourceRepository;
use campusvault_database::repositories::subject::SubjectRepository;
use campusvault_service::subject::dedup::SubjectMaintenance;

/// Arguments for subject commands
#[derive(Debug, Args)]
pub struct SubjectArgs {
    /// Subject subcommand
    #[command(subcommand)]
    pub command: SubjectCommand,
}

/// Subject subcommands
#[derive(Debug, Subcommand)]
pub enum SubjectCommand {
    /// Canonicalize legacy branch spellings, then merge the duplicates
    FixBranches,
    /// Merge duplicate subjects sharing a (name, code, year, semester, branch)
    Dedup,
}

/// Execute subject commands
pub async fn execute(args: &SubjectArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    let maintenance = SubjectMaintenance::new(
        Arc::new(SubjectRepository::new(pool.clone())),
        Arc::new(ResourceRepository::new(pool.clone())),
    );

    match &args.command {
        SubjectCommand::FixBranches => {
            let outcome = maintenance.fix_branches().await?;
            output::print_success(&format!(
                "Renamed {} branch value(s); merged {} duplicate(s), kept {}, moved {} resource(s)",
                outcome.branches_renamed,
                outcome.merge.removed,
                outcome.merge.kept,
                outcome.merge.resources_moved,
            ));
        }
        SubjectCommand::Dedup => {
            let outcome = maintenance.merge_duplicates().await?;
            output::print_success(&format!(
                "Merged {} duplicate(s), kept {}, moved {} resource(s)",
                outcome.removed, outcome.kept, outcome.resources_moved,
            ));
        }
    }

    Ok(())
}
