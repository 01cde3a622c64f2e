mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Build { files, dry_run } => commands::build::run(files, dry_run, quiet),
        Commands::Section { file, dry_run } => commands::section::run(file, dry_run, quiet),
        Commands::Locales { dry_run } => commands::locales::run(dry_run, quiet),
        Commands::Settings { dry_run } => commands::settings::run(dry_run, quiet),
        Commands::Scaffold { name } => commands::scaffold::run(name, quiet),
        Commands::Check => commands::check::run(quiet),
    }
}
