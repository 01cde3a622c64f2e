use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "schematic",
    about = "Schema injection and localization for Shopify theme templates",
    version
)]
pub struct Cli {
    /// Suppress progress output (errors still print)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline: settings, locales, localization, sections
    Build {
        /// Section references to process instead of scanning the sections directory
        files: Vec<String>,

        /// Show planned changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Transform a single section template
    Section {
        /// Section file, schema definition path, or name under the sections directory
        file: String,

        /// Show planned changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Compile locale definitions and regenerate the localization snippet
    Locales {
        /// Show planned changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Compile the settings schema into the theme config directory
    Settings {
        /// Show planned changes without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Create boilerplate files for a new section
    Scaffold {
        /// Name for the new section
        name: String,
    },

    /// Validate the theme without changing any file
    Check,
}
