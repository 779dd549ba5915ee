//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Render flat parent-linked record sets as nested multi-level menus
#[derive(Parser, Debug)]
#[command(name = "multimenu")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (layered over the global config)
    #[arg(short = 'c', long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render records as nested markup
    Render {
        /// Record file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        records: PathBuf,

        /// `id` attribute of the top-level container
        #[arg(long)]
        menu_id: Option<String>,

        /// Item template (name or inline text), overrides the config
        #[arg(short, long)]
        template: Option<String>,

        /// Attach records with a missing parent to the roots instead of dropping them
        #[arg(long)]
        promote_orphans: bool,
    },

    /// Show the record hierarchy as a tree
    Tree {
        /// Record file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        records: PathBuf,

        /// Field shown next to each identifier
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Check whether a record may get a new parent without creating a cycle
    CheckParent {
        /// Record file (.json or .toml)
        #[arg(value_hint = ValueHint::FilePath)]
        records: PathBuf,

        /// Identifier of the record to move
        #[arg(long)]
        id: String,

        /// Identifier of the proposed parent
        #[arg(long)]
        parent: String,
    },

    /// Delete a record, handing its children to its parent
    Delete {
        /// Record file (.json or .toml), rewritten in place
        #[arg(value_hint = ValueHint::FilePath)]
        records: PathBuf,

        /// Identifier of the record to delete
        #[arg(long)]
        id: String,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
