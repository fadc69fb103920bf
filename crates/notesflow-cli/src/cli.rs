use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use notesflow_core::NoteColor;

#[derive(Parser)]
#[command(name = "notesflow")]
#[command(about = "Browse and edit NotesFlow notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Flags overriding the environment-derived client config
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Notes API base URL (overrides API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory for the local note cache (overrides NOTESFLOW_CACHE_DIR)
    #[arg(long, global = true, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Work from the local cache without contacting the server
    #[arg(long, global = true)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List notes, pinned first
    #[command(alias = "ls")]
    List {
        /// Only show notes whose title or content contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// Number of notes to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search notes by title and content
    Search {
        /// Search query
        query: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        #[arg(short, long)]
        title: Option<String>,
        /// Note color
        #[arg(short, long, value_enum)]
        color: Option<ColorArg>,
        /// Note content (read from stdin when omitted)
        content: Vec<String>,
    },
    /// Edit an existing note
    Edit {
        /// Note ID or unique ID prefix
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
        /// New color
        #[arg(long, value_enum)]
        color: Option<ColorArg>,
    },
    /// Delete an existing note
    #[command(alias = "rm")]
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Pin or unpin a note
    Pin {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ColorArg {
    Purple,
    Blue,
    Green,
    Orange,
    Pink,
    Yellow,
}

impl From<ColorArg> for NoteColor {
    fn from(color: ColorArg) -> Self {
        match color {
            ColorArg::Purple => Self::Purple,
            ColorArg::Blue => Self::Blue,
            ColorArg::Green => Self::Green,
            ColorArg::Orange => Self::Orange,
            ColorArg::Pink => Self::Pink,
            ColorArg::Yellow => Self::Yellow,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Self::Bash,
            CompletionShell::Zsh => Self::Zsh,
            CompletionShell::Fish => Self::Fish,
            CompletionShell::PowerShell => Self::PowerShell,
            CompletionShell::Elvish => Self::Elvish,
        }
    }
}
