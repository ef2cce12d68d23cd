pub mod handlers;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Screen resumes against a skill list, classify them and draft replies.
#[derive(Debug, Parser)]
#[command(name = "screener", version, about)]
pub struct Cli {
    /// Directory holding saved reply drafts [env: SCREENER_DRAFTS_DIR]
    #[arg(long, global = true)]
    pub drafts_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload resumes, score them and print the results table
    Screen(ScreenArgs),

    /// Show, save or list reply drafts
    #[command(subcommand)]
    Draft(DraftCommand),
}

/// Skill list and threshold overrides shared by every scoring command.
#[derive(Debug, Clone, Default, Args)]
pub struct SkillArgs {
    /// Required skills, comma-separated [env: SCREENER_REQUIRED_SKILLS]
    #[arg(long)]
    pub skills: Option<String>,

    /// Critical skills, comma-separated; any missing one forces Reject
    /// [env: SCREENER_CRITICAL_SKILLS]
    #[arg(long)]
    pub critical: Option<String>,

    /// Minimum match ratio for Suitable [env: SCREENER_SUITABLE_THRESHOLD]
    #[arg(long)]
    pub suitable: Option<f64>,

    /// Minimum match ratio for Maybe [env: SCREENER_MAYBE_THRESHOLD]
    #[arg(long)]
    pub maybe: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ScreenArgs {
    /// Resume files (.pdf, .docx, .txt)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub skills: SkillArgs,

    /// Export results as CSV; without a value uses SCREENER_EXPORT_PATH
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    pub export: Option<Option<PathBuf>>,

    /// Print the generated reply for every scored candidate
    #[arg(long)]
    pub show_drafts: bool,

    /// Save the generated reply for every scored candidate
    #[arg(long)]
    pub save_drafts: bool,
}

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Print the saved draft for a resume, or the generated default
    Show {
        file: PathBuf,
        #[command(flatten)]
        skills: SkillArgs,
    },

    /// Save an edited reply for a resume
    Save {
        file: PathBuf,

        /// Reply text
        #[arg(long, conflicts_with = "from", required_unless_present = "from")]
        text: Option<String>,

        /// Read the reply text from a file
        #[arg(long, value_name = "PATH")]
        from: Option<PathBuf>,

        #[command(flatten)]
        skills: SkillArgs,
    },

    /// List every saved draft
    List,
}
