//! CLI argument definitions for the Disease Support Finder client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dsf_model::{KeywordType, VerificationStatus};
use dsf_workspace::DEFAULT_ROWS_PER_PAGE;

use dsf_cli::session::{Switch, parse_rows_per_page};

#[derive(Parser)]
#[command(
    name = "dsf",
    version,
    about = "Disease Support Finder - manage searchable diseases and support organizations",
    long_about = "Client for the Disease Support Finder backend.\n\n\
                  Choose which diseases are included in the organization search,\n\
                  manage custom keywords, import NANDO classifications, run\n\
                  organization searches and check the extraction model."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Client config file (default: <config dir>/dsf/client.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Backend API root, e.g. http://localhost:8000/api/v1.
    #[arg(
        long = "base-url",
        value_name = "URL",
        env = "DSF_API_BASE_URL",
        global = true
    )]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECONDS", global = true)]
    pub timeout: Option<u64>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive searchability workspace.
    Workspace(WorkspaceArgs),

    /// Browse diseases and manage their searchable flag.
    #[command(subcommand)]
    Diseases(DiseasesCommand),

    /// Manage custom search keywords.
    #[command(subcommand)]
    Keywords(KeywordsCommand),

    /// Import and browse the NANDO classification.
    #[command(subcommand)]
    Nando(NandoCommand),

    /// Run organization searches.
    #[command(subcommand)]
    Search(SearchCommand),

    /// Record a verification decision for an organization.
    Verify(VerifyArgs),

    /// Check the extraction model and run test extractions.
    #[command(subcommand)]
    Llm(LlmCommand),
}

#[derive(Args)]
pub struct WorkspaceArgs {
    /// Rows per page (10, 25, 50 or 100).
    #[arg(
        long = "rows-per-page",
        value_name = "N",
        default_value_t = DEFAULT_ROWS_PER_PAGE,
        value_parser = parse_rows_per_page
    )]
    pub rows_per_page: usize,

    /// Directory for exported spreadsheets (default: current directory).
    #[arg(long = "export-dir", value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum DiseasesCommand {
    /// List diseases.
    List {
        /// Only diseases included in the organization search.
        #[arg(long = "searchable")]
        searchable: bool,

        /// Case-insensitive match on name, kana, English name, NANDO id or search keywords.
        #[arg(long = "filter", value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Show a disease with its hierarchy and custom keywords.
    Show {
        #[arg(value_name = "DISEASE_ID")]
        disease_id: String,
    },

    /// Server-side name search.
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Hierarchy statistics of the disease set.
    Stats,

    /// Download the searchable set as a spreadsheet.
    Export {
        /// Output directory (default: current directory).
        #[arg(long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Upload a spreadsheet of searchable settings.
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Set the searchable flag of one disease immediately.
    SetSearchable {
        #[arg(value_name = "DISEASE_ID")]
        disease_id: String,

        #[arg(value_enum, value_name = "STATE")]
        state: Switch,
    },
}

#[derive(Subcommand)]
pub enum KeywordsCommand {
    /// List the custom keywords of a disease.
    List {
        #[arg(value_name = "DISEASE_ID")]
        disease_id: String,
    },

    /// Add a custom keyword to a disease.
    Add {
        #[arg(value_name = "DISEASE_ID")]
        disease_id: String,

        #[arg(value_name = "KEYWORD")]
        keyword: String,

        /// Keyword category (symptom, treatment, other).
        #[arg(long = "type", value_name = "TYPE", default_value = "other")]
        keyword_type: KeywordType,
    },

    /// Delete a custom keyword and show what remains.
    Delete {
        #[arg(value_name = "DISEASE_ID")]
        disease_id: String,

        #[arg(value_name = "KEYWORD_ID")]
        keyword_id: i64,
    },

    /// Upload a spreadsheet of custom keywords.
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum NandoCommand {
    /// Upload a NANDO classification spreadsheet.
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,

        /// The file is a custom disease sheet rather than the NANDO export.
        #[arg(long = "custom")]
        custom: bool,
    },

    /// Show child diseases grouped by parent NANDO id.
    Hierarchy {
        /// Only the children of this parent.
        #[arg(long = "parent", value_name = "NANDO_ID")]
        parent: Option<String>,
    },

    /// Start the comprehensive organization search over every searchable disease.
    Search,
}

#[derive(Subcommand)]
pub enum SearchCommand {
    /// Search support organizations for one disease.
    Run(SearchRunArgs),

    /// Show the terms the search would use for a disease.
    Terms {
        #[arg(value_name = "DISEASE_ID")]
        disease_id: String,
    },
}

#[derive(Args)]
pub struct SearchRunArgs {
    #[arg(value_name = "DISEASE_ID")]
    pub disease_id: String,

    /// Disable approximate term matching.
    #[arg(long = "no-approximate")]
    pub no_approximate: bool,

    /// Disable the second verification pass.
    #[arg(long = "no-two-stage")]
    pub no_two_stage: bool,

    /// Require a human decision before organizations count as verified.
    #[arg(long = "human-verification")]
    pub human_verification: bool,

    /// Token budget for the extraction model.
    #[arg(long = "max-tokens", value_name = "N", default_value_t = 4000)]
    pub max_tokens: u32,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(value_name = "ORGANIZATION_ID")]
    pub organization_id: String,

    /// New status (pending, verified, rejected).
    #[arg(value_name = "STATUS")]
    pub status: VerificationStatus,

    /// Reason recorded with the decision.
    #[arg(long = "reason", value_name = "TEXT")]
    pub reason: Option<String>,
}

#[derive(Subcommand)]
pub enum LlmCommand {
    /// Report whether the extraction model is reachable.
    Health,

    /// List the models the backend can use.
    Models,

    /// Extract support organizations from a piece of text.
    Test {
        /// Text to extract from.
        #[arg(value_name = "TEXT")]
        text: String,

        /// Disease the organizations should relate to.
        #[arg(long = "disease", value_name = "NAME")]
        disease_name: String,
    },
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
