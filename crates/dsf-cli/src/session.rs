//! Line commands of the interactive workspace.
//!
//! Each input line is split on whitespace and parsed with clap in multicall
//! mode, so the first word names the command and `help` works as usual.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use dsf_workspace::ROWS_PER_PAGE_OPTIONS;

/// An on/off argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    #[value(aliases = ["true", "include"])]
    On,
    #[value(aliases = ["false", "exclude"])]
    Off,
}

impl Switch {
    #[must_use]
    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

/// Accept only the page sizes the table offers.
pub fn parse_rows_per_page(value: &str) -> Result<usize, String> {
    let rows: usize = value
        .parse()
        .map_err(|_| format!("{value} is not a number"))?;
    if ROWS_PER_PAGE_OPTIONS.contains(&rows) {
        Ok(rows)
    } else {
        Err(format!("rows per page must be one of {ROWS_PER_PAGE_OPTIONS:?}"))
    }
}

#[derive(Debug, Parser)]
#[command(multicall = true)]
struct SessionLine {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum SessionCommand {
    /// Show the current page.
    #[command(alias = "ls")]
    Show,

    /// Flip the searchable flag of one or more diseases.
    #[command(alias = "t")]
    Toggle {
        #[arg(value_name = "DISEASE_ID", required = true)]
        disease_ids: Vec<String>,
    },

    /// Set the flag on every disease of a NANDO group, e.g. `group 12 on`.
    Group {
        #[arg(value_name = "PREFIX")]
        prefix: String,

        #[arg(value_enum, value_name = "STATE")]
        state: Switch,
    },

    /// Filter by name, NANDO id or English name. Without text, clear the filter.
    #[command(alias = "f")]
    Filter {
        #[arg(value_name = "TEXT")]
        text: Vec<String>,
    },

    /// Jump to a page (1-based).
    Page {
        #[arg(value_name = "N")]
        number: usize,
    },

    /// Next page.
    #[command(alias = "n")]
    Next,

    /// Previous page.
    #[command(alias = "p")]
    Prev,

    /// Change the page size.
    Rows {
        #[arg(value_name = "N", value_parser = parse_rows_per_page)]
        count: usize,
    },

    /// List the pending changes.
    Pending,

    /// Persist all pending changes in one batch.
    Save,

    /// Reload the disease list, keeping pending changes.
    Reload,

    /// Drop all pending changes and reload.
    Discard,

    /// Download the searchable set as a spreadsheet.
    Export {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Upload a spreadsheet of searchable settings, then reload.
    Import {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },

    /// Dismiss the current notice.
    Dismiss,

    /// Leave the workspace.
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    SessionLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_rows_per_page_options() {
        assert_eq!(parse_rows_per_page("50"), Ok(50));
        assert!(parse_rows_per_page("30").is_err());
        assert!(parse_rows_per_page("many").is_err());
    }

    #[test]
    fn test_switch_aliases() {
        assert_eq!(
            parse_line("group 1 include").unwrap(),
            Some(SessionCommand::Group {
                prefix: "1".into(),
                state: Switch::On
            })
        );
    }
}
