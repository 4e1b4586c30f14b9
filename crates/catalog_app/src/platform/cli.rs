use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::logging::LogDestination;

/// Command-line client for the catalog service.
#[derive(Debug, Parser)]
#[command(name = "catalog", version)]
pub(crate) struct Cli {
    /// Base URL of the catalog backend.
    #[arg(
        long,
        global = true,
        env = "CATALOG_BACKEND_URL",
        default_value = "http://localhost:8080/"
    )]
    pub backend_url: String,

    /// File holding the stored credential and remembered identity.
    #[arg(long, global = true, default_value = ".catalog_session.ron")]
    pub state_file: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long, global = true, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,

    #[arg(long, global = true, default_value = "catalog.log")]
    pub log_file: PathBuf,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Sign in and store the issued credential.
    Login {
        /// Defaults to the remembered identity.
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: String,
        /// Remember the email for the next sign-in.
        #[arg(long)]
        remember: bool,
    },
    /// Forget the stored credential and remembered identity.
    Logout,
    /// Show one page of the catalog.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a new entry.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        year: String,
        /// Image file to attach as the poster.
        #[arg(long)]
        poster: Option<PathBuf>,
    },
    /// Edit an existing entry; omitted fields keep their stored value.
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        poster: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_edit_with_partial_fields() {
        let cli = Cli::try_parse_from(["catalog", "edit", "m1", "--year", "1999"]).unwrap();
        match cli.command {
            Command::Edit {
                id, title, year, ..
            } => {
                assert_eq!(id, "m1");
                assert_eq!(title, None);
                assert_eq!(year.as_deref(), Some("1999"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
