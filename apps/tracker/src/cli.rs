use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::models::RecordId;

/// Terminal client for the job-search tracker API.
#[derive(Debug, Parser)]
#[command(name = "tracker", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show whether the stored session is still valid.
    Status,
    Login {
        username: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    Signup {
        username: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
    },
    Logout,
    /// Headline counters and the most recent applications.
    Dashboard,
    #[command(subcommand)]
    Applications(ApplicationsCommand),
    #[command(subcommand)]
    Targets(TargetsCommand),
    /// Upcoming interviews and prep notes.
    Interviews,
    /// Networking contacts. Kept in memory, so changes last for this run only.
    #[command(subcommand)]
    Networking(NetworkingCommand),
    /// Logged email exchanges. Kept in memory, so changes last for this run only.
    #[command(subcommand)]
    Emails(EmailsCommand),
    /// Upload a resume and list matching jobs.
    UploadResume {
        file: PathBuf,
        /// Save the match at this position (1-based) as a target company.
        #[arg(long = "add")]
        add: Vec<usize>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ApplicationsCommand {
    List,
    /// Applications grouped by status.
    Pipeline,
    Add(ApplicationFields),
    Update {
        id: RecordId,
        #[command(flatten)]
        fields: ApplicationFields,
    },
    Delete {
        id: RecordId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TargetsCommand {
    List,
    /// Search for companies and list the hits alongside saved targets.
    Search {
        query: String,
        /// Save the hit at this position (1-based) as a target company.
        #[arg(long = "add")]
        add: Vec<usize>,
    },
    Delete {
        id: RecordId,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum NetworkingCommand {
    List,
    Add(ContactFields),
    /// Edit the contact at this list position (1-based).
    Update {
        position: usize,
        #[command(flatten)]
        fields: ContactFields,
    },
    Delete {
        position: usize,
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum EmailsCommand {
    List,
    Add(EmailFields),
    /// Edit the email at this list position (1-based).
    Update {
        position: usize,
        #[command(flatten)]
        fields: EmailFields,
    },
    Delete {
        position: usize,
        #[arg(long)]
        yes: bool,
    },
}

/// Form fields for an application. Anything left out keeps its current value.
#[derive(Debug, Clone, Default, Args)]
pub struct ApplicationFields {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub role: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub hourly_rate: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub applied_date: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    #[arg(long)]
    pub source: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ContactFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub linkedin: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_met: Option<String>,
    #[arg(long)]
    pub how_met: Option<String>,
    #[arg(long)]
    pub next_action: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub next_action_date: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct EmailFields {
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub subject: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// inbound or outbound
    #[arg(long)]
    pub direction: Option<String>,
    #[arg(long)]
    pub status: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub follow_up_date: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_application_update() {
        let cli = Cli::parse_from([
            "tracker",
            "applications",
            "update",
            "12",
            "--status",
            "Interview",
            "--hourly-rate",
            "80",
        ]);
        match cli.command {
            Command::Applications(ApplicationsCommand::Update { id, fields }) => {
                assert_eq!(id, RecordId::Server(12));
                assert_eq!(fields.status.as_deref(), Some("Interview"));
                assert_eq!(fields.hourly_rate.as_deref(), Some("80"));
                assert_eq!(fields.company, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_networking_update_by_position() {
        let cli = Cli::parse_from([
            "tracker",
            "networking",
            "update",
            "2",
            "--next-action",
            "Send thank-you note",
            "--next-action-date",
            "2025-03-01",
        ]);
        match cli.command {
            Command::Networking(NetworkingCommand::Update { position, fields }) => {
                assert_eq!(position, 2);
                assert_eq!(fields.next_action.as_deref(), Some("Send thank-you note"));
                assert_eq!(fields.next_action_date.as_deref(), Some("2025-03-01"));
                assert_eq!(fields.name, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_email_delete_with_yes() {
        let cli = Cli::parse_from(["tracker", "emails", "delete", "3", "--yes"]);
        assert!(matches!(
            cli.command,
            Command::Emails(EmailsCommand::Delete { position: 3, yes: true })
        ));
    }

    #[test]
    fn test_parses_target_search_with_picks() {
        let cli = Cli::parse_from(["tracker", "targets", "search", "rust", "--add", "2"]);
        match cli.command {
            Command::Targets(TargetsCommand::Search { query, add }) => {
                assert_eq!(query, "rust");
                assert_eq!(add, vec![2]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parses_resume_upload_with_picks() {
        let cli = Cli::parse_from(["tracker", "upload-resume", "cv.pdf", "--add", "1", "--add", "3"]);
        match cli.command {
            Command::UploadResume { file, add } => {
                assert_eq!(file, PathBuf::from("cv.pdf"));
                assert_eq!(add, vec![1, 3]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
