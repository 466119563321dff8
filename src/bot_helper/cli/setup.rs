use bot_helper::sort::{ContactSortKey, NoteSortKey};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "bot-helper", bin_name = "bot-helper", version = get_version())]
#[command(
    about = "Address book, note book and file sorter for the command line",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage contacts
    #[command(subcommand, visible_alias = "c")]
    Contact(ContactCommands),

    /// Manage notes
    #[command(subcommand, visible_alias = "n")]
    Note(NoteCommands),

    /// Show contacts with a birthday coming up
    Birthdays {
        /// How many days ahead to look (default: the upcoming-days setting)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Sort the files in a directory into category folders
    SortFiles {
        /// Directory to tidy
        path: PathBuf,

        /// Leave archives packed
        #[arg(long)]
        no_extract: bool,

        /// Keep directories that end up empty
        #[arg(long)]
        keep_empty: bool,
    },

    /// Show or change settings
    Config {
        /// Setting to show or change (upcoming-days, log-level)
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ContactCommands {
    /// Add a contact
    Add {
        /// Contact name (several words are joined)
        #[arg(required = true)]
        name: Vec<String>,

        /// Phone number (repeatable)
        #[arg(short, long)]
        phone: Vec<String>,

        /// Birthday, e.g. 15-03-1990
        #[arg(short, long)]
        birthday: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Postal address
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Show contacts in full
    #[command(visible_alias = "view")]
    Show {
        /// List numbers, ids or a name
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Change a contact
    #[command(visible_alias = "edit")]
    Update {
        /// List number, id or name
        #[arg(required = true)]
        selector: Vec<String>,

        #[command(flatten)]
        changes: ContactChangeArgs,
    },

    /// Delete contacts
    #[command(visible_alias = "rm")]
    Delete {
        /// List numbers, ids or a name
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// List contacts
    #[command(visible_alias = "ls")]
    List {
        /// Sort by name, birthday or email
        #[arg(short, long)]
        sort: Option<ContactSortKey>,

        /// Reverse the order
        #[arg(long)]
        desc: bool,
    },

    /// Search contacts by name, phone, email or address
    Search {
        /// Text to look for
        query: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ContactChangeArgs {
    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// Add a phone (repeatable)
    #[arg(long)]
    pub add_phone: Vec<String>,

    /// Remove a phone (repeatable)
    #[arg(long)]
    pub remove_phone: Vec<String>,

    /// Replace a phone
    #[arg(long, num_args = 2, value_names = ["OLD", "NEW"])]
    pub replace_phone: Option<Vec<String>>,

    /// Set the birthday
    #[arg(long, conflicts_with = "clear_birthday")]
    pub birthday: Option<String>,

    /// Set the email
    #[arg(long, conflicts_with = "clear_email")]
    pub email: Option<String>,

    /// Set the address
    #[arg(long, conflicts_with = "clear_address")]
    pub address: Option<String>,

    #[arg(long)]
    pub clear_birthday: bool,

    #[arg(long)]
    pub clear_email: bool,

    #[arg(long)]
    pub clear_address: bool,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note
    Add {
        /// Note text (several words are joined)
        text: Vec<String>,

        /// Tag (repeatable, or comma separated)
        #[arg(short, long, value_delimiter = ',')]
        tag: Vec<String>,
    },

    /// Show notes in full
    #[command(visible_alias = "view")]
    Show {
        /// List numbers or ids
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Change a note
    #[command(visible_alias = "edit")]
    Update {
        /// List number or id
        #[arg(required = true)]
        selector: Vec<String>,

        /// Replace the text
        #[arg(long)]
        text: Option<String>,

        /// Add tags
        #[arg(long, value_delimiter = ',')]
        add_tag: Vec<String>,

        /// Remove tags
        #[arg(long, value_delimiter = ',')]
        remove_tag: Vec<String>,

        /// Replace all tags
        #[arg(long, value_delimiter = ',', conflicts_with = "clear_tags")]
        set_tags: Option<Vec<String>>,

        /// Remove every tag
        #[arg(long)]
        clear_tags: bool,
    },

    /// Delete notes
    #[command(visible_alias = "rm")]
    Delete {
        /// List numbers or ids
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// List notes
    #[command(visible_alias = "ls")]
    List {
        /// Sort by tag, created-at, text or tag-count
        #[arg(short, long)]
        sort: Option<NoteSortKey>,

        /// Reverse the order
        #[arg(long)]
        desc: bool,
    },

    /// Search notes by text and tags
    Search {
        /// Text to look for
        text: Vec<String>,

        /// Tag the note must carry (repeatable; any of them matches)
        #[arg(short, long, value_delimiter = ',')]
        tag: Vec<String>,

        /// Sort the hits by tag, created-at, text or tag-count instead of relevance
        #[arg(short, long)]
        sort: Option<NoteSortKey>,

        /// Reverse the order
        #[arg(long)]
        desc: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_nested_contact_update() {
        let cli = Cli::try_parse_from([
            "bot-helper",
            "contact",
            "update",
            "Anna",
            "Kovalenko",
            "--replace-phone",
            "0501112233",
            "0501112244",
            "--clear-email",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Contact(ContactCommands::Update { selector, changes })) => {
                assert_eq!(selector, vec!["Anna", "Kovalenko"]);
                assert_eq!(
                    changes.replace_phone,
                    Some(vec!["0501112233".to_string(), "0501112244".to_string()])
                );
                assert!(changes.clear_email);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn parses_sort_keys_and_tags() {
        let cli = Cli::try_parse_from([
            "bot-helper", "n", "search", "--tag", "work,urgent", "-s", "created-at", "--desc",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Note(NoteCommands::Search {
                text,
                tag,
                sort,
                desc,
            })) => {
                assert!(text.is_empty());
                assert_eq!(tag, vec!["work", "urgent"]);
                assert_eq!(sort, Some(NoteSortKey::CreatedAt));
                assert!(desc);
            }
            other => panic!("unexpected parse: {:?}", other),
        }

        assert!(Cli::try_parse_from(["bot-helper", "contact", "list", "--sort", "age"]).is_err());
    }
}
