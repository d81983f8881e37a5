use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "users")]
#[command(about = "A CLI for a REST user directory", version)]
#[command(after_help = "EXAMPLES:
    users list                                   List all users
    users list --search ada                      Filter by name or email
    users create --name \"Ada\" --email a@b.io    Create a user
    users update 7 --name \"Ada\" --email a@b.io  Replace a user's name and email
    users delete 7                               Delete a user
    users shell                                  Start an interactive session")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and request logs
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Collection URL (overrides USERS_API_URL and the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Skip local form checks and let the server validate
    #[arg(long, global = true)]
    pub no_validate: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    users list
    users list --search example.com --format json"
    )]
    List(ListArgs),
    /// Show one user
    #[command(
        alias = "v",
        after_help = "EXAMPLES:
    users show 3"
    )]
    Show {
        /// User ID
        id: u64,
    },
    /// Create a user
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    users create --name \"Ada Lovelace\" --email ada@example.com"
    )]
    Create(UserFormArgs),
    /// Replace a user's name and email
    #[command(
        alias = "u",
        after_help = "EXAMPLES:
    users update 3 --name \"Ada King\" --email ada@example.com"
    )]
    Update(UpdateArgs),
    /// Delete a user
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    users delete 3
    users delete 3 --yes"
    )]
    Delete(DeleteArgs),
    /// Interactive session that keeps the list and edit form between actions
    #[command(after_help = "EXAMPLES:
    users shell")]
    Shell,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    users completions bash > ~/.bash_completion.d/users
    users completions zsh > ~/.zfunc/_users
    users completions fish > ~/.config/fish/completions/users.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    users init")]
    Init,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Only show users whose name or email contains this text
    #[arg(long, short)]
    pub search: Option<String>,
}

#[derive(Args, Clone)]
pub struct UserFormArgs {
    /// Full name
    #[arg(long, short)]
    pub name: String,

    /// Email address
    #[arg(long, short)]
    pub email: String,
}

#[derive(Args, Clone)]
pub struct UpdateArgs {
    /// User ID
    pub id: u64,

    #[command(flatten)]
    pub form: UserFormArgs,
}

#[derive(Args, Clone)]
pub struct DeleteArgs {
    /// User ID
    pub id: u64,

    /// Do not ask for confirmation
    #[arg(long, short)]
    pub yes: bool,
}
