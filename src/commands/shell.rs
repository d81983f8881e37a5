use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::directory::{Mode, UserDirectory};
use crate::error::Result;
use crate::output;
use crate::transport::Transport;

const HELP: &str = "COMMANDS:
    list                  Re-fetch and show all users
    search [TEXT]         Filter the list by name or email (empty clears)
    view ID               Open a user in the edit form
    create NAME | EMAIL   Create a user
    save NAME | EMAIL     Save the edit form
    cancel                Leave the edit form without saving
    delete ID             Delete a user
    clear                 Clear the create form and annotations
    help                  Show this help
    quit                  Leave the shell";

/// One line of shell input.
#[derive(Debug, PartialEq, Eq)]
pub enum ShellCommand {
    List,
    Search(String),
    View(u64),
    Create { name: String, email: String },
    Save { name: String, email: String },
    Cancel,
    Delete(u64),
    Clear,
    Help,
    Quit,
}

impl ShellCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        match word.to_lowercase().as_str() {
            "list" | "ls" | "refresh" => Ok(ShellCommand::List),
            "search" | "find" => Ok(ShellCommand::Search(rest.to_string())),
            "view" | "edit" => parse_id(rest).map(ShellCommand::View),
            "create" | "add" => {
                parse_form(rest).map(|(name, email)| ShellCommand::Create { name, email })
            }
            "save" => parse_form(rest).map(|(name, email)| ShellCommand::Save { name, email }),
            "cancel" => Ok(ShellCommand::Cancel),
            "delete" | "rm" => parse_id(rest).map(ShellCommand::Delete),
            "clear" => Ok(ShellCommand::Clear),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            "" => Err(String::new()),
            other => Err(format!("Unknown command '{other}'. Type 'help'.")),
        }
    }
}

fn parse_id(text: &str) -> std::result::Result<u64, String> {
    text.parse()
        .map_err(|_| format!("Expected a numeric user ID, got '{text}'"))
}

/// `NAME | EMAIL`; either side may be empty so the server can reject it.
fn parse_form(text: &str) -> std::result::Result<(String, String), String> {
    text.split_once('|')
        .map(|(name, email)| (name.trim().to_string(), email.trim().to_string()))
        .ok_or_else(|| "Expected NAME | EMAIL".to_string())
}

pub async fn run<T: Transport>(directory: &mut UserDirectory<T>) -> Result<()> {
    println!("{}", "User directory shell. Type 'help' for commands.".bold());
    directory.refresh().await;
    render(directory, true);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", prompt(directory));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    eprintln!("{}", message.yellow());
                }
                continue;
            }
        };

        if command == ShellCommand::Quit {
            break;
        }
        let show_list = execute(directory, command).await;
        render(directory, show_list);
    }

    Ok(())
}

/// Apply one command; returns whether the list should be redrawn.
pub async fn execute<T: Transport>(directory: &mut UserDirectory<T>, command: ShellCommand) -> bool {
    match command {
        ShellCommand::List => {
            directory.refresh().await;
            true
        }
        ShellCommand::Search(term) => {
            directory.set_search(&term);
            true
        }
        ShellCommand::View(id) => {
            directory.view(id).await;
            false
        }
        ShellCommand::Create { name, email } => directory.create(&name, &email).await.is_some(),
        ShellCommand::Save { name, email } => {
            directory.save(&name, &email).await;
            directory.editing().is_none()
        }
        ShellCommand::Cancel => {
            directory.cancel_edit();
            false
        }
        ShellCommand::Delete(id) => {
            directory.delete(id).await;
            true
        }
        ShellCommand::Clear => {
            directory.clear_form();
            false
        }
        ShellCommand::Help => {
            println!("{HELP}");
            false
        }
        ShellCommand::Quit => false,
    }
}

fn prompt<T: Transport>(directory: &UserDirectory<T>) -> String {
    match directory.mode() {
        Mode::Create => format!("{} ", "users>".cyan()),
        Mode::Edit { id } => format!("{} ", format!("users[edit #{id}]>").magenta()),
    }
}

fn render<T: Transport>(directory: &mut UserDirectory<T>, show_list: bool) {
    if show_list {
        if !directory.search().trim().is_empty() {
            println!("Filter: {}", directory.search().trim().italic());
        }
        output::print_users(&directory.filtered());
    }
    if let Some(user) = directory.selected() {
        println!("Editing #{}: {} <{}>", user.id, user.name, user.email);
    }
    output::print_field_errors(directory.field_errors());
    if let Some(status) = directory.take_status() {
        output::print_status(&status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UserClient;
    use crate::fake::FakeBackend;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("list"), Ok(ShellCommand::List));
        assert_eq!(ShellCommand::parse("  VIEW 3 "), Ok(ShellCommand::View(3)));
        assert_eq!(
            ShellCommand::parse("create Ada Lovelace | ada@example.com"),
            Ok(ShellCommand::Create {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
            })
        );
        assert_eq!(
            ShellCommand::parse("save | x"),
            Ok(ShellCommand::Save {
                name: String::new(),
                email: "x".to_string(),
            })
        );
        assert_eq!(ShellCommand::parse("search"), Ok(ShellCommand::Search(String::new())));
        assert_eq!(ShellCommand::parse("q"), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(ShellCommand::parse("view abc").is_err());
        assert!(ShellCommand::parse("create Ada").is_err());
        assert!(ShellCommand::parse("frobnicate").is_err());
        assert_eq!(ShellCommand::parse("   "), Err(String::new()));
    }

    #[tokio::test]
    async fn test_edit_session() {
        let mut directory = UserDirectory::new(UserClient::new(FakeBackend::seeded()), true);
        execute(&mut directory, ShellCommand::List).await;
        execute(&mut directory, ShellCommand::View(2)).await;
        assert_eq!(directory.editing(), Some(2));

        let redraw = execute(
            &mut directory,
            ShellCommand::Save {
                name: "B".to_string(),
                email: "bob@example.com".to_string(),
            },
        )
        .await;
        assert!(!redraw);
        assert_eq!(directory.editing(), Some(2));
        assert_eq!(
            directory.field_errors().get("name"),
            Some("Name must be at least 2 characters")
        );

        let redraw = execute(
            &mut directory,
            ShellCommand::Save {
                name: "Bobby".to_string(),
                email: "bob@example.com".to_string(),
            },
        )
        .await;
        assert!(redraw);
        assert_eq!(directory.editing(), None);
        assert!(directory.users().iter().any(|u| u.name == "Bobby"));
    }

    #[tokio::test]
    async fn test_create_while_editing_shows_annotations() {
        let mut directory = UserDirectory::new(UserClient::new(FakeBackend::seeded()), true);
        execute(&mut directory, ShellCommand::View(1)).await;

        let redraw = execute(
            &mut directory,
            ShellCommand::Create {
                name: "A".to_string(),
                email: "nope".to_string(),
            },
        )
        .await;

        assert!(!redraw);
        assert_eq!(directory.mode(), &Mode::Create);
        assert_eq!(directory.field_errors().len(), 2);
        assert_eq!(
            directory.field_errors().get("email"),
            Some("Please enter a valid email address")
        );
        assert_eq!(directory.client().transport().request_count(), 1);
    }
}
