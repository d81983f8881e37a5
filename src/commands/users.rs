use std::io::{self, Write};

use crate::cli::{DeleteArgs, ListArgs, UpdateArgs, UserFormArgs};
use crate::directory::UserDirectory;
use crate::error::{DirectoryError, Result};
use crate::output;
use crate::transport::Transport;

pub async fn list<T: Transport>(directory: &mut UserDirectory<T>, args: ListArgs) -> Result<()> {
    directory.refresh().await;
    finish(directory)?;

    if let Some(term) = &args.search {
        directory.set_search(term);
    }
    output::print_users(&directory.filtered());

    Ok(())
}

pub async fn show<T: Transport>(directory: &mut UserDirectory<T>, id: u64) -> Result<()> {
    directory.view(id).await;
    finish(directory)?;

    if let Some(user) = directory.selected() {
        output::print_user(&user);
    }

    Ok(())
}

pub async fn create<T: Transport>(
    directory: &mut UserDirectory<T>,
    args: UserFormArgs,
) -> Result<()> {
    directory.create(&args.name, &args.email).await;
    finish(directory)
}

/// Open the record in edit mode, then save the new values over it.
pub async fn update<T: Transport>(
    directory: &mut UserDirectory<T>,
    args: UpdateArgs,
) -> Result<()> {
    directory.view(args.id).await;
    finish(directory)?;

    directory.save(&args.form.name, &args.form.email).await;
    finish(directory)
}

pub async fn delete<T: Transport>(directory: &mut UserDirectory<T>, args: DeleteArgs) -> Result<()> {
    if !args.yes && !confirm(&format!("Delete user {}? [y/N] ", args.id))? {
        output::print_message("Aborted.");
        return Ok(());
    }

    directory.delete(args.id).await;
    finish(directory)
}

/// Report the outcome of the last action.
///
/// Field annotations and warnings become errors so the process exits
/// non-zero; an info status is printed.
pub fn finish<T: Transport>(directory: &mut UserDirectory<T>) -> Result<()> {
    let errors = directory.field_errors();
    if !errors.is_empty() {
        output::print_field_errors(errors);
        return Err(DirectoryError::Rejected(errors.len()));
    }

    match directory.take_status() {
        Some(status) if status.is_warning() => Err(DirectoryError::ActionFailed(status.text)),
        Some(status) => {
            output::print_status(&status);
            Ok(())
        }
        None => Ok(()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
