use std::io::{self, Write};

use crate::config::{Config, DEFAULT_BASE_URL};
use crate::error::{DirectoryError, Result};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = ask(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("User Directory Configuration");
    println!("============================\n");

    let base_url = ask(&format!("Collection URL [{DEFAULT_BASE_URL}]: "))?;
    let base_url = if base_url.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        base_url
    };
    url::Url::parse(&base_url).map_err(|e| DirectoryError::InvalidUrl {
        url: base_url.clone(),
        source: e,
    })?;

    let demo_token = ask("Demo token sent as X-Demo-Token [optional]: ")?;
    let validate = ask("Check forms locally before sending? [Y/n]: ")?;

    let config = Config {
        base_url: Some(base_url),
        demo_token: (!demo_token.is_empty()).then_some(demo_token),
        validate: !validate.eq_ignore_ascii_case("n"),
    };

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| DirectoryError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let contents = config
        .to_toml()
        .map_err(|e| DirectoryError::ActionFailed(format!("Failed to render config: {e}")))?;

    std::fs::write(&config_path, contents).map_err(|e| DirectoryError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'users' commands!");

    Ok(())
}

fn ask(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
