use console::style;
use dialoguer::{Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{generate_starter_config, load_config, system_config_path, user_config_path};

pub fn init(stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_content = generate_starter_config();

    if stdout {
        print!("{}", config_content);
        return Ok(());
    }

    // Prefer ~/.config/invisi/config.yml, fall back to /etc/invisi/config.yml
    let config_path = match user_config_path() {
        Some(user_config) => match user_config.parent().map(fs::create_dir_all) {
            Some(Err(e)) => {
                eprintln!(
                    "Warning: Could not create directory for {}: {}",
                    user_config.display(),
                    e
                );
                eprintln!("Falling back to {}", system_config_path().display());
                system_config_path()
            }
            _ => user_config,
        },
        None => system_config_path(),
    };

    write_config(&config_content, config_path)
}

/// Writes `config_content`, asking what to do when the target exists or is
/// not writable.
fn write_config(config_content: &str, mut path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if path.exists() {
            eprintln!("Config file already exists at {}", path.display());

            let options = &["Overwrite it", "Choose a different path", "Print to stdout instead"];
            let choice = Select::new()
                .with_prompt("What would you like to do?")
                .items(options)
                .default(1)
                .interact()?;

            match choice {
                0 => {}
                1 => {
                    path = prompt_path(&path)?;
                    continue;
                }
                _ => {
                    print!("{}", config_content);
                    return Ok(());
                }
            }
        }

        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        match fs::write(&path, config_content) {
            Ok(()) => {
                println!(
                    "{}",
                    style(format!("✓ Config file written to {}", path.display())).green()
                );
                return Ok(());
            }
            Err(e) => {
                eprintln!("Cannot write to {}: {}", path.display(), e);

                let options = &["Choose a different path", "Print to stdout instead"];
                let choice = Select::new()
                    .with_prompt("What would you like to do?")
                    .items(options)
                    .default(0)
                    .interact()?;

                if choice == 1 {
                    print!("{}", config_content);
                    return Ok(());
                }

                path = prompt_path(&path)?;
            }
        }
    }
}

fn prompt_path(current: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path_str: String = Input::new()
        .with_prompt("Config file path")
        .default(current.display().to_string())
        .interact_text()?;
    Ok(PathBuf::from(path_str))
}

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path.ok_or("No config file found. Use --config to specify a path.")?;

    println!("Validating config file: {}", path.display());

    match load_config(path) {
        Ok(_) => {
            println!("{}", style("✓ Config is valid").green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", style(format!("✗ Config validation failed:\n{}", e)).red());
            std::process::exit(1);
        }
    }
}
