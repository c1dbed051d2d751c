use log::info;
use std::fs;
use std::path::Path;

use crate::error::StartupError;
use crate::server::config::ServerConfig;
use crate::static_files::{config_content, html_content, readme_content};

pub const CONFIG_FILE: &str = "config.ini";
pub const README_FILE: &str = "readme.txt";
pub const INDEX_FILE: &str = "index.html";

/// Makes sure the working files exist under `root`, creating every missing
/// one with its default content. Files that already exist are never touched,
/// so operator edits survive restarts.
pub fn ensure_default_files(root: &Path, config_path: &Path) -> Result<(), StartupError> {
    if !root.exists() {
        fs::create_dir_all(root).map_err(|source| StartupError::CreateDefault {
            path: root.to_path_buf(),
            source,
        })?;
    }

    ensure_file(config_path, &config_content::get_config())?;
    ensure_file(&root.join(README_FILE), &readme_content::get_readme())?;
    ensure_file(&root.join(INDEX_FILE), &html_content::get_html())?;

    Ok(())
}

fn ensure_file(path: &Path, content: &str) -> Result<(), StartupError> {
    if path.exists() {
        return Ok(());
    }

    fs::write(path, content).map_err(|source| StartupError::CreateDefault {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Created {:?} with default content", path);
    Ok(())
}

/// Reads and parses the config file. Runs after [`ensure_default_files`], so
/// a file that is still unreadable here is a fatal startup error rather than
/// a reason to fall back to defaults.
pub fn resolve_config(config_path: &Path) -> Result<ServerConfig, StartupError> {
    let raw = fs::read_to_string(config_path).map_err(|source| StartupError::ReadConfig {
        path: config_path.to_path_buf(),
        source,
    })?;

    Ok(ServerConfig::from_ini(&raw))
}
