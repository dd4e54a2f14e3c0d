use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// Session token for the Queue, as saved from a signed-in browser session.
pub const SESSION_FILENAME: &str = ".ohsession";
/// API key for the Google Calendar API.
pub const GCAL_KEY_FILENAME: &str = ".gcalkey";

/// Resolve a credential by searching the working directory, then the home
/// directory, for `filename`. The first existing file wins; its contents are
/// returned with surrounding whitespace trimmed.
///
/// `name` only labels the credential in error messages.
pub fn resolve(name: &str, filename: &str) -> Result<String> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd);
    }
    if let Some(home) = dirs::home_dir() {
        candidates.push(home);
    }
    resolve_in(name, filename, &candidates)
}

fn resolve_in(name: &str, filename: &str, candidates: &[PathBuf]) -> Result<String> {
    let mut searched = Vec::new();
    for dir in candidates {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return read_credential(&candidate);
        }
        searched.push(candidate);
    }
    Err(Error::CredentialNotFound {
        name: name.to_string(),
        searched,
    })
}

fn read_credential(path: &Path) -> Result<String> {
    debug!("Reading credential from {:?}", path);
    let contents = fs::read_to_string(path)?;
    let token = contents.trim();
    if token.is_empty() {
        return Err(Error::CredentialEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(token.to_string())
}
