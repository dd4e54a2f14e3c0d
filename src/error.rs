use std::path::PathBuf;

use itertools::Itertools;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Response bodies longer than this are cut down before display.
const MAX_ERROR_BODY_LEN: usize = 500;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{} credential not found (searched {})", .name, join_paths(.searched))]
    CredentialNotFound { name: String, searched: Vec<PathBuf> },

    #[error("credential file {} is empty", .path.display())]
    CredentialEmpty { path: PathBuf },

    #[error("invalid groups file {}: {}", .path.display(), .reason)]
    InvalidGroupsFile { path: PathBuf, reason: String },

    #[error("calendar fetch failed: {}", .reason)]
    CalendarFetch { reason: String },

    #[error("queue API returned {}: {}", .status, truncate_body(.body))]
    Upstream { status: StatusCode, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).join(", ")
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}... ({} bytes total)", &body[..cut], body.len()),
    }
}
