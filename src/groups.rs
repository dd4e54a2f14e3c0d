use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One group record from the companion export tool's `--list-json` output.
/// `name` and `members` are required; any other fields ride along untouched
/// so the upload round-trips the export format field-for-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub members: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Read and validate a groups roster file.
pub fn load_groups(path: &Path) -> Result<Vec<Group>> {
    debug!("Reading groups from {:?}", path);
    let text = fs::read_to_string(path)?;
    parse_groups(&text).map_err(|reason| Error::InvalidGroupsFile {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_groups(text: &str) -> std::result::Result<Vec<Group>, String> {
    let groups: Vec<Group> = serde_json::from_str(text).map_err(|err| err.to_string())?;
    for (index, group) in groups.iter().enumerate() {
        if group.members.is_empty() {
            return Err(format!(
                "group {:?} (record {}) has no members",
                group.name, index
            ));
        }
    }
    Ok(groups)
}
