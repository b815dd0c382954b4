//! Slash-path parsing for the virtual tree.
//!
//! Paths are always relative to the owner's virtual root. `""` and `"/"`
//! both name the root itself. Parsing is purely lexical; resolution against
//! the database lives in the node repository.

use crate::{Result, VdriveError};

use super::node::validate_node_name;

/// Split a slash path into its segments.
///
/// Leading and trailing slashes are ignored, so `"/docs/a.txt"` and
/// `"docs/a.txt/"` parse identically. The root path yields an empty vector.
/// Empty segments (`"a//b"`) and segments that are not valid node names are
/// rejected.
pub fn split_path(path: &str) -> Result<Vec<String>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(VdriveError::Validation(format!(
                "path contains an empty segment: {path:?}"
            )));
        }
        validate_node_name(segment)?;
        segments.push(segment.to_string());
    }
    Ok(segments)
}
