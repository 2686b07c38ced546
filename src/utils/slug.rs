use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Workspace id for a display name: lower-cased, each run of whitespace
/// replaced by a single dash. Other characters pass through unchanged.
pub fn workspace_id(name: &str) -> String {
    WHITESPACE_RUN.replace_all(&name.to_lowercase(), "-").into_owned()
}
