// Request helpers
pub mod query_string;

// Parsing utilities
pub mod cron;
pub mod parse_int;
pub mod slug;

// Re-export all utilities for convenient access
pub use query_string::{build_query_string, QueryParams};
pub use cron::is_cron_shaped;
pub use parse_int::parse_int;
pub use slug::workspace_id;
