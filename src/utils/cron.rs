/// Number of fields in a standard five-field cron expression.
pub const CRON_FIELD_COUNT: usize = 5;

/// Shallow shape check: five whitespace-separated fields. Field contents are
/// left to the backend scheduler.
pub fn is_cron_shaped(expr: &str) -> bool {
    expr.split_whitespace().count() == CRON_FIELD_COUNT
}
