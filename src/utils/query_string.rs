use urlencoding::encode;

/// Query parameters as sent to the backend, in request order.
pub type QueryParams = Vec<(&'static str, String)>;

/// Render parameters as an encoded query string, dropping empty values.
pub fn build_query_string(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
