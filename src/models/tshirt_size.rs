use serde::{Deserialize, Deserializer, Serialize};

/// Named compute size from the billing catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TshirtSize {
    pub size_code: String,
    #[serde(default, deserialize_with = "number_or_text")]
    pub cpu: String,
    #[serde(default, deserialize_with = "number_or_text")]
    pub memory: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Integer(i64),
    Float(f64),
    Text(String),
}

// The billing service has returned both numeric and quoted sizes.
fn number_or_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrText>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberOrText::Integer(n)) => n.to_string(),
        Some(NumberOrText::Float(f)) => f.to_string(),
        Some(NumberOrText::Text(s)) => s.trim().to_string(),
        None => String::new(),
    })
}
