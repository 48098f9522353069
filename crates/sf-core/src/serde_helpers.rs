//! Shared serde helper functions used across multiple modules.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional field that the source data writes either as a
/// JSON string or as a bare number (e.g. `"userId": "49"` vs
/// `"userId": 49`, depending on the export that produced the log file).
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
