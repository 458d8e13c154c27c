use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegistryRecord {
    /// `None` when the entry has no usable `seller_id` (missing, null, nested).
    pub seller_id: Option<String>,
    pub name: String,
    pub domain: String,
}

impl RegistryRecord {
    pub fn has_seller_id(&self, seller_id: &str) -> bool {
        self.seller_id.as_deref() == Some(seller_id)
    }
}

/// Scalar JSON values compared as text: `5` and `"5"` are the same id.
pub(crate) fn coerce_scalar(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Parses a `sellers.json` body into its seller records.
///
/// A document without `sellers` has no records. Entries that are not JSON
/// objects are skipped.
pub fn parse_sellers_document(body: &str) -> CoreResult<Vec<RegistryRecord>> {
    let doc: Value =
        serde_json::from_str(body).map_err(|e| CoreError::RemoteParseFailed(e.to_string()))?;
    let obj = doc.as_object().ok_or_else(|| {
        CoreError::RemoteParseFailed("document root is not a JSON object".to_string())
    })?;
    let sellers = match obj.get("sellers") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(a)) => a,
        Some(_) => {
            return Err(CoreError::RemoteParseFailed(
                "`sellers` is not an array".to_string(),
            ))
        }
    };

    Ok(sellers
        .iter()
        .filter_map(|s| s.as_object())
        .map(|s| RegistryRecord {
            seller_id: s.get("seller_id").and_then(coerce_scalar),
            name: s.get("name").and_then(coerce_scalar).unwrap_or_default(),
            domain: s.get("domain").and_then(coerce_scalar).unwrap_or_default(),
        })
        .collect())
}
