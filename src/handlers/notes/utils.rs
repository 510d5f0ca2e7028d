use serde_json::Value;

use crate::error::ApiError;

/// Extract the trimmed `content` field from a create/update body.
///
/// An absent or empty body counts as `{}`. Anything that is not a JSON object
/// is "Invalid JSON body"; a missing, non-string or blank `content` is
/// "content is required".
pub fn parse_content(body: Option<&[u8]>) -> Result<String, ApiError> {
    let raw = match body {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => b"{}".as_slice(),
    };

    let value: Value = serde_json::from_slice(raw).map_err(|_| ApiError::invalid_json())?;
    let Value::Object(fields) = value else {
        return Err(ApiError::invalid_json());
    };

    let content = fields
        .get("content")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    if content.is_empty() {
        return Err(ApiError::content_required());
    }

    Ok(content.to_string())
}
