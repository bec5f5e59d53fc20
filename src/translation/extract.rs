use serde_json::{Map, Value};

use super::error::ExtractionError;
use super::types::{Kind, LOCALIZED_DEFINITION_NOT_FOUND, TranslationResult};

/// Opening fence recognized at the very start of a reply.
pub const CODE_FENCE_OPEN: &str = "```json\n";
/// Closing fence; its last occurrence ends the JSON payload.
pub const CODE_FENCE_CLOSE: &str = "\n```";

/// Parses a model reply into a [`TranslationResult`].
///
/// Only the two literal fences above are understood; any other wrapping is
/// left in place and will fail to parse.
pub fn extract(raw: &str) -> Result<TranslationResult, ExtractionError> {
    let payload = strip_code_fence(raw);

    let value: Value =
        serde_json::from_str(payload).map_err(|e| ExtractionError::InvalidJson {
            detail: e.to_string(),
            raw: raw.to_string(),
        })?;

    map_fields(&value).map_err(|detail| ExtractionError::SchemaMismatch {
        detail,
        raw: raw.to_string(),
    })
}

/// Removes a leading ```` ```json ```` fence and everything from the last
/// closing fence onwards. A missing closing fence is tolerated.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix(CODE_FENCE_OPEN) else {
        return trimmed;
    };

    body.rfind(CODE_FENCE_CLOSE).map_or(body, |end| &body[..end])
}

fn map_fields(value: &Value) -> Result<TranslationResult, String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("expected a JSON object, found {}", type_name(value)))?;

    let kind_name = required_str(object, "type")?;
    let kind = Kind::parse(kind_name)
        .ok_or_else(|| format!("field 'type' must be \"word\" or \"sentence\", found {kind_name:?}"))?;

    Ok(TranslationResult {
        kind,
        subject: required_str(object, "word")?.to_string(),
        definition: required_str(object, "definition")?.to_string(),
        examples: string_list(object, "examples"),
        pronunciation: non_empty_str(object, "pronunciation"),
        localized_definition: object
            .get("persian_definition")
            .and_then(Value::as_str)
            .map_or_else(|| LOCALIZED_DEFINITION_NOT_FOUND.to_string(), str::to_string),
        synonyms: string_list(object, "synonyms"),
        acronym_expansion: non_empty_str(object, "acronym"),
    })
}

fn required_str<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    match object.get(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(format!(
            "field '{key}' must be a string, found {}",
            type_name(other)
        )),
        None => Err(format!("missing field '{key}'")),
    }
}

fn non_empty_str(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Absent or non-array fields become an empty list; non-string items are skipped.
fn string_list(object: &Map<String, Value>, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
