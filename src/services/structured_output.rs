//! Schema-guided prompting and tolerant parsing of model replies.
//!
//! The output schema is generated from the Rust type and appended to the
//! prompt. Replies are scanned for balanced JSON objects/arrays (ignoring
//! code fences and surrounding prose) and the first one that deserializes
//! into the target type wins.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

use crate::{
    errors::AppResult,
    services::model_service::{ModelClient, PromptRequest},
};

/// Instructions telling the model to answer with JSON matching `T`.
pub fn schema_instructions<T: JsonSchema>() -> String {
    let schema = schema_for!(T);
    let schema_json = serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string());
    format!(
        "Respond ONLY with a single JSON value that conforms to this JSON schema. \
         Do not wrap it in markdown or add commentary.\n\n{}",
        schema_json
    )
}

/// Byte spans of every balanced `{...}` / `[...]` structure in `text`,
/// nested ones included, ordered by start so outer structures come first.
///
/// A closer pairs with the nearest open bracket of its kind, so stray
/// brackets in surrounding prose do not hide a complete structure.
pub fn find_json_spans(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut stack: Vec<(u8, usize)> = Vec::new();
    let mut in_string = false;
    let mut escape = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escape {
                escape = false;
            } else if b == b'\\' {
                escape = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' if !stack.is_empty() => in_string = true,
            b'{' | b'[' => stack.push((b, i)),
            b'}' | b']' => {
                let expected = if b == b'}' { b'{' } else { b'[' };
                if let Some(pos) = stack.iter().rposition(|&(open, _)| open == expected) {
                    let (_, start) = stack[pos];
                    stack.truncate(pos);
                    spans.push((start, i + 1));
                }
            }
            _ => {}
        }
    }

    spans.sort_by_key(|&(start, _)| start);
    spans
}

/// Parses the first JSON structure in `raw` that deserializes into `T`.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = serde_json::from_str::<T>(trimmed) {
        return Some(value);
    }

    find_json_spans(trimmed)
        .into_iter()
        .find_map(|(start, end)| serde_json::from_str::<T>(&trimmed[start..end]).ok())
}

/// Runs a prompt with `T`'s schema appended and parses the reply.
///
/// `Ok(None)` means the model answered but produced nothing matching `T`.
pub async fn prompt_structured<T>(
    model: &dyn ModelClient,
    mut request: PromptRequest,
) -> AppResult<Option<T>>
where
    T: JsonSchema + DeserializeOwned,
{
    request.text = format!("{}\n\n{}", request.text, schema_instructions::<T>());
    let name = request.name;
    let raw = model.generate(request).await?;
    let parsed = extract_json::<T>(&raw);
    if parsed.is_none() {
        log::warn!(
            "Prompt {} returned no output conforming to its schema ({} chars)",
            name,
            raw.len()
        );
    }
    Ok(parsed)
}
