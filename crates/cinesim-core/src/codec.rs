//! # Embedding Codec
//!
//! Stored embeddings are text. The canonical encoding is a JSON array of
//! numbers; the only other accepted form is a bracketed list literal
//! (`[0.1, 0.2,]` or `(0.1, 0.2)`) as written by the ingestion scripts.
//! Anything else is rejected with [`CinesimError::EmbeddingParse`].

use crate::error::{CinesimError, Result};

/// Decodes a stored embedding field into a vector.
///
/// # Errors
///
/// Returns `CinesimError::EmbeddingParse` if the field is neither a JSON
/// array of numbers nor a list literal, is empty, or holds a non-finite value.
pub fn decode_embedding(raw: &str) -> Result<Vec<f32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CinesimError::EmbeddingParse("field is empty".into()));
    }

    let values = match serde_json::from_str::<Vec<f32>>(trimmed) {
        Ok(values) => values,
        Err(_) => decode_literal(trimmed)?,
    };

    if values.is_empty() {
        return Err(CinesimError::EmbeddingParse("vector has no components".into()));
    }
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(CinesimError::EmbeddingParse(format!(
            "component {pos} is not a finite number"
        )));
    }

    Ok(values)
}

/// Encodes an embedding in the canonical JSON form.
#[must_use]
pub fn encode_embedding(values: &[f32]) -> String {
    let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(","))
}

fn decode_literal(input: &str) -> Result<Vec<f32>> {
    let inner = input
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| input.strip_prefix('(').and_then(|s| s.strip_suffix(')')))
        .ok_or_else(|| {
            CinesimError::EmbeddingParse(format!(
                "expected a bracketed list, found {:?}",
                preview(input)
            ))
        })?;

    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    // A single trailing comma is valid literal syntax.
    let inner = inner.strip_suffix(',').unwrap_or(inner);

    inner
        .split(',')
        .enumerate()
        .map(|(pos, part)| {
            let part = part.trim();
            part.parse::<f32>().map_err(|_| {
                CinesimError::EmbeddingParse(format!(
                    "component {pos} is not a number: {:?}",
                    preview(part)
                ))
            })
        })
        .collect()
}

fn preview(s: &str) -> String {
    const MAX: usize = 32;
    match s.char_indices().nth(MAX) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}
