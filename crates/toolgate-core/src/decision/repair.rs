//! Text-level JSON repair for small-model output
//!
//! Small local models frequently emit near-JSON: leading commentary before
//! the object, a truncated closing brace, `null` where an empty object was
//! asked for, or a newline where a comma belongs. These heuristics are a
//! compatibility shim for those specific defects, kept as a pure text
//! transform so they stay independently testable and replaceable without
//! touching the structural parser.
//!
//! The whole pipeline is idempotent: repairing already-repaired text is a
//! no-op.

/// Extract the decision object from raw model text and fix the common
/// defects. Returns `"{}"` when the text contains no object at all.
pub fn repair(raw: &str) -> String {
    // 1. Slice from the first '{', dropping any leading commentary.
    let Some(start) = raw.find('{') else {
        return "{}".to_string();
    };
    let mut cleaned = raw[start..].trim().to_string();

    // 2. Balance truncated output by appending the missing closing braces.
    let opens = cleaned.matches('{').count();
    let closes = cleaned.matches('}').count();
    if opens > closes {
        cleaned.push_str(&"}".repeat(opens - closes));
    }

    // 3. The schema wants an object for arguments, never null.
    cleaned = cleaned.replace("\"arguments\": null", "\"arguments\": {}");

    // 4. Re-insert commas dropped at line breaks between quoted fields.
    insert_missing_commas(&cleaned)
}

/// Join adjacent quoted fields split across lines with the comma the model
/// forgot: a line ending in `"` followed by a line starting with `"` gets
/// a trailing comma.
fn insert_missing_commas(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim_end();
        let next_opens_field = lines
            .get(i + 1)
            .map(|next| next.trim_start().starts_with('"'))
            .unwrap_or(false);

        if trimmed.ends_with('"') && next_opens_field {
            out.push(format!("{trimmed},"));
        } else {
            out.push((*line).to_string());
        }
    }

    out.join("\n")
}
