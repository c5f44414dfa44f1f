//! Application-level error envelope detection.
//!
//! The server signals rejection with a JSON object whose first key is
//! literally `"e"`. Anything else — including an empty body — is a
//! success at the envelope level. The check is lexical on the first
//! key so a message body that merely *contains* an `"e"` field deeper
//! in is not mistaken for a rejection.

use serde_json::Value;

/// Returns the rejection reason if `body` is an error envelope.
pub(crate) fn rejection(body: &str) -> Option<String> {
    let rest = body.trim_start();
    let rest = rest.strip_prefix('{')?;
    if !rest.trim_start().starts_with("\"e\"") {
        return None;
    }

    // Shape confirmed; pull the reason out properly if the body parses.
    let reason = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("e"))
        .and_then(Value::as_str)
        .map(str::to_owned);
    Some(reason.unwrap_or_else(|| "request rejected".to_owned()))
}
