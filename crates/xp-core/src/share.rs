//! Shareable plan state as a URL query string.
//!
//! Mirrors the `?currentExp=..&desiredExp=..&highestGym=..` links the
//! planner page produces, so a plan can be bookmarked or pasted back in.

use serde::Serialize;

const CURRENT_EXP: &str = "currentExp";
const DESIRED_EXP: &str = "desiredExp";
const HIGHEST_GYM: &str = "highestGym";

/// Inputs of a plan that survive in a share link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareState {
    pub current_exp: Option<u64>,
    pub desired_exp: Option<u64>,
    pub highest_gym: Option<u64>,
}

impl ShareState {
    /// Parses a query string, with or without the leading `?`.
    ///
    /// Keys and values are percent-decoded, with `+` read as a space.
    /// Unknown keys are ignored, values that are not integers count as
    /// absent, and a repeated key keeps its last value.
    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();
        let query = query.trim().trim_start_matches('?');
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match percent_decode(key).as_str() {
                CURRENT_EXP => &mut state.current_exp,
                DESIRED_EXP => &mut state.desired_exp,
                HIGHEST_GYM => &mut state.highest_gym,
                _ => continue,
            };
            *slot = parse_int(&percent_decode(value));
        }
        state
    }

    /// Renders the present fields as `key=value` pairs joined by `&`.
    pub fn to_query(&self) -> String {
        [
            (CURRENT_EXP, self.current_exp),
            (DESIRED_EXP, self.desired_exp),
            (HIGHEST_GYM, self.highest_gym),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| format!("{key}={value}")))
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Decodes `%XX` escapes and `+` the way form-encoded queries use them.
///
/// Malformed escapes are kept as written.
fn percent_decode(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let escaped = bytes
                    .get(i + 1..i + 3)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                if let Some(byte) = escaped {
                    decoded.push(byte);
                    i += 3;
                    continue;
                }
                decoded.push(b'%');
            }
            byte => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Reads a leading run of digits, like `parseInt` on a form value.
fn parse_int(value: &str) -> Option<u64> {
    let value = value.trim();
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse().ok()
}
