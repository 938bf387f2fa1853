//! `Cookie` header parsing.
//!
//! Lenient on purpose: browsers and proxies send all kinds of malformed pairs,
//! and a bad cookie must never turn into a request failure.

use std::collections::BTreeMap;

/// Parse one `Cookie` header value into `map`. Later names overwrite earlier ones.
///
/// A chunk without `=` is stored under the empty name.
pub fn parse_into(raw: &str, map: &mut BTreeMap<String, String>) {
    for chunk in raw.split(';') {
        let (key, value) = chunk.split_once('=').unwrap_or(("", chunk));
        let key = key.trim();
        let value = unquote(value.trim());

        if key.is_empty() && value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.to_string());
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}
