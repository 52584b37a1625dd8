//! Environment facts supplied by the host: principal, persisted key-value
//! snapshot, location, theme and viewport. Every fact is independently optional.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Parsed location: query-string and fragment as flat string maps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub query: BTreeMap<String, String>,
    #[serde(default)]
    pub hash: BTreeMap<String, String>,
}

/// Page reference exposed through `app.pages`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub id: String,
    pub name: String,
}

/// Facts from the environment provider
///
/// Hosts without a browser surface leave everything `None`; the context
/// builder substitutes the documented empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentFacts {
    /// Signed-in principal
    #[serde(default)]
    pub current_user: Option<Value>,
    /// Persisted key-value snapshot
    #[serde(default)]
    pub local_storage: Option<Map<String, Value>>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Resolved theme color tokens
    #[serde(default)]
    pub theme: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Environment label such as `production` or `staging`
    #[serde(default)]
    pub environment: Option<String>,
}

/// Parse raw query-string and fragment text into a `Location`
///
/// Accepts an optional leading `?` / `#`. Pairs without `=` map to an empty
/// value; later duplicates win.
pub fn parse_location(query: &str, fragment: &str) -> Location {
    Location {
        query: parse_pairs(query.trim_start_matches('?')),
        hash: parse_pairs(fragment.trim_start_matches('#')),
    }
}

fn parse_pairs(raw: &str) -> BTreeMap<String, String> {
    raw.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
