//! Page types
//!
//! A page is decoded from a JSON body using two dot paths: one to the item
//! array and one to the next-page URL.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default location of the items array in a Front response
pub const DEFAULT_ITEMS_PATH: &str = "_results";

/// Default location of the next-page URL in a Front response
pub const DEFAULT_NEXT_PATH: &str = "_pagination.next";

/// Where a response body keeps its items and its cursor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Dot path to the items array
    pub items_path: String,
    /// Dot path to the next-page URL
    pub next_path: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            items_path: DEFAULT_ITEMS_PATH.to_string(),
            next_path: DEFAULT_NEXT_PATH.to_string(),
        }
    }
}

impl PageLayout {
    /// Create a layout from two dot paths
    pub fn new(items_path: impl Into<String>, next_path: impl Into<String>) -> Self {
        Self {
            items_path: items_path.into(),
            next_path: next_path.into(),
        }
    }
}

/// One decoded page
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Absolute URL of the next page
    pub next: Option<String>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a page from a response body
    ///
    /// A missing or `null` items field is an empty page. The cursor counts
    /// only when it is a non-empty string. Items are deserialized into `T`
    /// as-is; use `serde_json::Value` to keep them untyped.
    pub fn from_value(mut body: Value, layout: &PageLayout) -> Result<Self, String> {
        let next = match lookup(&body, &layout.next_path) {
            Some(Value::String(url)) if !url.is_empty() => Some(url.clone()),
            _ => None,
        };

        let items = match take(&mut body, &layout.items_path) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    serde_json::from_value(v)
                        .map_err(|e| format!("item {i} at '{}': {e}", layout.items_path))
                })
                .collect::<Result<Vec<T>, String>>()?,
            Some(other) => {
                return Err(format!(
                    "expected an array at '{}', found {}",
                    layout.items_path,
                    kind(&other)
                ))
            }
        };

        Ok(Self { items, next })
    }
}

/// Convert a dot path (`$.a.b` or `a.b`) into a JSON pointer (`/a/b`)
fn pointer(path: &str) -> String {
    path.strip_prefix("$.")
        .unwrap_or(path)
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| format!("/{}", s.replace('~', "~0").replace('/', "~1")))
        .collect()
}

fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    value.pointer(&pointer(path))
}

fn take(value: &mut Value, path: &str) -> Option<Value> {
    value.pointer_mut(&pointer(path)).map(Value::take)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
