// UptimeRobot getMonitors parameter mapping
use serde_json::{Map, Value};

use crate::proxy::error::ProxyError;

pub const API_KEY_PARAM: &str = "api_key";

/// Fixed parameters after `api_key`, in the order they are sent
const FIXED_PARAMS: [(&str, &str); 4] = [
    ("format", "json"),
    ("logs", "1"),
    ("response_times", "1"),
    ("all_time_uptime_ratio", "1"),
];

/// Inbound JSON body. Fields are opaque overrides for the upstream call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientRequest {
    fields: Map<String, Value>,
}

impl ClientRequest {
    /// Only malformed JSON is rejected. Non-object bodies are spread the way
    /// an object spread treats them: arrays and strings contribute their
    /// indices (`"0"`, `"1"`, ...), scalars and `null` contribute nothing.
    pub fn from_slice(body: &[u8]) -> Result<Self, ProxyError> {
        let fields = match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => fields,
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item))
                .collect(),
            Value::String(s) => s
                .chars()
                .enumerate()
                .map(|(i, c)| (i.to_string(), Value::String(c.to_string())))
                .collect(),
            Value::Null | Value::Bool(_) | Value::Number(_) => Map::new(),
        };
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Map<String, Value>> for ClientRequest {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// Ordered form parameters for getMonitors.
#[derive(Clone, PartialEq)]
pub struct UpstreamParameters {
    entries: Vec<(String, String)>,
}

impl UpstreamParameters {
    pub fn new(api_key: &str) -> Self {
        let mut entries = Vec::with_capacity(FIXED_PARAMS.len() + 1);
        entries.push((API_KEY_PARAM.to_string(), api_key.to_string()));
        entries.extend(
            FIXED_PARAMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        Self { entries }
    }

    /// Overlay client fields. A colliding key keeps its position and takes
    /// the client value; new keys are appended.
    ///
    /// With `lock_api_key` a client-supplied `api_key` is dropped.
    pub fn merge(&mut self, client: &ClientRequest, lock_api_key: bool) {
        for (key, value) in client.fields() {
            if lock_api_key && key == API_KEY_PARAM {
                tracing::warn!("Ignoring client-supplied api_key override");
                continue;
            }

            let value = flatten_value(value);
            match self.entries.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value,
                None => self.entries.push((key.clone(), value)),
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// `application/x-www-form-urlencoded` body
    pub fn to_form(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.entries.iter())
            .finish()
    }
}

impl std::fmt::Debug for UpstreamParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in &self.entries {
            if k == API_KEY_PARAM {
                map.entry(k, &"<redacted>");
            } else {
                map.entry(k, v);
            }
        }
        map.finish()
    }
}

/// Render a JSON value as a single form value.
///
/// Numbers follow JavaScript's number-to-string (`1.0` -> `"1"`), arrays
/// become comma-joined lists (`null` items render empty). Objects become
/// compact JSON rather than JavaScript's `[object Object]`, on purpose.
pub fn flatten_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => flatten_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

fn number_to_string(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        // Beyond 1e21 JavaScript switches to exponent notation
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}
