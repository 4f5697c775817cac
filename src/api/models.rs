use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{AppError, Result};

pub const DEFAULT_PROMPT: &str = "Summarize this transcript in 200 words.";

/// Decodes a JSON body by field name only. A non-object body has no fields,
/// so every optional field comes out absent; `null` has nothing to read at all.
fn decode_object<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    let fields = match serde_json::from_slice::<Value>(body)? {
        Value::Object(fields) => fields,
        Value::Null => return Err(AppError::internal(format!("{} is null", what))),
        _ => Map::new(),
    };
    Ok(serde_json::from_value(Value::Object(fields))?)
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
}

impl SummaryRequest {
    pub fn from_json(body: &[u8]) -> Result<Self> {
        decode_object(body, "request body")
    }

    /// The caller's prompt, or the default instruction when it is blank.
    pub fn effective_prompt(&self) -> &str {
        match self.prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => prompt,
            _ => DEFAULT_PROMPT,
        }
    }
}

/// oEmbed document for a video, kept exactly as the service sent it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VideoMetadata(Map<String, Value>);

impl VideoMetadata {
    pub fn title(&self) -> Option<&str> {
        self.text("title")
    }

    pub fn author_name(&self) -> Option<&str> {
        self.text("author_name")
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.text("thumbnail_url")
    }

    pub fn html(&self) -> Option<&str> {
        self.text("html")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// What the processing backend returns on success. Neither field is
/// interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessingResult {
    #[serde(default)]
    pub summary: Option<Value>,
    #[serde(default)]
    pub transcript: Option<Value>,
}

impl ProcessingResult {
    pub fn from_json(body: &[u8]) -> Result<Self> {
        decode_object(body, "backend response")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub metadata: Option<VideoMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Value>,
}

impl SummaryResponse {
    pub fn new(result: ProcessingResult, metadata: Option<VideoMetadata>) -> Self {
        SummaryResponse {
            metadata,
            summary: result.summary,
            transcript: result.transcript,
        }
    }
}
