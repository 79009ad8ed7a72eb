use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    pub name: String,
    #[serde(default)]
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub answers: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub sheet: Option<String>,
}
