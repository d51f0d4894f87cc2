use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct FoodDto {
    pub name: String,
    pub description: String,
    pub url: String,
}

impl FoodDto {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Body returned by `Food/Create`.
#[derive(Debug, Deserialize, Clone)]
pub struct FoodCreated {
    #[serde(rename = "foodId", default)]
    pub food_id: Option<String>,
}

/// Envelope returned by edit, delete and list.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiResponseDto {
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PatchOperation {
    pub path: String,
    pub op: String,
    pub value: String,
}

impl PatchOperation {
    pub fn replace(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            op: "replace".to_string(),
            value: value.into(),
        }
    }
}
