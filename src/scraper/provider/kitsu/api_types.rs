use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
pub struct Resource {
    pub attributes: Option<Attributes>,
}

#[derive(Debug, Deserialize)]
pub struct Attributes {
    /// Percentage rating serialized as a string, e.g. "78.5"
    #[serde(rename = "averageRating")]
    pub average_rating: Option<String>,
}
