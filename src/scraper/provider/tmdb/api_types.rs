use serde::Deserialize;

// Search responses
#[derive(Debug, Deserialize)]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
}

/// Entry of `/search/multi`; movies carry `title`, shows carry `name`
#[derive(Debug, Deserialize)]
pub struct MultiResult {
    pub id: i64,
    pub media_type: Option<String>,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub popularity: Option<f64>,
}

// Detail responses
#[derive(Debug, Deserialize)]
pub struct Details {
    pub vote_average: Option<f64>,
    pub vote_count: Option<i32>,
}
