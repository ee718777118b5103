use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct Anime {
    pub mal_id: i64,
    pub url: Option<String>,
    pub images: Option<Images>,
    pub title: Option<String>,
    pub title_english: Option<String>,
    #[serde(rename = "type")]
    pub anime_type: Option<String>,
    pub episodes: Option<u32>,
    pub status: Option<String>,
    pub score: Option<f64>,
    pub synopsis: Option<String>,
    #[serde(default)]
    pub genres: Vec<Entity>,
    #[serde(default)]
    pub studios: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
pub struct Images {
    pub jpg: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct ImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Entity {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct StreamingSite {
    #[serde(default)]
    pub name: String,
    pub url: Option<String>,
}
