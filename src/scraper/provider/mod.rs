pub mod anilist;
pub mod jikan;
pub mod kitsu;
pub mod tmdb;

mod http;
mod traits;

pub use anilist::AniListProvider;
pub use http::{HttpClient, USER_AGENT};
pub use jikan::JikanProvider;
pub use kitsu::KitsuProvider;
pub use tmdb::TmdbProvider;
pub use traits::{MetadataProvider, RatingProvider};
