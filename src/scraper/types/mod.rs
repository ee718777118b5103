mod media;
mod rating;
mod streaming;

pub use media::{MediaRecord, MediaType};
pub use rating::{RatingSample, RatingScale, SourceId};
pub use streaming::{StreamingLinks, StreamingService};
