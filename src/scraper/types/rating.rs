/// Rating sources known to the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceId {
    Mal,
    AniList,
    Kitsu,
    Tmdb,
}

impl SourceId {
    pub const ALL: [Self; 4] = [Self::Mal, Self::AniList, Self::Kitsu, Self::Tmdb];

    /// Human-readable source name
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mal => "MAL",
            Self::AniList => "AniList",
            Self::Kitsu => "Kitsu",
            Self::Tmdb => "TMDB",
        }
    }

    /// Scale the source reports its ratings on
    pub const fn scale(self) -> RatingScale {
        match self {
            Self::Mal | Self::Tmdb => RatingScale::Ten,
            Self::AniList | Self::Kitsu => RatingScale::Hundred,
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bound of a raw rating scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingScale {
    Ten,
    Hundred,
}

impl RatingScale {
    pub const fn max(self) -> f64 {
        match self {
            Self::Ten => 10.0,
            Self::Hundred => 100.0,
        }
    }
}

/// One raw rating reported by a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSample {
    pub source: SourceId,
    pub raw_value: f64,
    pub raw_scale: RatingScale,
}

impl RatingSample {
    /// Create a sample on the source's native scale
    pub const fn new(source: SourceId, raw_value: f64) -> Self {
        Self {
            source,
            raw_value,
            raw_scale: source.scale(),
        }
    }

    /// Create a sample only when the raw value fits the source's scale.
    ///
    /// Zero is how upstream APIs report "not yet rated", so it is treated as
    /// absent along with non-finite and out-of-range values.
    pub fn checked(source: SourceId, raw_value: f64) -> Option<Self> {
        let scale = source.scale();
        (raw_value.is_finite() && raw_value > 0.0 && raw_value <= scale.max())
            .then(|| Self::new(source, raw_value))
    }

    /// Value on the common 0-10 scale
    pub fn normalized(&self) -> f64 {
        self.raw_value * (10.0 / self.raw_scale.max())
    }
}
