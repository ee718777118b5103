/// Streaming services the bot links to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamingService {
    Netflix,
    Crunchyroll,
}

impl StreamingService {
    pub const ALL: [Self; 2] = [Self::Netflix, Self::Crunchyroll];

    /// Lowercase needle matched against provider names
    pub const fn needle(self) -> &'static str {
        match self {
            Self::Netflix => "netflix",
            Self::Crunchyroll => "crunchyroll",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Netflix => "Netflix",
            Self::Crunchyroll => "Crunchyroll",
        }
    }
}

/// Watch links per streaming service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingLinks {
    pub netflix: Option<String>,
    pub crunchyroll: Option<String>,
}

impl StreamingLinks {
    /// Build links from `(name, url)` entries; the first match per service wins
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let mut links = Self::default();

        for (name, url) in entries {
            let Some(url) = url.filter(|u| !u.is_empty()) else {
                continue;
            };
            let name = name.to_lowercase();

            for service in StreamingService::ALL {
                let slot = links.slot_mut(service);
                if slot.is_none() && name.contains(service.needle()) {
                    *slot = Some(url.to_string());
                }
            }
        }

        links
    }

    pub fn get(&self, service: StreamingService) -> Option<&str> {
        match service {
            StreamingService::Netflix => self.netflix.as_deref(),
            StreamingService::Crunchyroll => self.crunchyroll.as_deref(),
        }
    }

    fn slot_mut(&mut self, service: StreamingService) -> &mut Option<String> {
        match service {
            StreamingService::Netflix => &mut self.netflix,
            StreamingService::Crunchyroll => &mut self.crunchyroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let links = StreamingLinks::from_entries([
            ("Crunchyroll", Some("https://crunchyroll.com/naruto")),
            ("NETFLIX", Some("https://netflix.com/title/1")),
        ]);

        assert_eq!(links.netflix.as_deref(), Some("https://netflix.com/title/1"));
        assert_eq!(
            links.crunchyroll.as_deref(),
            Some("https://crunchyroll.com/naruto")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let links = StreamingLinks::from_entries([
            ("Netflix", Some("https://netflix.com/first")),
            ("Netflix Kids", Some("https://netflix.com/second")),
        ]);

        assert_eq!(links.get(StreamingService::Netflix), Some("https://netflix.com/first"));
        assert!(links.get(StreamingService::Crunchyroll).is_none());
    }

    #[test]
    fn test_entries_without_url_are_skipped() {
        let links = StreamingLinks::from_entries([
            ("Netflix", None),
            ("Netflix", Some("https://netflix.com/late")),
        ]);

        assert_eq!(links.netflix.as_deref(), Some("https://netflix.com/late"));
    }
}
