use std::collections::HashMap;
use std::time::Duration;
use url::form_urlencoded;

/// Base search endpoint for the single supported source.
pub const SEARCH_BASE_URL: &str = "https://losangeles.craigslist.org/search/apa";

/// Search filters and classification tables. Built once at startup and passed
/// by reference into the classifier and orchestrator, so tests can substitute
/// their own fixtures.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub min_price: u32,
    pub max_price: u32,
    pub min_bedrooms: u32,
    /// Target cities, in fan-out order. Also drives city resolution from
    /// listing titles (first match wins).
    pub locations: Vec<String>,
    /// Raw city text (lower-cased) to canonical city name.
    pub city_aliases: HashMap<String, String>,
    /// Phrases that mark a listing as pet-hostile. Any match drops the
    /// listing entirely.
    pub no_pet_markers: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let locations = [
            "Woodland Hills",
            "West Hills",
            "Newbury Park",
            "Calabasas",
            "Sherman Oaks",
            "Thousand Oaks",
            "Oak Park",
            "Simi Valley",
        ]
        .map(String::from)
        .to_vec();

        let city_aliases = [
            ("canoga park", "West Hills"),
            ("winnetka", "West Hills"),
            ("reseda", "Woodland Hills"),
            ("encino", "Woodland Hills"),
            ("northridge", "Woodland Hills"),
            ("tarzana", "Tarzana"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let no_pet_markers = [
            "no pets",
            "no pet",
            "pets not allowed",
            "pet free",
            "no dogs",
            "no cats",
        ]
        .map(String::from)
        .to_vec();

        Self {
            min_price: 2000,
            max_price: 2700,
            min_bedrooms: 1,
            locations,
            city_aliases,
            no_pet_markers,
        }
    }
}

impl SearchConfig {
    /// Resolve a raw city name through the alias table. Unmapped names pass
    /// through unchanged, original casing preserved.
    pub fn normalize_city(&self, city: &str) -> String {
        let key = city.to_lowercase().trim().to_string();
        self.city_aliases
            .get(&key)
            .cloned()
            .unwrap_or_else(|| city.to_string())
    }

    /// Hard pet filter: any marker phrase appearing in the text excludes the
    /// listing from ingestion.
    pub fn is_no_pets(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.no_pet_markers.iter().any(|m| lower.contains(m))
    }

    /// Ordered feed URL variants for one city query. Several query-parameter
    /// permutations, so a single blocked or malformed combination does not
    /// take the whole city down.
    pub fn feed_url_variants(&self, city_query: &str) -> Vec<String> {
        let encoded: String = form_urlencoded::byte_serialize(city_query.as_bytes()).collect();
        vec![
            format!(
                "{SEARCH_BASE_URL}?format=rss&query={encoded}&min_price={}&max_price={}&min_bedrooms={}",
                self.min_price, self.max_price, self.min_bedrooms
            ),
            format!(
                "{SEARCH_BASE_URL}?query={encoded}&min_price={}&max_price={}&min_bedrooms={}&format=rss&sort=date",
                self.min_price, self.max_price, self.min_bedrooms
            ),
            format!("{SEARCH_BASE_URL}?query={encoded}&format=rss"),
        ]
    }
}

/// HTTP retrieval policy for the feed fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Attempts per URL variant before moving on.
    pub max_attempts: u32,
    /// First backoff delay; doubles per attempt.
    pub backoff_base: Duration,
    /// Upper bound on the random jitter added to each backoff.
    pub backoff_jitter: Duration,
    pub timeout: Duration,
    /// Identification headers rotated per attempt:
    /// `user_agents[(attempt - 1) % len]`.
    pub user_agents: Vec<String>,
    pub accept: String,
    pub referer: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let user_agents = [
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_6_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36",
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ]
        .map(String::from)
        .to_vec();

        Self {
            max_attempts: 3,
            backoff_base: Duration::from_millis(400),
            backoff_jitter: Duration::from_millis(300),
            timeout: Duration::from_secs(30),
            user_agents,
            accept: "application/rss+xml, application/xml;q=0.9, */*;q=0.8".to_string(),
            referer: "https://losangeles.craigslist.org/".to_string(),
        }
    }
}
