//! Manual fallback search links for sites without scrapeable feeds, built
//! from the configured filters.

use serde::Serialize;

use crate::config::SearchConfig;

#[derive(Debug, Clone, Serialize)]
pub struct ManualLink {
    pub source: String,
    pub label: String,
    pub url: String,
}

pub fn manual_links(config: &SearchConfig) -> Vec<ManualLink> {
    let (min_price, max_price, min_bedrooms) =
        (config.min_price, config.max_price, config.min_bedrooms);

    vec![
        ManualLink {
            source: "Zillow".to_string(),
            label: "Search Zillow".to_string(),
            url: format!(
                "https://www.zillow.com/homes/for_rent/?searchQueryState=%7B%22pagination%22%3A%7B%7D%2C%22mapBounds%22%3A%7B%22west%22%3A-119.0%2C%22east%22%3A-118.4%2C%22south%22%3A34.0%2C%22north%22%3A34.3%7D%2C%22isMapVisible%22%3Atrue%2C%22filterState%22%3A%7B%22price%22%3A%7B%22min%22%3A{min_price}%2C%22max%22%3A{max_price}%7D%2C%22beds%22%3A%7B%22min%22%3A{min_bedrooms}%7D%2C%22fore%22%3A%7B%22value%22%3Afalse%7D%2C%22mf%22%3A%7B%22value%22%3Afalse%7D%2C%22manu%22%3A%7B%22value%22%3Afalse%7D%2C%22land%22%3A%7B%22value%22%3Afalse%7D%2C%22ah%22%3A%7B%22value%22%3Atrue%7D%7D%2C%22isListVisible%22%3Atrue%7D"
            ),
        },
        ManualLink {
            source: "Realtor.com".to_string(),
            label: "Search Realtor.com".to_string(),
            url: format!(
                "https://www.realtor.com/apartments/Woodland-Hills_CA/price-{min_price}-{max_price}/beds-{min_bedrooms}"
            ),
        },
        ManualLink {
            source: "Rent.com".to_string(),
            label: "Search Rent.com".to_string(),
            url: format!(
                "https://www.rent.com/california/woodland-hills-apartments/price-{min_price}-{max_price}"
            ),
        },
        ManualLink {
            source: "Apartments.com".to_string(),
            label: "Search Apartments.com".to_string(),
            url: "https://www.apartments.com/woodland-hills-ca/?bb=8nly8sj01Hmqw7jnB".to_string(),
        },
    ]
}
