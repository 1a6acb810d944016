#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use rental_scout::fetch::{FeedTransport, TransportResponse};
use rental_scout::types::{
    CategoryBucket, Listing, ListingStatus, PropertyType, Result, ScoutError,
};

/// One scripted transport reply.
pub enum Reply {
    Status(u16, &'static str),
    NetworkError(&'static str),
}

/// Transport that plays back a fixed reply sequence and records every call,
/// so retry walks can be asserted without a live server.
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    async fn get(&self, url: &str, user_agent: &str) -> Result<TransportResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), user_agent.to_string()));

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Status(status, body)) => Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            Some(Reply::NetworkError(message)) => Err(ScoutError::Fetch(message.to_string())),
            None => panic!("transport called more times than scripted"),
        }
    }
}

/// Transport that serves a per-city canned feed, keyed on the `query`
/// parameter of the requested URL. Cities in `fail_cities` always answer 500.
pub struct CityFeedTransport {
    feeds: Vec<(String, String)>,
    fail_cities: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl CityFeedTransport {
    pub fn new(feeds: Vec<(String, String)>, fail_cities: Vec<String>) -> Self {
        Self {
            feeds,
            fail_cities,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn city_of(url: &str) -> Option<String> {
        let parsed = url::Url::parse(url).ok()?;
        parsed
            .query_pairs()
            .find(|(k, _)| k == "query")
            .map(|(_, v)| v.into_owned())
    }
}

#[async_trait]
impl FeedTransport for CityFeedTransport {
    async fn get(&self, url: &str, _user_agent: &str) -> Result<TransportResponse> {
        self.calls.lock().unwrap().push(url.to_string());

        let city = Self::city_of(url).unwrap_or_default();
        if self.fail_cities.contains(&city) {
            return Ok(TransportResponse {
                status: 500,
                body: String::new(),
            });
        }

        let feed = self
            .feeds
            .iter()
            .find(|(c, _)| *c == city)
            .map(|(_, f)| f.clone())
            .unwrap_or_else(|| rss_feed(&[]));

        Ok(TransportResponse {
            status: 200,
            body: feed,
        })
    }
}

/// Minimal RSS 2.0 document with the given (title, link, description) items.
pub fn rss_feed(items: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <rss version=\"2.0\"><channel>\
         <title>craigslist apartments / housing for rent</title>\
         <link>https://losangeles.craigslist.org</link>\
         <description>search results</description>",
    );
    for (title, link, description) in items {
        xml.push_str(&format!(
            "<item><title>{}</title><link>{}</link><description>{}</description>\
             <pubDate>Mon, 15 Jan 2024 10:00:00 GMT</pubDate></item>",
            title, link, description
        ));
    }
    xml.push_str("</channel></rss>");
    xml
}

pub fn sample_listing(listing_id: &str, city: &str, price: u32) -> Listing {
    Listing {
        listing_id: listing_id.to_string(),
        source: "craigslist".to_string(),
        first_seen_at: "2024-01-15T10:00:00+00:00".to_string(),
        city: city.to_string(),
        price,
        bedrooms: 2,
        square_feet: None,
        property_type: PropertyType::Apartment,
        category_bucket: CategoryBucket::Apartment,
        status: ListingStatus::New,
        address: "Some Street".to_string(),
        url: format!("https://losangeles.craigslist.org/{}.html", listing_id),
    }
}
