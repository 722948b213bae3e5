//! NewsAPI top-headlines client

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::NewsArticle;
use crate::random::RandomSource;

/// Base URL for NewsAPI
pub const NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";

/// Number of articles in a synthetic feed
pub const SYNTHETIC_ARTICLE_COUNT: usize = 5;

const HEADLINE_TEMPLATES: [&str; 8] = [
    "Breakthrough reshapes the {} landscape",
    "Analysts weigh in on the latest {} trends",
    "Five things to watch in {} this week",
    "Startups race to lead the next wave of {}",
    "Regulators take a closer look at {}",
    "Why {} is on everyone's radar",
    "Inside the {} boom: what the numbers say",
    "Experts debate the future of {}",
];

const SOURCES: [&str; 5] = ["Daily Wire Service", "The Ledger", "Morning Brief", "Global Desk", "Signal News"];

/// Errors that can occur when fetching news
#[derive(Debug, Error)]
pub enum NewsError {
    /// No API key configured
    #[error("No news API key configured")]
    MissingApiKey,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// API answered with a non-ok status field
    #[error("API returned status '{0}'")]
    ApiStatus(String),
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: String,
    source: RawSource,
    published_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

/// Client for the NewsAPI `top-headlines` endpoint
#[derive(Debug, Clone)]
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    country: String,
}

impl NewsClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, country: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
            country: country.into(),
        }
    }

    /// Fetches top headlines for `category`
    pub async fn fetch_headlines(&self, category: &str) -> Result<Vec<NewsArticle>, NewsError> {
        let api_key = self.api_key.as_deref().ok_or(NewsError::MissingApiKey)?;

        let response = self
            .client
            .get(format!("{}/top-headlines", self.base_url))
            .query(&[
                ("category", category),
                ("country", self.country.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;
        parse_headlines(&text)
    }
}

fn parse_headlines(body: &str) -> Result<Vec<NewsArticle>, NewsError> {
    let response: HeadlinesResponse = serde_json::from_str(body)?;
    if response.status != "ok" {
        return Err(NewsError::ApiStatus(response.status));
    }

    // Removed articles come back with a null title
    Ok(response
        .articles
        .into_iter()
        .filter_map(|raw| {
            Some(NewsArticle {
                title: raw.title?,
                description: raw.description.unwrap_or_default(),
                url: raw.url,
                source: raw.source.name.unwrap_or_else(|| "Unknown".to_string()),
                published_at: raw.published_at,
            })
        })
        .collect())
}

/// Publication anchor for seeded fallbacks: 2024-01-01T00:00:00Z
pub const SEEDED_ANCHOR_SECS: i64 = 1_704_067_200;

/// Generates a feed of synthetic headlines about `category`
///
/// Articles are dated up to 48 hours before `anchor`.
pub fn synthetic_headlines(
    category: &str,
    anchor: DateTime<Utc>,
    rng: &RandomSource,
) -> Vec<NewsArticle> {
    (0..SYNTHETIC_ARTICLE_COUNT)
        .map(|i| {
            let title = rng.pick(&HEADLINE_TEMPLATES).replace("{}", category);
            let hours_ago = rng.int(0..=48);
            NewsArticle {
                description: format!("A roundup of recent developments in {}.", category),
                url: format!("https://news.example.com/{}/{}", category, i + 1),
                source: rng.pick(&SOURCES).to_string(),
                published_at: anchor - Duration::hours(i64::from(hours_ago)),
                title,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RESPONSE: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": null, "name": "Tech Daily"},
                "author": "A. Writer",
                "title": "Chips get faster",
                "description": "New silicon ships.",
                "url": "https://example.com/chips",
                "publishedAt": "2024-07-15T12:30:00Z"
            },
            {
                "source": {"id": null, "name": "[Removed]"},
                "title": null,
                "description": null,
                "url": "https://removed.com",
                "publishedAt": "1970-01-01T00:00:00Z"
            }
        ]
    }"#;

    #[test]
    fn test_parse_valid_response_skips_removed() {
        let articles = parse_headlines(VALID_RESPONSE).expect("Should parse valid response");

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Chips get faster");
        assert_eq!(articles[0].source, "Tech Daily");
        assert_eq!(articles[0].published_at.to_rfc3339(), "2024-07-15T12:30:00+00:00");
    }

    #[test]
    fn test_parse_error_status() {
        let body = r#"{"status": "error", "code": "apiKeyInvalid", "message": "bad key"}"#;
        let result = parse_headlines(body);
        assert!(matches!(result, Err(NewsError::ApiStatus(ref s)) if s == "error"));
    }

    #[test]
    fn test_synthetic_headlines_mention_category() {
        let rng = RandomSource::seeded(4);
        let anchor = Utc::now();
        let articles = synthetic_headlines("technology", anchor, &rng);

        assert_eq!(articles.len(), SYNTHETIC_ARTICLE_COUNT);
        for article in &articles {
            assert!(article.title.contains("technology"));
            assert!(article.url.starts_with("https://news.example.com/technology/"));
            assert!(article.published_at <= anchor);
            assert!(article.published_at >= anchor - Duration::hours(48));
        }
    }

    #[test]
    fn test_synthetic_headlines_fixed_anchor_is_reproducible() {
        let anchor = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(anchor.timestamp(), SEEDED_ANCHOR_SECS);

        let first = synthetic_headlines("science", anchor, &RandomSource::seeded(9));
        let second = synthetic_headlines("science", anchor, &RandomSource::seeded(9));

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_without_key_fails_fast() {
        let client = NewsClient::new(NEWS_API_BASE_URL, None, "us");
        let result = client.fetch_headlines("technology").await;
        assert!(matches!(result, Err(NewsError::MissingApiKey)));
    }
}
