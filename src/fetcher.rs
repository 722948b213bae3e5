//! Cached access to every feed
//!
//! `DataFetcher` owns the cache, the random source and the HTTP clients, and
//! exposes one accessor per feed. Feeds backed by an API fall back to synthetic
//! data inside their producer, so a fallback is cached like any other value and
//! the API is tried again only after the TTL runs out.

use std::convert::Infallible;
use std::fmt::{self, Display};
use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::cache::{Clock, FetchError, SystemClock, TimedCache};
use crate::config::FetcherConfig;
use crate::data::{
    crypto, news, synthetic, weather, CryptoClient, CryptoQuote, DepartmentMetrics,
    JobPosting, NewsArticle, NewsClient, PropertyListing, Restaurant, RoadSegment, SensorReading,
    StockClient, StockQuote, WeatherClient, WeatherReport,
};
use crate::random::RandomSource;

/// A feed plus its parameter, if it takes one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Crypto,
    Stocks,
    Weather { city: String },
    News { category: String },
    Jobs,
    RealEstate,
    Restaurants,
    Healthcare,
    Traffic,
    Environmental,
}

impl Resource {
    /// Cache key for this feed, e.g. `weather_New York`
    pub fn cache_key(&self) -> String {
        match self {
            Resource::Crypto => "crypto".to_string(),
            Resource::Stocks => "stocks".to_string(),
            Resource::Weather { city } => format!("weather_{}", city),
            Resource::News { category } => format!("news_{}", category),
            Resource::Jobs => "jobs".to_string(),
            Resource::RealEstate => "realestate".to_string(),
            Resource::Restaurants => "restaurants".to_string(),
            Resource::Healthcare => "healthcare".to_string(),
            Resource::Traffic => "traffic".to_string(),
            Resource::Environmental => "environmental".to_string(),
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_key())
    }
}

/// Memoized, time-expiring access to all feeds
pub struct DataFetcher {
    cache: TimedCache,
    rng: RandomSource,
    /// Fixed publication anchor for synthetic news; `None` means the wall clock
    news_anchor: Option<DateTime<Utc>>,
    stock_symbols: Vec<String>,
    crypto: CryptoClient,
    stocks: StockClient,
    weather: WeatherClient,
    news: NewsClient,
}

impl DataFetcher {
    /// Builds a fetcher on the system clock
    pub fn new(config: &FetcherConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds a fetcher with an explicit time source
    pub fn with_clock(config: &FetcherConfig, clock: Arc<dyn Clock>) -> Self {
        let rng = match config.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        };
        info!(ttl_secs = config.ttl_secs, seeded = config.seed.is_some(), "data fetcher ready");

        Self {
            cache: TimedCache::with_clock(config.ttl(), clock),
            rng,
            news_anchor: config
                .seed
                .and_then(|_| Utc.timestamp_opt(news::SEEDED_ANCHOR_SECS, 0).single()),
            stock_symbols: config.stock_symbols.clone(),
            crypto: CryptoClient::with_base_url(config.crypto_base_url.clone()),
            stocks: StockClient::new(config.stock_base_url.clone(), config.stock_api_key.clone()),
            weather: WeatherClient::new(
                config.weather_base_url.clone(),
                config.weather_api_key.clone(),
            ),
            news: NewsClient::new(
                config.news_base_url.clone(),
                config.news_api_key.clone(),
                config.news_country.clone(),
            ),
        }
    }

    /// The underlying cache
    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    /// Generic get-or-fetch under `key`; see `TimedCache::get_cached`
    pub async fn get_cached<T, F, Fut, E>(&self, key: &str, producer: F) -> Result<Arc<T>, FetchError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.cache.get_cached(key, producer).await
    }

    /// Prices for the tracked coins; synthetic when CoinGecko fails
    pub async fn get_crypto_data(&self) -> Result<Arc<Vec<CryptoQuote>>, FetchError> {
        self.cache
            .get_cached(&Resource::Crypto.cache_key(), || async move {
                Ok::<_, Infallible>(match self.crypto.fetch_prices().await {
                    Ok(quotes) => quotes,
                    Err(e) => {
                        warn!(error = %e, "crypto fetch failed, using synthetic prices");
                        crypto::synthetic_prices(&self.rng)
                    }
                })
            })
            .await
    }

    /// One quote per configured symbol; failed symbols are synthetic
    pub async fn get_stock_data(&self) -> Result<Arc<Vec<StockQuote>>, FetchError> {
        self.cache
            .get_cached(&Resource::Stocks.cache_key(), || async move {
                Ok::<_, Infallible>(self.stocks.fetch_quotes(&self.stock_symbols, &self.rng).await)
            })
            .await
    }

    /// Current weather for `city`; synthetic without an API key or on failure
    pub async fn get_weather_data(&self, city: &str) -> Result<Arc<WeatherReport>, FetchError> {
        let key = Resource::Weather {
            city: city.to_string(),
        }
        .cache_key();
        self.cache
            .get_cached(&key, || async move {
                Ok::<_, Infallible>(match self.weather.fetch_weather(city).await {
                    Ok(report) => report,
                    Err(e) => {
                        warn!(city, error = %e, "weather fetch failed, using synthetic report");
                        weather::synthetic_report(city, &self.rng)
                    }
                })
            })
            .await
    }

    /// Headlines for `category`; synthetic without an API key or on failure
    pub async fn get_news_data(&self, category: &str) -> Result<Arc<Vec<NewsArticle>>, FetchError> {
        let key = Resource::News {
            category: category.to_string(),
        }
        .cache_key();
        self.cache
            .get_cached(&key, || async move {
                Ok::<_, Infallible>(match self.news.fetch_headlines(category).await {
                    Ok(articles) => articles,
                    Err(e) => {
                        warn!(category, error = %e, "news fetch failed, using synthetic headlines");
                        let anchor = self.news_anchor.unwrap_or_else(Utc::now);
                        news::synthetic_headlines(category, anchor, &self.rng)
                    }
                })
            })
            .await
    }

    pub async fn get_job_data(&self) -> Result<Arc<Vec<JobPosting>>, FetchError> {
        self.synthetic(Resource::Jobs, synthetic::job_postings).await
    }

    pub async fn get_real_estate_data(&self) -> Result<Arc<Vec<PropertyListing>>, FetchError> {
        self.synthetic(Resource::RealEstate, synthetic::property_listings)
            .await
    }

    pub async fn get_restaurant_data(&self) -> Result<Arc<Vec<Restaurant>>, FetchError> {
        self.synthetic(Resource::Restaurants, synthetic::restaurants).await
    }

    pub async fn get_healthcare_data(&self) -> Result<Arc<Vec<DepartmentMetrics>>, FetchError> {
        self.synthetic(Resource::Healthcare, synthetic::department_metrics)
            .await
    }

    pub async fn get_traffic_data(&self) -> Result<Arc<Vec<RoadSegment>>, FetchError> {
        self.synthetic(Resource::Traffic, synthetic::road_segments).await
    }

    pub async fn get_environmental_data(&self) -> Result<Arc<Vec<SensorReading>>, FetchError> {
        self.synthetic(Resource::Environmental, synthetic::sensor_readings)
            .await
    }

    /// Caches a generator that never calls out to the network
    async fn synthetic<T, G>(&self, resource: Resource, generate: G) -> Result<Arc<T>, FetchError>
    where
        T: Send + Sync + 'static,
        G: FnOnce(&RandomSource) -> T,
    {
        self.cache
            .get_cached(&resource.cache_key(), || async move {
                Ok::<_, Infallible>(generate(&self.rng))
            })
            .await
    }

    /// Fetches `resource` through its accessor and renders it as JSON
    pub async fn fetch_json(&self, resource: &Resource) -> Result<serde_json::Value, FetchError> {
        match resource {
            Resource::Crypto => to_json(resource, self.get_crypto_data().await?),
            Resource::Stocks => to_json(resource, self.get_stock_data().await?),
            Resource::Weather { city } => to_json(resource, self.get_weather_data(city).await?),
            Resource::News { category } => to_json(resource, self.get_news_data(category).await?),
            Resource::Jobs => to_json(resource, self.get_job_data().await?),
            Resource::RealEstate => to_json(resource, self.get_real_estate_data().await?),
            Resource::Restaurants => to_json(resource, self.get_restaurant_data().await?),
            Resource::Healthcare => to_json(resource, self.get_healthcare_data().await?),
            Resource::Traffic => to_json(resource, self.get_traffic_data().await?),
            Resource::Environmental => to_json(resource, self.get_environmental_data().await?),
        }
    }
}

fn to_json<T: Serialize>(resource: &Resource, data: Arc<T>) -> Result<serde_json::Value, FetchError> {
    serde_json::to_value(&*data).map_err(|e| FetchError::Encode {
        key: resource.cache_key(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::data::stocks;
    use crate::data::synthetic::{JOB_COUNT, LISTING_COUNT, RESTAURANT_COUNT};
    use std::time::Duration;

    /// Config whose API endpoints refuse connections immediately
    fn offline_config(seed: u64) -> FetcherConfig {
        FetcherConfig {
            crypto_base_url: "http://127.0.0.1:1".to_string(),
            stock_base_url: "http://127.0.0.1:1".to_string(),
            weather_base_url: "http://127.0.0.1:1".to_string(),
            news_base_url: "http://127.0.0.1:1".to_string(),
            seed: Some(seed),
            ..FetcherConfig::default()
        }
    }

    fn create_test_fetcher(seed: u64) -> (DataFetcher, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let fetcher = DataFetcher::with_clock(&offline_config(seed), clock.clone());
        (fetcher, clock)
    }

    #[test]
    fn test_cache_keys() {
        assert_eq!(Resource::Crypto.cache_key(), "crypto");
        assert_eq!(
            Resource::Weather {
                city: "New York".to_string()
            }
            .cache_key(),
            "weather_New York"
        );
        assert_eq!(
            Resource::News {
                category: "technology".to_string()
            }
            .to_string(),
            "news_technology"
        );
        assert_eq!(Resource::RealEstate.cache_key(), "realestate");
    }

    #[tokio::test]
    async fn test_crypto_failure_returns_four_synthetic_coins() {
        let (fetcher, _clock) = create_test_fetcher(1);

        let quotes = fetcher.get_crypto_data().await.expect("Fallback should succeed");

        assert_eq!(quotes.len(), 4);
        let ids: Vec<&str> = quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum", "cardano", "solana"]);
        for quote in quotes.iter() {
            assert!(!quote.name.is_empty());
            assert!(!quote.symbol.is_empty());
            assert!(quote.price.is_finite());
            assert!(quote.change_24h.is_finite());
        }
    }

    #[tokio::test]
    async fn test_fallback_is_cached() {
        let (fetcher, _clock) = create_test_fetcher(2);

        let first = fetcher.get_crypto_data().await.unwrap();
        let second = fetcher.get_crypto_data().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second), "Fallback should be served from cache");
        assert!(fetcher.cache().is_fresh("crypto"));
    }

    #[tokio::test]
    async fn test_weather_without_key_falls_back() {
        let (fetcher, _clock) = create_test_fetcher(3);

        let report = fetcher.get_weather_data("Boston").await.unwrap();

        assert_eq!(report.city, "Boston");
        assert!((10.0..=30.0).contains(&report.temperature));
        assert!((40..=80).contains(&report.humidity));
        assert!(weather::SYNTHETIC_DESCRIPTIONS.contains(&report.description.as_str()));
        assert!((0.0..=20.0).contains(&report.wind_speed));
        assert!((1000..=1050).contains(&report.pressure));
        assert!(fetcher.cache().is_fresh("weather_Boston"));
    }

    #[tokio::test]
    async fn test_weather_with_key_but_unreachable_falls_back() {
        let config = FetcherConfig {
            weather_api_key: Some("key".to_string()),
            ..offline_config(3)
        };
        let fetcher = DataFetcher::with_clock(&config, Arc::new(ManualClock::new()));

        let report = fetcher.get_weather_data("Paris").await.unwrap();

        assert_eq!(report.city, "Paris");
        assert!((1000..=1050).contains(&report.pressure));
    }

    #[tokio::test]
    async fn test_news_falls_back_per_category() {
        let (fetcher, _clock) = create_test_fetcher(4);

        let tech = fetcher.get_news_data("technology").await.unwrap();
        let sports = fetcher.get_news_data("sports").await.unwrap();

        assert_eq!(tech.len(), news::SYNTHETIC_ARTICLE_COUNT);
        assert!(tech.iter().all(|a| a.title.contains("technology")));
        assert!(sports.iter().all(|a| a.title.contains("sports")));
        assert_eq!(fetcher.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_stock_data_has_one_entry_per_symbol() {
        let (fetcher, _clock) = create_test_fetcher(5);

        let quotes = fetcher.get_stock_data().await.unwrap();

        let symbols: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, stocks::DEFAULT_SYMBOLS.to_vec());
    }

    #[tokio::test]
    async fn test_synthetic_feed_lengths() {
        let (fetcher, _clock) = create_test_fetcher(6);

        assert_eq!(fetcher.get_job_data().await.unwrap().len(), JOB_COUNT);
        assert_eq!(fetcher.get_real_estate_data().await.unwrap().len(), LISTING_COUNT);
        assert_eq!(fetcher.get_restaurant_data().await.unwrap().len(), RESTAURANT_COUNT);
        assert_eq!(fetcher.get_healthcare_data().await.unwrap().len(), 6);
        assert_eq!(fetcher.get_traffic_data().await.unwrap().len(), 10);
        assert_eq!(fetcher.get_environmental_data().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_synthetic_feed_is_stable_within_ttl() {
        let (fetcher, clock) = create_test_fetcher(7);

        let first = fetcher.get_job_data().await.unwrap();
        clock.advance(Duration::from_secs(240));
        let second = fetcher.get_job_data().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            serde_json::to_string(&*first).unwrap(),
            serde_json::to_string(&*second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_synthetic_feed_regenerates_after_ttl() {
        let (fetcher, clock) = create_test_fetcher(8);

        let first = fetcher.get_restaurant_data().await.unwrap();
        clock.advance(Duration::from_secs(300));
        let second = fetcher.get_restaurant_data().await.unwrap();

        assert!(!Arc::ptr_eq(&first, &second), "Stale entry should be regenerated");
    }

    #[tokio::test]
    async fn test_same_seed_same_synthetic_data() {
        let (a, _) = create_test_fetcher(42);
        let (b, _) = create_test_fetcher(42);

        assert_eq!(a.get_job_data().await.unwrap(), b.get_job_data().await.unwrap());
        assert_eq!(
            a.get_environmental_data().await.unwrap(),
            b.get_environmental_data().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_same_seed_same_news_fallback() {
        let (a, _) = create_test_fetcher(42);
        let (b, _) = create_test_fetcher(42);

        let first = a.get_news_data("technology").await.unwrap();
        let second = b.get_news_data("technology").await.unwrap();

        assert_eq!(first, second, "Seeded fallbacks should match, timestamps included");
        let anchor = Utc.timestamp_opt(news::SEEDED_ANCHOR_SECS, 0).unwrap();
        assert!(first.iter().all(|article| article.published_at <= anchor));
    }

    #[tokio::test]
    async fn test_get_cached_passthrough_reports_failure() {
        let (fetcher, _clock) = create_test_fetcher(9);

        let result = fetcher
            .get_cached("weather_Boston", || async { Err::<WeatherReport, _>("boom") })
            .await;

        assert!(matches!(result, Err(FetchError::Producer { ref key, .. }) if key == "weather_Boston"));
        assert!(fetcher.cache().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_json_shapes() {
        let (fetcher, _clock) = create_test_fetcher(10);

        let jobs = fetcher.fetch_json(&Resource::Jobs).await.unwrap();
        assert_eq!(jobs.as_array().map(Vec::len), Some(JOB_COUNT));
        assert!(jobs[0].get("postedDaysAgo").is_some());

        let weather = fetcher
            .fetch_json(&Resource::Weather {
                city: "Boston".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(weather["city"], "Boston");
        assert!(weather.get("windSpeed").is_some());
    }
}
