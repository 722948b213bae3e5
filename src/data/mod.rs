//! Core data models for feedcache
//!
//! This module contains the record types returned by every producer, plus the
//! HTTP clients and synthetic generators that produce them.

pub mod crypto;
pub mod news;
pub mod stocks;
pub mod synthetic;
pub mod weather;

pub use crypto::{CryptoClient, CryptoError};
pub use news::{NewsClient, NewsError};
pub use stocks::{StockClient, StockError};
pub use weather::{WeatherClient, WeatherError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price snapshot for a single cryptocurrency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoQuote {
    /// Provider identifier (e.g., "bitcoin")
    pub id: String,
    /// Display name
    pub name: String,
    /// Price in USD
    pub price: f64,
    /// Percentage change over the last 24 hours
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,
}

/// Latest quote for a single stock symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    /// Last traded price in USD
    pub price: f64,
    /// Absolute change since previous close
    pub change: f64,
    /// Percentage change since previous close
    pub change_percent: f64,
    /// Shares traded in the session
    pub volume: u64,
}

/// Current weather for a city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Short human-readable condition
    pub description: String,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Sea-level pressure in hPa
    pub pressure: u32,
}

/// A single headline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    /// Publisher name
    pub source: String,
    pub published_at: DateTime<Utc>,
}

/// A job listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Annual salary in USD
    pub salary: u32,
    pub remote: bool,
    pub posted_days_ago: u32,
}

/// A property for sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: u32,
    pub address: String,
    /// Asking price in USD
    pub price: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub square_feet: u32,
    pub days_on_market: u32,
}

/// A restaurant with its current wait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: u32,
    pub name: String,
    pub cuisine: String,
    /// Average review score (3.0-5.0)
    pub rating: f64,
    /// 1 ($) to 4 ($$$$)
    pub price_level: u32,
    pub wait_minutes: u32,
}

/// Daily load for one hospital department
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetrics {
    pub department: String,
    pub patients_today: u32,
    /// Percentage of beds in use
    pub bed_occupancy: f64,
    pub average_wait_minutes: u32,
    pub staff_on_duty: u32,
}

/// Traffic congestion level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Congestion {
    Light,
    Moderate,
    Heavy,
    Standstill,
}

/// Live conditions on a stretch of road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadSegment {
    pub road: String,
    /// Average speed in km/h
    pub average_speed: f64,
    pub congestion: Congestion,
    pub incidents: u32,
    pub travel_time_minutes: u32,
}

/// One environmental monitoring station reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub station: String,
    pub air_quality_index: u32,
    /// Fine particulate matter in µg/m³
    pub pm25: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: u32,
    /// CO2 concentration in ppm
    pub co2: u32,
}
