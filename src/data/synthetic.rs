//! Generators for the always-synthetic feeds
//!
//! These feeds have no upstream API. Each generator returns a fixed number of
//! records with values drawn from documented ranges.

use super::{
    Congestion, DepartmentMetrics, JobPosting, PropertyListing, Restaurant, RoadSegment,
    SensorReading,
};
use crate::random::RandomSource;

pub const JOB_COUNT: usize = 20;
pub const LISTING_COUNT: usize = 15;
pub const RESTAURANT_COUNT: usize = 12;

const JOB_TITLES: [&str; 8] = [
    "Software Engineer",
    "Data Scientist",
    "Product Manager",
    "DevOps Engineer",
    "UX Designer",
    "Security Analyst",
    "Frontend Developer",
    "Machine Learning Engineer",
];
const COMPANIES: [&str; 6] = ["Acme Corp", "Globex", "Initech", "Umbrella Labs", "Hooli", "Stark Industries"];
const LOCATIONS: [&str; 6] = ["New York, NY", "San Francisco, CA", "Austin, TX", "Seattle, WA", "Boston, MA", "Denver, CO"];

const STREETS: [&str; 6] = ["Maple Ave", "Oak St", "Pine Rd", "Cedar Ln", "Elm Dr", "Birch Blvd"];

const RESTAURANT_NAMES: [&str; 12] = [
    "The Golden Fork",
    "Bella Cucina",
    "Sakura House",
    "El Mariachi",
    "Le Petit Bistro",
    "Spice Route",
    "Harbor Grill",
    "Dragon Palace",
    "Olive & Thyme",
    "Smokehouse 42",
    "Green Bowl",
    "Noodle Bar",
];
const CUISINES: [&str; 8] = ["Italian", "Japanese", "Mexican", "French", "Indian", "American", "Chinese", "Mediterranean"];

const DEPARTMENTS: [&str; 6] = ["Emergency", "Cardiology", "Pediatrics", "Orthopedics", "Oncology", "Neurology"];

const ROADS: [&str; 10] = [
    "I-95 North",
    "I-95 South",
    "Route 1",
    "Main Street",
    "Harbor Tunnel",
    "Riverside Drive",
    "Broadway",
    "Central Expressway",
    "Airport Road",
    "Bay Bridge",
];
const STATIONS: [&str; 8] = [
    "Downtown",
    "Harbor",
    "Industrial Park",
    "University",
    "Airport",
    "Riverside",
    "Hillside",
    "Suburbs North",
];

/// 20 job postings; salary 60k-180k, posted 0-30 days ago
pub fn job_postings(rng: &RandomSource) -> Vec<JobPosting> {
    (1..=JOB_COUNT as u32)
        .map(|id| JobPosting {
            id,
            title: rng.pick(&JOB_TITLES).to_string(),
            company: rng.pick(&COMPANIES).to_string(),
            location: rng.pick(&LOCATIONS).to_string(),
            salary: rng.int(60..=180) * 1_000,
            remote: rng.chance(0.4),
            posted_days_ago: rng.int(0..=30),
        })
        .collect()
}

/// 15 listings; price 200k-2M, 1-5 bedrooms, 1-4 bathrooms, 600-4000 sq ft
pub fn property_listings(rng: &RandomSource) -> Vec<PropertyListing> {
    (1..=LISTING_COUNT as u32)
        .map(|id| {
            let bedrooms = rng.int(1..=5);
            PropertyListing {
                id,
                address: format!("{} {}", rng.int(1..=9999), rng.pick(&STREETS)),
                price: rng.int(200..=2_000) * 1_000,
                bedrooms,
                bathrooms: rng.int(1..=bedrooms.min(4)),
                square_feet: rng.int(600..=4_000),
                days_on_market: rng.int(1..=120),
            }
        })
        .collect()
}

/// 12 restaurants; rating 3.0-5.0, price level 1-4, wait 0-60 minutes
pub fn restaurants(rng: &RandomSource) -> Vec<Restaurant> {
    RESTAURANT_NAMES
        .iter()
        .zip(1u32..)
        .map(|(name, id)| Restaurant {
            id,
            name: name.to_string(),
            cuisine: rng.pick(&CUISINES).to_string(),
            rating: rng.float(3.0..5.0, 1),
            price_level: rng.int(1..=4),
            wait_minutes: rng.int(0..=60),
        })
        .collect()
}

/// One entry per department
pub fn department_metrics(rng: &RandomSource) -> Vec<DepartmentMetrics> {
    DEPARTMENTS
        .iter()
        .map(|department| DepartmentMetrics {
            department: department.to_string(),
            patients_today: rng.int(10..=200),
            bed_occupancy: rng.float(50.0..98.0, 1),
            average_wait_minutes: rng.int(5..=120),
            staff_on_duty: rng.int(5..=60),
        })
        .collect()
}

/// One entry per road; slower segments get heavier congestion
pub fn road_segments(rng: &RandomSource) -> Vec<RoadSegment> {
    ROADS
        .iter()
        .map(|road| {
            let average_speed = rng.float(5.0..100.0, 1);
            let congestion = match average_speed {
                s if s >= 70.0 => Congestion::Light,
                s if s >= 40.0 => Congestion::Moderate,
                s if s >= 15.0 => Congestion::Heavy,
                _ => Congestion::Standstill,
            };
            RoadSegment {
                road: road.to_string(),
                average_speed,
                congestion,
                incidents: rng.int(0..=5),
                travel_time_minutes: rng.int(2..=60),
            }
        })
        .collect()
}

/// One reading per monitoring station
pub fn sensor_readings(rng: &RandomSource) -> Vec<SensorReading> {
    STATIONS
        .iter()
        .map(|station| SensorReading {
            station: station.to_string(),
            air_quality_index: rng.int(0..=300),
            pm25: rng.float(0.0..150.0, 1),
            temperature: rng.float(-5.0..35.0, 1),
            humidity: rng.int(20..=90),
            co2: rng.int(380..=1_000),
        })
        .collect()
}
