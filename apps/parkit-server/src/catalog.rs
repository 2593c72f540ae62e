// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Parking spot catalog.
//!
//! The catalog is the fixed set of six Bengaluru facilities seeded at startup.
//! Search filters by free text over name and address, then orders results by
//! the requested [`SortOption`].

use std::cmp::Ordering;

use crate::models::{NearbySpot, OpeningHours, ParkingSpot, SortOption, SpotId};

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Radius used by `nearby` when the caller gives none.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Search parameters after parsing.
#[derive(Debug, Clone, Default)]
pub struct SpotSearch {
    pub query: Option<String>,
    pub amenity: Option<String>,
    pub max_rate: Option<u32>,
    pub sort: SortOption,
    pub origin: Option<(f64, f64)>,
}

/// Read-only collection of parking spots.
#[derive(Debug, Clone)]
pub struct Catalog {
    spots: Vec<ParkingSpot>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(fixtures())
    }
}

impl Catalog {
    pub fn new(spots: Vec<ParkingSpot>) -> Self {
        Self { spots }
    }

    /// All spots in fixture order.
    pub fn all(&self) -> &[ParkingSpot] {
        &self.spots
    }

    pub fn find(&self, id: &SpotId) -> Option<&ParkingSpot> {
        self.spots.iter().find(|spot| &spot.id == id)
    }

    /// Filter and order spots.
    ///
    /// Text matching is case-insensitive over name or address; an empty query
    /// matches everything. Sorting is stable, so ties keep fixture order.
    pub fn search(&self, search: &SpotSearch) -> Vec<ParkingSpot> {
        let needle = search
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut results: Vec<ParkingSpot> = self
            .spots
            .iter()
            .filter(|spot| match &needle {
                Some(q) => {
                    spot.name.to_lowercase().contains(q) || spot.address.to_lowercase().contains(q)
                }
                None => true,
            })
            .filter(|spot| match &search.amenity {
                Some(amenity) => spot
                    .amenities
                    .iter()
                    .any(|a| a.eq_ignore_ascii_case(amenity.trim())),
                None => true,
            })
            .filter(|spot| search.max_rate.map_or(true, |max| spot.hourly_rate <= max))
            .cloned()
            .collect();

        match search.sort {
            SortOption::Price => results.sort_by_key(|spot| spot.hourly_rate),
            SortOption::Availability => {
                results.sort_by(|a, b| b.available_spots.cmp(&a.available_spots))
            }
            SortOption::Rating => results.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
            }),
            SortOption::Distance => {
                if let Some((lat, lon)) = search.origin {
                    results.sort_by(|a, b| {
                        let da = haversine_km(lat, lon, a.latitude, a.longitude);
                        let db = haversine_km(lat, lon, b.latitude, b.longitude);
                        da.partial_cmp(&db).unwrap_or(Ordering::Equal)
                    });
                }
            }
        }

        results
    }

    /// Spots within `radius_km` of the origin, nearest first.
    pub fn nearby(&self, lat: f64, lon: f64, radius_km: f64) -> Vec<NearbySpot> {
        let mut results: Vec<NearbySpot> = self
            .spots
            .iter()
            .map(|spot| NearbySpot {
                distance_km: haversine_km(lat, lon, spot.latitude, spot.longitude),
                spot: spot.clone(),
            })
            .filter(|nearby| nearby.distance_km <= radius_km)
            .collect();

        results.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        });
        results
    }
}

/// Great-circle distance between two coordinates in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

#[allow(clippy::too_many_arguments)]
fn spot(
    id: &str,
    name: &str,
    address: &str,
    description: &str,
    (latitude, longitude): (f64, f64),
    (total_spots, available_spots): (u32, u32),
    hourly_rate: u32,
    amenities: &[&str],
    (open, close): (&str, &str),
    (rating, reviews): (f32, u32),
) -> ParkingSpot {
    ParkingSpot {
        id: SpotId::from(id),
        name: name.to_string(),
        address: address.to_string(),
        description: description.to_string(),
        latitude,
        longitude,
        total_spots,
        available_spots,
        hourly_rate,
        images: vec!["/placeholder.svg".to_string()],
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
        opening_hours: OpeningHours {
            open: open.to_string(),
            close: close.to_string(),
        },
        rating,
        reviews,
    }
}

/// The seeded parking facilities.
pub fn fixtures() -> Vec<ParkingSpot> {
    vec![
        spot(
            "p001",
            "Phoenix MarketCity",
            "Whitefield, Bengaluru",
            "Secure parking at Phoenix MarketCity Mall with CCTV surveillance and security personnel.",
            (12.9962, 77.6968),
            (120, 45),
            50,
            &["24/7 Security", "CCTV", "Covered Parking", "EV Charging"],
            ("09:00", "22:00"),
            (4.2, 156),
        ),
        spot(
            "p002",
            "Brigade Road Parking",
            "Brigade Road, Central Bengaluru",
            "Multi-level parking complex at the heart of Brigade Road shopping district.",
            (12.9719, 77.6186),
            (200, 72),
            60,
            &["Security", "CCTV", "Car Wash", "Valet"],
            ("08:00", "23:00"),
            (4.0, 211),
        ),
        spot(
            "p003",
            "Indiranagar Metro Parking",
            "100 Feet Road, Indiranagar",
            "Convenient parking adjacent to Indiranagar metro station with easy access.",
            (12.9784, 77.6408),
            (80, 12),
            40,
            &["Metro Access", "24/7 Security", "CCTV"],
            ("06:00", "23:00"),
            (3.8, 95),
        ),
        spot(
            "p004",
            "Koramangala Forum Mall",
            "Koramangala, Bengaluru",
            "Spacious underground parking at Forum Mall with direct access to shopping levels.",
            (12.9347, 77.6150),
            (150, 53),
            55,
            &["Underground Parking", "CCTV", "Mall Access", "Security"],
            ("10:00", "22:00"),
            (4.5, 187),
        ),
        spot(
            "p005",
            "Cubbon Park Underground",
            "Cubbon Park, MG Road",
            "Safe and secure parking next to Cubbon Park with easy access to MG Road.",
            (12.9766, 77.5993),
            (100, 30),
            45,
            &["Park Access", "CCTV", "Security", "Well-lit"],
            ("06:00", "21:00"),
            (4.1, 124),
        ),
        spot(
            "p006",
            "Orion East Mall Parking",
            "Banaswadi, Bengaluru",
            "Covered parking facility at Orion East Mall with ample spaces.",
            (13.0213, 77.6487),
            (90, 38),
            40,
            &["CCTV", "Security", "Covered Parking", "Electric Charging"],
            ("10:00", "22:00"),
            (3.9, 78),
        ),
    ]
}
