//! Geographic view of the user base

use rust_decimal::Decimal;
use serde::Serialize;
use synergos_core::{Location, User};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLocation {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub city: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityDensity {
    pub city: String,
    pub count: usize,
    /// Share of located users living in this city
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReport {
    pub locations: Vec<UserLocation>,
    pub density: Vec<CityDensity>,
}

/// Users with a known location, plus per-city density.
///
/// Cities are listed in the order they are first seen.
pub fn locations(users: &[User]) -> LocationReport {
    let locations: Vec<UserLocation> = users
        .iter()
        .filter_map(|user| {
            user.location.as_ref().map(|loc| UserLocation {
                id: user.id.clone(),
                name: user.full_name(),
                lat: loc.lat,
                lng: loc.lng,
                city: loc.city.clone(),
                balance: user.balance,
            })
        })
        .collect();

    let mut counts: Vec<(String, usize)> = Vec::new();
    for loc in &locations {
        match counts.iter_mut().find(|(city, _)| *city == loc.city) {
            Some((_, count)) => *count += 1,
            None => counts.push((loc.city.clone(), 1)),
        }
    }

    let total = locations.len() as f64;
    let density = counts
        .into_iter()
        .map(|(city, count)| CityDensity {
            city,
            count,
            percentage: count as f64 / total * 100.0,
        })
        .collect();

    LocationReport { locations, density }
}

/// Great-circle distance between two points, in kilometres
pub fn distance_km(a: &Location, b: &Location) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(lat: f64, lng: f64) -> Location {
        Location {
            lat,
            lng,
            city: String::new(),
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let casa = at(33.5731, -7.5898);
        assert!(distance_km(&casa, &casa).abs() < 1e-9);
    }

    #[test]
    fn test_casablanca_to_rabat() {
        let casa = at(33.5731, -7.5898);
        let rabat = at(34.0209, -6.8416);
        let d = distance_km(&casa, &rabat);
        assert!((85.0..90.0).contains(&d), "got {d}");
        assert!((d - distance_km(&rabat, &casa)).abs() < 1e-9);
    }

    #[test]
    fn test_no_located_users() {
        let report = locations(&[]);
        assert!(report.locations.is_empty());
        assert!(report.density.is_empty());
    }
}
