use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180].
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Great-circle distance in kilometres (haversine formula).
pub fn great_circle_km(from: Coordinates, to: Coordinates) -> f64 {
    let (lat1, lat2) = (from.latitude.to_radians(), to.latitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}

/// Midpoint of the latitude range and of the longitude range, for centering
/// a map on every city. None when there are no points.
pub fn map_center(points: &[Coordinates]) -> Option<Coordinates> {
    let first = points.first()?;
    let (mut lat_min, mut lat_max) = (first.latitude, first.latitude);
    let (mut lon_min, mut lon_max) = (first.longitude, first.longitude);
    for p in &points[1..] {
        lat_min = lat_min.min(p.latitude);
        lat_max = lat_max.max(p.latitude);
        lon_min = lon_min.min(p.longitude);
        lon_max = lon_max.max(p.longitude);
    }
    Some(Coordinates::new(
        (lat_min + lat_max) / 2.0,
        (lon_min + lon_max) / 2.0,
    ))
}
