//! Geographic coordinate type and great-circle distance.
//!
//! `GeoPoint` uses `f64` latitude/longitude in degrees (WGS-84).  Distances
//! are reported in whole metres, so double precision keeps the rounding step
//! stable for points a few metres apart anywhere on the globe.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Mean Earth radius used by the haversine formula, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "latitude")]
    pub lat: f64,
    #[serde(rename = "longitude")]
    pub lon: f64,
}

impl GeoPoint {
    /// Construct without validation.  Use for data that has already passed
    /// [`GeoPoint::try_new`] (e.g. rows read back from a store).
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Construct a point, rejecting non-finite values and values outside
    /// latitude `[-90, 90]` / longitude `[-180, 180]`.
    pub fn try_new(lat: f64, lon: f64) -> CoreResult<Self> {
        check_range("latitude", lat, 90.0)?;
        check_range("longitude", lon, 180.0)?;
        Ok(Self { lat, lon })
    }

    /// Parse both components from text, then validate as [`GeoPoint::try_new`].
    pub fn parse(lat: &str, lon: &str) -> CoreResult<Self> {
        let lat = parse_degrees("latitude", lat)?;
        let lon = parse_degrees("longitude", lon)?;
        Self::try_new(lat, lon)
    }

    /// Haversine great-circle distance in metres (unrounded).
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        // Clamp: rounding can push `a` a hair above 1 for antipodal points.
        let c = 2.0 * a.min(1.0).sqrt().asin();
        EARTH_RADIUS_M * c
    }

    /// Haversine distance rounded to the nearest whole metre.
    #[inline]
    pub fn distance_m_rounded(self, other: GeoPoint) -> u64 {
        self.distance_m(other).round() as u64
    }

    /// Position on the unit sphere as `[x, y, z]`.
    ///
    /// Euclidean (chord) distance between two such vectors is monotonic in
    /// great-circle distance, which lets a Cartesian spatial tree rank points
    /// in the same order as [`GeoPoint::distance_m`].
    pub fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lon = self.lon.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

fn check_range(field: &'static str, value: f64, limit: f64) -> CoreResult<()> {
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate { field, value })
    }
}

/// Parse one coordinate component from text.  Range is not checked here.
pub fn parse_degrees(field: &'static str, input: &str) -> CoreResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| CoreError::Parse { field, input: input.to_owned() })
}
