//! Position-update request body.
//!
//! Callers send `{"latitude": .., "longitude": ..}` where each value may be a
//! JSON number or a numeric string.  Validation happens here, before any
//! store is touched.

use serde::Deserialize;

use rd_core::{CoreError, CoreResult, GeoPoint, parse_degrees};

/// One coordinate as received on the wire.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn degrees(&self, field: &'static str) -> CoreResult<f64> {
        match self {
            CoordinateInput::Number(v) => Ok(*v),
            CoordinateInput::Text(s)   => parse_degrees(field, s),
        }
    }
}

impl From<f64> for CoordinateInput {
    fn from(v: f64) -> Self {
        CoordinateInput::Number(v)
    }
}

impl From<&str> for CoordinateInput {
    fn from(s: &str) -> Self {
        CoordinateInput::Text(s.to_owned())
    }
}

/// Body of a position-update request.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PositionPayload {
    #[serde(default)]
    pub latitude:  Option<CoordinateInput>,
    #[serde(default)]
    pub longitude: Option<CoordinateInput>,
}

impl PositionPayload {
    pub fn new(latitude: impl Into<CoordinateInput>, longitude: impl Into<CoordinateInput>) -> Self {
        Self {
            latitude:  Some(latitude.into()),
            longitude: Some(longitude.into()),
        }
    }

    /// Both fields present, finite, and in range.
    pub fn validate(&self) -> CoreResult<GeoPoint> {
        let lat = required("latitude", self.latitude.as_ref())?;
        let lon = required("longitude", self.longitude.as_ref())?;
        GeoPoint::try_new(lat, lon)
    }
}

fn required(field: &'static str, value: Option<&CoordinateInput>) -> CoreResult<f64> {
    value
        .ok_or(CoreError::Missing { field })?
        .degrees(field)
}
