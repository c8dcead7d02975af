//! Origin/destination request collected from the user.
//!
//! Validation is all-or-nothing: either every field parses as a finite
//! number and a [`TripRequest`] is produced, or nothing is.

use crate::{GeoPoint, RutaError, RutaResult};

/// Four numeric coordinates describing one routing request.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRequest {
    pub lat_origin:      f64,
    pub lon_origin:      f64,
    pub lat_destination: f64,
    pub lon_destination: f64,
}

impl TripRequest {
    pub fn new(origin: GeoPoint, destination: GeoPoint) -> Self {
        Self {
            lat_origin:      origin.lat,
            lon_origin:      origin.lon,
            lat_destination: destination.lat,
            lon_destination: destination.lon,
        }
    }

    /// Parse the four raw form fields.
    ///
    /// # Errors
    ///
    /// [`RutaError::Parse`] naming the first field that is not a finite
    /// number.  No partially parsed request is ever returned.
    pub fn from_fields(
        lat_origin: &str,
        lon_origin: &str,
        lat_destination: &str,
        lon_destination: &str,
    ) -> RutaResult<Self> {
        Ok(Self {
            lat_origin:      parse_coordinate("origin latitude", lat_origin)?,
            lon_origin:      parse_coordinate("origin longitude", lon_origin)?,
            lat_destination: parse_coordinate("destination latitude", lat_destination)?,
            lon_destination: parse_coordinate("destination longitude", lon_destination)?,
        })
    }

    pub fn origin(&self) -> GeoPoint {
        GeoPoint::new(self.lat_origin, self.lon_origin)
    }

    pub fn destination(&self) -> GeoPoint {
        GeoPoint::new(self.lat_destination, self.lon_destination)
    }
}

/// Result of the coordinate-entry step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EntryOutcome {
    Submitted(TripRequest),
    /// The user abandoned the form; no analysis should run.
    Cancelled,
}

/// Parse a `"lat,lon"` pair, as accepted on the command line.
pub fn parse_lat_lon(s: &str) -> RutaResult<GeoPoint> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| RutaError::Parse(format!("expected 'lat,lon', got '{s}'")))?;
    Ok(GeoPoint::new(
        parse_coordinate("latitude", lat)?,
        parse_coordinate("longitude", lon)?,
    ))
}

fn parse_coordinate(field: &str, raw: &str) -> RutaResult<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RutaError::Parse(format!("{field}: '{}' is not a valid number", raw.trim()))),
    }
}
