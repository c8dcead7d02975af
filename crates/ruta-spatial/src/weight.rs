//! Travel-time weighting of road segments.
//!
//! Every segment gets a speed in km/h and a travel time in seconds:
//!
//! ```text
//! speed_kmh        = parse_speed_kmh(maxspeed).unwrap_or(default_speed_kmh)
//! travel_time_secs = length_m / (speed_kmh / 3.6)      (+∞ when speed is 0)
//! ```
//!
//! Malformed tags never fail the pass; they fall back to the default speed
//! and are counted in [`WeightingStats`].

use crate::segment::{Segment, SpeedLimit, SpeedSource, WeightedSegment};

/// Speed assumed for segments without a usable `maxspeed` tag.
pub const DEFAULT_SPEED_KMH: f64 = 20.0;

/// km/h per m/s.
pub const KMH_PER_MPS: f64 = 3.6;

/// Resolve a `maxspeed` tag to km/h.
///
/// Each token contributes its leading whitespace-delimited component, and
/// only components made entirely of ASCII digits count:
///
/// - `Single`: that number, if it qualifies.
/// - `Multiple`: mean of the qualifying tokens, if any qualify.
///
/// A token with no component at all (empty or blank) invalidates the whole
/// field, discarding anything parsed from the other tokens.
///
/// ```
/// use ruta_spatial::{SpeedLimit, parse_speed_kmh};
///
/// assert_eq!(parse_speed_kmh(&SpeedLimit::from("50 km/h")), Some(50.0));
/// assert_eq!(parse_speed_kmh(&SpeedLimit::from(["40", "60"])), Some(50.0));
/// assert_eq!(parse_speed_kmh(&SpeedLimit::from("variable")), None);
/// ```
pub fn parse_speed_kmh(limit: &SpeedLimit) -> Option<f64> {
    match limit {
        SpeedLimit::Absent => None,
        SpeedLimit::Single(token) => leading_component(token).and_then(integer_speed),
        SpeedLimit::Multiple(tokens) => {
            let mut sum = 0.0;
            let mut count = 0usize;
            for token in tokens {
                if let Some(v) = integer_speed(leading_component(token)?) {
                    sum += v;
                    count += 1;
                }
            }
            (count > 0).then(|| sum / count as f64)
        }
    }
}

#[inline]
fn leading_component(token: &str) -> Option<&str> {
    token.split_whitespace().next()
}

fn integer_speed(component: &str) -> Option<f64> {
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    component.parse::<f64>().ok()
}

// ── EdgeWeightCalculator ──────────────────────────────────────────────────────

/// Derives `speed_kmh` and `travel_time_secs` for one segment at a time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeWeightCalculator {
    pub default_speed_kmh: f64,
}

impl EdgeWeightCalculator {
    pub fn new(default_speed_kmh: f64) -> Self {
        Self { default_speed_kmh }
    }

    /// Weight a single segment.  Never fails.
    pub fn compute_weight(&self, segment: &Segment<'_>) -> WeightedSegment {
        let (speed_kmh, speed_source) = match parse_speed_kmh(segment.speed_limit) {
            Some(v) => (v, SpeedSource::Tagged),
            None if segment.speed_limit.is_absent() => {
                (self.default_speed_kmh, SpeedSource::Untagged)
            }
            None => (self.default_speed_kmh, SpeedSource::Unparsed),
        };

        let speed_mps = speed_kmh / KMH_PER_MPS;
        let travel_time_secs = if speed_mps > 0.0 {
            segment.length_m / speed_mps
        } else {
            f64::INFINITY
        };

        WeightedSegment {
            key: segment.key,
            length_m: segment.length_m,
            speed_kmh,
            travel_time_secs,
            speed_source,
        }
    }
}

impl Default for EdgeWeightCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_KMH)
    }
}

// ── WeightingStats ────────────────────────────────────────────────────────────

/// Counts collected over one weighting pass.  Purely diagnostic: the numbers
/// make data-quality regressions visible without affecting any weight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightingStats {
    pub segments: usize,
    pub tagged:   usize,
    pub untagged: usize,
    pub unparsed: usize,
    /// Segments whose resolved speed is zero (infinite travel time).
    pub impassable: usize,
}

impl WeightingStats {
    pub fn record(&mut self, weighted: &WeightedSegment) {
        self.segments += 1;
        match weighted.speed_source {
            SpeedSource::Tagged => self.tagged += 1,
            SpeedSource::Untagged => self.untagged += 1,
            SpeedSource::Unparsed => self.unparsed += 1,
        }
        if weighted.travel_time_secs.is_infinite() {
            self.impassable += 1;
        }
    }

    /// Segments that fell back to the default speed.
    pub fn defaulted(&self) -> usize {
        self.untagged + self.unparsed
    }

    pub(crate) fn log(&self, default_speed_kmh: f64) {
        log::info!(
            "weighted {} segments: {} from maxspeed, {} at default {default_speed_kmh} km/h",
            self.segments,
            self.tagged,
            self.defaulted(),
        );
        if self.unparsed > 0 {
            log::warn!("{} segments had an unusable maxspeed tag", self.unparsed);
        }
        if self.impassable > 0 {
            log::warn!("{} segments have zero speed (infinite travel time)", self.impassable);
        }
    }
}
