//! Road segment records before and after weighting.

use ruta_core::NodeId;

/// Raw `maxspeed` metadata of a segment.
///
/// Map data is noisy: the tag may be missing, hold one value, or hold several
/// values (merged ways, `;`-separated tags), each possibly suffixed with a
/// unit such as `"50 km/h"`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SpeedLimit {
    #[default]
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl SpeedLimit {
    pub fn is_absent(&self) -> bool {
        matches!(self, SpeedLimit::Absent)
    }
}

impl From<&str> for SpeedLimit {
    fn from(s: &str) -> Self {
        SpeedLimit::Single(s.to_owned())
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for SpeedLimit {
    fn from(tokens: [S; N]) -> Self {
        SpeedLimit::Multiple(tokens.iter().map(|t| t.as_ref().to_owned()).collect())
    }
}

/// Composite identity of a directed segment.  Road graphs may hold several
/// parallel segments between the same ordered node pair; `parallel` tells
/// them apart (0, 1, … in insertion order).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentKey {
    pub from:     NodeId,
    pub to:       NodeId,
    pub parallel: u32,
}

/// One directed road edge as delivered by a loader.
#[derive(Clone, Copy, Debug)]
pub struct Segment<'a> {
    pub key:         SegmentKey,
    /// Metres, ≥ 0.
    pub length_m:    f64,
    pub speed_limit: &'a SpeedLimit,
}

/// Where a segment's speed came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpeedSource {
    /// Parsed from the `maxspeed` tag.
    Tagged,
    /// No tag; configured default used.
    Untagged,
    /// Tag present but unusable; configured default used.
    Unparsed,
}

/// A segment annotated with its derived speed and travel time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSegment {
    pub key:              SegmentKey,
    pub length_m:         f64,
    pub speed_kmh:        f64,
    /// Seconds; `f64::INFINITY` when the speed is zero.
    pub travel_time_secs: f64,
    pub speed_source:     SpeedSource,
}
