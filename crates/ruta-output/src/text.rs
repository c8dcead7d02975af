//! Human-readable summary overlay.

use ruta_spatial::RouteSummary;

/// Two-line overlay shown with the route.
///
/// ```
/// use ruta_spatial::RouteSummary;
///
/// let s = RouteSummary { total_distance_m: 4_250.0, total_time_secs: 615.0, hops: vec![] };
/// assert_eq!(
///     ruta_output::summary_text(&s),
///     "Total distance: 4.25 km\nEstimated time: 10.25 min",
/// );
/// ```
pub fn summary_text(summary: &RouteSummary) -> String {
    format!(
        "Total distance: {:.2} km\nEstimated time: {:.2} min",
        summary.total_distance_km(),
        summary.total_time_minutes(),
    )
}
