//! Interactive coordinate entry.
//!
//! The form asks for four numbers, origin latitude and longitude then
//! destination latitude and longitude.  An entry that does not parse prints
//! an error and the whole form is asked again.  End of input at any point
//! cancels.

use std::io::{self, BufRead, Write};

use ruta_core::{EntryOutcome, TripRequest};

use crate::config::PointOfInterest;

pub const INVALID_INPUT: &str = "Please enter only valid numbers (e.g. 17.0654 or -96.7219)";

const FIELDS: [&str; 4] = [
    "Origin latitude",
    "Origin longitude",
    "Destination latitude",
    "Destination longitude",
];

/// Run the entry form on `input`/`output` until a valid request is
/// submitted or input ends.
pub fn prompt_trip<R, W>(
    input: &mut R,
    output: &mut W,
    points_of_interest: &[PointOfInterest],
) -> io::Result<EntryOutcome>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Fastest route calculator (Dijkstra)")?;
    if !points_of_interest.is_empty() {
        writeln!(output, "Points of interest (copy and paste):")?;
        for poi in points_of_interest {
            writeln!(output, "  {:<16} lat {}  lon {}", poi.label, poi.lat, poi.lon)?;
        }
    }

    loop {
        let mut answers: [String; 4] = Default::default();
        for (field, answer) in FIELDS.iter().zip(answers.iter_mut()) {
            write!(output, "{field}: ")?;
            output.flush()?;
            if input.read_line(answer)? == 0 {
                writeln!(output)?;
                return Ok(EntryOutcome::Cancelled);
            }
        }

        let [lat_o, lon_o, lat_d, lon_d] = &answers;
        match TripRequest::from_fields(lat_o, lon_o, lat_d, lon_d) {
            Ok(trip) => return Ok(EntryOutcome::Submitted(trip)),
            Err(e) => {
                log::debug!("rejected entry: {e}");
                writeln!(output, "{INVALID_INPUT}")?;
            }
        }
    }
}
