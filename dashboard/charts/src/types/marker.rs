use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Start of a new test run.
///
/// `at` is the time the run start was recorded; the labelled line is drawn there.
/// `display_at` is the earliest known tick time for the very first marker and `at` for
/// later ones; an earlier first `display_at` gets its own unlabelled boundary line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub at: DateTime<Utc>,
    pub display_at: DateTime<Utc>,
}

/// Label of the marker at the given position, e.g. `Run #1` for the first one.
pub fn marker_label(position: usize) -> String {
    format!("Run #{}", position + 1)
}
