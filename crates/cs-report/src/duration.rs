//! Run-duration text.

use chrono::{DateTime, Utc};

/// Shown when either end of the run is unknown.
pub const UNKNOWN_DURATION: &str = "—";

/// Start and end of the observed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTiming {
    pub started: Option<DateTime<Utc>>,
    pub finished: Option<DateTime<Utc>>,
}

impl RunTiming {
    pub fn formatted(&self) -> String {
        match (self.started, self.finished) {
            (Some(start), Some(end)) => format_duration((end - start).num_seconds()),
            _ => UNKNOWN_DURATION.to_string(),
        }
    }
}

/// `"1 hr 20 min 5 sec"`, dropping leading zero units. Negative spans clamp to zero.
pub fn format_duration(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{hours} hr {minutes} min {seconds} sec")
    } else if minutes > 0 {
        format!("{minutes} min {seconds} sec")
    } else {
        format!("{seconds} sec")
    }
}
