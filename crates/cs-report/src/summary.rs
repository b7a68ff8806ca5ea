//! Pass/fail tallies and percentage formatting.

use cs_common::{ScenarioTable, Status};

pub const PASS_COLOR: &str = "pass-color";
pub const FAIL_COLOR: &str = "fail-color";

/// Counts for one feature, or summed across a run.
///
/// Only `Passed` counts as a pass; every other status lands in `fail`.
/// `skipped` is the share of `fail` that was `Skipped`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub pass: usize,
    pub fail: usize,
    pub skipped: usize,
}

impl Tally {
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a Status>) -> Self {
        statuses.into_iter().fold(Self::default(), |mut tally, status| {
            tally.record(*status);
            tally
        })
    }

    pub fn from_table(table: &ScenarioTable) -> Self {
        Self::from_statuses(table.values())
    }

    pub fn record(&mut self, status: Status) {
        if status.is_passed() {
            self.pass += 1;
        } else {
            self.fail += 1;
            if status == Status::Skipped {
                self.skipped += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail
    }

    /// `"0.00%"` when empty, otherwise pass/total rounded to two places.
    pub fn pass_percent(&self) -> String {
        format_percent(self.pass, self.total())
    }

    /// `pass-color` only when something ran and nothing failed.
    pub fn status_color(&self) -> &'static str {
        if self.total() > 0 && self.fail == 0 {
            PASS_COLOR
        } else {
            FAIL_COLOR
        }
    }
}

impl std::ops::AddAssign for Tally {
    fn add_assign(&mut self, other: Self) {
        self.pass += other.pass;
        self.fail += other.fail;
        self.skipped += other.skipped;
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// `part / total` as a percentage with two decimals, ties rounded to even
/// (1 of 32 is `"3.12%"`, 3 of 32 is `"9.38%"`).
pub fn format_percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    let (part, total) = (part as u128, total as u128);
    let scaled = part * 10_000;
    let mut hundredths = scaled / total;
    let twice_rem = (scaled % total) * 2;
    if twice_rem > total || (twice_rem == total && hundredths % 2 == 1) {
        hundredths += 1;
    }
    format!("{}.{:02}%", hundredths / 100, hundredths % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_rounding() {
        assert_eq!(format_percent(1, 3), "33.33%");
        assert_eq!(format_percent(2, 3), "66.67%");
        assert_eq!(format_percent(0, 0), "0.00%");
        assert_eq!(format_percent(3, 3), "100.00%");
        assert_eq!(format_percent(3, 4), "75.00%");
        assert_eq!(format_percent(4, 7), "57.14%");
    }

    #[test]
    fn test_percent_ties_round_to_even() {
        assert_eq!(format_percent(1, 32), "3.12%");
        assert_eq!(format_percent(3, 32), "9.38%");
        assert_eq!(format_percent(5, 32), "15.62%");
        assert_eq!(format_percent(1, 8), "12.50%");
    }

    #[test]
    fn test_non_passed_counts_as_fail() {
        let tally = Tally::from_statuses(&[
            Status::Passed,
            Status::Skipped,
            Status::Pending,
            Status::Undefined,
            Status::Ambiguous,
            Status::Failed,
        ]);
        assert_eq!(tally.pass, 1);
        assert_eq!(tally.fail, 5);
        assert_eq!(tally.skipped, 1);
        assert_eq!(tally.total(), 6);
    }

    #[test]
    fn test_status_color() {
        assert_eq!(Tally::default().status_color(), FAIL_COLOR);
        let clean = Tally::from_statuses(&[Status::Passed]);
        assert_eq!(clean.status_color(), PASS_COLOR);
        let dirty = Tally::from_statuses(&[Status::Passed, Status::Failed]);
        assert_eq!(dirty.status_color(), FAIL_COLOR);
    }

    #[test]
    fn test_sum() {
        let a = Tally::from_statuses(&[Status::Passed, Status::Passed, Status::Failed]);
        let b = Tally::from_statuses(&[Status::Passed]);
        let run: Tally = [a, b].into_iter().sum();
        assert_eq!((run.pass, run.fail, run.total()), (3, 1, 4));
        assert_eq!(run.pass_percent(), "75.00%");
    }
}
