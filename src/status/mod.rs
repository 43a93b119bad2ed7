mod steps;

pub use steps::steps;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One resident's dinner choice for one day.
///
/// `value` is `None` when nothing was chosen yet. Otherwise:
///
/// * `-N`: diner, bringing `N - 1` guests
/// * `0`: not attending
/// * `+N`: cook, with `N - 1` guests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub value: Option<i32>,
    /// Only known for the nearest day.
    pub last_changed: Option<DateTime<Utc>>,
}

impl Status {
    pub const fn new(value: Option<i32>, last_changed: Option<DateTime<Utc>>) -> Self {
        Self {
            value,
            last_changed,
        }
    }

    pub fn is_cook(&self) -> bool {
        self.value.is_some_and(|v| v > 0)
    }

    pub fn is_diner(&self) -> bool {
        self.value.is_some_and(|v| v < 0)
    }

    pub fn is_none(&self) -> bool {
        self.value == Some(0)
    }

    pub const fn is_unknown(&self) -> bool {
        self.value.is_none()
    }

    /// Number of people this status brings to the table.
    pub fn attendees(&self) -> u32 {
        self.value.map_or(0, i32::unsigned_abs)
    }
}

/// One day of the dinner table. `statuses[i]` belongs to resident `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRow {
    pub timestamp: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
    pub statuses: Vec<Status>,
}

impl StatusRow {
    pub const fn new(
        timestamp: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
        statuses: Vec<Status>,
    ) -> Self {
        Self {
            timestamp,
            deadline,
            statuses,
        }
    }

    #[must_use]
    pub fn has_deadline_passed(&self) -> bool {
        self.has_deadline_passed_at(Utc::now())
    }

    #[must_use]
    pub fn has_deadline_passed_at(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| deadline < now)
    }

    /// Time until the deadline, or until the end of the row's day if there is
    /// no deadline. Negative once that moment has passed.
    #[must_use]
    pub fn time_left(&self) -> Duration {
        self.time_left_at(Utc::now())
    }

    #[must_use]
    pub fn time_left_at(&self, now: DateTime<Utc>) -> Duration {
        let until = self.deadline.unwrap_or_else(|| {
            self.timestamp
                .date_naive()
                .and_hms_opt(23, 59, 59)
                .map_or(self.timestamp, |naive| Utc.from_utc_datetime(&naive))
        });
        until - now
    }

    pub fn has_cook(&self) -> bool {
        self.statuses.iter().any(Status::is_cook)
    }

    pub fn has_diners(&self) -> bool {
        self.statuses.iter().any(Status::is_diner)
    }

    pub fn cooks(&self) -> Vec<usize> {
        self.indices(Status::is_cook)
    }

    /// Diners that are not cooking.
    pub fn diners(&self) -> Vec<usize> {
        self.indices(Status::is_diner)
    }

    /// Cooks first, then diners.
    pub fn diners_and_cooks(&self) -> Vec<usize> {
        let mut result = self.cooks();
        result.extend(self.diners());
        result
    }

    pub fn nones(&self) -> Vec<usize> {
        self.indices(Status::is_none)
    }

    pub fn unknowns(&self) -> Vec<usize> {
        self.indices(Status::is_unknown)
    }

    pub fn nones_and_unknowns(&self) -> Vec<usize> {
        let mut result = self.nones();
        result.extend(self.unknowns());
        result
    }

    /// Number of people attending dinner, guests included. Restricted to
    /// `indices` when given; indices outside the row are skipped.
    pub fn count(&self, indices: Option<&[usize]>) -> u32 {
        self.statuses(indices).into_iter().map(Status::attendees).sum()
    }

    pub fn statuses(&self, indices: Option<&[usize]>) -> Vec<&Status> {
        match indices {
            Some(indices) => indices
                .iter()
                .filter_map(|&index| self.statuses.get(index))
                .collect(),
            None => self.statuses.iter().collect(),
        }
    }

    fn indices(&self, test: impl Fn(&Status) -> bool) -> Vec<usize> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, status)| test(status))
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[Option<i32>]) -> StatusRow {
        StatusRow::new(
            Utc.with_ymd_and_hms(2014, 3, 28, 23, 0, 0).unwrap(),
            None,
            values.iter().map(|&v| Status::new(v, None)).collect(),
        )
    }

    #[test]
    fn test_all_diners() {
        let row = row(&[Some(-1); 5]);
        assert!(!row.has_cook());
        assert!(row.has_diners());
        assert_eq!(row.cooks(), Vec::<usize>::new());
        assert_eq!(row.nones(), Vec::<usize>::new());
        assert_eq!(row.diners(), vec![0, 1, 2, 3, 4]);
        assert_eq!(row.diners_and_cooks(), vec![0, 1, 2, 3, 4]);
        assert_eq!(row.count(None), 5);
        assert_eq!(row.count(Some(&row.cooks())), 0);
        assert_eq!(row.count(Some(&row.diners())), 5);
    }

    #[test]
    fn test_cook_and_guests() {
        let row = row(&[Some(1), Some(-3), Some(0), Some(0), Some(0)]);
        assert!(row.has_cook());
        assert!(row.has_diners());
        assert_eq!(row.cooks(), vec![0]);
        assert_eq!(row.nones(), vec![2, 3, 4]);
        assert_eq!(row.diners(), vec![1]);
        assert_eq!(row.diners_and_cooks(), vec![0, 1]);
        assert_eq!(row.count(None), 4);
        assert_eq!(row.count(Some(&row.cooks())), 1);
        assert_eq!(row.count(Some(&row.diners())), 3);
    }

    #[test]
    fn test_mixed_with_extra_guests() {
        let row = row(&[Some(-5), Some(11), Some(-1), Some(1), Some(0)]);
        assert_eq!(row.cooks(), vec![1, 3]);
        assert_eq!(row.nones(), vec![4]);
        assert_eq!(row.diners(), vec![0, 2]);
        assert_eq!(row.diners_and_cooks(), vec![1, 3, 0, 2]);
        assert_eq!(row.count(None), 18);
        assert_eq!(row.count(Some(&row.cooks())), 12);
        assert_eq!(row.count(Some(&row.diners())), 6);
    }

    #[test]
    fn test_unknowns() {
        let row = row(&[None, Some(0), None]);
        assert_eq!(row.unknowns(), vec![0, 2]);
        assert_eq!(row.nones_and_unknowns(), vec![1, 0, 2]);
        assert_eq!(row.count(None), 0);
        assert!(!row.has_cook());
        assert!(!row.has_diners());
    }

    #[test]
    fn test_statuses_selection_skips_out_of_range() {
        let row = row(&[Some(-1), Some(2)]);
        let picked = row.statuses(Some(&[1, 7]));
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].value, Some(2));
        assert_eq!(row.statuses(None).len(), 2);
    }

    #[test]
    fn test_deadline() {
        let mut row = row(&[None]);
        let now = Utc.with_ymd_and_hms(2014, 3, 28, 12, 0, 0).unwrap();
        assert!(!row.has_deadline_passed_at(now));
        assert_eq!(
            row.time_left_at(now),
            Duration::hours(11) + Duration::minutes(59) + Duration::seconds(59)
        );

        row.deadline = Some(Utc.with_ymd_and_hms(2014, 3, 28, 16, 0, 0).unwrap());
        assert!(!row.has_deadline_passed_at(now));
        assert_eq!(row.time_left_at(now), Duration::hours(4));

        let later = Utc.with_ymd_and_hms(2014, 3, 28, 17, 0, 0).unwrap();
        assert!(row.has_deadline_passed_at(later));
        assert_eq!(row.time_left_at(later), Duration::hours(-1));
    }

    #[test]
    fn test_serialize_row() {
        let row = row(&[Some(-1), None]);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["statuses"][0]["value"], -1);
        assert!(json["statuses"][1]["value"].is_null());
        assert!(json["deadline"].is_null());
    }
}
