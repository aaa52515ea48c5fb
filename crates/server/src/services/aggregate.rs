use indexmap::IndexMap;

use crate::{
    db::models::{NewDailyStats, NewFileStats},
    error::{AppError, Result},
};

/// Folds the daily stats of every file into one entry per date.
///
/// Entries come out in the order their date was first seen, walking files in
/// order and each file's stats in order. The returned records are unsaved and
/// carry no owner; the caller attaches them to a project.
///
/// A per-date total that does not fit in an `i64` is rejected as invalid input.
pub fn aggregate(files: &[NewFileStats]) -> Result<Vec<NewDailyStats>> {
    let mut by_date: IndexMap<&str, NewDailyStats> = IndexMap::new();

    for daily in files.iter().filter_map(|f| f.daily_stats.as_ref()).flatten() {
        let Some(total) = by_date.get_mut(daily.date.as_str()) else {
            by_date.insert(daily.date.as_str(), daily.clone());
            continue;
        };

        total.coding_time = checked_sum(total.coding_time, daily.coding_time, &daily.date)?;
        total.open_time = checked_sum(total.open_time, daily.open_time, &daily.date)?;
    }

    Ok(by_date.into_values().collect())
}

fn checked_sum(total: i64, value: i64, date: &str) -> Result<i64> {
    total.checked_add(value).ok_or_else(|| {
        tracing::warn!("Daily stats for {} overflow when summed", date);
        AppError::Validation(format!("Daily stats for {date} are out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str, coding_time: i64, open_time: i64) -> NewDailyStats {
        NewDailyStats {
            date: date.to_string(),
            coding_time,
            open_time,
        }
    }

    fn file(stats: Vec<NewDailyStats>) -> NewFileStats {
        NewFileStats {
            file_path: Some("f.rs".to_string()),
            daily_stats: Some(stats),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(aggregate(&[]).unwrap().is_empty());
        assert!(aggregate(&[NewFileStats::default()]).unwrap().is_empty());
    }

    #[test]
    fn same_date_across_files_is_summed() {
        let files = vec![
            file(vec![day("2024-01-01", 10, 15)]),
            file(vec![day("2024-01-01", 10, 5)]),
        ];

        assert_eq!(aggregate(&files).unwrap(), vec![day("2024-01-01", 20, 20)]);
    }

    #[test]
    fn disjoint_dates_are_kept_as_is() {
        let files = vec![
            file(vec![day("2024-01-01", 10, 12)]),
            file(vec![day("2024-01-02", 3, 4)]),
        ];

        assert_eq!(
            aggregate(&files).unwrap(),
            vec![day("2024-01-01", 10, 12), day("2024-01-02", 3, 4)]
        );
    }

    #[test]
    fn order_follows_first_appearance() {
        let files = vec![
            file(vec![day("2024-03-05", 1, 1), day("2024-01-01", 1, 1)]),
            file(vec![day("2024-02-02", 1, 1), day("2024-03-05", 2, 2)]),
            NewFileStats::default(),
        ];

        let dates: Vec<_> = aggregate(&files)
            .unwrap()
            .into_iter()
            .map(|d| d.date)
            .collect();
        assert_eq!(dates, ["2024-03-05", "2024-01-01", "2024-02-02"]);
    }

    #[test]
    fn repeated_date_within_one_file_is_summed() {
        let files = vec![file(vec![day("d", 1, 2), day("d", 3, 4)])];
        assert_eq!(aggregate(&files).unwrap(), vec![day("d", 4, 6)]);
    }

    #[test]
    fn dates_are_opaque_keys() {
        let files = vec![file(vec![day("not-a-date", 5, 5), day("", 1, 1)])];
        assert_eq!(
            aggregate(&files).unwrap(),
            vec![day("not-a-date", 5, 5), day("", 1, 1)]
        );
    }

    #[test]
    fn overflowing_totals_are_rejected() {
        let files = vec![
            file(vec![day("2024-01-01", i64::MAX, 1)]),
            file(vec![day("2024-01-01", 1, 1)]),
        ];

        match aggregate(&files) {
            Err(AppError::Validation(message)) => {
                assert_eq!(message, "Daily stats for 2024-01-01 are out of range")
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn totals_up_to_the_limit_are_kept() {
        let files = vec![
            file(vec![day("d", i64::MAX - 1, 0)]),
            file(vec![day("d", 1, 0)]),
        ];
        assert_eq!(aggregate(&files).unwrap(), vec![day("d", i64::MAX, 0)]);
    }
}
