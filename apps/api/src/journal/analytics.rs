//! Progress reporting over check-in and note history: range clipping,
//! charting order, and the peak/busiest-day reductions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::note::{Checkin, Note};

/// One plotted point of the self-esteem line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub score: i32,
}

/// One day's journaling activity: how many notes were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub notes: usize,
}

/// The self-esteem line and the note-activity line over one shared date
/// range, with each line's high point.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub series: Vec<ProgressPoint>,
    pub activity: Vec<ActivityPoint>,
    pub peak: Option<ProgressPoint>,
    pub busiest: Option<ActivityPoint>,
}

/// Clips check-ins to an optional inclusive `[from, to]` range and orders
/// them by date for charting. An open bound passes everything on that side.
pub fn progress_series(
    checkins: &[Checkin],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<ProgressPoint> {
    let mut series: Vec<ProgressPoint> = checkins
        .iter()
        .filter(|c| from.map_or(true, |f| c.date >= f) && to.map_or(true, |t| c.date <= t))
        .map(|c| ProgressPoint {
            date: c.date,
            score: c.score,
        })
        .collect();
    series.sort_by_key(|p| p.date);
    series
}

/// Counts notes per day inside the optional inclusive range, ordered by
/// date.
pub fn activity_series(
    notes: &[Note],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<ActivityPoint> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for note in notes
        .iter()
        .filter(|n| from.map_or(true, |f| n.date >= f) && to.map_or(true, |t| n.date <= t))
    {
        *per_day.entry(note.date).or_default() += 1;
    }
    per_day
        .into_iter()
        .map(|(date, notes)| ActivityPoint { date, notes })
        .collect()
}

/// The highest-scoring day; ties go to the earliest occurrence. An empty
/// series has no peak.
pub fn peak_day(series: &[ProgressPoint]) -> Option<ProgressPoint> {
    series
        .iter()
        .cloned()
        .reduce(|max, p| if p.score > max.score { p } else { max })
}

/// The day with the most notes written; ties go to the earliest.
pub fn busiest_day(activity: &[ActivityPoint]) -> Option<ActivityPoint> {
    activity
        .iter()
        .cloned()
        .reduce(|max, p| if p.notes > max.notes { p } else { max })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn checkin(day: &str, score: i32) -> Checkin {
        Checkin {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date(day),
            score,
            journal: "fine".to_string(),
            created_at: Utc::now(),
        }
    }

    fn note(day: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date(day),
            content: "wrote things".to_string(),
            goals: "write more".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let checkins = vec![
            checkin("2026-03-01", 4),
            checkin("2026-03-05", 6),
            checkin("2026-03-10", 8),
            checkin("2026-03-15", 5),
        ];

        let series = progress_series(
            &checkins,
            Some(date("2026-03-05")),
            Some(date("2026-03-10")),
        );

        assert_eq!(
            series.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![date("2026-03-05"), date("2026-03-10")]
        );
    }

    #[test]
    fn open_bounds_pass_everything() {
        let checkins = vec![checkin("2026-03-01", 4), checkin("2026-03-15", 5)];

        assert_eq!(progress_series(&checkins, None, None).len(), 2);
        assert_eq!(
            progress_series(&checkins, Some(date("2026-03-10")), None).len(),
            1
        );
        assert_eq!(
            progress_series(&checkins, None, Some(date("2026-03-10"))).len(),
            1
        );
    }

    #[test]
    fn series_is_sorted_by_date() {
        let checkins = vec![
            checkin("2026-03-15", 5),
            checkin("2026-03-01", 4),
            checkin("2026-03-10", 8),
        ];

        let series = progress_series(&checkins, None, None);

        assert_eq!(
            series.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![date("2026-03-01"), date("2026-03-10"), date("2026-03-15")]
        );
    }

    #[test]
    fn peak_takes_the_earliest_of_tied_days() {
        let series = progress_series(
            &[
                checkin("2026-03-01", 4),
                checkin("2026-03-05", 9),
                checkin("2026-03-10", 9),
            ],
            None,
            None,
        );

        let peak = peak_day(&series).unwrap();
        assert_eq!(peak.date, date("2026-03-05"));
        assert_eq!(peak.score, 9);
    }

    #[test]
    fn empty_series_has_no_peak() {
        assert!(peak_day(&[]).is_none());
    }

    #[test]
    fn notes_are_counted_per_day_inside_the_range() {
        let notes = vec![
            note("2026-03-01"),
            note("2026-03-05"),
            note("2026-03-05"),
            note("2026-03-20"),
        ];

        let activity = activity_series(
            &notes,
            Some(date("2026-03-01")),
            Some(date("2026-03-10")),
        );

        assert_eq!(
            activity,
            vec![
                ActivityPoint {
                    date: date("2026-03-01"),
                    notes: 1,
                },
                ActivityPoint {
                    date: date("2026-03-05"),
                    notes: 2,
                },
            ]
        );
    }

    #[test]
    fn busiest_day_takes_the_earliest_of_tied_days() {
        let activity = activity_series(
            &[
                note("2026-03-02"),
                note("2026-03-02"),
                note("2026-03-08"),
                note("2026-03-08"),
                note("2026-03-09"),
            ],
            None,
            None,
        );

        let busiest = busiest_day(&activity).unwrap();
        assert_eq!(busiest.date, date("2026-03-02"));
        assert_eq!(busiest.notes, 2);
    }

    #[test]
    fn no_notes_means_no_busiest_day() {
        assert!(busiest_day(&[]).is_none());
    }
}
