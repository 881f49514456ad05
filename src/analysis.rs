//! Deterministic analysis layer for cycle statistics
//!
//! Computes the dashboard metrics from a user's logged cycle history.
//! Everything here is pure: the caller supplies the data snapshot and
//! today's date, so every result is reproducible in tests.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Cycle;

/// Prediction interval used when the profile has no typical cycle length.
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;

/// ---------------------------------------------------------------------------
/// Output Types
/// ---------------------------------------------------------------------------

/// Status of the next-period prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextPeriod {
  /// No usable anchor: empty history, or the most recent cycle is still open.
  NoData,
  /// The most recent logged cycle covers today.
  Ongoing,
  /// Expected next period start. Negative `days_until` means overdue.
  Predicted { date: NaiveDate, days_until: i64 },
}

/// The three dashboard metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleOverview {
  pub average_cycle_length: Option<i64>,
  pub logs_this_month: i64,
  pub next_period: NextPeriod,
}

impl CycleOverview {
  /// Compute the dashboard overview from a snapshot of the user's data.
  ///
  /// `cycles` must be sorted by start date descending (most recent first);
  /// `typical_cycle_length` comes from the profile and is the prediction
  /// interval; `today` is injected by the caller, never read from the clock.
  pub fn compute(
    cycles: &[Cycle],
    symptom_log_dates: &[NaiveDate],
    typical_cycle_length: i64,
    today: NaiveDate,
  ) -> Self {
    Self {
      average_cycle_length: average_cycle_length(cycles),
      logs_this_month: count_logs_in_month(symptom_log_dates, today),
      next_period: predict_next_period(cycles, typical_cycle_length, today),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Metric Calculations
/// ---------------------------------------------------------------------------

/// Mean of the recorded cycle lengths, rounded to the nearest whole day.
///
/// Lengths are trusted as stored by the entry layer; cycles without one are
/// skipped. `None` iff no cycle carries a length.
pub fn average_cycle_length(cycles: &[Cycle]) -> Option<i64> {
  let lengths: Vec<i64> = cycles.iter().filter_map(|c| c.cycle_length).collect();
  if lengths.is_empty() {
    return None;
  }

  let mean = lengths.iter().sum::<i64>() as f64 / lengths.len() as f64;
  // f64::round ties away from zero, so .5 rounds up on this domain
  Some(mean.round() as i64)
}

/// Count symptom entries falling in `today`'s calendar month.
pub fn count_logs_in_month(log_dates: &[NaiveDate], today: NaiveDate) -> i64 {
  log_dates
    .iter()
    .filter(|d| d.year() == today.year() && d.month() == today.month())
    .count() as i64
}

/// Predict the next period start from the most recent cycle.
///
/// Prediction requires a completed cycle as the anchor: if the most recent
/// cycle has no end date yet, the result is `NoData` -- there is no fallback
/// to an older closed cycle.
pub fn predict_next_period(
  cycles: &[Cycle],
  typical_cycle_length: i64,
  today: NaiveDate,
) -> NextPeriod {
  let Some(latest) = cycles.first() else {
    return NextPeriod::NoData;
  };

  let Some(end_date) = latest.end_date else {
    return NextPeriod::NoData;
  };

  if today >= latest.start_date && today <= end_date {
    return NextPeriod::Ongoing;
  }

  let date = end_date + Duration::days(typical_cycle_length);
  let days_until = (date - today).num_days();

  NextPeriod::Predicted { date, days_until }
}

/// Display label for the dashboard's "Next Period" card.
///
/// Only a strictly positive `days_until` counts as upcoming; zero is
/// "Due today" and negatives are overdue.
pub fn next_period_label(next_period: &NextPeriod) -> String {
  match next_period {
    NextPeriod::NoData => "No data yet".to_string(),
    NextPeriod::Ongoing => "Ongoing".to_string(),
    NextPeriod::Predicted { days_until, .. } => {
      if *days_until > 0 {
        format!("In {} days", days_until)
      } else if *days_until == 0 {
        "Due today".to_string()
      } else {
        format!("Overdue by {} days", days_until.abs())
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn cycle(start: NaiveDate, end: Option<NaiveDate>, length: Option<i64>) -> Cycle {
    Cycle {
      id: 0,
      user_id: "user".to_string(),
      start_date: start,
      end_date: end,
      cycle_length: length,
      notes: None,
      created_at: None,
    }
  }

  #[test]
  fn average_is_none_for_empty_history() {
    assert_eq!(average_cycle_length(&[]), None);
  }

  #[test]
  fn average_is_none_when_no_cycle_has_a_length() {
    let cycles = vec![
      cycle(date(2024, 1, 1), Some(date(2024, 1, 5)), None),
      cycle(date(2023, 12, 3), None, None),
    ];
    assert_eq!(average_cycle_length(&cycles), None);
  }

  #[test]
  fn average_skips_cycles_without_a_length() {
    let cycles = vec![
      cycle(date(2024, 2, 1), None, None),
      cycle(date(2024, 1, 1), Some(date(2024, 1, 5)), Some(30)),
    ];
    assert_eq!(average_cycle_length(&cycles), Some(30));
  }

  #[test]
  fn average_rounds_half_up() {
    // (28 + 29) / 2 = 28.5 -> 29
    let cycles = vec![
      cycle(date(2024, 2, 1), Some(date(2024, 2, 5)), Some(28)),
      cycle(date(2024, 1, 1), Some(date(2024, 1, 5)), Some(29)),
    ];
    assert_eq!(average_cycle_length(&cycles), Some(29));
  }

  #[test]
  fn average_matches_nearest_integer_for_random_sets() {
    // Deterministic pseudo-random lengths in the documented [15, 60] range.
    let mut seed: u64 = 0x9e37_79b9;
    for n in 1..=50 {
      let lengths: Vec<i64> = (0..n)
        .map(|_| {
          seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
          15 + ((seed >> 33) as i64).rem_euclid(46)
        })
        .collect();

      let cycles: Vec<Cycle> = lengths
        .iter()
        .enumerate()
        .map(|(i, len)| {
          cycle(date(2024, 1, 1) - Duration::days(30 * i as i64), None, Some(*len))
        })
        .collect();

      let mean = lengths.iter().sum::<i64>() as f64 / lengths.len() as f64;
      assert_eq!(average_cycle_length(&cycles), Some(mean.round() as i64));
    }
  }

  #[test]
  fn empty_history_yields_no_data() {
    let overview = CycleOverview::compute(&[], &[], 28, date(2024, 1, 20));
    assert_eq!(overview.average_cycle_length, None);
    assert_eq!(overview.logs_this_month, 0);
    assert_eq!(overview.next_period, NextPeriod::NoData);
  }

  #[test]
  fn open_cycle_yields_no_prediction() {
    // An open most recent cycle gives no prediction at all, even when an
    // older closed cycle could anchor one. Intended behavior, not a bug.
    let cycles = vec![
      cycle(date(2024, 1, 15), None, None),
      cycle(date(2023, 12, 18), Some(date(2023, 12, 22)), Some(28)),
    ];
    assert_eq!(
      predict_next_period(&cycles, 28, date(2024, 1, 20)),
      NextPeriod::NoData
    );
  }

  #[test]
  fn today_inside_latest_cycle_is_ongoing() {
    let cycles = vec![cycle(date(2024, 1, 10), Some(date(2024, 1, 15)), Some(5))];
    // Typical length must not matter while a period is in progress.
    for typical in [21, 28, 45] {
      assert_eq!(
        predict_next_period(&cycles, typical, date(2024, 1, 12)),
        NextPeriod::Ongoing
      );
    }
  }

  #[test]
  fn ongoing_boundaries_are_inclusive() {
    let cycles = vec![cycle(date(2024, 1, 10), Some(date(2024, 1, 15)), Some(5))];
    assert_eq!(
      predict_next_period(&cycles, 28, date(2024, 1, 10)),
      NextPeriod::Ongoing
    );
    assert_eq!(
      predict_next_period(&cycles, 28, date(2024, 1, 15)),
      NextPeriod::Ongoing
    );
    assert_ne!(
      predict_next_period(&cycles, 28, date(2024, 1, 16)),
      NextPeriod::Ongoing
    );
  }

  #[test]
  fn predicts_upcoming_period() {
    // Anchor D = Jan 15, L = 28, today = D + L - 3 -> 3 days out
    let cycles = vec![cycle(date(2024, 1, 10), Some(date(2024, 1, 15)), Some(5))];
    let today = date(2024, 1, 15) + Duration::days(28 - 3);

    assert_eq!(
      predict_next_period(&cycles, 28, today),
      NextPeriod::Predicted {
        date: date(2024, 2, 12),
        days_until: 3,
      }
    );
  }

  #[test]
  fn reports_overdue_period() {
    // today = D + L + 5 -> overdue by 5 days
    let cycles = vec![cycle(date(2024, 1, 10), Some(date(2024, 1, 15)), Some(5))];
    let today = date(2024, 1, 15) + Duration::days(28 + 5);

    let result = predict_next_period(&cycles, 28, today);
    assert_eq!(
      result,
      NextPeriod::Predicted {
        date: date(2024, 2, 12),
        days_until: -5,
      }
    );
    assert_eq!(next_period_label(&result), "Overdue by 5 days");
  }

  #[test]
  fn due_today_is_not_upcoming() {
    // days_until == 0 gets its own label and never reads "In 0 days"
    let cycles = vec![cycle(date(2024, 1, 10), Some(date(2024, 1, 15)), Some(5))];
    let today = date(2024, 1, 15) + Duration::days(28);

    let result = predict_next_period(&cycles, 28, today);
    assert_eq!(
      result,
      NextPeriod::Predicted {
        date: today,
        days_until: 0,
      }
    );
    assert_eq!(next_period_label(&result), "Due today");
  }

  #[test]
  fn dashboard_scenario_end_to_end() {
    // Stored lengths are trusted verbatim, even when inconsistent with the
    // date span: mean(5, 29) = 17. Prediction anchors on the most recent
    // end date: 2024-01-05 + 28 = 2024-02-02, 13 days after 2024-01-20.
    let cycles = vec![
      cycle(date(2024, 1, 1), Some(date(2024, 1, 5)), Some(5)),
      cycle(date(2023, 12, 3), Some(date(2023, 12, 7)), Some(29)),
    ];
    let logs = vec![date(2024, 1, 3), date(2024, 1, 17), date(2023, 12, 30)];

    let overview = CycleOverview::compute(&cycles, &logs, 28, date(2024, 1, 20));

    assert_eq!(overview.average_cycle_length, Some(17));
    assert_eq!(overview.logs_this_month, 2);
    assert_eq!(
      overview.next_period,
      NextPeriod::Predicted {
        date: date(2024, 2, 2),
        days_until: 13,
      }
    );
    assert_eq!(next_period_label(&overview.next_period), "In 13 days");
  }

  #[test]
  fn month_count_ignores_other_months_and_years() {
    let logs = vec![
      date(2024, 1, 1),
      date(2024, 1, 31),
      date(2024, 2, 1),
      date(2023, 1, 15),
    ];
    assert_eq!(count_logs_in_month(&logs, date(2024, 1, 20)), 2);
  }

  #[test]
  fn labels_for_no_data_and_ongoing() {
    assert_eq!(next_period_label(&NextPeriod::NoData), "No data yet");
    assert_eq!(next_period_label(&NextPeriod::Ongoing), "Ongoing");
  }
}
