//! Aggregator - reduces an ordered sequence of health logs into summary
//! metrics.
//!
//! All optional-field arithmetic is filter-then-average: a log with a
//! missing measurement is excluded from that average, never counted as
//! zero. Empty inputs (and empty filtered subsets) produce `None`, a
//! "no data" result distinct from any zero value - no division ever runs
//! against an empty set.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{HealthLog, MoodType};

/// Sleep duration below this many hours triggers the advice variant.
/// Exclusive boundary: exactly 7.0 hours counts as adequate.
pub const SLEEP_TARGET_HOURS: f64 = 7.0;

/// Recommendation shown when average sleep falls short of the target.
pub const SLEEP_ADVICE_SHORT: &str =
    "Adults should aim for 7-9 hours of quality sleep per night.";

/// Recommendation shown when average sleep meets the target.
pub const SLEEP_ADVICE_ADEQUATE: &str = "Your sleep duration looks good!";

/// Sleep metrics over the logs that actually carry sleep data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepSummary {
    pub average_sleep_hours: f64,
    pub average_sleep_quality: f64,
    pub total_nights_tracked: usize,
}

impl SleepSummary {
    /// Policy recommendation for this average sleep duration.
    pub fn recommendation(&self) -> &'static str {
        sleep_recommendation(self.average_sleep_hours)
    }

    /// One-line narrative used by the sleep-analysis payload.
    pub fn narrative(&self) -> String {
        format!(
            "You're averaging {:.1} hours of sleep with a quality rating of {:.1}/10.",
            self.average_sleep_hours, self.average_sleep_quality
        )
    }
}

/// Trend metrics over a full lookback window of logs.
#[derive(Debug, Clone, Serialize)]
pub struct TrendSummary {
    pub logs_analyzed: usize,
    pub sleep: Option<SleepSummary>,
    pub average_stress: f64,
    pub average_anxiety: f64,
    pub average_water_intake: Option<f64>,
    pub average_exercise_minutes: Option<f64>,
    /// Days each symptom flag was set, keyed by symptom name.
    pub symptom_days: HashMap<&'static str, usize>,
    /// Most frequently reported mood and how many days it was reported.
    pub dominant_mood: MoodType,
    pub dominant_mood_days: usize,
    /// Days with moderate or severe overall symptom severity.
    pub notable_symptom_days: usize,
}

/// Sleep analysis over the logs where `sleep_hours` is present.
///
/// Returns `None` when no log in the window has sleep data.
pub fn analyze_sleep(logs: &[HealthLog]) -> Option<SleepSummary> {
    let tracked: Vec<&HealthLog> = logs.iter().filter(|l| l.sleep_hours.is_some()).collect();
    if tracked.is_empty() {
        return None;
    }

    let n = tracked.len() as f64;
    let hours: f64 = tracked.iter().filter_map(|l| l.sleep_hours).sum();
    let quality: f64 = tracked.iter().map(|l| f64::from(l.sleep_quality)).sum();

    Some(SleepSummary {
        average_sleep_hours: round1(hours / n),
        average_sleep_quality: round1(quality / n),
        total_nights_tracked: tracked.len(),
    })
}

/// Recommendation rule: below-target averages get the advice wording,
/// everything else the affirmation. The threshold is policy, not computed.
pub fn sleep_recommendation(average_hours: f64) -> &'static str {
    if average_hours < SLEEP_TARGET_HOURS {
        SLEEP_ADVICE_SHORT
    } else {
        SLEEP_ADVICE_ADEQUATE
    }
}

/// Full trend reduction over a lookback window.
///
/// Returns `None` for an empty window so callers can short-circuit with an
/// explicit "no data" payload.
pub fn analyze_trends(logs: &[HealthLog]) -> Option<TrendSummary> {
    if logs.is_empty() {
        return None;
    }

    let n = logs.len() as f64;
    let stress: f64 = logs.iter().map(|l| f64::from(l.stress_level)).sum();
    let anxiety: f64 = logs.iter().map(|l| f64::from(l.anxiety_level)).sum();

    let mut symptom_days = HashMap::new();
    for (name, count) in [
        ("fever", logs.iter().filter(|l| l.has_fever).count()),
        ("cough", logs.iter().filter(|l| l.has_cough).count()),
        ("headache", logs.iter().filter(|l| l.has_headache).count()),
        ("fatigue", logs.iter().filter(|l| l.has_fatigue).count()),
        ("body_pain", logs.iter().filter(|l| l.has_body_pain).count()),
        ("nausea", logs.iter().filter(|l| l.has_nausea).count()),
    ] {
        if count > 0 {
            symptom_days.insert(name, count);
        }
    }

    let mut mood_days: HashMap<MoodType, usize> = HashMap::new();
    for log in logs {
        *mood_days.entry(log.mood).or_default() += 1;
    }
    // HashMap iteration order is arbitrary; break count ties by name so
    // repeated runs over the same logs agree.
    let (dominant_mood, dominant_mood_days) = mood_days
        .into_iter()
        .max_by_key(|&(mood, days)| (days, std::cmp::Reverse(mood.as_str())))?;

    Some(TrendSummary {
        logs_analyzed: logs.len(),
        sleep: analyze_sleep(logs),
        average_stress: round1(stress / n),
        average_anxiety: round1(anxiety / n),
        average_water_intake: filtered_mean(logs, |l| l.water_intake),
        average_exercise_minutes: filtered_mean(logs, |l| l.exercise_minutes.map(f64::from)),
        symptom_days,
        dominant_mood,
        dominant_mood_days,
        notable_symptom_days: logs
            .iter()
            .filter(|l| l.symptom_severity.is_notable())
            .count(),
    })
}

/// Mean over only the logs where the extractor yields a value.
fn filtered_mean<F>(logs: &[HealthLog], extract: F) -> Option<f64>
where
    F: Fn(&HealthLog) -> Option<f64>,
{
    let values: Vec<f64> = logs.iter().filter_map(&extract).collect();
    if values.is_empty() {
        return None;
    }
    Some(round1(values.iter().sum::<f64>() / values.len() as f64))
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
