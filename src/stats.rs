//! Aggregations computed in memory over sessions that were already loaded.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::models::{muscle_group, BodyWeightEntry, ExerciseWithSets, SessionWithExercises};

/// Added to the last logged weight when suggesting the next one.
pub const SUGGESTED_INCREMENT_KG: f64 = 2.5;

/// Renders a weight without a trailing `.0`.
pub fn format_kg(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{:.1}", weight)
    }
}

/// Heaviest set weight per exercise name. Zero-weight sets never count.
#[derive(Debug, Default, Clone)]
pub struct PersonalRecords(BTreeMap<String, f64>);

impl PersonalRecords {
    pub fn get(&self, exercise_name: &str) -> Option<f64> {
        self.0.get(exercise_name).copied()
    }

    /// True when one of the exercise's sets matches the record for its name.
    pub fn is_record_holder(&self, exercise: &ExerciseWithSets) -> bool {
        match self.get(&exercise.exercise_name) {
            Some(record) => exercise.sets.iter().any(|s| s.weight == record),
            None => false,
        }
    }

    pub fn label(&self, exercise_name: &str) -> String {
        self.get(exercise_name)
            .map(|w| format!("{} kg", format_kg(w)))
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

pub fn personal_records(sessions: &[SessionWithExercises]) -> PersonalRecords {
    let mut records: BTreeMap<String, f64> = BTreeMap::new();
    let sets = sessions
        .iter()
        .flat_map(|s| &s.exercises)
        .flat_map(|e| e.sets.iter().map(move |set| (&e.exercise_name, set.weight)));

    for (name, weight) in sets {
        if weight <= 0.0 {
            continue;
        }
        let best = records.entry(name.clone()).or_insert(weight);
        if weight > *best {
            *best = weight;
        }
    }

    PersonalRecords(records)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ExerciseStats {
    pub avg_weight: f64,
    pub avg_reps: f64,
    pub total_volume: f64,
}

impl ExerciseStats {
    pub fn avg_weight_display(&self) -> String {
        format!("{:.1}", self.avg_weight)
    }

    pub fn avg_reps_display(&self) -> String {
        format!("{:.1}", self.avg_reps)
    }

    pub fn total_volume_display(&self) -> String {
        format_kg(self.total_volume)
    }
}

pub fn exercise_stats(exercise: &ExerciseWithSets) -> ExerciseStats {
    if exercise.sets.is_empty() {
        return ExerciseStats::default();
    }

    let count = exercise.sets.len() as f64;
    let total_weight: f64 = exercise.sets.iter().map(|s| s.weight).sum();
    let total_reps: i64 = exercise.sets.iter().map(|s| i64::from(s.reps)).sum();

    ExerciseStats {
        avg_weight: total_weight / count,
        avg_reps: total_reps as f64 / count,
        total_volume: exercise.total_volume(),
    }
}

/// Case-insensitive match on session name, exercise names or the
/// `dd/mm/yyyy` date. A blank term keeps everything.
pub fn filter_sessions(
    sessions: Vec<SessionWithExercises>,
    term: &str,
) -> Vec<SessionWithExercises> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return sessions;
    }

    sessions
        .into_iter()
        .filter(|s| {
            s.session.name.to_lowercase().contains(&term)
                || s.session.date_display().contains(&term)
                || s
                    .exercises
                    .iter()
                    .any(|e| e.exercise_name.to_lowercase().contains(&term))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    /// Unknown values fall back to the week.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("month") => Period::Month,
            _ => Period::Week,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Period::Week => "This week",
            Period::Month => "This month",
        }
    }

    /// Inclusive date range containing `today`. Weeks run Sunday to Saturday.
    pub fn range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Period::Week => {
                let offset = u64::from(today.weekday().num_days_from_sunday());
                let start = today - Days::new(offset);
                (start, start + Days::new(6))
            }
            Period::Month => {
                let start = today.with_day(1).unwrap_or(today);
                (start, last_day_of_month(start))
            }
        }
    }
}

pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub total_workouts: usize,
    pub days_with_workouts: usize,
    pub max_weight: f64,
    pub most_frequent_muscle_group: String,
    pub total_sets: usize,
}

impl PeriodSummary {
    pub fn max_weight_display(&self) -> String {
        format_kg(self.max_weight)
    }
}

pub fn summarize(sessions: &[SessionWithExercises]) -> PeriodSummary {
    let days: HashSet<NaiveDate> = sessions.iter().map(|s| s.session.date).collect();

    let max_weight = sessions
        .iter()
        .flat_map(|s| &s.exercises)
        .flat_map(|e| &e.sets)
        .map(|set| set.weight)
        .fold(0.0, f64::max);

    // Insertion order breaks ties in favour of the group seen first.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for group in sessions.iter().filter_map(|s| s.session.muscle_group.as_deref()) {
        match counts.iter_mut().find(|(g, _)| *g == group) {
            Some((_, n)) => *n += 1,
            None => counts.push((group, 1)),
        }
    }
    let mut most_frequent: Option<(&str, usize)> = None;
    for (group, n) in counts {
        if most_frequent.map_or(true, |(_, best)| n > best) {
            most_frequent = Some((group, n));
        }
    }

    PeriodSummary {
        total_workouts: sessions.len(),
        days_with_workouts: days.len(),
        max_weight,
        most_frequent_muscle_group: most_frequent
            .map(|(g, _)| muscle_group::display_name(g).to_string())
            .unwrap_or_else(|| "-".to_string()),
        total_sets: sessions.iter().map(|s| s.set_count()).sum(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f64,
    pub total_volume: f64,
    pub total_reps: i64,
}

impl ProgressPoint {
    pub fn date_display(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn max_weight_display(&self) -> String {
        format_kg(self.max_weight)
    }

    pub fn total_volume_display(&self) -> String {
        format_kg(self.total_volume)
    }
}

/// One point per session that logged sets for `exercise_name`, oldest first.
pub fn progression(sessions: &[SessionWithExercises], exercise_name: &str) -> Vec<ProgressPoint> {
    let mut points: Vec<ProgressPoint> = sessions
        .iter()
        .filter_map(|s| {
            let sets: Vec<_> = s
                .exercises
                .iter()
                .filter(|e| e.exercise_name == exercise_name)
                .flat_map(|e| &e.sets)
                .collect();
            if sets.is_empty() {
                return None;
            }
            Some(ProgressPoint {
                date: s.session.date,
                max_weight: sets.iter().map(|set| set.weight).fold(0.0, f64::max),
                total_volume: sets.iter().map(|set| set.volume()).sum(),
                total_reps: sets.iter().map(|set| i64::from(set.reps)).sum(),
            })
        })
        .collect();

    // Stable, so same-day sessions keep their relative order.
    points.sort_by_key(|p| p.date);
    points
}

pub fn suggested_weight(last_weight: Option<f64>) -> Option<f64> {
    last_weight.map(|w| w + SUGGESTED_INCREMENT_KG)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTrend {
    pub first: f64,
    pub latest: f64,
    pub change: f64,
}

impl WeightTrend {
    pub fn first_display(&self) -> String {
        format_kg(self.first)
    }

    pub fn latest_display(&self) -> String {
        format_kg(self.latest)
    }

    pub fn change_display(&self) -> String {
        let sign = if self.change > 0.0 { "+" } else { "" };
        format!("{}{:.1}", sign, self.change)
    }
}

/// Needs at least two entries, ordered oldest first.
pub fn weight_trend(history: &[BodyWeightEntry]) -> Option<WeightTrend> {
    if history.len() < 2 {
        return None;
    }
    let first = history.first()?.weight;
    let latest = history.last()?.weight;
    Some(WeightTrend {
        first,
        latest,
        change: latest - first,
    })
}

pub const CHART_WIDTH: f64 = 600.0;
pub const CHART_HEIGHT: f64 = 200.0;
const CHART_PADDING: f64 = 10.0;

/// `points` attribute for an SVG polyline spanning the chart box. The lowest
/// value sits on the bottom edge and the highest on the top edge.
pub fn chart_points(values: &[f64]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let inner_w = CHART_WIDTH - 2.0 * CHART_PADDING;
    let inner_h = CHART_HEIGHT - 2.0 * CHART_PADDING;
    let step = if values.len() > 1 {
        inner_w / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = CHART_PADDING + step * i as f64;
            let y = if max > min {
                CHART_PADDING + inner_h - (v - min) / span * inner_h
            } else {
                CHART_HEIGHT / 2.0
            };
            format!("{:.1},{:.1}", x, y)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
