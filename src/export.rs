//! CSV export of the workout history, one row per set.

use crate::error::{AppError, Result};
use crate::models::SessionWithExercises;

pub const CSV_HEADERS: [&str; 7] = [
    "Date",
    "Session Name",
    "Muscle Group",
    "Exercise",
    "Set",
    "Reps",
    "Weight (kg)",
];

pub fn export_filename(today: chrono::NaiveDate) -> String {
    format!("workouts-{}.csv", today.format("%F"))
}

pub fn sessions_to_csv(sessions: &[SessionWithExercises]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for entry in sessions {
        let date = entry.session.date_display();
        let group = entry.session.muscle_group_label();
        for exercise in &entry.exercises {
            for set in &exercise.sets {
                writer.write_record(&[
                    date.clone(),
                    entry.session.name.clone(),
                    group.clone(),
                    exercise.exercise_name.clone(),
                    set.set_number.to_string(),
                    set.reps.to_string(),
                    set.weight.to_string(),
                ])?;
            }
        }
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExerciseSet, ExerciseWithSets, WorkoutSession};
    use chrono::{NaiveDate, Utc};

    fn sample() -> SessionWithExercises {
        let set = |n: i32, reps: i32, weight: f64| ExerciseSet {
            id: format!("set-{}", n),
            exercise_id: "ex1".to_string(),
            set_number: n,
            reps,
            weight,
            rest_time: None,
            completed_at: None,
            created_at: Utc::now(),
        };
        SessionWithExercises {
            session: WorkoutSession {
                id: "s1".to_string(),
                user_id: "user1".to_string(),
                name: "Push, heavy".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                muscle_group: None,
                created_at: Utc::now(),
            },
            exercises: vec![ExerciseWithSets {
                id: "ex1".to_string(),
                session_id: "s1".to_string(),
                exercise_name: "Bench \"Flat\"".to_string(),
                sets: vec![set(1, 10, 60.0), set(2, 8, 62.5)],
            }],
        }
    }

    #[test]
    fn test_csv_rows_and_quoting() {
        let bytes = sessions_to_csv(&[sample()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Date,Session Name,Muscle Group,Exercise,Set,Reps,Weight (kg)");
        assert_eq!(lines[1], "05/03/2024,\"Push, heavy\",-,\"Bench \"\"Flat\"\"\",1,10,60");
        assert_eq!(lines[2], "05/03/2024,\"Push, heavy\",-,\"Bench \"\"Flat\"\"\",2,8,62.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_empty_history_has_only_headers() {
        let text = String::from_utf8(sessions_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_export_filename() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(export_filename(day), "workouts-2024-03-05.csv");
    }
}
