use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{
    ExerciseSet, ExerciseWithSets, FromSqliteRow, SessionExercise, SessionWithExercises,
    WorkoutSession,
};

/// Which of a user's sessions to load together with their exercises and sets.
#[derive(Debug, Clone)]
enum SessionScope {
    All,
    Range(NaiveDate, NaiveDate),
    Single(String),
}

impl SessionScope {
    /// WHERE clause over the `ws` alias plus its parameters, user id first.
    fn clause(&self, user_id: &str) -> (&'static str, Vec<Value>) {
        let user = Value::Text(user_id.to_string());
        match self {
            SessionScope::All => ("ws.user_id = ?", vec![user]),
            SessionScope::Range(start, end) => (
                "ws.user_id = ? AND ws.date >= ? AND ws.date <= ?",
                vec![
                    user,
                    Value::Text(start.format("%F").to_string()),
                    Value::Text(end.format("%F").to_string()),
                ],
            ),
            SessionScope::Single(id) => (
                "ws.user_id = ? AND ws.id = ?",
                vec![user, Value::Text(id.clone())],
            ),
        }
    }
}

/// Loads sessions, exercises and sets with one query each and assembles the
/// tree in memory. Sessions come back newest first, exercises in insertion
/// order and sets by set number.
fn load_sessions(
    conn: &Connection,
    user_id: &str,
    scope: &SessionScope,
) -> rusqlite::Result<Vec<SessionWithExercises>> {
    let (clause, params) = scope.clause(user_id);

    let mut stmt = conn.prepare(&format!(
        "SELECT ws.* FROM workout_sessions ws WHERE {} ORDER BY ws.date DESC, ws.rowid DESC",
        clause
    ))?;
    let sessions = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), WorkoutSession::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if sessions.is_empty() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(&format!(
        "SELECT se.* FROM session_exercises se
         JOIN workout_sessions ws ON se.session_id = ws.id
         WHERE {} ORDER BY se.rowid",
        clause
    ))?;
    let exercises = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), SessionExercise::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut stmt = conn.prepare(&format!(
        "SELECT es.* FROM exercise_sets es
         JOIN session_exercises se ON es.exercise_id = se.id
         JOIN workout_sessions ws ON se.session_id = ws.id
         WHERE {} ORDER BY es.set_number, es.rowid",
        clause
    ))?;
    let sets = stmt
        .query_map(rusqlite::params_from_iter(params.iter()), ExerciseSet::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut sets_by_exercise: HashMap<String, Vec<ExerciseSet>> = HashMap::new();
    for set in sets {
        sets_by_exercise
            .entry(set.exercise_id.clone())
            .or_default()
            .push(set);
    }

    let mut exercises_by_session: HashMap<String, Vec<ExerciseWithSets>> = HashMap::new();
    for exercise in exercises {
        let sets = sets_by_exercise.remove(&exercise.id).unwrap_or_default();
        exercises_by_session
            .entry(exercise.session_id.clone())
            .or_default()
            .push(ExerciseWithSets::new(exercise, sets));
    }

    Ok(sessions
        .into_iter()
        .map(|session| {
            let exercises = exercises_by_session.remove(&session.id).unwrap_or_default();
            SessionWithExercises { session, exercises }
        })
        .collect())
}

fn insert_set(
    conn: &Connection,
    exercise_id: &str,
    set_number: i32,
    reps: i32,
    weight: f64,
    rest_time: Option<i32>,
) -> rusqlite::Result<ExerciseSet> {
    let now = Utc::now();
    let set = ExerciseSet {
        id: Uuid::new_v4().to_string(),
        exercise_id: exercise_id.to_string(),
        set_number,
        reps,
        weight,
        rest_time,
        completed_at: Some(now),
        created_at: now,
    };
    conn.execute(
        "INSERT INTO exercise_sets (id, exercise_id, set_number, reps, weight, rest_time, completed_at, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            set.id,
            set.exercise_id,
            set.set_number,
            set.reps,
            set.weight,
            set.rest_time,
            set.completed_at,
            set.created_at
        ],
    )?;
    Ok(set)
}

// Ownership of exercises and sets is checked through the owning session.
const OWNED_EXERCISE: &str =
    "SELECT se.id FROM session_exercises se JOIN workout_sessions ws ON se.session_id = ws.id WHERE ws.user_id = ?";

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    // Workout Sessions
    pub async fn create_session(
        &self,
        user_id: &str,
        name: &str,
        date: NaiveDate,
        muscle_group: Option<&str>,
    ) -> Result<WorkoutSession> {
        let session = WorkoutSession {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.trim().to_string(),
            date,
            muscle_group: muscle_group.map(|g| g.to_string()),
            created_at: Utc::now(),
        };
        let session_clone = session.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workout_sessions (id, user_id, name, date, muscle_group, created_at)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    session_clone.id,
                    session_clone.user_id,
                    session_clone.name,
                    session_clone.date,
                    session_clone.muscle_group,
                    session_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(session)
    }

    /// Fetch a session only if it belongs to the user.
    pub async fn find_session(&self, id: &str, user_id: &str) -> Result<Option<WorkoutSession>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt =
                conn.prepare("SELECT * FROM workout_sessions WHERE id = ? AND user_id = ?")?;
            let result = stmt
                .query_row([&id, &user_id], WorkoutSession::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_recent_sessions(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<WorkoutSession>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM workout_sessions WHERE user_id = ?
                 ORDER BY date DESC, rowid DESC LIMIT ?",
            )?;
            let sessions = stmt
                .query_map(rusqlite::params![user_id, limit], WorkoutSession::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(sessions)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_sessions_by_user(&self, user_id: &str) -> Result<i64> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM workout_sessions WHERE user_id = ?",
                [&user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Every session of the user with exercises and sets, newest first.
    pub async fn find_sessions_with_exercises(
        &self,
        user_id: &str,
    ) -> Result<Vec<SessionWithExercises>> {
        self.load(user_id, SessionScope::All).await
    }

    /// Sessions dated within `[start, end]`, both inclusive.
    pub async fn find_sessions_in_range(
        &self,
        user_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SessionWithExercises>> {
        self.load(user_id, SessionScope::Range(start, end)).await
    }

    pub async fn find_session_with_exercises(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<SessionWithExercises>> {
        let sessions = self
            .load(user_id, SessionScope::Single(id.to_string()))
            .await?;
        Ok(sessions.into_iter().next())
    }

    async fn load(&self, user_id: &str, scope: SessionScope) -> Result<Vec<SessionWithExercises>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            Ok(load_sessions(&conn, &user_id, &scope)?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update_session(
        &self,
        id: &str,
        user_id: &str,
        name: &str,
        date: NaiveDate,
        muscle_group: Option<&str>,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        let name = name.trim().to_string();
        let muscle_group = muscle_group.map(|g| g.to_string());
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE workout_sessions SET name = ?, date = ?, muscle_group = ?
                 WHERE id = ? AND user_id = ?",
                rusqlite::params![name, date, muscle_group, id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete_session(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workout_sessions WHERE id = ? AND user_id = ?",
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Remove the user's whole history. Exercises and sets cascade.
    pub async fn delete_all_sessions(&self, user_id: &str) -> Result<usize> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "DELETE FROM workout_sessions WHERE user_id = ?",
                [&user_id],
            )?;
            Ok(rows)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Session Exercises
    pub async fn add_exercise(&self, session_id: &str, name: &str) -> Result<SessionExercise> {
        let exercise = SessionExercise {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.to_string(),
            exercise_name: name.trim().to_string(),
            created_at: Utc::now(),
        };
        let exercise_clone = exercise.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO session_exercises (id, session_id, exercise_name, created_at)
                 VALUES (?, ?, ?, ?)",
                rusqlite::params![
                    exercise_clone.id,
                    exercise_clone.session_id,
                    exercise_clone.exercise_name,
                    exercise_clone.created_at
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(exercise)
    }

    /// Fetch an exercise only if its session belongs to the user.
    pub async fn find_exercise(&self, id: &str, user_id: &str) -> Result<Option<SessionExercise>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT se.* FROM session_exercises se
                 JOIN workout_sessions ws ON se.session_id = ws.id
                 WHERE se.id = ? AND ws.user_id = ?",
            )?;
            let result = stmt
                .query_row([&id, &user_id], SessionExercise::from_row)
                .optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn rename_exercise(&self, id: &str, user_id: &str, name: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        let name = name.trim().to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                &format!(
                    "UPDATE session_exercises SET exercise_name = ? WHERE id = ? AND id IN ({})",
                    OWNED_EXERCISE
                ),
                rusqlite::params![name, id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete_exercise(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                &format!(
                    "DELETE FROM session_exercises WHERE id = ? AND id IN ({})",
                    OWNED_EXERCISE
                ),
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Distinct exercise names the user has logged, alphabetical.
    pub async fn find_exercise_names(&self, user_id: &str) -> Result<Vec<String>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT DISTINCT se.exercise_name FROM session_exercises se
                 JOIN workout_sessions ws ON se.session_id = ws.id
                 WHERE ws.user_id = ?
                 ORDER BY se.exercise_name COLLATE NOCASE",
            )?;
            let names = stmt
                .query_map([&user_id], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(names)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    // Exercise Sets

    /// Append a set, numbering it after the highest existing set.
    pub async fn add_set(
        &self,
        exercise_id: &str,
        reps: i32,
        weight: f64,
        rest_time: Option<i32>,
    ) -> Result<ExerciseSet> {
        let pool = self.pool.clone();
        let exercise_id = exercise_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let set_number: i32 = conn.query_row(
                "SELECT COALESCE(MAX(set_number), 0) + 1 FROM exercise_sets WHERE exercise_id = ?",
                [&exercise_id],
                |row| row.get(0),
            )?;
            Ok(insert_set(
                &conn,
                &exercise_id,
                set_number,
                reps,
                weight,
                rest_time,
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Insert a set with an explicit number.
    pub async fn create_set(
        &self,
        exercise_id: &str,
        set_number: i32,
        reps: i32,
        weight: f64,
        rest_time: Option<i32>,
    ) -> Result<ExerciseSet> {
        let pool = self.pool.clone();
        let exercise_id = exercise_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            Ok(insert_set(
                &conn,
                &exercise_id,
                set_number,
                reps,
                weight,
                rest_time,
            )?)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn update_set(&self, id: &str, user_id: &str, reps: i32, weight: f64) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                &format!(
                    "UPDATE exercise_sets SET reps = ?, weight = ? WHERE id = ? AND exercise_id IN ({})",
                    OWNED_EXERCISE
                ),
                rusqlite::params![reps, weight, id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete_set(&self, id: &str, user_id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                &format!(
                    "DELETE FROM exercise_sets WHERE id = ? AND exercise_id IN ({})",
                    OWNED_EXERCISE
                ),
                rusqlite::params![id, user_id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Weight of the last set of `exercise_name` in the most recent of the
    /// user's five latest sessions (excluding `current_session_id`) that
    /// logged it.
    pub async fn find_last_weight(
        &self,
        user_id: &str,
        exercise_name: &str,
        current_session_id: &str,
    ) -> Result<Option<f64>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let exercise_name = exercise_name.to_string();
        let current_session_id = current_session_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let weight = conn
                .query_row(
                    "SELECT es.weight FROM exercise_sets es
                     JOIN session_exercises se ON es.exercise_id = se.id
                     JOIN (
                         SELECT id, date, rowid AS seq FROM workout_sessions
                         WHERE user_id = ?1 AND id != ?2
                         ORDER BY date DESC, rowid DESC
                         LIMIT 5
                     ) recent ON se.session_id = recent.id
                     WHERE se.exercise_name = ?3
                     ORDER BY recent.date DESC, recent.seq DESC, se.rowid DESC, es.set_number DESC
                     LIMIT 1",
                    rusqlite::params![user_id, current_session_id, exercise_name],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(weight)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn create_test_user(pool: &DbPool, user_id: &str) {
        let conn = pool.get().unwrap();
        conn.execute(
            "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, datetime('now'))",
            rusqlite::params![user_id, format!("user_{}", user_id), "hash"],
        )
        .unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_find_session() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        let session = repo
            .create_session("user1", " Push day ", date(2024, 1, 15), Some("chest"))
            .await
            .unwrap();

        assert_eq!(session.name, "Push day");
        let found = repo.find_session(&session.id, "user1").await.unwrap();
        assert_eq!(found.unwrap().muscle_group.as_deref(), Some("chest"));
    }

    #[tokio::test]
    async fn test_find_session_wrong_user() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        create_test_user(&pool, "user2");
        let repo = WorkoutRepository::new(pool);

        let session = repo
            .create_session("user1", "Push", date(2024, 1, 15), None)
            .await
            .unwrap();

        assert!(repo.find_session(&session.id, "user2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sets_are_numbered_sequentially() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        let session = repo
            .create_session("user1", "Push", date(2024, 1, 15), None)
            .await
            .unwrap();
        let exercise = repo.add_exercise(&session.id, "Bench Press").await.unwrap();

        let first = repo.add_set(&exercise.id, 10, 60.0, None).await.unwrap();
        let second = repo.add_set(&exercise.id, 8, 65.0, Some(90)).await.unwrap();

        assert_eq!(first.set_number, 1);
        assert_eq!(second.set_number, 2);
        assert_eq!(second.rest_time, Some(90));
        assert!(second.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_load_tree_orders_and_groups() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        let older = repo
            .create_session("user1", "Legs", date(2024, 1, 10), Some("legs"))
            .await
            .unwrap();
        let newer = repo
            .create_session("user1", "Push", date(2024, 1, 15), Some("chest"))
            .await
            .unwrap();

        let bench = repo.add_exercise(&newer.id, "Bench Press").await.unwrap();
        let fly = repo.add_exercise(&newer.id, "Fly").await.unwrap();
        repo.create_set(&bench.id, 2, 8, 70.0, None).await.unwrap();
        repo.create_set(&bench.id, 1, 10, 60.0, None).await.unwrap();
        repo.create_set(&fly.id, 1, 12, 14.0, None).await.unwrap();
        let squat = repo.add_exercise(&older.id, "Squat").await.unwrap();
        repo.create_set(&squat.id, 1, 5, 100.0, None).await.unwrap();

        let sessions = repo.find_sessions_with_exercises("user1").await.unwrap();

        assert_eq!(sessions.len(), 2);
        assert_eq!(sessions[0].session.id, newer.id);
        assert_eq!(sessions[0].exercises.len(), 2);
        assert_eq!(sessions[0].exercises[0].exercise_name, "Bench Press");
        assert_eq!(sessions[0].exercises[1].exercise_name, "Fly");
        let numbers: Vec<i32> = sessions[0].exercises[0]
            .sets
            .iter()
            .map(|s| s.set_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(sessions[1].exercises[0].sets[0].weight, 100.0);
    }

    #[tokio::test]
    async fn test_find_sessions_in_range_is_inclusive() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        for day in [1, 7, 8] {
            repo.create_session("user1", "S", date(2024, 1, day), None)
                .await
                .unwrap();
        }

        let sessions = repo
            .find_sessions_in_range("user1", date(2024, 1, 1), date(2024, 1, 7))
            .await
            .unwrap();

        assert_eq!(sessions.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_session_cascades() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool.clone());

        let session = repo
            .create_session("user1", "Push", date(2024, 1, 15), None)
            .await
            .unwrap();
        let exercise = repo.add_exercise(&session.id, "Bench").await.unwrap();
        repo.add_set(&exercise.id, 10, 60.0, None).await.unwrap();

        let deleted = tokio_test::assert_ok!(repo.delete_session(&session.id, "user1").await);
        assert!(deleted);

        let conn = pool.get().unwrap();
        let sets: i64 = conn
            .query_row("SELECT COUNT(*) FROM exercise_sets", [], |row| row.get(0))
            .unwrap();
        let exercises: i64 = conn
            .query_row("SELECT COUNT(*) FROM session_exercises", [], |row| row.get(0))
            .unwrap();
        assert_eq!(sets, 0);
        assert_eq!(exercises, 0);
    }

    #[tokio::test]
    async fn test_delete_all_sessions_only_touches_owner() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        create_test_user(&pool, "user2");
        let repo = WorkoutRepository::new(pool);

        repo.create_session("user1", "A", date(2024, 1, 1), None).await.unwrap();
        repo.create_session("user1", "B", date(2024, 1, 2), None).await.unwrap();
        repo.create_session("user2", "C", date(2024, 1, 3), None).await.unwrap();

        assert_eq!(repo.delete_all_sessions("user1").await.unwrap(), 2);
        assert_eq!(repo.count_sessions_by_user("user1").await.unwrap(), 0);
        assert_eq!(repo.count_sessions_by_user("user2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_set_mutations_require_ownership() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        create_test_user(&pool, "user2");
        let repo = WorkoutRepository::new(pool);

        let session = repo
            .create_session("user1", "Push", date(2024, 1, 15), None)
            .await
            .unwrap();
        let exercise = repo.add_exercise(&session.id, "Bench").await.unwrap();
        let set = repo.add_set(&exercise.id, 10, 60.0, None).await.unwrap();

        assert!(!repo.update_set(&set.id, "user2", 1, 1.0).await.unwrap());
        assert!(!repo.delete_set(&set.id, "user2").await.unwrap());
        assert!(!repo.rename_exercise(&exercise.id, "user2", "X").await.unwrap());
        assert!(!repo.delete_exercise(&exercise.id, "user2").await.unwrap());
        assert!(repo.find_exercise(&exercise.id, "user2").await.unwrap().is_none());

        assert!(repo.update_set(&set.id, "user1", 12, 62.5).await.unwrap());
        assert!(repo.rename_exercise(&exercise.id, "user1", "Incline Bench").await.unwrap());

        let tree = repo
            .find_session_with_exercises(&session.id, "user1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(tree.exercises[0].exercise_name, "Incline Bench");
        assert_eq!(tree.exercises[0].sets[0].reps, 12);
        assert_eq!(tree.exercises[0].sets[0].weight, 62.5);

        assert!(repo.delete_set(&set.id, "user1").await.unwrap());
        assert!(repo.delete_exercise(&exercise.id, "user1").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_exercise_names_distinct_sorted() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        let a = repo.create_session("user1", "A", date(2024, 1, 1), None).await.unwrap();
        let b = repo.create_session("user1", "B", date(2024, 1, 2), None).await.unwrap();
        repo.add_exercise(&a.id, "squat").await.unwrap();
        repo.add_exercise(&a.id, "Bench Press").await.unwrap();
        repo.add_exercise(&b.id, "Bench Press").await.unwrap();

        let names = repo.find_exercise_names("user1").await.unwrap();
        assert_eq!(names, vec!["Bench Press".to_string(), "squat".to_string()]);
    }

    #[tokio::test]
    async fn test_find_last_weight() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        let old = repo.create_session("user1", "A", date(2024, 1, 1), None).await.unwrap();
        let recent = repo.create_session("user1", "B", date(2024, 1, 8), None).await.unwrap();
        let current = repo.create_session("user1", "C", date(2024, 1, 15), None).await.unwrap();

        let e = repo.add_exercise(&old.id, "Bench").await.unwrap();
        repo.add_set(&e.id, 10, 50.0, None).await.unwrap();
        let e = repo.add_exercise(&recent.id, "Bench").await.unwrap();
        repo.add_set(&e.id, 10, 60.0, None).await.unwrap();
        repo.add_set(&e.id, 8, 65.0, None).await.unwrap();
        let e = repo.add_exercise(&current.id, "Bench").await.unwrap();
        repo.add_set(&e.id, 8, 90.0, None).await.unwrap();

        let weight = repo.find_last_weight("user1", "Bench", &current.id).await.unwrap();
        assert_eq!(weight, Some(65.0));

        let none = repo.find_last_weight("user1", "Deadlift", &current.id).await.unwrap();
        assert_eq!(none, None);
    }

    #[tokio::test]
    async fn test_find_last_weight_only_looks_at_five_latest_sessions() {
        let pool = setup_test_db();
        create_test_user(&pool, "user1");
        let repo = WorkoutRepository::new(pool);

        let oldest = repo.create_session("user1", "Old", date(2024, 1, 1), None).await.unwrap();
        let e = repo.add_exercise(&oldest.id, "Bench").await.unwrap();
        repo.add_set(&e.id, 10, 40.0, None).await.unwrap();
        for day in 2..=6 {
            repo.create_session("user1", "Other", date(2024, 1, day), None)
                .await
                .unwrap();
        }

        let weight = repo.find_last_weight("user1", "Bench", "none").await.unwrap();
        assert_eq!(weight, None);
    }
}
