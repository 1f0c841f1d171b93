//! Embedded database migrations
//!
//! Every schema file under `migrations/` is compiled into the binary and
//! applied in order at startup.

use std::collections::HashSet;

use anyhow::Context;

use crate::db::DbPool;

/// All migrations in order, each as (filename, sql_content)
pub const MIGRATIONS: &[(&str, &str)] = &[
    (
        "001_create_users.sql",
        include_str!("../migrations/001_create_users.sql"),
    ),
    (
        "002_create_login_sessions.sql",
        include_str!("../migrations/002_create_login_sessions.sql"),
    ),
    (
        "003_create_workout_sessions.sql",
        include_str!("../migrations/003_create_workout_sessions.sql"),
    ),
    (
        "004_create_session_exercises.sql",
        include_str!("../migrations/004_create_session_exercises.sql"),
    ),
    (
        "005_create_exercise_sets.sql",
        include_str!("../migrations/005_create_exercise_sets.sql"),
    ),
    (
        "006_create_workout_checkins.sql",
        include_str!("../migrations/006_create_workout_checkins.sql"),
    ),
    (
        "007_create_user_profiles.sql",
        include_str!("../migrations/007_create_user_profiles.sql"),
    ),
    (
        "008_create_body_weight_tracking.sql",
        include_str!("../migrations/008_create_body_weight_tracking.sql"),
    ),
];

/// Apply every migration not yet recorded in `_migrations`.
///
/// Each file runs in its own transaction together with its bookkeeping row,
/// so a failing migration leaves no partial schema behind. Returns how many
/// files were applied.
pub fn run_migrations(pool: &DbPool) -> anyhow::Result<usize> {
    let mut conn = pool.get()?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )?;

    let applied: HashSet<String> = {
        let mut stmt = conn.prepare("SELECT name FROM _migrations")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        names
    };

    let mut count = 0;
    for (filename, sql) in MIGRATIONS.iter().filter(|(name, _)| !applied.contains(*name)) {
        tracing::info!(migration = filename, "applying migration");
        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .with_context(|| format!("migration {filename} failed"))?;
        tx.execute("INSERT INTO _migrations (name) VALUES (?)", [filename])?;
        tx.commit()?;
        count += 1;
    }

    tracing::debug!(applied = count, total = MIGRATIONS.len(), "schema up to date");
    Ok(count)
}

/// Run all migrations without tracking, for fresh in-memory test databases.
pub fn run_migrations_for_tests(pool: &DbPool) -> Result<(), Box<dyn std::error::Error>> {
    let conn = pool.get()?;
    for (_filename, sql) in MIGRATIONS {
        conn.execute_batch(sql)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[test]
    fn test_second_run_applies_nothing() {
        let pool = create_memory_pool().unwrap();

        assert_eq!(run_migrations(&pool).unwrap(), MIGRATIONS.len());
        assert_eq!(run_migrations(&pool).unwrap(), 0);

        let conn = pool.get().unwrap();
        let recorded: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(recorded, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_deleting_a_session_cascades_to_exercises() {
        let pool = create_memory_pool().unwrap();
        run_migrations(&pool).unwrap();
        let conn = pool.get().unwrap();

        conn.execute_batch(
            "INSERT INTO users (id, username, password_hash, created_at)
                VALUES ('u1', 'alice', 'x', '2024-01-01T00:00:00Z');
             INSERT INTO workout_sessions (id, user_id, name, date, created_at)
                VALUES ('s1', 'u1', 'Push', '2024-01-02', '2024-01-02T00:00:00Z');
             INSERT INTO session_exercises (id, session_id, exercise_name, created_at)
                VALUES ('e1', 's1', 'Bench', '2024-01-02T00:00:00Z');
             DELETE FROM workout_sessions WHERE id = 's1';",
        )
        .unwrap();

        let left: i64 = conn
            .query_row("SELECT COUNT(*) FROM session_exercises", [], |row| row.get(0))
            .unwrap();
        assert_eq!(left, 0);
    }
}
