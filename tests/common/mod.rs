#![allow(dead_code)]

use std::time::Duration;

use sqlx::SqlitePool;
use tempfile::TempDir;

use mergington::config::AppConfig;
use mergington::database::{self, activities_repo, enrollments_repo};

/// A migrated database in its own temp directory; dropped with the struct.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    test_db_with_busy_timeout(AppConfig::default().busy_timeout).await
}

pub async fn test_db_with_busy_timeout(busy_timeout: Duration) -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("data").join("school.db");
    let config = AppConfig {
        database_url: format!("sqlite://{}", path.display()),
        busy_timeout,
        ..AppConfig::default()
    };

    let pool = database::connect(&config).await.expect("connect");
    database::migrate(&pool).await.expect("migrate");
    TestDb { pool, _dir: dir }
}

pub async fn add_activity(pool: &SqlitePool, name: &str, max_participants: i64, emails: &[&str]) -> i64 {
    let id = activities_repo::insert_activity(
        pool,
        activities_repo::NewActivity {
            name,
            description: "test activity",
            schedule: "Fridays, 3:30 PM - 5:00 PM",
            max_participants,
        },
    )
    .await
    .expect("insert activity");

    for email in emails {
        enrollments_repo::insert_enrollment(pool, id, email)
            .await
            .expect("insert enrollment");
    }
    id
}

pub async fn enrollment_count(pool: &SqlitePool, activity_id: i64) -> i64 {
    enrollments_repo::count_for_activity(pool, activity_id)
        .await
        .expect("count")
}

pub async fn total_enrollments(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM enrollments")
        .fetch_one(pool)
        .await
        .expect("count all")
}
