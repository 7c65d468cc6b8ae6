use sqlx::SqliteExecutor;

use crate::models::{ActivitiesRow, ActivityEnrollmentRow};

const SQL_LIST_WITH_ENROLLMENTS: &str = r#"
SELECT
  a.id,
  a.name,
  a.description,
  a.schedule,
  a.max_participants,
  e.email
FROM activities a
LEFT JOIN enrollments e
  ON e.activity_id = a.id
ORDER BY a.name ASC, e.email ASC
"#;

pub async fn list_with_enrollments(
    executor: impl SqliteExecutor<'_>,
) -> sqlx::Result<Vec<ActivityEnrollmentRow>> {
    sqlx::query_as::<_, ActivityEnrollmentRow>(SQL_LIST_WITH_ENROLLMENTS)
        .fetch_all(executor)
        .await
}

const SQL_FIND_BY_NAME: &str = r#"
SELECT
  id,
  name,
  description,
  schedule,
  max_participants
FROM activities
WHERE name = ?
"#;

pub async fn find_by_name(
    executor: impl SqliteExecutor<'_>,
    name: &str,
) -> sqlx::Result<Option<ActivitiesRow>> {
    sqlx::query_as::<_, ActivitiesRow>(SQL_FIND_BY_NAME)
        .bind(name)
        .fetch_optional(executor)
        .await
}

const SQL_COUNT_ACTIVITIES: &str = "SELECT COUNT(*) FROM activities";

pub async fn count_activities(executor: impl SqliteExecutor<'_>) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_ACTIVITIES)
        .fetch_one(executor)
        .await
}

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  name,
  description,
  schedule,
  max_participants
) VALUES (?, ?, ?, ?)
"#;

pub struct NewActivity<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub schedule: &'a str,
    pub max_participants: i64,
}

pub async fn insert_activity(
    executor: impl SqliteExecutor<'_>,
    activity: NewActivity<'_>,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(activity.name)
        .bind(activity.description)
        .bind(activity.schedule)
        .bind(activity.max_participants)
        .execute(executor)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_DELETE_BY_NAME: &str = "DELETE FROM activities WHERE name = ?";

pub async fn delete_by_name(executor: impl SqliteExecutor<'_>, name: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_BY_NAME)
        .bind(name)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
