use sqlx::SqliteExecutor;

use crate::models::EnrollmentsRow;

const SQL_COUNT_FOR_ACTIVITY: &str = r#"
SELECT COUNT(*)
FROM enrollments
WHERE activity_id = ?
"#;

pub async fn count_for_activity(
    executor: impl SqliteExecutor<'_>,
    activity_id: i64,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_FOR_ACTIVITY)
        .bind(activity_id)
        .fetch_one(executor)
        .await
}

const SQL_EXISTS: &str = r#"
SELECT EXISTS (
  SELECT 1
  FROM enrollments
  WHERE activity_id = ?
    AND email = ?
)
"#;

pub async fn exists(
    executor: impl SqliteExecutor<'_>,
    activity_id: i64,
    email: &str,
) -> sqlx::Result<bool> {
    sqlx::query_scalar::<_, bool>(SQL_EXISTS)
        .bind(activity_id)
        .bind(email)
        .fetch_one(executor)
        .await
}

const SQL_INSERT_ENROLLMENT: &str = r#"
INSERT INTO enrollments (
  activity_id,
  email
) VALUES (?, ?)
"#;

pub async fn insert_enrollment(
    executor: impl SqliteExecutor<'_>,
    activity_id: i64,
    email: &str,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ENROLLMENT)
        .bind(activity_id)
        .bind(email)
        .execute(executor)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_LIST_FOR_ACTIVITY: &str = r#"
SELECT
  id,
  activity_id,
  email
FROM enrollments
WHERE activity_id = ?
ORDER BY email ASC
"#;

pub async fn list_for_activity(
    executor: impl SqliteExecutor<'_>,
    activity_id: i64,
) -> sqlx::Result<Vec<EnrollmentsRow>> {
    sqlx::query_as::<_, EnrollmentsRow>(SQL_LIST_FOR_ACTIVITY)
        .bind(activity_id)
        .fetch_all(executor)
        .await
}
