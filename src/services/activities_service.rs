use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::database::{activities_repo, enrollments_repo};
use crate::error::SignupError;
use crate::models::{ActivitiesRow, ActivityEnrollmentRow, EnrollmentsRow};
use crate::services::signup_request::SignupRequest;

/// Takes the write lock up front so concurrent signups queue instead of racing on capacity.
const SQL_BEGIN_SIGNUP: &str = "BEGIN IMMEDIATE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityView {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub participant_count: i64,
    pub emails: Vec<String>,
}

impl ActivityView {
    fn from_parts(row: ActivitiesRow, enrollments: Vec<EnrollmentsRow>) -> Self {
        let emails: Vec<String> = enrollments.into_iter().map(|e| e.email).collect();
        Self {
            name: row.name,
            description: row.description,
            schedule: row.schedule,
            max_participants: row.max_participants,
            participant_count: emails.len() as i64,
            emails,
        }
    }

    pub fn spots_left(&self) -> i64 {
        (self.max_participants - self.participant_count).max(0)
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

/// Every activity with its current enrollments, ordered by name.
pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityView>> {
    let rows = activities_repo::list_with_enrollments(pool).await?;
    Ok(group_rows(rows))
}

fn group_rows(rows: Vec<ActivityEnrollmentRow>) -> Vec<ActivityView> {
    let mut views: Vec<ActivityView> = Vec::new();
    let mut current_id: Option<i64> = None;

    for row in rows {
        if current_id != Some(row.id) {
            current_id = Some(row.id);
            views.push(ActivityView {
                name: row.name,
                description: row.description,
                schedule: row.schedule,
                max_participants: row.max_participants,
                participant_count: 0,
                emails: Vec::new(),
            });
        }
        if let (Some(view), Some(email)) = (views.last_mut(), row.email) {
            view.emails.push(email);
            view.participant_count += 1;
        }
    }

    views
}

/// Enrolls one student. Existence, capacity and duplicate checks plus the insert
/// commit as one unit; any early return drops `tx`, which rolls back.
pub async fn signup_for_activity(
    pool: &SqlitePool,
    request: &SignupRequest,
) -> Result<ActivityView, SignupError> {
    let mut tx = pool.begin_with(SQL_BEGIN_SIGNUP).await?;

    let Some(activity) = activities_repo::find_by_name(&mut *tx, request.activity_name()).await?
    else {
        info!(activity = %request.activity_name(), "signup rejected: activity not found");
        return Err(SignupError::NotFound);
    };

    let enrolled = enrollments_repo::count_for_activity(&mut *tx, activity.id).await?;
    if enrolled >= activity.max_participants {
        info!(
            activity = %activity.name,
            enrolled,
            max_participants = activity.max_participants,
            "signup rejected: activity full"
        );
        return Err(SignupError::CapacityExceeded);
    }

    if enrollments_repo::exists(&mut *tx, activity.id, request.email()).await? {
        info!(activity = %activity.name, email = %request.email(), "signup rejected: already enrolled");
        return Err(SignupError::AlreadyEnrolled);
    }

    if let Err(e) = enrollments_repo::insert_enrollment(&mut *tx, activity.id, request.email()).await {
        let err = insert_error(e);
        if matches!(err, SignupError::AlreadyEnrolled) {
            warn!(activity = %activity.name, email = %request.email(), "duplicate enrollment caught by constraint");
        }
        return Err(err);
    }

    let enrollments = enrollments_repo::list_for_activity(&mut *tx, activity.id).await?;
    tx.commit().await?;

    let view = ActivityView::from_parts(activity, enrollments);
    info!(
        activity = %view.name,
        email = %request.email(),
        participant_count = view.participant_count,
        "signup recorded"
    );
    Ok(view)
}

/// Deletes an activity by name; its enrollments go with it through the FK cascade.
pub async fn remove_activity(pool: &SqlitePool, name: &str) -> Result<bool, SignupError> {
    let removed = activities_repo::delete_by_name(pool, name.trim()).await?;
    if removed > 0 {
        info!(activity = %name.trim(), "activity removed");
    }
    Ok(removed > 0)
}

// UNIQUE(activity_id, email) backs up the duplicate check.
fn insert_error(err: sqlx::Error) -> SignupError {
    let unique_violation = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if unique_violation {
        SignupError::AlreadyEnrolled
    } else {
        SignupError::StorageUnavailable(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::database::migrate(&pool).await.unwrap();
        pool
    }

    fn row(id: i64, name: &str, max: i64, email: Option<&str>) -> ActivityEnrollmentRow {
        ActivityEnrollmentRow {
            id,
            name: name.to_string(),
            description: format!("{name} description"),
            schedule: "Fridays".to_string(),
            max_participants: max,
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn groups_joined_rows_per_activity() {
        let views = group_rows(vec![
            row(2, "Art Club", 5, None),
            row(1, "Chess Club", 2, Some("a@x.edu")),
            row(1, "Chess Club", 2, Some("b@x.edu")),
        ]);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Art Club");
        assert_eq!(views[0].participant_count, 0);
        assert!(views[0].emails.is_empty());
        assert_eq!(views[1].emails, vec!["a@x.edu", "b@x.edu"]);
        assert_eq!(views[1].participant_count, 2);
        assert!(views[1].is_full());
    }

    #[test]
    fn spots_left_never_negative() {
        let mut view = group_rows(vec![row(1, "Chess Club", 2, Some("a@x.edu"))]).remove(0);
        assert_eq!(view.spots_left(), 1);
        view.participant_count = 3;
        assert_eq!(view.spots_left(), 0);
    }

    #[tokio::test]
    async fn duplicate_insert_maps_to_already_enrolled() {
        let pool = memory_pool().await;
        let id = activities_repo::insert_activity(
            &pool,
            activities_repo::NewActivity {
                name: "Art Club",
                description: "Painting",
                schedule: "Thursdays",
                max_participants: 5,
            },
        )
        .await
        .unwrap();
        enrollments_repo::insert_enrollment(&pool, id, "a@x.edu").await.unwrap();

        let err = enrollments_repo::insert_enrollment(&pool, id, "a@x.edu")
            .await
            .unwrap_err();
        assert!(matches!(insert_error(err), SignupError::AlreadyEnrolled));
    }

    #[tokio::test]
    async fn other_insert_failures_are_storage_errors() {
        let pool = memory_pool().await;

        // No such activity: the foreign key rejects the row.
        let err = enrollments_repo::insert_enrollment(&pool, 999, "a@x.edu")
            .await
            .unwrap_err();
        assert!(matches!(insert_error(err), SignupError::StorageUnavailable(_)));
        assert!(matches!(
            insert_error(sqlx::Error::PoolClosed),
            SignupError::StorageUnavailable(sqlx::Error::PoolClosed)
        ));
    }
}
