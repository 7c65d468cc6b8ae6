#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivitiesRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
}

// One row per (activity, enrollment); `email` is NULL for an activity nobody joined yet.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityEnrollmentRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: i64,
    pub email: Option<String>,
}
