#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EnrollmentsRow {
    pub id: i64,
    pub activity_id: i64,
    pub email: String,
}
