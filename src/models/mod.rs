pub mod activities;
pub mod enrollments;

pub use activities::{ActivitiesRow, ActivityEnrollmentRow};
pub use enrollments::EnrollmentsRow;
