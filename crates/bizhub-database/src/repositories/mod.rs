//! Concrete repository implementations over the PostgreSQL pool.

pub mod business;
pub mod invite;
pub mod job;
pub mod staff;
pub mod user;

pub use business::BusinessRepository;
pub use invite::InviteRepository;
pub use job::JobRepository;
pub use staff::StaffRepository;
pub use user::UserRepository;

/// Whether a sqlx error is a Postgres unique-constraint violation (23505).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
