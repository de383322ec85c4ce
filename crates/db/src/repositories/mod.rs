//! Repository abstractions for data access.

pub mod audit;
pub mod fine;
pub mod fine_type;
pub mod lockout;
pub mod login_attempt;
pub mod member;
pub mod user;

pub use audit::AuditLogRepository;
pub use fine::{CreateFineInput, FineRepository};
pub use fine_type::FineTypeRepository;
pub use lockout::LockoutRepository;
pub use login_attempt::LoginAttemptRepository;
pub use member::MemberRepository;
pub use user::UserRepository;
