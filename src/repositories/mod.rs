pub mod body_weight_repo;
pub mod checkin_repo;
pub mod login_session_repo;
pub mod profile_repo;
pub mod user_repo;
pub mod workout_repo;

pub use body_weight_repo::BodyWeightRepository;
pub use checkin_repo::CheckinRepository;
pub use login_session_repo::LoginSessionRepository;
pub use profile_repo::ProfileRepository;
pub use user_repo::UserRepository;
pub use workout_repo::WorkoutRepository;
