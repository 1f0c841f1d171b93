pub mod body_weight;
pub mod checkin;
pub mod exercise_set;
pub mod form;
pub mod from_row;
pub mod muscle_group;
pub mod profile;
pub mod registration;
pub mod session_exercise;
pub mod user;
pub mod workout_session;

pub use body_weight::{BodyWeightEntry, CreateBodyWeight};
pub use checkin::{Checkin, ToggleCheckin};
pub use exercise_set::{CreateExerciseSet, ExerciseSet, UpdateExerciseSet};
pub use from_row::FromSqliteRow;
pub use muscle_group::{MuscleGroup, MuscleOption, MUSCLE_GROUPS};
pub use profile::{UpdateProfile, UserProfile};
pub use registration::{NewExercise, NewSessionRequest, NewSet};
pub use session_exercise::{ExerciseNameForm, ExerciseWithSets, SessionExercise};
pub use user::{CreateUser, LoginCredentials, User};
pub use workout_session::{
    CreateWorkoutSession, SessionWithExercises, UpdateWorkoutSession, WorkoutSession,
};
