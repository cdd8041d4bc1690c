pub mod attendance;
pub mod auth;
pub mod batches;
pub mod courses;
pub mod dashboard;
pub mod devices;
pub mod feedback;
pub mod health;
pub mod leaves;
pub mod meetings;
pub mod notices;
pub mod routines;
pub mod staff;
pub mod students;
pub mod subjects;
pub mod tracking;
