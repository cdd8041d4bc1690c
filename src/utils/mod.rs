pub mod jwt;
pub mod otp;
pub mod random;
pub mod streaks;
pub mod timeline;
pub mod tracing;
pub mod upload;
