pub mod attendance_repository;
pub mod batch_repository;
pub mod course_repository;
pub mod course_tracking_repository;
pub mod device_token_repository;
pub mod feedback_repository;
pub mod institute_repository;
pub mod leave_repository;
pub mod meeting_repository;
pub mod notice_repository;
pub mod otp_repository;
pub mod principal_repository;
pub mod routine_repository;
pub mod student_repository;
pub mod subject_repository;

pub use attendance_repository::AttendanceRepository;
pub use batch_repository::BatchRepository;
pub use course_repository::CourseRepository;
pub use course_tracking_repository::CourseTrackingRepository;
pub use device_token_repository::DeviceTokenRepository;
pub use feedback_repository::FeedbackRepository;
pub use institute_repository::InstituteRepository;
pub use leave_repository::LeaveRepository;
pub use meeting_repository::MeetingRepository;
pub use notice_repository::NoticeRepository;
pub use otp_repository::OtpRepository;
pub use principal_repository::PrincipalRepository;
pub use routine_repository::RoutineRepository;
pub use student_repository::{NewStudent, StudentRepository, StudentUpdate};
pub use subject_repository::SubjectRepository;
