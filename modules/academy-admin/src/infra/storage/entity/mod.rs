pub mod academy;
pub mod course_review;
pub mod grade_level;
pub mod interactive_course;
pub mod lesson;
pub mod package;
pub mod student_profile;
pub mod subscription;
pub mod teacher_payout;
pub mod teacher_profile;
pub mod user;
