pub mod assignments;
pub mod auth;
pub mod courses;
pub mod oauth;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use oauth::OAuthService;
