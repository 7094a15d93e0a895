pub mod assignments;

pub mod auth;

pub mod courses;

pub mod oauth;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use oauth::configure_oauth_routes;
