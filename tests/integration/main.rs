
mod auth_test;
mod course_test;
mod enrollment_test;
