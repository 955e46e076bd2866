use aula::domain::types::Role;
use aula::error::AulaServiceError;
use aula::usecase::enrollment::EnrollUseCase;

use crate::helpers::{
    MockCourseRepo, MockEnrollmentRepo, MockGradeRepo, test_course, test_user,
};

#[tokio::test]
async fn should_enroll_and_create_empty_grade_record() {
    let student = test_user(Role::Student, "ana@example.com");
    let course = test_course("t-1", "MAT-101");

    let enrollments = MockEnrollmentRepo::empty();
    let grades = MockGradeRepo::empty();
    let enrollment_handle = enrollments.handle();
    let grade_handle = grades.handle();

    let usecase = EnrollUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments,
        grades,
    };
    let enrolled = usecase
        .execute(&student, &course.access_code)
        .await
        .unwrap();
    assert_eq!(enrolled.id, course.id);

    let enrollments = enrollment_handle.lock().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].student_id, student.id);
    assert_eq!(enrollments[0].course_id, course.id);

    // Grade record starts with every score null and a name snapshot.
    let grades = grade_handle.lock().unwrap();
    assert_eq!(grades.len(), 1);
    assert_eq!(grades[0].enrollment_id, enrollments[0].id);
    assert_eq!(grades[0].student_name, student.full_name);
    assert_eq!(grades[0].corte1, None);
    assert_eq!(grades[0].corte2, None);
    assert_eq!(grades[0].corte3, None);
    assert_eq!(grades[0].final_grade, None);
}

#[tokio::test]
async fn should_reject_unknown_access_code() {
    let student = test_user(Role::Student, "ana@example.com");
    let usecase = EnrollUseCase {
        courses: MockCourseRepo::empty(),
        enrollments: MockEnrollmentRepo::empty(),
        grades: MockGradeRepo::empty(),
    };
    let result = usecase.execute(&student, "codigo-inexistente").await;
    assert!(matches!(result, Err(AulaServiceError::InvalidAccessCode)));
}

#[tokio::test]
async fn should_reject_duplicate_enrollment() {
    let student = test_user(Role::Student, "ana@example.com");
    let course = test_course("t-1", "MAT-101");

    let enrollments = MockEnrollmentRepo::empty();
    let handle = enrollments.handle();
    let usecase = EnrollUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments,
        grades: MockGradeRepo::empty(),
    };

    usecase
        .execute(&student, &course.access_code)
        .await
        .unwrap();
    let second = usecase.execute(&student, &course.access_code).await;

    assert!(matches!(second, Err(AulaServiceError::AlreadyEnrolled)));
    // Enrollment count for the (student, course) pair stays 1.
    let count = handle
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.student_id == student.id && e.course_id == course.id)
        .count();
    assert_eq!(count, 1);
}
