use aula::domain::repository::CourseChanges;
use aula::domain::types::Role;
use aula::error::AulaServiceError;
use aula::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase,
    ListCourseStudentsUseCase, ListTeacherCoursesUseCase, UpdateCourseUseCase,
};

use crate::helpers::{
    MockCourseRepo, MockEnrollmentRepo, MockGradeRepo, MockUserRepo, empty_grade, test_course,
    test_enrollment, test_user,
};

fn create_input(code: &str) -> CreateCourseInput {
    CreateCourseInput {
        name: "Cálculo I".to_owned(),
        code: code.to_owned(),
        description: "Límites y derivadas".to_owned(),
        academic_period: "2026-1".to_owned(),
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_course_with_generated_access_code() {
    let usecase = CreateCourseUseCase {
        repo: MockCourseRepo::empty(),
    };
    let course = usecase.execute("t-1", create_input("MAT-101")).await.unwrap();

    assert_eq!(course.teacher_id, "t-1");
    // 8 bytes of entropy → 11 base64url chars
    assert_eq!(course.access_code.len(), 11);
}

#[tokio::test]
async fn should_reject_duplicate_course_code() {
    let repo = MockCourseRepo::empty();
    let handle = repo.handle();
    let usecase = CreateCourseUseCase { repo };

    usecase.execute("t-1", create_input("MAT-101")).await.unwrap();
    let result = usecase.execute("t-2", create_input("MAT-101")).await;

    assert!(matches!(result, Err(AulaServiceError::CourseCodeTaken)));
    assert_eq!(handle.lock().unwrap().len(), 1);
}

// ── ListTeacherCourses ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_own_courses() {
    let repo = MockCourseRepo::new(vec![
        test_course("t-1", "MAT-101"),
        test_course("t-1", "MAT-102"),
        test_course("t-2", "FIS-201"),
    ]);
    let usecase = ListTeacherCoursesUseCase { repo };

    let courses = usecase.execute("t-1").await.unwrap();
    assert_eq!(courses.len(), 2);
    assert!(courses.iter().all(|c| c.teacher_id == "t-1"));
}

// ── GetCourse ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn owner_teacher_can_read_course() {
    let course = test_course("t-1", "MAT-101");
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments: MockEnrollmentRepo::empty(),
    };
    let found = usecase.execute(&course.id, "t-1", Role::Teacher).await.unwrap();
    assert_eq!(found.id, course.id);
}

#[tokio::test]
async fn foreign_teacher_gets_forbidden() {
    let course = test_course("t-1", "MAT-101");
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments: MockEnrollmentRepo::empty(),
    };
    let result = usecase.execute(&course.id, "t-2", Role::Teacher).await;
    assert!(matches!(result, Err(AulaServiceError::NotCourseOwner)));
}

#[tokio::test]
async fn enrolled_student_can_read_course() {
    let course = test_course("t-1", "MAT-101");
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments: MockEnrollmentRepo::new(vec![test_enrollment("s-1", &course.id)]),
    };
    assert!(usecase.execute(&course.id, "s-1", Role::Student).await.is_ok());
}

#[tokio::test]
async fn unenrolled_student_gets_forbidden() {
    let course = test_course("t-1", "MAT-101");
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments: MockEnrollmentRepo::empty(),
    };
    let result = usecase.execute(&course.id, "s-1", Role::Student).await;
    assert!(matches!(result, Err(AulaServiceError::NotEnrolled)));
}

#[tokio::test]
async fn missing_course_is_not_found() {
    let usecase = GetCourseUseCase {
        courses: MockCourseRepo::empty(),
        enrollments: MockEnrollmentRepo::empty(),
    };
    let result = usecase.execute("no-existe", "t-1", Role::Teacher).await;
    assert!(matches!(result, Err(AulaServiceError::CourseNotFound)));
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

fn changes(code: &str) -> CourseChanges {
    CourseChanges {
        name: "Cálculo II".to_owned(),
        code: code.to_owned(),
        description: "Integrales".to_owned(),
        academic_period: "2026-2".to_owned(),
    }
}

#[tokio::test]
async fn owner_can_update_course() {
    let course = test_course("t-1", "MAT-101");
    let usecase = UpdateCourseUseCase {
        repo: MockCourseRepo::new(vec![course.clone()]),
    };
    let updated = usecase
        .execute(&course.id, "t-1", changes("MAT-201"))
        .await
        .unwrap();
    assert_eq!(updated.name, "Cálculo II");
    assert_eq!(updated.code, "MAT-201");
    // Access code survives updates.
    assert_eq!(updated.access_code, course.access_code);
}

#[tokio::test]
async fn non_owner_update_reports_not_found_and_changes_nothing() {
    let course = test_course("t-1", "MAT-101");
    let repo = MockCourseRepo::new(vec![course.clone()]);
    let handle = repo.handle();
    let usecase = UpdateCourseUseCase { repo };

    let result = usecase.execute(&course.id, "t-2", changes("MAT-201")).await;

    assert!(matches!(result, Err(AulaServiceError::CourseNotFound)));
    assert_eq!(handle.lock().unwrap()[0].code, "MAT-101");
}

#[tokio::test]
async fn update_rejects_code_taken_by_another_course() {
    let course_a = test_course("t-1", "MAT-101");
    let course_b = test_course("t-1", "MAT-102");
    let usecase = UpdateCourseUseCase {
        repo: MockCourseRepo::new(vec![course_a.clone(), course_b]),
    };
    let result = usecase.execute(&course_a.id, "t-1", changes("MAT-102")).await;
    assert!(matches!(result, Err(AulaServiceError::CourseCodeTaken)));
}

// ── DeleteCourse ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_cascades_to_enrollments_and_grades() {
    let course = test_course("t-1", "MAT-101");
    let other = test_course("t-1", "MAT-102");
    let enrollment = test_enrollment("s-1", &course.id);
    let other_enrollment = test_enrollment("s-1", &other.id);

    let courses = MockCourseRepo::new(vec![course.clone(), other.clone()]);
    let enrollments =
        MockEnrollmentRepo::new(vec![enrollment.clone(), other_enrollment.clone()]);
    let grades = MockGradeRepo::new(vec![
        empty_grade(&enrollment, "Ana Gómez"),
        empty_grade(&other_enrollment, "Ana Gómez"),
    ]);

    let course_handle = courses.handle();
    let enrollment_handle = enrollments.handle();
    let grade_handle = grades.handle();

    let usecase = DeleteCourseUseCase {
        courses,
        enrollments,
        grades,
    };
    usecase.execute(&course.id, "t-1").await.unwrap();

    assert!(course_handle.lock().unwrap().iter().all(|c| c.id != course.id));
    assert!(
        enrollment_handle
            .lock()
            .unwrap()
            .iter()
            .all(|e| e.course_id != course.id)
    );
    assert!(
        grade_handle
            .lock()
            .unwrap()
            .iter()
            .all(|g| g.course_id != course.id)
    );
    // The other course keeps its records.
    assert_eq!(enrollment_handle.lock().unwrap().len(), 1);
    assert_eq!(grade_handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn non_owner_cannot_delete_course() {
    let course = test_course("t-1", "MAT-101");
    let courses = MockCourseRepo::new(vec![course.clone()]);
    let handle = courses.handle();
    let usecase = DeleteCourseUseCase {
        courses,
        enrollments: MockEnrollmentRepo::empty(),
        grades: MockGradeRepo::empty(),
    };

    let result = usecase.execute(&course.id, "t-2").await;

    assert!(matches!(result, Err(AulaServiceError::CourseNotFound)));
    assert_eq!(handle.lock().unwrap().len(), 1);
}

// ── ListCourseStudents ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_enrolled_students_for_owner() {
    let student = test_user(Role::Student, "ana@example.com");
    let course = test_course("t-1", "MAT-101");
    let usecase = ListCourseStudentsUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments: MockEnrollmentRepo::new(vec![test_enrollment(&student.id, &course.id)]),
        users: MockUserRepo::new(vec![student.clone()]),
    };

    let students = usecase.execute(&course.id, "t-1").await.unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id, student.id);
}

#[tokio::test]
async fn students_list_is_hidden_from_non_owner() {
    let course = test_course("t-1", "MAT-101");
    let usecase = ListCourseStudentsUseCase {
        courses: MockCourseRepo::new(vec![course.clone()]),
        enrollments: MockEnrollmentRepo::empty(),
        users: MockUserRepo::empty(),
    };
    let result = usecase.execute(&course.id, "t-2").await;
    assert!(matches!(result, Err(AulaServiceError::CourseNotFound)));
}
