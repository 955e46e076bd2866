use chrono::{Duration, Utc};

use aula::auth::token::validate_token;
use aula::error::AulaServiceError;
use aula::usecase::auth::{
    ForgotPasswordUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    ResetPasswordInput, ResetPasswordUseCase,
};

use crate::helpers::MockUserRepo;

const TEST_JWT_SECRET: &str = "test-jwt-secret";

fn register_input(email: &str, role: &str) -> RegisterInput {
    RegisterInput {
        full_name: "Ana Gómez".to_owned(),
        email: email.to_owned(),
        password: "secreto123".to_owned(),
        role: role.to_owned(),
    }
}

// ── Register / Login ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_then_login_with_same_credentials() {
    let repo = MockUserRepo::empty();

    let register = RegisterUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let registered = register
        .execute(register_input("ana@example.com", "student"))
        .await
        .unwrap();

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let logged_in = login
        .execute(LoginInput {
            email: "ana@example.com".to_owned(),
            password: "secreto123".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(logged_in.user.id, registered.user.id);

    // The token subject resolves back to the same user.
    let subject = validate_token(&logged_in.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(subject, registered.user.id);
}

#[tokio::test]
async fn should_reject_duplicate_email_with_conflict() {
    let repo = MockUserRepo::empty();
    let handle = repo.handle();
    let register = RegisterUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    register
        .execute(register_input("ana@example.com", "student"))
        .await
        .unwrap();
    let result = register
        .execute(register_input("ana@example.com", "teacher"))
        .await;

    assert!(matches!(result, Err(AulaServiceError::EmailTaken)));
    assert_eq!(handle.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_invalid_role() {
    let register = RegisterUseCase {
        repo: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = register
        .execute(register_input("ana@example.com", "admin"))
        .await;
    assert!(matches!(result, Err(AulaServiceError::InvalidRole)));
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let repo = MockUserRepo::empty();
    let register = RegisterUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    register
        .execute(register_input("ana@example.com", "student"))
        .await
        .unwrap();

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = login
        .execute(LoginInput {
            email: "ana@example.com".to_owned(),
            password: "otra-clave".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AulaServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_unknown_email_with_same_error_as_wrong_password() {
    let login = LoginUseCase {
        repo: MockUserRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    let result = login
        .execute(LoginInput {
            email: "nadie@example.com".to_owned(),
            password: "secreto123".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AulaServiceError::InvalidCredentials)));
}

// ── Forgot / Reset password ──────────────────────────────────────────────────

#[tokio::test]
async fn should_not_reveal_account_existence_on_forgot_password() {
    let usecase = ForgotPasswordUseCase {
        repo: MockUserRepo::empty(),
    };
    // Unknown email succeeds without a token.
    let token = usecase.execute("nadie@example.com").await.unwrap();
    assert!(token.is_none());
}

#[tokio::test]
async fn should_reset_password_with_valid_token() {
    let repo = MockUserRepo::empty();
    let handle = repo.handle();

    let register = RegisterUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    register
        .execute(register_input("ana@example.com", "student"))
        .await
        .unwrap();

    let forgot = ForgotPasswordUseCase { repo: repo.clone() };
    let token = forgot.execute("ana@example.com").await.unwrap().unwrap();

    let reset = ResetPasswordUseCase { repo: repo.clone() };
    reset
        .execute(ResetPasswordInput {
            token,
            new_password: "clave-nueva".to_owned(),
        })
        .await
        .unwrap();

    // Token is single-use: cleared after the reset.
    assert!(handle.lock().unwrap()[0].reset_token.is_none());

    let login = LoginUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    assert!(
        login
            .execute(LoginInput {
                email: "ana@example.com".to_owned(),
                password: "clave-nueva".to_owned(),
            })
            .await
            .is_ok()
    );
    let old = login
        .execute(LoginInput {
            email: "ana@example.com".to_owned(),
            password: "secreto123".to_owned(),
        })
        .await;
    assert!(matches!(old, Err(AulaServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn should_reject_unknown_reset_token() {
    let reset = ResetPasswordUseCase {
        repo: MockUserRepo::empty(),
    };
    let result = reset
        .execute(ResetPasswordInput {
            token: "token-desconocido".to_owned(),
            new_password: "clave".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AulaServiceError::InvalidResetToken)));
}

#[tokio::test]
async fn should_reject_expired_reset_token() {
    let repo = MockUserRepo::empty();
    let handle = repo.handle();

    let register = RegisterUseCase {
        repo: repo.clone(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };
    register
        .execute(register_input("ana@example.com", "student"))
        .await
        .unwrap();

    {
        let mut users = handle.lock().unwrap();
        users[0].reset_token = Some("token-viejo".to_owned());
        users[0].reset_token_expiry = Some(Utc::now() - Duration::minutes(5));
    }

    let reset = ResetPasswordUseCase { repo };
    let result = reset
        .execute(ResetPasswordInput {
            token: "token-viejo".to_owned(),
            new_password: "clave".to_owned(),
        })
        .await;
    assert!(matches!(result, Err(AulaServiceError::ResetTokenExpired)));
}
