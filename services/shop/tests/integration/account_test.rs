use std::sync::atomic::Ordering;

use bookstore_domain::id::AccountId;
use bookstore_domain::role::Role;
use bookstore_shop::error::ShopError;
use bookstore_shop::usecase::account::{
    AdminLoginUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
};
use bookstore_testing::auth::test_token_service;

use crate::helpers::{CountingCredentials, FakeCredentials, MockAccountRepo, test_account};

fn register_input(email: &str) -> RegisterInput {
    RegisterInput {
        name: "Alice".into(),
        email: email.into(),
        password: "pw".into(),
    }
}

fn login_input(email: &str, password: &str) -> LoginInput {
    LoginInput {
        email: email.into(),
        password: password.into(),
    }
}

// ── Register ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_as_user_with_hashed_password() {
    let repo = MockAccountRepo::empty();
    let accounts = repo.accounts_handle();
    let usecase = RegisterUseCase {
        repo,
        credentials: FakeCredentials,
    };

    let id = usecase.execute(register_input("a@x.com")).await.unwrap();

    let accounts = accounts.lock().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, id);
    assert_eq!(accounts[0].role, Role::User);
    assert_ne!(accounts[0].password_hash, "pw");
}

#[tokio::test]
async fn should_reject_second_registration_with_same_email() {
    let repo = MockAccountRepo::empty();
    let accounts = repo.accounts_handle();
    let usecase = RegisterUseCase {
        repo,
        credentials: FakeCredentials,
    };

    usecase.execute(register_input("a@x.com")).await.unwrap();
    let second = usecase.execute(register_input("a@x.com")).await;

    assert!(matches!(second, Err(ShopError::EmailAlreadyRegistered)));
    assert_eq!(accounts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn should_treat_email_case_sensitively() {
    let usecase = RegisterUseCase {
        repo: MockAccountRepo::empty(),
        credentials: FakeCredentials,
    };
    usecase.execute(register_input("a@x.com")).await.unwrap();
    assert!(usecase.execute(register_input("A@x.com")).await.is_ok());
}

#[tokio::test]
async fn should_reject_registration_with_missing_fields() {
    let usecase = RegisterUseCase {
        repo: MockAccountRepo::empty(),
        credentials: FakeCredentials,
    };
    let result = usecase
        .execute(RegisterInput {
            name: "  ".into(),
            email: "a@x.com".into(),
            password: "pw".into(),
        })
        .await;
    assert!(matches!(result, Err(ShopError::MissingData)));

    let result = usecase
        .execute(RegisterInput {
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: String::new(),
        })
        .await;
    assert!(matches!(result, Err(ShopError::MissingData)));
}

// ── Login ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_carrying_stored_identity_and_role() {
    let tokens = test_token_service();
    let usecase = LoginUseCase {
        repo: MockAccountRepo::new(vec![test_account(7, "a@x.com", "pw", Role::User)]),
        credentials: FakeCredentials,
        tokens: tokens.clone(),
    };

    let output = usecase.execute(login_input("a@x.com", "pw")).await.unwrap();

    let info = tokens.verify(&output.token.token).unwrap();
    assert_eq!(info.account_id, AccountId(7));
    assert_eq!(info.role, Role::User);
}

#[tokio::test]
async fn should_report_wrong_password_like_unknown_email() {
    let usecase = LoginUseCase {
        repo: MockAccountRepo::new(vec![test_account(7, "a@x.com", "pw", Role::User)]),
        credentials: FakeCredentials,
        tokens: test_token_service(),
    };

    let wrong_password = usecase
        .execute(login_input("a@x.com", "nope"))
        .await
        .err()
        .unwrap();
    let unknown_email = usecase
        .execute(login_input("b@x.com", "pw"))
        .await
        .err()
        .unwrap();

    assert!(matches!(wrong_password, ShopError::InvalidCredentials));
    assert_eq!(wrong_password.kind(), unknown_email.kind());
    assert_eq!(wrong_password.status(), unknown_email.status());
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn should_verify_once_whether_or_not_email_is_known() {
    let credentials = CountingCredentials::default();
    let verifications = credentials.verifications.clone();
    let usecase = LoginUseCase {
        repo: MockAccountRepo::new(vec![test_account(7, "a@x.com", "pw", Role::User)]),
        credentials,
        tokens: test_token_service(),
    };

    assert!(usecase.execute(login_input("a@x.com", "nope")).await.is_err());
    assert_eq!(verifications.load(Ordering::SeqCst), 1);

    assert!(usecase.execute(login_input("b@x.com", "pw")).await.is_err());
    assert_eq!(verifications.load(Ordering::SeqCst), 2);
}

// ── AdminLogin ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_forbid_admin_login_for_regular_account() {
    let usecase = AdminLoginUseCase {
        repo: MockAccountRepo::new(vec![test_account(3, "u@x.com", "pw", Role::User)]),
        credentials: FakeCredentials,
        tokens: test_token_service(),
    };
    let result = usecase.execute(login_input("u@x.com", "pw")).await;
    assert!(matches!(result, Err(ShopError::Forbidden)));
}

#[tokio::test]
async fn should_reject_admin_login_with_wrong_password_before_role_check() {
    let usecase = AdminLoginUseCase {
        repo: MockAccountRepo::new(vec![test_account(3, "u@x.com", "pw", Role::User)]),
        credentials: FakeCredentials,
        tokens: test_token_service(),
    };
    let result = usecase.execute(login_input("u@x.com", "nope")).await;
    assert!(matches!(result, Err(ShopError::InvalidAdminCredentials)));
}

#[tokio::test]
async fn should_issue_admin_token_for_admin_account() {
    let tokens = test_token_service();
    let usecase = AdminLoginUseCase {
        repo: MockAccountRepo::new(vec![test_account(1, "root@x.com", "s3cret", Role::Admin)]),
        credentials: FakeCredentials,
        tokens: tokens.clone(),
    };

    let output = usecase
        .execute(login_input("root@x.com", "s3cret"))
        .await
        .unwrap();

    assert_eq!(output.account.role, Role::Admin);
    assert_eq!(tokens.verify(&output.token.token).unwrap().role, Role::Admin);
}
