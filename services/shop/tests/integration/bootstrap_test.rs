use bookstore_domain::role::Role;
use bookstore_shop::config::AdminSeed;
use bookstore_shop::usecase::bootstrap::{EnsureAdminOutcome, EnsureAdminUseCase};

use crate::helpers::{FakeCredentials, MockAccountRepo, test_account};

fn seed() -> AdminSeed {
    AdminSeed {
        name: "Admin".into(),
        email: "admin@x.com".into(),
        password: "s3cret".into(),
    }
}

#[tokio::test]
async fn should_create_missing_admin() {
    let repo = MockAccountRepo::empty();
    let accounts = repo.accounts_handle();
    let usecase = EnsureAdminUseCase {
        repo,
        credentials: FakeCredentials,
    };

    let outcome = usecase.execute(&seed()).await.unwrap();

    assert!(matches!(outcome, EnsureAdminOutcome::Created(_)));
    let accounts = accounts.lock().unwrap();
    assert_eq!(accounts[0].role, Role::Admin);
    assert_eq!(accounts[0].password_hash, "fake$s3cret");
}

#[tokio::test]
async fn should_leave_existing_accounts_untouched() {
    let admin = test_account(1, "admin@x.com", "old", Role::Admin);
    let usecase = EnsureAdminUseCase {
        repo: MockAccountRepo::new(vec![admin]),
        credentials: FakeCredentials,
    };
    let outcome = usecase.execute(&seed()).await.unwrap();
    assert!(matches!(outcome, EnsureAdminOutcome::AlreadyAdmin(_)));

    let user = test_account(2, "admin@x.com", "old", Role::User);
    let repo = MockAccountRepo::new(vec![user]);
    let accounts = repo.accounts_handle();
    let usecase = EnsureAdminUseCase {
        repo,
        credentials: FakeCredentials,
    };
    let outcome = usecase.execute(&seed()).await.unwrap();
    assert!(matches!(outcome, EnsureAdminOutcome::NotAdmin(_)));
    assert_eq!(accounts.lock().unwrap()[0].role, Role::User);
}
