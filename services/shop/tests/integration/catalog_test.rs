use bookstore_domain::id::BookId;
use bookstore_shop::error::ShopError;
use bookstore_shop::usecase::catalog::{
    CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, UpdateBookUseCase,
};

use crate::helpers::{MockBookRepo, book_draft, dec, test_book};

#[tokio::test]
async fn should_create_valid_book() {
    let usecase = CreateBookUseCase {
        repo: MockBookRepo::empty(),
    };
    let book = usecase.execute(book_draft("Dune", "9.99")).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert_eq!(book.price, dec("9.99"));
}

#[tokio::test]
async fn should_reject_invalid_book_before_write() {
    let repo = MockBookRepo::empty();
    let books = repo.books.clone();
    let usecase = CreateBookUseCase { repo };

    let mut draft = book_draft("Dune", "9.99");
    draft.price = dec("-1");
    assert!(matches!(
        usecase.execute(draft).await,
        Err(ShopError::InvalidPrice)
    ));
    assert!(books.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_not_found_for_unknown_book() {
    let usecase = GetBookUseCase {
        repo: MockBookRepo::new(vec![test_book(1, "5.00")]),
    };
    assert!(matches!(
        usecase.execute(BookId(2)).await,
        Err(ShopError::BookNotFound)
    ));
}

#[tokio::test]
async fn should_update_every_field() {
    let usecase = UpdateBookUseCase {
        repo: MockBookRepo::new(vec![test_book(1, "5.00")]),
    };
    let book = usecase
        .execute(BookId(1), book_draft("Renamed", "6.50"))
        .await
        .unwrap();
    assert_eq!(book.title, "Renamed");
    assert_eq!(book.price, dec("6.50"));

    assert!(matches!(
        usecase.execute(BookId(9), book_draft("Nope", "1.00")).await,
        Err(ShopError::BookNotFound)
    ));
}

#[tokio::test]
async fn should_refuse_to_delete_referenced_book() {
    let mut repo = MockBookRepo::new(vec![test_book(1, "5.00")]);
    repo.in_use = vec![BookId(1)];
    let usecase = DeleteBookUseCase { repo };
    assert!(matches!(
        usecase.execute(BookId(1)).await,
        Err(ShopError::BookInUse)
    ));
}

#[tokio::test]
async fn should_delete_unreferenced_book_once() {
    let usecase = DeleteBookUseCase {
        repo: MockBookRepo::new(vec![test_book(1, "5.00")]),
    };
    assert!(usecase.execute(BookId(1)).await.is_ok());
    assert!(matches!(
        usecase.execute(BookId(1)).await,
        Err(ShopError::BookNotFound)
    ));
}
