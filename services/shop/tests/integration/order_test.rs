use bookstore_domain::id::{AccountId, BookId};
use bookstore_shop::error::ShopError;
use bookstore_shop::usecase::order::{
    ListOrdersUseCase, OrderLineInput, PlaceOrderInput, PlaceOrderUseCase,
};

use crate::helpers::{MockBookRepo, MockOrderRepo, dec, test_book};

fn line(book: i32, quantity: i32, price: Option<&str>) -> OrderLineInput {
    OrderLineInput {
        book_id: BookId(book),
        quantity,
        price: price.map(dec),
    }
}

fn catalog() -> MockBookRepo {
    MockBookRepo::new(vec![test_book(1, "9.99"), test_book(2, "5.00")])
}

#[tokio::test]
async fn should_place_order_with_catalog_prices_and_total() {
    let orders = MockOrderRepo::empty();
    let stored = orders.orders_handle();
    let usecase = PlaceOrderUseCase {
        orders,
        books: catalog(),
    };

    let placed = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 2, Some("9.99")), line(2, 1, Some("5.00"))],
                total_amount: Some(dec("24.98")),
            },
        )
        .await
        .unwrap();

    assert_eq!(placed.total_amount, dec("24.98"));
    let stored = stored.lock().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].account_id, AccountId(4));
    assert_eq!(stored[0].items.len(), 2);
    assert_eq!(stored[0].items[0].price, dec("9.99"));
    assert_eq!(stored[0].items[1].quantity, 1);
}

#[tokio::test]
async fn should_price_lines_when_client_omits_prices() {
    let usecase = PlaceOrderUseCase {
        orders: MockOrderRepo::empty(),
        books: catalog(),
    };
    let placed = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(2, 3, None)],
                total_amount: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(placed.total_amount, dec("15.00"));
}

#[tokio::test]
async fn should_reject_order_whose_total_overflows_before_writing() {
    let orders = MockOrderRepo::empty();
    let stored = orders.orders_handle();
    let usecase = PlaceOrderUseCase {
        orders,
        books: catalog(),
    };

    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, i32::MAX, None)],
                total_amount: None,
            },
        )
        .await;

    assert!(matches!(result, Err(ShopError::InvalidQuantity)));
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_client_total_beyond_column_range() {
    let usecase = PlaceOrderUseCase {
        orders: MockOrderRepo::empty(),
        books: catalog(),
    };
    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 1, None)],
                total_amount: Some(dec("100000000.00")),
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::InvalidPrice)));
}

#[tokio::test]
async fn should_write_nothing_when_any_line_is_invalid() {
    // The failing line sits at every position in turn.
    for bad_at in 0..3 {
        let orders = MockOrderRepo::empty();
        let stored = orders.orders_handle();
        let usecase = PlaceOrderUseCase {
            orders,
            books: catalog(),
        };
        let mut items = vec![line(1, 1, None), line(2, 1, None), line(1, 2, None)];
        items[bad_at].quantity = 0;

        let result = usecase
            .execute(
                AccountId(4),
                PlaceOrderInput {
                    items,
                    total_amount: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ShopError::InvalidQuantity)));
        assert!(stored.lock().unwrap().is_empty());
    }
}

#[tokio::test]
async fn should_reject_empty_order() {
    let usecase = PlaceOrderUseCase {
        orders: MockOrderRepo::empty(),
        books: catalog(),
    };
    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![],
                total_amount: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::MissingData)));
}

#[tokio::test]
async fn should_reject_negative_or_over_precise_prices() {
    let usecase = PlaceOrderUseCase {
        orders: MockOrderRepo::empty(),
        books: catalog(),
    };
    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 1, Some("-9.99"))],
                total_amount: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::InvalidPrice)));

    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 1, None)],
                total_amount: Some(dec("9.991")),
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::InvalidPrice)));
}

#[tokio::test]
async fn should_reject_client_price_that_differs_from_catalog() {
    let orders = MockOrderRepo::empty();
    let stored = orders.orders_handle();
    let usecase = PlaceOrderUseCase {
        orders,
        books: catalog(),
    };
    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 1, Some("0.01"))],
                total_amount: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::PriceMismatch)));
    assert!(stored.lock().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_total_that_differs_from_lines() {
    let usecase = PlaceOrderUseCase {
        orders: MockOrderRepo::empty(),
        books: catalog(),
    };
    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 2, Some("9.99"))],
                total_amount: Some(dec("9.99")),
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::TotalMismatch)));
}

#[tokio::test]
async fn should_reject_unknown_book() {
    let usecase = PlaceOrderUseCase {
        orders: MockOrderRepo::empty(),
        books: catalog(),
    };
    let result = usecase
        .execute(
            AccountId(4),
            PlaceOrderInput {
                items: vec![line(1, 1, None), line(42, 1, None)],
                total_amount: None,
            },
        )
        .await;
    assert!(matches!(result, Err(ShopError::BookNotFound)));
}

#[tokio::test]
async fn should_list_only_own_orders() {
    let orders = MockOrderRepo::empty();
    let stored = orders.orders_handle();
    let place = PlaceOrderUseCase {
        orders,
        books: catalog(),
    };
    for account in [1, 2, 1] {
        place
            .execute(
                AccountId(account),
                PlaceOrderInput {
                    items: vec![line(1, 1, None)],
                    total_amount: None,
                },
            )
            .await
            .unwrap();
    }

    let list = ListOrdersUseCase {
        orders: MockOrderRepo {
            orders: stored,
        },
    };
    let mine = list.execute(AccountId(1)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|o| o.account_id == AccountId(1)));
}
