//! The end-to-end order scenario. Each step depends on values from earlier steps, so the
//! walk stops at the first failure.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Method;
use serde_json::{Value, json};

use bookstore_domain::money::{Decimal, order_total};

use crate::reporter::Reporter;
use crate::runner::{Reply, Runner};

pub async fn run(runner: &Runner, reporter: &mut Reporter, admin_email: &str, admin_password: &str) {
    let email = unique_email();
    if walk(runner, reporter, &email, admin_email, admin_password)
        .await
        .is_none()
    {
        println!("        remaining steps skipped");
    }
}

async fn walk(
    runner: &Runner,
    reporter: &mut Reporter,
    email: &str,
    admin_email: &str,
    admin_password: &str,
) -> Option<()> {
    let credentials = json!({ "email": email, "password": "pw" });

    let reply = call(
        runner,
        Method::POST,
        "/api/register",
        None,
        Some(&json!({ "name": "Smoke", "email": email, "password": "pw" })),
    )
    .await;
    record(reporter, "register new account", reply.and_then(|r| status(r, 201)))?;

    let reply = call(runner, Method::POST, "/api/login", None, Some(&credentials)).await;
    let token = record(
        reporter,
        "login returns token",
        reply.and_then(|r| status(r, 200)).and_then(|r| string_field(&r.body, "token")),
    )?;

    let reply = call(runner, Method::GET, "/api/me", Some(&token), None).await;
    record(
        reporter,
        "whoami reports user role",
        reply.and_then(|r| status(r, 200)).and_then(|r| {
            if r.body["role"] == "user" && r.body["id"].is_i64() {
                Ok(())
            } else {
                Err(format!("unexpected body {}", r.body))
            }
        }),
    )?;

    let reply = call(
        runner,
        Method::POST,
        "/api/books",
        Some(&token),
        Some(&json!({ "title": "Smoke", "author": "Harness", "quantity": 1, "price": "1.00" })),
    )
    .await;
    record(reporter, "user cannot create books", reply.and_then(|r| status(r, 403)))?;

    let reply = call(
        runner,
        Method::POST,
        "/api/admin/login",
        None,
        Some(&json!({ "email": admin_email, "password": admin_password })),
    )
    .await;
    let admin = record(
        reporter,
        "admin login returns token",
        reply.and_then(|r| status(r, 200)).and_then(|r| string_field(&r.body, "token")),
    )?;

    let mut book_ids = Vec::new();
    for (title, price) in [("Smoke One", "9.99"), ("Smoke Two", "5.00")] {
        let reply = call(
            runner,
            Method::POST,
            "/api/books",
            Some(&admin),
            Some(&json!({ "title": title, "author": "Harness", "quantity": 5, "price": price })),
        )
        .await;
        let id = record(
            reporter,
            &format!("admin creates book {title:?}"),
            reply.and_then(|r| status(r, 201)).and_then(|r| {
                r.body["id"]
                    .as_i64()
                    .ok_or_else(|| format!("no id in {}", r.body))
            }),
        )?;
        book_ids.push(id);
    }

    let reply = call(
        runner,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(&json!({
            "items": [
                { "bookId": book_ids[0], "quantity": 2, "price": "9.99" },
                { "bookId": book_ids[1], "quantity": 1, "price": "5.00" }
            ],
            "totalAmount": "24.98"
        })),
    )
    .await;
    record(reporter, "place two-line order", reply.and_then(|r| status(r, 201)))?;

    let reply = call(runner, Method::GET, "/api/orders", Some(&token), None).await;
    record(
        reporter,
        "list shows one order with matching total",
        reply.and_then(|r| status(r, 200)).and_then(|r| check_single_order(&r.body)),
    )?;

    Some(())
}

fn record<T>(reporter: &mut Reporter, step: &str, outcome: Result<T, String>) -> Option<T> {
    match outcome {
        Ok(value) => {
            reporter.record(step, &Ok(()));
            Some(value)
        }
        Err(reason) => {
            reporter.record(step, &Err(reason));
            None
        }
    }
}

async fn call(
    runner: &Runner,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<&Value>,
) -> Result<Reply, String> {
    runner
        .send(method, path, token, body)
        .await
        .map_err(|e| format!("{e:#}"))
}

fn status(reply: Reply, expected: u16) -> Result<Reply, String> {
    if reply.status == expected {
        Ok(reply)
    } else {
        Err(format!(
            "expected {expected}, got {} {}",
            reply.status, reply.body
        ))
    }
}

fn string_field(body: &Value, key: &str) -> Result<String, String> {
    body[key]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| format!("no {key} in {body}"))
}

fn decimal(value: &Value) -> Result<Decimal, String> {
    serde_json::from_value(value.clone()).map_err(|e| format!("bad amount {value}: {e}"))
}

/// Exactly one order whose `totalAmount` equals the sum of its lines.
fn check_single_order(body: &Value) -> Result<(), String> {
    let orders = body.as_array().ok_or("orders is not an array")?;
    let [order] = orders.as_slice() else {
        return Err(format!("expected 1 order, got {}", orders.len()));
    };
    let items = order["items"].as_array().ok_or("order has no items")?;
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let quantity = item["quantity"]
            .as_i64()
            .and_then(|q| i32::try_from(q).ok())
            .ok_or_else(|| format!("bad quantity in {item}"))?;
        lines.push((decimal(&item["price"])?, quantity));
    }
    let total = decimal(&order["totalAmount"])?;
    let expected = order_total(lines).ok_or("sum of lines is out of range")?;
    if total == expected {
        Ok(())
    } else {
        Err(format!("totalAmount {total} != sum of lines {expected}"))
    }
}

fn unique_email() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("smoke-{nanos}@example.com")
}
