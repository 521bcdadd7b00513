//! API integration tests against a running server seeded with sql/schema.sql

use reqwest::Client;
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080/api";

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_reaches_store() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_list_books_ordered_by_title() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let titles: Vec<&str> = body
        .as_array()
        .expect("Expected an array")
        .iter()
        .filter_map(|book| book["title"].as_str())
        .collect();
    let mut sorted = titles.clone();
    sorted.sort();
    assert_eq!(titles, sorted);
}

#[tokio::test]
#[ignore]
async fn test_book_full_info() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/1/full", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["book"]["bookId"], 1);
    assert!(body["borrows"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_unknown_book_not_found() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_reader_full_info() {
    let client = Client::new();

    let response = client
        .get(format!("{}/readers/1/full", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["statistics"]["totalBorrows"].is_number());
    assert!(body["borrows"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_refresh_info_is_idempotent() {
    let client = Client::new();
    let mut infos = Vec::new();

    for _ in 0..2 {
        let response = client
            .post(format!("{}/readers?id=1", BASE_URL))
            .send()
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        infos.push(body["info"].clone());
    }

    assert_eq!(infos[0], infos[1]);
}

#[tokio::test]
#[ignore]
async fn test_refresh_unknown_reader() {
    let client = Client::new();

    let response = client
        .post(format!("{}/readers?id=999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert_eq!(body["readerId"], 999999);
}
