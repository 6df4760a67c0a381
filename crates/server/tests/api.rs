//! End-to-end tests driving the router over in-memory requests.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use migration::MigratorTrait;
use server::{AuthConfig, ServerState, router};

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build();
    let state = ServerState::new(
        engine,
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
        },
    );
    router(state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register an account and return its bearer token.
async fn register(app: &Router, name: &str, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": "s3cret" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

async fn create_card(app: &Router, token: &str, name: &str, bank: &str) -> String {
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/cards",
            Some(token),
            Some(json!({ "name": name, "bank": bank })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn first_account_is_admin_and_later_ones_are_not() {
    let app = test_router().await;

    let admin_token = register(&app, "Marcos", "marcos@example.com").await;
    let member_token = register(&app, "Alice", "alice@example.com").await;

    let me = body_json(
        app.clone()
            .oneshot(request("GET", "/auth/me", Some(&admin_token), None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(me["name"], "Marcos");
    assert_eq!(me["role"], "ADMIN");

    let me = body_json(
        app.clone()
            .oneshot(request("GET", "/auth/me", Some(&member_token), None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(me["role"], "USER");
}

#[tokio::test]
async fn register_rejects_duplicate_emails() {
    let app = test_router().await;
    register(&app, "Marcos", "marcos@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/auth/register",
            None,
            Some(json!({
                "name": "Other",
                "email": "marcos@example.com",
                "password": "s3cret"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_checks_the_password() {
    let app = test_router().await;
    register(&app, "Marcos", "marcos@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "marcos@example.com", "password": "s3cret" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["token"].as_str().is_some());

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "marcos@example.com", "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "s3cret" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/cards", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(request("GET", "/cards", Some("not-a-token"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutation_routes_are_admin_only() {
    let app = test_router().await;
    register(&app, "Marcos", "marcos@example.com").await;
    let member_token = register(&app, "Alice", "alice@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/cards",
            Some(&member_token),
            Some(json!({ "name": "Gold", "bank": "Acme" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request("GET", "/users", Some(&member_token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn purchases_expand_into_installments_over_http() {
    let app = test_router().await;
    let token = register(&app, "Marcos", "marcos@example.com").await;
    let card_id = create_card(&app, &token, "Nubank", "Nu").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/expenses",
            Some(&token),
            Some(json!({
                "date": "2024-01-15T12:00:00Z",
                "description": "TV",
                "amount": 300.0,
                "total_installments": 3,
                "card_id": card_id,
                "responsible": "Marcos"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created["purchase_id"].as_str().is_some());

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/expenses?year=2024&month=2",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["description"], "TV (2/3)");
    assert_eq!(listed[0]["amount"], 100.0);
    assert_eq!(listed[0]["installment"], 2);
    assert_eq!(listed[0]["card"]["name"], "Nubank");
}

#[tokio::test]
async fn expense_listing_requires_year_and_month() {
    let app = test_router().await;
    let token = register(&app, "Marcos", "marcos@example.com").await;

    let response = app
        .clone()
        .oneshot(request("GET", "/expenses?year=2024", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "year and month are required");
}

#[tokio::test]
async fn deleting_an_installment_removes_the_whole_purchase() {
    let app = test_router().await;
    let token = register(&app, "Marcos", "marcos@example.com").await;
    let card_id = create_card(&app, &token, "Nubank", "Nu").await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/expenses",
            Some(&token),
            Some(json!({
                "date": "2024-01-15T12:00:00Z",
                "description": "Couch",
                "amount": 600.0,
                "total_installments": 2,
                "card_id": card_id,
                "responsible": "Marcos"
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let listed = body_json(
        app.clone()
            .oneshot(request(
                "GET",
                "/expenses?year=2024&month=1",
                Some(&token),
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    let expense_id = listed[0]["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/expenses/{expense_id}"),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for month in [1, 2] {
        let listed = body_json(
            app.clone()
                .oneshot(request(
                    "GET",
                    &format!("/expenses?year=2024&month={month}"),
                    Some(&token),
                    None,
                ))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(listed.as_array().unwrap().len(), 0);
    }
}

#[tokio::test]
async fn deleting_a_missing_expense_is_a_404() {
    let app = test_router().await;
    let token = register(&app, "Marcos", "marcos@example.com").await;

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            "/expenses/00000000-0000-0000-0000-000000000000",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_aggregates_the_requested_month() {
    let app = test_router().await;
    let token = register(&app, "Marcos", "marcos@example.com").await;
    let card_id = create_card(&app, &token, "Nubank", "Nu").await;

    for (description, amount, responsible) in
        [("Groceries", 120.0, "Marcos"), ("Dinner", 80.0, "Alice")]
    {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/expenses",
                Some(&token),
                Some(json!({
                    "date": "2024-03-10T12:00:00Z",
                    "description": description,
                    "amount": amount,
                    "card_id": card_id,
                    "responsible": responsible
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/expenses/summary?year=2024&month=3",
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["total"], 200.0);
    assert_eq!(summary["count"], 2);
    assert_eq!(summary["by_responsible"][0]["responsible"], "Marcos");
    assert_eq!(summary["by_responsible"][0]["total"], 120.0);
    assert_eq!(summary["by_card"][0]["card_name"], "Nubank");
    assert_eq!(summary["by_card"][0]["total"], 200.0);
}

#[tokio::test]
async fn members_only_see_their_own_expenses() {
    let app = test_router().await;
    let admin_token = register(&app, "Marcos", "marcos@example.com").await;
    let alice_token = register(&app, "Alice", "alice@example.com").await;
    let card_id = create_card(&app, &admin_token, "Nubank", "Nu").await;

    for responsible in ["Marcos", "Alice"] {
        let response = app
            .clone()
            .oneshot(request(
                "POST",
                "/expenses",
                Some(&admin_token),
                Some(json!({
                    "date": "2024-03-10T12:00:00Z",
                    "description": "Lunch",
                    "amount": 50.0,
                    "card_id": card_id,
                    "responsible": responsible
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // The responsible filter is ignored for non-admins.
    let listed = body_json(
        app.clone()
            .oneshot(request(
                "GET",
                "/expenses?year=2024&month=3&responsible=Marcos",
                Some(&alice_token),
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["responsible"], "Alice");

    let responsibles = body_json(
        app.clone()
            .oneshot(request(
                "GET",
                "/expenses/responsibles",
                Some(&alice_token),
                None,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(responsibles, json!(["Alice"]));
}
