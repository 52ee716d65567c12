//! Router tests for the RequireFlow API

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use requireflow_core::Workspace;
use requireflow_web::{create_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

/// Helper to create a test app over a freshly seeded data directory
async fn create_test_app() -> (Router, tempfile::TempDir) {
    let data_dir = tempfile::tempdir().unwrap();
    let ws = Workspace::open(data_dir.path()).await.unwrap();
    (create_router(AppState::new(ws)), data_dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn requirement_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "希望问答引擎支持环比计算",
        "source": {
            "type": "chat_wechat",
            "category": "online",
            "collectorId": "2",
            "collectorName": "李四",
            "collectTime": "2025-01-02T09:00:00"
        },
        "customerId": "c1",
        "customerName": "蜜雪冰城",
        "customerIndustry": "餐饮零售",
        "type": "enhancement",
        "module": "qa_engine",
        "tags": ["环比"],
        "priority": "P1",
        "customerUrgency": "urgent",
        "businessValue": 8,
        "frequency": 3
    })
}

#[tokio::test]
async fn test_health_check() {
    let (app, _dir) = create_test_app().await;

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_requirement_lifecycle() {
    let (app, _dir) = create_test_app().await;

    let (status, created) = send(&app, "POST", "/api/requirements", Some(requirement_body("GMV 环比"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["status"], "pending_review");
    assert_eq!(created["data"]["comments"], json!([]));
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/requirements/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/requirements/{}", id),
        Some(json!({ "status": "developing", "plannedVersion": "v2.3" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["status"], "developing");
    assert_eq!(updated["data"]["plannedVersion"], "v2.3");
    assert_eq!(updated["data"]["createdAt"], created["data"]["createdAt"]);

    let (status, comment) = send(
        &app,
        "POST",
        &format!("/api/requirements/{}/comments", id),
        Some(json!({ "userId": "1", "userName": "张三", "content": "已排期" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["data"]["content"], "已排期");

    let (_, fetched) = send(&app, "GET", &format!("/api/requirements/{}", id), None).await;
    assert_eq!(fetched["data"]["comments"].as_array().unwrap().len(), 1);

    let (status, deleted) = send(&app, "DELETE", &format!("/api/requirements/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["success"], true);
    assert!(deleted["message"].is_string());
    assert!(deleted.get("data").is_none());

    let (status, missing) = send(&app, "GET", &format!("/api/requirements/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], false);
    assert!(missing["message"].is_string());
}

#[tokio::test]
async fn test_list_with_filters() {
    let (app, _dir) = create_test_app().await;

    send(&app, "POST", "/api/requirements", Some(requirement_body("GMV 环比"))).await;
    let mut other = requirement_body("Mobile export");
    other["description"] = json!("导出报表");
    other["priority"] = json!("P3");
    send(&app, "POST", "/api/requirements", Some(other)).await;

    let (status, all) = send(&app, "GET", "/api/requirements?status=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["total"], 2);
    // Newest first
    assert_eq!(all["data"][0]["title"], "Mobile export");

    let (_, found) = send(&app, "GET", "/api/requirements?search=gmv&priority=P1", None).await;
    assert_eq!(found["total"], 1);
    assert_eq!(found["data"][0]["title"], "GMV 环比");

    let (_, none) = send(&app, "GET", "/api/requirements?search=gmv&priority=P3", None).await;
    assert_eq!(none["total"], 0);
    assert_eq!(none["data"], json!([]));
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let (app, _dir) = create_test_app().await;

    let mut out_of_range = requirement_body("x");
    out_of_range["businessValue"] = json!(11);
    let (status, body) = send(&app, "POST", "/api/requirements", Some(out_of_range)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut smuggled = requirement_body("x");
    smuggled["id"] = json!("chosen-by-client");
    let (status, _) = send(&app, "POST", "/api/requirements", Some(smuggled)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "POST", "/api/requirements", Some(json!({ "title": "only" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/api/requirements")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/requirements?priority=P9", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, list) = send(&app, "GET", "/api/requirements", None).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_null_on_required_field_is_bad_request() {
    let (app, _dir) = create_test_app().await;

    let (_, created) = send(&app, "POST", "/api/requirements", Some(requirement_body("导出"))).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/requirements/{}", id);

    for body in [json!({ "title": null }), json!({ "status": null })] {
        let (status, body) = send(&app, "PUT", &uri, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["data"], created["data"]);

    let (status, cleared) = send(&app, "PUT", &uri, Some(json!({ "plannedVersion": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["data"].get("plannedVersion").is_none());
}

#[tokio::test]
async fn test_missing_ids_are_not_found() {
    let (app, _dir) = create_test_app().await;

    let (status, _) = send(&app, "PUT", "/api/requirements/nope", Some(json!({ "status": "planned" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/requirements/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        "/api/requirements/nope/comments",
        Some(json!({ "userId": "1", "userName": "张三", "content": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/customers/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/users/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customers() {
    let (app, _dir) = create_test_app().await;

    let (status, list) = send(&app, "GET", "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().unwrap().len(), 2);

    let (status, created) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({
            "name": "喜茶",
            "industry": "餐饮零售",
            "size": "medium",
            "stage": "potential"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["contacts"], json!([]));

    let id = created["data"]["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/api/customers/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "喜茶");

    let (_, seeded) = send(&app, "GET", "/api/customers/c1", None).await;
    assert_eq!(seeded["data"]["name"], "蜜雪冰城");
}

#[tokio::test]
async fn test_users() {
    let (app, _dir) = create_test_app().await;

    let (_, list) = send(&app, "GET", "/api/users", None).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 3);

    let (status, user) = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["data"]["name"], "张三");
    assert_eq!(user["data"]["role"], "product_manager");
}

#[tokio::test]
async fn test_dangling_references() {
    let (app, _dir) = create_test_app().await;

    let mut body = requirement_body("孤立需求");
    body["customerId"] = json!("ghost");
    body["linkedRequirements"] = json!(["gone"]);
    let (_, created) = send(&app, "POST", "/api/requirements", Some(body)).await;
    let id = created["data"]["id"].as_str().unwrap();

    let (status, customer) = send(&app, "GET", &format!("/api/requirements/{}/customer", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(customer["success"], true);
    assert!(customer["data"].is_null());

    let (status, links) = send(&app, "GET", &format!("/api/requirements/{}/links", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(links["data"]["found"], json!([]));
    assert_eq!(links["data"]["missing"], json!(["gone"]));
}

#[tokio::test]
async fn test_stats() {
    let (app, _dir) = create_test_app().await;

    send(&app, "POST", "/api/requirements", Some(requirement_body("一"))).await;
    let mut planned = requirement_body("二");
    planned["status"] = json!("planned");
    send(&app, "POST", "/api/requirements", Some(planned)).await;

    let (status, dashboard) = send(&app, "GET", "/api/stats/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        dashboard["data"],
        json!({
            "totalRequirements": 2,
            "pendingReview": 1,
            "inProgress": 1,
            "completedThisMonth": 0,
            "totalCustomers": 2
        })
    );

    let (status, breakdown) = send(&app, "GET", "/api/stats/breakdown", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(breakdown["data"]["byPriority"].as_array().unwrap().len(), 4);
    assert_eq!(
        breakdown["data"]["topCustomers"],
        json!([{ "key": "蜜雪冰城", "count": 2 }])
    );
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let (app, dir) = create_test_app().await;
    std::fs::write(dir.path().join("requirements.json"), "{ broken").unwrap();

    let (status, body) = send(&app, "GET", "/api/requirements", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, "GET", "/api/stats/dashboard", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
