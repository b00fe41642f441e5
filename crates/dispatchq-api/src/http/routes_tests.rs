
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        create_router(Arc::new(AppState::default()))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(body).unwrap()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_delivery_endpoint() {
        let app = create_test_router();
        let body = json!({
            "id": "D002",
            "destination": "456 Oak Ave",
            "type": "URGENT",
            "estimatedTime": 30,
            "timestamp": "2024-05-01T10:00:00Z"
        });

        let (status, json) = send(&app, post_json("/deliveries", &body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Delivery D002 added successfully");
        assert_eq!(json["delivery"]["type"], "urgent");
        assert_eq!(json["delivery"]["priorityScore"], 270);
        assert_eq!(json["delivery"]["timestamp"], "2024-05-01T10:00:00Z");
    }

    #[tokio::test]
    async fn test_add_delivery_numeric_id() {
        let app = create_test_router();
        let body = json!({ "id": 1001, "destination": "d", "type": "standard", "estimatedTime": 60 });

        let (status, json) = send(&app, post_json("/deliveries", &body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["delivery"]["id"], "1001");

        let cancel = Request::builder()
            .method("DELETE")
            .uri("/deliveries/1001")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, cancel).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_add_delivery_missing_field() {
        let app = create_test_router();
        let body = json!({ "id": "D001", "type": "standard", "estimatedTime": 60 });

        let (status, json) = send(&app, post_json("/deliveries", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Missing required field: destination");

        let (_, stats) = send(&app, get_request("/deliveries/stats")).await;
        assert_eq!(stats["pending"]["total"], 0);
    }

    #[tokio::test]
    async fn test_add_delivery_invalid_type() {
        let app = create_test_router();
        let body = json!({
            "id": "D001",
            "destination": "x",
            "type": "overnight",
            "estimatedTime": 60
        });

        let (status, json) = send(&app, post_json("/deliveries", &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid delivery type: overnight");
    }

    #[tokio::test]
    async fn test_add_delivery_malformed_json() {
        let app = create_test_router();
        let request = Request::builder()
            .method("POST")
            .uri("/deliveries")
            .header("content-type", "application/json")
            .body(Body::from("{\"id\": "))
            .unwrap();

        let (status, json) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_process_empty_queue() {
        let app = create_test_router();
        let (status, json) = send(&app, post_empty("/deliveries/process")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "No deliveries to process");
    }

    #[tokio::test]
    async fn test_category_precedence_over_http() {
        let app = create_test_router();
        let a = json!({ "id": "A", "destination": "a", "type": "STANDARD", "estimatedTime": 10 });
        let b = json!({ "id": "B", "destination": "b", "type": "FRAGILE", "estimatedTime": 150 });
        send(&app, post_json("/deliveries", &a)).await;
        send(&app, post_json("/deliveries", &b)).await;

        let (status, json) = send(&app, post_empty("/deliveries/process")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["delivery"]["id"], "B");
        assert_eq!(json["source_queue"], "fragile");
        assert_eq!(json["message"], "Processing delivery B");

        let (_, listing) = send(&app, get_request("/deliveries")).await;
        assert_eq!(listing["deliveries"]["standard"][0]["id"], "A");
        assert_eq!(listing["processed"][0]["id"], "B");
        assert!(listing["deliveries"]["urgent"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_router();
        for (id, kind) in [("u1", "urgent"), ("u2", "urgent"), ("u3", "urgent"), ("f1", "fragile")] {
            let body = json!({ "id": id, "destination": "d", "type": kind, "estimatedTime": 20 });
            send(&app, post_json("/deliveries", &body)).await;
        }
        send(&app, post_empty("/deliveries/process")).await;

        let (status, json) = send(&app, get_request("/deliveries/stats")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!({
                "pending": { "urgent": 2, "fragile": 1, "standard": 0, "total": 3 },
                "processed": 1,
                "total": 4
            })
        );
    }

    #[tokio::test]
    async fn test_cancel_endpoints() {
        let app = create_test_router();
        let body = json!({ "id": "C1", "destination": "d", "type": "standard", "estimatedTime": 45 });
        send(&app, post_json("/deliveries", &body)).await;

        let cancel = Request::builder()
            .method("DELETE")
            .uri("/deliveries/C1")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, cancel).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["delivery"]["id"], "C1");

        let (_, cancelled) = send(&app, get_request("/deliveries/cancelled")).await;
        assert_eq!(cancelled["count"], 1);
        assert_eq!(cancelled["deliveries"][0]["id"], "C1");

        let again = Request::builder()
            .method("DELETE")
            .uri("/deliveries/C1")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(&app, again).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Delivery not found: C1");
    }

    #[tokio::test]
    async fn test_cancel_ids_matching_fixed_routes() {
        for id in ["process", "stats", "cancelled", "report"] {
            let app = create_test_router();
            let body = json!({ "id": id, "destination": "d", "type": "urgent", "estimatedTime": 5 });
            send(&app, post_json("/deliveries", &body)).await;

            let cancel = Request::builder()
                .method("DELETE")
                .uri(format!("/deliveries/{id}"))
                .body(Body::empty())
                .unwrap();
            let (status, json) = send(&app, cancel).await;
            assert_eq!(status, StatusCode::OK, "cancel {id}");
            assert_eq!(json["delivery"]["id"], id);

            let (_, stats) = send(&app, get_request("/deliveries/stats")).await;
            assert_eq!(stats["pending"]["total"], 0, "pending after cancel {id}");

            let (_, cancelled) = send(&app, get_request("/deliveries/cancelled")).await;
            assert_eq!(cancelled["deliveries"][0]["id"], id);
        }
    }

    #[tokio::test]
    async fn test_cancel_fixed_route_id_not_pending() {
        let app = create_test_router();
        let cancel = Request::builder()
            .method("DELETE")
            .uri("/deliveries/stats")
            .body(Body::empty())
            .unwrap();

        let (status, json) = send(&app, cancel).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Delivery not found: stats");
    }

    #[tokio::test]
    async fn test_report_endpoint() {
        let app = create_test_router();
        for (id, kind, time) in [("u", "urgent", 150), ("f", "fragile", 0)] {
            let body = json!({ "id": id, "destination": "d", "type": kind, "estimatedTime": time });
            send(&app, post_json("/deliveries", &body)).await;
            send(&app, post_empty("/deliveries/process")).await;
        }

        let (status, json) = send(&app, get_request("/deliveries/report")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
        assert_eq!(json["deliveries"][0]["id"], "f");

        let (_, json) = send(&app, get_request("/deliveries/report?type=urgent&sort=estimated_time")).await;
        assert_eq!(json["count"], 1);
        assert_eq!(json["filter"], "urgent");

        let (status, _) = send(&app, get_request("/deliveries/report?type=express")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_router();

        let (status, json) = send(&app, get_request("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");

        let (status, json) = send(&app, get_request("/livez")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "alive");
    }

    #[tokio::test]
    async fn test_cors_headers_present() {
        let app = create_test_router();
        let request = Request::builder()
            .uri("/deliveries")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }

    async fn boom() -> StatusCode {
        panic!("store exploded")
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let app = with_middleware(Router::new().route("/boom", get(boom)));

        let (status, json) = send(&app, get_request("/boom")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Internal error: store exploded");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = create_test_router();
        let (status, _) = send(&app, get_request("/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
