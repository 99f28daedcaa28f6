use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::Service;
use uuid::Uuid;

use server::routes::{self, accounts};

fn cors() -> tower_http::cors::CorsLayer {
    tower_http::cors::CorsLayer::very_permissive()
}

async fn build_app() -> anyhow::Result<Router> {
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        let msg = format!("{}", e);
        if msg.contains("duplicate key value violates unique constraint") {
            eprintln!("migrations already applied, continue: {}", msg);
        } else {
            return Err(e.into());
        }
    }
    let state = accounts::ServerState {
        db,
        auth: accounts::ServerAuthConfig {
            jwt_secret: "test-secret".into(),
            admin_secret: "test-admin-secret".into(),
        },
    };
    Ok(routes::build_router(cors(), state))
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn completed_priced_job_flows_into_earnings_and_ledger() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let mut app = build_app().await?;

    let email = format!("earn_{}@example.com", Uuid::new_v4());
    let req = Request::builder()
        .method("POST")
        .uri("/provider/register")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({
            "name": "Earnings Flow Pro",
            "email": email,
            "phone": "555-0200",
            "password": "S3curePass!",
            "service_type": "plumbing",
            "experience": 3
        }))?))?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let provider_id = body_json(resp).await?["provider"]["id"].as_str().unwrap().to_string();

    // Fresh provider: everything zero
    let req = Request::builder()
        .uri(format!("/provider/earnings/{}", provider_id))
        .body(Body::empty())?;
    let body = body_json(app.call(req).await?).await?;
    assert_eq!(body["earnings"]["lifetime"], 0.0);
    assert_eq!(body["earnings"]["pending"], 0.0);
    assert!(body["monthly_breakdown"].as_array().unwrap().is_empty());

    // Book and complete a priced job
    let req = Request::builder()
        .method("POST")
        .uri("/bookings")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({
            "provider_id": provider_id,
            "customer_name": "Robert Davis",
            "service_type": "Outlet Installation",
            "amount": 85.0
        }))?))?;
    let job_id = body_json(app.call(req).await?).await?["booking"]["id"].as_str().unwrap().to_string();
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/provider/jobs/{}", job_id))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"status": "pending"}))?))?;
    assert_eq!(app.call(req).await?.status(), StatusCode::OK);
    let req = Request::builder()
        .method("PUT")
        .uri(format!("/provider/jobs/{}", job_id))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&json!({"status": "completed"}))?))?;
    assert_eq!(app.call(req).await?.status(), StatusCode::OK);

    // Summary picks it up in all trailing windows
    let req = Request::builder()
        .uri(format!("/provider/earnings/{}", provider_id))
        .body(Body::empty())?;
    let body = body_json(app.call(req).await?).await?;
    assert_eq!(body["earnings"]["lifetime"], 85.0);
    assert_eq!(body["earnings"]["monthly"], 85.0);
    assert_eq!(body["earnings"]["weekly"], 85.0);
    assert_eq!(body["monthly_breakdown"].as_array().unwrap().len(), 1);

    // Ledger has exactly the one matching entry
    let req = Request::builder()
        .uri(format!("/provider/transactions/{}?time=week", provider_id))
        .body(Body::empty())?;
    let body = body_json(app.call(req).await?).await?;
    let txs = body["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0]["customer_name"], "Robert Davis");
    assert_eq!(txs[0]["service"], "Outlet Installation");
    assert_eq!(txs[0]["amount"], 85.0);

    // Dashboard rolls it all up
    let req = Request::builder()
        .uri(format!("/provider/dashboard/{}", provider_id))
        .body(Body::empty())?;
    let resp = app.call(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await?;
    assert_eq!(body["dashboard"]["provider"]["name"], "Earnings Flow Pro");
    assert_eq!(body["dashboard"]["provider"]["completed_jobs"], 1);
    assert_eq!(body["dashboard"]["recent_transactions"].as_array().unwrap().len(), 1);

    // Unknown provider: dashboard is a 404, summary just zeros
    let req = Request::builder()
        .uri(format!("/provider/dashboard/{}", Uuid::new_v4()))
        .body(Body::empty())?;
    assert_eq!(app.call(req).await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}
