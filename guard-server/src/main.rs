//! Transaction Guard Server
//!
//! HTTP surface of the guard core for validators, oracles, dependent
//! protocols and dashboards.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TRANSACTION GUARD                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  API      │  │  Auth     │  │  Heuristic Scorer       │ │
//! │  │  Gateway  │  │  (JWT)    │  │  (advisory /analyze)    │ │
//! │  │  (Axum)   │  │           │  │                         │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │            ┌─────────────────────┐                         │
//! │            │ SharedGuard (core)  │ ──▶ JSONL journal       │
//! │            └─────────────────────┘                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod middleware;
mod error;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use guard_core::{
    HeuristicScorer, InMemoryToken, JournalRecorder, RiskScorer, SharedGuard, TransactionGuard,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

/// Collateral minted to the authority when the in-memory token is created
const GENESIS_SUPPLY: u128 = 1_000_000_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env().context("invalid configuration")?;

    // Initialize logging
    init_tracing(&config.log_format);

    tracing::info!("Transaction Guard Server starting...");
    tracing::info!(
        "Authority {}, min stake {}, block threshold {}",
        config.authority, config.min_stake, config.block_threshold
    );

    // Build application state
    let state = build_state(config.clone())?;

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(log_format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "guard_server=debug,guard_core=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub guard: SharedGuard<InMemoryToken>,
    pub config: config::Config,
    pub scorer: Arc<dyn RiskScorer>,
}

fn build_state(config: config::Config) -> anyhow::Result<AppState> {
    let mut token = InMemoryToken::new();
    token.mint(config.authority, GENESIS_SUPPLY)?;

    let mut guard = TransactionGuard::new(config.guard_config(), token)?;
    // Journal writes are synchronous and happen under the guard's write lock
    if let Some(dir) = &config.journal_dir {
        let recorder = JournalRecorder::new(dir.clone())
            .with_context(|| format!("failed to open journal in {}", dir.display()))?;
        tracing::info!("Journaling events to {:?}", recorder.current_file());
        guard = guard.with_recorder(recorder);
    }

    Ok(AppState {
        guard: SharedGuard::new(guard),
        config,
        scorer: Arc::new(HeuristicScorer::new()),
    })
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let mut public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/validators", get(handlers::validators::list))
        .route("/api/v1/validators/:address", get(handlers::validators::get))
        .route("/api/v1/assessments", get(handlers::assessments::list))
        .route("/api/v1/assessments/:tx_id", get(handlers::assessments::get))
        .route("/api/v1/gate/:tx_id", get(handlers::gate::check))
        .route("/api/v1/stats", get(handlers::stats::get))
        .route("/api/v1/protocols", get(handlers::protocols::list))
        .route("/api/v1/protocols/stats", get(handlers::protocols::stats))
        .route("/api/v1/protocols/:address", get(handlers::protocols::get))
        .route("/api/v1/contracts/:address/risk", get(handlers::contracts::get))
        .route("/api/v1/events", get(handlers::events::list))
        .route("/api/v1/token/:address/balance", get(handlers::token::balance))
        .route("/api/v1/analyze", post(handlers::analyze::analyze));

    // Caller routes (JWT naming the caller address)
    let mut caller_routes = Router::new()
        // Validators
        .route("/api/v1/validators/stake", post(handlers::validators::stake))
        .route("/api/v1/validators/unstake", post(handlers::validators::unstake))
        .route("/api/v1/validators/:address/slash", post(handlers::validators::slash))

        // Assessments
        .route("/api/v1/assessments", post(handlers::assessments::submit))

        // Protocols
        .route("/api/v1/protocols", post(handlers::protocols::register))
        .route("/api/v1/protocols/:address/deactivate", post(handlers::protocols::deactivate))

        // Oracle feeds
        .route("/api/v1/contracts/risk", post(handlers::contracts::update))
        .route("/api/v1/contracts/risk/batch", post(handlers::contracts::batch_update))
        .route("/api/v1/exploits", post(handlers::exploits::record))

        // Roles
        .route("/api/v1/roles", post(handlers::roles::grant).delete(handlers::roles::revoke));

    // Development helpers
    if !state.config.is_production() {
        public_routes = public_routes
            .route("/api/v1/auth/dev-token", post(handlers::auth::dev_token));
        caller_routes = caller_routes
            .route("/api/v1/token/faucet", post(handlers::token::faucet));
    }

    let caller_routes = caller_routes.route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::auth::require_caller
    ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(caller_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any)
                ),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use guard_core::{Address, TxId};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;

    const AUTHORITY: &str = "0x00000000000000000000000000000000000000a0";
    const VALIDATOR: &str = "0x0000000000000000000000000000000000000011";
    const STRANGER: &str = "0x0000000000000000000000000000000000000099";

    fn state_with(pairs: &[(&str, &str)]) -> AppState {
        let mut vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.entry("AUTHORITY_ADDRESS".to_string())
            .or_insert_with(|| AUTHORITY.to_string());
        let config = config::Config::from_lookup(|name| vars.get(name).cloned()).unwrap();
        build_state(config).unwrap()
    }

    fn token_for(state: &AppState, address: &str) -> String {
        let address: Address = address.parse().unwrap();
        let (token, _) = tokio_test::assert_ok!(handlers::auth::generate_jwt(
            &address,
            &state.config.jwt_secret,
            1
        ));
        token
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn staked_validator(app: &Router, token: &str) {
        let (status, _) = send(app, Method::POST, "/api/v1/token/faucet", Some(token), Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(
            app,
            Method::POST,
            "/api/v1/validators/stake",
            Some(token),
            Some(json!({ "amount": 2000 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], true);
    }

    fn tx(label: &str) -> String {
        TxId::digest(label).to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let app = create_router(state_with(&[]));
        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["gate_policy"], "fail_closed");
    }

    #[tokio::test]
    async fn test_assessment_flow() {
        let state = state_with(&[]);
        let validator = token_for(&state, VALIDATOR);
        let app = create_router(state);
        staked_validator(&app, &validator).await;

        let h1 = tx("H1");
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/assessments",
            Some(&validator),
            Some(json!({ "tx_id": h1, "risk_score": 25, "category": "Normal Transaction" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verdict"], "approved");

        let h2 = tx("H2");
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/assessments",
            Some(&validator),
            Some(json!({
                "tx_id": h2,
                "risk_score": 95,
                "category": "flash_loan",
                "value_at_risk": 50000
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assessment"]["is_blocked"], true);

        let (_, gate) = send(&app, Method::GET, &format!("/api/v1/gate/{}", h1), None, None).await;
        assert_eq!(gate["is_safe"], true);
        let (_, gate) = send(&app, Method::GET, &format!("/api/v1/gate/{}", h2), None, None).await;
        assert_eq!(gate["is_safe"], false);
        assert_eq!(gate["state"], "blocked");

        let (_, stats) = send(&app, Method::GET, "/api/v1/stats", None, None).await;
        assert_eq!(stats["transactions_screened"], 1);
        assert_eq!(stats["exploits_blocked"], 1);
        assert_eq!(stats["funds_protected"], 50000);
        assert_eq!(stats["active_validators"], 1);

        let (status, record) = send(&app, Method::GET, &format!("/api/v1/assessments/{}", h2), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["category"], "flash_loan");

        let (status, listed) = send(&app, Method::GET, "/api/v1/assessments?limit=5", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed.as_array().map(Vec::len), Some(2));
        let (_, listed) = send(&app, Method::GET, "/api/v1/assessments?limit=1", None, None).await;
        assert_eq!(listed.as_array().map(Vec::len), Some(1));

        let (_, events) = send(&app, Method::GET, "/api/v1/events?limit=1", None, None).await;
        assert_eq!(events.as_array().map(Vec::len), Some(1));
        assert!(events[0]["kind"].get("transaction_blocked").is_some());
    }

    #[tokio::test]
    async fn test_unstaked_caller_is_rejected() {
        let state = state_with(&[]);
        let stranger = token_for(&state, STRANGER);
        let app = create_router(state);
        let h3 = tx("H3");
        let submission = json!({ "tx_id": h3, "risk_score": 50, "category": "normal" });

        let (status, body) = send(&app, Method::POST, "/api/v1/assessments", None, Some(submission.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthenticated");

        let (status, body) = send(&app, Method::POST, "/api/v1/assessments", Some(&stranger), Some(submission)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "not_authorized");

        let (status, _) = send(&app, Method::GET, &format!("/api/v1/assessments/{}", h3), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, gate) = send(&app, Method::GET, &format!("/api/v1/gate/{}", h3), None, None).await;
        assert_eq!(gate["is_safe"], false);
        assert_eq!(gate["state"], "unassessed");
    }

    #[tokio::test]
    async fn test_out_of_range_scores() {
        let state = state_with(&[]);
        let validator = token_for(&state, VALIDATOR);
        let app = create_router(state);
        staked_validator(&app, &validator).await;

        for score in [-1, 101] {
            let (status, body) = send(
                &app,
                Method::POST,
                "/api/v1/assessments",
                Some(&validator),
                Some(json!({ "tx_id": tx("bad"), "risk_score": score, "category": "normal" })),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "invalid_score");
        }
    }

    #[tokio::test]
    async fn test_slashing_rules() {
        let state = state_with(&[]);
        let validator = token_for(&state, VALIDATOR);
        let authority = token_for(&state, AUTHORITY);
        let app = create_router(state);
        staked_validator(&app, &validator).await;
        let uri = format!("/api/v1/validators/{}/slash", VALIDATOR);

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&validator),
            Some(json!({ "amount": 100, "reason": "self" })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "unauthorized");

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&authority),
            Some(json!({ "amount": 2500, "reason": "Incorrect risk assessment" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "exceeds_stake");

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&authority),
            Some(json!({ "amount": 1500, "reason": "Incorrect risk assessment" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], false);
        assert_eq!(body["validator"]["total_slashed"], 1500);

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(&authority),
            Some(json!({ "amount": 1, "reason": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_protocol_registry() {
        let state = state_with(&[]);
        let authority = token_for(&state, AUTHORITY);
        let validator = token_for(&state, VALIDATOR);
        let app = create_router(state);
        let dex = "0x00000000000000000000000000000000000000d0";
        let registration = json!({ "address": dex, "name": "DemoDEX", "kind": "dex" });

        let (status, _) = send(&app, Method::POST, "/api/v1/protocols", Some(&validator), Some(registration.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, Method::POST, "/api/v1/protocols", Some(&authority), Some(registration)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "registered");

        let (_, stats) = send(&app, Method::GET, "/api/v1/protocols/stats", None, None).await;
        assert_eq!(stats["total_protocols"], 1);
        assert_eq!(stats["active_protocols"], 1);

        let uri = format!("/api/v1/protocols/{}/deactivate", dex);
        let (status, body) = send(&app, Method::POST, &uri, Some(&authority), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deactivated"], true);

        let (_, active) = send(&app, Method::GET, "/api/v1/protocols?active_only=true", None, None).await;
        assert_eq!(active.as_array().map(Vec::len), Some(0));

        let unknown = "/api/v1/protocols/0x00000000000000000000000000000000000000ee/deactivate";
        let (status, body) = send(&app, Method::POST, unknown, Some(&authority), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "protocol_not_found");
    }

    #[tokio::test]
    async fn test_oracle_feeds_and_roles() {
        let state = state_with(&[]);
        let authority = token_for(&state, AUTHORITY);
        let oracle = token_for(&state, STRANGER);
        let app = create_router(state);
        let contract = "0x00000000000000000000000000000000000000c1";
        let update = json!({ "contract": contract, "risk_score": 72 });

        let (status, _) = send(&app, Method::POST, "/api/v1/contracts/risk", Some(&oracle), Some(update.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/roles",
            Some(&authority),
            Some(json!({ "address": STRANGER, "role": "oracle" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["changed"], true);

        let (status, _) = send(&app, Method::POST, "/api/v1/contracts/risk", Some(&oracle), Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        let (_, risk) = send(&app, Method::GET, &format!("/api/v1/contracts/{}/risk", contract), None, None).await;
        assert_eq!(risk["risk_score"], 72);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/contracts/risk/batch",
            Some(&oracle),
            Some(json!({ "updates": [
                { "contract": contract, "risk_score": 10 },
                { "contract": "0x00000000000000000000000000000000000000c2", "risk_score": 300 }
            ] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_score");
        let (_, risk) = send(&app, Method::GET, &format!("/api/v1/contracts/{}/risk", contract), None, None).await;
        assert_eq!(risk["risk_score"], 72);

        let (status, stats) = send(
            &app,
            Method::POST,
            "/api/v1/exploits",
            Some(&oracle),
            Some(json!({ "target": contract, "potential_loss": 75000, "category": "Reentrancy Attack" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["exploits_blocked"], 1);

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/api/v1/roles",
            Some(&authority),
            Some(json!({ "address": STRANGER, "role": "oracle" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["roles"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_analyze_is_advisory() {
        let app = create_router(state_with(&[]));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/analyze",
            None,
            Some(json!({ "function_name": "rugPull", "gas_limit": 21000 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verdict"]["risk_score"], 94);
        assert_eq!(body["verdict"]["category"], "rug_pull");
        assert_eq!(body["would_block"], true);

        let (_, stats) = send(&app, Method::GET, "/api/v1/stats", None, None).await;
        assert_eq!(stats["transactions_screened"], 0);
        assert_eq!(stats["exploits_blocked"], 0);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/analyze",
            None,
            Some(json!({ "data": "0xzz" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fail_open_gate() {
        let app = create_router(state_with(&[("GATE_POLICY", "fail_open")]));
        let (_, gate) = send(&app, Method::GET, &format!("/api/v1/gate/{}", tx("unseen")), None, None).await;
        assert_eq!(gate["is_safe"], true);
        assert_eq!(gate["policy"], "fail_open");
    }

    #[tokio::test]
    async fn test_dev_routes_absent_in_production() {
        let state = state_with(&[("ENVIRONMENT", "production"), ("JWT_SECRET", "prod-secret")]);
        let validator = token_for(&state, VALIDATOR);
        let app = create_router(state);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/auth/dev-token",
            None,
            Some(json!({ "address": VALIDATOR })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::POST, "/api/v1/token/faucet", Some(&validator), Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_router(state_with(&[]));
        let (status, _) = send(&app, Method::GET, "/api/v1/nothing-here", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::POST, "/api/v1/validators/stake/extra", None, Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::POST, "/api/v1/validators/stake", None, Some(json!({ "amount": 1 }))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_contract_batch_size_is_capped() {
        let state = state_with(&[]);
        let authority = token_for(&state, AUTHORITY);
        let app = create_router(state);
        let updates: Vec<Value> = (0..257u64)
            .map(|n| json!({ "contract": Address::from_low_u64(0xC000 + n).to_string(), "risk_score": 10 }))
            .collect();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/contracts/risk/batch",
            Some(&authority),
            Some(json!({ "updates": updates })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "validation_error");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/contracts/risk/batch",
            Some(&authority),
            Some(json!({ "updates": &updates[..256] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dev_token_authenticates() {
        let app = create_router(state_with(&[]));
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/auth/dev-token",
            None,
            Some(json!({ "address": VALIDATOR })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::POST, "/api/v1/token/faucet", Some(&token), Some(json!({ "amount": 700 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 700);

        let (status, _) = send(&app, Method::POST, "/api/v1/token/faucet", Some("not-a-jwt"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
