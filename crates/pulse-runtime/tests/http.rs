//! Clients against an in-process fake of every upstream service

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use pulse_core::{
    AuthFlow, Credentials, FeedbackRecorder, InsightFeed, NewsFeed, Onboarding, PriceFeed, PulseConfig, PulseError,
    Route, Section, Session, Vote, VoteBoard,
};
use pulse_runtime::{ApiClient, Clients, CoinGeckoClient, CryptoPanicClient, OpenRouterProvider};
use rust_decimal_macros::dec;
use serde_json::{Value, json};

type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// -- prices ------------------------------------------------------------------

async fn simple_price(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let ids = q.get("ids").cloned().unwrap_or_default();
    if q.get("vs_currencies").map(String::as_str) != Some("usd")
        || q.get("include_24hr_change").map(String::as_str) != Some("true")
        || ids.split(',').count() != 5
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad query"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "ethereum": {"usd": 3200, "usd_24h_change": -1.1},
            "bitcoin": {"usd": 65000, "usd_24h_change": 2.5}
        })),
    )
}

#[tokio::test]
async fn test_coingecko_partial_response() {
    let base = serve(Router::new().route("/simple/price", get(simple_price))).await;
    let feed = PriceFeed::new(Arc::new(CoinGeckoClient::new(reqwest::Client::new(), base)));

    let coins = feed.fetch().await.unwrap();
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[0].name.as_deref(), Some("Bitcoin (BTC)"));
    assert_eq!(coins[0].price, dec!(65000));
    assert_eq!(coins[1].name.as_deref(), Some("Ethereum (ETH)"));
    assert_eq!(coins[1].change_24h, dec!(-1.1));
}

#[tokio::test]
async fn test_coingecko_null_change_decodes() {
    let app = Router::new().route(
        "/simple/price",
        get(|| async {
            Json(json!({
                "bitcoin": {"usd": 65000, "usd_24h_change": 2.5},
                "dogecoin": {"usd": 0.38, "usd_24h_change": null}
            }))
        }),
    );
    let base = serve(app).await;
    let feed = PriceFeed::new(Arc::new(CoinGeckoClient::new(reqwest::Client::new(), base)));

    let coins = feed.fetch().await.unwrap();
    assert_eq!(coins.len(), 2);
    assert_eq!(coins[1].id, "dogecoin");
    assert_eq!(coins[1].price, dec!(0.38));
    assert_eq!(coins[1].change_24h, dec!(0));
}

#[tokio::test]
async fn test_coingecko_server_error_is_status() {
    let app = Router::new().route("/simple/price", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = serve(app).await;
    let feed = PriceFeed::new(Arc::new(CoinGeckoClient::new(reqwest::Client::new(), base)));

    let err = feed.fetch().await.unwrap_err();
    assert!(matches!(err, PulseError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_transport() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = CoinGeckoClient::new(reqwest::Client::new(), format!("http://{addr}"));
    let err = PriceFeed::new(Arc::new(client)).fetch().await.unwrap_err();
    assert!(err.is_transport());
}

// -- news --------------------------------------------------------------------

async fn posts(Query(q): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    if q.get("auth_token").map(String::as_str) != Some("panic-token") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "invalid token"})));
    }
    let results: Vec<Value> = (1..=7)
        .map(|i| {
            json!({
                "id": i,
                "title": format!("Headline {i}"),
                "kind": "news",
                "published_at": format!("2026-10-0{i}T12:00:00Z"),
                "source": {"title": "ignored"}
            })
        })
        .collect();
    (StatusCode::OK, Json(json!({ "results": results })))
}

#[tokio::test]
async fn test_cryptopanic_keeps_five_newest() {
    let base = serve(Router::new().route("/posts/", get(posts))).await;
    let feed = NewsFeed::new(Arc::new(CryptoPanicClient::new(reqwest::Client::new(), base, "panic-token")));

    let items = feed.fetch().await.unwrap();
    let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, [7, 6, 5, 4, 3]);
}

#[tokio::test]
async fn test_cryptopanic_bad_token_hides_it_from_errors() {
    let base = serve(Router::new().route("/posts/", get(posts))).await;
    let client = CryptoPanicClient::new(reqwest::Client::new(), base, "wrong-secret");

    let err = NewsFeed::new(Arc::new(client)).fetch().await.unwrap_err();
    assert_eq!(err.backend_message(), Some("invalid token"));
    assert!(!err.to_string().contains("wrong-secret"));
}

#[tokio::test]
async fn test_cryptopanic_missing_results_is_malformed() {
    let app = Router::new().route("/posts/", get(|| async { Json(json!({"count": 0})) }));
    let base = serve(app).await;
    let client = CryptoPanicClient::new(reqwest::Client::new(), base, "panic-token");

    let err = NewsFeed::new(Arc::new(client)).fetch().await.unwrap_err();
    assert!(matches!(err, PulseError::Malformed(_)));
}

// -- insight -----------------------------------------------------------------

async fn completions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if bearer(&headers).as_deref() != Some("Bearer or-key") {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": {"message": "no auth"}})));
    }
    let valid = body["max_tokens"] == 150
        && body["model"] == "gpt-4o-mini"
        && body["messages"][0]["content"] == "Give me an AI Insight of the Day in 1 sentence.";
    if !valid {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad body"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "model": "openai/gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "Markets reward patience."}}],
            "usage": {"prompt_tokens": 18, "completion_tokens": 5, "total_tokens": 23}
        })),
    )
}

#[tokio::test]
async fn test_openrouter_insight() {
    let base = serve(Router::new().route("/chat/completions", post(completions))).await;
    let provider = OpenRouterProvider::new(reqwest::Client::new(), base, "or-key");
    let feed = InsightFeed::new(Arc::new(provider), "gpt-4o-mini");

    assert_eq!(feed.fetch().await.unwrap(), "Markets reward patience.");
}

#[tokio::test]
async fn test_openrouter_wrong_key_is_status() {
    let base = serve(Router::new().route("/chat/completions", post(completions))).await;
    let provider = OpenRouterProvider::new(reqwest::Client::new(), base, "stale");
    let feed = InsightFeed::new(Arc::new(provider), "gpt-4o-mini");

    assert!(matches!(feed.fetch().await, Err(PulseError::Status { status: 401, .. })));
}

// -- backend -----------------------------------------------------------------

fn backend_app(seen: Seen) -> Router {
    fn record(seen: &Seen, path: &str, headers: &HeaderMap, body: Value) {
        seen.lock().unwrap().push((path.to_string(), bearer(headers), body));
    }

    Router::new()
        .route(
            "/api/auth/login",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                let ok = body["password"] == "hunter2";
                record(&seen, "/api/auth/login", &headers, body);
                if ok {
                    (StatusCode::OK, Json(json!({"token": "jwt-123"})))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({"msg": "Invalid credentials"})))
                }
            }),
        )
        .route(
            "/api/feedback",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                let limited = body["section"] == "meme";
                record(&seen, "/api/feedback", &headers, body);
                if limited {
                    (StatusCode::TOO_MANY_REQUESTS, Json(json!({"msg": "rate limited"})))
                } else {
                    (StatusCode::OK, Json(json!({"ok": true})))
                }
            }),
        )
        .route(
            "/api/user/preferences",
            post(|State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                record(&seen, "/api/user/preferences", &headers, body);
                Json(json!({"ok": true}))
            }),
        )
        .with_state(seen)
}

#[tokio::test]
async fn test_token_attached_after_login_and_dropped_after_logout() {
    let seen = Seen::default();
    let base = serve(backend_app(seen.clone())).await;
    let session = Arc::new(Session::new());
    let api = Arc::new(ApiClient::new(reqwest::Client::new(), base, session.clone()));
    let auth = AuthFlow::new(api.clone(), session.clone());
    let recorder = FeedbackRecorder::new(api.clone());
    let mut board = VoteBoard::new();

    recorder.record(&mut board, Section::News, Vote::Up).await;

    let transition = auth.login(&Credentials::new("a@b.co", "hunter2")).await;
    assert_eq!(transition.navigate, Some(Route::Dashboard));
    assert!(session.is_authenticated());
    recorder.record(&mut board, Section::Prices, Vote::Down).await;

    assert_eq!(auth.logout().navigate, Some(Route::Landing));
    recorder.record(&mut board, Section::Ai, Vote::Up).await;

    let seen = seen.lock().unwrap();
    let feedback: Vec<&Option<String>> = seen
        .iter()
        .filter(|(path, _, _)| path == "/api/feedback")
        .map(|(_, auth, _)| auth)
        .collect();
    assert_eq!(feedback, [&None, &Some("Bearer jwt-123".to_string()), &None]);

    let (_, _, body) = &seen[2];
    assert_eq!(body["section"], "prices");
    assert_eq!(body["vote"], "down");
    assert!(body["timestamp"].as_str().is_some_and(|t| t.contains('T')));
}

#[tokio::test]
async fn test_backend_works_without_feed_credentials() {
    let seen = Seen::default();
    let base = serve(backend_app(seen.clone())).await;
    let config = PulseConfig::backend_from_lookup(|key| (key == "PULSE_API_URL").then(|| base.clone())).unwrap();
    assert!(Clients::from_config(&config, Arc::new(Session::new())).is_err());

    let api = Arc::new(ApiClient::from_config(&config, Arc::new(Session::new())).unwrap());
    let transition = api.auth().login(&Credentials::new("a@b.co", "hunter2")).await;
    assert_eq!(transition.navigate, Some(Route::Dashboard));

    let mut board = VoteBoard::new();
    let note = api.recorder().record(&mut board, Section::News, Vote::Up).await;
    assert!(!note.is_error());
    assert_eq!(
        seen.lock().unwrap().last().and_then(|(_, auth, _)| auth.clone()).as_deref(),
        Some("Bearer jwt-123")
    );
}

#[tokio::test]
async fn test_login_failure_shows_backend_message() {
    let base = serve(backend_app(Seen::default())).await;
    let session = Arc::new(Session::new());
    let api = Arc::new(ApiClient::new(reqwest::Client::new(), base, session.clone()));

    let transition = AuthFlow::new(api, session.clone())
        .login(&Credentials::new("a@b.co", "wrong"))
        .await;
    let note = transition.notification.unwrap();
    assert_eq!(note.title, "Login failed");
    assert_eq!(note.description, "Invalid credentials");
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_feedback_failure_carries_backend_message() {
    let base = serve(backend_app(Seen::default())).await;
    let api = Arc::new(ApiClient::new(reqwest::Client::new(), base, Arc::new(Session::new())));
    let mut board = VoteBoard::new();

    let note = FeedbackRecorder::new(api)
        .record(&mut board, Section::Meme, Vote::Up)
        .await;
    assert!(note.is_error());
    assert!(note.to_string().contains("rate limited"));
    assert_eq!(board.get(Section::Meme), Some(Vote::Up));
}

#[tokio::test]
async fn test_preferences_payload_is_camel_case() {
    let seen = Seen::default();
    let base = serve(backend_app(seen.clone())).await;
    let api = ApiClient::new(reqwest::Client::new(), base, Arc::new(Session::new()));

    let mut wizard = Onboarding::new();
    wizard.toggle_asset("Dogecoin (DOGE)");
    wizard.next();
    wizard.select_investor_type(pulse_core::InvestorType::Nft);
    wizard.next();
    wizard.toggle_content_type("Fun Memes");

    let transition = wizard.complete(&api).await.unwrap();
    assert_eq!(transition.navigate, Some(Route::Dashboard));

    let seen = seen.lock().unwrap();
    let (path, _, body) = &seen[0];
    assert_eq!(path, "/api/user/preferences");
    assert_eq!(
        body,
        &json!({
            "cryptoAssets": ["Dogecoin (DOGE)"],
            "investorType": "nft",
            "contentTypes": ["Fun Memes"]
        })
    );
}
