//! 画像中継プロキシ
//!
//! ブラウザのCORS制限で直接取得できない画像をサーバ側で代理取得し、
//! バイト列をそのまま返す単一ルート（GET /proxy?url=...）のプロセス。
//! 認証もレート制限もない。対象は公開画像URLのみという前提

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
    client: reqwest::Client,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = AppState {
        client: reqwest::Client::new(),
    };

    let cors = CorsLayer::new()
        .allow_headers(Any)
        .allow_methods(Any)
        .allow_origin(Any);

    let app = Router::new()
        .route("/proxy", get(proxy))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(5000);
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("relay listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// 指定URLを代理取得してバイト列を返す
///
/// 成功時は上流のContent-Typeを引き継ぐ（なければimage/jpeg）。
/// 失敗はすべて非成功ステータス + プレーンテキスト
async fn proxy(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let Some(url) = params.get("url") else {
        return (StatusCode::BAD_REQUEST, "Missing image URL").into_response();
    };

    match state.client.get(url).send().await {
        Ok(resp) if resp.status().is_success() => {
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("image/jpeg")
                .to_string();

            match resp.bytes().await {
                Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
                Err(e) => {
                    warn!("proxy body error: {e}");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch image").into_response()
                }
            }
        }
        Ok(resp) => {
            warn!("upstream returned {}: {url}", resp.status());
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch image").into_response()
        }
        Err(e) => {
            warn!("proxy error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Proxy error").into_response()
        }
    }
}
