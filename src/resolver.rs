//! 画像リゾルバ
//!
//! 画像の参照（URLまたはローカルファイル）をBase64ペイロードへ解決する。
//! URLの場合は取得戦略の順序付きリストを先頭から試す:
//! 1. 直接GET
//! 2. 中継エンドポイント経由（CORS等で直接取得が拒否された場合の回復策）
//!
//! 途中の失敗は診断ログに残すだけでユーザーへは出さない。
//! 全戦略が失敗したときのみImageResolutionエラーになる

use crate::error::{Result, VisMeasureError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::future::Future;
use std::path::Path;

/// 画像取得戦略
#[derive(Debug, Clone, PartialEq)]
pub enum FetchStrategy {
    /// URLへそのままGET
    Direct,
    /// 中継エンドポイントに元URLをクエリで渡して取得させる
    Relay { endpoint: String },
}

impl FetchStrategy {
    /// この戦略で実際にGETするURLを構築する
    pub fn request_url(&self, target: &str) -> String {
        match self {
            FetchStrategy::Direct => target.to_string(),
            FetchStrategy::Relay { endpoint } => {
                format!("{}?url={}", endpoint, urlencoding::encode(target))
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FetchStrategy::Direct => "直接取得",
            FetchStrategy::Relay { .. } => "中継取得",
        }
    }
}

/// 既定の戦略リスト: 直接 → 中継
pub fn default_strategies(relay_endpoint: &str) -> Vec<FetchStrategy> {
    vec![
        FetchStrategy::Direct,
        FetchStrategy::Relay {
            endpoint: relay_endpoint.to_string(),
        },
    ]
}

/// 戦略リストを順に試し、最初に成功したレスポンスのバイト列を返す
///
/// 取得処理をクロージャで注入できるようにし、フォールバック方針を
/// ネットワークなしでテスト可能にしている
pub async fn resolve_with<F, Fut>(
    strategies: &[FetchStrategy],
    target: &str,
    mut fetch: F,
) -> Result<Vec<u8>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<u8>, String>>,
{
    for strategy in strategies {
        match fetch(strategy.request_url(target)).await {
            Ok(bytes) => return Ok(bytes),
            // 途中失敗はユーザーへ出さない（診断ログのみ）
            Err(e) => log::warn!("{}に失敗: {} ({})", strategy.label(), target, e),
        }
    }

    Err(VisMeasureError::ImageResolution(format!(
        "{} - ブラウザ/ホスト側の制限により取得できません。画像を手動でダウンロードし `analyze-image` を使用してください",
        target
    )))
}

/// URLをBase64文字列へ解決する（データセットモード）
pub async fn resolve_url(
    client: &reqwest::Client,
    strategies: &[FetchStrategy],
    url: &str,
) -> Result<String> {
    let bytes = resolve_with(strategies, url, |request_url| {
        let client = client.clone();
        async move {
            let resp = client
                .get(&request_url)
                .send()
                .await
                .map_err(|e| e.to_string())?;

            if !resp.status().is_success() {
                return Err(format!("HTTP {}", resp.status()));
            }

            let bytes = resp.bytes().await.map_err(|e| e.to_string())?;
            Ok(bytes.to_vec())
        }
    })
    .await?;

    Ok(STANDARD.encode(&bytes))
}

/// ローカル画像ファイルをBase64文字列へ解決する（単一画像モード）
///
/// ネットワーク条件では失敗しない。読めないファイルはその操作に対して
/// 致命的エラーとなる
///
/// # Returns
/// (MIMEタイプ, Base64文字列)
pub fn resolve_file(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path).map_err(|e| {
        VisMeasureError::ImageResolution(format!("{}: {}", path.display(), e))
    })?;

    Ok((mime_for_path(path).to_string(), STANDARD.encode(&bytes)))
}

/// 拡張子からMIMEタイプを推定（不明な場合はimage/jpeg）
pub fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}
