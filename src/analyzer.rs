//! Gemini API連携
//!
//! Base64画像1枚と固定プロンプトを送信し、計測結果（AnalysisResult）を
//! 受け取る。レスポンスのパースはvismeasure-common::parserに委譲

use crate::error::{Result, VisMeasureError};
use serde::{Deserialize, Serialize};
use vismeasure_common::{parse_measurement_response, AnalysisResult, MEASUREMENT_PROMPT};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini APIリクエスト
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

/// Gemini APIレスポンス
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// 画像1枚をビジュアル計測する
///
/// # Arguments
/// * `client` - 共有HTTPクライアント
/// * `api_key` - Gemini API key
/// * `model` - モデル名
/// * `mime_type` - 画像のMIMEタイプ
/// * `image_base64` - Base64エンコード済み画像データ
pub async fn measure_image(
    client: &reqwest::Client,
    api_key: &str,
    model: &str,
    mime_type: &str,
    image_base64: &str,
) -> Result<AnalysisResult> {
    let request = GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: MEASUREMENT_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: image_base64.to_string(),
                    },
                },
            ],
        }],
        generation_config: GenerationConfig {
            temperature: 0.1,
            response_mime_type: "application/json".to_string(),
        },
    };

    let url = format!(
        "{}/{}:generateContent?key={}",
        GEMINI_API_BASE,
        model,
        api_key.trim()
    );

    let resp = client
        .post(&url)
        .json(&request)
        .send()
        .await
        .map_err(|e| VisMeasureError::ModelRequest(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| VisMeasureError::ModelRequest(e.to_string()))?;

    if !status.is_success() {
        return Err(VisMeasureError::ModelRequest(error_message(&body, status)));
    }

    let response: GeminiResponse = serde_json::from_str(&body)
        .map_err(|e| VisMeasureError::ApiParse(format!("レスポンス構造が不正: {}", e)))?;

    let text = response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .ok_or_else(|| VisMeasureError::ApiParse("レスポンスが空です".into()))?;

    parse_measurement_response(&text).map_err(|e| VisMeasureError::ApiParse(e.to_string()))
}

/// エラーレスポンスからメッセージを抽出
///
/// ボディがJSONならerror.messageを採用、そうでなければHTTPステータス
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| format!("API Error: {}", status))
}
