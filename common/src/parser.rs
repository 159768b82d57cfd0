//! APIレスポンスパーサー
//!
//! モデルのレスポンステキストからJSONを抽出し、
//! 計測結果（AnalysisResult）をパースする

use crate::error::{Error, Result};
use crate::types::AnalysisResult;

/// APIレスポンスからJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の {...} オブジェクト
/// 3. エラー
///
/// # Examples
/// ```
/// use vismeasure_common::extract_json;
///
/// let response = "{\"key\": \"value\"}";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("key"));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の {...} を探す
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// 計測レスポンスをパース
///
/// JSONモード指定でもモデルが前後に文章を付けることがあるため、
/// 抽出してからパースする。構造のバリデーションはJSONパース以上には
/// 行わない（欠損フィールドはデフォルト値になる）
pub fn parse_measurement_response(response: &str) -> Result<AnalysisResult> {
    let json_str = extract_json(response)?;
    let result: AnalysisResult = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("計測結果のJSONパースエラー: {}", e)))?;
    Ok(result)
}
