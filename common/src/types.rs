//! データモデルの型定義
//!
//! CLIと取り込みロジックで共有される型:
//! - Cell: スプレッドシートのセル値（文字列・数値・空）
//! - ProductRecord: 1行分の正規化された商品レコード
//! - SkipReason: 行がスキップされた理由
//! - AnalysisResult: AIモデルが返す計測結果

use serde::{Deserialize, Serialize};

/// スプレッドシートのセル値
///
/// Excelのセルは文字列・数値・空のいずれかで届くため、
/// 列マッピング処理の前に明示的なタグ付き型で受ける
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// 文字列表現へ変換（数値は整数なら小数点なしで出力）
    pub fn coerce_string(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Cell::Empty => String::new(),
        }
    }

    /// 文字列セルの場合のみ中身を返す
    ///
    /// 画像URL候補の判定に使用。数値や空セルはURLになり得ない
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// 行スキップの理由
///
/// 現状は診断目的でのみ保持し、呼び出し側では破棄される
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 行が存在しないか空
    EmptyRow,
    /// 先頭列（商品ID）が空
    EmptyId,
    /// 有効な画像URLが1つもない
    NoImages,
}

/// 商品レコード
///
/// データセット1行から生成される正規化済みエントリ。
/// id非空かつimages非空でなければ生成されない
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductRecord {
    pub id: String,
    pub category: String,

    /// 3列目の画像枚数ヒント（実際のimages長とは照合しない）
    pub image_count: u32,

    /// httpで始まる画像URL（解析には先頭のみ使用、全件保持）
    pub images: Vec<String>,
}

/// 1次元分の計測値
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct VisualMeasurement {
    /// -5.0〜+5.0のスコア
    pub score: f64,
    pub reasoning: String,
}

/// 5つの視覚的計測次元
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Measurements {
    pub gender_expression: VisualMeasurement,
    pub visual_weight: VisualMeasurement,
    pub embellishment: VisualMeasurement,
    pub unconventionality: VisualMeasurement,
    pub formality: VisualMeasurement,
}

/// 観察可能な属性
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Attributes {
    pub wirecore: bool,
    pub geometry: String,
    pub transparency: String,
    pub dominant_colors: Vec<String>,
    pub texture: String,
    pub suitable_for_kids: bool,
}

/// メタデータ
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    pub visual_description: String,
}

/// AI計測結果
///
/// モデル出力のJSONをそのまま受ける。欠損フィールドはデフォルト値で
/// 埋まり、スコアの範囲外チェック等のバリデーションは行わない
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub measurements: Measurements,
    pub attributes: Attributes,
    pub metadata: Metadata,
}
