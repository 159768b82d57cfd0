//! 計測結果のターミナル表示
//!
//! 5次元スコアのバー表示と属性・説明の整形。純粋な文字列整形のみ

use vismeasure_common::types::{AnalysisResult, VisualMeasurement};

const BAR_STEPS: usize = 20;

/// -5.0〜+5.0のスコアをバー文字列へ変換
///
/// 中央（0）は┼、スコア位置は●で示す。範囲外はクランプ
pub fn score_bar(score: f64) -> String {
    let clamped = score.clamp(-5.0, 5.0);
    let pos = (((clamped + 5.0) / 10.0) * BAR_STEPS as f64).round() as usize;

    (0..=BAR_STEPS)
        .map(|i| {
            if i == pos {
                '●'
            } else if i == BAR_STEPS / 2 {
                '┼'
            } else {
                '─'
            }
        })
        .collect()
}

fn push_dimension(out: &mut String, label: &str, m: &VisualMeasurement) {
    out.push_str(&format!("・{}: {:+.1}\n", label, m.score));
    out.push_str(&format!("  [{}]\n", score_bar(m.score)));
    if !m.reasoning.is_empty() {
        out.push_str(&format!("  └ {}\n", m.reasoning));
    }
}

/// 計測結果全体を表示用文字列へ整形
pub fn render_analysis(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("── 計測結果 ──\n");
    push_dimension(&mut out, "性別表現", &result.measurements.gender_expression);
    push_dimension(&mut out, "視覚的重さ", &result.measurements.visual_weight);
    push_dimension(&mut out, "装飾性", &result.measurements.embellishment);
    push_dimension(&mut out, "非定番度", &result.measurements.unconventionality);
    push_dimension(&mut out, "フォーマル度", &result.measurements.formality);

    let attrs = &result.attributes;
    out.push_str("\n── 属性 ──\n");
    out.push_str(&format!(
        "ワイヤコア: {}\n",
        if attrs.wirecore { "あり" } else { "なし" }
    ));
    out.push_str(&format!("形状: {}\n", attrs.geometry));
    out.push_str(&format!("透明度: {}\n", attrs.transparency));
    out.push_str(&format!("主要色: {}\n", attrs.dominant_colors.join(", ")));
    out.push_str(&format!("質感: {}\n", attrs.texture));
    out.push_str(&format!(
        "子供向け: {}\n",
        if attrs.suitable_for_kids { "はい" } else { "いいえ" }
    ));

    if !result.metadata.visual_description.is_empty() {
        out.push_str(&format!("\n説明: {}\n", result.metadata.visual_description));
    }

    out
}
