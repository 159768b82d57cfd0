//! データセットコンテナの読み込み
//!
//! アップロードされたファイルを拡張子で振り分け、行のセル化までを担当:
//! - .xlsx / .xls: calamineでデコードし、先頭シートのみ使用
//! - それ以外: CSVテキストとして読む（フォールバック）
//!
//! セル化以降の列マッピングはvismeasure-common::ingestに委譲する

use crate::error::{Result, VisMeasureError};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use vismeasure_common::{ingest, types::Cell, ProductRecord};

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// データセットファイルを読み込み、商品レコード一覧を返す
///
/// Excelコンテナ自体がデコードできない場合はContainerDecodeで全体が
/// 失敗する。CSVはコンテナレベルでは失敗せず、不正な行が落ちるだけ
pub fn load_dataset(path: &Path) -> Result<Vec<ProductRecord>> {
    if !path.exists() {
        return Err(VisMeasureError::FileNotFound(path.display().to_string()));
    }

    if is_excel(path) {
        load_workbook(path)
    } else {
        let text = std::fs::read_to_string(path)?;
        Ok(ingest::parse_csv(&text))
    }
}

fn is_excel(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            EXCEL_EXTENSIONS.iter().any(|&e| e == ext)
        })
        .unwrap_or(false)
}

fn load_workbook(path: &Path) -> Result<Vec<ProductRecord>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| VisMeasureError::ContainerDecode(format!("{}: {}", path.display(), e)))?;

    // 先頭シートのみを対象とする
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| VisMeasureError::ContainerDecode("シートが存在しません".into()))?
        .map_err(|e| VisMeasureError::ContainerDecode(format!("シート読み込みエラー: {}", e)))?;

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();

    Ok(ingest::parse_rows(&rows))
}

/// calamineのセル値を共通のCell型へ変換
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}
