//! データセット取り込みパーサー
//!
//! スプレッドシート/CSVの行データを商品レコード一覧へ正規化する。
//! 列マッピングは位置固定:
//! - 0列目: 商品ID
//! - 1列目: カテゴリ
//! - 2列目: 画像枚数ヒント
//! - 3列目以降: 画像URL候補
//!
//! 入力形式（Excel/CSV）に関わらず、行のセル化が済んだ後の挙動は同一

use crate::types::{Cell, ProductRecord, SkipReason};

/// 1行を検証して商品レコードへ変換
///
/// 先頭行（ヘッダ）の除外は呼び出し側（parse_rows）の責務。
/// スキップ理由は現状破棄されるが、将来の診断用に明示的に返す
///
/// # Returns
/// * `Ok(ProductRecord)` - 有効な行
/// * `Err(SkipReason)` - スキップ対象の行（エラーではない）
pub fn validate_row(row: &[Cell]) -> Result<ProductRecord, SkipReason> {
    if row.is_empty() || row.iter().all(|c| c.is_empty()) {
        return Err(SkipReason::EmptyRow);
    }

    let id = row.first().map(|c| c.coerce_string()).unwrap_or_default();
    if id.is_empty() {
        return Err(SkipReason::EmptyId);
    }

    let category = row.get(1).map(|c| c.coerce_string()).unwrap_or_default();

    // 数値でない・欠損の場合は0（パース失敗にはしない）
    let image_count = row
        .get(2)
        .map(|c| c.coerce_string())
        .unwrap_or_default()
        .trim()
        .parse::<u32>()
        .unwrap_or(0);

    // 3列目以降: トリム後にhttpで始まる文字列セルのみ採用。
    // 数値・空白・URL以外のテキストは位置も残さず黙って捨てる
    let images: Vec<String> = row
        .iter()
        .skip(3)
        .filter_map(|c| c.as_text())
        .map(|s| s.trim())
        .filter(|s| s.starts_with("http"))
        .map(|s| s.to_string())
        .collect();

    if images.is_empty() {
        return Err(SkipReason::NoImages);
    }

    Ok(ProductRecord {
        id,
        category,
        image_count,
        images,
    })
}

/// セル化済みの行列から商品レコード一覧を生成
///
/// 先頭行は内容を確認せず常にヘッダとして読み飛ばす。
/// 無効な行は黙って除外され、部分的な結果が返る
pub fn parse_rows(rows: &[Vec<Cell>]) -> Vec<ProductRecord> {
    rows.iter()
        .skip(1)
        .filter_map(|row| validate_row(row).ok())
        .collect()
}

/// CSVテキストから商品レコード一覧を生成
///
/// コンテナレベルでの失敗は起こらない（不正な行が落ちるだけ）
pub fn parse_csv(text: &str) -> Vec<ProductRecord> {
    let mut records = Vec::new();

    for line in text.split('\n').skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<Cell> = split_csv_line(line)
            .into_iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field)
                }
            })
            .collect();

        if let Ok(record) = validate_row(&cells) {
            records.push(record);
        }
    }

    records
}

/// CSV1行をフィールドへ分割
///
/// 引用符内のカンマを保持するため、行末までに残るダブルクォートが
/// 偶数個（0を含む）となるカンマでのみ分割する。
/// 既知の制限: エスケープされた内部引用符（""）と、引用フィールド内の
/// 改行には対応しない
pub fn split_csv_line(line: &str) -> Vec<String> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        if b == b',' {
            let quotes_after = bytes[i + 1..].iter().filter(|&&c| c == b'"').count();
            if quotes_after % 2 == 0 {
                fields.push(clean_field(&line[start..i]));
                start = i + 1;
            }
        }
    }
    fields.push(clean_field(&line[start..]));

    fields
}

/// フィールドの外側1層の引用符を剥がしてトリム
///
/// 剥がすのは先頭・末尾それぞれ1つだけ（任意の層ではない）
fn clean_field(raw: &str) -> String {
    let s = raw.strip_prefix('"').unwrap_or(raw);
    let s = s.strip_suffix('"').unwrap_or(s);
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    // =============================================
    // validate_row テスト
    // =============================================

    #[test]
    fn test_validate_row_basic() {
        let row = vec![
            text("P1"),
            text("Necklace"),
            text("2"),
            text("http://a.com/1.jpg"),
            text("http://a.com/2.jpg"),
        ];

        let record = validate_row(&row).unwrap();
        assert_eq!(record.id, "P1");
        assert_eq!(record.category, "Necklace");
        assert_eq!(record.image_count, 2);
        assert_eq!(
            record.images,
            vec!["http://a.com/1.jpg", "http://a.com/2.jpg"]
        );
    }

    #[test]
    fn test_validate_row_empty() {
        assert_eq!(validate_row(&[]), Err(SkipReason::EmptyRow));
        assert_eq!(
            validate_row(&[Cell::Empty, Cell::Empty]),
            Err(SkipReason::EmptyRow)
        );
    }

    #[test]
    fn test_validate_row_empty_id() {
        let row = vec![Cell::Empty, text("Ring"), text("1"), text("http://a.com")];
        assert_eq!(validate_row(&row), Err(SkipReason::EmptyId));
    }

    #[test]
    fn test_validate_row_no_images() {
        // IDがあっても有効な画像URLがなければ行ごと捨てる
        let row = vec![text("P1"), text("Ring"), text("1"), text("not-a-url")];
        assert_eq!(validate_row(&row), Err(SkipReason::NoImages));
    }

    #[test]
    fn test_validate_row_numeric_id_coerced() {
        // Excelでは商品IDが数値セルで届くことがある
        let row = vec![
            Cell::Number(1001.0),
            text("Ring"),
            Cell::Number(1.0),
            text("http://a.com/r.jpg"),
        ];

        let record = validate_row(&row).unwrap();
        assert_eq!(record.id, "1001");
        assert_eq!(record.image_count, 1);
    }

    #[test]
    fn test_validate_row_image_count_non_numeric() {
        let row = vec![text("P1"), text("Ring"), text("N/A"), text("http://a.com")];
        let record = validate_row(&row).unwrap();
        assert_eq!(record.image_count, 0);
    }

    #[test]
    fn test_validate_row_image_count_missing() {
        let row = vec![text("P1"), Cell::Empty, Cell::Empty, text("http://a.com")];
        let record = validate_row(&row).unwrap();
        assert_eq!(record.image_count, 0);
        assert_eq!(record.category, "");
    }

    #[test]
    fn test_validate_row_number_cell_not_url() {
        // 3列目以降の数値セルはURL候補にならない
        let row = vec![
            text("P1"),
            text("Ring"),
            text("1"),
            Cell::Number(42.0),
            text("  http://a.com/r.jpg  "),
        ];

        let record = validate_row(&row).unwrap();
        assert_eq!(record.images, vec!["http://a.com/r.jpg"]);
    }

    #[test]
    fn test_validate_row_https_accepted() {
        // プレフィックス判定は"http"リテラルなのでhttpsも通る
        let row = vec![text("P1"), text(""), text(""), text("https://a.com/r.jpg")];
        let record = validate_row(&row).unwrap();
        assert_eq!(record.images, vec!["https://a.com/r.jpg"]);
    }

    // =============================================
    // parse_rows テスト
    // =============================================

    #[test]
    fn test_parse_rows_skips_header() {
        // 先頭行はヘッダらしさを確認せず常にスキップ
        let rows = vec![
            vec![
                text("P0"),
                text("Looks like data"),
                text("1"),
                text("http://a.com/h.jpg"),
            ],
            vec![text("P1"), text("Ring"), text("1"), text("http://a.com/r.jpg")],
        ];

        let records = parse_rows(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "P1");
    }

    #[test]
    fn test_parse_rows_empty_input() {
        assert!(parse_rows(&[]).is_empty());
    }

    #[test]
    fn test_parse_rows_header_only() {
        let rows = vec![vec![text("id"), text("category")]];
        assert!(parse_rows(&rows).is_empty());
    }

    #[test]
    fn test_parse_rows_drops_invalid_silently() {
        let rows = vec![
            vec![text("header")],
            vec![Cell::Empty, text("Ring"), text("1"), text("http://a.com")],
            vec![text("P2"), text("Ring"), text("1"), text("no-url")],
            vec![text("P3"), text("Ring"), text("1"), text("http://b.com")],
        ];

        let records = parse_rows(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "P3");
    }

    // =============================================
    // split_csv_line テスト
    // =============================================

    #[test]
    fn test_split_csv_line_simple() {
        let fields = split_csv_line("a,b,c");
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_csv_line_quoted_comma() {
        let fields = split_csv_line(r#""P2","Ring, Gold","1","http://x.com/r.jpg""#);
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0], "P2");
        assert_eq!(fields[1], "Ring, Gold");
        assert_eq!(fields[2], "1");
        assert_eq!(fields[3], "http://x.com/r.jpg");
    }

    #[test]
    fn test_split_csv_line_strips_single_quote_layer() {
        // 剥がすのは1層だけ
        let fields = split_csv_line(r#"""P1"""#);
        assert_eq!(fields, vec![r#""P1""#]);
    }

    #[test]
    fn test_split_csv_line_trims_whitespace() {
        let fields = split_csv_line(" a , b ");
        assert_eq!(fields, vec!["a", "b"]);
    }

    #[test]
    fn test_split_csv_line_empty_fields() {
        let fields = split_csv_line("a,,c");
        assert_eq!(fields, vec!["a", "", "c"]);
    }

    #[test]
    fn test_split_csv_line_multibyte() {
        let fields = split_csv_line("P1,ネックレス,2,http://a.com/1.jpg");
        assert_eq!(fields[1], "ネックレス");
    }

    // =============================================
    // parse_csv テスト
    // =============================================

    #[test]
    fn test_parse_csv_round_trip() {
        let csv = "id,category,count,img1,img2\n\
                   P1,Necklace,2,http://a.com/1.jpg,http://a.com/2.jpg\n";

        let records = parse_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            ProductRecord {
                id: "P1".into(),
                category: "Necklace".into(),
                image_count: 2,
                images: vec!["http://a.com/1.jpg".into(), "http://a.com/2.jpg".into()],
            }
        );
    }

    #[test]
    fn test_parse_csv_quoted_category() {
        let csv = "id,category,count,img\n\
                   \"P2\",\"Ring, Gold\",\"1\",\"http://x.com/r.jpg\"\n";

        let records = parse_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Ring, Gold");
        assert_eq!(records[0].images, vec!["http://x.com/r.jpg"]);
    }

    #[test]
    fn test_parse_csv_empty_file() {
        assert!(parse_csv("").is_empty());
    }

    #[test]
    fn test_parse_csv_header_only() {
        // ヘッダのみのファイルは空リスト、エラーなし
        assert!(parse_csv("id,category,count,images\n").is_empty());
    }

    #[test]
    fn test_parse_csv_skips_blank_lines() {
        let csv = "id,cat,n,img\n\n  \nP1,Ring,1,http://a.com/r.jpg\n";
        let records = parse_csv(csv);
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_csv_drops_rows_without_images() {
        let csv = "id,cat,n,img\nP1,Ring,1,\nP2,Ring,1,http://a.com/r.jpg\n";
        let records = parse_csv(csv);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "P2");
    }

    #[test]
    fn test_parse_csv_non_numeric_count() {
        let csv = "id,cat,n,img\nP1,Ring,N/A,http://a.com/r.jpg\n";
        let records = parse_csv(csv);
        assert_eq!(records[0].image_count, 0);
    }
}
