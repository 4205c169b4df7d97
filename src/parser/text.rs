//! CSVテキストのデコード

use crate::error::DecodeError;
use crate::types::{CellValue, Grid};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSVテキストをグリッドにデコードする
///
/// 先頭行も通常のレコードとして読み込みます（ヘッダー分割は取り込み側の責務）。
/// 列数の異なる行は許容し、空フィールドは`CellValue::Empty`になります。
/// 値の型推論は行わず、すべて文字列として保持します。
pub(super) fn decode_csv(bytes: &[u8]) -> Result<Grid, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }

    Ok(Grid::from_rows(rows))
}
