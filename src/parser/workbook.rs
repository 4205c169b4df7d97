//! Workbook Parser
//!
//! calamineを使用したワークブック（xlsx / xls / xlsb / ods）のデコード。

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use log::debug;
use std::io::Cursor;

use crate::error::DecodeError;
use crate::types::{CellValue, Grid};

/// ワークブックの最初のシートをグリッドにデコードする
///
/// 形式の判別はcalamineの自動検出に委ねます。シートが1つも存在しない
/// ワークブックは0行のグリッドとして扱います。
pub(super) fn decode_first_sheet(bytes: &[u8]) -> Result<Grid, DecodeError> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet_names = sheets.sheet_names();
    debug!("workbook sheets: {:?}", sheet_names);

    let range = match sheets.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Grid::default()),
    };

    let rows = range
        .rows()
        .map(|row| row.iter().map(convert_data).collect())
        .collect();

    Ok(Grid::from_rows(rows))
}

/// calamineのセル値を`CellValue`に変換
///
/// 日付セルはExcelのシリアル値（数値）のまま保持します。
/// 整数セルは`f64`に変換するため、絶対値が2^53を超える値は精度が失われます
/// （Excel自体の数値も倍精度のため、実データでは問題になりません）。
fn convert_data(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_convert_data() {
        assert_eq!(convert_data(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(convert_data(&Data::Float(1.25)), CellValue::Number(1.25));
        assert_eq!(
            convert_data(&Data::String("abc".to_string())),
            CellValue::from("abc")
        );
        assert_eq!(convert_data(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(convert_data(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_data(&Data::Error(calamine::CellErrorType::Div0)),
            CellValue::from("#DIV/0!")
        );
    }

    #[test]
    fn test_decode_first_sheet_only() {
        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.write_string(0, 0, "First").unwrap();
        first.write_number(1, 0, 1.0).unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "Second").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = decode_first_sheet(&bytes).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rows()[0][0], CellValue::from("First"));
        assert_eq!(grid.rows()[1][0], CellValue::Number(1.0));
    }

    #[test]
    fn test_decode_empty_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let grid = decode_first_sheet(&bytes).unwrap();
        assert!(grid.is_empty());
    }
}
