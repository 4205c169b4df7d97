//! Ingest Module
//!
//! デコード済みグリッドの0行目をヘッダー、それ以降をデータ行として
//! `ParsedTable`を生成するモジュール。

use log::info;

use crate::error::SheetPreviewError;
use crate::parser;
use crate::types::{Grid, ParsedTable};

/// スプレッドシートの取り込み処理
///
/// 状態を持たず、同じバイト列に対しては常に同じ`ParsedTable`を返します。
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetIngester;

impl SpreadsheetIngester {
    /// バイト列を解析して`ParsedTable`を生成する
    ///
    /// # 引数
    ///
    /// * `file_name` - 元のファイル名（結果に記録される）
    /// * `bytes` - メモリ上に読み込み済みのファイル全体
    ///
    /// # 戻り値
    ///
    /// * `Ok(ParsedTable)` - 1行以上のグリッドが得られた場合（ヘッダーのみでも成功）
    /// * `Err(SheetPreviewError::Decode)` - バイト列を解釈できなかった場合
    /// * `Err(SheetPreviewError::EmptyDocument)` - グリッドが0行だった場合
    pub fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<ParsedTable, SheetPreviewError> {
        let grid = parser::decode(bytes)?;
        let table = split_header(file_name, grid)?;

        info!(
            "ingested '{}': {} columns, {} data rows",
            table.file_name,
            table.headers.len(),
            table.rows.len()
        );
        Ok(table)
    }
}

/// グリッドをヘッダー行とデータ行に分割する
fn split_header(file_name: &str, grid: Grid) -> Result<ParsedTable, SheetPreviewError> {
    let mut rows = grid.into_rows().into_iter();
    let header_row = rows.next().ok_or(SheetPreviewError::EmptyDocument)?;

    Ok(ParsedTable {
        file_name: file_name.to_string(),
        headers: header_row.iter().map(|cell| cell.to_display_string()).collect(),
        rows: rows.collect(),
    })
}
