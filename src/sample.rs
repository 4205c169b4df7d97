//! Sample Dataset
//!
//! ファイルを用意しなくても動作を確認できる組み込みのサンプルデータ。

use crate::types::ParsedTable;

const SAMPLE_JSON: &str = include_str!("sample_data.json");

/// 組み込みのサンプルテーブルを返す
pub fn sample_table() -> Result<ParsedTable, serde_json::Error> {
    serde_json::from_str(SAMPLE_JSON)
}
