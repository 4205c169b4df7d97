//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::fmt;

/// セルの値を表す列挙型
///
/// JSONでは型タグなしで表現されます（文字列・数値・論理値・`null`）。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// 文字列
    Text(String),

    /// 数値（f64）
    Number(f64),

    /// 論理値
    Bool(bool),

    /// 空セル
    #[default]
    Empty,
}

impl CellValue {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 表示用の文字列に変換
    ///
    /// 空セルは常に空文字列になります（`"null"`等の文字列にはなりません）。
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

/// 数値を表示用に書き出す
///
/// `-0`は`0`、絶対値が`1e21`以上または`1e-6`未満の値は指数表記（`1e+21`, `1e-7`）。
/// それ以外は往復可能な最短の10進表記です。
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n == 0.0 {
        return f.write_str("0");
    }
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let abs = n.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                write!(f, "{}e+{}", mantissa, power)
            }
            _ => f.write_str(&exp),
        }
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write_number(f, *n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// デコード済みのセルグリッド（行 × 列）
///
/// 構築時に短い行は`CellValue::Empty`で最大列数まで埋められます。
/// 0行のグリッドも有効です。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    /// 行データからグリッドを構築（短い行はパディング）
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows }
    }

    /// 行数
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// 列数
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// 行が1つも存在しないか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行のスライスを取得
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// 行データを取り出す
    pub fn into_rows(self) -> Vec<Vec<CellValue>> {
        self.rows
    }
}

/// ヘッダー行とデータ行に分割されたテーブル
///
/// 取り込み1回ごとに新しく生成され、呼び出し側の状態に保持されます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    /// 元のファイル名
    pub file_name: String,

    /// ヘッダー（グリッドの0行目を文字列化したもの）
    pub headers: Vec<String>,

    /// データ行（グリッドの1行目以降、元のセル値を保持）
    pub rows: Vec<Vec<CellValue>>,
}

impl ParsedTable {
    /// データ行を表示用文字列に変換
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellValue::to_display_string).collect())
            .collect()
    }
}

/// アップロード候補ファイルのメタデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMeta {
    /// 申告されたファイルサイズ（バイト）
    pub size_bytes: u64,

    /// 申告されたMIMEタイプ（空の場合あり）
    pub mime_type: String,

    /// ファイル名
    pub file_name: String,
}

impl FileMeta {
    /// 新しいメタデータを生成
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            size_bytes,
            mime_type: mime_type.into(),
            file_name: file_name.into(),
        }
    }
}
