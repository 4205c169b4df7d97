//! Preview Module
//!
//! 取り込んだテーブルを固定幅のテキスト表として描画するモジュール。
//! 全角文字（日本語など）は表示幅2として列幅を揃えます。

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::error::SheetPreviewError;
use crate::types::CellValue;

/// ヘッダーまたはデータ行が空の場合に出力する文言
pub const EMPTY_STATE_MESSAGE: &str = "No data to display";

/// テーブルをテキスト表として出力する
///
/// # 引数
///
/// * `headers` - ヘッダー行
/// * `rows` - データ行
/// * `writer` - 出力先のライター
/// * `max_rows` - 出力するデータ行の上限（`None`の場合はすべて）
///
/// # 戻り値
///
/// * `Ok(())` - 出力に成功した場合
/// * `Err(SheetPreviewError)` - 書き込みに失敗した場合
///
/// # 出力例
///
/// ```text
/// | Name | Age |
/// |------|-----|
/// | Ana  | 30  |
/// ```
pub fn render_table<S, W>(
    headers: &[S],
    rows: &[Vec<CellValue>],
    writer: &mut W,
    max_rows: Option<usize>,
) -> Result<(), SheetPreviewError>
where
    S: AsRef<str>,
    W: Write,
{
    if headers.is_empty() || rows.is_empty() {
        writeln!(writer, "{}", EMPTY_STATE_MESSAGE)?;
        return Ok(());
    }

    let shown = max_rows.map_or(rows.len(), |max| max.min(rows.len()));

    // 1. 表示用文字列への変換（改行は空白に置換）
    let header_cells: Vec<String> = headers.iter().map(|h| single_line(h.as_ref())).collect();
    let body_cells: Vec<Vec<String>> = rows[..shown]
        .iter()
        .map(|row| row.iter().map(|cell| single_line(&cell.to_string())).collect())
        .collect();

    // 2. 列幅の計算
    let cols = header_cells
        .len()
        .max(body_cells.iter().map(Vec::len).max().unwrap_or(0));
    let col_widths = calculate_column_widths(&header_cells, &body_cells, cols);

    // 3. 各行の出力
    write_row(writer, &header_cells, &col_widths)?;
    writeln!(writer, "{}", generate_separator(&col_widths))?;
    for row in &body_cells {
        write_row(writer, row, &col_widths)?;
    }

    if shown < rows.len() {
        writeln!(writer, "... {} more rows", rows.len() - shown)?;
    }

    writer.flush()?;
    Ok(())
}

/// テーブルを文字列として描画する
pub fn render_table_to_string<S: AsRef<str>>(
    headers: &[S],
    rows: &[Vec<CellValue>],
    max_rows: Option<usize>,
) -> Result<String, SheetPreviewError> {
    let mut buffer = Vec::new();
    render_table(headers, rows, &mut buffer, max_rows)?;
    String::from_utf8(buffer).map_err(|e| {
        SheetPreviewError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

fn single_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// 列ごとの最大表示幅を計算（最小幅は3文字）
fn calculate_column_widths(headers: &[String], rows: &[Vec<String>], cols: usize) -> Vec<usize> {
    let mut widths = vec![3; cols];

    for row in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (col_idx, cell) in row.iter().enumerate() {
            widths[col_idx] = widths[col_idx].max(cell.width());
        }
    }

    widths
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> std::io::Result<()> {
    write!(writer, "|")?;
    for (col_idx, &width) in widths.iter().enumerate() {
        let content = cells.get(col_idx).map_or("", String::as_str);
        let padding = width.saturating_sub(content.width());
        write!(writer, " {}{} |", content, " ".repeat(padding))?;
    }
    writeln!(writer)
}

fn generate_separator(col_widths: &[usize]) -> String {
    let mut separator = String::from("|");
    for &width in col_widths {
        separator.push_str(&"-".repeat(width + 2));
        separator.push('|');
    }
    separator
}
