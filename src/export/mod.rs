//! Export Module
//!
//! ヘッダーとデータ行をCSVテキストにシリアライズし、
//! ホスト環境のダウンロード処理（`DownloadSink`）に引き渡すモジュール。

mod sink;

use log::info;

use crate::error::SheetPreviewError;
use crate::types::CellValue;

pub use sink::{DirectorySink, DownloadSink};

/// 出力ファイルのMIMEタイプ
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// 出力ファイル名の拡張子
const CSV_EXTENSION: &str = ".csv";

/// ダウンロード対象のCSVファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// ファイル名（`.csv`付き）
    pub file_name: String,

    /// MIMEタイプ（常に`text/csv;charset=utf-8`）
    pub mime_type: &'static str,

    /// CSVテキスト
    pub contents: String,
}

/// CSVエクスポーター
///
/// すべてのフィールドを無条件にダブルクォートで囲み、内部のダブルクォートは
/// 2つに重ねてエスケープします（条件付きクォートは行いません）。
/// 行は`\n`で連結され、末尾に改行は付きません。
#[derive(Debug, Clone)]
pub struct CsvExporter {
    default_name: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new("export")
    }
}

impl CsvExporter {
    pub(crate) fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
        }
    }

    /// ヘッダー行とデータ行をCSVテキストに変換する
    ///
    /// 行・フィールドの順序はそのまま維持され、並べ替えやトリムは行いません。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use sheetpreview::{CellValue, CsvExporter};
    ///
    /// let csv = CsvExporter::to_csv(&["A", "B"], &[vec![CellValue::from("1"), CellValue::from("2")]])
    ///     .unwrap();
    /// assert_eq!(csv, "\"A\",\"B\"\n\"1\",\"2\"");
    /// ```
    pub fn to_csv<S: AsRef<str>>(
        headers: &[S],
        rows: &[Vec<CellValue>],
    ) -> Result<String, SheetPreviewError> {
        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .double_quote(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(Vec::new());

        write_line(&mut writer, headers.iter().map(|h| h.as_ref()))?;
        for row in rows {
            write_line(&mut writer, row.iter().map(CellValue::to_display_string))?;
        }

        let buffer = writer
            .into_inner()
            .map_err(|e| SheetPreviewError::Io(e.into_error()))?;
        let mut text = String::from_utf8(buffer).map_err(|e| {
            SheetPreviewError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    /// 出力ファイル名を決定する（空のベース名はデフォルト名に置き換え）
    pub fn file_name(&self, base_name: &str) -> String {
        let base = if base_name.is_empty() {
            self.default_name.as_str()
        } else {
            base_name
        };
        format!("{}{}", base, CSV_EXTENSION)
    }

    /// CSVを生成してダウンロード先に引き渡す
    ///
    /// 空のヘッダーや行の検査は呼び出し側の責務です。
    ///
    /// # 引数
    ///
    /// * `headers` - ヘッダー行
    /// * `rows` - データ行
    /// * `base_name` - 拡張子なしのファイル名（空の場合はデフォルト名）
    /// * `sink` - ダウンロード先
    ///
    /// # 戻り値
    ///
    /// * `Ok(ExportedFile)` - ダウンロード先への引き渡しに成功した場合
    /// * `Err(SheetPreviewError::Io)` - ダウンロード先への書き込みに失敗した場合
    pub fn export<S, D>(
        &self,
        headers: &[S],
        rows: &[Vec<CellValue>],
        base_name: &str,
        sink: &mut D,
    ) -> Result<ExportedFile, SheetPreviewError>
    where
        S: AsRef<str>,
        D: DownloadSink + ?Sized,
    {
        let file = ExportedFile {
            file_name: self.file_name(base_name),
            mime_type: CSV_MIME_TYPE,
            contents: Self::to_csv(headers, rows)?,
        };

        sink.save(&file)?;
        info!(
            "exported {} rows to '{}' ({} bytes)",
            rows.len(),
            file.file_name,
            file.contents.len()
        );
        Ok(file)
    }
}

/// アップロード時のファイル名からエクスポート用のベース名を求める
///
/// 最後の拡張子（`.xlsx`など）のみを取り除きます。拡張子部分が空の場合や
/// パス区切りを含む場合はそのまま返します。結果が空になった場合は
/// `CsvExporter::file_name`がデフォルト名に置き換えます。
pub fn export_base_name(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if !file_name[idx + 1..].is_empty() => {
            let ext = &file_name[idx + 1..];
            if ext.contains('/') {
                file_name
            } else {
                &file_name[..idx]
            }
        }
        _ => file_name,
    }
}

/// 1レコードを書き込む
///
/// フィールドが0個のレコードは空行として出力します（`csv::Writer`は`""`を書くため）。
fn write_line<I, T>(writer: &mut csv::Writer<Vec<u8>>, fields: I) -> Result<(), SheetPreviewError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut fields = fields.into_iter().peekable();
    if fields.peek().is_none() {
        writer.flush()?;
        writer.get_mut().push(b'\n');
        return Ok(());
    }
    writer.write_record(fields).map_err(csv_to_io)
}

fn csv_to_io(err: csv::Error) -> SheetPreviewError {
    SheetPreviewError::Io(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_to_csv_always_quotes() {
        let csv = CsvExporter::to_csv(&["A", "B"], &[vec![text("1"), text("2")]]).unwrap();
        assert_eq!(csv, "\"A\",\"B\"\n\"1\",\"2\"");
    }

    #[test]
    fn test_to_csv_doubles_embedded_quotes() {
        let csv = CsvExporter::to_csv(&["say"], &[vec![text("he said \"hi\"")]]).unwrap();
        assert_eq!(csv, "\"say\"\n\"he said \"\"hi\"\"\"");
    }

    #[test]
    fn test_to_csv_non_text_cells() {
        let csv = CsvExporter::to_csv(
            &["n", "b", "e"],
            &[vec![CellValue::Number(2.5), CellValue::Bool(false), CellValue::Empty]],
        )
        .unwrap();
        assert_eq!(csv, "\"n\",\"b\",\"e\"\n\"2.5\",\"false\",\"\"");
    }

    #[test]
    fn test_to_csv_preserves_order_and_whitespace() {
        let csv = CsvExporter::to_csv(
            &["z", "a"],
            &[vec![text(" b "), text("a,c")], vec![text("1"), text("0")]],
        )
        .unwrap();
        assert_eq!(csv, "\"z\",\"a\"\n\" b \",\"a,c\"\n\"1\",\"0\"");
    }

    #[test]
    fn test_to_csv_headers_only() {
        let csv = CsvExporter::to_csv(&["only"], &[]).unwrap();
        assert_eq!(csv, "\"only\"");
    }

    #[test]
    fn test_to_csv_empty_records_are_blank_lines() {
        assert_eq!(CsvExporter::to_csv::<&str>(&[], &[]).unwrap(), "");
        assert_eq!(CsvExporter::to_csv::<&str>(&[], &[vec![]]).unwrap(), "\n");
        assert_eq!(CsvExporter::to_csv(&["A"], &[vec![]]).unwrap(), "\"A\"\n");
        assert_eq!(
            CsvExporter::to_csv(&["A"], &[vec![], vec![text("1")]]).unwrap(),
            "\"A\"\n\n\"1\""
        );
    }

    #[test]
    fn test_file_name() {
        let exporter = CsvExporter::default();
        assert_eq!(exporter.file_name("out"), "out.csv");
        assert_eq!(exporter.file_name(""), "export.csv");

        let custom = CsvExporter::new("download");
        assert_eq!(custom.file_name(""), "download.csv");
    }

    #[test]
    fn test_export_base_name() {
        assert_eq!(export_base_name("report.xlsx"), "report");
        assert_eq!(export_base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(export_base_name("noext"), "noext");
        assert_eq!(export_base_name(".csv"), "");
        assert_eq!(export_base_name("trailing."), "trailing.");
        assert_eq!(export_base_name("dir.v2/file"), "dir.v2/file");
        assert_eq!(export_base_name(""), "");
    }

    #[test]
    fn test_export_to_memory_sink() {
        let mut sink: Vec<ExportedFile> = Vec::new();
        let file = CsvExporter::default()
            .export(&["A", "B"], &[vec![text("1"), text("2")]], "out", &mut sink)
            .unwrap();

        assert_eq!(file.file_name, "out.csv");
        assert_eq!(file.mime_type, "text/csv;charset=utf-8");
        assert_eq!(sink, vec![file]);
    }
}
