//! Builder Module
//!
//! Fluent Builder APIを提供し、`Pipeline`インスタンスを段階的に構築する。

use log::{debug, warn};
use std::io::Read;

use crate::api::{Rejection, Verdict};
use crate::error::SheetPreviewError;
use crate::export::{CsvExporter, DownloadSink, ExportedFile};
use crate::ingest::SpreadsheetIngester;
use crate::types::{CellValue, FileMeta, ParsedTable};
use crate::validator::{FileValidator, ValidationPolicy};

/// パイプラインの設定を保持する内部構造体
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PipelineConfig {
    /// ファイル受け入れポリシー
    pub policy: ValidationPolicy,

    /// ベース名が空の場合のエクスポートファイル名
    pub default_export_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policy: ValidationPolicy::default(),
            default_export_name: "export".to_string(),
        }
    }
}

/// アップロードされたファイル
///
/// メタデータと、内容を読み出すためのリーダーの組です。
/// リーダーは検証で受け入れられた後にのみ読み出されます。
#[derive(Debug)]
pub struct Upload<R> {
    /// ファイルのメタデータ
    pub meta: FileMeta,

    /// ファイル内容のリーダー
    pub reader: R,
}

impl<R: Read> Upload<R> {
    /// 新しいアップロードを生成
    pub fn new(meta: FileMeta, reader: R) -> Self {
        Self { meta, reader }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetpreview::PipelineBuilder;
///
/// # fn main() -> Result<(), sheetpreview::SheetPreviewError> {
/// let pipeline = PipelineBuilder::new()
///     .with_max_file_size(10 * 1024 * 1024)
///     .with_default_export_name("download")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    /// 内部設定（構築中）
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 最大ファイルサイズ: 5MiB
    /// - 許可MIMEタイプ: xlsx、xls、`text/csv`
    /// - 許可拡張子: `.xlsx`、`.xls`、`.csv`
    /// - デフォルトのエクスポート名: `export`
    pub fn new() -> Self {
        Self::default()
    }

    /// 最大ファイルサイズ（バイト）を指定する
    pub fn with_max_file_size(mut self, max_bytes: u64) -> Self {
        self.config.policy.max_file_size = max_bytes;
        self
    }

    /// 許可するMIMEタイプを置き換える
    pub fn with_allowed_mime_types<I, S>(mut self, mime_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.policy.allowed_mime_types = mime_types.into_iter().map(Into::into).collect();
        self
    }

    /// 許可する拡張子を置き換える（`.`付きで指定）
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use sheetpreview::PipelineBuilder;
    ///
    /// let builder = PipelineBuilder::new().with_allowed_extensions([".csv"]);
    /// ```
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.policy.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// ベース名が空の場合のエクスポートファイル名（拡張子なし）を指定する
    pub fn with_default_export_name(mut self, name: impl Into<String>) -> Self {
        self.config.default_export_name = name.into();
        self
    }

    /// 設定を検証し、`Pipeline`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `SheetPreviewError::Config(String)`: 設定の検証に失敗した場合
    ///   * 最大ファイルサイズが0
    ///   * 拡張子が空、または`.`で始まらない
    ///   * デフォルトのエクスポート名が空
    pub fn build(self) -> Result<Pipeline, SheetPreviewError> {
        // 1. サイズ上限の検証
        if self.config.policy.max_file_size == 0 {
            return Err(SheetPreviewError::Config(
                "max file size must be greater than 0".to_string(),
            ));
        }

        // 2. 拡張子の検証
        for ext in &self.config.policy.allowed_extensions {
            if ext.len() < 2 || !ext.starts_with('.') {
                return Err(SheetPreviewError::Config(format!(
                    "Invalid extension: '{}' (expected a leading '.')",
                    ext
                )));
            }
        }

        // 3. エクスポート名の検証
        if self.config.default_export_name.is_empty() {
            return Err(SheetPreviewError::Config(
                "default export name must not be empty".to_string(),
            ));
        }

        Ok(Pipeline::new(self.config))
    }
}

/// 検証・取り込み・エクスポート処理のファサード
///
/// # 使用例
///
/// ```rust
/// use sheetpreview::{FileMeta, PipelineBuilder, Upload};
///
/// # fn main() -> Result<(), sheetpreview::SheetPreviewError> {
/// let pipeline = PipelineBuilder::new().build()?;
/// let bytes: &[u8] = b"Name,Age\nAna,30\n";
/// let upload = Upload::new(FileMeta::new("people.csv", "text/csv", bytes.len() as u64), bytes);
///
/// let table = pipeline.load(upload)?;
/// assert_eq!(table.headers, vec!["Name", "Age"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    validator: FileValidator,
    ingester: SpreadsheetIngester,
    exporter: CsvExporter,
}

impl Pipeline {
    pub(crate) fn new(config: PipelineConfig) -> Self {
        Self {
            validator: FileValidator::new(config.policy),
            ingester: SpreadsheetIngester,
            exporter: CsvExporter::new(config.default_export_name),
        }
    }

    /// ファイルのメタデータを検証する
    pub fn validate(&self, meta: &FileMeta) -> Verdict {
        self.validator.validate(meta)
    }

    /// メモリ上のバイト列を取り込む
    pub fn ingest(&self, file_name: &str, bytes: &[u8]) -> Result<ParsedTable, SheetPreviewError> {
        self.ingester.ingest(file_name, bytes)
    }

    /// アップロードを検証し、内容を読み込んで取り込む
    ///
    /// # 処理フロー
    ///
    /// 1. メタデータの検証（拒否された場合はリーダーを読まない）
    /// 2. リーダーからファイル全体を読み込む
    /// 3. 実際に読み込んだサイズを上限と再照合
    /// 4. 取り込み
    ///
    /// # 戻り値
    ///
    /// * `Ok(ParsedTable)` - 取り込みに成功した場合
    /// * `Err(SheetPreviewError::ValidationRejected)` - 検証で拒否された場合
    /// * `Err(SheetPreviewError::Read)` - 読み込みに失敗した場合
    /// * `Err(SheetPreviewError::Decode | EmptyDocument)` - 取り込みに失敗した場合
    pub fn load<R: Read>(&self, upload: Upload<R>) -> Result<ParsedTable, SheetPreviewError> {
        let (meta, bytes) = self.read_upload(upload)?;
        self.ingest(&meta.file_name, &bytes)
    }

    /// アップロードを検証し、上限サイズの範囲でファイル全体を読み込む
    ///
    /// 取り込みは行いません。`load`の前半部分に相当します。
    ///
    /// # 戻り値
    ///
    /// * `Ok((FileMeta, Vec<u8>))` - 読み込みに成功した場合
    /// * `Err(SheetPreviewError::ValidationRejected)` - メタデータまたは実際のサイズで拒否された場合
    /// * `Err(SheetPreviewError::Read)` - 読み込みに失敗した場合
    pub fn read_upload<R: Read>(
        &self,
        upload: Upload<R>,
    ) -> Result<(FileMeta, Vec<u8>), SheetPreviewError> {
        let Upload { meta, reader } = upload;

        if let Verdict::Rejected(rejection) = self.validate(&meta) {
            return Err(SheetPreviewError::ValidationRejected(rejection));
        }

        let bytes = self.read_limited(reader)?;
        debug!("read {} bytes from '{}'", bytes.len(), meta.file_name);

        Ok((meta, bytes))
    }

    /// ヘッダーとデータ行をCSVとしてエクスポートする
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
        self.exporter.export(headers, rows, base_name, sink)
    }

    /// 上限を1バイト超えるところまで読み込み、申告と異なる大きなファイルを拒否する
    fn read_limited<R: Read>(&self, reader: R) -> Result<Vec<u8>, SheetPreviewError> {
        let max = self.validator.max_file_size();
        let mut buffer = Vec::new();
        reader
            .take(max.saturating_add(1))
            .read_to_end(&mut buffer)
            .map_err(SheetPreviewError::Read)?;

        if buffer.len() as u64 > max {
            warn!("content exceeds declared size limit of {} bytes", max);
            return Err(SheetPreviewError::ValidationRejected(Rejection::TooLarge {
                size_bytes: buffer.len() as u64,
                max_bytes: max,
            }));
        }
        Ok(buffer)
    }
}
