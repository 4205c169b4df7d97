//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

use crate::api::Rejection;

/// sheetpreviewクレート全体で使用するエラー型
///
/// ファイルの検証、読み込み、解析、CSV出力中に発生するすべてのエラーを
/// 統一的に扱うために使用されます。いずれのエラーも致命的ではなく、
/// 利用者が別のファイルを選択し直すことで回復できます。
///
/// # エラーの種類
///
/// - `ValidationRejected`: サイズまたは種類のポリシー違反（解析前に検出）
/// - `Decode`: スプレッドシートのバイト列を解釈できなかった
/// - `EmptyDocument`: 解析結果に行が1つも存在しない
/// - `Read`: アップロードされたファイルのバイト列取得に失敗した
/// - `Io`: ダウンロード先への書き込みなど、その他のI/Oエラー
/// - `Config`: 設定の検証に失敗した
///
/// # 使用例
///
/// ```rust,no_run
/// use sheetpreview::{PipelineBuilder, SheetPreviewError};
///
/// # fn main() -> Result<(), SheetPreviewError> {
/// let pipeline = PipelineBuilder::new().build()?;
/// match pipeline.ingest("empty.csv", b"") {
///     Err(SheetPreviewError::EmptyDocument) => println!("行がありません"),
///     other => println!("{:?}", other),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Error, Debug)]
pub enum SheetPreviewError {
    /// ファイルのメタデータが受け入れポリシーに違反した
    #[error("Validation rejected: {0}")]
    ValidationRejected(Rejection),

    /// デコーダーがバイト列を解釈できなかった
    #[error("Failed to parse spreadsheet: {0}")]
    Decode(#[from] DecodeError),

    /// デコード結果のグリッドが0行だった
    ///
    /// 一般的な解析失敗（`Decode`）とは区別して報告されます。
    #[error("Document has no rows")]
    EmptyDocument,

    /// アップロードされたファイルの読み込みに失敗した
    #[error("Could not read file: {0}")]
    Read(#[source] std::io::Error),

    /// I/O操作中に発生したエラー（ダウンロード先への書き込み失敗など）
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `PipelineBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// ```rust,no_run
    /// use sheetpreview::{PipelineBuilder, SheetPreviewError};
    ///
    /// let result = PipelineBuilder::new().with_max_file_size(0).build();
    /// assert!(matches!(result, Err(SheetPreviewError::Config(_))));
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SheetPreviewError {
    /// 画面上のアラートに表示するメッセージ
    ///
    /// 検証エラーは利用者向けの案内文、それ以外は`Display`と同じ文字列を返します。
    pub fn user_message(&self) -> String {
        match self {
            SheetPreviewError::ValidationRejected(rejection) => rejection.user_message(),
            other => other.to_string(),
        }
    }
}

/// デコーダー由来のエラー
#[derive(Error, Debug)]
pub enum DecodeError {
    /// ワークブック形式（xlsx/xls等）の解析エラー（calamine由来）
    #[error("{0}")]
    Workbook(#[from] calamine::Error),

    /// CSVテキストの解析エラー（不正なUTF-8など）
    #[error("{0}")]
    Csv(#[from] csv::Error),
}
