//! sheetpreview - Spreadsheet upload validation, table preview and CSV export
//!
//! アップロードされたスプレッドシート（.xlsx / .xls / .csv）を検証・取り込みし、
//! テーブルとしてプレビューしたうえでCSVとして再エクスポートするためのクレートです。
//!
//! 処理は次の3段階で構成されます。
//!
//! 1. **検証** (`FileValidator`): サイズとMIMEタイプ／拡張子のみで判定（内容は読まない）
//! 2. **取り込み** (`SpreadsheetIngester`): バイト列をグリッドにデコードし、0行目をヘッダーに分割
//! 3. **エクスポート** (`CsvExporter`): 全フィールドをクォートしたCSVを`DownloadSink`に引き渡す
//!
//! # Quick Start
//!
//! ```rust
//! use sheetpreview::{ExportedFile, FileMeta, PipelineBuilder, Upload};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = PipelineBuilder::new().build()?;
//!
//!     let bytes: &[u8] = b"Name,Age\nAna,30\n";
//!     let meta = FileMeta::new("people.csv", "text/csv", bytes.len() as u64);
//!     let table = pipeline.load(Upload::new(meta, bytes))?;
//!
//!     let mut downloads: Vec<ExportedFile> = Vec::new();
//!     let file = pipeline.export(&table.headers, &table.rows, "people", &mut downloads)?;
//!     assert_eq!(file.file_name, "people.csv");
//!     assert_eq!(file.contents, "\"Name\",\"Age\"\n\"Ana\",\"30\"");
//!
//!     Ok(())
//! }
//! ```
//!
//! # State and Alerts
//!
//! ```rust
//! use sheetpreview::{ExportedFile, PipelineBuilder, Store, Workspace};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let workspace = Workspace::new(PipelineBuilder::new().build()?);
//!     let mut store = Store::new();
//!
//!     workspace.load_sample_data(&mut store)?;
//!     println!("{:?}", store.state().ui.alert);
//!
//!     let mut downloads: Vec<ExportedFile> = Vec::new();
//!     workspace.handle_export(&mut store, &mut downloads)?;
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod export;
mod ingest;
mod parser;
mod preview;
mod sample;
mod store;
mod types;
mod validator;
mod workspace;

// 公開API
pub use api::{DocumentFormat, Rejection, Severity, Verdict};
pub use builder::{Pipeline, PipelineBuilder, Upload};
pub use error::{DecodeError, SheetPreviewError};
pub use export::{
    export_base_name, CsvExporter, DirectorySink, DownloadSink, ExportedFile, CSV_MIME_TYPE,
};
pub use ingest::SpreadsheetIngester;
pub use parser::{decode, detect_format};
pub use preview::{render_table, render_table_to_string, EMPTY_STATE_MESSAGE};
pub use sample::sample_table;
pub use store::{Action, Alert, AppState, DataState, Store, SubscriptionId, UiState};
pub use types::{CellValue, FileMeta, Grid, ParsedTable};
pub use validator::{
    FileValidator, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_ALLOWED_MIME_TYPES, DEFAULT_MAX_FILE_SIZE,
};
pub use workspace::{
    Workspace, EXPORT_SUCCESS_MESSAGE, NO_DATA_MESSAGE, SAMPLE_LOADED_MESSAGE,
    UPLOAD_SUCCESS_MESSAGE,
};
