//! Workspace Module
//!
//! アップロード・サンプル読み込み・エクスポートの各操作を`Pipeline`と`Store`に
//! 結び付けるコントローラー。結果は`Store`の状態とアラートとして反映されます。

use log::{info, warn};
use std::io::Read;

use crate::api::{Rejection, Severity, Verdict};
use crate::builder::{Pipeline, Upload};
use crate::error::SheetPreviewError;
use crate::export::{export_base_name, DownloadSink, ExportedFile};
use crate::sample::sample_table;
use crate::store::{Action, Alert, Store};

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File successfully uploaded";
pub const SAMPLE_LOADED_MESSAGE: &str = "Sample data loaded successfully";
pub const NO_DATA_MESSAGE: &str = "No data to export";
pub const EXPORT_SUCCESS_MESSAGE: &str = "Data exported successfully";

/// アップロード・エクスポート操作のコントローラー
///
/// 自身は状態を持たず、操作ごとに呼び出し側が所有する`Store`を受け取ります。
/// 処理は逐次的で、1回のアップロードが完了するまで次の操作は呼ばれない前提です。
#[derive(Debug, Clone)]
pub struct Workspace {
    pipeline: Pipeline,
}

impl Workspace {
    /// パイプラインを指定して生成
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// 使用しているパイプライン
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// 選択されたファイルを検証・取り込みし、結果を状態に反映する
    ///
    /// * 検証で拒否された場合（実際の内容が上限を超えた場合を含む）は警告アラートを
    ///   表示し、データの状態は変更しません。
    /// * 取り込みに失敗した場合はエラーを設定しますが、以前に読み込んだテーブルは保持します。
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 取り込みに成功した場合
    /// * `Err(SheetPreviewError)` - 失敗した場合（状態にも反映済み）
    pub fn handle_upload<R: Read>(
        &self,
        store: &mut Store,
        upload: Upload<R>,
    ) -> Result<(), SheetPreviewError> {
        if let Verdict::Rejected(rejection) = self.pipeline.validate(&upload.meta) {
            return Err(reject(store, rejection));
        }

        store.dispatch(Action::SetLoading(true));

        let (meta, bytes) = match self.pipeline.read_upload(upload) {
            Ok(read) => read,
            Err(SheetPreviewError::ValidationRejected(rejection)) => {
                store.dispatch(Action::SetLoading(false));
                return Err(reject(store, rejection));
            }
            Err(err) => return Err(fail(store, err)),
        };

        store.dispatch(Action::ClearError);

        match self.pipeline.ingest(&meta.file_name, &bytes) {
            Ok(table) => {
                store.dispatch(Action::SetFileData(table));
                store.dispatch(Action::ShowAlert(Alert::new(
                    UPLOAD_SUCCESS_MESSAGE,
                    Severity::Success,
                )));
                Ok(())
            }
            Err(err) => Err(fail(store, err)),
        }
    }

    /// 組み込みのサンプルデータを読み込む
    pub fn load_sample_data(&self, store: &mut Store) -> Result<(), SheetPreviewError> {
        let table = sample_table().map_err(|e| {
            SheetPreviewError::Config(format!("Invalid sample dataset: {}", e))
        })?;

        info!("loaded sample dataset '{}'", table.file_name);
        store.dispatch(Action::SetFileData(table));
        store.dispatch(Action::ShowAlert(Alert::new(
            SAMPLE_LOADED_MESSAGE,
            Severity::Success,
        )));
        Ok(())
    }

    /// 読み込み済みのデータをCSVとしてエクスポートする
    ///
    /// ヘッダーまたはデータ行が空の場合はエクスポーターを呼ばずに警告アラートを
    /// 表示し、`Ok(None)`を返します。
    pub fn handle_export<D>(
        &self,
        store: &mut Store,
        sink: &mut D,
    ) -> Result<Option<ExportedFile>, SheetPreviewError>
    where
        D: DownloadSink + ?Sized,
    {
        let data = &store.state().data;
        if !data.has_data() {
            store.dispatch(Action::ShowAlert(Alert::new(NO_DATA_MESSAGE, Severity::Warning)));
            return Ok(None);
        }

        let base_name = export_base_name(data.file_name.as_deref().unwrap_or(""));
        let result = self
            .pipeline
            .export(&data.headers, &data.rows, base_name, sink);

        match result {
            Ok(file) => {
                store.dispatch(Action::ShowAlert(Alert::new(
                    EXPORT_SUCCESS_MESSAGE,
                    Severity::Success,
                )));
                Ok(Some(file))
            }
            Err(err) => {
                store.dispatch(Action::ShowAlert(Alert::new(
                    err.user_message(),
                    Severity::Error,
                )));
                Err(err)
            }
        }
    }

    /// 読み込み済みデータとアラートを消去する
    pub fn clear(&self, store: &mut Store) {
        store.dispatch(Action::ClearData);
        store.dispatch(Action::HideAlert);
    }
}

/// 検証での拒否を警告として通知する（データの状態は変更しない）
fn reject(store: &mut Store, rejection: Rejection) -> SheetPreviewError {
    warn!("upload rejected: {}", rejection);
    store.dispatch(Action::ShowAlert(Alert::new(
        rejection.user_message(),
        Severity::Warning,
    )));
    SheetPreviewError::ValidationRejected(rejection)
}

/// 読み込み・取り込みの失敗をエラーとして状態に反映する
fn fail(store: &mut Store, err: SheetPreviewError) -> SheetPreviewError {
    let message = err.user_message();
    warn!("upload failed: {}", message);
    store.dispatch(Action::SetError(message.clone()));
    store.dispatch(Action::ShowAlert(Alert::new(message, Severity::Error)));
    err
}
