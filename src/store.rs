//! Store Module
//!
//! 読み込んだファイルのデータとアラートバナーを保持する明示的な状態コンテナ。
//! 状態の変更は`Action`の`dispatch`経由のみで行い、登録されたリスナーに通知します。

use serde::{Deserialize, Serialize};

use crate::api::Severity;
use crate::types::{CellValue, ParsedTable};

/// アラートバナー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// 表示メッセージ
    pub message: String,

    /// 重要度
    pub severity: Severity,
}

impl Alert {
    /// 新しいアラートを生成
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// 読み込み済みファイルの状態
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataState {
    pub file_name: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DataState {
    /// エクスポート・プレビュー可能なデータがあるか
    pub fn has_data(&self) -> bool {
        !self.headers.is_empty() && !self.rows.is_empty()
    }
}

/// 画面表示の状態
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiState {
    /// 表示中のアラート（`None`は非表示）
    pub alert: Option<Alert>,
}

/// アプリケーション全体の状態
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppState {
    pub data: DataState,
    pub ui: UiState,
}

impl AppState {
    /// 状態をJSON文字列として出力
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn reduce(&mut self, action: &Action) {
        match action {
            Action::SetFileData(table) => {
                self.data.file_name = Some(table.file_name.clone());
                self.data.headers = table.headers.clone();
                self.data.rows = table.rows.clone();
                self.data.error = None;
                self.data.is_loading = false;
            }
            Action::SetLoading(loading) => {
                self.data.is_loading = *loading;
            }
            Action::SetError(message) => {
                self.data.error = Some(message.clone());
                self.data.is_loading = false;
            }
            Action::ClearData => {
                self.data.file_name = None;
                self.data.headers.clear();
                self.data.rows.clear();
                self.data.error = None;
            }
            Action::ClearError => {
                self.data.error = None;
            }
            Action::ShowAlert(alert) => {
                self.ui.alert = Some(alert.clone());
            }
            Action::HideAlert => {
                self.ui.alert = None;
            }
        }
    }
}

/// 状態を変更する操作
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 取り込み結果で置き換える（エラーと読み込み中フラグは解除）
    SetFileData(ParsedTable),
    /// 読み込み中フラグを設定
    SetLoading(bool),
    /// エラーを設定（読み込み中フラグは解除、テーブルはそのまま）
    SetError(String),
    /// 読み込み済みデータとエラーを消去
    ClearData,
    /// エラーのみ消去
    ClearError,
    /// アラートを表示
    ShowAlert(Alert),
    /// アラートを非表示
    HideAlert,
}

/// リスナー登録の識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Action, &AppState)>;

/// 状態コンテナ
///
/// グローバルには保持せず、呼び出し側が所有して`&mut`で受け渡します。
///
/// # 使用例
///
/// ```rust
/// use sheetpreview::{Action, Alert, Severity, Store};
///
/// let mut store = Store::new();
/// let id = store.subscribe(|action, state| {
///     println!("{:?} -> alert: {:?}", action, state.ui.alert);
/// });
/// store.dispatch(Action::ShowAlert(Alert::new("hello", Severity::Info)));
/// store.unsubscribe(id);
/// ```
#[derive(Default)]
pub struct Store {
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Store {
    /// 初期状態のストアを生成
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在の状態
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 操作を適用し、リスナーに通知する
    pub fn dispatch(&mut self, action: Action) {
        self.state.reduce(&action);
        for (_, listener) in &mut self.listeners {
            listener(&action, &self.state);
        }
    }

    /// 変更通知のリスナーを登録する
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Action, &AppState) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// リスナーの登録を解除する（登録されていた場合は`true`）
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
