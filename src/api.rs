//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Deserialize, Serialize};
use std::fmt;

/// ファイル検証の判定結果
///
/// ファイルのメタデータ（サイズ、MIMEタイプ、ファイル名）のみから決定され、
/// ファイルの内容は一切参照しません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// 受け入れ可能
    Accepted,

    /// 拒否（理由付き）
    Rejected(Rejection),
}

impl Verdict {
    /// 受け入れ可能かどうかを判定
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// ファイルが拒否された理由
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Rejection {
    /// ファイルサイズが上限を超えている
    TooLarge {
        /// 申告されたファイルサイズ（バイト）
        size_bytes: u64,
        /// 許容される最大サイズ（バイト）
        max_bytes: u64,
    },

    /// MIMEタイプと拡張子のどちらも許可リストに含まれていない
    UnsupportedType {
        /// 申告されたMIMEタイプ
        mime_type: String,
        /// ファイル名
        file_name: String,
    },
}

impl Rejection {
    /// 短い理由文字列（`"file too large"` / `"unsupported file type"`）
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::TooLarge { .. } => "file too large",
            Rejection::UnsupportedType { .. } => "unsupported file type",
        }
    }

    /// 利用者向けの警告メッセージ
    pub fn user_message(&self) -> String {
        match self {
            Rejection::TooLarge { max_bytes, .. } => {
                format!("File is too large (max {})", format_size_limit(*max_bytes))
            }
            Rejection::UnsupportedType { .. } => {
                "Please upload a valid Excel file (.xlsx, .xls) or CSV".to_string()
            }
        }
    }
}

/// 上限サイズを表示用に整形する（1MiB未満はKB、1KiB未満はバイト単位）
fn format_size_limit(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes >= MIB {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// アラートバナーの重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// 成功
    Success,

    /// エラー
    Error,

    /// 情報（デフォルト）
    #[default]
    Info,

    /// 警告
    Warning,
}

/// バイト列の先頭から判別したドキュメント形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentFormat {
    /// ZIPベースのワークブック（xlsx、xlsb、ods）
    ///
    /// 具体的な形式の判別はcalamineの自動検出に委ねます。
    ZipWorkbook,

    /// 旧形式のバイナリワークブック（xls、Compound File Binary）
    LegacyWorkbook,

    /// プレーンなCSVテキスト
    Csv,
}
