//! Validator Module
//!
//! 解析前にファイルのメタデータ（サイズ、MIMEタイプ、拡張子）を検証するモジュール。
//! ファイルを開いたり内容を読んだりすることはありません。

use log::warn;

use crate::api::{Rejection, Verdict};
use crate::types::FileMeta;

/// デフォルトの最大ファイルサイズ（5 MiB）
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// デフォルトで許可するMIMEタイプ
pub const DEFAULT_ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/csv",
];

/// デフォルトで許可する拡張子
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

/// ファイル受け入れポリシー
///
/// アップロード候補のファイルに対する制限を定義します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValidationPolicy {
    /// 最大ファイルサイズ（バイト）
    /// デフォルト: 5MiB (5_242_880 bytes)
    pub max_file_size: u64,
    /// 許可するMIMEタイプ
    pub allowed_mime_types: Vec<String>,
    /// 許可する拡張子（`.`付き、比較時は小文字化）
    pub allowed_extensions: Vec<String>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: DEFAULT_ALLOWED_MIME_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// ファイルバリデーター
///
/// MIMEタイプ**または**拡張子のどちらかが許可されていれば受け入れます。
/// 多くの環境ではスプレッドシートのMIMEタイプが空や誤った値で報告されるため、
/// 両方の一致は要求しません。
#[derive(Debug, Clone, Default)]
pub struct FileValidator {
    policy: ValidationPolicy,
}

impl FileValidator {
    pub(crate) fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// 最大ファイルサイズ（バイト）
    pub fn max_file_size(&self) -> u64 {
        self.policy.max_file_size
    }

    /// ファイルのメタデータを検証する
    ///
    /// # 引数
    ///
    /// * `meta` - 検証するファイルのメタデータ
    ///
    /// # 戻り値
    ///
    /// * `Verdict::Accepted` - 受け入れ可能な場合
    /// * `Verdict::Rejected(Rejection::TooLarge)` - サイズ上限を超えている場合（種類に関係なく）
    /// * `Verdict::Rejected(Rejection::UnsupportedType)` - MIMEタイプ・拡張子のどちらも許可されていない場合
    pub fn validate(&self, meta: &FileMeta) -> Verdict {
        if meta.size_bytes > self.policy.max_file_size {
            warn!(
                "rejecting '{}': {} bytes exceeds limit of {} bytes",
                meta.file_name, meta.size_bytes, self.policy.max_file_size
            );
            return Verdict::Rejected(Rejection::TooLarge {
                size_bytes: meta.size_bytes,
                max_bytes: self.policy.max_file_size,
            });
        }

        if self.has_allowed_type(&meta.mime_type) || self.has_allowed_extension(&meta.file_name) {
            return Verdict::Accepted;
        }

        warn!(
            "rejecting '{}': unsupported type '{}'",
            meta.file_name, meta.mime_type
        );
        Verdict::Rejected(Rejection::UnsupportedType {
            mime_type: meta.mime_type.clone(),
            file_name: meta.file_name.clone(),
        })
    }

    fn has_allowed_type(&self, mime_type: &str) -> bool {
        !mime_type.is_empty()
            && self
                .policy
                .allowed_mime_types
                .iter()
                .any(|allowed| allowed == mime_type)
    }

    fn has_allowed_extension(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.policy
            .allowed_extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    fn validator() -> FileValidator {
        FileValidator::default()
    }

    #[test]
    fn test_accepts_matching_type_and_extension() {
        let meta = FileMeta::new("report.xlsx", XLSX_MIME, 1024);
        assert_eq!(validator().validate(&meta), Verdict::Accepted);
    }

    #[test]
    fn test_accepts_extension_with_empty_mime() {
        for name in ["a.xlsx", "b.XLS", "c.Csv"] {
            let meta = FileMeta::new(name, "", 10);
            assert!(validator().validate(&meta).is_accepted(), "{}", name);
        }
    }

    #[test]
    fn test_accepts_mime_with_unrelated_extension() {
        let meta = FileMeta::new("data.txt", XLSX_MIME, 10);
        assert!(validator().validate(&meta).is_accepted());

        let meta = FileMeta::new("export", "text/csv", 10);
        assert!(validator().validate(&meta).is_accepted());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let meta = FileMeta::new("photo.png", "image/png", 10);
        match validator().validate(&meta) {
            Verdict::Rejected(rejection) => {
                assert_eq!(rejection.reason(), "unsupported file type");
            }
            Verdict::Accepted => panic!("Expected rejection"),
        }
    }

    #[test]
    fn test_size_boundary() {
        let at_limit = FileMeta::new("a.csv", "text/csv", DEFAULT_MAX_FILE_SIZE);
        assert!(validator().validate(&at_limit).is_accepted());

        let over_limit = FileMeta::new("a.csv", "text/csv", DEFAULT_MAX_FILE_SIZE + 1);
        assert_eq!(
            validator().validate(&over_limit),
            Verdict::Rejected(Rejection::TooLarge {
                size_bytes: DEFAULT_MAX_FILE_SIZE + 1,
                max_bytes: DEFAULT_MAX_FILE_SIZE,
            })
        );
    }

    #[test]
    fn test_size_checked_before_type() {
        // サイズ超過は種類の判定より優先される
        let meta = FileMeta::new("notes.txt", "text/plain", DEFAULT_MAX_FILE_SIZE * 2);
        match validator().validate(&meta) {
            Verdict::Rejected(Rejection::TooLarge { .. }) => {}
            other => panic!("Expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_policy() {
        let validator = FileValidator::new(ValidationPolicy {
            max_file_size: 100,
            allowed_mime_types: vec![],
            allowed_extensions: vec![".TSV".to_string()],
        });

        assert!(validator.validate(&FileMeta::new("x.tsv", "", 100)).is_accepted());
        assert!(!validator.validate(&FileMeta::new("x.csv", "text/csv", 100)).is_accepted());
        assert_eq!(validator.max_file_size(), 100);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_oversized_always_rejected(
                extra in 1u64..u32::MAX as u64,
                mime in prop::sample::select(vec!["", "text/csv", XLSX_MIME, "application/octet-stream"]),
                ext in prop::sample::select(vec![".xlsx", ".xls", ".csv", ".txt", ""]),
            ) {
                let meta = FileMeta::new(format!("file{}", ext), mime, DEFAULT_MAX_FILE_SIZE + extra);
                prop_assert!(!validator().validate(&meta).is_accepted());
            }

            #[test]
            fn test_allowed_extension_any_case_accepted(
                stem in "[a-zA-Z0-9_ -]{0,20}",
                ext in prop::sample::select(vec!["xlsx", "xls", "csv"]),
                upper in any::<bool>(),
                mime in "[a-z/.-]{0,30}",
                size in 0u64..=DEFAULT_MAX_FILE_SIZE,
            ) {
                let ext = if upper { ext.to_uppercase() } else { ext.to_string() };
                let meta = FileMeta::new(format!("{}.{}", stem, ext), mime, size);
                prop_assert!(validator().validate(&meta).is_accepted());
            }
        }
    }
}
