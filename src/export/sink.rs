//! Download Sinks
//!
//! ホスト環境の「ファイル保存を開始する」処理を抽象化するトレイトと、その実装。

use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ExportedFile;

/// 生成したファイルを利用者に引き渡す先
pub trait DownloadSink {
    /// ファイルの保存（ダウンロード）を開始する
    fn save(&mut self, file: &ExportedFile) -> io::Result<()>;
}

/// メモリ上に保持する（テストや埋め込み用途）
impl DownloadSink for Vec<ExportedFile> {
    fn save(&mut self, file: &ExportedFile) -> io::Result<()> {
        self.push(file.clone());
        Ok(())
    }
}

/// 指定ディレクトリにファイルとして書き出す
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// 出力先ディレクトリを指定して生成
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// 出力先ディレクトリ
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, file: &ExportedFile) -> io::Result<()> {
        // ファイル名にパスが含まれていても出力先ディレクトリの外には書き込まない
        let name = Path::new(&file.file_name)
            .file_name()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid export file name: {}", file.file_name),
                )
            })?;
        let path = self.dir.join(name);

        debug!("writing {} bytes to {}", file.contents.len(), path.display());
        fs::write(path, file.contents.as_bytes())
    }
}
