//! Parser Module
//!
//! バイト列をセルグリッドにデコードする外部ライブラリ呼び出しをまとめたモジュール。
//! ワークブック形式はcalamine、CSVテキストはcsvクレートに委譲します。
//! 形式はファイル名ではなくバイト列の先頭から判別します。

mod text;
mod workbook;

use log::debug;

use crate::api::DocumentFormat;
use crate::error::DecodeError;
use crate::types::Grid;

/// ZIPアーカイブのシグネチャ（xlsx / xlsb / ods）
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Compound File Binaryのシグネチャ（xls）
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// バイト列の先頭からドキュメント形式を判別する
///
/// どのシグネチャにも一致しない場合はCSVテキストとして扱います。
pub fn detect_format(bytes: &[u8]) -> DocumentFormat {
    if bytes.starts_with(ZIP_MAGIC) {
        DocumentFormat::ZipWorkbook
    } else if bytes.starts_with(CFB_MAGIC) {
        DocumentFormat::LegacyWorkbook
    } else {
        DocumentFormat::Csv
    }
}

/// バイト列をグリッドにデコードする
///
/// # 引数
///
/// * `bytes` - ファイル全体のバイト列
///
/// # 戻り値
///
/// * `Ok(Grid)` - デコードに成功した場合（複数シートの場合は最初のシートのみ）
/// * `Err(DecodeError)` - バイト列を解釈できなかった場合
pub fn decode(bytes: &[u8]) -> Result<Grid, DecodeError> {
    let format = detect_format(bytes);
    debug!("decoding {} bytes as {:?}", bytes.len(), format);

    match format {
        DocumentFormat::ZipWorkbook | DocumentFormat::LegacyWorkbook => {
            workbook::decode_first_sheet(bytes)
        }
        DocumentFormat::Csv => text::decode_csv(bytes),
    }
}
