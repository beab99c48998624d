//! UTF-16BE with a leading byte-order mark, as used for PDF text strings.

use crate::error::PdfFillError;

/// UTF-16 big-endian byte-order mark.
pub const BOM: [u8; 2] = [0xFE, 0xFF];

/// 文字列を BOM 付き UTF-16BE バイト列に変換する。
///
/// BMP 外のコードポイントはサロゲートペアに展開される。
pub fn encode(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + s.len() * 2);
    out.extend_from_slice(&BOM);
    for unit in s.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// UTF-16BE バイト列を文字列に戻す。先頭の BOM は省略可能。
pub fn decode(bytes: &[u8]) -> crate::error::Result<String> {
    let body = bytes.strip_prefix(&BOM[..]).unwrap_or(bytes);
    if !body.len().is_multiple_of(2) {
        return Err(PdfFillError::encoding(format!(
            "odd number of bytes in UTF-16 data: {}",
            body.len()
        )));
    }

    let units = body
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));

    char::decode_utf16(units)
        .map(|r| {
            r.map_err(|e| {
                PdfFillError::encoding(format!(
                    "unpaired surrogate 0x{:04X} in UTF-16 data",
                    e.unpaired_surrogate()
                ))
            })
        })
        .collect()
}
