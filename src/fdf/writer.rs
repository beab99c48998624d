// Phase 2: FDF (Forms Data Format) 中間データファイル生成
//
// pdftk の fill_form に渡す FDF を組み立てる。フィールド名と値は
// それぞれ独立した BOM 付き UTF-16BE 文字列として埋め込む。

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::{CheckboxLabels, FieldMap, utf16};

const FDF_HEADER: &[u8] = b"%FDF-1.2\n\
\xE2\xE3\xCF\xD3\n\
1 0 obj \n\
<<\n\
/FDF \n\
<<\n\
/Fields [\n";

const FDF_FOOTER: &[u8] = b"]\n\
>>\n\
>>\n\
endobj \n\
trailer\n\
\n\
<<\n\
/Root 1 0 R\n\
>>\n\
%%EOF\n";

/// Builds the FDF byte stream for one fill operation.
pub struct FdfWriter<'a> {
    labels: &'a CheckboxLabels,
    buf: Vec<u8>,
    field_count: usize,
}

impl<'a> FdfWriter<'a> {
    pub fn new(labels: &'a CheckboxLabels) -> Self {
        Self {
            labels,
            buf: FDF_HEADER.to_vec(),
            field_count: 0,
        }
    }

    /// フィールドレコード `<< /T (name) /V (value) >>` を1件追加する。
    pub fn push_field(&mut self, name: &str, value: &super::FieldValue) {
        let text = value.render(self.labels);

        self.buf.extend_from_slice(b"<<\n/T (");
        write_literal(&mut self.buf, &utf16::encode(name));
        self.buf.extend_from_slice(b")\n/V (");
        write_literal(&mut self.buf, &utf16::encode(&text));
        self.buf.extend_from_slice(b")\n>>\n");

        self.field_count += 1;
    }

    /// Number of field records written so far.
    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// フッターを付けて完成したバイト列を返す。
    pub fn finish(mut self) -> Vec<u8> {
        self.buf.extend_from_slice(FDF_FOOTER);
        self.buf
    }
}

/// FieldMap 全体を FDF バイト列にエンコードする。
pub fn encode_fdf(fields: &FieldMap, labels: &CheckboxLabels) -> Vec<u8> {
    let mut writer = FdfWriter::new(labels);
    for (name, value) in fields {
        writer.push_field(name, value);
    }
    writer.finish()
}

/// FDF をファイルに書き込む。
///
/// pdftk はディスク上のファイルを読むため、戻る前に sync を行い
/// ファイルハンドルを閉じる。
pub fn write_fdf_file(
    path: &Path,
    fields: &FieldMap,
    labels: &CheckboxLabels,
) -> crate::error::Result<()> {
    let bytes = encode_fdf(fields, labels);

    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;
    drop(file);

    tracing::debug!(
        path = %path.display(),
        fields = fields.len(),
        bytes = bytes.len(),
        "wrote FDF data file"
    );
    Ok(())
}

/// PDF リテラル文字列の本体としてバイト列を書き込む。
///
/// `(` `)` `\` はエスケープし、CR は `\r` にする（改行正規化で値が変わるのを防ぐ）。
fn write_literal(buf: &mut Vec<u8>, bytes: &[u8]) {
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                buf.push(b'\\');
                buf.push(b);
            }
            b'\r' => buf.extend_from_slice(b"\\r"),
            _ => buf.push(b),
        }
    }
}
