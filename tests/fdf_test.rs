// Phase 1-2: FDF エンコードのテスト

use pdf_fill::fdf::utf16;
use pdf_fill::fdf::writer::{encode_fdf, write_fdf_file};
use pdf_fill::{CheckboxLabels, FieldMap, FieldValue};
use tempfile::tempdir;

const HEADER: &[u8] = b"%FDF-1.2\n\xE2\xE3\xCF\xD3\n1 0 obj \n<<\n/FDF \n<<\n/Fields [\n";
const FOOTER: &[u8] = b"]\n>>\n>>\nendobj \ntrailer\n\n<<\n/Root 1 0 R\n>>\n%%EOF\n";

fn labels() -> CheckboxLabels {
    CheckboxLabels::new("Yes", "No")
}

/// `/T (...)` と `/V (...)` の組を全て取り出す（テストデータは括弧を含まない前提）。
fn records(fdf: &[u8]) -> Vec<(String, String)> {
    let body = &fdf[HEADER.len()..fdf.len() - FOOTER.len()];
    let mut out = Vec::new();
    let mut rest = body;
    while let Some(start) = find(rest, b"<<\n/T (") {
        rest = &rest[start + 7..];
        let t_end = find(rest, b")\n/V (").expect("record should have /V");
        let name = utf16::decode(&rest[..t_end]).expect("name should be UTF-16");
        rest = &rest[t_end + 6..];
        let v_end = find(rest, b")\n>>\n").expect("record should be closed");
        let value = utf16::decode(&rest[..v_end]).expect("value should be UTF-16");
        rest = &rest[v_end + 5..];
        out.push((name, value));
    }
    out
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

// ============================================================
// 1. 構造
// ============================================================

#[test]
fn test_empty_field_map_is_structurally_valid() {
    let fdf = encode_fdf(&FieldMap::new(), &labels());
    let mut expected = HEADER.to_vec();
    expected.extend_from_slice(FOOTER);
    assert_eq!(fdf, expected);
}

#[test]
fn test_header_and_footer_wrap_records() {
    let mut fields = FieldMap::new();
    fields.insert("name".into(), "Ann".into());
    let fdf = encode_fdf(&fields, &labels());
    assert!(fdf.starts_with(HEADER));
    assert!(fdf.ends_with(FOOTER));
}

#[test]
fn test_one_record_per_field() {
    let mut fields = FieldMap::new();
    for i in 0..5 {
        fields.insert(format!("field{i}"), FieldValue::Integer(i));
    }
    let fdf = encode_fdf(&fields, &labels());
    let recs = records(&fdf);
    assert_eq!(recs.len(), 5);
    for i in 0..5 {
        assert!(
            recs.contains(&(format!("field{i}"), i.to_string())),
            "missing record for field{i}: {recs:?}"
        );
    }
}

#[test]
fn test_each_string_carries_its_own_bom() {
    let mut fields = FieldMap::new();
    fields.insert("a".into(), "b".into());
    let fdf = encode_fdf(&fields, &labels());
    let expected: &[u8] = b"<<\n/T (\xFE\xFF\x00a)\n/V (\xFE\xFF\x00b)\n>>\n";
    assert!(find(&fdf, expected).is_some(), "record bytes not found");
}

// ============================================================
// 2. 値の変換
// ============================================================

#[test]
fn test_booleans_use_caller_labels() {
    let mut fields = FieldMap::new();
    fields.insert("subscribe".into(), true.into());
    fields.insert("spam".into(), false.into());
    let recs = records(&encode_fdf(&fields, &labels()));
    assert!(recs.contains(&("subscribe".into(), "Yes".into())));
    assert!(recs.contains(&("spam".into(), "No".into())));
}

#[test]
fn test_custom_labels_are_not_defaulted() {
    let mut fields = FieldMap::new();
    fields.insert("agree".into(), true.into());
    fields.insert("decline".into(), false.into());
    let custom = CheckboxLabels::new("On", "Off");
    let recs = records(&encode_fdf(&fields, &custom));
    assert!(recs.contains(&("agree".into(), "On".into())));
    assert!(recs.contains(&("decline".into(), "Off".into())));
}

#[test]
fn test_non_boolean_values_use_natural_text() {
    let mut fields = FieldMap::new();
    fields.insert("age".into(), 42i64.into());
    fields.insert("ratio".into(), 0.5f64.into());
    fields.insert("count".into(), FieldValue::Float(10.0));
    fields.insert("city".into(), "Zürich".into());
    let recs = records(&encode_fdf(&fields, &labels()));
    assert!(recs.contains(&("age".into(), "42".into())));
    assert!(recs.contains(&("ratio".into(), "0.5".into())));
    assert!(recs.contains(&("count".into(), "10".into())));
    assert!(recs.contains(&("city".into(), "Zürich".into())));
}

#[test]
fn test_non_ascii_field_names_are_encoded() {
    let mut fields = FieldMap::new();
    fields.insert("Straße".into(), "Café".into());
    let fdf = encode_fdf(&fields, &labels());
    // ß = U+00DF, é = U+00E9
    assert!(find(&fdf, b"\x00\xDF").is_some());
    assert!(find(&fdf, b"\x00\xE9").is_some());
    assert_eq!(records(&fdf), vec![("Straße".into(), "Café".into())]);
}

#[test]
fn test_parenthesis_in_value_is_escaped() {
    let mut fields = FieldMap::new();
    fields.insert("note".into(), "(x)".into());
    let fdf = encode_fdf(&fields, &labels());
    assert!(find(&fdf, b"\x00\\(\x00x\x00\\)").is_some());
}

// ============================================================
// 3. UTF-16
// ============================================================

#[test]
fn test_utf16_starts_with_bom_and_is_big_endian() {
    assert_eq!(utf16::encode("A"), vec![0xFE, 0xFF, 0x00, 0x41]);
    assert_eq!(utf16::encode(""), vec![0xFE, 0xFF]);
}

#[test]
fn test_utf16_round_trip() {
    let samples = [
        "",
        "plain ascii",
        "Ünïcödé àçcénts",
        "日本語のテキスト",
        "emoji 😀 and 𝄞 clef",
        "mixed\tcontrol\nchars",
    ];
    for s in samples {
        let encoded = utf16::encode(s);
        assert_eq!(utf16::decode(&encoded).unwrap(), s, "round trip of {s:?}");
    }
}

#[test]
fn test_utf16_decode_rejects_odd_length() {
    assert!(utf16::decode(&[0xFE, 0xFF, 0x00]).is_err());
}

// ============================================================
// 4. ファイル書き込み
// ============================================================

#[test]
fn test_write_fdf_file_matches_encoded_bytes() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("data.fdf");
    let mut fields = FieldMap::new();
    fields.insert("name".into(), "Ann".into());
    fields.insert("subscribe".into(), true.into());

    write_fdf_file(&path, &fields, &labels()).expect("write FDF");

    let on_disk = std::fs::read(&path).expect("read FDF");
    assert_eq!(on_disk, encode_fdf(&fields, &labels()));
}

#[test]
fn test_write_fdf_file_missing_directory_is_io_error() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("missing").join("data.fdf");
    let result = write_fdf_file(&path, &FieldMap::new(), &labels());
    assert!(matches!(result, Err(pdf_fill::PdfFillError::IoError(_))));
}
