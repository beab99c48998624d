// Phase 1: フォーム値モデル (FieldValue / FieldMap / CheckboxLabels)

pub mod utf16;
pub mod writer;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

/// フィールド名 → 値 のマップ。
///
/// pdftk はフィールドを名前で照合するため順序に意味はないが、
/// 出力を決定的にするためソート済みマップを使う。
pub type FieldMap = BTreeMap<String, FieldValue>;

/// フォームフィールドに書き込む値。
///
/// YAML/JSON のスカラー値から untagged でデシリアライズされる。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state, rendered through [`CheckboxLabels`].
    Bool(bool),
    Integer(i64),
    /// `i64` に収まらない非負整数。
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// 値をFDFに書き込むテキストに変換する。
    ///
    /// 真偽値はラベルペアに置換し、それ以外は `Display` 表現を使う。
    pub fn render<'a>(&'a self, labels: &'a CheckboxLabels) -> Cow<'a, str> {
        match self {
            FieldValue::Bool(true) => Cow::Borrowed(labels.checked.as_str()),
            FieldValue::Bool(false) => Cow::Borrowed(labels.unchecked.as_str()),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Unsigned(u) => write!(f, "{u}"),
            // f64's Display already drops a trailing ".0" for whole numbers
            FieldValue::Float(x) => write!(f, "{x}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(x: f64) -> Self {
        FieldValue::Float(x)
    }
}

impl From<f32> for FieldValue {
    /// f32 の最短表現を経由して変換する (`0.1f32` は "0.1" のまま)。
    fn from(x: f32) -> Self {
        FieldValue::Float(x.to_string().parse().unwrap_or(x as f64))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => FieldValue::Integer(i),
            Err(_) => FieldValue::Unsigned(u),
        }
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::from(u as u64)
    }
}

macro_rules! integer_field_values {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for FieldValue {
                fn from(i: $t) -> Self {
                    FieldValue::Integer(i as i64)
                }
            }
        )*
    };
}

integer_field_values!(i8, i16, i32, i64, u8, u16, u32);

/// チェックボックスの on/off を表すテキストトークン。
///
/// 対象PDFのフィールド定義が期待する値 (例: "Yes" / "Off") と一致させる必要がある。
/// 暗黙のデフォルトは持たない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxLabels {
    pub checked: String,
    pub unchecked: String,
}

impl CheckboxLabels {
    pub fn new(checked: impl Into<String>, unchecked: impl Into<String>) -> Self {
        Self {
            checked: checked.into(),
            unchecked: unchecked.into(),
        }
    }
}
