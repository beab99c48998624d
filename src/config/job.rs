use serde::Deserialize;

use crate::fdf::FieldMap;

#[derive(Debug, Clone, Deserialize)]
pub struct JobFile {
    pub jobs: Vec<Job>,
}

/// ジョブ1件。`op` キーで操作を選ぶ。
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Job {
    Fill(FillJob),
    Stamp(StampJob),
    Merge(MergeJob),
}

#[derive(Debug, Clone, Deserialize)]
pub struct FillJob {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub fields: FieldMap,
    pub checked_label: Option<String>,
    pub unchecked_label: Option<String>,
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StampJob {
    pub input: String,
    pub stamp: String,
    pub output: String,
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeJob {
    #[serde(deserialize_with = "deserialize_inputs")]
    pub inputs: Vec<String>,
    pub output: String,
    pub overwrite: Option<bool>,
}

impl Job {
    /// Short operation name used in reports.
    pub fn op_name(&self) -> &'static str {
        match self {
            Job::Fill(_) => "fill",
            Job::Stamp(_) => "stamp",
            Job::Merge(_) => "merge",
        }
    }

    pub fn output(&self) -> &str {
        match self {
            Job::Fill(j) => &j.output,
            Job::Stamp(j) => &j.output,
            Job::Merge(j) => &j.output,
        }
    }

    pub fn overwrite(&self) -> Option<bool> {
        match self {
            Job::Fill(j) => j.overwrite,
            Job::Stamp(j) => j.overwrite,
            Job::Merge(j) => j.overwrite,
        }
    }
}

/// 空の入力リストはデシリアライズ時点で拒否する。
fn deserialize_inputs<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let inputs = Vec::<String>::deserialize(deserializer)?;
    if inputs.is_empty() {
        return Err(serde::de::Error::custom(
            "merge job requires at least one input",
        ));
    }
    Ok(inputs)
}
