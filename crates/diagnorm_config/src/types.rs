//! Configuration types deserialized from `diagnorm.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// The top-level engine configuration parsed from `diagnorm.toml`.
///
/// Every section is optional; [`EngineConfig::default`] is what the engine
/// runs with when no configuration file exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// File path normalization settings.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Non-diagnostic noise filtering.
    #[serde(default)]
    pub noise: NoiseConfig,
    /// Suggestion engine settings.
    #[serde(default)]
    pub suggest: SuggestConfig,
    /// Output bucket policy.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Path normalization settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Leading source-root prefixes stripped from reported file paths.
    ///
    /// Accepts either a single string or a list. The first matching prefix
    /// wins.
    #[serde(
        default = "default_source_roots",
        deserialize_with = "deserialize_string_or_vec"
    )]
    pub source_roots: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_roots: default_source_roots(),
        }
    }
}

fn default_source_roots() -> Vec<String> {
    vec!["src/".to_string(), "contracts/".to_string()]
}

/// Lines that look like compiler chatter rather than diagnostics.
#[derive(Debug, Clone, Deserialize)]
pub struct NoiseConfig {
    /// Case-insensitive substrings; any line containing one is discarded.
    #[serde(
        default = "default_noise_patterns",
        deserialize_with = "deserialize_string_or_vec"
    )]
    pub patterns: Vec<String>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            patterns: default_noise_patterns(),
        }
    }
}

fn default_noise_patterns() -> Vec<String> {
    ["compiler run failed", "compilation failed", "error: aborting due to"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Suggestion engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    /// Whether warning-severity diagnostics also receive rule-based hints.
    #[serde(default = "default_true")]
    pub warnings: bool,
    /// Toolchain name used in the generic documentation hint.
    #[serde(default = "default_toolchain")]
    pub toolchain: String,
    /// Names of suggestion rules to skip.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Extra code-to-hint entries; these override built-in entries for the
    /// same code.
    #[serde(default)]
    pub codes: BTreeMap<String, String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            warnings: true,
            toolchain: default_toolchain(),
            disabled: Vec::new(),
            codes: BTreeMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_toolchain() -> String {
    "Solidity".to_string()
}

/// Output bucket configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// What to do with informational diagnostics.
    #[serde(default)]
    pub info: InfoPolicy,
}

/// Placement of info-severity diagnostics, which have no bucket of their own.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InfoPolicy {
    /// Leave them out of the collection (default).
    #[default]
    Drop,
    /// Surface them in the warnings bucket.
    Warning,
}

/// Deserializes a field that can be either a single string or a list of strings.
///
/// Allows TOML config to accept both `source_roots = "src/"` (string) and
/// `source_roots = ["src/", "contracts/"]` (array of strings).
fn deserialize_string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut vec = Vec::new();
            while let Some(val) = seq.next_element::<String>()? {
                vec.push(val);
            }
            Ok(vec)
        }
    }

    deserializer.deserialize_any(StringOrVec)
}
