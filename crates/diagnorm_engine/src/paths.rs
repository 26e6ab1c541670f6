//! Display-path normalization shared by the structured and text branches.

use diagnorm_config::PathsConfig;
use diagnorm_diagnostics::UNKNOWN_FILE;

/// Strips configured source-root prefixes from reported file paths.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    roots: Vec<String>,
}

impl PathNormalizer {
    /// Creates a normalizer from the `[paths]` configuration.
    pub fn new(config: &PathsConfig) -> Self {
        let roots = config
            .source_roots
            .iter()
            .map(|root| {
                let root = root.trim().replace('\\', "/");
                let root = root.trim_start_matches("./");
                if root.ends_with('/') {
                    root.to_string()
                } else {
                    format!("{root}/")
                }
            })
            .collect();
        Self { roots }
    }

    /// Normalizes a reported path for display.
    ///
    /// Backslashes become `/`, leading `./` segments are removed, and the
    /// first configured root found at the start of the path (or after a
    /// directory separator, for absolute build paths) is stripped together
    /// with everything before it. Blank input yields [`UNKNOWN_FILE`].
    pub fn normalize(&self, raw: &str) -> String {
        let path = raw.trim().trim_matches(['"', '\'']).replace('\\', "/");
        let mut path = path.as_str();
        while let Some(rest) = path.strip_prefix("./") {
            path = rest;
        }
        if path.is_empty() {
            return UNKNOWN_FILE.to_string();
        }

        for root in &self.roots {
            if let Some(rest) = path.strip_prefix(root.as_str()) {
                if !rest.is_empty() {
                    return rest.to_string();
                }
            }
            let nested = format!("/{root}");
            if let Some(pos) = path.find(&nested) {
                let rest = &path[pos + nested.len()..];
                if !rest.is_empty() {
                    return rest.to_string();
                }
            }
        }
        path.to_string()
    }
}

impl Default for PathNormalizer {
    fn default() -> Self {
        Self::new(&PathsConfig::default())
    }
}
