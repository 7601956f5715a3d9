//! Asset route: source → output mapping.

use std::path::PathBuf;

use super::AssetKind;

/// Route information for one raw asset file.
///
/// This is the single source of truth for asset path mapping:
/// computed by the scan, consumed by the processors.
#[derive(Debug, Clone)]
pub struct AssetRoute {
    /// Source file path
    pub source: PathBuf,
    /// Output file path (same filename for textures, `<stem>.png` for sprites)
    pub output: PathBuf,
    /// Asset kind
    pub kind: AssetKind,
}

impl AssetRoute {
    /// Source filename for log lines.
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
