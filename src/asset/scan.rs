//! Asset scanning functions (pure, no side effects).

use std::path::Path;

use crate::config::PipelineConfig;

use super::{AssetKind, AssetRoute};

/// Extensions eligible for processing, compared case-insensitively.
const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Scan the raw asset root and compute one route per eligible file.
///
/// Returns `None` when the input root itself is missing, which makes the
/// whole run a no-op. A missing subdirectory only skips that kind. Files with
/// other extensions and nested directories are silently ignored. Listing is
/// non-recursive and order is whatever the filesystem returns.
///
/// # Pure Function
///
/// This function only reads the filesystem and returns data.
/// It does not modify any state.
pub fn scan_assets(config: &PipelineConfig) -> Option<Vec<AssetRoute>> {
    if !config.input.exists() {
        return None;
    }

    let mut routes = Vec::new();
    for kind in AssetKind::ALL {
        let input_dir = config.input_dir(kind);
        if !input_dir.exists() {
            continue;
        }
        scan_dir(&mut routes, &input_dir, &config.output_dir(kind), kind);
    }

    Some(routes)
}

/// List one input subdirectory and push a route per eligible file.
fn scan_dir(routes: &mut Vec<AssetRoute>, input_dir: &Path, output_dir: &Path, kind: AssetKind) {
    let Ok(entries) = std::fs::read_dir(input_dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_allowed_extension(&path) {
            continue;
        }

        let output = match kind {
            AssetKind::Texture => {
                let Some(file_name) = path.file_name() else {
                    continue;
                };
                output_dir.join(file_name)
            }
            // Sprites always come out as `<stem>.png` so the alpha channel
            // added by background removal survives.
            AssetKind::Sprite => {
                let Some(stem) = path.file_stem() else {
                    continue;
                };
                let mut name = stem.to_os_string();
                name.push(".png");
                output_dir.join(name)
            }
        };

        routes.push(AssetRoute {
            source: path,
            output,
            kind,
        });
    }
}

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}
