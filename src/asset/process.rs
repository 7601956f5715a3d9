//! Asset processing with side effects (decoding, transforming, writing).

use std::fs;
use std::io;

use image::ImageFormat;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::image::background::remove_background;
use crate::log;

use super::{AssetKind, AssetRoute, scan_assets};

/// Per-file processing failure.
///
/// The pipeline's whole error taxonomy: anything that can go wrong for one
/// file, contained to that file.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("decode failed: {0}")]
    Decode(#[source] image::ImageError),
    #[error("encode failed: {0}")]
    Encode(#[source] image::ImageError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Outcome of one pipeline run.
///
/// Failures never escalate past the log; this is the only programmatic
/// success/failure signal a caller gets.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Files published successfully.
    pub processed: usize,
    /// Files that failed and were logged.
    pub failed: usize,
}

/// Run the whole pipeline: scan the raw root and process every route.
///
/// Each file is logged before its attempt; a failure is logged with the
/// source path and message and processing moves on to the next file.
/// Existing output files are overwritten.
pub fn publish_assets(config: &PipelineConfig) -> RunSummary {
    let Some(routes) = scan_assets(config) else {
        log!("assets"; "{} does not exist, nothing to do", config.input.display());
        return RunSummary::default();
    };

    let mut summary = RunSummary::default();
    for route in &routes {
        log!(route.kind.log_module(); "processing {}: {}", route.kind.label(), route.name());

        match process_route(route) {
            Ok(()) => summary.processed += 1,
            Err(e) => {
                summary.failed += 1;
                log!("error"; "processing {}: {}", route.source.display(), e);
            }
        }
    }

    summary
}

/// Process a single route: decode, transform sprites, encode.
pub fn process_route(route: &AssetRoute) -> Result<(), ProcessError> {
    let img = image::open(&route.source).map_err(ProcessError::Decode)?;

    if let Some(parent) = route.output.parent() {
        fs::create_dir_all(parent)?;
    }

    match route.kind {
        // Keep the source format, implied by the unchanged output extension.
        // TODO: optionally re-encode textures as webp once the published
        // sizes start to matter.
        AssetKind::Texture => img.save(&route.output),
        AssetKind::Sprite => {
            let cut_out = remove_background(&img);
            cut_out.save_with_format(&route.output, ImageFormat::Png)
        }
    }
    .map_err(ProcessError::Encode)
}
