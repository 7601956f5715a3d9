//! Asset scanning and publishing.

mod kind;
mod process;
mod route;
mod scan;

// Types
pub use kind::AssetKind;
pub use route::AssetRoute;

// Scanning (pure functions)
pub use scan::scan_assets;

// Processing (side effects)
pub use process::{ProcessError, RunSummary, process_route, publish_assets};
