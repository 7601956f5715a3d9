//! Asset kind definitions.

/// Kind of raw asset, keyed by the input subdirectory it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Background image, re-encoded in its original format.
    Texture,
    /// Foreground image whose background is stripped; always published as PNG.
    Sprite,
}

impl AssetKind {
    /// Every kind the scanner looks for, in processing order.
    pub const ALL: [AssetKind; 2] = [AssetKind::Texture, AssetKind::Sprite];

    /// Singular name used in log lines.
    pub const fn label(self) -> &'static str {
        match self {
            AssetKind::Texture => "texture",
            AssetKind::Sprite => "sprite",
        }
    }

    /// Logger module prefix for this kind.
    pub const fn log_module(self) -> &'static str {
        match self {
            AssetKind::Texture => "textures",
            AssetKind::Sprite => "sprites",
        }
    }
}
