//! Image transforms.

pub mod background;
