pub(crate) mod pipeline;
pub(crate) mod raster;
pub(crate) mod settings;
pub(crate) mod svg;

/// A rendered frame as RGBA8 pixels.
///
/// Frames leave the rasterizer **premultiplied**. The `premultiplied` flag makes this explicit at
/// API boundaries (PNG output demultiplies, the MP4 encoder flattens over its background).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}
