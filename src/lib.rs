//! Stellate scripts compass-and-straightedge star constructions and renders them as video.
//!
//! The pipeline is deterministic end to end:
//!
//! - Compute the construction geometry ([`points_on_circle`], [`star_intersections`],
//!   [`StarGeometry`])
//! - Record a narrated [`ConstructionScript`] with a [`ScriptBuilder`] (or take one of the
//!   built-in scripts via [`build_script`])
//! - Lay the script out on a [`Timeline`] and sample a [`SceneState`] per frame
//! - Render frames to SVG/PNG with [`FrameRenderer`], or stream them to MP4 with
//!   [`render_to_mp4`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod construction;
pub(crate) mod encode;
pub(crate) mod geometry;
pub(crate) mod render;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Circle, Fps, FrameIndex, FrameRange, Line, Point, Rect, SceneFrame,
    Vec2,
};
pub use crate::foundation::error::{StellateError, StellateResult};

pub use crate::geometry::intersect::line_intersection;
pub use crate::geometry::ring::{PointRing, point_on_circle, points_on_circle};
pub use crate::geometry::star::{StarGeometry, StarVertexList, star_intersections};

pub use crate::animation::ease::Ease;
pub use crate::animation::state::{CaptionState, MorphState, SceneState, ShapeState, StepSnapshot};
pub use crate::animation::timeline::Timeline;

pub use crate::construction::action::{Action, Beat};
pub use crate::construction::palette::{Palette, StarConfig};
pub use crate::construction::script::{
    BASELINE_ID, CaptionLayout, ConstructionScript, ConstructionStep, STAR_ID, ScriptBuilder,
};
pub use crate::construction::shape::{Dash, Geometry, Shape, ShapeSet, ShapeStyle, TextBlock};
pub use crate::construction::{StarKind, build_script};

pub use crate::encode::ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
pub use crate::render::FrameRGBA;
pub use crate::render::pipeline::{
    FrameRenderer, RenderStats, RenderToMp4Opts, render_frame, render_frames, render_stills,
    render_to_mp4, save_png,
};
pub use crate::render::raster::Rasterizer;
pub use crate::render::settings::{PAPER, RenderSettings};
pub use crate::render::svg::scene_svg;
