//! Floor-plan renderer.
//!
//! [`render`] turns a document plus [`ViewParams`] into a [`Frame`], an
//! ordered display list. Backends replay the list: tiny-skia pixels, a Vello
//! scene, or SVG markup.

pub mod display;
pub mod hit;
pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod svg;
pub mod theme;
pub mod view;

pub use display::{DrawItem, DrawOp, Frame, FrameKind, Layer, StrokeStyle};
pub use hit::{Hit, hit_test};
pub use pipeline::{CanvasContent, render, render_placeholder, render_plan, render_unavailable};
pub use raster::{RasterError, RasterSurface};
pub use scene::paint_scene;
pub use svg::render_svg;
pub use theme::{DEFAULT_FONT_FAMILY, RenderTheme, RoomPalette};
pub use view::{MAX_CANVAS_PX, ViewParams};
