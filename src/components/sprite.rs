//! Sprite-sheet frame geometry.
//!
//! A sheet is a grid of `x_frames * y_frames` equally sized cells read left
//! to right, top to bottom. [`SpriteFrame::project`] selects the source cell
//! for a frame index and centers the destination on the render position.

/// Axis-aligned rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Source and destination rectangles for one frame of a sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteFrame {
    pub src: Rect,
    pub dest: Rect,
}

impl SpriteFrame {
    /// Project `frame_index` of a `texture_width x texture_height` sheet.
    ///
    /// Cell sizes use integer division, so any remainder pixels on the right
    /// and bottom edges of the sheet are never sampled. Returns `None` when
    /// the grid has no columns or no rows.
    pub fn project(
        frame_index: u32,
        x_frames: u32,
        y_frames: u32,
        texture_width: u32,
        texture_height: u32,
        render_x: f32,
        render_y: f32,
    ) -> Option<SpriteFrame> {
        if x_frames == 0 || y_frames == 0 {
            return None;
        }
        let frame_width = texture_width / x_frames;
        let frame_height = texture_height / y_frames;

        let src = Rect::new(
            ((frame_index % x_frames) * frame_width) as f32,
            ((frame_index / x_frames) * frame_height) as f32,
            frame_width as f32,
            frame_height as f32,
        );
        let dest = Rect::new(
            render_x - (frame_width / 2) as f32,
            render_y - (frame_height / 2) as f32,
            frame_width as f32,
            frame_height as f32,
        );
        Some(SpriteFrame { src, dest })
    }
}
