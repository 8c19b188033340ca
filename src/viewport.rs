/// Aspect of the drawing, width:height = 5:3.5, kept as integers.
const ASPECT_WIDTH: u64 = 10;
const ASPECT_HEIGHT: u64 = 7;

/// Centred, aspect-locked drawing rectangle in panel pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Returns the largest 5:3.5 rectangle that fits the panel, letterboxed on
/// whichever axis is oversized. The derived side is truncated.
pub fn compute_viewport(panel_width: u32, panel_height: u32) -> Viewport {
    if panel_width == 0 || panel_height == 0 {
        return Viewport::default();
    }

    let (w, h) = (panel_width as u64, panel_height as u64);
    if w * ASPECT_HEIGHT > h * ASPECT_WIDTH {
        // too wide
        let width = h * ASPECT_WIDTH / ASPECT_HEIGHT;
        Viewport {
            x: ((w - width) / 2) as i32,
            y: 0,
            width: width as u32,
            height: panel_height,
        }
    } else {
        let height = w * ASPECT_HEIGHT / ASPECT_WIDTH;
        Viewport {
            x: 0,
            y: ((h - height) / 2) as i32,
            width: panel_width,
            height: height as u32,
        }
    }
}
