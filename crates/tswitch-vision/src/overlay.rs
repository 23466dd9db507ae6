//! Debug overlay: lip boxes and a status line.
//!
//! The overlay is plain data so any front end can draw it. [`DebugOverlay::render`]
//! paints the boxes onto an RGB image for headless use; the label is left to
//! the caller since there is no font rasterizer here.

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tswitch_models::{Channel, GestureSnapshot, PlayerMode};

use crate::mouth_region::LipBounds;

/// Box color while the tongue is out.
pub const DETECTED_COLOR: [u8; 3] = [34, 197, 94];

/// Box color otherwise.
pub const IDLE_COLOR: [u8; 3] = [250, 204, 21];

/// Outline thickness in pixels.
const LINE_WIDTH: u32 = 2;

/// Axis-aligned box in overlay pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayBox {
    pub channel: Option<Channel>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: [u8; 3],
}

/// Everything drawn for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugOverlay {
    pub frame_width: u32,
    pub frame_height: u32,
    pub boxes: Vec<OverlayBox>,
    pub label: String,
}

/// Builds overlays from lip bounds.
#[derive(Debug, Clone, Copy)]
pub struct OverlayBuilder {
    padding: f32,
    mirror: bool,
}

impl OverlayBuilder {
    pub fn new(padding: f32, mirror: bool) -> Self {
        Self { padding, mirror }
    }

    /// Padded lip box, flipped horizontally when mirroring.
    pub fn lip_box(
        &self,
        channel: Option<Channel>,
        bounds: &LipBounds,
        frame_width: u32,
        tongue_out: bool,
    ) -> OverlayBox {
        let width = (bounds.max_x - bounds.min_x) + self.padding * 2.0;
        let height = (bounds.max_y - bounds.min_y) + self.padding * 2.0;
        let left = bounds.min_x - self.padding;
        let x = if self.mirror {
            frame_width as f32 - left - width
        } else {
            left
        };

        OverlayBox {
            channel,
            x,
            y: bounds.min_y - self.padding,
            width,
            height,
            color: if tongue_out { DETECTED_COLOR } else { IDLE_COLOR },
        }
    }
}

/// Status line for a single player.
pub fn single_player_label(tongue_out: bool, tongue_fraction: f32, open_px: f32) -> String {
    format!("tongue={tongue_out}  frac={tongue_fraction:.2}  open={open_px:.0}px")
}

/// Status line for two players.
pub fn two_player_label(p1: bool, p2: bool) -> String {
    format!("P1 Tongue: {p1}   P2 Tongue: {p2}")
}

/// Status line matching the snapshot's mode.
///
/// `metrics` is only used in single-player mode; pass the player 1 face's
/// `(tongue_fraction, open_px)` or `None` when no face was seen.
pub fn label_for(snapshot: &GestureSnapshot, metrics: Option<(f32, f32)>) -> String {
    match snapshot.mode {
        PlayerMode::Single => {
            let (frac, open) = metrics.unwrap_or((0.0, 0.0));
            single_player_label(snapshot.tongue_out(Channel::Player1), frac, open)
        }
        PlayerMode::Dual => two_player_label(
            snapshot.tongue_out(Channel::Player1),
            snapshot.tongue_out(Channel::Player2),
        ),
    }
}

impl DebugOverlay {
    /// Draw box outlines onto `image`. Parts outside the image are skipped.
    pub fn render(&self, image: &mut RgbImage) {
        for b in &self.boxes {
            draw_outline(image, b);
        }
    }
}

fn draw_outline(image: &mut RgbImage, b: &OverlayBox) {
    let (w, h) = image.dimensions();
    let x0 = b.x.round() as i64;
    let y0 = b.y.round() as i64;
    let x1 = (b.x + b.width).round() as i64;
    let y1 = (b.y + b.height).round() as i64;
    let t = LINE_WIDTH as i64;
    let color = Rgb(b.color);

    let mut put = |x: i64, y: i64| {
        if x >= 0 && y >= 0 && (x as u64) < w as u64 && (y as u64) < h as u64 {
            image.put_pixel(x as u32, y as u32, color);
        }
    };

    for x in x0..=x1 {
        for d in 0..t {
            put(x, y0 + d);
            put(x, y1 - d);
        }
    }
    for y in y0..=y1 {
        for d in 0..t {
            put(x0 + d, y);
            put(x1 - d, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> LipBounds {
        LipBounds {
            min_x: 100.0,
            min_y: 200.0,
            max_x: 140.0,
            max_y: 220.0,
        }
    }

    #[test]
    fn test_lip_box_padding_unmirrored() {
        let b = OverlayBuilder::new(5.0, false).lip_box(None, &bounds(), 640, true);
        assert_eq!((b.x, b.y, b.width, b.height), (95.0, 195.0, 50.0, 30.0));
        assert_eq!(b.color, DETECTED_COLOR);
    }

    #[test]
    fn test_lip_box_mirrored() {
        let b = OverlayBuilder::new(5.0, true).lip_box(None, &bounds(), 640, false);
        // 640 - 95 - 50
        assert_eq!(b.x, 495.0);
        assert_eq!(b.color, IDLE_COLOR);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            single_player_label(true, 0.1234, 12.6),
            "tongue=true  frac=0.12  open=13px"
        );
        assert_eq!(two_player_label(false, true), "P1 Tongue: false   P2 Tongue: true");

        let mut snap = GestureSnapshot::new(PlayerMode::Dual);
        snap.tongue_out = [true, false];
        assert_eq!(label_for(&snap, None), "P1 Tongue: true   P2 Tongue: false");
        assert_eq!(
            label_for(&GestureSnapshot::new(PlayerMode::Single), None),
            "tongue=false  frac=0.00  open=0px"
        );
    }

    #[test]
    fn test_render_draws_outline_only() {
        let mut image = RgbImage::new(40, 40);
        let overlay = DebugOverlay {
            frame_width: 40,
            frame_height: 40,
            boxes: vec![OverlayBox {
                channel: Some(Channel::Player1),
                x: 10.0,
                y: 10.0,
                width: 20.0,
                height: 20.0,
                color: DETECTED_COLOR,
            }],
            label: String::new(),
        };
        overlay.render(&mut image);
        assert_eq!(image.get_pixel(10, 10).0, DETECTED_COLOR);
        assert_eq!(image.get_pixel(30, 20).0, DETECTED_COLOR);
        assert_eq!(image.get_pixel(20, 20).0, [0, 0, 0]);
    }

    #[test]
    fn test_render_clips_to_image() {
        let mut image = RgbImage::new(10, 10);
        let overlay = DebugOverlay {
            frame_width: 10,
            frame_height: 10,
            boxes: vec![OverlayBox {
                channel: None,
                x: -5.0,
                y: -5.0,
                width: 30.0,
                height: 30.0,
                color: IDLE_COLOR,
            }],
            label: String::new(),
        };
        overlay.render(&mut image);
        assert_eq!(image.get_pixel(5, 5).0, [0, 0, 0]);
    }
}
