//! Panel composition
//!
//! Implements the core's `PanelSurface` over an in-memory RGB frame that the
//! HUB75 scan task streams out continuously. Label glyphs come from
//! embedded-graphics' 6px-advance monospace font (the advance the scroll
//! wrap thresholds assume); the splash sprite is a BMP decoded by tinybmp.
//!
//! The cabinet mounts the panel rotated a quarter turn, so label text runs
//! along the panel's vertical axis: a label's `x` picks the glyph column,
//! its `y` slides the text along the scroll axis. The P2 label additionally
//! renders through a half-turn flip so it reads correctly from the far side.

use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use embedded_graphics::image::Image;
use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use tinybmp::Bmp;

use moleboard_core::label::Label;
use moleboard_core::traits::{PanelSurface, Scene, SurfaceError};
use moleboard_core::Orientation;

/// Panel size in pixels.
pub const PANEL_WIDTH: usize = 32;
pub const PANEL_HEIGHT: usize = 32;

/// Vertical offset of the splash sprite on the panel.
const SPRITE_Y: i32 = 8;

/// The mole sprite shown in attract mode.
const SPLASH_BMP: &[u8] = include_bytes!("../assets/mole.bmp");

/// Last frame composed by the render loop, shared with the scan task.
pub static FRAME: Mutex<CriticalSectionRawMutex, core::cell::RefCell<PanelFrame>> =
    Mutex::new(core::cell::RefCell::new(PanelFrame::new()));

/// One full-color frame of the panel.
#[derive(Clone)]
pub struct PanelFrame {
    pixels: [Rgb888; PANEL_WIDTH * PANEL_HEIGHT],
}

impl PanelFrame {
    pub const fn new() -> Self {
        Self {
            pixels: [Rgb888::new(0, 0, 0); PANEL_WIDTH * PANEL_HEIGHT],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb888 {
        self.pixels[y * PANEL_WIDTH + x]
    }

    fn set(&mut self, x: i32, y: i32, color: Rgb888) {
        if (0..PANEL_WIDTH as i32).contains(&x) && (0..PANEL_HEIGHT as i32).contains(&y) {
            self.pixels[y as usize * PANEL_WIDTH + x as usize] = color;
        }
    }
}

impl OriginDimensions for PanelFrame {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH as u32, PANEL_HEIGHT as u32)
    }
}

impl DrawTarget for PanelFrame {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<Rgb888>>,
    {
        for Pixel(point, color) in pixels {
            self.set(point.x, point.y, color);
        }
        Ok(())
    }
}

/// Maps text space onto the rotated panel.
///
/// Text is drawn at the origin of its own space with the line running along
/// +x; this target transposes that onto the panel's vertical scroll axis,
/// anchored at the label position, optionally flipped a half turn for the
/// upside-down-reading label.
struct AxisMap<'a> {
    frame: &'a mut PanelFrame,
    origin: Point,
    flip: bool,
}

impl OriginDimensions for AxisMap<'_> {
    fn size(&self) -> Size {
        Size::new(PANEL_WIDTH as u32, PANEL_HEIGHT as u32)
    }
}

impl DrawTarget for AxisMap<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Infallible>
    where
        I: IntoIterator<Item = Pixel<Rgb888>>,
    {
        for Pixel(point, color) in pixels {
            let (x, y) = if self.flip {
                (self.origin.x - point.y, self.origin.y - point.x)
            } else {
                (self.origin.x + point.y, self.origin.y + point.x)
            };
            self.frame.set(x, y, color);
        }
        Ok(())
    }
}

/// The concrete panel surface handed to the render loop driver.
pub struct MatrixPanel {
    sprite: Bmp<'static, Rgb888>,
}

impl MatrixPanel {
    pub fn new() -> Self {
        // Compile-time asset; a malformed BMP is a build mistake
        let sprite = Bmp::from_slice(SPLASH_BMP).unwrap();
        Self { sprite }
    }

    fn draw_label(frame: &mut PanelFrame, label: &Label) {
        let color = rgb(label.color());
        let style = MonoTextStyle::new(&FONT_6X9, color);
        let flip = matches!(label.orientation(), Orientation::UpsideDownReading);
        let mut target = AxisMap {
            frame,
            origin: Point::new(label.x, label.y),
            flip,
        };
        let _ = Text::with_baseline(label.text(), Point::zero(), style, Baseline::Top)
            .draw(&mut target);
    }
}

impl PanelSurface for MatrixPanel {
    fn dimensions(&self) -> (i32, i32) {
        (PANEL_WIDTH as i32, PANEL_HEIGHT as i32)
    }

    fn present(&mut self, scene: Scene<'_>) -> Result<(), SurfaceError> {
        let mut frame = PanelFrame::new();

        match scene {
            Scene::Labels { p1, p2 } => {
                Self::draw_label(&mut frame, p1);
                Self::draw_label(&mut frame, p2);
            }
            Scene::Splash { x } => {
                let _ = Image::new(&self.sprite, Point::new(x, SPRITE_Y)).draw(&mut frame);
            }
        }

        FRAME.lock(|shared| *shared.borrow_mut() = frame);
        Ok(())
    }
}

fn rgb(color: u32) -> Rgb888 {
    Rgb888::new(
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}
