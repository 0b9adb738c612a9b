//! HUB75 matrix scan task
//!
//! Bit-banged 1/16-scan driver for a 32x32 HUB75 panel. The panel has no
//! framebuffer of its own: rows stay lit only while they are being driven,
//! so this task refreshes the whole panel continuously from the shared
//! frame the render loop publishes.
//!
//! Each refresh pass clones the frame once and shifts out 16 row pairs
//! (row n and row n+16 share a shift cycle through the RGB1/RGB2 inputs).
//! Color is on/off per channel: a channel lights when its component is at
//! or above half scale.

use defmt::*;
use embassy_futures::yield_now;
use embassy_rp::gpio::Output;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

use crate::panel::{PanelFrame, FRAME, PANEL_WIDTH};

/// Rows driven per address (1/16 scan).
const SCAN_ROWS: usize = 16;

/// A channel lights at or above this component value.
const CHANNEL_THRESHOLD: u8 = 0x80;

/// The thirteen panel control lines.
pub struct Hub75Pins {
    pub r1: Output<'static>,
    pub g1: Output<'static>,
    pub b1: Output<'static>,
    pub r2: Output<'static>,
    pub g2: Output<'static>,
    pub b2: Output<'static>,
    pub addr_a: Output<'static>,
    pub addr_b: Output<'static>,
    pub addr_c: Output<'static>,
    pub addr_d: Output<'static>,
    pub clk: Output<'static>,
    pub lat: Output<'static>,
    pub oe: Output<'static>,
}

impl Hub75Pins {
    fn select_row(&mut self, row: usize) {
        self.addr_a.set_level(bit(row, 0));
        self.addr_b.set_level(bit(row, 1));
        self.addr_c.set_level(bit(row, 2));
        self.addr_d.set_level(bit(row, 3));
    }

    fn shift_pixel(&mut self, upper: Rgb888, lower: Rgb888) {
        self.r1.set_level(on(upper.r()));
        self.g1.set_level(on(upper.g()));
        self.b1.set_level(on(upper.b()));
        self.r2.set_level(on(lower.r()));
        self.g2.set_level(on(lower.g()));
        self.b2.set_level(on(lower.b()));
        self.clk.set_high();
        self.clk.set_low();
    }

    fn latch_row(&mut self, row: usize) {
        // Blank while the new row data latches and the address changes
        self.oe.set_high();
        self.lat.set_high();
        self.lat.set_low();
        self.select_row(row);
        self.oe.set_low();
    }
}

fn bit(row: usize, n: u8) -> embassy_rp::gpio::Level {
    if row & (1 << n) != 0 {
        embassy_rp::gpio::Level::High
    } else {
        embassy_rp::gpio::Level::Low
    }
}

fn on(component: u8) -> embassy_rp::gpio::Level {
    if component >= CHANNEL_THRESHOLD {
        embassy_rp::gpio::Level::High
    } else {
        embassy_rp::gpio::Level::Low
    }
}

/// Panel refresh task. Never returns.
#[embassy_executor::task]
pub async fn scan_task(mut pins: Hub75Pins) {
    info!("HUB75 scan task started");

    let mut frame = PanelFrame::new();
    loop {
        FRAME.lock(|shared| frame.clone_from(&shared.borrow()));

        for row in 0..SCAN_ROWS {
            for col in 0..PANEL_WIDTH {
                let upper = frame.get(col, row);
                let lower = frame.get(col, row + SCAN_ROWS);
                pins.shift_pixel(upper, lower);
            }
            pins.latch_row(row);
            yield_now().await;
        }
    }
}
