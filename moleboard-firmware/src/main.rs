//! Moleboard - Whack-a-Mole Scoreboard Firmware
//!
//! RP2040 firmware driving a 32x32 HUB75 matrix as a dual-sided scoreboard.
//! The game controller speaks a line-oriented ASCII protocol over UART; this
//! binary wires the board-agnostic display core to the real panel, the real
//! UART and the flash highscore store, then runs the render loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use moleboard_core::Driver;

mod hub75;
mod link;
mod panel;
mod store;

use hub75::Hub75Pins;
use link::UartLink;
use panel::MatrixPanel;
use store::FlashHighscore;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Render loop cadence. The scroll and splash animations count frames, so
/// this sets their real-time speed.
const FRAME_INTERVAL: Duration = Duration::from_millis(4);

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Moleboard firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // UART link to the game controller
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let link = UartLink::new(rx, tx);

    info!("UART initialized for controller link");

    // Flash-backed highscore store (last 64K of flash)
    let store = FlashHighscore::new(p.FLASH, p.DMA_CH0);

    // HUB75 control lines
    let pins = Hub75Pins {
        r1: Output::new(p.PIN_2, Level::Low),
        g1: Output::new(p.PIN_3, Level::Low),
        b1: Output::new(p.PIN_4, Level::Low),
        r2: Output::new(p.PIN_5, Level::Low),
        g2: Output::new(p.PIN_6, Level::Low),
        b2: Output::new(p.PIN_7, Level::Low),
        addr_a: Output::new(p.PIN_8, Level::Low),
        addr_b: Output::new(p.PIN_9, Level::Low),
        addr_c: Output::new(p.PIN_10, Level::Low),
        addr_d: Output::new(p.PIN_11, Level::Low),
        clk: Output::new(p.PIN_12, Level::Low),
        lat: Output::new(p.PIN_13, Level::Low),
        // Blanked until the first row latches
        oe: Output::new(p.PIN_14, Level::High),
    };

    spawner.spawn(hub75::scan_task(pins)).unwrap();
    info!("HUB75 scan running");

    // The driver loads the highscore and starts on the boot banner
    let panel = MatrixPanel::new();
    let mut driver = Driver::new(panel, link, store);

    info!("Display driver running");

    let mut ticker = Ticker::every(FRAME_INTERVAL);
    loop {
        driver.tick();
        ticker.next().await;
    }
}
