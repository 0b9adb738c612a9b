//! Game controller UART link
//!
//! Wraps the buffered UART in the core's `SerialLink` seam. Reads are
//! zero-wait: the render loop polls once per frame and must never stall
//! waiting for the controller, so the read checks readiness first and
//! returns 0 when the RX buffer is empty.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io::{Read, ReadReady, Write};

use moleboard_core::traits::SerialLink;

pub struct UartLink {
    rx: BufferedUartRx,
    tx: BufferedUartTx,
}

impl UartLink {
    pub fn new(rx: BufferedUartRx, tx: BufferedUartTx) -> Self {
        Self { rx, tx }
    }
}

impl SerialLink for UartLink {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        match self.rx.read_ready() {
            Ok(true) => match self.rx.read(buf) {
                Ok(n) => {
                    trace!("rx: {} bytes", n);
                    n
                }
                Err(e) => {
                    warn!("uart read error: {:?}", e);
                    0
                }
            },
            Ok(false) => 0,
            Err(e) => {
                warn!("uart ready error: {:?}", e);
                0
            }
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if let Err(e) = self.tx.write_all(bytes) {
            warn!("uart write error: {:?}", e);
        }
    }
}
