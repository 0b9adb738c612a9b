//! Highscore flash persistence
//!
//! Wear-leveled key-value storage in the last 64KB of flash, via
//! sequential-storage. The highscore is stored as a line of ASCII decimal,
//! so a corrupted or missing record reads as 0 rather than a garbage score.
//!
//! The store seam is synchronous; flash operations are rare (one read at
//! boot, one write per new highscore) so blocking the render loop on them
//! is fine.

use core::fmt::Write;
use core::ops::Range;

use defmt::*;
use embassy_futures::block_on;
use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use moleboard_core::traits::HighscoreStore;

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const STORE_PARTITION_SIZE: usize = 64 * 1024;
pub const STORE_PARTITION_START: usize = FLASH_SIZE - STORE_PARTITION_SIZE;

/// Flash range for the highscore partition
pub const STORE_RANGE: Range<u32> = (STORE_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Storage keys for persisted data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// All-time highscore, ASCII decimal
    Highscore = 0,
}

impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = *self as u8;
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        match buffer.first() {
            Some(0) => Ok((StorageKey::Highscore, 1)),
            Some(_) => Err(sequential_storage::map::SerializationError::InvalidFormat),
            None => Err(sequential_storage::map::SerializationError::BufferTooSmall),
        }
    }
}

/// Flash-backed highscore store
pub struct FlashHighscore<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> FlashHighscore<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl HighscoreStore for FlashHighscore<'_> {
    fn load(&mut self) -> u32 {
        let mut data_buffer = [0u8; 64];

        let result = block_on(map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &StorageKey::Highscore,
        ));

        match result {
            Ok(Some(data)) => {
                let value = parse_decimal_line(data);
                info!("loaded highscore: {}", value);
                value
            }
            Ok(None) => {
                info!("no stored highscore");
                0
            }
            Err(_) => {
                warn!("highscore read failed, starting from 0");
                0
            }
        }
    }

    fn save(&mut self, value: u32) {
        let mut text: heapless::String<12> = heapless::String::new();
        // u32 always fits in 12 bytes with the newline
        let _ = write!(text, "{}\n", value);

        let mut data_buffer = [0u8; 64];
        let result = block_on(map::store_item(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut data_buffer,
            &StorageKey::Highscore,
            &text.as_bytes(),
        ));

        match result {
            Ok(()) => info!("saved highscore: {}", value),
            Err(_) => warn!("highscore write failed, keeping {} in memory only", value),
        }
    }
}

/// Parse the first line of the record as a decimal score.
///
/// Anything malformed reads as 0.
fn parse_decimal_line(data: &[u8]) -> u32 {
    let line = data.split(|&b| b == b'\n').next().unwrap_or(data);
    match core::str::from_utf8(line) {
        Ok(text) => text.trim().parse().unwrap_or(0),
        Err(_) => 0,
    }
}
