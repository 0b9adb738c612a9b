//! Moleboard serial protocol
//!
//! This crate defines the UART-based protocol between the game controller
//! and the scoreboard display. The protocol is plain ASCII, one command per
//! frame, where a frame ends at a newline or at the end of a read chunk:
//!
//! ```text
//! #p1:<int>#p2:<int>#loop:<int>   score update
//! #CONREADY                       handshake; display answers "DSPREADY"
//! #SHOWSPLASH                     enter attract mode
//! #SHOWPRESSSTART                 "press start" prompt
//! #SHOWHIGHSCORE                  show stored highscore
//! #NEWGAME                        "new game" banner
//! #GAMEREADY:READY|SET|GO         round countdown
//! #ISP1READY / #ISP2READY         waiting-for-opponent prompts
//! #PLAYER1WIN:<int> / #PLAYER2WIN:<int>
//! #TIEGAME:<int>
//! ```
//!
//! Decoding is total: any frame that matches nothing above becomes
//! [`Command::Unknown`] carrying the raw bytes, so the display can surface
//! protocol glitches instead of dropping them.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{Command, Player, Stage};
pub use line::{frames, Frames, READ_CHUNK};

/// Handshake reply sent back to the controller for every `#CONREADY`.
///
/// The controller resends `#CONREADY` until it sees this, so the reply must
/// go out on every decode, not just the first.
pub const DISPLAY_READY: &[u8] = b"DSPREADY";
