//! Board-agnostic display logic for the Moleboard scoreboard
//!
//! Everything that does not touch hardware lives here: the two text labels,
//! the scroll and splash animations, the command-driven display state
//! machine, and the cooperative render loop driver. Hardware enters only
//! through the traits in [`traits`]: a panel surface to present scenes on, a
//! non-blocking serial link to the game controller, and a highscore store.
//!
//! The whole crate is single-threaded by construction. [`driver::Driver`]
//! owns the one [`state::DisplayState`] instance and runs one loop iteration
//! per render frame; nothing else writes label text or position.

#![no_std]
#![deny(unsafe_code)]

pub mod driver;
pub mod label;
pub mod scroll;
pub mod splash;
pub mod state;
pub mod traits;

pub use driver::Driver;
pub use label::{Label, Orientation, ScrollDirection};
pub use scroll::ScrollEngine;
pub use splash::SplashAnimation;
pub use state::{DisplayState, Mode, Reply};
pub use traits::{HighscoreStore, PanelSurface, Scene, SerialLink, SurfaceError};
