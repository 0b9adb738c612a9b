//! Hardware abstraction traits
//!
//! The core logic drives hardware only through these three seams: the panel
//! surface, the serial link to the game controller, and the highscore store.
//! Firmware provides the concrete implementations; tests provide fakes.

pub mod link;
pub mod store;
pub mod surface;

pub use link::SerialLink;
pub use store::HighscoreStore;
pub use surface::{PanelSurface, Scene, SurfaceError};
