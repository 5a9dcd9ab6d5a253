//! Frame-stepped reimplementation of the control logic of Gopher (Atari
//! 2600, U.S. Games 1982), byte-accurate against RAM snapshots recorded
//! from the original cartridge.
//!
//! The crate models one television frame per `tick`: all game variables
//! live in a 128-byte [`mem::MemoryImage`] laid out exactly like the
//! cartridge's zero page, arithmetic goes through the carry-threading
//! helpers in [`alu`], and everything the display kernel would draw is
//! reduced to the sprite selections in [`game::render::RenderState`].
//! There is no timing, no audio synthesis and no pixel output here; the
//! validation crate replays recorded traces against this core.

pub mod alu;
pub mod game;
pub mod mem;

pub mod prelude {
    pub use crate::game::input::{Action, InputLatches};
    pub use crate::game::render::RenderState;
    pub use crate::game::{GameState, Gopher};
    pub use crate::mem::{MemoryImage, RAM_SIZE, field, field_name};
}
