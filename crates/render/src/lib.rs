//! Frame rendering for the drone simulation
//!
//! This crate provides:
//! - The drone sprite composer (body, struts and rotated motor glyphs)
//! - Target crosshairs and the start marker
//! - The text overlay panels
//! - The paced render loop and the presenter abstraction it draws through

pub mod clock;
pub mod markers;
pub mod overlay;
pub mod palette;
pub mod presenter;
pub mod render_loop;
pub mod sprite;

#[cfg(test)]
pub(crate) mod testing;

pub use clock::FrameClock;
pub use overlay::{Panel, TextLine, TextOverlay};
pub use presenter::{HeadlessPresenter, InputEvent, Presenter};
pub use render_loop::{FrameOutcome, LoopState, RenderLoop};
pub use sprite::{DroneSprite, DroneSpriteComposer};
