//! Output backends for finished frames

use std::collections::VecDeque;

use raster::Surface;
use vizcore::Result;

/// Input relevant to the render loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked to close the display
    Quit,
    Other,
}

/// Something that can show a finished canvas and report user input.
///
/// The render loop owns its presenter and calls `release` exactly once, when
/// it closes or is dropped.
pub trait Presenter {
    fn present(&mut self, frame: &Surface) -> Result<()>;

    /// Events received since the previous poll, oldest first
    fn poll_events(&mut self) -> Vec<InputEvent>;

    fn release(&mut self);
}

/// Counts presented frames without showing or copying them.
///
/// Used by the Python bindings, the `--headless` demo and tests; the pixels
/// stay in the render loop's canvas. Input events are injected with
/// [`HeadlessPresenter::push_event`].
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    last_size: Option<[usize; 2]>,
    presented: u64,
    pending: VecDeque<InputEvent>,
    released: bool,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    /// Size of the most recently presented frame
    pub fn last_size(&self) -> Option<[usize; 2]> {
        self.last_size
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, frame: &Surface) -> Result<()> {
        self.last_size = Some(frame.size());
        self.presented += 1;
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }

    fn release(&mut self) {
        if !self.released {
            log::debug!("headless presenter released after {} frames", self.presented);
        }
        self.released = true;
        self.pending.clear();
    }
}
