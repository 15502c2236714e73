//! The per-step render entry point
//!
//! A `RenderLoop` owns everything a frame needs (canvas, typeface, pacing
//! clock and presenter) and is driven by one `render` call per simulation
//! step. It starts `Running` and moves to `Closed` once the presenter reports
//! a quit event; after that every call is a no-op.

use raster::{Surface, Typeface};
use vizcore::{CoordinateMapper, DisplayConfig, FrameSnapshot, Result};

use crate::clock::FrameClock;
use crate::markers;
use crate::overlay::{TextOverlay, TOP_MARGIN};
use crate::palette::{BACKGROUND, FOREGROUND};
use crate::presenter::{InputEvent, Presenter};
use crate::sprite::DroneSpriteComposer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

/// What a single `render` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Rendering was disabled for this step; nothing was drawn or waited on
    Skipped,
    Presented,
    /// The display is closed. The caller should shut down normally.
    Closed,
}

pub struct RenderLoop<P: Presenter, T: Typeface> {
    config: DisplayConfig,
    mapper: CoordinateMapper,
    composer: DroneSpriteComposer,
    overlay: TextOverlay,
    canvas: Surface,
    clock: FrameClock,
    presenter: P,
    typeface: T,
    state: LoopState,
}

impl<P: Presenter, T: Typeface> RenderLoop<P, T> {
    pub fn new(config: DisplayConfig, presenter: P, typeface: T) -> Result<Self> {
        config.validate()?;
        let canvas = &config.canvas;
        log::info!(
            "render loop {}x{} at {} Hz",
            canvas.width,
            canvas.height,
            canvas.update_frequency
        );
        Ok(Self {
            mapper: CoordinateMapper::for_canvas(canvas),
            composer: DroneSpriteComposer::new(canvas),
            overlay: TextOverlay::new(&config),
            canvas: Surface::filled(canvas.width as usize, canvas.height as usize, BACKGROUND),
            clock: FrameClock::new(canvas.update_frequency)?,
            presenter,
            typeface,
            state: LoopState::Running,
            config,
        })
    }

    /// Draw and present one frame.
    ///
    /// Disabled frames and calls after close return immediately without
    /// touching the canvas, the clock or the presenter.
    pub fn render(&mut self, frame: &FrameSnapshot<'_>) -> Result<FrameOutcome> {
        if !frame.rendering_enabled {
            return Ok(FrameOutcome::Skipped);
        }
        if self.state == LoopState::Closed {
            return Ok(FrameOutcome::Closed);
        }
        frame.validate()?;

        self.clock.tick();
        self.draw(frame)?;
        self.presenter.present(&self.canvas)?;

        let events = self.presenter.poll_events();
        if events.contains(&InputEvent::Quit) {
            log::info!("quit requested after {} frames", self.clock.ticks());
            self.close();
            return Ok(FrameOutcome::Closed);
        }
        if !events.is_empty() {
            log::debug!("ignored {} input events", events.len());
        }
        Ok(FrameOutcome::Presented)
    }

    fn draw(&mut self, frame: &FrameSnapshot<'_>) -> Result<()> {
        self.canvas.fill(BACKGROUND);

        let sprite = self
            .composer
            .compose(frame.motors, frame.action, frame.state.heading, &self.typeface)?;
        let position = frame.state.position;
        sprite.draw_centered(&mut self.canvas, self.mapper.to_screen(position.x, position.y));

        markers::draw_targets(&mut self.canvas, &self.mapper, frame.targets);
        markers::draw_start(&mut self.canvas, &self.mapper, frame.start_position);

        let size = self.overlay.font_size();
        self.overlay
            .state_panel(frame.state)
            .draw(&mut self.canvas, &self.typeface, size, FOREGROUND);
        let stats = self.overlay.stats_panel(&frame.stats, &self.typeface);
        stats.draw(&mut self.canvas, &self.typeface, size, FOREGROUND);

        if self.config.show_agent_panel {
            if let Some(agent) = &frame.agent {
                let top = stats.bottom().unwrap_or(TOP_MARGIN);
                self.overlay
                    .agent_panel(agent, top, &self.typeface)
                    .draw(&mut self.canvas, &self.typeface, size, FOREGROUND);
            }
        }
        if self.config.show_action_panel {
            self.overlay
                .action_panel(frame.action)
                .draw(&mut self.canvas, &self.typeface, size, FOREGROUND);
        }
        Ok(())
    }

    /// Move to `Closed` and release the presenter. Idempotent.
    pub fn close(&mut self) {
        if self.state == LoopState::Running {
            self.state = LoopState::Closed;
            self.presenter.release();
            log::info!("render loop closed");
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == LoopState::Closed
    }

    /// The most recently drawn frame
    pub fn canvas(&self) -> &Surface {
        &self.canvas
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

impl<P: Presenter, T: Typeface> Drop for RenderLoop<P, T> {
    fn drop(&mut self) {
        self.close();
    }
}
