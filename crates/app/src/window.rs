//! Native window backed by eframe

use std::time::Duration;

use raster::{GlyphFont, Surface};
use render::{FrameOutcome, InputEvent, Presenter, RenderLoop};
use vizcore::{DisplayConfig, Result};

use crate::demo::DemoSim;

/// Uploads each presented frame into an egui texture.
///
/// Closing the window or pressing Escape is reported as [`InputEvent::Quit`].
pub struct EguiPresenter {
    ctx: egui::Context,
    texture: Option<egui::TextureHandle>,
}

impl EguiPresenter {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx, texture: None }
    }

    pub fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }
}

impl Presenter for EguiPresenter {
    fn present(&mut self, frame: &Surface) -> Result<()> {
        let image = frame.to_color_image();
        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, egui::TextureOptions::NEAREST);
        } else {
            let texture = self
                .ctx
                .load_texture("drone-frame", image, egui::TextureOptions::NEAREST);
            self.texture = Some(texture);
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let (close, escape) = self
            .ctx
            .input(|i| (i.viewport().close_requested(), i.key_pressed(egui::Key::Escape)));
        if close || escape {
            vec![InputEvent::Quit]
        } else {
            Vec::new()
        }
    }

    fn release(&mut self) {
        self.texture = None;
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

pub struct DroneApp {
    sim: DemoSim,
    render: RenderLoop<EguiPresenter, GlyphFont>,
}

impl DroneApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: DisplayConfig,
        typeface: GlyphFont,
        seed: u64,
    ) -> Result<Self> {
        let render = RenderLoop::new(config, EguiPresenter::new(cc.egui_ctx.clone()), typeface)?;
        Ok(Self {
            sim: DemoSim::new(seed),
            render,
        })
    }
}

impl eframe::App for DroneApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.render.is_closed() {
            let report = self.sim.step();
            if report.episode_over {
                let agent = self.sim.agent();
                log::info!("game {} finished, epsilon {:.3}", agent.games, agent.epsilon);
            }
            match self.render.render(&self.sim.snapshot(true)) {
                Ok(FrameOutcome::Closed) => log::info!("window closed"),
                Ok(_) => {}
                Err(err) => {
                    log::error!("frame failed: {err}");
                    self.render.close();
                }
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if let Some(texture) = self.render.presenter().texture() {
                    ui.image((texture.id(), texture.size_vec2()));
                }
            });

        // The render loop paces itself; this only keeps frames coming.
        ctx.request_repaint_after(Duration::from_millis(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;

    #[test]
    fn test_present_uploads_and_reuses_texture() {
        let mut presenter = EguiPresenter::new(egui::Context::default());
        assert!(presenter.texture().is_none());

        presenter.present(&Surface::filled(8, 6, Color32::BLACK)).unwrap();
        let id = presenter.texture().map(|t| t.id());
        assert_eq!(presenter.texture().map(|t| t.size()), Some([8, 6]));

        presenter.present(&Surface::filled(8, 6, Color32::WHITE)).unwrap();
        assert_eq!(presenter.texture().map(|t| t.id()), id);
    }

    #[test]
    fn test_no_quit_without_input() {
        let mut presenter = EguiPresenter::new(egui::Context::default());
        assert!(presenter.poll_events().is_empty());
    }

    #[test]
    fn test_release_drops_texture() {
        let mut presenter = EguiPresenter::new(egui::Context::default());
        presenter.present(&Surface::new(4, 4)).unwrap();
        presenter.release();
        assert!(presenter.texture().is_none());
    }
}
