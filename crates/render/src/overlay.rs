//! Text panels drawn over the scene
//!
//! Panel layout is computed separately from drawing so the exact lines and
//! their positions can be checked without rasterizing any text.

use egui::Color32;
use nalgebra::Point2;
use raster::{Surface, Typeface};
use vizcore::{AgentSnapshot, DisplayConfig, RunStats, VehicleState};

pub const LINE_HEIGHT: f64 = 25.0;
/// Horizontal offset of value lines under a header
pub const INDENT: f64 = 20.0;
pub const RIGHT_MARGIN: f64 = 20.0;
pub const TOP_MARGIN: f64 = 20.0;
/// Distance of the action panel's first line from the bottom edge
pub const ACTION_PANEL_OFFSET: f64 = 150.0;

const KINEMATIC_LABELS: [&str; 6] = ["X", "vX", "Y", "vY", "angle", "vAngle"];

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Top-left corner of the line
    pub origin: Point2<f64>,
}

/// An ordered stack of positioned text lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    lines: Vec<TextLine>,
}

impl Panel {
    pub fn push(&mut self, text: impl Into<String>, x: f64, y: f64) {
        self.lines.push(TextLine {
            text: text.into(),
            origin: Point2::new(x, y),
        });
    }

    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }

    /// First free y below the panel, if it has any lines
    pub fn bottom(&self) -> Option<f64> {
        self.lines.last().map(|line| line.origin.y + LINE_HEIGHT)
    }

    pub fn draw(&self, surface: &mut Surface, typeface: &dyn Typeface, size: f32, color: Color32) {
        for line in &self.lines {
            typeface.draw(surface, &line.text, line.origin, size, color);
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextOverlay {
    width: f64,
    height: f64,
    font_size: f32,
}

impl TextOverlay {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            width: f64::from(config.canvas.width),
            height: f64::from(config.canvas.height),
            font_size: config.font_size,
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Push `text` so that it ends `RIGHT_MARGIN` px from the right edge
    fn push_right(&self, panel: &mut Panel, text: String, y: f64, typeface: &dyn Typeface) {
        let extent = typeface.measure(&text, self.font_size);
        panel.push(text, self.width - extent.width - RIGHT_MARGIN, y);
    }

    /// Kinematics, domain parameters and the target block, top-left
    pub fn state_panel(&self, state: &VehicleState) -> Panel {
        let mut panel = Panel::default();
        let mut y = 0.0;

        panel.push("State:", 0.0, y);
        y += LINE_HEIGHT;
        for (label, value) in KINEMATIC_LABELS.iter().zip(state.kinematics()) {
            panel.push(format!("{label}: {value:.2}"), INDENT, y);
            y += LINE_HEIGHT;
        }

        y += LINE_HEIGHT;
        panel.push("Domain parameters:", 0.0, y);
        y += LINE_HEIGHT;
        for parameter in &state.domain_parameters {
            panel.push(format!("{}: {:.2}", parameter.label, parameter.value), INDENT, y);
            y += LINE_HEIGHT;
        }

        y += LINE_HEIGHT;
        panel.push("Targets:", 0.0, y);
        y += LINE_HEIGHT;
        for (k, target) in state.target_block.iter().enumerate() {
            panel.push(format!("T{}: ({:.2}, {:.2})", k + 1, target.x, target.y), INDENT, y);
            y += LINE_HEIGHT;
        }
        panel
    }

    /// Episode counters, right-aligned at the top
    pub fn stats_panel(&self, stats: &RunStats, typeface: &dyn Typeface) -> Panel {
        let mut panel = Panel::default();
        let lines = [
            format!("Frame: {}", stats.episode_step),
            format!("Frames without target: {}", stats.frames_without_target),
            format!("Reward: {:.2}", stats.last_reward),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            self.push_right(&mut panel, text, TOP_MARGIN + i as f64 * LINE_HEIGHT, typeface);
        }
        panel
    }

    /// Agent counters, right-aligned starting at `top`
    pub fn agent_panel(&self, agent: &AgentSnapshot, top: f64, typeface: &dyn Typeface) -> Panel {
        let mut panel = Panel::default();
        self.push_right(&mut panel, format!("Game: {}", agent.games), top, typeface);
        self.push_right(
            &mut panel,
            format!("Epsilon: {:.1}", agent.epsilon * 100.0),
            top + LINE_HEIGHT,
            typeface,
        );
        panel
    }

    /// Raw action values as rounded percentages, bottom-left
    pub fn action_panel(&self, action: &[f64]) -> Panel {
        let mut panel = Panel::default();
        let mut y = self.height - ACTION_PANEL_OFFSET;
        panel.push("Action:", 0.0, y);
        for (i, value) in action.iter().enumerate() {
            y += LINE_HEIGHT;
            panel.push(format!("{i}: {:.0}", value * 100.0), 0.0, y);
        }
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BlockFont;
    use vizcore::CanvasConfig;

    fn overlay() -> TextOverlay {
        TextOverlay::new(&DisplayConfig::default().with_canvas(CanvasConfig::new(800, 600, 60.0)))
    }

    fn state(targets: usize) -> VehicleState {
        let mut values = vec![0.123, -1.0, 0.5, 0.0, 1.5708, 0.25, 1.0, 0.05, 9.81];
        for t in 0..targets {
            values.extend([0.1 * t as f64, -0.2]);
        }
        VehicleState::from_flat(&values, targets * 2).unwrap()
    }

    #[test]
    fn test_state_panel_lines() {
        let panel = overlay().state_panel(&state(2));
        assert_eq!(
            panel.texts(),
            [
                "State:",
                "X: 0.12",
                "vX: -1.00",
                "Y: 0.50",
                "vY: 0.00",
                "angle: 1.57",
                "vAngle: 0.25",
                "Domain parameters:",
                "mass: 1.00",
                "inertia: 0.05",
                "gravity: 9.81",
                "Targets:",
                "T1: (0.00, -0.20)",
                "T2: (0.10, -0.20)",
            ]
        );
    }

    #[test]
    fn test_state_panel_layout() {
        let panel = overlay().state_panel(&state(1));
        let lines = panel.lines();
        assert_eq!(lines[0].origin, Point2::new(0.0, 0.0));
        assert_eq!(lines[1].origin, Point2::new(INDENT, 25.0));
        assert_eq!(lines[6].origin, Point2::new(INDENT, 150.0));
        // One blank line before each section header.
        assert_eq!(lines[7].text, "Domain parameters:");
        assert_eq!(lines[7].origin, Point2::new(0.0, 200.0));
        assert_eq!(lines[11].text, "Targets:");
        assert_eq!(lines[11].origin, Point2::new(0.0, 325.0));
        assert_eq!(lines[12].origin, Point2::new(INDENT, 350.0));
        assert_eq!(panel.bottom(), Some(375.0));
    }

    #[test]
    fn test_state_panel_target_count_follows_state() {
        let o = overlay();
        for targets in 0..6 {
            let panel = o.state_panel(&state(targets));
            let shown = panel
                .texts()
                .iter()
                .filter(|t| t.starts_with('T') && t.contains(": ("))
                .count();
            assert_eq!(shown, targets);
            assert_eq!(panel.lines().len(), 12 + targets);
        }
    }

    #[test]
    fn test_stats_panel_is_right_aligned() {
        let stats = RunStats {
            episode_step: 12,
            frames_without_target: 340,
            last_reward: -0.456,
        };
        let panel = overlay().stats_panel(&stats, &BlockFont);
        assert_eq!(panel.texts(), ["Frame: 12", "Frames without target: 340", "Reward: -0.46"]);

        for line in panel.lines() {
            let extent = BlockFont.measure(&line.text, 20.0);
            assert_eq!(line.origin.x + extent.width, 800.0 - RIGHT_MARGIN);
        }
        // "Frame: 12" is nine 10 px cells wide.
        assert_eq!(panel.lines()[0].origin, Point2::new(690.0, 20.0));
        assert_eq!(panel.lines()[2].origin.y, 70.0);
        assert_eq!(panel.bottom(), Some(95.0));
    }

    #[test]
    fn test_agent_panel_formats_epsilon_as_percent() {
        let agent = AgentSnapshot {
            games: 7,
            epsilon: 0.4567,
        };
        let panel = overlay().agent_panel(&agent, 95.0, &BlockFont);
        assert_eq!(panel.texts(), ["Game: 7", "Epsilon: 45.7"]);
        assert_eq!(panel.lines()[0].origin, Point2::new(800.0 - 70.0 - 20.0, 95.0));
        assert_eq!(panel.lines()[1].origin.y, 120.0);
    }

    #[test]
    fn test_action_panel_bottom_left() {
        let panel = overlay().action_panel(&[1.0, 0.0, 0.254, 1.0]);
        assert_eq!(panel.texts(), ["Action:", "0: 100", "1: 0", "2: 25", "3: 100"]);
        assert_eq!(panel.lines()[0].origin, Point2::new(0.0, 450.0));
        assert_eq!(panel.lines()[4].origin, Point2::new(0.0, 550.0));
    }

    #[test]
    fn test_empty_panel_has_no_bottom() {
        assert_eq!(Panel::default().bottom(), None);
    }

    #[test]
    fn test_draw_puts_text_at_line_origins() {
        let o = overlay();
        let mut surface = Surface::filled(800, 600, Color32::BLACK);
        let mut panel = Panel::default();
        panel.push("ab", 100.0, 40.0);
        panel.draw(&mut surface, &BlockFont, o.font_size(), Color32::WHITE);
        assert_eq!(surface.pixel(101, 45), Some(Color32::WHITE));
        assert_eq!(surface.pixel(111, 45), Some(Color32::WHITE));
        assert_eq!(surface.pixel(125, 45), Some(Color32::BLACK));
    }
}
