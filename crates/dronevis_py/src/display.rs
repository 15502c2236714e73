//! Off-screen display bindings

use numpy::ndarray::Array3;
use numpy::{IntoPyArray, PyArray3};
use nalgebra::Point2;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use raster::GlyphFont;
use render::{FrameOutcome, HeadlessPresenter, RenderLoop};
use vizcore::{
    targets_from_flat, AgentSnapshot, CanvasConfig, DisplayConfig, FrameSnapshot, Motor,
    RunStats, VehicleState, VizError,
};

fn to_py_err(err: VizError) -> PyErr {
    match err {
        VizError::Io(_) | VizError::Font(_) | VizError::Backend(_) => {
            PyRuntimeError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Renders drone frames into numpy arrays
#[pyclass(name = "Display", unsendable)]
pub struct PyDisplay {
    inner: RenderLoop<HeadlessPresenter, GlyphFont>,
}

#[pymethods]
impl PyDisplay {
    /// Create an off-screen display
    ///
    /// Args:
    ///     width, height: canvas size in pixels
    ///     update_frequency: maximum frames per second
    ///     font_path: TrueType font for the text panels (bundled font if None)
    ///     show_agent_panel: draw game count and epsilon when an agent is given
    ///     show_action_panel: draw action percentages bottom-left
    #[new]
    #[pyo3(signature = (
        width=800,
        height=600,
        update_frequency=60.0,
        font_path=None,
        show_agent_panel=true,
        show_action_panel=false,
    ))]
    fn new(
        width: u32,
        height: u32,
        update_frequency: f64,
        font_path: Option<std::path::PathBuf>,
        show_agent_panel: bool,
        show_action_panel: bool,
    ) -> PyResult<Self> {
        let canvas = CanvasConfig::new(width, height, update_frequency);
        let mut config = DisplayConfig::default().with_canvas(canvas);
        config.font_path = font_path;
        config.show_agent_panel = show_agent_panel;
        config.show_action_panel = show_action_panel;

        let typeface = GlyphFont::load(config.font_path.as_deref()).map_err(to_py_err)?;
        let inner = RenderLoop::new(config, HeadlessPresenter::new(), typeface).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Render one frame
    ///
    /// Args:
    ///     state: flat state vector (x, vx, y, vy, angle, vangle, domain..., targets...)
    ///     motors: list of (x, y, angle_deg) per motor
    ///     action: one activation per motor
    ///     targets: flattened [x0, y0, x1, y1, ...] pending targets
    ///     start: start position (x, y)
    ///     agent: optional (games, epsilon)
    ///     enabled: when False nothing is drawn and None is returned
    ///
    /// Returns:
    ///     (height, width, 4) uint8 RGBA array, or None when skipped or closed
    #[pyo3(signature = (
        state,
        motors,
        action,
        targets,
        start=(0.0, 0.0),
        episode_step=0,
        frames_without_target=0,
        last_reward=0.0,
        agent=None,
        enabled=true,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn render<'py>(
        &mut self,
        py: Python<'py>,
        state: Vec<f64>,
        motors: Vec<(f64, f64, f64)>,
        action: Vec<f64>,
        targets: Vec<f64>,
        start: (f64, f64),
        episode_step: u64,
        frames_without_target: u64,
        last_reward: f64,
        agent: Option<(u64, f64)>,
        enabled: bool,
    ) -> PyResult<Option<Bound<'py, PyArray3<u8>>>> {
        let vehicle = VehicleState::from_flat(&state, targets.len()).map_err(to_py_err)?;
        let points = targets_from_flat(&targets).map_err(to_py_err)?;
        let motors: Vec<Motor> = motors
            .iter()
            .map(|&(x, y, angle)| Motor::new(x, y, angle))
            .collect();

        let mut frame = FrameSnapshot::new(&vehicle, &motors, &action, &points)
            .with_rendering(enabled)
            .with_start(Point2::new(start.0, start.1))
            .with_stats(RunStats {
                episode_step,
                frames_without_target,
                last_reward,
            });
        if let Some((games, epsilon)) = agent {
            frame = frame.with_agent(AgentSnapshot { games, epsilon });
        }

        match self.inner.render(&frame).map_err(to_py_err)? {
            FrameOutcome::Presented => {}
            FrameOutcome::Skipped | FrameOutcome::Closed => return Ok(None),
        }

        let canvas = self.inner.canvas();
        let shape = (canvas.height(), canvas.width(), 4);
        let pixels = Array3::from_shape_vec(shape, canvas.to_rgba_bytes())
            .map_err(|e| to_py_err(VizError::Backend(e.to_string())))?;
        Ok(Some(pixels.into_pyarray_bound(py)))
    }

    /// Map normalized coordinates to canvas pixels
    fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.inner.mapper().to_screen(x, y);
        (p.x, p.y)
    }

    /// Stop rendering; later calls to render return None
    fn close(&mut self) {
        self.inner.close();
    }

    #[getter]
    fn closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Number of frames drawn so far
    #[getter]
    fn frames(&self) -> u64 {
        self.inner.frames()
    }

    #[getter]
    fn size(&self) -> (u32, u32) {
        let canvas = &self.inner.config().canvas;
        (canvas.width, canvas.height)
    }
}
