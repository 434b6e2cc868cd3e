/// Session state driven by discrete input actions
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::compositor::{Compositor, FrameReport, RenderMode};
use crate::config::RenderConfig;
use crate::framebuffer::PixelBuffer;
use crate::geometry::Mesh;

/// A named input action. Each one is applied between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    RotateXPos,
    RotateXNeg,
    RotateYPos,
    RotateYNeg,
    TranslateXPos,
    TranslateXNeg,
    TranslateYPos,
    TranslateYNeg,
    TranslateZPos,
    TranslateZNeg,
    ToggleWireframe,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::RotateXPos,
        Action::RotateXNeg,
        Action::RotateYPos,
        Action::RotateYNeg,
        Action::TranslateXPos,
        Action::TranslateXNeg,
        Action::TranslateYPos,
        Action::TranslateYNeg,
        Action::TranslateZPos,
        Action::TranslateZNeg,
        Action::ToggleWireframe,
    ];

    /// The DOM `KeyboardEvent.code` bound to this action.
    pub fn key_code(&self) -> &'static str {
        match self {
            Action::RotateXPos => "ArrowUp",
            Action::RotateXNeg => "ArrowDown",
            Action::RotateYPos => "ArrowLeft",
            Action::RotateYNeg => "ArrowRight",
            Action::TranslateXPos => "KeyD",
            Action::TranslateXNeg => "KeyA",
            Action::TranslateYPos => "KeyW",
            Action::TranslateYNeg => "KeyS",
            Action::TranslateZPos => "KeyZ",
            Action::TranslateZNeg => "KeyX",
            Action::ToggleWireframe => "KeyT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key_code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no action bound to key `{0}`")]
pub struct ParseActionError(pub String);

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.key_code() == s)
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// The mesh and display mode carried from frame to frame
#[derive(Debug, Clone)]
pub struct RenderState {
    pub mesh: Mesh,
    pub mode: RenderMode,
    rotate_step: f32,
    translate_step: f32,
}

impl RenderState {
    pub fn new(mesh: Mesh, config: &RenderConfig) -> Self {
        Self {
            mesh,
            mode: RenderMode::default(),
            rotate_step: config.rotate_step_deg,
            translate_step: config.translate_step,
        }
    }

    pub fn apply(&mut self, action: Action) {
        let r = self.rotate_step;
        let t = self.translate_step;
        match action {
            Action::RotateXPos => self.rotate_x(r),
            Action::RotateXNeg => self.rotate_x(-r),
            Action::RotateYPos => self.rotate_y(r),
            Action::RotateYNeg => self.rotate_y(-r),
            Action::TranslateXPos => self.translate(t, 0.0, 0.0),
            Action::TranslateXNeg => self.translate(-t, 0.0, 0.0),
            Action::TranslateYPos => self.translate(0.0, t, 0.0),
            Action::TranslateYNeg => self.translate(0.0, -t, 0.0),
            Action::TranslateZPos => self.translate(0.0, 0.0, t),
            Action::TranslateZNeg => self.translate(0.0, 0.0, -t),
            Action::ToggleWireframe => self.toggle_wireframe(),
        }
    }

    pub fn rotate_x(&mut self, degrees: f32) {
        self.mesh.rotate(degrees, 0.0, 0.0);
    }

    pub fn rotate_y(&mut self, degrees: f32) {
        self.mesh.rotate(0.0, degrees, 0.0);
    }

    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.mesh.translate(dx, dy, dz);
    }

    pub fn toggle_wireframe(&mut self) {
        self.mode = self.mode.toggled();
        log::info!("render mode: {:?}", self.mode);
    }

    pub fn frame(&self, compositor: &Compositor) -> PixelBuffer {
        compositor.render(&self.mesh, self.mode)
    }

    pub fn frame_with_report(&self, compositor: &Compositor) -> (PixelBuffer, FrameReport) {
        compositor.render_with_report(&self.mesh, self.mode)
    }
}
