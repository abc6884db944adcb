//! Confetti particle simulation
//!
//! One-shot burst: pieces are emitted from the top edge over a ramp period
//! and fall out of the bottom of the viewport. Pieces are never recycled.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::Viewport;
use crate::consts::REFERENCE_FPS;

/// Gravity in px/s² (0.1 px/frame² at 60 fps)
const GRAVITY: f32 = 0.1 * REFERENCE_FPS * REFERENCE_FPS;
/// Max horizontal launch speed in px/s (4 px/frame)
const MAX_VEL_X: f32 = 4.0 * REFERENCE_FPS;
/// Max upward launch speed in px/s (10 px/frame)
const MAX_VEL_Y: f32 = 10.0 * REFERENCE_FPS;
/// Velocity kept per reference frame
const DRAG_PER_FRAME: f32 = 0.99;
/// Max spin in radians/s (0.2 rad/frame)
const MAX_SPIN: f32 = 0.2 * REFERENCE_FPS;
/// Piece edge length range in px
const MIN_PIECE_SIZE: f32 = 5.0;
const MAX_PIECE_SIZE: f32 = 20.0;
/// Time over which the full piece count is emitted
pub const EMIT_RAMP_SECS: f32 = 5.0;

/// Outline of a confetti piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceShape {
    Square,
    Circle,
    Strip,
}

/// A single piece of confetti (screen space, y grows downward)
#[derive(Debug, Clone)]
pub struct ConfettiPiece {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height in px
    pub size: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Angular velocity in radians/s
    pub spin: f32,
    /// Index into the confetti palette
    pub color: u32,
    pub shape: PieceShape,
}

impl ConfettiPiece {
    /// Largest extent of the piece in any direction
    pub fn extent(&self) -> f32 {
        self.size.x.max(self.size.y)
    }
}

/// The completion-effect particle system
#[derive(Debug, Clone)]
pub struct ConfettiSystem {
    seed: u64,
    rng: Pcg32,
    pieces: Vec<ConfettiPiece>,
    viewport: Viewport,
    /// Pieces to emit over the whole burst
    total: u32,
    emitted: u32,
    palette_len: u32,
    /// Seconds since `start`
    elapsed: f32,
    active: bool,
}

impl ConfettiSystem {
    pub fn new(seed: u64, total: u32, palette_len: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            pieces: Vec::with_capacity(total as usize),
            viewport: Viewport::default(),
            total,
            emitted: 0,
            palette_len: palette_len.max(1),
            elapsed: 0.0,
            active: false,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn emitted(&self) -> u32 {
        self.emitted
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Begin the burst. Calling again while active has no effect.
    pub fn start(&mut self, viewport: Viewport) {
        if self.active || self.emitted > 0 {
            return;
        }
        self.viewport = viewport;
        self.active = true;
        self.elapsed = 0.0;
        log::debug!(
            "Confetti started: {} pieces over {}x{}",
            self.total,
            viewport.width,
            viewport.height
        );
    }

    /// Every piece emitted and none left on screen
    pub fn is_finished(&self) -> bool {
        self.emitted >= self.total && self.pieces.is_empty()
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Advance the simulation by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.elapsed += dt;
        self.emit_due();

        let drag = DRAG_PER_FRAME.powf(dt * REFERENCE_FPS);
        for piece in self.pieces.iter_mut() {
            piece.vel.y += GRAVITY * dt;
            piece.vel *= drag;
            piece.pos += piece.vel * dt;
            piece.rotation += piece.spin * dt;
        }

        let floor = self.viewport.height;
        self.pieces.retain(|p| p.pos.y - p.extent() <= floor);

        if self.is_finished() {
            self.active = false;
            log::debug!("Confetti finished");
        }
    }

    /// Emit pieces following a linear ramp over `EMIT_RAMP_SECS`
    fn emit_due(&mut self) {
        let progress = (self.elapsed / EMIT_RAMP_SECS).min(1.0);
        let target = ((self.total as f32 * progress).ceil() as u32).min(self.total);
        while self.emitted < target {
            let piece = self.spawn_piece();
            self.pieces.push(piece);
            self.emitted += 1;
        }
    }

    fn spawn_piece(&mut self) -> ConfettiPiece {
        let width = self.viewport.width.max(1.0);
        let shape = match self.rng.random_range(0..3) {
            0 => PieceShape::Square,
            1 => PieceShape::Circle,
            _ => PieceShape::Strip,
        };
        let size = Vec2::new(
            self.rng.random_range(MIN_PIECE_SIZE..=MAX_PIECE_SIZE),
            self.rng.random_range(MIN_PIECE_SIZE..=MAX_PIECE_SIZE),
        );

        ConfettiPiece {
            pos: Vec2::new(self.rng.random_range(0.0..=width), 0.0),
            vel: Vec2::new(
                self.rng.random_range(-MAX_VEL_X..=MAX_VEL_X),
                self.rng.random_range(-MAX_VEL_Y..=0.0),
            ),
            size,
            rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
            spin: self.rng.random_range(-MAX_SPIN..=MAX_SPIN),
            color: self.rng.random_range(0..self.palette_len),
            shape,
        }
    }
}
