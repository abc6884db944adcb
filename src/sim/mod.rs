//! Card simulation module
//!
//! All interactive logic lives here. This module must stay pure:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod confetti;
pub mod schedule;
pub mod sequencer;
pub mod session;
pub mod state;

pub use confetti::{ConfettiPiece, ConfettiSystem, PieceShape};
pub use schedule::{CancellationToken, ScheduledTask};
pub use sequencer::CelebrationSequencer;
pub use session::{CardInput, CardSession, tick};
pub use state::{CardEvent, CardState, completion_reached};
