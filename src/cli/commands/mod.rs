//! CLI command implementations.

mod align;
mod config;
mod doctor;
mod ssml;
mod timecode;

pub use align::{run_align, AlignArgs};
pub use config::run_config;
pub use doctor::run_doctor;
pub use ssml::run_ssml;
pub use timecode::run_timecode;
