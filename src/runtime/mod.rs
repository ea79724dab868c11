pub mod native;
pub use native::{start, NativeSynth};
