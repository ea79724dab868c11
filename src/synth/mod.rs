pub mod config;
pub mod core;
pub mod envelope;
pub mod note;
pub mod oscillator;
pub mod voice;
pub mod wavetable;

pub use self::config::SynthConfig;
pub use self::core::Synth;
