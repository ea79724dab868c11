use super::wavetable::{SawDirection, Waveform, Wavetable, WavetableError};

/// Engine configuration: which table to build, the pitch of the bottom key,
/// the assumed sample rate until the audio backend reports the real one,
/// and the envelope shape.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    pub table_length: usize,
    pub harmonics: usize,
    pub waveform: Waveform,
    pub saw_direction: SawDirection,
    pub base_frequency: f32,
    pub sample_rate: f32,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl SynthConfig {
    /// Build the configured wavetable.
    pub fn build_table(&self) -> Result<Wavetable, WavetableError> {
        match self.waveform {
            Waveform::Sine => Wavetable::sine(self.table_length),
            Waveform::Triangle => Wavetable::triangle(self.table_length, self.harmonics),
            Waveform::Square => Wavetable::square(self.table_length, self.harmonics),
            Waveform::Sawtooth => {
                Wavetable::sawtooth(self.table_length, self.harmonics, self.saw_direction)
            }
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            table_length: 200,
            harmonics: 5,
            waveform: Waveform::Sawtooth,
            saw_direction: SawDirection::Down,
            base_frequency: 440.0,
            sample_rate: 44_100.0,
            attack: 0.10,
            decay: 0.02,
            sustain: 0.8,
            release: 2.0,
        }
    }
}
