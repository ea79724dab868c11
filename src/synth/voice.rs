use std::sync::Arc;

use super::envelope::EnvelopeGenerator;
use super::oscillator::WavetableOscillator;
use super::wavetable::{Wavetable, WavetableError};

/// One note-producing unit: a table-lookup oscillator shaped by an
/// amplitude envelope.
pub struct Voice {
    oscillator: WavetableOscillator,
    envelope: EnvelopeGenerator,
    /// Frequency of the most recent note. Kept after note-off so the
    /// release tail finishes at the last pitch.
    frequency: f32,
    sample_rate: f32,
}

impl Voice {
    pub fn new(
        sample_rate: f32,
        table: Arc<Wavetable>,
        envelope: EnvelopeGenerator,
    ) -> Result<Self, WavetableError> {
        Ok(Self {
            oscillator: WavetableOscillator::new(sample_rate, table, 0.0)?,
            envelope,
            frequency: 0.0,
            sample_rate,
        })
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.oscillator.set_sample_rate(sample_rate);
    }

    pub fn note_on(&mut self, frequency: f32, time: f64) {
        self.frequency = frequency;
        self.envelope.note_on(time);
    }

    pub fn note_off(&mut self, time: f64) {
        self.envelope.note_off(time);
    }

    /// Render one block starting at transport time `start_time`.
    pub fn process(&mut self, output: &mut [f32], start_time: f64) {
        let time_incr = 1.0 / self.sample_rate as f64;
        let mut time = start_time;
        for sample in output.iter_mut() {
            *sample = self.envelope.amplitude(time) * self.oscillator.tick(self.frequency);
            time += time_incr;
        }
    }

    pub fn envelope(&self) -> &EnvelopeGenerator {
        &self.envelope
    }
}
