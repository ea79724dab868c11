use std::sync::Arc;

use super::config::SynthConfig;
use super::envelope::EnvelopeGenerator;
use super::note::NoteEvent;
use super::voice::Voice;
use super::wavetable::{Wavetable, WavetableError};

/// The synthesizer engine: one voice fed from a shared wavetable, plus the
/// transport clock that drives the envelope.
pub struct Synth {
    table: Arc<Wavetable>,
    voice: Voice,
    base_frequency: f32,
    sample_rate: f32,
    /// Transport time in seconds, advanced by every rendered sample. Note
    /// triggers are stamped with this clock, so envelope evaluation and
    /// triggering share one time domain.
    time: f64,
}

impl Synth {
    /// Builds the wavetable and the voice up front; nothing allocates once
    /// the audio stream is running.
    pub fn new(config: SynthConfig) -> Result<Self, WavetableError> {
        let table = Arc::new(config.build_table()?);
        let mut envelope = EnvelopeGenerator::new();
        envelope.set_params(config.attack, config.decay, config.sustain, config.release);
        let voice = Voice::new(config.sample_rate, table.clone(), envelope)?;
        Ok(Self {
            table,
            voice,
            base_frequency: config.base_frequency,
            sample_rate: config.sample_rate,
            time: 0.0,
        })
    }

    /// Adopt the audio device's real sample rate. Called by the backend
    /// after the stream is configured, before it starts.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        println!("Sample rate set to: {}", sample_rate);
        self.sample_rate = sample_rate;
        self.voice.set_sample_rate(sample_rate);
    }

    pub fn note_on(&mut self, event: &NoteEvent) {
        let frequency = event.frequency(self.base_frequency);
        println!("Note on : {:.3}s {:.1}Hz", self.time, frequency);
        self.voice.note_on(frequency, self.time);
    }

    pub fn note_off(&mut self, _event: &NoteEvent) {
        println!("Note off: {:.3}s", self.time);
        self.voice.note_off(self.time);
    }

    /// Render one mono block and advance the transport clock.
    pub fn process(&mut self, output: &mut [f32]) {
        self.voice.process(output, self.time);
        self.time += output.len() as f64 / self.sample_rate as f64;
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn table(&self) -> &Arc<Wavetable> {
        &self.table
    }
}
