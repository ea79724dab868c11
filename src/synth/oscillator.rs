use std::sync::Arc;

use super::wavetable::{Wavetable, WavetableError};

/// Table-lookup oscillator with a floating-point phase accumulator and
/// linear interpolation between adjacent table samples.
///
/// The table is shared and read-only; any number of oscillators may point at
/// the same `Arc<Wavetable>` from their own voices.
pub struct WavetableOscillator {
    table: Arc<Wavetable>,
    /// Current position in the table, kept in [0, table_len).
    phase: f32,
    /// Last requested frequency in Hz. The increment is only recomputed
    /// when a tick asks for a different frequency.
    frequency: f32,
    /// Phase advance per sample for the cached frequency.
    increment: f32,
    table_len: f32,
    /// table_len / sample_rate, precomputed so steady-pitch ticks never
    /// divide.
    size_over_sr: f32,
}

impl WavetableOscillator {
    /// `initial_phase` is a fraction of the period in [0, 1).
    pub fn new(
        sample_rate: f32,
        table: Arc<Wavetable>,
        initial_phase: f32,
    ) -> Result<Self, WavetableError> {
        if table.is_empty() {
            return Err(WavetableError::InvalidParameter(
                "oscillator requires a non-empty wavetable",
            ));
        }
        let table_len = table.len() as f32;
        Ok(Self {
            phase: table_len * initial_phase,
            frequency: 0.0,
            increment: 0.0,
            size_over_sr: table_len / sample_rate,
            table_len,
            table,
        })
    }

    /// Re-derive the cached scale factor for a new sample rate. Call before
    /// the audio stream starts; the phase is left where it was.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.size_over_sr = self.table_len / sample_rate;
        self.increment = self.size_over_sr * self.frequency;
    }

    /// Produce the next sample at the given frequency in Hz.
    ///
    /// Negative frequencies play the table backwards. The wrap subtracts or
    /// adds the period iteratively, which stays correct for increments
    /// larger than the table itself.
    pub fn tick(&mut self, frequency: f32) -> f32 {
        if self.frequency != frequency {
            self.frequency = frequency;
            self.increment = self.size_over_sr * frequency;
        }

        let base_index = self.phase as usize;
        let frac = self.phase - base_index as f32;
        let samples = self.table.samples();
        let value = samples[base_index];
        // Guard sample keeps base_index + 1 in bounds at the wrap point.
        let slope = samples[base_index + 1] - value;
        let output = value + frac * slope;

        let mut phase = self.phase + self.increment;
        while phase >= self.table_len {
            phase -= self.table_len;
        }
        while phase < 0.0 {
            phase += self.table_len;
        }
        // f32 addition can land exactly on the boundary when wrapping up
        // from a small negative phase.
        if phase >= self.table_len {
            phase -= self.table_len;
        }
        self.phase = phase;

        output
    }

    /// Current table position in [0, len), for callers that want to
    /// synchronize or visualize the cycle.
    pub fn phase(&self) -> f32 {
        self.phase
    }
}
