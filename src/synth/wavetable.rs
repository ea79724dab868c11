use std::error::Error;
use std::f32::consts::TAU;
use std::fmt;

/// Waveform shapes the table builder knows how to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// Ramp direction for the sawtooth builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SawDirection {
    Up,
    Down,
}

/// Construction-time failures. Once a table or oscillator is built, the
/// per-sample path cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavetableError {
    /// Zero length, zero harmonics, harmonic count at or above the
    /// band-limiting ceiling, or an empty table handed to an oscillator.
    InvalidParameter(&'static str),
    /// Additive accumulation produced an all-zero table; normalization
    /// is undefined.
    DegenerateTable,
}

impl fmt::Display for WavetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WavetableError::InvalidParameter(reason) => {
                write!(f, "invalid parameter: {}", reason)
            }
            WavetableError::DegenerateTable => {
                write!(f, "degenerate table: all samples are zero")
            }
        }
    }
}

impl Error for WavetableError {}

/// One precomputed cycle of a periodic waveform.
///
/// Holds `length + 1` samples: the sample at index `length` duplicates the
/// one at index 0, so interpolating readers never branch at the wrap point.
/// Tables are immutable once built; share one between oscillators with
/// `Arc<Wavetable>` and it is freed when the last reference drops.
pub struct Wavetable {
    samples: Vec<f32>,
    length: usize,
}

impl Wavetable {
    /// Directly evaluated sine cycle. Already at unit amplitude, so no
    /// normalization pass runs.
    pub fn sine(length: usize) -> Result<Self, WavetableError> {
        if length == 0 {
            return Err(WavetableError::InvalidParameter(
                "table length must be non-zero",
            ));
        }
        let step = TAU / length as f32;
        let mut samples: Vec<f32> = (0..length).map(|i| (step * i as f32).sin()).collect();
        samples.push(samples[0]);
        Ok(Self { samples, length })
    }

    /// Band-limited triangle: odd harmonics weighted 1/h², cosine basis.
    pub fn triangle(length: usize, harmonics: usize) -> Result<Self, WavetableError> {
        let mut table = Self::zeroed(length, harmonics)?;
        let step = TAU / length as f32;
        let mut harmonic = 1u32;
        for _ in 0..harmonics {
            let amp = 1.0 / (harmonic * harmonic) as f32;
            for (j, sample) in table.samples[..length].iter_mut().enumerate() {
                *sample += amp * (step * harmonic as f32 * j as f32).cos();
            }
            harmonic += 2;
        }
        table.normalize()?;
        Ok(table)
    }

    /// Band-limited square: odd harmonics weighted 1/h, sine basis.
    pub fn square(length: usize, harmonics: usize) -> Result<Self, WavetableError> {
        let mut table = Self::zeroed(length, harmonics)?;
        let step = TAU / length as f32;
        let mut harmonic = 1u32;
        for _ in 0..harmonics {
            let amp = 1.0 / harmonic as f32;
            for (j, sample) in table.samples[..length].iter_mut().enumerate() {
                *sample += amp * (step * harmonic as f32 * j as f32).sin();
            }
            harmonic += 2;
        }
        table.normalize()?;
        Ok(table)
    }

    /// Band-limited sawtooth: every harmonic weighted 1/h, sine basis.
    /// The sign of the weights flips with the ramp direction.
    pub fn sawtooth(
        length: usize,
        harmonics: usize,
        direction: SawDirection,
    ) -> Result<Self, WavetableError> {
        let mut table = Self::zeroed(length, harmonics)?;
        let step = TAU / length as f32;
        let sign = match direction {
            SawDirection::Up => -1.0,
            SawDirection::Down => 1.0,
        };
        for harmonic in 1..=harmonics as u32 {
            let amp = sign / harmonic as f32;
            for (j, sample) in table.samples[..length].iter_mut().enumerate() {
                *sample += amp * (step * harmonic as f32 * j as f32).sin();
            }
        }
        table.normalize()?;
        Ok(table)
    }

    /// Build a table from one caller-supplied cycle. The cycle is
    /// normalized and the guard sample appended.
    pub fn from_samples(mut samples: Vec<f32>) -> Result<Self, WavetableError> {
        if samples.is_empty() {
            return Err(WavetableError::InvalidParameter(
                "table length must be non-zero",
            ));
        }
        let length = samples.len();
        samples.push(samples[0]);
        let mut table = Self { samples, length };
        table.normalize()?;
        Ok(table)
    }

    /// Logical period N. The backing storage holds N + 1 samples.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// All `len() + 1` samples, guard included.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Zeroed N+1 table after validating the additive-builder preconditions.
    /// The harmonic ceiling is half the table length: anything at or above
    /// it folds back over Nyquist and aliases.
    fn zeroed(length: usize, harmonics: usize) -> Result<Self, WavetableError> {
        if length == 0 {
            return Err(WavetableError::InvalidParameter(
                "table length must be non-zero",
            ));
        }
        if harmonics == 0 {
            return Err(WavetableError::InvalidParameter(
                "harmonic count must be non-zero",
            ));
        }
        if harmonics >= length / 2 {
            return Err(WavetableError::InvalidParameter(
                "harmonic count must stay below half the table length",
            ));
        }
        Ok(Self {
            samples: vec![0.0; length + 1],
            length,
        })
    }

    /// Scale the cycle so its peak magnitude is 1.0, then refresh the guard
    /// sample. An all-zero cycle has no defined scale and is rejected.
    fn normalize(&mut self) -> Result<(), WavetableError> {
        let max_amp = self.samples[..self.length]
            .iter()
            .fold(0.0f32, |max, s| max.max(s.abs()));
        if max_amp == 0.0 {
            return Err(WavetableError::DegenerateTable);
        }
        let scale = 1.0 / max_amp;
        for sample in &mut self.samples[..self.length] {
            *sample *= scale;
        }
        self.samples[self.length] = self.samples[0];
        Ok(())
    }
}
