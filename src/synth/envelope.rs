/// Four-phase amplitude envelope driven by transport time.
///
/// There is no explicit stage field: `amplitude` derives the stage from the
/// elapsed time since the last trigger, so the output is a pure function of
/// the clock plus the two recorded trigger timestamps.
#[derive(Debug, Clone)]
pub struct EnvelopeGenerator {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    pub start_amplitude: f32,
    note_on: bool,
    on_time: f64,
    off_time: f64,
}

/// Computed amplitudes at or below this are snapped to exact silence.
const SILENCE_FLOOR: f32 = 1e-4;

impl EnvelopeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_params(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack = attack;
        self.decay = decay;
        self.sustain = sustain;
        self.release = release;
    }

    /// Record a trigger. Retriggering is legal at any moment, including
    /// mid-release; the amplitude jumps straight into the new attack ramp.
    pub fn note_on(&mut self, time: f64) {
        self.on_time = time;
        self.note_on = true;
    }

    pub fn note_off(&mut self, time: f64) {
        self.off_time = time;
        self.note_on = false;
    }

    pub fn is_note_on(&self) -> bool {
        self.note_on
    }

    /// Amplitude at transport time `time`, in [0, start_amplitude].
    pub fn amplitude(&self, time: f64) -> f32 {
        let amplitude = if self.note_on {
            let life = (time - self.on_time) as f32;
            if life <= self.attack {
                // Attack: approach the start amplitude
                (life / self.attack) * self.start_amplitude
            } else if life <= self.attack + self.decay {
                // Decay: fall to the sustained amplitude
                ((life - self.attack) / self.decay) * (self.sustain - self.start_amplitude)
                    + self.start_amplitude
            } else {
                // Sustain: hold until the note is released
                self.sustain
            }
        } else {
            // Release: ramp from the sustain level toward zero
            let released = (time - self.off_time) as f32;
            (released / self.release) * (0.0 - self.sustain) + self.sustain
        };

        if amplitude <= SILENCE_FLOOR {
            0.0
        } else {
            amplitude
        }
    }
}

impl Default for EnvelopeGenerator {
    fn default() -> Self {
        Self {
            attack: 0.10,
            decay: 0.02,
            sustain: 0.8,
            release: 2.0,
            start_amplitude: 1.0,
            note_on: false,
            on_time: 0.0,
            off_time: 0.0,
        }
    }
}
