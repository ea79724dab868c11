use crate::audio::{AudioBackend, CpalBackend};
use crate::input::KeyboardHandler;
use crate::synth::note::NoteEvent;
use crate::synth::{Synth, SynthConfig};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Native runtime wrapper: the engine plus the note-event queue drained at
/// the top of every audio callback.
pub struct NativeSynth {
    synth: Synth,
    note_receiver: Receiver<NoteEvent>,
}

impl NativeSynth {
    pub fn new(
        config: SynthConfig,
        note_receiver: Receiver<NoteEvent>,
    ) -> Result<Self, crate::synth::wavetable::WavetableError> {
        Ok(Self {
            synth: Synth::new(config)?,
            note_receiver,
        })
    }

    pub fn process(&mut self, output: &mut [f32]) {
        self.process_note_events();
        self.synth.process(output);
    }

    fn process_note_events(&mut self) {
        while let Ok(event) = self.note_receiver.try_recv() {
            if event.is_on {
                self.synth.note_on(&event);
            } else {
                self.synth.note_off(&event);
            }
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.synth.set_sample_rate(sample_rate);
    }
}

pub fn start() {
    let (note_tx, note_rx) = channel();

    let synth = NativeSynth::new(SynthConfig::default(), note_rx)
        .expect("Failed to build wavetable synth");
    let synth = Arc::new(Mutex::new(synth));

    let mut audio_backend = CpalBackend::new(synth.clone());
    audio_backend.start();

    let mut keyboard_handler = KeyboardHandler::new(note_tx);

    println!("Keys Z..=/ play semitones above 440Hz. Press the up arrow to quit.");
    loop {
        keyboard_handler.update();
        if keyboard_handler.exit_requested() {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }

    audio_backend.stop();
}
