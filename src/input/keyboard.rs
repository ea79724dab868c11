use crate::synth::note::NoteEvent;
use device_query::{DeviceQuery, DeviceState, Keycode};
use std::sync::mpsc::Sender;

/// Bottom-row piano layout: each key is one semitone above the previous,
/// starting at the base frequency on Z.
const KEY_MAP: [Keycode; 16] = [
    Keycode::Z,
    Keycode::S,
    Keycode::X,
    Keycode::C,
    Keycode::F,
    Keycode::V,
    Keycode::G,
    Keycode::B,
    Keycode::N,
    Keycode::J,
    Keycode::M,
    Keycode::K,
    Keycode::Comma,
    Keycode::L,
    Keycode::Dot,
    Keycode::Slash,
];

pub struct KeyboardHandler {
    device_state: DeviceState,
    note_sender: Sender<NoteEvent>,
    /// Semitone of the currently sounding key, if any. One note at a time;
    /// pressing a different mapped key retriggers at the new pitch.
    current_semitone: Option<u8>,
}

impl KeyboardHandler {
    pub fn new(note_sender: Sender<NoteEvent>) -> Self {
        Self {
            device_state: DeviceState::new(),
            note_sender,
            current_semitone: None,
        }
    }

    /// Poll the keyboard once and emit note transitions.
    pub fn update(&mut self) {
        let keys: Vec<Keycode> = self.device_state.get_keys();

        let pressed = KEY_MAP
            .iter()
            .position(|key| keys.contains(key))
            .map(|semitone| semitone as u8);

        match (pressed, self.current_semitone) {
            (Some(semitone), current) if current != Some(semitone) => {
                if let Err(e) = self.note_sender.send(NoteEvent::on(semitone)) {
                    eprintln!("Error sending note on event: {}", e);
                }
                self.current_semitone = Some(semitone);
            }
            (None, Some(semitone)) => {
                if let Err(e) = self.note_sender.send(NoteEvent::off(semitone)) {
                    eprintln!("Error sending note off event: {}", e);
                }
                self.current_semitone = None;
            }
            _ => {}
        }
    }

    /// The up arrow ends the session.
    pub fn exit_requested(&self) -> bool {
        self.device_state.get_keys().contains(&Keycode::Up)
    }
}
