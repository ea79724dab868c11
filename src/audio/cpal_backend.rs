use crate::audio::AudioBackend;
use crate::runtime::NativeSynth;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};
use std::sync::{Arc, Mutex};

/// Frames requested per callback. The host may still pick its own size;
/// the callback renders whatever it is handed.
const FRAMES_PER_BUFFER: u32 = 256;

pub struct CpalBackend {
    stream: Option<Stream>,
    synth: Arc<Mutex<NativeSynth>>,
}

impl CpalBackend {
    pub fn new(synth: Arc<Mutex<NativeSynth>>) -> Self {
        Self {
            stream: None,
            synth,
        }
    }

    fn build_stream(&mut self) -> Result<Stream, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No output device available")?;
        println!("Output device: {}", device.name().unwrap_or_default());

        let supported_config = device.default_output_config()?;
        if supported_config.sample_format() != SampleFormat::F32 {
            return Err("Unsupported sample format".into());
        }
        let mut stream_config: cpal::StreamConfig = supported_config.into();
        stream_config.buffer_size = cpal::BufferSize::Fixed(FRAMES_PER_BUFFER);

        let sample_rate = stream_config.sample_rate.0 as f32;
        let channels = stream_config.channels as usize;

        {
            let mut synth = self.synth.lock().unwrap();
            synth.set_sample_rate(sample_rate);
        }

        let synth = self.synth.clone();
        let mut mono = Vec::new();
        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let frames = data.len() / channels;
                mono.resize(frames, 0.0);
                {
                    let mut synth = synth.lock().unwrap();
                    synth.process(&mut mono);
                }
                // Same mono sample on every channel of the frame.
                for (frame, &sample) in data.chunks_mut(channels).zip(mono.iter()) {
                    for out in frame.iter_mut() {
                        *out = sample;
                    }
                }
            },
            |err| eprintln!("Stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }
}

impl AudioBackend for CpalBackend {
    fn start(&mut self) {
        match self.build_stream() {
            Ok(stream) => {
                stream.play().expect("Failed to start stream");
                self.stream = Some(stream);
            }
            Err(e) => eprintln!("Failed to build output stream: {}", e),
        }
    }

    fn stop(&mut self) {
        if let Some(stream) = &self.stream {
            stream.pause().expect("Failed to stop stream");
        }
    }
}
