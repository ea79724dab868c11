use std::sync::Arc;

use rustwavesynth::synth::oscillator::WavetableOscillator;
use rustwavesynth::synth::wavetable::{SawDirection, Wavetable};

/// Distance between two phases on the circular table domain.
fn wrap_distance(a: f32, b: f32, length: f32) -> f32 {
    let d = (a - b).abs() % length;
    d.min(length - d)
}

#[test]
fn initial_phase_is_a_fraction_of_the_period() {
    let table = Arc::new(Wavetable::sine(64).unwrap());
    let osc = WavetableOscillator::new(44_100.0, table, 0.25).unwrap();
    assert!((osc.phase() - 16.0).abs() < 1e-6);
}

#[test]
fn phase_stays_in_range_for_arbitrary_frequencies() {
    let table = Arc::new(Wavetable::sine(64).unwrap());
    let mut osc = WavetableOscillator::new(44_100.0, table, 0.0).unwrap();
    let length = 64.0;

    // Includes negative pitch (reverse playback) and increments far larger
    // than the table period.
    let frequencies = [
        440.0, -880.0, 0.0, 13.7, -13.7, 1.0e6, -1.0e6, 22_050.0, -3.0,
    ];
    for _ in 0..200 {
        for &freq in &frequencies {
            let sample = osc.tick(freq);
            assert!(sample.is_finite());
            assert!(
                (0.0..length).contains(&osc.phase()),
                "phase {} escaped [0, {})",
                osc.phase(),
                length
            );
        }
    }
}

#[test]
fn zero_frequency_holds_a_static_sample() {
    let table = Arc::new(Wavetable::sawtooth(200, 5, SawDirection::Down).unwrap());
    let mut osc = WavetableOscillator::new(44_100.0, table, 0.3).unwrap();
    let first = osc.tick(0.0);
    for _ in 0..50 {
        assert_eq!(osc.tick(0.0), first);
    }
    assert!((osc.phase() - 60.0).abs() < 1e-5);
}

#[test]
fn sine_oscillator_retraces_phase_after_one_period() {
    // Table length == sample rate, so 1 Hz advances exactly one sample of
    // table per tick and one full cycle per L ticks.
    let length = 64;
    let table = Arc::new(Wavetable::sine(length).unwrap());
    let mut osc = WavetableOscillator::new(length as f32, table, 0.25).unwrap();
    let start = osc.phase();
    for _ in 0..length {
        osc.tick(1.0);
    }
    assert!(wrap_distance(osc.phase(), start, length as f32) < 1e-4);
}

#[test]
fn interpolated_sine_tracks_the_analytic_signal() {
    let table = Arc::new(Wavetable::sine(2048).unwrap());
    let mut osc = WavetableOscillator::new(44_100.0, table, 0.0).unwrap();
    for n in 0..200u32 {
        let actual = osc.tick(440.0);
        let expected = (std::f64::consts::TAU * 440.0 * n as f64 / 44_100.0).sin() as f32;
        assert!(
            (actual - expected).abs() < 1e-3,
            "sample {}: expected {}, got {}",
            n,
            expected,
            actual
        );
    }
}

#[test]
fn frequency_change_midstream_keeps_the_phase_continuous() {
    let table = Arc::new(Wavetable::sine(64).unwrap());
    let mut osc = WavetableOscillator::new(44_100.0, table, 0.0).unwrap();
    for _ in 0..10 {
        osc.tick(440.0);
    }
    let before = osc.phase();
    osc.tick(880.0);
    let increment = 64.0 / 44_100.0 * 880.0;
    assert!((osc.phase() - (before + increment)).abs() < 1e-4);
}

#[test]
fn sawtooth_voice_retraces_phase_at_the_fundamental() {
    // 44100 / 440 == 100 whole ticks; after them the phase should sit
    // within one table sample of where it started.
    let table = Arc::new(Wavetable::sawtooth(200, 5, SawDirection::Down).unwrap());
    let mut osc = WavetableOscillator::new(44_100.0, table, 0.0).unwrap();
    let start = osc.phase();
    for _ in 0..(44_100 / 440) {
        osc.tick(440.0);
    }
    assert!(wrap_distance(osc.phase(), start, 200.0) < 1.0);
}

#[test]
fn negative_frequency_plays_the_cycle_backwards() {
    let table = Arc::new(Wavetable::sine(64).unwrap());
    let mut forward = WavetableOscillator::new(64.0, table.clone(), 0.0).unwrap();
    let mut backward = WavetableOscillator::new(64.0, table, 0.0).unwrap();

    let mut forward_samples = Vec::new();
    for _ in 0..64 {
        forward_samples.push(forward.tick(1.0));
    }
    // One tick past the origin, then mirrored travel.
    let mut backward_samples = Vec::new();
    for _ in 0..64 {
        backward_samples.push(backward.tick(-1.0));
    }
    // sin is odd: walking the table backwards negates the forward walk.
    for (n, (f, b)) in forward_samples
        .iter()
        .zip(backward_samples.iter())
        .enumerate()
        .skip(1)
    {
        let mirrored = forward_samples[64 - n];
        assert!(
            (b - mirrored).abs() < 1e-5,
            "tick {}: forward {} backward {}",
            n,
            f,
            b
        );
    }
}
