#[cfg(feature = "native")]
fn main() {
    rustwavesynth::runtime::start();
}

#[cfg(not(feature = "native"))]
fn main() {}
