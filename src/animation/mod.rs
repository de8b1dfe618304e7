/// Looping frame clock and derived oscillator values.
pub mod clock;
/// Injectable uniform random sources.
pub mod random;
