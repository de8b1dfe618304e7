use std::f64::consts::PI;

/// Cosine ease-in/out: `(1 - cos(π·x)) / 2`.
///
/// Maps `0 → 0`, `0.5 → 0.5`, `1 → 1` and is monotonic on `[0, 1]`. Inputs are not clamped; the
/// renderer feeds it both the loop percent and `sin(..)`, which already live in `[0, 1]`.
pub fn ease(x: f64) -> f64 {
    (1.0 - (PI * x).cos()) / 2.0
}

/// Squared euclidean distance between two points.
pub fn dist_sq(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

/// Euclidean distance between two points.
pub fn dist(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    dist_sq(x1, y1, x2, y2).sqrt()
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
