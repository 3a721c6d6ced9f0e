//! Interpolation curves and corner gradient selectors.

/// Corner gradient scheme used by the noise lattice.
///
/// The two sets are not numerically interchangeable: the same table and
/// point give different samples. Both stay within about `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientSet {
    /// Eight directions on `hash & 7`: the four diagonals `±x ± y`
    /// interleaved with the four axes `±x`, `±y`.
    #[default]
    Reduced,
    /// Four diagonals `(±1, ±1)` on `hash & 3`, the 2D restriction of the
    /// improved-noise gradient set.
    Classic,
}

impl GradientSet {
    /// Dot product of the gradient picked by `hash` with offset `(x, y)`
    #[inline]
    pub fn grad(self, hash: usize, x: f32, y: f32) -> f32 {
        match self {
            GradientSet::Reduced => match hash & 0x7 {
                0x0 => x + y,
                0x1 => x,
                0x2 => x - y,
                0x3 => -y,
                0x4 => -x - y,
                0x5 => -x,
                0x6 => -x + y,
                _ => y,
            },
            GradientSet::Classic => match hash & 0x3 {
                0x0 => x + y,
                0x1 => -x + y,
                0x2 => -x - y,
                _ => x - y,
            },
        }
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
///
/// Zero first and second derivative at 0 and 1, so cells join smoothly.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(0.0), 0.0);
        assert_eq!(fade(1.0), 1.0);
        assert_eq!(fade(0.5), 0.5);
        // Monotonic on [0, 1]
        let mut previous = fade(0.0);
        for i in 1..=100 {
            let value = fade(i as f32 / 100.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 2.0, 6.0), 2.0);
        assert_eq!(lerp(1.0, 2.0, 6.0), 6.0);
        assert_eq!(lerp(0.25, 2.0, 6.0), 3.0);
    }

    #[test]
    fn test_reduced_selector_uses_low_three_bits() {
        let (x, y) = (0.25, 0.75);
        let expected = [x + y, x, x - y, -y, -x - y, -x, -x + y, y];
        for (hash, want) in expected.iter().enumerate() {
            assert_eq!(GradientSet::Reduced.grad(hash, x, y), *want);
            // Higher bits are ignored
            assert_eq!(GradientSet::Reduced.grad(hash + 248, x, y), *want);
        }
    }

    #[test]
    fn test_classic_selector_is_diagonal() {
        let (x, y) = (0.25, 0.75);
        let expected = [x + y, -x + y, -x - y, x - y];
        for hash in 0..256 {
            assert_eq!(
                GradientSet::Classic.grad(hash, x, y),
                expected[hash & 3],
                "hash {}",
                hash
            );
        }
    }

    #[test]
    fn test_zero_offset_gives_zero() {
        for hash in 0..8 {
            assert_eq!(GradientSet::Reduced.grad(hash, 0.0, 0.0), 0.0);
            assert_eq!(GradientSet::Classic.grad(hash, 0.0, 0.0), 0.0);
        }
    }
}
