//! Lattice permutation table construction.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reference lattice permutation published with Improved Perlin Noise.
pub const REFERENCE_PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

/// Shuffle strategy applied to the reference ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shuffle {
    /// Swap each index 255..=1 with a draw from the whole `[0, 255]` range.
    /// Still a permutation, but not uniformly distributed over all of them.
    #[default]
    FullRange,
    /// Canonical Fisher-Yates, swap index `i` with a draw from `[0, i]`.
    FisherYates,
}

/// 256-entry permutation of `0..=255`, stored twice so that
/// `table[i] == table[i + 256]` and `p[p[X + 1] + Y + 1]` never wraps.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    values: [u8; 512],
}

impl PermutationTable {
    /// The fixed reference table, no shuffling
    pub fn reference() -> Self {
        Self::mirrored(REFERENCE_PERMUTATION)
    }

    /// Shuffle the reference ordering with a seeded ChaCha8 stream
    pub fn shuffled(seed: u64, shuffle: Shuffle) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut base = REFERENCE_PERMUTATION;

        match shuffle {
            Shuffle::FullRange => {
                for i in (1..base.len()).rev() {
                    let j = rng.gen_range(0..base.len());
                    base.swap(i, j);
                }
            }
            Shuffle::FisherYates => base.shuffle(&mut rng),
        }

        log::debug!("Built {:?} permutation table from seed {}", shuffle, seed);
        Self::mirrored(base)
    }

    /// Shuffle with a seed taken from the wall clock. Not reproducible;
    /// the seed is logged at debug level so a run can be replayed.
    pub fn from_clock(shuffle: Shuffle) -> Self {
        Self::shuffled(clock_seed(), shuffle)
    }

    fn mirrored(base: [u8; 256]) -> Self {
        let mut values = [0u8; 512];
        values[..256].copy_from_slice(&base);
        values[256..].copy_from_slice(&base);
        Self { values }
    }

    /// Table entry at `index` (0..512)
    #[inline]
    pub fn get(&self, index: usize) -> usize {
        self.values[index] as usize
    }

    /// The underlying 256-entry permutation
    pub fn base(&self) -> &[u8] {
        &self.values[..256]
    }

    /// All 512 mirrored entries
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::reference()
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("head", &&self.values[..8])
            .finish_non_exhaustive()
    }
}

fn clock_seed() -> u64 {
    // A clock before the epoch still yields a usable (if fixed) seed.
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
