// Draw generation: six distinct numbers in 1..=45, sorted ascending.

use std::collections::BTreeSet;
use std::fmt;

use rand::Rng;
use thiserror::Error;

/// Smallest number that can be drawn.
pub const MIN_NUMBER: u8 = 1;
/// Largest number that can be drawn.
pub const MAX_NUMBER: u8 = 45;
/// Numbers per draw.
pub const DRAW_SIZE: usize = 6;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("a draw holds exactly 6 numbers, got {0}")]
    WrongSize(usize),

    #[error("number {0} is outside 1..=45")]
    OutOfRange(u8),

    #[error("number {0} appears more than once")]
    Duplicate(u8),

    #[error("numbers must be in ascending order")]
    Unsorted,
}

// ---------------------------------------------------------------------------
// Draw
// ---------------------------------------------------------------------------

/// One lottery round: six distinct numbers in `MIN_NUMBER..=MAX_NUMBER`,
/// ascending. The only ways to build one are [`generate_draw`] and
/// `Draw::try_from`, both of which uphold the invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Draw([u8; DRAW_SIZE]);

impl Draw {
    pub fn numbers(&self) -> &[u8; DRAW_SIZE] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<&[u8]> for Draw {
    type Error = DrawError;

    fn try_from(numbers: &[u8]) -> Result<Self, Self::Error> {
        if numbers.len() != DRAW_SIZE {
            return Err(DrawError::WrongSize(numbers.len()));
        }
        if let Some(&n) = numbers
            .iter()
            .find(|n| !(MIN_NUMBER..=MAX_NUMBER).contains(*n))
        {
            return Err(DrawError::OutOfRange(n));
        }
        for pair in numbers.windows(2) {
            if pair[0] == pair[1] {
                return Err(DrawError::Duplicate(pair[0]));
            }
            if pair[0] > pair[1] {
                return Err(DrawError::Unsorted);
            }
        }

        let mut out = [0u8; DRAW_SIZE];
        out.copy_from_slice(numbers);
        Ok(Draw(out))
    }
}

/// Comma-separated numbers, e.g. `3, 11, 19, 27, 38, 44`.
impl fmt::Display for Draw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Draw six distinct numbers by rejection sampling.
///
/// Uniform samples from `MIN_NUMBER..=MAX_NUMBER` go into an ordered set
/// until it holds `DRAW_SIZE` members. Expected samples: about 6.4.
/// Termination relies on `rng` being unbiased; there is no attempt cap.
pub fn generate_draw<R: Rng + ?Sized>(rng: &mut R) -> Draw {
    let mut picked = BTreeSet::new();
    while picked.len() < DRAW_SIZE {
        picked.insert(rng.random_range(MIN_NUMBER..=MAX_NUMBER));
    }

    let mut numbers = [0u8; DRAW_SIZE];
    for (slot, n) in numbers.iter_mut().zip(picked) {
        *slot = n;
    }
    Draw(numbers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
