use alloc::format;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::QuantError;

/// Maximum tensor rank a dims sequence can describe.
pub const MAX_RANK: usize = 12;

/// A dims sequence with inline storage of at most [`MAX_RANK`] values.
///
/// Only the first `rank` values are meaningful: equality and hashing ignore the rest.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct QuantDims {
    values: [i64; MAX_RANK],
    rank: u8,
}

impl QuantDims {
    /// An empty dims sequence.
    pub const fn empty() -> Self {
        Self {
            values: [0; MAX_RANK],
            rank: 0,
        }
    }

    /// Copies `dims` into a new sequence.
    ///
    /// Fails with [`QuantError::InvalidArgument`] when `dims` is longer than [`MAX_RANK`].
    pub fn new(dims: &[i64]) -> Result<Self, QuantError> {
        if dims.len() > MAX_RANK {
            return Err(QuantError::InvalidArgument(format!(
                "rank {} exceeds the maximum supported rank {MAX_RANK}",
                dims.len()
            )));
        }

        let mut values = [0; MAX_RANK];
        values[..dims.len()].copy_from_slice(dims);

        Ok(Self {
            values,
            rank: dims.len() as u8,
        })
    }

    /// Number of meaningful values.
    pub fn rank(&self) -> usize {
        self.rank as usize
    }

    /// Returns `true` when no value is stored.
    pub fn is_empty(&self) -> bool {
        self.rank == 0
    }

    /// The meaningful values.
    pub fn as_slice(&self) -> &[i64] {
        &self.values[..self.rank()]
    }

    /// The value at `index`, if `index < rank`.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.as_slice().get(index).copied()
    }
}

impl Default for QuantDims {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for QuantDims {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for QuantDims {}

impl Hash for QuantDims {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl TryFrom<Vec<i64>> for QuantDims {
    type Error = QuantError;

    fn try_from(value: Vec<i64>) -> Result<Self, Self::Error> {
        QuantDims::new(&value)
    }
}

impl From<QuantDims> for Vec<i64> {
    fn from(value: QuantDims) -> Self {
        value.as_slice().to_vec()
    }
}
