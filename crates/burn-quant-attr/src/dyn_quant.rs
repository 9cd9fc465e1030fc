use serde::{Deserialize, Serialize};

use crate::{Deserializer, QuantError, SerializationStream};

/// Parameters of the dynamic quantization of the primary input.
///
/// The source is quantized on the fly in groups of `group_size` elements. A group size of `0`
/// disables it.
#[derive(
    new, Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct SrcDynQuantParams {
    group_size: u64,
}

impl SrcDynQuantParams {
    /// Returns `true` if dynamic quantization is disabled.
    pub fn has_default_values(&self) -> bool {
        self.group_size == 0
    }

    /// Sets the group size.
    pub fn set(&mut self, group_size: u64) {
        self.group_size = group_size;
    }

    /// The group size.
    pub fn get(&self) -> u64 {
        self.group_size
    }

    /// Encodes the parameters.
    pub fn serialize(&self, stream: &mut SerializationStream) {
        stream.append(self.group_size);
    }

    /// Decodes parameters written by [`SrcDynQuantParams::serialize`].
    pub fn deserialize(d: &mut Deserializer<'_>) -> Result<Self, QuantError> {
        Ok(Self {
            group_size: d.pop()?,
        })
    }
}
