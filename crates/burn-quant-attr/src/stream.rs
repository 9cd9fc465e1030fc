use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{DType, MAX_RANK, QuantDims, QuantError};

/// Append-only byte stream values are encoded into.
///
/// Values are written in native byte order with no padding, so an encoding is only meant to be
/// read back on the same platform (e.g. a persistent kernel cache key).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SerializationStream {
    data: Vec<u8>,
}

impl SerializationStream {
    /// Creates an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the raw bytes of `value`.
    pub fn append<T: bytemuck::NoUninit>(&mut self, value: T) {
        self.data.extend_from_slice(bytemuck::bytes_of(&value));
    }

    /// Appends a boolean as a single byte.
    pub fn append_bool(&mut self, value: bool) {
        self.append(value as u8);
    }

    /// Appends a data type as its numeric code.
    pub fn append_dtype(&mut self, dtype: DType) {
        self.append(dtype.to_code());
    }

    /// Appends the rank of `dims`, followed by its values when the rank is positive.
    pub fn append_dims(&mut self, dims: &QuantDims) {
        self.append(dims.rank() as u32);
        for dim in dims.as_slice() {
            self.append(*dim);
        }
    }

    /// The encoded bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the stream, returning the encoded bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Reads values back from bytes produced by a [`SerializationStream`].
#[derive(Debug)]
pub struct Deserializer<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Deserializer<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Reads the next `T`.
    pub fn pop<T: bytemuck::AnyBitPattern>(&mut self) -> Result<T, QuantError> {
        let size = size_of::<T>();
        let end = self.position + size;

        if end > self.data.len() {
            return Err(malformed(format!(
                "needed {size} bytes at offset {}, {} left",
                self.position,
                self.remaining()
            )));
        }

        let value = bytemuck::pod_read_unaligned(&self.data[self.position..end]);
        self.position = end;

        Ok(value)
    }

    /// Reads a boolean encoded as a single `0` or `1` byte.
    pub fn pop_bool(&mut self) -> Result<bool, QuantError> {
        match self.pop::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(malformed(format!("invalid boolean byte {other}"))),
        }
    }

    /// Reads a data type code.
    pub fn pop_dtype(&mut self) -> Result<DType, QuantError> {
        let code = self.pop::<u32>()?;
        DType::from_code(code).ok_or_else(|| malformed(format!("unknown data type code {code}")))
    }

    /// Reads a rank-prefixed dims sequence, rejecting ranks above [`MAX_RANK`].
    pub fn pop_dims(&mut self) -> Result<QuantDims, QuantError> {
        let rank = self.pop::<u32>()? as usize;
        if rank > MAX_RANK {
            return Err(malformed(format!(
                "rank {rank} exceeds the maximum supported rank {MAX_RANK}"
            )));
        }

        let mut values = [0i64; MAX_RANK];
        for value in values.iter_mut().take(rank) {
            *value = self.pop()?;
        }

        QuantDims::new(&values[..rank])
    }

    /// Number of bytes not read yet.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns `true` once every byte was read.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

pub(crate) fn malformed(reason: String) -> QuantError {
    log::warn!("Rejecting malformed encoding: {reason}");
    QuantError::MalformedEncoding(reason)
}
