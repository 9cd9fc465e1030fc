use alloc::format;
use alloc::string::String;
use core::fmt;
use core::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::stream::malformed;
use crate::{DType, Deserializer, QuantDims, QuantError, SerializationStream};

/// Mask reported when no channel is configured.
///
/// Only the sign bit is set, so `mask & (1 << d)` is false for every dimension `d`.
pub const DEFAULT_MASK: i32 = i32::MIN;

/// Mask used by the scale and plain zero-point setters when none is given.
pub const PER_DIM_0_MASK: i32 = 1;

static DEFAULT_QUANT_ENTRY: QuantEntry = QuantEntry::new();

/// The canonical unset descriptor.
///
/// Used as the comparison baseline for [`QuantEntry::has_default_values`] and, assigned to an
/// argument, as the way to reset its configuration.
pub fn default_quant_entry() -> &'static QuantEntry {
    &DEFAULT_QUANT_ENTRY
}

/// Bitset of the channels a [`QuantEntry`] was ever configured through.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct EntryKind(u8);

impl EntryKind {
    /// No channel was touched.
    pub const NONE: Self = Self(0);
    /// The native channel (mask, data type and group shape).
    pub const NATIVE: Self = Self(1);
    /// The scale channel.
    pub const SCALE: Self = Self(2);
    /// The zero-point channel.
    pub const ZERO_POINT: Self = Self(4);

    const ALL_BITS: u8 = 0b111;

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a kind from raw bits, rejecting unknown bits.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL_BITS != 0 {
            None
        } else {
            Some(Self(bits))
        }
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for EntryKind {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EntryKind {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl TryFrom<u8> for EntryKind {
    type Error = QuantError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        Self::from_bits(bits).ok_or_else(|| {
            QuantError::MalformedEncoding(format!("unknown entry kind bits {bits:#b}"))
        })
    }
}

impl From<EntryKind> for u8 {
    fn from(kind: EntryKind) -> Self {
        kind.0
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
struct NativeChannel {
    mask: i32,
    dtype: DType,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
struct ShapedChannel {
    mask: i32,
    dtype: DType,
    dims: QuantDims,
}

/// Read-only view of one configured channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantChannel<'a> {
    /// Dimensions the values vary over.
    pub mask: i32,
    /// Element data type.
    pub dtype: DType,
    /// Group shape for the native channel, dims for the other two.
    pub dims: &'a QuantDims,
}

/// Quantization descriptor of a single primitive argument.
///
/// A descriptor carries three independently configured channels:
///
/// - **native**: mask, data type and an optional group shape for block quantization;
/// - **scale**: mask, data type and the scale dims;
/// - **zero-point**: mask, data type and the zero-point dims.
///
/// Accessors that don't name a channel read the first configured one in the order
/// zero-point, native, scale, and fall back to the default sentinel values.
///
/// Grouped zero-points ([`QuantEntry::set_zero_point_grouped`]) write their dims to both the
/// zero-point channel and the native group shape, so [`QuantEntry::group`] sees them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuantEntry", into = "RawQuantEntry")]
pub struct QuantEntry {
    kind: EntryKind,
    native: Option<NativeChannel>,
    // Owned by the native channel, but written by grouped zero-points as well.
    groups: QuantDims,
    scale: Option<ShapedChannel>,
    zero_point: Option<ShapedChannel>,
}

/// Unchecked field mirror of [`QuantEntry`] for serde.
#[derive(Serialize, Deserialize)]
struct RawQuantEntry {
    kind: EntryKind,
    native: Option<NativeChannel>,
    groups: QuantDims,
    scale: Option<ShapedChannel>,
    zero_point: Option<ShapedChannel>,
}

impl TryFrom<RawQuantEntry> for QuantEntry {
    type Error = QuantError;

    fn try_from(raw: RawQuantEntry) -> Result<Self, Self::Error> {
        let entry = Self {
            kind: raw.kind,
            native: raw.native,
            groups: raw.groups,
            scale: raw.scale,
            zero_point: raw.zero_point,
        };
        entry.check_channels().map_err(malformed)?;

        Ok(entry)
    }
}

impl From<QuantEntry> for RawQuantEntry {
    fn from(entry: QuantEntry) -> Self {
        Self {
            kind: entry.kind,
            native: entry.native,
            groups: entry.groups,
            scale: entry.scale,
            zero_point: entry.zero_point,
        }
    }
}

impl Default for QuantEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantEntry {
    /// Creates an unset descriptor, equal to [`default_quant_entry`].
    pub const fn new() -> Self {
        Self {
            kind: EntryKind::NONE,
            native: None,
            groups: QuantDims::empty(),
            scale: None,
            zero_point: None,
        }
    }

    /// Configures the native channel.
    ///
    /// `group_dims` replaces the group shape; an empty slice means no grouping.
    pub fn set_native(
        &mut self,
        mask: i32,
        dtype: DType,
        group_dims: &[i64],
    ) -> Result<(), QuantError> {
        let groups = QuantDims::new(group_dims)?;

        self.kind |= EntryKind::NATIVE;
        self.native = Some(NativeChannel { mask, dtype });
        self.groups = groups;

        Ok(())
    }

    /// Configures the scale channel. The native channel is left untouched.
    pub fn set_scale(&mut self, dims: &[i64], dtype: DType, mask: i32) -> Result<(), QuantError> {
        let dims = QuantDims::new(dims)?;

        self.kind |= EntryKind::SCALE;
        self.scale = Some(ShapedChannel { mask, dtype, dims });

        Ok(())
    }

    /// Configures the zero-point channel with mask [`PER_DIM_0_MASK`].
    pub fn set_zero_point(&mut self, dims: &[i64], dtype: DType) -> Result<(), QuantError> {
        let dims = QuantDims::new(dims)?;

        self.kind |= EntryKind::ZERO_POINT;
        self.zero_point = Some(ShapedChannel {
            mask: PER_DIM_0_MASK,
            dtype,
            dims,
        });

        Ok(())
    }

    /// Configures the zero-point channel with an explicit mask and uses `dims` as the group
    /// shape.
    ///
    /// Two slots are written: the zero-point channel, and the native group shape when `dims` is
    /// not empty. The native channel itself stays unset.
    pub fn set_zero_point_grouped(
        &mut self,
        dims: &[i64],
        dtype: DType,
        mask: i32,
    ) -> Result<(), QuantError> {
        let dims = QuantDims::new(dims)?;

        self.kind |= EntryKind::NATIVE | EntryKind::ZERO_POINT;
        self.zero_point = Some(ShapedChannel { mask, dtype, dims });
        if !dims.is_empty() {
            self.groups = dims;
        }

        Ok(())
    }

    /// Overwrites every channel with the state of `other`.
    ///
    /// Assigning [`default_quant_entry`] resets the descriptor.
    pub fn assign(&mut self, other: &QuantEntry) {
        self.clone_from(other);
    }

    /// Returns `true` if the descriptor equals [`default_quant_entry`].
    pub fn has_default_values(&self) -> bool {
        self == default_quant_entry()
    }

    /// Returns `true` if no group shape is recorded, whatever the other channels hold.
    pub fn has_default_groups(&self) -> bool {
        self.groups.rank() == default_quant_entry().groups.rank()
    }

    /// Channels written so far.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The native channel, with the group shape as its dims.
    pub fn native_channel(&self) -> Option<QuantChannel<'_>> {
        self.native.as_ref().map(|native| QuantChannel {
            mask: native.mask,
            dtype: native.dtype,
            dims: &self.groups,
        })
    }

    /// The scale channel.
    pub fn scale_channel(&self) -> Option<QuantChannel<'_>> {
        self.scale.as_ref().map(ShapedChannel::view)
    }

    /// The zero-point channel.
    pub fn zero_point_channel(&self) -> Option<QuantChannel<'_>> {
        self.zero_point.as_ref().map(ShapedChannel::view)
    }

    /// The channel the unnamed accessors read from, if any is configured.
    pub fn effective_channel(&self) -> Option<QuantChannel<'_>> {
        [
            self.zero_point_channel(),
            self.native_channel(),
            self.scale_channel(),
        ]
        .into_iter()
        .flatten()
        .next()
    }

    /// Mask of the effective channel, [`DEFAULT_MASK`] when none is set.
    pub fn mask(&self) -> i32 {
        self.effective_channel().map_or(DEFAULT_MASK, |channel| channel.mask)
    }

    /// Data type of the effective channel, [`DType::Undefined`] when none is set.
    pub fn dtype(&self) -> DType {
        self.effective_channel().map_or(DType::Undefined, |channel| channel.dtype)
    }

    /// Dims of the effective channel, empty when none is set.
    pub fn dims(&self) -> &[i64] {
        match self.effective_channel() {
            Some(channel) => channel.dims.as_slice(),
            None => &[],
        }
    }

    /// Rank of the effective channel dims, `0` when none is set.
    pub fn rank(&self) -> usize {
        self.effective_channel().map_or(0, |channel| channel.dims.rank())
    }

    /// Group size along dimension `dim`.
    ///
    /// Without grouping every dimension reports `1`. With grouping, a dimension past the group
    /// rank reports `0` so that dividing by it fails loudly.
    pub fn group(&self, dim: usize) -> i64 {
        if self.has_default_groups() {
            return 1;
        }

        self.groups.get(dim).unwrap_or(0)
    }

    /// Hash of the descriptor, consistent with equality.
    #[cfg(feature = "std")]
    pub fn hash_value(&self) -> u64 {
        use core::hash::{Hash, Hasher};

        let mut hasher = std::hash::DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Encodes the descriptor.
    ///
    /// Layout: kind bits, then for the native, scale and zero-point channels in that order:
    /// configured flag, mask, data type code, rank and dims. The native dims are the group
    /// shape, written even when the native channel is unset.
    pub fn serialize(&self, stream: &mut SerializationStream) {
        stream.append(self.kind.bits());

        stream.append_bool(self.native.is_some());
        let native = self.native.unwrap_or(NativeChannel {
            mask: DEFAULT_MASK,
            dtype: DType::Undefined,
        });
        stream.append(native.mask);
        stream.append_dtype(native.dtype);
        stream.append_dims(&self.groups);

        for channel in [&self.scale, &self.zero_point] {
            stream.append_bool(channel.is_some());
            let channel = channel.unwrap_or(ShapedChannel::UNSET);
            stream.append(channel.mask);
            stream.append_dtype(channel.dtype);
            stream.append_dims(&channel.dims);
        }
    }

    /// Decodes a descriptor written by [`QuantEntry::serialize`].
    pub fn deserialize(d: &mut Deserializer<'_>) -> Result<Self, QuantError> {
        let bits = d.pop::<u8>()?;
        let kind = EntryKind::from_bits(bits)
            .ok_or_else(|| malformed(format!("unknown entry kind bits {bits:#b}")))?;

        let is_native = d.pop_bool()?;
        let mask = d.pop::<i32>()?;
        let dtype = d.pop_dtype()?;
        let groups = d.pop_dims()?;
        let native = is_native.then_some(NativeChannel { mask, dtype });

        let scale = ShapedChannel::deserialize(d)?;
        let zero_point = ShapedChannel::deserialize(d)?;

        let entry = Self {
            kind,
            native,
            groups,
            scale,
            zero_point,
        };
        entry.check_channels().map_err(malformed)?;

        Ok(entry)
    }

    /// Kind bits and configured channels must agree both ways, and a group shape needs a
    /// channel that can own it.
    fn check_channels(&self) -> Result<(), String> {
        let bits = self.kind.bits();
        // Grouped zero-points record the native bit without the native channel.
        let native_backed = self.native.is_some() || self.zero_point.is_some();

        for (is_set, is_backed, bit, name) in [
            (self.native.is_some(), native_backed, EntryKind::NATIVE, "native"),
            (self.scale.is_some(), self.scale.is_some(), EntryKind::SCALE, "scale"),
            (
                self.zero_point.is_some(),
                self.zero_point.is_some(),
                EntryKind::ZERO_POINT,
                "zero-point",
            ),
        ] {
            if is_set && !self.kind.contains(bit) {
                return Err(format!(
                    "{name} channel is set but kind bits {bits:#b} don't record it"
                ));
            }
            if self.kind.contains(bit) && !is_backed {
                return Err(format!("kind bits {bits:#b} record an unset {name} channel"));
            }
        }

        if !self.groups.is_empty() && !native_backed {
            return Err(format!(
                "group shape of rank {} without a native or zero-point channel",
                self.groups.rank()
            ));
        }

        Ok(())
    }
}

impl ShapedChannel {
    const UNSET: Self = Self {
        mask: DEFAULT_MASK,
        dtype: DType::Undefined,
        dims: QuantDims::empty(),
    };

    fn view(&self) -> QuantChannel<'_> {
        QuantChannel {
            mask: self.mask,
            dtype: self.dtype,
            dims: &self.dims,
        }
    }

    fn deserialize(d: &mut Deserializer<'_>) -> Result<Option<Self>, QuantError> {
        let is_set = d.pop_bool()?;
        let mask = d.pop::<i32>()?;
        let dtype = d.pop_dtype()?;
        let dims = d.pop_dims()?;

        Ok(is_set.then_some(Self { mask, dtype, dims }))
    }
}

impl fmt::Display for QuantEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_default_values() {
            return Ok(());
        }

        write!(f, "{}:{}", self.mask(), self.dtype())?;
        if !self.has_default_groups() {
            for (i, group) in self.groups.as_slice().iter().enumerate() {
                let sep = if i == 0 { ':' } else { 'x' };
                write!(f, "{sep}{group}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn roundtrip(entry: &QuantEntry) -> QuantEntry {
        let mut stream = SerializationStream::new();
        entry.serialize(&mut stream);

        let mut d = Deserializer::new(stream.data());
        let decoded = QuantEntry::deserialize(&mut d).unwrap();
        assert!(d.is_empty());
        decoded
    }

    #[test]
    fn new_entry_should_equal_default() {
        let entry = QuantEntry::new();

        assert_eq!(&entry, default_quant_entry());
        assert!(entry.has_default_values());
        assert!(entry.has_default_groups());
        assert_eq!(entry.kind(), EntryKind::NONE);
        assert_eq!(entry.mask(), DEFAULT_MASK);
        assert_eq!(entry.dtype(), DType::Undefined);
        assert_eq!(entry.rank(), 0);
        assert!(entry.dims().is_empty());
    }

    #[test]
    fn native_channel_should_win_over_scale() {
        let mut entry = QuantEntry::new();
        entry.set_scale(&[4], DType::F32, 2).unwrap();

        assert_eq!(entry.mask(), 2);
        assert_eq!(entry.rank(), 1);
        assert_eq!(entry.dims(), &[4]);

        entry.set_native(1, DType::F16, &[]).unwrap();

        assert_eq!(entry.mask(), 1);
        assert_eq!(entry.dtype(), DType::F16);
        assert_eq!(entry.rank(), 0);

        let scale = entry.scale_channel().unwrap();
        assert_eq!(scale.mask, 2);
        assert_eq!(scale.dtype, DType::F32);
        assert_eq!(scale.dims.as_slice(), &[4]);
    }

    #[test]
    fn zero_point_channel_should_win_over_native() {
        let mut entry = QuantEntry::new();
        entry.set_native(3, DType::I32, &[]).unwrap();
        entry.set_zero_point(&[8], DType::U8).unwrap();

        assert_eq!(entry.mask(), PER_DIM_0_MASK);
        assert_eq!(entry.dtype(), DType::U8);
        assert_eq!(entry.dims(), &[8]);
        assert_eq!(entry.native_channel().unwrap().mask, 3);
    }

    #[test]
    fn group_should_be_one_without_grouping() {
        let mut entry = QuantEntry::new();
        assert_eq!(entry.group(0), 1);
        assert_eq!(entry.group(7), 1);

        entry.set_native(1, DType::F32, &[]).unwrap();
        assert_eq!(entry.group(3), 1);
    }

    #[test]
    fn group_should_be_zero_past_group_rank() {
        let mut entry = QuantEntry::new();
        entry.set_native(3, DType::F32, &[32, 1]).unwrap();

        assert_eq!(entry.group(0), 32);
        assert_eq!(entry.group(1), 1);
        assert_eq!(entry.group(2), 0);
        assert!(!entry.has_default_groups());
    }

    #[test]
    fn grouped_zero_point_should_write_native_groups() {
        let mut entry = QuantEntry::new();
        entry.set_zero_point_grouped(&[2, 2], DType::I8, 3).unwrap();

        assert_eq!(entry.group(0), 2);
        assert_eq!(entry.group(1), 2);
        assert!(entry.native_channel().is_none());
        assert_eq!(entry.mask(), 3);
        assert_eq!(entry.dtype(), DType::I8);
        assert!(entry.kind().contains(EntryKind::NATIVE | EntryKind::ZERO_POINT));
    }

    #[test]
    fn grouped_zero_point_without_dims_should_keep_groups() {
        let mut entry = QuantEntry::new();
        entry.set_native(1, DType::F32, &[16]).unwrap();
        entry.set_zero_point_grouped(&[], DType::I8, 1).unwrap();

        assert_eq!(entry.group(0), 16);
    }

    #[test]
    fn set_native_should_clear_previous_groups() {
        let mut entry = QuantEntry::new();
        entry.set_native(1, DType::F32, &[16]).unwrap();
        entry.set_native(1, DType::F32, &[]).unwrap();

        assert!(entry.has_default_groups());
        assert_eq!(entry.group(0), 1);
    }

    #[test]
    fn should_reject_dims_above_max_rank() {
        let mut entry = QuantEntry::new();
        let dims = [1; crate::MAX_RANK + 1];

        assert!(entry.set_native(1, DType::F32, &dims).is_err());
        assert!(entry.set_scale(&dims, DType::F32, 1).is_err());
        assert!(entry.set_zero_point(&dims, DType::I32).is_err());
        assert!(entry.set_zero_point_grouped(&dims, DType::I32, 1).is_err());
        assert!(entry.has_default_values());
    }

    #[test]
    fn assign_default_should_reset_entry() {
        let mut entry = QuantEntry::new();
        entry.set_native(1, DType::F32, &[4]).unwrap();
        entry.set_scale(&[2, 3], DType::F16, 1).unwrap();
        entry.set_zero_point(&[5], DType::U8).unwrap();

        let mut copy = QuantEntry::new();
        copy.assign(&entry);
        assert_eq!(copy, entry);

        copy.assign(default_quant_entry());
        assert!(copy.has_default_values());
    }

    #[test]
    fn equality_should_cover_every_channel() {
        let mut a = QuantEntry::new();
        let mut b = QuantEntry::new();
        a.set_native(1, DType::F32, &[]).unwrap();
        b.set_native(1, DType::F32, &[]).unwrap();
        assert_eq!(a, b);

        b.set_scale(&[1], DType::F32, 1).unwrap();
        assert_ne!(a, b);

        a.set_scale(&[1], DType::F32, 1).unwrap();
        assert_eq!(a, b);

        a.set_zero_point(&[1], DType::I32).unwrap();
        b.set_zero_point(&[2], DType::I32).unwrap();
        assert_ne!(a, b);
    }

    #[cfg(feature = "std")]
    #[test]
    fn equal_entries_should_hash_equal() {
        let mut a = QuantEntry::new();
        let mut b = QuantEntry::new();
        a.set_native(2, DType::F32, &[8, 8]).unwrap();
        b.set_native(2, DType::F32, &[8, 8, 8]).unwrap();
        b.set_native(2, DType::F32, &[8, 8]).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.hash_value(), b.hash_value());
        assert_eq!(
            QuantEntry::new().hash_value(),
            default_quant_entry().hash_value()
        );
    }

    #[test]
    fn serialize_should_roundtrip_default() {
        let decoded = roundtrip(default_quant_entry());
        assert!(decoded.has_default_values());
    }

    #[test]
    fn serialize_should_roundtrip_every_channel() {
        let mut entry = QuantEntry::new();
        entry.set_native(3, DType::BF16, &[1, 64]).unwrap();
        entry.set_scale(&[4, 4], DType::F32, 2).unwrap();
        entry.set_zero_point_grouped(&[2, 2], DType::U4, 3).unwrap();

        assert_eq!(roundtrip(&entry), entry);
    }

    #[test]
    fn deserialize_should_reject_unknown_kind_bits() {
        let mut stream = SerializationStream::new();
        QuantEntry::new().serialize(&mut stream);
        let mut bytes = stream.into_data();
        bytes[0] = 0b1000;

        let result = QuantEntry::deserialize(&mut Deserializer::new(&bytes));
        assert!(matches!(result, Err(QuantError::MalformedEncoding(_))));
    }

    #[test]
    fn deserialize_should_reject_unrecorded_channel() {
        let mut entry = QuantEntry::new();
        entry.set_scale(&[], DType::F32, 1).unwrap();
        let mut stream = SerializationStream::new();
        entry.serialize(&mut stream);
        let mut bytes = stream.into_data();
        bytes[0] = EntryKind::NATIVE.bits();

        let result = QuantEntry::deserialize(&mut Deserializer::new(&bytes));
        assert!(matches!(result, Err(QuantError::MalformedEncoding(_))));
    }

    #[test]
    fn deserialize_should_reject_kind_bits_without_channel() {
        let mut stream = SerializationStream::new();
        QuantEntry::new().serialize(&mut stream);
        let mut bytes = stream.into_data();
        bytes[0] = EntryKind::NATIVE.bits();

        let result = QuantEntry::deserialize(&mut Deserializer::new(&bytes));
        assert!(matches!(result, Err(QuantError::MalformedEncoding(_))));
    }

    #[test]
    fn deserialize_should_reject_groups_without_owner() {
        let mut stream = SerializationStream::new();
        stream.append(EntryKind::NONE.bits());
        stream.append_bool(false);
        stream.append(DEFAULT_MASK);
        stream.append_dtype(DType::Undefined);
        stream.append_dims(&QuantDims::new(&[4, 4]).unwrap());
        for _ in 0..2 {
            stream.append_bool(false);
            stream.append(DEFAULT_MASK);
            stream.append_dtype(DType::Undefined);
            stream.append_dims(&QuantDims::empty());
        }

        let result = QuantEntry::deserialize(&mut Deserializer::new(stream.data()));
        assert!(matches!(result, Err(QuantError::MalformedEncoding(_))));
    }

    #[test]
    fn serde_should_check_channels() {
        let config = bincode::config::standard();
        let unbacked_kind = RawQuantEntry {
            kind: EntryKind::SCALE,
            native: None,
            groups: QuantDims::empty(),
            scale: None,
            zero_point: None,
        };
        let orphan_groups = RawQuantEntry {
            kind: EntryKind::NONE,
            native: None,
            groups: QuantDims::new(&[4, 4]).unwrap(),
            scale: None,
            zero_point: None,
        };

        for raw in [unbacked_kind, orphan_groups] {
            let bytes = bincode::serde::encode_to_vec(&raw, config).unwrap();
            let result: Result<(QuantEntry, usize), _> =
                bincode::serde::decode_from_slice(&bytes, config);
            assert!(result.is_err());
        }
    }

    #[test]
    fn grouped_zero_point_should_roundtrip_without_native_channel() {
        let mut entry = QuantEntry::new();
        entry.set_zero_point_grouped(&[2, 2], DType::I8, 3).unwrap();

        assert!(entry.native_channel().is_none());
        assert_eq!(roundtrip(&entry), entry);
    }

    #[test]
    fn display_should_print_mask_dtype_and_groups() {
        let mut entry = QuantEntry::new();
        assert_eq!(entry.to_string(), "");

        entry.set_native(2, DType::F32, &[]).unwrap();
        assert_eq!(entry.to_string(), "2:f32");

        entry.set_native(3, DType::I8, &[1, 32]).unwrap();
        assert_eq!(entry.to_string(), "3:s8:1x32");
    }
}
