use alloc::collections::BTreeMap;
use alloc::format;
use core::fmt;
use core::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::stream::malformed;
use crate::{
    ArgId, DType, Deserializer, PER_DIM_0_MASK, QuantEntry, QuantError, QuantPolicy,
    SerializationStream, WEIGHTS, arg_name, default_quant_entry,
};

/// Quantization descriptors of the arguments of a primitive, keyed by argument id.
///
/// The policy `P` decides which ids are accepted by the setters and which data type counts as
/// default. An id that was never configured reads as [`default_quant_entry`].
///
/// Entries are kept in ascending id order so that equality, hashing and encoding are
/// deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct QuantEntries<P: QuantPolicy> {
    entries: BTreeMap<ArgId, QuantEntry>,
    #[serde(skip)]
    policy: PhantomData<P>,
}

impl<P: QuantPolicy> Default for QuantEntries<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: QuantPolicy> QuantEntries<P> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            policy: PhantomData,
        }
    }

    /// Data type assumed for arguments without an explicit one.
    pub fn default_dtype(&self) -> DType {
        P::DEFAULT_DTYPE
    }

    /// The descriptor of `arg`, or [`default_quant_entry`] if it was never configured.
    pub fn get(&self, arg: ArgId) -> &QuantEntry {
        self.entries.get(&arg).unwrap_or(default_quant_entry())
    }

    /// Sets the mask of `arg` with the default data type and no groups.
    pub fn set(&mut self, arg: ArgId, mask: i32) -> Result<(), QuantError> {
        self.set_native(arg, mask, P::DEFAULT_DTYPE, &[])
    }

    /// Configures the native channel of `arg`, routed by the policy.
    pub fn set_native(
        &mut self,
        arg: ArgId,
        mask: i32,
        dtype: DType,
        group_dims: &[i64],
    ) -> Result<(), QuantError> {
        Self::check_arg(arg)?;
        self.update(arg, |entry| P::set_native(entry, arg, mask, dtype, group_dims))
    }

    /// Configures the scale channel of `arg` with a mask over the first dimension.
    pub fn set_scale(&mut self, arg: ArgId, dims: &[i64], dtype: DType) -> Result<(), QuantError> {
        Self::check_arg(arg)?;
        self.update(arg, |entry| entry.set_scale(dims, dtype, PER_DIM_0_MASK))
    }

    /// Configures the zero-point channel of `arg`. Only weights accept it.
    pub fn set_zero_point(
        &mut self,
        arg: ArgId,
        dims: &[i64],
        dtype: DType,
    ) -> Result<(), QuantError> {
        Self::check_weights(arg)?;
        self.update(arg, |entry| entry.set_zero_point(dims, dtype))
    }

    /// Configures grouped zero-points of `arg`. Only weights accept it.
    ///
    /// See [`QuantEntry::set_zero_point_grouped`].
    pub fn set_zero_point_grouped(
        &mut self,
        arg: ArgId,
        dims: &[i64],
        dtype: DType,
        mask: i32,
    ) -> Result<(), QuantError> {
        Self::check_weights(arg)?;
        self.update(arg, |entry| entry.set_zero_point_grouped(dims, dtype, mask))
    }

    /// Overwrites the descriptor of `arg`, whatever the policy says.
    ///
    /// Assigning [`default_quant_entry`] resets the argument, but its id stays in the set:
    /// [`QuantEntries::contains`] still reports it and equality with a set that never saw the id
    /// doesn't hold.
    pub fn assign(&mut self, arg: ArgId, entry: &QuantEntry) {
        self.entries.entry(arg).or_default().assign(entry);
    }

    /// Returns `true` if `arg` has no quantization configured.
    pub fn arg_has_default_values(&self, arg: ArgId) -> bool {
        self.get(arg).has_default_values()
    }

    /// Returns `true` if `arg` has no group shape.
    pub fn arg_has_default_groups(&self, arg: ArgId) -> bool {
        self.get(arg).has_default_groups()
    }

    /// Returns `true` if `arg` uses the policy default data type or none at all.
    pub fn arg_has_default_data_type(&self, arg: ArgId) -> bool {
        Self::is_default_dtype(self.get(arg))
    }

    /// Returns `true` if every argument outside `supported_args` has default values.
    ///
    /// Used to reject configurations customizing an argument a primitive doesn't support.
    pub fn has_default_values(&self, supported_args: &[ArgId]) -> bool {
        self.has_default_property(supported_args, QuantEntry::has_default_values)
    }

    /// Returns `true` if every argument outside `supported_args` has no group shape.
    pub fn has_default_groups(&self, supported_args: &[ArgId]) -> bool {
        self.has_default_property(supported_args, QuantEntry::has_default_groups)
    }

    /// Returns `true` if every argument outside `supported_args` uses the default data type.
    pub fn has_default_data_type(&self, supported_args: &[ArgId]) -> bool {
        self.has_default_property(supported_args, Self::is_default_dtype)
    }

    /// Mask of `arg`.
    pub fn mask(&self, arg: ArgId) -> i32 {
        self.get(arg).mask()
    }

    /// Data type of `arg`.
    pub fn dtype(&self, arg: ArgId) -> DType {
        self.get(arg).dtype()
    }

    /// Dims of `arg`.
    pub fn dims(&self, arg: ArgId) -> &[i64] {
        self.get(arg).dims()
    }

    /// Rank of the dims of `arg`.
    pub fn rank(&self, arg: ArgId) -> usize {
        self.get(arg).rank()
    }

    /// Group size of `arg` along dimension `dim`. See [`QuantEntry::group`].
    pub fn group(&self, arg: ArgId, dim: usize) -> i64 {
        self.get(arg).group(dim)
    }

    /// Returns `true` if `arg` has a stored descriptor, default or not.
    pub fn contains(&self, arg: ArgId) -> bool {
        self.entries.contains_key(&arg)
    }

    /// Number of stored descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no descriptor is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored descriptors in ascending argument order.
    pub fn iter(&self) -> impl Iterator<Item = (ArgId, &QuantEntry)> {
        self.entries.iter().map(|(arg, entry)| (*arg, entry))
    }

    /// Hash of the set, consistent with equality.
    #[cfg(feature = "std")]
    pub fn hash_value(&self) -> u64 {
        use core::hash::{Hash, Hasher};

        let mut hasher = std::hash::DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Encodes the set: the entry count, then each argument id followed by its descriptor.
    pub fn serialize(&self, stream: &mut SerializationStream) {
        stream.append(self.entries.len() as u64);
        for (arg, entry) in self.entries.iter() {
            stream.append(*arg);
            entry.serialize(stream);
        }
    }

    /// Decodes a set written by [`QuantEntries::serialize`].
    ///
    /// Entries are stored as-is, like [`QuantEntries::assign`] does.
    pub fn deserialize(d: &mut Deserializer<'_>) -> Result<Self, QuantError> {
        let count = d.pop::<u64>()?;
        let mut entries = BTreeMap::new();
        let mut last = None;

        for _ in 0..count {
            let arg = d.pop::<ArgId>()?;
            if last.is_some_and(|last| arg <= last) {
                return Err(malformed(format!("argument {arg} is out of order or repeated")));
            }
            last = Some(arg);

            entries.insert(arg, QuantEntry::deserialize(d)?);
        }

        Ok(Self {
            entries,
            policy: PhantomData,
        })
    }

    fn check_arg(arg: ArgId) -> Result<(), QuantError> {
        if P::is_valid_arg(arg) {
            return Ok(());
        }

        log::debug!("The {} policy rejects argument {arg}", P::NAME);
        Err(QuantError::InvalidArgument(format!(
            "{} is not accepted by {}",
            arg_name(arg),
            P::NAME
        )))
    }

    fn check_weights(arg: ArgId) -> Result<(), QuantError> {
        if arg == WEIGHTS {
            return Ok(());
        }

        log::debug!("Zero-points requested for argument {arg}, only weights support them");
        Err(QuantError::InvalidArgument(format!(
            "zero-point dims are only supported for weights, got {}",
            arg_name(arg)
        )))
    }

    fn is_default_dtype(entry: &QuantEntry) -> bool {
        // `Undefined` is what an unset entry reports.
        let dtype = entry.dtype();
        dtype == P::DEFAULT_DTYPE || dtype == DType::Undefined
    }

    /// Runs `update` on the entry of `arg`. A new entry is only stored when `update` succeeds.
    fn update<F>(&mut self, arg: ArgId, update: F) -> Result<(), QuantError>
    where
        F: FnOnce(&mut QuantEntry) -> Result<(), QuantError>,
    {
        if let Some(entry) = self.entries.get_mut(&arg) {
            return update(entry);
        }

        let mut entry = QuantEntry::new();
        update(&mut entry)?;
        self.entries.insert(arg, entry);

        Ok(())
    }

    fn has_default_property<F>(&self, supported_args: &[ArgId], predicate: F) -> bool
    where
        F: Fn(&QuantEntry) -> bool,
    {
        self.entries
            .iter()
            .all(|(arg, entry)| predicate(entry) || supported_args.contains(arg))
    }
}

impl<P: QuantPolicy> fmt::Display for QuantEntries<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (arg, entry) in self.iter() {
            if entry.has_default_values() {
                continue;
            }
            if !first {
                f.write_str("+")?;
            }
            first = false;
            write!(f, "{}:{entry}", arg_name(arg))?;
        }

        Ok(())
    }
}
