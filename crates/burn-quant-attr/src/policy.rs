use core::fmt::Debug;
use core::hash::Hash;

use crate::{
    ATTR_POST_OP_DW, ArgId, DST, DType, MULTIPLE_SRC, QuantEntries, QuantEntry, QuantError, SRC,
    SRC_1, SRC_2, WEIGHTS,
};

/// Rules distinguishing one kind of [`QuantEntries`] from another: which argument ids may
/// carry quantization, the default data type, and how the native setter is routed.
pub trait QuantPolicy:
    Clone + Copy + Debug + Default + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Name used in error and log messages.
    const NAME: &'static str;

    /// Data type an argument is assumed to use when none was provided.
    const DEFAULT_DTYPE: DType;

    /// Returns `true` if `arg` may carry non-default quantization.
    fn is_valid_arg(arg: ArgId) -> bool;

    /// Applies a native configuration to the entry stored for `arg`.
    fn set_native(
        entry: &mut QuantEntry,
        _arg: ArgId,
        mask: i32,
        dtype: DType,
        group_dims: &[i64],
    ) -> Result<(), QuantError> {
        entry.set_native(mask, dtype, group_dims)
    }
}

/// Policy of scaling factors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScalePolicy;

impl QuantPolicy for ScalePolicy {
    const NAME: &'static str = "scales";
    const DEFAULT_DTYPE: DType = DType::F32;

    fn is_valid_arg(arg: ArgId) -> bool {
        // Regular and binary arguments.
        if matches!(arg, SRC | WEIGHTS | DST | SRC_1) {
            return true;
        }
        // Variadic inputs (concat).
        if arg & MULTIPLE_SRC != 0 {
            return true;
        }
        // Depthwise convolution post-op.
        if [SRC, WEIGHTS, DST]
            .iter()
            .any(|regular| arg == ATTR_POST_OP_DW | regular)
        {
            return true;
        }
        // Attention.
        arg == SRC_2
    }
}

/// Policy of zero-points.
///
/// Weights configured through the native setter are stored as grouped zero-points, so their
/// group shape is readable through [`QuantEntry::group`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ZeroPointPolicy;

impl QuantPolicy for ZeroPointPolicy {
    const NAME: &'static str = "zero-points";
    const DEFAULT_DTYPE: DType = DType::I32;

    fn is_valid_arg(arg: ArgId) -> bool {
        // Internal gemm arguments map onto weights, src and dst.
        matches!(arg, SRC | WEIGHTS | DST | SRC_2)
    }

    fn set_native(
        entry: &mut QuantEntry,
        arg: ArgId,
        mask: i32,
        dtype: DType,
        group_dims: &[i64],
    ) -> Result<(), QuantError> {
        if arg == WEIGHTS {
            entry.set_zero_point_grouped(group_dims, dtype, mask)
        } else {
            entry.set_native(mask, dtype, group_dims)
        }
    }
}

/// Scaling factors of every argument of a primitive.
pub type ScaleSet = QuantEntries<ScalePolicy>;

/// Zero-points of every argument of a primitive.
pub type ZeroPointSet = QuantEntries<ZeroPointPolicy>;
