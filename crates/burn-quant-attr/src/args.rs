use alloc::format;
use alloc::string::{String, ToString};

/// Identifier of a primitive argument.
///
/// Ids are small integers, optionally combined with flag bits such as [`MULTIPLE_SRC`] or
/// [`ATTR_POST_OP_DW`].
pub type ArgId = i32;

/// Primary input.
pub const SRC: ArgId = 1;
/// Secondary input, used by binary-style operations.
pub const SRC_1: ArgId = 2;
/// Third input, used by attention.
pub const SRC_2: ArgId = 3;
/// Primary output.
pub const DST: ArgId = 17;
/// Weights.
pub const WEIGHTS: ArgId = 33;
/// Bias.
pub const BIAS: ArgId = 41;

/// Flag for the n-th input of a variadic-input primitive (`MULTIPLE_SRC + n`).
pub const MULTIPLE_SRC: ArgId = 1024;
/// Flag for the n-th output of a variadic-output primitive (`MULTIPLE_DST + n`).
pub const MULTIPLE_DST: ArgId = 2048;
/// Flag for a scale attribute argument.
pub const ATTR_SCALES: ArgId = 4096;
/// Flag for a zero-point attribute argument.
pub const ATTR_ZERO_POINTS: ArgId = 8192;
/// Tag for the arguments of a fused depthwise convolution post-op.
pub const ATTR_POST_OP_DW: ArgId = 16384;

/// Short name of an argument, as used in verbose output.
pub fn arg_name(arg: ArgId) -> String {
    if arg & ATTR_POST_OP_DW != 0 {
        return format!("attr_post_op_dw_{}", arg_name(arg & !ATTR_POST_OP_DW));
    }
    if arg & MULTIPLE_SRC != 0 {
        return format!("msrc{}", arg - MULTIPLE_SRC);
    }

    match arg {
        SRC => "src".to_string(),
        SRC_1 => "src1".to_string(),
        SRC_2 => "src2".to_string(),
        DST => "dst".to_string(),
        WEIGHTS => "wei".to_string(),
        BIAS => "bia".to_string(),
        _ => arg.to_string(),
    }
}
