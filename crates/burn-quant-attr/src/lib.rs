#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Burn Quantization Attributes
//!
//! This library records, per argument of a compute primitive, how that argument is quantized:
//! scaling factors and zero-points, their masks, data types and optional group shapes.
//!
//! It only describes *how* to quantize. The arithmetic lives in the kernels consuming these
//! descriptors.

#[macro_use]
extern crate derive_new;

extern crate alloc;

mod args;
mod dims;
mod dtype;
mod dyn_quant;
mod entries;
mod entry;
mod errors;
mod policy;
mod stream;

pub use args::*;
pub use dims::*;
pub use dtype::*;
pub use dyn_quant::*;
pub use entries::*;
pub use entry::*;
pub use errors::*;
pub use policy::*;
pub use stream::*;
