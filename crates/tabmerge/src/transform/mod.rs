//! Table transformations: field splitting, zero stripping, null filtering,
//! threshold flagging and row-wise merging.

mod engine;
mod merge;
mod operations;
mod steps;

pub use engine::TransformEngine;
pub use merge::concat;
pub use operations::{TransformChange, TransformOperation, TransformResult};
pub use steps::{
    drop_null_rows, flag_above, numeric_value, split_column, split_value, strip_leading_zeros,
    strip_value,
};
