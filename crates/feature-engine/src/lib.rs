//! Feature Engineering Engine
//!
//! Encodes the premium form's categorical selections and assembles the
//! fixed-order feature vector the fitted models expect.

pub mod categories;
mod features;
mod input;

pub use categories::{encode_binary, encode_onehot, encode_score, LookupTable, OneHotGroup};
pub use features::{Column, FeatureAssembler, FeatureVector, FEATURE_DIMENSION};
pub use input::RawInput;
