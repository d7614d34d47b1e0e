//! Signature comparison algorithms.

pub mod similarity;
