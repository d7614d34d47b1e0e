//! Prevalence adjustments layered on top of per-cluster prevalence:
//! class-wide dampening and cross-cluster scaling.

pub mod class_prevalence;
pub mod cross_cluster;
