//! # Excitra Models
//!
//! Analytic dielectric-function models. All models implement the
//! [`DielectricModel`](provider::DielectricModel) trait, which provides
//! energy-dependent complex dielectric functions and derived refractive
//! indices.
//!
//! ## Available models
//!
//! | Model | Module | Notes |
//! |-------|--------|-------|
//! | Tanguy (excitonic, analytic) | [`tanguy`] | 3-D and 2-D, allowed and forbidden transitions |
//!
//! The Tanguy model is a closed-form alternative to the microscopic
//! solver in `excitra-core`; the two are never composed. [`special`]
//! supplies the complex digamma function the Tanguy line shape needs.

pub mod provider;
pub mod special;
pub mod tanguy;

pub use provider::{complex_index, DielectricModel, ModelError};
pub use tanguy::TanguyModel;
