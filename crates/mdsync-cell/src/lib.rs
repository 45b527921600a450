//! Periodic cell geometry for mdsync.
//!
//! This crate provides [`CoordinateResolver`], which turns wrapped engine
//! positions back into continuous trajectories and reconstructs bonds that
//! straddle a periodic boundary, and [`PeriodicCell`], an orthogonal or
//! triclinic cell implementing the [`Domain`](mdsync_core::Domain) trait.
//!
//! # Minimum-image forms
//!
//! Engines offer either a two-argument displacement form or an indexed
//! form that also takes a caller label and index. The form is a property
//! of the domain type ([`MinimumImageForm::of`]), chosen once rather than
//! probed per call.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod periodic;
pub mod resolver;

pub use error::CellError;
pub use periodic::{PeriodicCell, Remap};
pub use resolver::{CoordinateResolver, MinimumImageForm};
