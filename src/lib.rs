//! Source-emission core for a Go mock-implementation generator.
//!
//! Given an abstract model of a package's interfaces, this crate:
//! - assigns deterministic, position-keyed names to parameters that lack
//!   a usable declared name ([`generator::arg_names`]),
//! - renders the compact, grouped parameter-list fragment of a Go
//!   signature ([`generator::arg_string`]),
//! - resolves import paths to their declared package identifiers through
//!   an injected build-metadata lookup ([`generator::create_package_map`]),
//!
//! and composes the three into [`generator::Generator`], whose
//! [`PackagePlan`](generator::PackagePlan) a downstream emitter turns into
//! mock struct bodies and files. Discovery of interfaces, body emission,
//! file writing, and formatting all live in that surrounding tool, not
//! here.

#![forbid(unsafe_code)]
#![deny(unused_must_use, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

pub mod generator;
pub mod model;

pub use generator::{Generator, PackagePlan};
pub use model::Package;
