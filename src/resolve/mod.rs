//! Resolution of descriptors into live values.
//!
//! Descriptors are purely nominal. To obtain the class, method handle or constant a descriptor
//! names, it is resolved against an [`AccessContext`]: a caller-supplied capability that loads
//! classes, finds members and invokes bootstrap methods with its own access rights. This module
//! defines that contract and the algorithm that drives it.
//!
//! # Architecture
//!
//! - [`AccessContext`] - the lookups a runtime provides, reporting failures with the linkage
//!   variants of [`crate::Error`]
//! - [`Resolver`] - walks a descriptor depth-first, left to right, and calls the context
//! - [`ResolutionConfig`] - nesting limit, bootstrap signature check, argument canonicalization
//! - [`InterningContext`] - an optional class cache in front of any context
//!
//! # Error Propagation
//!
//! Linkage errors raised by the context propagate unchanged. Failures raised while computing a
//! dynamic constant or linking a call site that are not linkage errors are wrapped into
//! [`crate::Error::BootstrapMethod`], with the original error as its source. Nothing is retried
//! and nothing is cached, unless the caller opts into an [`InterningContext`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use constdesc::prelude::*;
//!
//! let context = MyRuntime::lookup_for("com.example.App");
//! let color = EnumDesc::of(ClassDesc::of("com.example.Color")?, "RED")?;
//! let red = ConstantDesc::from(color).resolve(&context)?;
//! ```

mod config;
mod context;
mod interning;
mod resolver;

pub use config::ResolutionConfig;
pub use context::{AccessContext, BootstrapInvocation, InvocationKind, Literal};
pub use interning::InterningContext;
pub use resolver::Resolver;
