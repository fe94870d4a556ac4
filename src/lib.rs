// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # constdesc
//!
//! Nominal descriptors for the loadable constants of the JVM constant pool.
//!
//! A descriptor names a class, a method type, a method handle, a dynamically-computed constant
//! or an `invokedynamic` call site purely symbolically: by descriptor strings, member names and
//! bootstrap arguments. Nothing is loaded while descriptors are built, compared or hashed. Class
//! file tooling can build and inspect constant pool entries with them, and a runtime can later
//! resolve them against its own notion of classes and access.
//!
//! ## Features
//!
//! - **Strict descriptor grammar** - field and method descriptors are validated on construction
//! - **Immutable values** - every descriptor is `Send + Sync`, cheap to clone and hashable
//! - **Canonicalization** - generic dynamic constants over well-known bootstraps are lifted to
//!   primitive classes, enum constants, var handles and the shared `null` descriptor
//! - **Self-description** - descriptors can describe themselves as dynamic constants, and be
//!   rebuilt from such a description
//! - **Pluggable resolution** - a caller-supplied [`resolve::AccessContext`] performs all
//!   lookups, with a configurable nesting limit and linkage-style errors
//!
//! ## Quick Start
//!
//! ```rust
//! use constdesc::prelude::*;
//!
//! let list = ClassDesc::of("java.util.List")?;
//! let get = DirectMethodHandleDesc::of_method_descriptor(
//!     Kind::InterfaceVirtual,
//!     list.clone(),
//!     "get",
//!     "(I)Ljava/lang/Object;",
//! )?;
//!
//! assert_eq!(get.handle_type().descriptor_string(), "(Ljava/util/List;I)Ljava/lang/Object;");
//! assert_eq!(list.array_type()?.descriptor_string(), "[Ljava/util/List;");
//! # Ok::<(), constdesc::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`descriptor`] - the field and method descriptor grammar, binary and member name rules
//! - [`constant`] - the descriptor types, [`constant::ConstantDesc`], well-known constants in
//!   [`constant::descs`] and self-description rebuilding in [`constant::bootstraps`]
//! - [`resolve`] - the [`resolve::AccessContext`] contract and the [`resolve::Resolver`]
//! - [`prelude`] - convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - construction and linkage errors
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `debug` for canonicalization outcomes and `trace` for
//! every resolution step. Install any subscriber to see them.

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use constdesc::prelude::*;
///
/// let desc = MethodTypeDesc::of_descriptor("(ILjava/lang/String;)V")?;
/// assert_eq!(desc.parameter_count(), 2);
/// # Ok::<(), constdesc::Error>(())
/// ```
pub mod prelude;

/// The JVM descriptor grammar
///
/// Parsing and validation of field descriptors (`I`, `[J`, `Ljava/lang/String;`) and method
/// descriptors (`(IJ)V`), plus the rules for binary class names and unqualified member names.
/// The descriptor types in [`constant`] are built on top of these functions.
///
/// # Examples
///
/// ```rust
/// use constdesc::descriptor::parse_method_descriptor;
///
/// let (params, ret) = parse_method_descriptor("(I[Ljava/lang/String;)V")?;
/// assert_eq!(params, ["I", "[Ljava/lang/String;"]);
/// assert_eq!(ret, "V");
/// # Ok::<(), constdesc::Error>(())
/// ```
pub mod descriptor;

/// Nominal descriptors for loadable constants
///
/// See the module documentation for the type hierarchy and canonicalization rules.
pub mod constant;

/// Resolution of descriptors against a caller-supplied access context
pub mod resolve;

/// `constdesc` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use constdesc::{constant::ClassDesc, Result};
///
/// fn string_array() -> Result<ClassDesc> {
///     ClassDesc::of("java.lang.String")?.array_type()
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `constdesc` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the construction and
/// linkage categories.
pub use error::Error;

/// Main descriptor types, re-exported for convenience
pub use constant::{
    ClassDesc, ConstantDesc, DirectMethodHandleDesc, DynamicCallSiteDesc, DynamicConstantDesc,
    EnumDesc, Kind, MethodHandleDesc, MethodTypeDesc, VarHandleDesc,
};

/// Resolution entry points, re-exported for convenience
pub use resolve::{AccessContext, InterningContext, ResolutionConfig, Resolver};
