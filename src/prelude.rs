//! # constdesc Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits of
//! the constdesc library. Import it to get quick access to the descriptor types, the well-known
//! constants and the resolution protocol.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all constdesc operations
pub use crate::Error;

/// The result type used throughout constdesc
pub use crate::Result;

// ================================================================================================
// Descriptor Grammar
// ================================================================================================

/// Descriptor parsing and name validation
pub use crate::descriptor::{
    parse_field_descriptor, parse_method_descriptor, validate_binary_class_name,
    validate_member_name, DescriptorParser, MAX_ARRAY_DIMENSIONS,
};

// ================================================================================================
// Descriptors
// ================================================================================================

/// The closed sum over all loadable constants
pub use crate::constant::ConstantDesc;

/// Type descriptors
pub use crate::constant::{ClassDesc, DescriptorFlags, MethodTypeDesc};

/// Method handle descriptors and their kinds
pub use crate::constant::{
    AsTypeMethodHandleDesc, DirectMethodHandleDesc, Kind, MethodHandleDesc, ReferenceKind,
};

/// Bootstrap-computed descriptors
pub use crate::constant::{
    DynamicCallSiteDesc, DynamicConstantDesc, EnumDesc, VarHandleDesc, VarHandleKind,
};

/// Well-known descriptors and self-description bootstraps
pub use crate::constant::{bootstraps, descs};

// ================================================================================================
// Resolution
// ================================================================================================

/// The access context contract and its inputs
pub use crate::resolve::{AccessContext, BootstrapInvocation, InvocationKind, Literal};

/// Resolution drivers and configuration
pub use crate::resolve::{InterningContext, ResolutionConfig, Resolver};
