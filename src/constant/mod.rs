//! Nominal descriptors for loadable constants.
//!
//! This module contains the descriptor types and the closed [`ConstantDesc`] sum over them.
//! A descriptor is an immutable value that names a class, a method type, a method handle or a
//! dynamically-computed constant without loading anything. Descriptors can be built, compared,
//! hashed and shared across threads freely; turning them into live values is the job of the
//! [`crate::resolve`] module.
//!
//! # Architecture
//!
//! The types build on each other, leaf first:
//!
//! - [`ClassDesc`] - a class, interface, array or primitive type, wrapping a field descriptor
//! - [`MethodTypeDesc`] - parameter types plus a return type
//! - [`DirectMethodHandleDesc`] / [`MethodHandleDesc`] - member references tagged with a [`Kind`]
//! - [`DynamicConstantDesc`] - a constant computed by a bootstrap method from static arguments
//! - [`EnumDesc`], [`VarHandleDesc`] - specialized dynamic constants produced by canonicalization
//! - [`DynamicCallSiteDesc`] - an `invokedynamic` call site
//!
//! # Canonicalization
//!
//! A generic [`DynamicConstantDesc`] whose bootstrap is one of a few well-known methods can be
//! lifted to a more specific descriptor with [`DynamicConstantDesc::try_canonicalize`]:
//!
//! | Bootstrap                              | Canonical form                  |
//! |----------------------------------------|---------------------------------|
//! | [`descs::BSM_NULL_CONSTANT`]           | the shared [`descs::NULL`]      |
//! | [`descs::BSM_PRIMITIVE_CLASS`]         | a primitive [`ClassDesc`]       |
//! | [`descs::BSM_ENUM_CONSTANT`]           | an [`EnumDesc`]                 |
//! | [`descs::BSM_VARHANDLE_FIELD`]         | a field [`VarHandleDesc`]       |
//! | [`descs::BSM_VARHANDLE_STATIC_FIELD`]  | a static field [`VarHandleDesc`]|
//! | [`descs::BSM_VARHANDLE_ARRAY`]         | an array [`VarHandleDesc`]      |
//!
//! The lifted descriptor always compares equal to the generic one.
//!
//! # Examples
//!
//! ```rust
//! use constdesc::constant::{descs, ClassDesc, ConstantDesc, DynamicConstantDesc};
//!
//! let generic = DynamicConstantDesc::of_name_and_type(
//!     descs::BSM_PRIMITIVE_CLASS.clone(),
//!     "I",
//!     descs::CD_CLASS.clone(),
//! )?;
//! let canonical = generic.clone().try_canonicalize();
//!
//! assert_eq!(canonical, ConstantDesc::Class(ClassDesc::of_descriptor("I")?));
//! assert_eq!(canonical, ConstantDesc::from(generic));
//! # Ok::<(), constdesc::Error>(())
//! ```

mod callsite;
mod canonical;
mod classdesc;
mod dynamic;
mod enumdesc;
mod kind;
mod methodhandle;
mod methodtype;
mod varhandle;

pub mod bootstraps;
pub mod descs;

pub use callsite::DynamicCallSiteDesc;
pub use classdesc::{ClassDesc, DescriptorFlags};
pub use dynamic::DynamicConstantDesc;
pub use enumdesc::EnumDesc;
pub use kind::{Kind, ReferenceKind};
pub use methodhandle::{AsTypeMethodHandleDesc, DirectMethodHandleDesc, MethodHandleDesc};
pub use methodtype::MethodTypeDesc;
pub use varhandle::{VarHandleDesc, VarHandleKind};

use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{
    resolve::{AccessContext, ResolutionConfig, Resolver},
    Result,
};

/// A nominal descriptor for any loadable constant
///
/// Literals (`int`, `long`, `float`, `double`, `String`) describe themselves. All other
/// variants wrap one of the descriptor types of this module.
///
/// # Equality
///
/// Equality is structural within a variant. Across variants, two descriptors are equal if they
/// describe the same bootstrap invocation: a primitive [`ClassDesc`], an [`EnumDesc`] or a
/// [`VarHandleDesc`] equals the generic [`DynamicConstantDesc`] it canonicalizes from. Floats
/// and doubles compare by bit pattern, so `NaN` equals itself. Hashing is consistent with this
/// equality.
#[derive(Clone, Debug)]
pub enum ConstantDesc {
    /// An `int` literal
    Int(i32),
    /// A `long` literal
    Long(i64),
    /// A `float` literal
    Float(f32),
    /// A `double` literal
    Double(f64),
    /// A `String` literal
    String(String),
    /// A class, interface, array or primitive type
    Class(ClassDesc),
    /// A method type
    MethodType(MethodTypeDesc),
    /// A method handle
    MethodHandle(MethodHandleDesc),
    /// A dynamically-computed constant
    ///
    /// Shared through an [`Arc`] so canonical singletons like [`descs::NULL`] keep their identity.
    Dynamic(Arc<DynamicConstantDesc>),
    /// An enum constant
    Enum(EnumDesc),
    /// A var handle
    VarHandle(VarHandleDesc),
}

impl ConstantDesc {
    /// The generic dynamic constant this descriptor is equivalent to, if any
    ///
    /// Dynamic constants, enum constants, var handles and primitive class descriptors are all
    /// bootstrap invocations at heart; every other descriptor returns `None`.
    #[must_use]
    pub fn dynamic_form(&self) -> Option<Cow<'_, DynamicConstantDesc>> {
        match self {
            ConstantDesc::Dynamic(dynamic) => Some(Cow::Borrowed(dynamic)),
            ConstantDesc::Enum(desc) => Some(Cow::Borrowed(desc.as_dynamic())),
            ConstantDesc::VarHandle(desc) => Some(Cow::Borrowed(desc.as_dynamic())),
            ConstantDesc::Class(class) if class.is_primitive() => {
                Some(Cow::Owned(DynamicConstantDesc::from_parts(
                    descs::BSM_PRIMITIVE_CLASS.clone(),
                    class.descriptor_string(),
                    descs::CD_CLASS.clone(),
                    Vec::new(),
                )))
            }
            _ => None,
        }
    }

    /// The class descriptor, if this is one
    #[must_use]
    pub fn as_class(&self) -> Option<&ClassDesc> {
        match self {
            ConstantDesc::Class(class) => Some(class),
            _ => None,
        }
    }

    /// The string literal, if this is one
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantDesc::String(value) => Some(value),
            _ => None,
        }
    }

    /// The dynamic constant, if this is the generic variant
    #[must_use]
    pub fn as_dynamic(&self) -> Option<&Arc<DynamicConstantDesc>> {
        match self {
            ConstantDesc::Dynamic(dynamic) => Some(dynamic),
            _ => None,
        }
    }

    /// Returns `true` for the five literal variants
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ConstantDesc::Int(_)
                | ConstantDesc::Long(_)
                | ConstantDesc::Float(_)
                | ConstantDesc::Double(_)
                | ConstantDesc::String(_)
        )
    }

    /// Returns `true` if both are the same shared dynamic constant instance
    #[must_use]
    pub fn ptr_eq(&self, other: &ConstantDesc) -> bool {
        match (self, other) {
            (ConstantDesc::Dynamic(a), ConstantDesc::Dynamic(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Resolve this descriptor under `context` with the default [`ResolutionConfig`]
    ///
    /// # Errors
    /// Propagates linkage errors from the context, and returns
    /// [`crate::Error::BootstrapMethod`] when a bootstrap fails.
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve(self)
    }

    /// Resolve this descriptor under `context` with a custom [`ResolutionConfig`]
    ///
    /// # Errors
    /// Same as [`ConstantDesc::resolve`], plus [`crate::Error::RecursionLimit`] when nested
    /// dynamic constants exceed `config.max_depth`.
    pub fn resolve_with<C: AccessContext + ?Sized>(
        &self,
        context: &C,
        config: ResolutionConfig,
    ) -> Result<C::Value> {
        Resolver::with_config(context, config).resolve(self)
    }

    /// A descriptor that rebuilds this one through the descriptor bootstraps
    ///
    /// Literals describe themselves. Returns `None` if a nested bootstrap argument cannot be
    /// described.
    #[must_use]
    pub fn describe_constable(&self) -> Option<ConstantDesc> {
        match self {
            ConstantDesc::Int(_)
            | ConstantDesc::Long(_)
            | ConstantDesc::Float(_)
            | ConstantDesc::Double(_)
            | ConstantDesc::String(_) => Some(self.clone()),
            ConstantDesc::Class(class) => Some(class.describe_constable().into()),
            ConstantDesc::MethodType(ty) => Some(ty.describe_constable().into()),
            ConstantDesc::MethodHandle(handle) => Some(handle.describe_constable().into()),
            ConstantDesc::Dynamic(dynamic) => dynamic.describe_constable().map(Into::into),
            ConstantDesc::Enum(desc) => Some(desc.describe_constable().into()),
            ConstantDesc::VarHandle(desc) => Some(desc.describe_constable().into()),
        }
    }
}

impl PartialEq for ConstantDesc {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ConstantDesc::Int(a), ConstantDesc::Int(b)) => a == b,
            (ConstantDesc::Long(a), ConstantDesc::Long(b)) => a == b,
            (ConstantDesc::Float(a), ConstantDesc::Float(b)) => a.to_bits() == b.to_bits(),
            (ConstantDesc::Double(a), ConstantDesc::Double(b)) => a.to_bits() == b.to_bits(),
            (ConstantDesc::String(a), ConstantDesc::String(b)) => a == b,
            (ConstantDesc::Class(a), ConstantDesc::Class(b)) => a == b,
            (ConstantDesc::MethodType(a), ConstantDesc::MethodType(b)) => a == b,
            (ConstantDesc::MethodHandle(a), ConstantDesc::MethodHandle(b)) => a == b,
            (ConstantDesc::Dynamic(a), ConstantDesc::Dynamic(b)) => Arc::ptr_eq(a, b) || a == b,
            _ => match (self.dynamic_form(), other.dynamic_form()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for ConstantDesc {}

impl Hash for ConstantDesc {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(form) = self.dynamic_form() {
            form.hash(state);
            return;
        }

        std::mem::discriminant(self).hash(state);
        match self {
            ConstantDesc::Int(value) => value.hash(state),
            ConstantDesc::Long(value) => value.hash(state),
            ConstantDesc::Float(value) => value.to_bits().hash(state),
            ConstantDesc::Double(value) => value.to_bits().hash(state),
            ConstantDesc::String(value) => value.hash(state),
            ConstantDesc::Class(class) => class.hash(state),
            ConstantDesc::MethodType(ty) => ty.hash(state),
            ConstantDesc::MethodHandle(handle) => handle.hash(state),
            // Covered by the dynamic form above
            ConstantDesc::Dynamic(_) | ConstantDesc::Enum(_) | ConstantDesc::VarHandle(_) => {}
        }
    }
}

impl fmt::Display for ConstantDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantDesc::Int(value) => write!(f, "{value}"),
            ConstantDesc::Long(value) => write!(f, "{value}"),
            ConstantDesc::Float(value) => write!(f, "{value}"),
            ConstantDesc::Double(value) => write!(f, "{value}"),
            ConstantDesc::String(value) => write!(f, "{value}"),
            ConstantDesc::Class(class) => write!(f, "{class}"),
            ConstantDesc::MethodType(ty) => write!(f, "{ty}"),
            ConstantDesc::MethodHandle(handle) => write!(f, "{handle}"),
            ConstantDesc::Dynamic(dynamic) => write!(f, "{dynamic}"),
            ConstantDesc::Enum(desc) => write!(f, "{desc}"),
            ConstantDesc::VarHandle(desc) => write!(f, "{desc}"),
        }
    }
}

impl From<i32> for ConstantDesc {
    fn from(value: i32) -> Self {
        ConstantDesc::Int(value)
    }
}

impl From<i64> for ConstantDesc {
    fn from(value: i64) -> Self {
        ConstantDesc::Long(value)
    }
}

impl From<f32> for ConstantDesc {
    fn from(value: f32) -> Self {
        ConstantDesc::Float(value)
    }
}

impl From<f64> for ConstantDesc {
    fn from(value: f64) -> Self {
        ConstantDesc::Double(value)
    }
}

impl From<&str> for ConstantDesc {
    fn from(value: &str) -> Self {
        ConstantDesc::String(value.to_string())
    }
}

impl From<String> for ConstantDesc {
    fn from(value: String) -> Self {
        ConstantDesc::String(value)
    }
}

impl From<ClassDesc> for ConstantDesc {
    fn from(value: ClassDesc) -> Self {
        ConstantDesc::Class(value)
    }
}

impl From<MethodTypeDesc> for ConstantDesc {
    fn from(value: MethodTypeDesc) -> Self {
        ConstantDesc::MethodType(value)
    }
}

impl From<MethodHandleDesc> for ConstantDesc {
    fn from(value: MethodHandleDesc) -> Self {
        ConstantDesc::MethodHandle(value)
    }
}

impl From<DirectMethodHandleDesc> for ConstantDesc {
    fn from(value: DirectMethodHandleDesc) -> Self {
        ConstantDesc::MethodHandle(MethodHandleDesc::Direct(value))
    }
}

impl From<DynamicConstantDesc> for ConstantDesc {
    fn from(value: DynamicConstantDesc) -> Self {
        ConstantDesc::Dynamic(Arc::new(value))
    }
}

impl From<Arc<DynamicConstantDesc>> for ConstantDesc {
    fn from(value: Arc<DynamicConstantDesc>) -> Self {
        ConstantDesc::Dynamic(value)
    }
}

impl From<EnumDesc> for ConstantDesc {
    fn from(value: EnumDesc) -> Self {
        ConstantDesc::Enum(value)
    }
}

impl From<VarHandleDesc> for ConstantDesc {
    fn from(value: VarHandleDesc) -> Self {
        ConstantDesc::VarHandle(value)
    }
}
