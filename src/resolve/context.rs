//! The capability a descriptor is resolved against.

use crate::{
    constant::{ClassDesc, DirectMethodHandleDesc},
    Result,
};

/// A literal constant to embed as a live value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    /// An `int`
    Int(i32),
    /// A `long`
    Long(i64),
    /// A `float`
    Float(f32),
    /// A `double`
    Double(f64),
    /// A `String`
    String(&'a str),
}

/// What a bootstrap method is invoked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvocationKind {
    /// A dynamically-computed constant, the type argument is the constant's class
    DynamicConstant,
    /// An `invokedynamic` call site, the type argument is the call site's method type
    CallSite,
}

/// The arguments a bootstrap method is invoked with, after the lookup
#[derive(Debug, Clone)]
pub struct BootstrapInvocation<'a, V> {
    /// The descriptor of the bootstrap being invoked
    pub bootstrap: &'a DirectMethodHandleDesc,
    /// Constant or call site
    pub kind: InvocationKind,
    /// The constant name or invocation name
    pub name: &'a str,
    /// The resolved constant type or invocation type
    pub ty: V,
    /// The resolved static arguments, in order
    pub arguments: Vec<V>,
}

/// A visibility-checked view of a runtime that descriptors resolve against
///
/// The context owns every access decision. Descriptor resolution only decides which lookup to
/// perform and in which order, and how failures are reported. Implementations report lookup
/// failures with the linkage variants of [`crate::Error`]: [`crate::Error::ClassNotFound`],
/// [`crate::Error::NoSuchMember`], [`crate::Error::IllegalAccess`] and
/// [`crate::Error::IncompatibleClassChange`]. Any other error returned from
/// [`AccessContext::invoke_bootstrap`] is treated as a failure of the bootstrap itself.
///
/// Member lookups receive already resolved owners and types, in the same form as the JVM's
/// `MethodHandles.Lookup` methods.
pub trait AccessContext {
    /// A live runtime value: a class, method type, method handle, or any constant
    type Value: Clone;

    /// Load the class named by `descriptor`, primitives and arrays included
    ///
    /// # Errors
    /// Returns [`crate::Error::ClassNotFound`] or [`crate::Error::IllegalAccess`].
    fn find_class(&self, descriptor: &ClassDesc) -> Result<Self::Value>;

    /// Materialize a method type from resolved component classes
    ///
    /// # Errors
    /// Implementation defined, usually infallible.
    fn method_type(
        &self,
        return_type: Self::Value,
        params: Vec<Self::Value>,
    ) -> Result<Self::Value>;

    /// Find a static method
    ///
    /// # Errors
    /// Returns a linkage error when the member is missing or inaccessible.
    fn find_static(&self, owner: &Self::Value, name: &str, ty: &Self::Value) -> Result<Self::Value>;

    /// Find a virtual or interface method, `ty` excludes the receiver
    ///
    /// # Errors
    /// Returns a linkage error when the member is missing or inaccessible.
    fn find_virtual(
        &self,
        owner: &Self::Value,
        name: &str,
        ty: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a method for `invokespecial` from the context's own class
    ///
    /// # Errors
    /// Returns a linkage error when the member is missing or inaccessible.
    fn find_special(
        &self,
        owner: &Self::Value,
        name: &str,
        ty: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a constructor, `ty` returns `void`
    ///
    /// # Errors
    /// Returns a linkage error when the constructor is missing or inaccessible.
    fn find_constructor(&self, owner: &Self::Value, ty: &Self::Value) -> Result<Self::Value>;

    /// Find a getter for an instance field
    ///
    /// # Errors
    /// Returns a linkage error when the field is missing or inaccessible.
    fn find_getter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a setter for an instance field
    ///
    /// # Errors
    /// Returns a linkage error when the field is missing or inaccessible.
    fn find_setter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a getter for a static field
    ///
    /// # Errors
    /// Returns a linkage error when the field is missing or inaccessible.
    fn find_static_getter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a setter for a static field
    ///
    /// # Errors
    /// Returns a linkage error when the field is missing or inaccessible.
    fn find_static_setter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a var handle for an instance field
    ///
    /// # Errors
    /// Returns a linkage error when the field is missing or inaccessible.
    fn find_var_handle(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value>;

    /// Find a var handle for a static field
    ///
    /// # Errors
    /// Returns a linkage error when the field is missing or inaccessible.
    fn find_static_var_handle(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value>;

    /// Create a var handle over the elements of an array class
    ///
    /// # Errors
    /// Implementation defined.
    fn array_element_var_handle(&self, array_class: &Self::Value) -> Result<Self::Value>;

    /// Look up the enum constant `name` of `enum_class`
    ///
    /// # Errors
    /// Returns a linkage error when the constant is missing.
    fn enum_constant(&self, enum_class: &Self::Value, name: &str) -> Result<Self::Value>;

    /// Adapt a method handle to a method type
    ///
    /// # Errors
    /// Implementation defined, e.g. when the types are not convertible.
    fn as_type(&self, handle: Self::Value, ty: &Self::Value) -> Result<Self::Value>;

    /// Embed a literal
    fn literal(&self, literal: Literal<'_>) -> Self::Value;

    /// Invoke a resolved bootstrap method
    ///
    /// # Errors
    /// Linkage errors are reported as such, any other error is a failure of the bootstrap.
    fn invoke_bootstrap(
        &self,
        bootstrap: &Self::Value,
        invocation: BootstrapInvocation<'_, Self::Value>,
    ) -> Result<Self::Value>;
}
