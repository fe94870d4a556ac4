//! Class lookup cache in front of an [`AccessContext`].

use dashmap::DashMap;
use tracing::trace;

use crate::{
    constant::ClassDesc,
    resolve::{AccessContext, BootstrapInvocation, Literal},
    Result,
};

/// An [`AccessContext`] that remembers the classes it has found
///
/// Wraps another context and caches successful [`AccessContext::find_class`] results by
/// descriptor. Failed lookups are not cached, and every other operation is forwarded as is,
/// so bootstraps still run on every resolution.
///
/// The cache is a [`DashMap`], which lets a shared `InterningContext` be used from several
/// threads when the wrapped context allows it.
pub struct InterningContext<C: AccessContext> {
    inner: C,
    classes: DashMap<ClassDesc, C::Value>,
}

impl<C: AccessContext> InterningContext<C> {
    /// Wrap `inner` with an empty cache
    pub fn new(inner: C) -> Self {
        InterningContext {
            inner,
            classes: DashMap::new(),
        }
    }

    /// The wrapped context
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Number of cached classes
    pub fn cached_classes(&self) -> usize {
        self.classes.len()
    }

    /// Drop every cached class
    pub fn clear(&self) {
        self.classes.clear();
    }

    /// Unwrap the inner context, discarding the cache
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: AccessContext> AccessContext for InterningContext<C> {
    type Value = C::Value;

    fn find_class(&self, descriptor: &ClassDesc) -> Result<Self::Value> {
        if let Some(hit) = self.classes.get(descriptor) {
            return Ok(hit.value().clone());
        }

        // The lookup runs without holding a shard lock, the inner context may come back here
        let class = self.inner.find_class(descriptor)?;
        trace!(class = %descriptor.descriptor_string(), "interned class");
        self.classes.insert(descriptor.clone(), class.clone());
        Ok(class)
    }

    fn method_type(
        &self,
        return_type: Self::Value,
        params: Vec<Self::Value>,
    ) -> Result<Self::Value> {
        self.inner.method_type(return_type, params)
    }

    fn find_static(
        &self,
        owner: &Self::Value,
        name: &str,
        ty: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_static(owner, name, ty)
    }

    fn find_virtual(
        &self,
        owner: &Self::Value,
        name: &str,
        ty: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_virtual(owner, name, ty)
    }

    fn find_special(
        &self,
        owner: &Self::Value,
        name: &str,
        ty: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_special(owner, name, ty)
    }

    fn find_constructor(&self, owner: &Self::Value, ty: &Self::Value) -> Result<Self::Value> {
        self.inner.find_constructor(owner, ty)
    }

    fn find_getter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_getter(owner, name, field_type)
    }

    fn find_setter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_setter(owner, name, field_type)
    }

    fn find_static_getter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_static_getter(owner, name, field_type)
    }

    fn find_static_setter(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_static_setter(owner, name, field_type)
    }

    fn find_var_handle(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_var_handle(owner, name, field_type)
    }

    fn find_static_var_handle(
        &self,
        owner: &Self::Value,
        name: &str,
        field_type: &Self::Value,
    ) -> Result<Self::Value> {
        self.inner.find_static_var_handle(owner, name, field_type)
    }

    fn array_element_var_handle(&self, array_class: &Self::Value) -> Result<Self::Value> {
        self.inner.array_element_var_handle(array_class)
    }

    fn enum_constant(&self, enum_class: &Self::Value, name: &str) -> Result<Self::Value> {
        self.inner.enum_constant(enum_class, name)
    }

    fn as_type(&self, handle: Self::Value, ty: &Self::Value) -> Result<Self::Value> {
        self.inner.as_type(handle, ty)
    }

    fn literal(&self, literal: Literal<'_>) -> Self::Value {
        self.inner.literal(literal)
    }

    fn invoke_bootstrap(
        &self,
        bootstrap: &Self::Value,
        invocation: BootstrapInvocation<'_, Self::Value>,
    ) -> Result<Self::Value> {
        self.inner.invoke_bootstrap(bootstrap, invocation)
    }
}
