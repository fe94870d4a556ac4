//! A recording [`AccessContext`] for unit tests.
//!
//! Classes under `java/` are always visible, so are primitives and arrays of visible classes.
//! Other classes and every member have to be registered. Bootstraps are registered by name on
//! a fixed owner class and dispatched on the invoked descriptor's method name.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::{
    constant::{descs, ClassDesc, DirectMethodHandleDesc},
    resolve::{AccessContext, BootstrapInvocation, Literal},
    Error, Result,
};

type Bootstrap = Box<dyn Fn(BootstrapInvocation<'_, MockValue>) -> Result<MockValue> + Send + Sync>;

const BOOTSTRAP_OWNER: &str = "com.example.Bootstraps";

/// Values produced by [`MockContext`]
#[derive(Debug, Clone, PartialEq)]
pub enum MockValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Null,
    Class(String),
    MethodType(String),
    Handle {
        lookup: &'static str,
        owner: String,
        name: String,
        descriptor: String,
    },
    Adapted {
        handle: Box<MockValue>,
        ty: String,
    },
    Enum(String, String),
    List(Vec<MockValue>),
}

impl MockValue {
    fn descriptor(&self) -> Result<&str> {
        match self {
            MockValue::Class(descriptor) | MockValue::MethodType(descriptor) => Ok(descriptor),
            other => Err(Error::Error(format!("not a class or method type: {other:?}"))),
        }
    }
}

#[derive(Default)]
pub struct MockContext {
    classes: HashSet<String>,
    members: HashSet<(String, String, String)>,
    bootstraps: HashMap<String, Bootstrap>,
    requested: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: &ClassDesc) -> Self {
        self.classes.insert(class.descriptor_string().to_string());
        self
    }

    /// Register a member by owner, name and lookup descriptor (field descriptor for fields)
    pub fn with_member(mut self, owner: &ClassDesc, name: &str, descriptor: &str) -> Self {
        self.members.insert((
            owner.descriptor_string().to_string(),
            name.to_string(),
            descriptor.to_string(),
        ));
        self
    }

    /// Register a constant bootstrap, see [`MockContext::bootstrap_desc`]
    pub fn with_bootstrap<F>(self, name: &str, bootstrap: F) -> Self
    where
        F: Fn(BootstrapInvocation<'_, MockValue>) -> Result<MockValue> + Send + Sync + 'static,
    {
        let desc = self.bootstrap_desc(name);
        self.with_bootstrap_handle(desc, bootstrap)
    }

    /// Register a call site bootstrap, see [`MockContext::call_site_bootstrap_desc`]
    pub fn with_call_site_bootstrap<F>(self, name: &str, bootstrap: F) -> Self
    where
        F: Fn(BootstrapInvocation<'_, MockValue>) -> Result<MockValue> + Send + Sync + 'static,
    {
        let desc = self.call_site_bootstrap_desc(name);
        self.with_bootstrap_handle(desc, bootstrap)
    }

    /// Register a bootstrap under an arbitrary handle, keyed by its method name
    pub fn with_bootstrap_handle<F>(mut self, desc: DirectMethodHandleDesc, bootstrap: F) -> Self
    where
        F: Fn(BootstrapInvocation<'_, MockValue>) -> Result<MockValue> + Send + Sync + 'static,
    {
        let owner = desc.owner().clone();
        self.bootstraps
            .insert(desc.method_name().to_string(), Box::new(bootstrap));
        self.with_class(&owner)
            .with_member(&owner, desc.method_name(), &desc.lookup_descriptor())
    }

    /// `static Object name(Lookup, String, Class)` on the bootstrap owner
    pub fn bootstrap_desc(&self, name: &str) -> DirectMethodHandleDesc {
        descs::of_constant_bootstrap(
            ClassDesc::of(BOOTSTRAP_OWNER).unwrap(),
            name,
            descs::CD_OBJECT.clone(),
            Vec::new(),
        )
        .unwrap()
    }

    /// `static CallSite name(Lookup, String, MethodType)` on the bootstrap owner
    pub fn call_site_bootstrap_desc(&self, name: &str) -> DirectMethodHandleDesc {
        descs::of_callsite_bootstrap(
            ClassDesc::of(BOOTSTRAP_OWNER).unwrap(),
            name,
            descs::CD_CALL_SITE.clone(),
            Vec::new(),
        )
        .unwrap()
    }

    /// Every descriptor passed to `find_class`, in order
    pub fn classes_requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn bootstrap_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn is_visible(&self, descriptor: &str) -> bool {
        let element = descriptor.trim_start_matches('[');
        element.len() == 1
            || element.starts_with("Ljava/")
            || self.classes.contains(element)
    }

    fn member(
        &self,
        lookup: &'static str,
        owner: &MockValue,
        name: &str,
        ty: &MockValue,
    ) -> Result<MockValue> {
        let owner = owner.descriptor()?.to_string();
        let descriptor = ty.descriptor()?.to_string();
        let key = (owner, name.to_string(), descriptor);
        if !self.members.contains(&key) {
            let (owner, name, descriptor) = key;
            return Err(Error::NoSuchMember {
                owner,
                name,
                descriptor,
            });
        }

        let (owner, name, descriptor) = key;
        Ok(MockValue::Handle {
            lookup,
            owner,
            name,
            descriptor,
        })
    }
}

impl AccessContext for MockContext {
    type Value = MockValue;

    fn find_class(&self, descriptor: &ClassDesc) -> Result<MockValue> {
        let descriptor = descriptor.descriptor_string();
        self.requested.lock().unwrap().push(descriptor.to_string());
        if self.is_visible(descriptor) {
            Ok(MockValue::Class(descriptor.to_string()))
        } else {
            Err(Error::ClassNotFound(descriptor.to_string()))
        }
    }

    fn method_type(&self, return_type: MockValue, params: Vec<MockValue>) -> Result<MockValue> {
        let mut descriptor = String::from("(");
        for param in &params {
            descriptor.push_str(param.descriptor()?);
        }
        descriptor.push(')');
        descriptor.push_str(return_type.descriptor()?);
        Ok(MockValue::MethodType(descriptor))
    }

    fn find_static(&self, owner: &MockValue, name: &str, ty: &MockValue) -> Result<MockValue> {
        self.member("static", owner, name, ty)
    }

    fn find_virtual(&self, owner: &MockValue, name: &str, ty: &MockValue) -> Result<MockValue> {
        self.member("virtual", owner, name, ty)
    }

    fn find_special(&self, owner: &MockValue, name: &str, ty: &MockValue) -> Result<MockValue> {
        self.member("special", owner, name, ty)
    }

    fn find_constructor(&self, owner: &MockValue, ty: &MockValue) -> Result<MockValue> {
        self.member("constructor", owner, "<init>", ty)
    }

    fn find_getter(
        &self,
        owner: &MockValue,
        name: &str,
        field_type: &MockValue,
    ) -> Result<MockValue> {
        self.member("getter", owner, name, field_type)
    }

    fn find_setter(
        &self,
        owner: &MockValue,
        name: &str,
        field_type: &MockValue,
    ) -> Result<MockValue> {
        self.member("setter", owner, name, field_type)
    }

    fn find_static_getter(
        &self,
        owner: &MockValue,
        name: &str,
        field_type: &MockValue,
    ) -> Result<MockValue> {
        self.member("static_getter", owner, name, field_type)
    }

    fn find_static_setter(
        &self,
        owner: &MockValue,
        name: &str,
        field_type: &MockValue,
    ) -> Result<MockValue> {
        self.member("static_setter", owner, name, field_type)
    }

    fn find_var_handle(
        &self,
        owner: &MockValue,
        name: &str,
        field_type: &MockValue,
    ) -> Result<MockValue> {
        self.member("var_handle", owner, name, field_type)
    }

    fn find_static_var_handle(
        &self,
        owner: &MockValue,
        name: &str,
        field_type: &MockValue,
    ) -> Result<MockValue> {
        self.member("static_var_handle", owner, name, field_type)
    }

    fn array_element_var_handle(&self, array_class: &MockValue) -> Result<MockValue> {
        Ok(MockValue::Handle {
            lookup: "array_element",
            owner: array_class.descriptor()?.to_string(),
            name: String::new(),
            descriptor: String::new(),
        })
    }

    fn enum_constant(&self, enum_class: &MockValue, name: &str) -> Result<MockValue> {
        Ok(MockValue::Enum(enum_class.descriptor()?.to_string(), name.to_string()))
    }

    fn as_type(&self, handle: MockValue, ty: &MockValue) -> Result<MockValue> {
        Ok(MockValue::Adapted {
            handle: Box::new(handle),
            ty: ty.descriptor()?.to_string(),
        })
    }

    fn literal(&self, literal: Literal<'_>) -> MockValue {
        match literal {
            Literal::Int(value) => MockValue::Int(value),
            Literal::Long(value) => MockValue::Long(value),
            Literal::Float(value) => MockValue::Float(value),
            Literal::Double(value) => MockValue::Double(value),
            Literal::String(value) => MockValue::Str(value.to_string()),
        }
    }

    fn invoke_bootstrap(
        &self,
        _bootstrap: &MockValue,
        invocation: BootstrapInvocation<'_, MockValue>,
    ) -> Result<MockValue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let desc: &DirectMethodHandleDesc = invocation.bootstrap;
        let name = desc.method_name();
        match self.bootstraps.get(name) {
            Some(bootstrap) => bootstrap(invocation),
            None => Err(Error::Error(format!("no bootstrap named {name}"))),
        }
    }
}
