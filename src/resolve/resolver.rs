//! Descriptor resolution against an [`AccessContext`].

use tracing::trace;

use crate::{
    constant::{
        descs, ClassDesc, ConstantDesc, DirectMethodHandleDesc, DynamicCallSiteDesc,
        DynamicConstantDesc, EnumDesc, Kind, MethodHandleDesc, MethodTypeDesc, VarHandleDesc,
        VarHandleKind,
    },
    resolve::{AccessContext, BootstrapInvocation, InvocationKind, Literal, ResolutionConfig},
    Error, Result,
};

/// Resolves descriptors to live values under an [`AccessContext`]
///
/// Resolution is depth-first and left to right, and never memoized: resolving the same
/// descriptor twice performs every lookup and bootstrap invocation twice.
///
/// # Examples
///
/// ```rust,ignore
/// let resolver = Resolver::with_config(&context, ResolutionConfig::strict());
/// let value = resolver.resolve(&ConstantDesc::from(ClassDesc::of("java.lang.String")?))?;
/// ```
pub struct Resolver<'a, C: AccessContext + ?Sized> {
    context: &'a C,
    config: ResolutionConfig,
}

impl<'a, C: AccessContext + ?Sized> Resolver<'a, C> {
    /// Create a resolver with the default [`ResolutionConfig`]
    pub fn new(context: &'a C) -> Self {
        Self::with_config(context, ResolutionConfig::default())
    }

    /// Create a resolver with a custom [`ResolutionConfig`]
    pub fn with_config(context: &'a C, config: ResolutionConfig) -> Self {
        Resolver { context, config }
    }

    /// The context lookups are performed in
    pub fn context(&self) -> &'a C {
        self.context
    }

    /// The configuration in use
    pub fn config(&self) -> ResolutionConfig {
        self.config
    }

    /// Resolve any constant descriptor
    ///
    /// # Errors
    /// Propagates linkage errors, returns [`Error::BootstrapMethod`] for failing bootstraps and
    /// [`Error::RecursionLimit`] when dynamic constants nest too deeply.
    pub fn resolve(&self, desc: &ConstantDesc) -> Result<C::Value> {
        self.resolve_nested(desc, 0)
    }

    /// Resolve a class descriptor
    ///
    /// # Errors
    /// Propagates the context's linkage error.
    pub fn resolve_class(&self, desc: &ClassDesc) -> Result<C::Value> {
        trace!(class = %desc.descriptor_string(), "resolving class");
        self.context.find_class(desc)
    }

    /// Resolve a method type descriptor, return type first and then each parameter
    ///
    /// # Errors
    /// Propagates the context's linkage error for any component class.
    pub fn resolve_method_type(&self, desc: &MethodTypeDesc) -> Result<C::Value> {
        trace!(method_type = %desc.descriptor_string(), "resolving method type");
        let return_type = self.resolve_class(desc.return_type())?;
        let params = desc
            .parameter_list()
            .iter()
            .map(|param| self.resolve_class(param))
            .collect::<Result<Vec<_>>>()?;
        self.context.method_type(return_type, params)
    }

    /// Resolve a method handle descriptor
    ///
    /// # Errors
    /// Propagates the context's linkage errors for the member lookup or the adaptation.
    pub fn resolve_method_handle(&self, desc: &MethodHandleDesc) -> Result<C::Value> {
        match desc {
            MethodHandleDesc::Direct(direct) => self.resolve_direct(direct),
            MethodHandleDesc::AsType(adapted) => {
                trace!(
                    ty = %adapted.invocation_type().descriptor_string(),
                    "adapting method handle"
                );
                let handle = self.resolve_method_handle(adapted.underlying())?;
                let ty = self.resolve_method_type(adapted.invocation_type())?;
                self.context.as_type(handle, &ty)
            }
        }
    }

    /// Resolve a direct method handle descriptor, dispatching on its [`Kind`]
    ///
    /// # Errors
    /// Propagates the context's linkage error for the owner or the member lookup.
    pub fn resolve_direct(&self, desc: &DirectMethodHandleDesc) -> Result<C::Value> {
        trace!(
            kind = %desc.kind(),
            owner = %desc.owner().descriptor_string(),
            name = desc.method_name(),
            "resolving method handle"
        );
        let owner = self.resolve_class(desc.owner())?;
        let ty = desc.invocation_type();
        let name = desc.method_name();

        match desc.kind() {
            Kind::Static | Kind::InterfaceStatic => {
                self.context.find_static(&owner, name, &self.resolve_method_type(ty)?)
            }
            Kind::Virtual | Kind::InterfaceVirtual => {
                self.context.find_virtual(&owner, name, &self.resolve_method_type(ty)?)
            }
            Kind::Special | Kind::InterfaceSpecial => {
                self.context.find_special(&owner, name, &self.resolve_method_type(ty)?)
            }
            Kind::Constructor => self
                .context
                .find_constructor(&owner, &self.resolve_method_type(ty)?),
            Kind::Getter => {
                let field = self.resolve_class(ty.return_type())?;
                self.context.find_getter(&owner, name, &field)
            }
            Kind::StaticGetter => {
                let field = self.resolve_class(ty.return_type())?;
                self.context.find_static_getter(&owner, name, &field)
            }
            Kind::Setter => {
                let field = self.resolve_class(ty.parameter_type(1)?)?;
                self.context.find_setter(&owner, name, &field)
            }
            Kind::StaticSetter => {
                let field = self.resolve_class(ty.parameter_type(0)?)?;
                self.context.find_static_setter(&owner, name, &field)
            }
        }
    }

    /// Resolve a dynamic constant by invoking its bootstrap
    ///
    /// # Errors
    /// Linkage errors propagate unchanged, any other failure is wrapped into
    /// [`Error::BootstrapMethod`].
    pub fn resolve_dynamic(&self, desc: &DynamicConstantDesc) -> Result<C::Value> {
        self.dynamic(desc, 0)
    }

    /// Resolve an enum constant through the context's enum lookup
    ///
    /// # Errors
    /// Propagates the context's linkage errors.
    pub fn resolve_enum(&self, desc: &EnumDesc) -> Result<C::Value> {
        trace!(constant = %desc, "resolving enum constant");
        let class = self.resolve_class(desc.enum_class())?;
        self.context.enum_constant(&class, desc.constant_name())
    }

    /// Resolve a var handle through the context's var handle lookups
    ///
    /// # Errors
    /// Propagates the context's linkage errors.
    pub fn resolve_var_handle(&self, desc: &VarHandleDesc) -> Result<C::Value> {
        trace!(var_handle = %desc, "resolving var handle");
        let declaring = self.resolve_class(desc.declaring_class())?;
        match desc.kind() {
            VarHandleKind::Field => {
                let ty = self.resolve_class(desc.var_type())?;
                self.context.find_var_handle(&declaring, desc.name(), &ty)
            }
            VarHandleKind::StaticField => {
                let ty = self.resolve_class(desc.var_type())?;
                self.context.find_static_var_handle(&declaring, desc.name(), &ty)
            }
            VarHandleKind::Array => self.context.array_element_var_handle(&declaring),
        }
    }

    /// Link an `invokedynamic` call site
    ///
    /// # Errors
    /// Linkage errors propagate unchanged, any other failure is wrapped into
    /// [`Error::BootstrapMethod`].
    pub fn resolve_call_site(&self, desc: &DynamicCallSiteDesc) -> Result<C::Value> {
        trace!(call_site = %desc, "linking call site");
        self.link(desc)
            .map_err(|error| wrap_bootstrap_failure(error, || desc.to_string()))
    }

    fn resolve_nested(&self, desc: &ConstantDesc, depth: usize) -> Result<C::Value> {
        match desc {
            ConstantDesc::Int(value) => Ok(self.context.literal(Literal::Int(*value))),
            ConstantDesc::Long(value) => Ok(self.context.literal(Literal::Long(*value))),
            ConstantDesc::Float(value) => Ok(self.context.literal(Literal::Float(*value))),
            ConstantDesc::Double(value) => Ok(self.context.literal(Literal::Double(*value))),
            ConstantDesc::String(value) => Ok(self.context.literal(Literal::String(value))),
            ConstantDesc::Class(class) => self.resolve_class(class),
            ConstantDesc::MethodType(ty) => self.resolve_method_type(ty),
            ConstantDesc::MethodHandle(handle) => self.resolve_method_handle(handle),
            ConstantDesc::Dynamic(dynamic) => self.dynamic(dynamic, depth),
            ConstantDesc::Enum(desc) => self.resolve_enum(desc),
            ConstantDesc::VarHandle(desc) => self.resolve_var_handle(desc),
        }
    }

    fn dynamic(&self, desc: &DynamicConstantDesc, depth: usize) -> Result<C::Value> {
        if depth >= self.config.max_depth {
            return Err(Error::RecursionLimit(self.config.max_depth));
        }
        trace!(constant = %desc, depth, "resolving dynamic constant");

        self.compute(desc, depth)
            .map_err(|error| wrap_bootstrap_failure(error, || desc.to_string()))
    }

    fn compute(&self, desc: &DynamicConstantDesc, depth: usize) -> Result<C::Value> {
        let bootstrap = self.bootstrap(desc.bootstrap_method(), "dynamic constant")?;
        let ty = self.resolve_class(desc.constant_type())?;
        let arguments = self.arguments(desc.bootstrap_args(), depth + 1)?;

        self.context.invoke_bootstrap(
            &bootstrap,
            BootstrapInvocation {
                bootstrap: desc.bootstrap_method(),
                kind: InvocationKind::DynamicConstant,
                name: desc.constant_name(),
                ty,
                arguments,
            },
        )
    }

    fn link(&self, desc: &DynamicCallSiteDesc) -> Result<C::Value> {
        let bootstrap = self.bootstrap(desc.bootstrap_method(), "call site")?;
        let ty = self.resolve_method_type(desc.invocation_type())?;
        let arguments = self.arguments(desc.bootstrap_args(), 0)?;

        self.context.invoke_bootstrap(
            &bootstrap,
            BootstrapInvocation {
                bootstrap: desc.bootstrap_method(),
                kind: InvocationKind::CallSite,
                name: desc.invocation_name(),
                ty,
                arguments,
            },
        )
    }

    /// Resolve the bootstrap handle and check it can receive a lookup and a name
    fn bootstrap(&self, desc: &DirectMethodHandleDesc, target: &str) -> Result<C::Value> {
        let handle = self.resolve_direct(desc)?;

        if self.config.check_bootstrap_signature {
            let ty = desc.handle_type();
            let takes_lookup = ty
                .parameter_list()
                .first()
                .is_some_and(|first| first == &*descs::CD_METHOD_HANDLES_LOOKUP);
            if ty.parameter_count() < 2 || !takes_lookup {
                return Err(Error::BootstrapMethod {
                    message: format!(
                        "Invalid bootstrap method declared for resolving a {target}: {desc}"
                    ),
                    source: None,
                });
            }
        }

        Ok(handle)
    }

    fn arguments(&self, args: &[ConstantDesc], depth: usize) -> Result<Vec<C::Value>> {
        args.iter()
            .map(|arg| match arg {
                ConstantDesc::Dynamic(dynamic) if self.config.canonicalize_arguments => {
                    let canonical = DynamicConstantDesc::clone(dynamic).try_canonicalize();
                    self.resolve_nested(&canonical, depth)
                }
                _ => self.resolve_nested(arg, depth),
            })
            .collect()
    }
}

/// Keep linkage errors and the recursion guard as they are, wrap everything else
fn wrap_bootstrap_failure(error: Error, describe: impl FnOnce() -> String) -> Error {
    if error.is_linkage() || matches!(error, Error::RecursionLimit(_)) {
        return error;
    }

    let message = describe();
    trace!(%error, target = %message, "bootstrap failed");
    Error::BootstrapMethod {
        message,
        source: Some(Box::new(error)),
    }
}
