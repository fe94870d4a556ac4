//! Nominal descriptor for an `invokedynamic` call site.

use std::{fmt, sync::Arc};

use crate::{
    constant::{descs, ConstantDesc, DirectMethodHandleDesc, MethodTypeDesc},
    descriptor::validate_member_name,
    resolve::{AccessContext, Resolver},
    Result,
};

/// A nominal descriptor for an `invokedynamic` call site
///
/// The call site is linked by invoking the bootstrap method with a lookup, the invocation
/// name, the invocation type, and the static arguments. Call sites are not loadable
/// constants, so this type is not a [`ConstantDesc`] variant.
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::{descs, ClassDesc, DynamicCallSiteDesc, MethodTypeDesc};
///
/// let bsm = descs::of_callsite_bootstrap(
///     ClassDesc::of("com.example.Linker")?,
///     "link",
///     descs::CD_CALL_SITE.clone(),
///     Vec::new(),
/// )?;
/// let site = DynamicCallSiteDesc::of(
///     bsm,
///     "run",
///     MethodTypeDesc::of_descriptor("(I)V")?,
///     Vec::new(),
/// )?;
/// assert_eq!(site.to_string(), "DynamicCallSiteDesc[Linker::link(run/):(int)void]");
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DynamicCallSiteDesc {
    bootstrap_method: DirectMethodHandleDesc,
    invocation_name: Arc<str>,
    invocation_type: MethodTypeDesc,
    bootstrap_args: Arc<[ConstantDesc]>,
}

impl DynamicCallSiteDesc {
    /// Create a call site descriptor
    ///
    /// ## Arguments
    /// * 'bootstrap_method' - The bootstrap method linking the call site
    /// * 'invocation_name' - The name passed to the bootstrap
    /// * 'invocation_type' - The type of the call site
    /// * 'bootstrap_args' - The static arguments passed to the bootstrap
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable invocation name.
    pub fn of<I>(
        bootstrap_method: DirectMethodHandleDesc,
        invocation_name: &str,
        invocation_type: MethodTypeDesc,
        bootstrap_args: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = ConstantDesc>,
    {
        validate_member_name(invocation_name)?;
        Ok(DynamicCallSiteDesc {
            bootstrap_method,
            invocation_name: Arc::from(invocation_name),
            invocation_type,
            bootstrap_args: bootstrap_args.into_iter().collect(),
        })
    }

    /// Create a call site descriptor without static arguments
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable invocation name.
    pub fn of_name_and_type(
        bootstrap_method: DirectMethodHandleDesc,
        invocation_name: &str,
        invocation_type: MethodTypeDesc,
    ) -> Result<Self> {
        Self::of(bootstrap_method, invocation_name, invocation_type, Vec::new())
    }

    /// Create a call site descriptor named [`descs::DEFAULT_NAME`] without static arguments
    #[must_use]
    pub fn of_type(
        bootstrap_method: DirectMethodHandleDesc,
        invocation_type: MethodTypeDesc,
    ) -> Self {
        DynamicCallSiteDesc {
            bootstrap_method,
            invocation_name: Arc::from(descs::DEFAULT_NAME),
            invocation_type,
            bootstrap_args: Vec::new().into(),
        }
    }

    /// Create a call site descriptor in canonical form
    ///
    /// No call site bootstraps are recognized yet, so this is the same as
    /// [`DynamicCallSiteDesc::of`].
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable invocation name.
    pub fn of_canonical<I>(
        bootstrap_method: DirectMethodHandleDesc,
        invocation_name: &str,
        invocation_type: MethodTypeDesc,
        bootstrap_args: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = ConstantDesc>,
    {
        Self::of(bootstrap_method, invocation_name, invocation_type, bootstrap_args)
    }

    /// A descriptor identical to this one except for its static arguments
    #[must_use]
    pub fn with_args<I>(&self, bootstrap_args: I) -> Self
    where
        I: IntoIterator<Item = ConstantDesc>,
    {
        DynamicCallSiteDesc {
            bootstrap_method: self.bootstrap_method.clone(),
            invocation_name: Arc::clone(&self.invocation_name),
            invocation_type: self.invocation_type.clone(),
            bootstrap_args: bootstrap_args.into_iter().collect(),
        }
    }

    /// A descriptor identical to this one except for its invocation name and type
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable invocation name.
    pub fn with_name_and_type(
        &self,
        invocation_name: &str,
        invocation_type: MethodTypeDesc,
    ) -> Result<Self> {
        validate_member_name(invocation_name)?;
        Ok(DynamicCallSiteDesc {
            bootstrap_method: self.bootstrap_method.clone(),
            invocation_name: Arc::from(invocation_name),
            invocation_type,
            bootstrap_args: Arc::clone(&self.bootstrap_args),
        })
    }

    /// The bootstrap method
    #[must_use]
    pub fn bootstrap_method(&self) -> &DirectMethodHandleDesc {
        &self.bootstrap_method
    }

    /// The name passed to the bootstrap
    #[must_use]
    pub fn invocation_name(&self) -> &str {
        &self.invocation_name
    }

    /// The type of the call site
    #[must_use]
    pub fn invocation_type(&self) -> &MethodTypeDesc {
        &self.invocation_type
    }

    /// The static arguments as an immutable view
    #[must_use]
    pub fn bootstrap_args(&self) -> &[ConstantDesc] {
        &self.bootstrap_args
    }

    /// An owned copy of the static arguments
    #[must_use]
    pub fn bootstrap_args_vec(&self) -> Vec<ConstantDesc> {
        self.bootstrap_args.to_vec()
    }

    /// Link the call site under `context` and return the call site object
    ///
    /// # Errors
    /// Linkage errors propagate unchanged, any other failure is wrapped into
    /// [`crate::Error::BootstrapMethod`].
    pub fn resolve_call_site<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_call_site(self)
    }
}

impl fmt::Display for DynamicCallSiteDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.bootstrap_args.iter().map(ToString::to_string).collect();
        let name = if &*self.invocation_name == descs::DEFAULT_NAME {
            String::new()
        } else {
            format!("{}/", self.invocation_name)
        };
        write!(
            f,
            "DynamicCallSiteDesc[{}::{}({}{}):{}]",
            self.bootstrap_method.owner().display_name(),
            self.bootstrap_method.method_name(),
            name,
            args.join(","),
            self.invocation_type.display_descriptor()
        )
    }
}
