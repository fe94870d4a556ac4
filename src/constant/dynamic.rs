//! Nominal descriptor for a dynamically-computed constant.

use std::{fmt, sync::Arc};

use crate::{
    constant::{
        canonical::CanonicalBootstrap, descs, ClassDesc, ConstantDesc, DirectMethodHandleDesc,
    },
    descriptor::validate_member_name,
    resolve::{AccessContext, Resolver},
    Result,
};

/// A nominal descriptor for a dynamically-computed constant
///
/// The constant is the result of invoking a bootstrap method with a lookup, the constant name,
/// the constant type, and a list of static arguments which are themselves descriptors. Only
/// static bootstraps can be described this way.
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::{descs, ConstantDesc, DynamicConstantDesc, EnumDesc};
///
/// let policy = constdesc::constant::ClassDesc::of("java.lang.annotation.RetentionPolicy")?;
/// let generic = DynamicConstantDesc::of_name_and_type(
///     descs::BSM_ENUM_CONSTANT.clone(),
///     "RUNTIME",
///     policy.clone(),
/// )?;
///
/// let canonical = generic.try_canonicalize();
/// assert_eq!(canonical, ConstantDesc::Enum(EnumDesc::of(policy, "RUNTIME")?));
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DynamicConstantDesc {
    bootstrap_method: DirectMethodHandleDesc,
    constant_name: Arc<str>,
    constant_type: ClassDesc,
    bootstrap_args: Arc<[ConstantDesc]>,
}

impl DynamicConstantDesc {
    /// Create a dynamic constant descriptor
    ///
    /// ## Arguments
    /// * 'bootstrap_method' - The bootstrap method computing the constant
    /// * 'constant_name' - The name passed to the bootstrap
    /// * 'constant_type' - The type of the constant
    /// * 'bootstrap_args' - The static arguments passed to the bootstrap
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable constant name.
    pub fn of<I>(
        bootstrap_method: DirectMethodHandleDesc,
        constant_name: &str,
        constant_type: ClassDesc,
        bootstrap_args: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = ConstantDesc>,
    {
        validate_member_name(constant_name)?;
        Ok(DynamicConstantDesc {
            bootstrap_method,
            constant_name: Arc::from(constant_name),
            constant_type,
            bootstrap_args: bootstrap_args.into_iter().collect(),
        })
    }

    /// Create a dynamic constant descriptor without static arguments
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable constant name.
    pub fn of_name_and_type(
        bootstrap_method: DirectMethodHandleDesc,
        constant_name: &str,
        constant_type: ClassDesc,
    ) -> Result<Self> {
        Self::of(bootstrap_method, constant_name, constant_type, Vec::new())
    }

    /// Create a dynamic constant descriptor named [`descs::DEFAULT_NAME`] without static arguments
    #[must_use]
    pub fn of_type(bootstrap_method: DirectMethodHandleDesc, constant_type: ClassDesc) -> Self {
        Self::from_parts(bootstrap_method, descs::DEFAULT_NAME, constant_type, Vec::new())
    }

    /// Create a dynamic constant descriptor typed by the bootstrap's return type, without
    /// static arguments
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable constant name.
    pub fn of_name(bootstrap_method: DirectMethodHandleDesc, constant_name: &str) -> Result<Self> {
        let constant_type = bootstrap_method.invocation_type().return_type().clone();
        Self::of_name_and_type(bootstrap_method, constant_name, constant_type)
    }

    /// Create a dynamic constant descriptor named [`descs::DEFAULT_NAME`], typed by the
    /// bootstrap's return type, without static arguments
    #[must_use]
    pub fn of_bootstrap(bootstrap_method: DirectMethodHandleDesc) -> Self {
        let constant_type = bootstrap_method.invocation_type().return_type().clone();
        Self::of_type(bootstrap_method, constant_type)
    }

    /// Create a dynamic constant descriptor and canonicalize it
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable constant name. Canonicalization
    /// itself never fails; unrecognized shapes come back as the generic descriptor.
    pub fn of_canonical<I>(
        bootstrap_method: DirectMethodHandleDesc,
        constant_name: &str,
        constant_type: ClassDesc,
        bootstrap_args: I,
    ) -> Result<ConstantDesc>
    where
        I: IntoIterator<Item = ConstantDesc>,
    {
        Self::of(bootstrap_method, constant_name, constant_type, bootstrap_args)
            .map(Self::try_canonicalize)
    }

    /// Assemble a descriptor from parts that are already known to be valid
    pub(crate) fn from_parts(
        bootstrap_method: DirectMethodHandleDesc,
        constant_name: &str,
        constant_type: ClassDesc,
        bootstrap_args: Vec<ConstantDesc>,
    ) -> Self {
        debug_assert!(validate_member_name(constant_name).is_ok());
        DynamicConstantDesc {
            bootstrap_method,
            constant_name: Arc::from(constant_name),
            constant_type,
            bootstrap_args: bootstrap_args.into(),
        }
    }

    /// A descriptor identical to this one except for its static arguments
    #[must_use]
    pub fn with_args<I>(&self, bootstrap_args: I) -> Self
    where
        I: IntoIterator<Item = ConstantDesc>,
    {
        DynamicConstantDesc {
            bootstrap_method: self.bootstrap_method.clone(),
            constant_name: Arc::clone(&self.constant_name),
            constant_type: self.constant_type.clone(),
            bootstrap_args: bootstrap_args.into_iter().collect(),
        }
    }

    /// Lift this descriptor to its canonical form, if its bootstrap is a well-known one
    ///
    /// Returns the generic descriptor when the bootstrap is not recognized, or when the
    /// arguments do not have the shape the specialized form needs. The result always compares
    /// equal to this descriptor.
    #[must_use]
    pub fn try_canonicalize(self) -> ConstantDesc {
        match CanonicalBootstrap::lookup(&self.bootstrap_method) {
            Some(entry) => entry.canonicalize(self),
            None => ConstantDesc::Dynamic(Arc::new(self)),
        }
    }

    /// The bootstrap method
    #[must_use]
    pub fn bootstrap_method(&self) -> &DirectMethodHandleDesc {
        &self.bootstrap_method
    }

    /// The name passed to the bootstrap
    #[must_use]
    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }

    /// The type of the constant
    #[must_use]
    pub fn constant_type(&self) -> &ClassDesc {
        &self.constant_type
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

    /// Resolve this descriptor under `context`
    ///
    /// # Errors
    /// Linkage errors propagate unchanged, any other failure is wrapped into
    /// [`crate::Error::BootstrapMethod`].
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_dynamic(self)
    }

    /// A dynamic constant that rebuilds this descriptor through the descriptor bootstraps
    ///
    /// Returns `None` if the bootstrap is not a [`crate::constant::Kind::Static`] method, or if
    /// a static argument cannot itself be described.
    #[must_use]
    pub fn describe_constable(&self) -> Option<DynamicConstantDesc> {
        if self.bootstrap_method.kind() != crate::constant::Kind::Static {
            return None;
        }

        let mut args: Vec<ConstantDesc> = Vec::with_capacity(self.bootstrap_args.len() + 5);
        args.push(self.bootstrap_method.owner().descriptor_string().into());
        args.push(self.bootstrap_method.method_name().into());
        args.push(
            self.bootstrap_method
                .invocation_type()
                .descriptor_string()
                .into(),
        );
        args.push(self.constant_name().into());
        args.push(self.constant_type.descriptor_string().into());
        for arg in self.bootstrap_args.iter() {
            args.push(arg.describe_constable()?);
        }

        Some(DynamicConstantDesc::from_parts(
            descs::BSM_DYNAMICCONSTANTDESC.clone(),
            descs::DEFAULT_NAME,
            descs::CD_DYNAMIC_CONSTANT_DESC.clone(),
            args,
        ))
    }
}

impl fmt::Display for DynamicConstantDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.bootstrap_args.iter().map(ToString::to_string).collect();
        let name = if &*self.constant_name == descs::DEFAULT_NAME {
            String::new()
        } else {
            format!("{}/", self.constant_name)
        };
        write!(
            f,
            "DynamicConstantDesc[{}::{}({}{}){}]",
            self.bootstrap_method.owner().display_name(),
            self.bootstrap_method.method_name(),
            name,
            args.join(","),
            self.constant_type.display_name()
        )
    }
}

impl fmt::Debug for DynamicConstantDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicConstantDesc")
            .field("bootstrap_method", &self.bootstrap_method)
            .field("constant_name", &self.constant_name)
            .field("constant_type", &self.constant_type)
            .field("bootstrap_args", &self.bootstrap_args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constant::EnumDesc, Error};

    fn bsm() -> DirectMethodHandleDesc {
        descs::of_constant_bootstrap(
            ClassDesc::of("com.example.Bootstraps").unwrap(),
            "make",
            descs::CD_STRING.clone(),
            [descs::CD_INT.clone()],
        )
        .unwrap()
    }

    #[test]
    fn test_factories() {
        let full = DynamicConstantDesc::of(
            bsm(),
            "name",
            descs::CD_STRING.clone(),
            [ConstantDesc::from(3)],
        )
        .unwrap();
        assert_eq!(full.constant_name(), "name");
        assert_eq!(full.bootstrap_args(), &[ConstantDesc::Int(3)]);

        let defaulted = DynamicConstantDesc::of_bootstrap(bsm());
        assert_eq!(defaulted.constant_name(), "_");
        assert_eq!(defaulted.constant_type(), &*descs::CD_STRING);
        assert!(defaulted.bootstrap_args().is_empty());

        let named = DynamicConstantDesc::of_name(bsm(), "x").unwrap();
        assert_eq!(named.constant_type(), &*descs::CD_STRING);

        let typed = DynamicConstantDesc::of_type(bsm(), descs::CD_OBJECT.clone());
        assert_eq!(typed.constant_name(), "_");
        assert_eq!(typed.constant_type(), &*descs::CD_OBJECT);

        assert!(matches!(
            DynamicConstantDesc::of_name(bsm(), "a.b"),
            Err(Error::InvalidName { .. })
        ));
        assert!(DynamicConstantDesc::of_name(bsm(), "").is_err());
    }

    #[test]
    fn test_with_args_and_copies() {
        let base = DynamicConstantDesc::of_bootstrap(bsm());
        let with = base.with_args([ConstantDesc::from(1), ConstantDesc::from("two")]);
        assert_eq!(with.bootstrap_args().len(), 2);
        assert!(base.bootstrap_args().is_empty());

        let mut copy = with.bootstrap_args_vec();
        copy.clear();
        assert_eq!(with.bootstrap_args().len(), 2);
        assert_ne!(base, with);
    }

    #[test]
    fn test_canonical_null() {
        let a = DynamicConstantDesc::of_canonical(
            descs::BSM_NULL_CONSTANT.clone(),
            "_",
            descs::CD_OBJECT.clone(),
            Vec::new(),
        )
        .unwrap();
        let b = DynamicConstantDesc::of_canonical(
            descs::BSM_NULL_CONSTANT.clone(),
            "_",
            descs::CD_OBJECT.clone(),
            Vec::new(),
        )
        .unwrap();

        assert!(a.ptr_eq(&b));
        assert!(a.ptr_eq(&ConstantDesc::Dynamic(Arc::clone(&descs::NULL))));
        assert_eq!(a, ConstantDesc::from(DynamicConstantDesc::clone(&descs::NULL)));
    }

    #[test]
    fn test_canonical_enum() {
        let class = ClassDesc::of("com.example.Color").unwrap();
        let canonical = DynamicConstantDesc::of_canonical(
            descs::BSM_ENUM_CONSTANT.clone(),
            "RED",
            class.clone(),
            Vec::new(),
        )
        .unwrap();
        let expected = EnumDesc::of(class.clone(), "RED").unwrap();
        assert!(matches!(&canonical, ConstantDesc::Enum(e) if *e == expected));

        let generic = DynamicConstantDesc::of_name_and_type(
            descs::BSM_ENUM_CONSTANT.clone(),
            "RED",
            class,
        )
        .unwrap();
        assert_eq!(canonical, ConstantDesc::from(generic));
    }

    #[test]
    fn test_unrecognized_bootstrap_stays_generic() {
        let desc = DynamicConstantDesc::of_bootstrap(bsm());
        let canonical = desc.clone().try_canonicalize();
        assert!(matches!(&canonical, ConstantDesc::Dynamic(d) if **d == desc));
    }

    #[test]
    fn test_display() {
        let desc = DynamicConstantDesc::of(
            bsm(),
            "name",
            descs::CD_STRING.clone(),
            [ConstantDesc::from(3), ConstantDesc::from("x")],
        )
        .unwrap();
        assert_eq!(desc.to_string(), "DynamicConstantDesc[Bootstraps::make(name/3,x)String]");
        assert_eq!(
            DynamicConstantDesc::of_bootstrap(bsm()).to_string(),
            "DynamicConstantDesc[Bootstraps::make()String]"
        );
    }

    #[test]
    fn test_describe_constable() {
        let desc = DynamicConstantDesc::of(
            bsm(),
            "name",
            descs::CD_STRING.clone(),
            [ConstantDesc::from(descs::CD_INT.clone())],
        )
        .unwrap();
        let described = desc.describe_constable().unwrap();
        assert_eq!(described.bootstrap_method(), &*descs::BSM_DYNAMICCONSTANTDESC);
        assert_eq!(described.bootstrap_args().len(), 6);
        assert_eq!(described.bootstrap_args()[0].as_str(), Some("Lcom/example/Bootstraps;"));
        assert_eq!(described.bootstrap_args()[3].as_str(), Some("name"));
        assert!(matches!(described.bootstrap_args()[5], ConstantDesc::Dynamic(_)));

        let virtual_bsm = DirectMethodHandleDesc::of_method_descriptor(
            crate::constant::Kind::Virtual,
            descs::CD_OBJECT.clone(),
            "make",
            "(Ljava/lang/invoke/MethodHandles$Lookup;Ljava/lang/String;Ljava/lang/Class;)Ljava/lang/Object;",
        )
        .unwrap();
        assert!(DynamicConstantDesc::of_bootstrap(virtual_bsm).describe_constable().is_none());
    }
}
