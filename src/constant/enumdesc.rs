//! Nominal descriptor for an enum constant.

use std::fmt;

use crate::{
    constant::{descs, ClassDesc, DynamicConstantDesc},
    resolve::{AccessContext, Resolver},
    Result,
};

/// A nominal descriptor for an enum constant
///
/// Equivalent to a dynamic constant invoking [`descs::BSM_ENUM_CONSTANT`] with the enum class
/// as constant type and the constant name, and equal to that generic form.
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::{ClassDesc, EnumDesc};
///
/// let color = EnumDesc::of(ClassDesc::of("com.example.Color")?, "RED")?;
/// assert_eq!(color.constant_name(), "RED");
/// assert_eq!(color.to_string(), "EnumDesc[Color.RED]");
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EnumDesc {
    base: DynamicConstantDesc,
}

impl EnumDesc {
    /// Describe the enum constant `constant_name` of `enum_class`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable constant name, and
    /// [`crate::Error::IllegalArgument`] if `enum_class` is not a class or interface type.
    pub fn of(enum_class: ClassDesc, constant_name: &str) -> Result<Self> {
        if !enum_class.is_class_or_interface() {
            return Err(illegal_argument!(
                "Enum class must be a class type, got {}",
                enum_class.descriptor_string()
            ));
        }

        let base = DynamicConstantDesc::of(
            descs::BSM_ENUM_CONSTANT.clone(),
            constant_name,
            enum_class,
            Vec::new(),
        )?;
        Ok(EnumDesc { base })
    }

    /// The enum class
    #[must_use]
    pub fn enum_class(&self) -> &ClassDesc {
        self.base.constant_type()
    }

    /// The name of the enum constant
    #[must_use]
    pub fn constant_name(&self) -> &str {
        self.base.constant_name()
    }

    /// The equivalent generic dynamic constant
    #[must_use]
    pub fn as_dynamic(&self) -> &DynamicConstantDesc {
        &self.base
    }

    /// Resolve the enum constant under `context`
    ///
    /// # Errors
    /// Propagates the context's linkage errors for the enum class or the constant.
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_enum(self)
    }

    /// A dynamic constant that rebuilds this descriptor through the descriptor bootstraps
    #[must_use]
    pub fn describe_constable(&self) -> DynamicConstantDesc {
        DynamicConstantDesc::from_parts(
            descs::BSM_ENUMDESC.clone(),
            descs::DEFAULT_NAME,
            descs::CD_ENUM_DESC.clone(),
            vec![
                self.enum_class().descriptor_string().into(),
                self.constant_name().into(),
            ],
        )
    }
}

impl fmt::Display for EnumDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EnumDesc[{}.{}]",
            self.enum_class().display_name(),
            self.constant_name()
        )
    }
}
