//! Nominal descriptor for a var handle.

use std::fmt;

use crate::{
    constant::{descs, ClassDesc, ConstantDesc, DirectMethodHandleDesc, DynamicConstantDesc},
    resolve::{AccessContext, Resolver},
    Result,
};

/// The variable a [`VarHandleDesc`] gives access to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum VarHandleKind {
    /// An instance field
    Field,
    /// A static field
    StaticField,
    /// The elements of an array type
    Array,
}

impl VarHandleKind {
    fn bootstrap_method(self) -> &'static DirectMethodHandleDesc {
        match self {
            VarHandleKind::Field => &*descs::BSM_VARHANDLE_FIELD,
            VarHandleKind::StaticField => &*descs::BSM_VARHANDLE_STATIC_FIELD,
            VarHandleKind::Array => &*descs::BSM_VARHANDLE_ARRAY,
        }
    }

    fn descriptor_factory(self) -> &'static DirectMethodHandleDesc {
        match self {
            VarHandleKind::Field => &*descs::MHR_VARHANDLEDESC_OFFIELD,
            VarHandleKind::StaticField => &*descs::MHR_VARHANDLEDESC_OFSTATIC,
            VarHandleKind::Array => &*descs::MHR_VARHANDLEDESC_OFARRAY,
        }
    }
}

/// A nominal descriptor for a var handle
///
/// Field var handles are dynamic constants named after the field, with static arguments
/// `(declaring class, field name, field type)`. Array var handles are named
/// [`descs::DEFAULT_NAME`] and take the array class as their only argument; their variable
/// type is the array's component type.
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::{descs, ClassDesc, VarHandleDesc};
///
/// let owner = ClassDesc::of("com.example.Counter")?;
/// let count = VarHandleDesc::of_static_field(owner, "count", descs::CD_INT.clone())?;
/// assert_eq!(count.to_string(), "VarHandleDesc[static Counter.count:int]");
///
/// let elements = VarHandleDesc::of_array(descs::CD_INT.array_type()?)?;
/// assert_eq!(elements.var_type(), &*descs::CD_INT);
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct VarHandleDesc {
    kind: VarHandleKind,
    base: DynamicConstantDesc,
    declaring_class: ClassDesc,
    var_type: ClassDesc,
}

impl VarHandleDesc {
    /// Describe the instance field `name` of `declaring_class`
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for a bad field name and
    /// [`crate::Error::IllegalArgument`] for a declaring class that is not a class or
    /// interface type, or a `void` field type.
    pub fn of_field(declaring_class: ClassDesc, name: &str, field_type: ClassDesc) -> Result<Self> {
        Self::field(VarHandleKind::Field, declaring_class, name, field_type)
    }

    /// Describe the static field `name` of `declaring_class`
    ///
    /// # Errors
    /// Same as [`VarHandleDesc::of_field`].
    pub fn of_static_field(
        declaring_class: ClassDesc,
        name: &str,
        field_type: ClassDesc,
    ) -> Result<Self> {
        Self::field(VarHandleKind::StaticField, declaring_class, name, field_type)
    }

    /// Describe the elements of `array_class`
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] if `array_class` is not an array type.
    pub fn of_array(array_class: ClassDesc) -> Result<Self> {
        let Some(component) = array_class.component_type() else {
            return Err(illegal_argument!(
                "Array class argument not an array: {}",
                array_class.descriptor_string()
            ));
        };

        let base = DynamicConstantDesc::from_parts(
            descs::BSM_VARHANDLE_ARRAY.clone(),
            descs::DEFAULT_NAME,
            descs::CD_VAR_HANDLE.clone(),
            vec![array_class.clone().into()],
        );
        Ok(VarHandleDesc {
            kind: VarHandleKind::Array,
            base,
            declaring_class: array_class,
            var_type: component,
        })
    }

    fn field(
        kind: VarHandleKind,
        declaring_class: ClassDesc,
        name: &str,
        field_type: ClassDesc,
    ) -> Result<Self> {
        if !declaring_class.is_class_or_interface() {
            return Err(illegal_argument!(
                "Declaring class must be a class or interface type: {}",
                declaring_class.descriptor_string()
            ));
        }
        if field_type.is_void() {
            return Err(illegal_argument!("Field type must not be void"));
        }

        let base = DynamicConstantDesc::of(
            kind.bootstrap_method().clone(),
            name,
            descs::CD_VAR_HANDLE.clone(),
            [
                ConstantDesc::from(declaring_class.clone()),
                ConstantDesc::from(name),
                ConstantDesc::from(field_type.clone()),
            ],
        )?;
        Ok(VarHandleDesc {
            kind,
            base,
            declaring_class,
            var_type: field_type,
        })
    }

    /// Field, static field or array element access
    #[must_use]
    pub fn kind(&self) -> VarHandleKind {
        self.kind
    }

    /// The class declaring the field, or the array class
    #[must_use]
    pub fn declaring_class(&self) -> &ClassDesc {
        &self.declaring_class
    }

    /// The type of the variable: the field type, or the array component type
    #[must_use]
    pub fn var_type(&self) -> &ClassDesc {
        &self.var_type
    }

    /// The field name, or [`descs::DEFAULT_NAME`] for array var handles
    #[must_use]
    pub fn name(&self) -> &str {
        self.base.constant_name()
    }

    /// The equivalent generic dynamic constant
    #[must_use]
    pub fn as_dynamic(&self) -> &DynamicConstantDesc {
        &self.base
    }

    /// Resolve the var handle under `context`
    ///
    /// # Errors
    /// Propagates the context's linkage errors.
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_var_handle(self)
    }

    /// A dynamic constant that rebuilds this descriptor by invoking the matching
    /// `VarHandleDesc` factory through [`descs::BSM_INVOKE`]
    #[must_use]
    pub fn describe_constable(&self) -> DynamicConstantDesc {
        let mut args = vec![
            ConstantDesc::from(self.kind.descriptor_factory().clone()),
            self.declaring_class.describe_constable().into(),
        ];
        if self.kind != VarHandleKind::Array {
            args.push(self.name().into());
            args.push(self.var_type.describe_constable().into());
        }

        DynamicConstantDesc::from_parts(
            descs::BSM_INVOKE.clone(),
            descs::DEFAULT_NAME,
            descs::CD_VAR_HANDLE_DESC.clone(),
            args,
        )
    }
}

impl fmt::Display for VarHandleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            VarHandleKind::Field | VarHandleKind::StaticField => write!(
                f,
                "VarHandleDesc[{}{}.{}:{}]",
                if self.kind == VarHandleKind::StaticField {
                    "static "
                } else {
                    ""
                },
                self.declaring_class.display_name(),
                self.name(),
                self.var_type.display_name()
            ),
            VarHandleKind::Array => {
                write!(f, "VarHandleDesc[{}]", self.declaring_class.display_name())
            }
        }
    }
}
