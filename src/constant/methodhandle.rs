//! Nominal descriptors for method handles.

use std::{fmt, sync::Arc};

use crate::{
    constant::{descs, ClassDesc, ConstantDesc, DynamicConstantDesc, Kind, MethodTypeDesc},
    descriptor::{validate_member_name, CONSTRUCTOR_NAME},
    resolve::{AccessContext, Resolver},
    Result,
};

/// A nominal descriptor for a direct method handle: a member reference tagged with its [`Kind`].
///
/// The invocation type is the type used to look the member up. For methods this is the
/// declared method type (without a receiver), for constructors the constructor's parameters
/// with a `void` return, and for field accessors the shape of the accessor:
///
/// | Kind            | Invocation type |
/// |-----------------|-----------------|
/// | `GETTER`        | `(Owner)T`      |
/// | `SETTER`        | `(Owner,T)V`    |
/// | `STATIC_GETTER` | `()T`           |
/// | `STATIC_SETTER` | `(T)V`          |
/// | `CONSTRUCTOR`   | `(...)V`        |
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::{descs, DirectMethodHandleDesc, Kind, MethodTypeDesc};
///
/// let value_of = DirectMethodHandleDesc::of(
///     Kind::Static,
///     descs::CD_INTEGER.clone(),
///     "valueOf",
///     MethodTypeDesc::of_descriptor("(I)Ljava/lang/Integer;")?,
/// )?;
/// assert_eq!(value_of.ref_kind(), 6);
/// assert_eq!(value_of.to_string(), "MethodHandleDesc[STATIC/Integer::valueOf(int)Integer]");
///
/// let getter = DirectMethodHandleDesc::of_field(
///     Kind::Getter,
///     descs::CD_STRING.clone(),
///     "hash",
///     descs::CD_INT.clone(),
/// )?;
/// assert_eq!(getter.invocation_type().descriptor_string(), "(Ljava/lang/String;)I");
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DirectMethodHandleDesc {
    kind: Kind,
    owner: ClassDesc,
    name: Arc<str>,
    invocation_type: MethodTypeDesc,
}

impl DirectMethodHandleDesc {
    /// Create a direct method handle descriptor
    ///
    /// For [`Kind::Constructor`] the name argument is ignored and `<init>` is used.
    ///
    /// ## Arguments
    /// * 'kind' - The kind of member reference
    /// * 'owner' - The class or interface declaring the member
    /// * 'name' - The unqualified member name
    /// * 'invocation_type' - The lookup type, shaped according to `kind`
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] if the owner is not a class or interface type
    /// or the type does not fit the kind, and [`crate::Error::InvalidName`] for a bad name.
    pub fn of(
        kind: Kind,
        owner: ClassDesc,
        name: &str,
        invocation_type: MethodTypeDesc,
    ) -> Result<Self> {
        let name = if kind == Kind::Constructor {
            CONSTRUCTOR_NAME
        } else {
            name
        };

        if !owner.is_class_or_interface() {
            return Err(illegal_argument!(
                "Owner must be a class or interface type, found {}",
                owner.descriptor_string()
            ));
        }
        validate_member_name(name)?;
        check_shape(kind, &owner, &invocation_type)?;

        Ok(Self::from_validated(kind, owner, name, invocation_type))
    }

    /// Create a direct method handle descriptor from a method descriptor string
    ///
    /// For field accessor kinds the descriptor is that of the accessor, not of the field.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] for a bad descriptor, otherwise the same
    /// errors as [`DirectMethodHandleDesc::of`].
    pub fn of_method_descriptor(
        kind: Kind,
        owner: ClassDesc,
        name: &str,
        descriptor: &str,
    ) -> Result<Self> {
        Self::of(kind, owner, name, MethodTypeDesc::of_descriptor(descriptor)?)
    }

    /// Create a field accessor descriptor, synthesizing the accessor type from the field type
    ///
    /// ## Arguments
    /// * 'kind' - One of the four field accessor kinds
    /// * 'owner' - The class declaring the field
    /// * 'field_name' - The field name
    /// * 'field_type' - The declared type of the field
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] for a non-field kind or a `void` field type.
    pub fn of_field(
        kind: Kind,
        owner: ClassDesc,
        field_name: &str,
        field_type: ClassDesc,
    ) -> Result<Self> {
        if field_type.is_void() {
            return Err(illegal_argument!("Field type cannot be void"));
        }

        let void = descs::CD_VOID.clone();
        let invocation_type = match kind {
            Kind::Getter => MethodTypeDesc::of(field_type, [owner.clone()])?,
            Kind::Setter => MethodTypeDesc::of(void, [owner.clone(), field_type])?,
            Kind::StaticGetter => MethodTypeDesc::of(field_type, Vec::new())?,
            Kind::StaticSetter => MethodTypeDesc::of(void, [field_type])?,
            _ => {
                return Err(illegal_argument!(
                    "{} is not a field accessor kind",
                    kind
                ))
            }
        };
        Self::of(kind, owner, field_name, invocation_type)
    }

    /// Create a constructor descriptor from the constructor's parameter types
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] if the owner is not a class type or a
    /// parameter is `void`.
    pub fn of_constructor<I>(owner: ClassDesc, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClassDesc>,
    {
        let invocation_type = MethodTypeDesc::of(descs::CD_VOID.clone(), params)?;
        Self::of(Kind::Constructor, owner, CONSTRUCTOR_NAME, invocation_type)
    }

    pub(crate) fn from_validated(
        kind: Kind,
        owner: ClassDesc,
        name: &str,
        invocation_type: MethodTypeDesc,
    ) -> Self {
        debug_assert!(check_shape(kind, &owner, &invocation_type).is_ok());
        DirectMethodHandleDesc {
            kind,
            owner,
            name: Arc::from(name),
            invocation_type,
        }
    }

    /// The kind of member reference
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// The numeric reference kind tag
    #[must_use]
    pub fn ref_kind(&self) -> u8 {
        self.kind.ref_kind()
    }

    /// Returns `true` if the owner is an interface
    #[must_use]
    pub fn is_owner_interface(&self) -> bool {
        self.kind.is_interface()
    }

    /// The class or interface declaring the member
    #[must_use]
    pub fn owner(&self) -> &ClassDesc {
        &self.owner
    }

    /// The member name, `<init>` for constructors
    #[must_use]
    pub fn method_name(&self) -> &str {
        &self.name
    }

    /// The lookup type, shaped according to the kind
    #[must_use]
    pub fn invocation_type(&self) -> &MethodTypeDesc {
        &self.invocation_type
    }

    /// The type of the field accessed, `None` for method and constructor kinds
    #[must_use]
    pub fn field_type(&self) -> Option<&ClassDesc> {
        let ty = &self.invocation_type;
        match self.kind {
            Kind::Getter | Kind::StaticGetter => Some(ty.return_type()),
            Kind::Setter => ty.parameter_list().get(1),
            Kind::StaticSetter => ty.parameter_list().first(),
            _ => None,
        }
    }

    /// The descriptor string used to look the member up
    ///
    /// The field descriptor for field accessor kinds, the method descriptor otherwise.
    #[must_use]
    pub fn lookup_descriptor(&self) -> String {
        match self.field_type() {
            Some(field) => field.descriptor_string().to_string(),
            None => self.invocation_type.descriptor_string(),
        }
    }

    /// The type of the handle this descriptor resolves to
    ///
    /// Instance method kinds take the owner as leading receiver, constructors return the
    /// owner. Static methods and field accessors already carry their full shape.
    #[must_use]
    pub fn handle_type(&self) -> MethodTypeDesc {
        let ty = &self.invocation_type;
        match self.kind {
            Kind::Virtual | Kind::InterfaceVirtual | Kind::Special | Kind::InterfaceSpecial => {
                let mut params = Vec::with_capacity(ty.parameter_count() + 1);
                params.push(self.owner.clone());
                params.extend_from_slice(ty.parameter_list());
                MethodTypeDesc::from_validated(ty.return_type().clone(), params)
            }
            Kind::Constructor => ty.change_return_type(self.owner.clone()),
            _ => ty.clone(),
        }
    }

    /// A method handle descriptor adapting this one to `method_type`
    ///
    /// Returns this descriptor unchanged if the type is already `method_type`.
    #[must_use]
    pub fn as_type(&self, method_type: MethodTypeDesc) -> MethodHandleDesc {
        MethodHandleDesc::Direct(self.clone()).as_type(method_type)
    }

    /// Resolve this descriptor to a method handle under `context`
    ///
    /// # Errors
    /// Propagates the context's linkage error for the member lookup.
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_direct(self)
    }

    /// A dynamic constant that rebuilds this descriptor through the descriptor bootstraps
    #[must_use]
    pub fn describe_constable(&self) -> DynamicConstantDesc {
        DynamicConstantDesc::from_parts(
            descs::BSM_METHODHANDLEDESC.clone(),
            descs::DEFAULT_NAME,
            descs::CD_METHOD_HANDLE_DESC.clone(),
            vec![
                self.kind.to_string().into(),
                self.owner.descriptor_string().into(),
                self.method_name().into(),
                self.invocation_type.descriptor_string().into(),
            ],
        )
    }
}

/// Verify the invocation type fits the kind
fn check_shape(kind: Kind, owner: &ClassDesc, ty: &MethodTypeDesc) -> Result<()> {
    let void = ty.return_type().is_void();
    let params = ty.parameter_list();

    let (valid, expected) = match kind {
        Kind::Constructor => (void, "(...)V"),
        Kind::Getter => (
            !void && params.len() == 1 && !params[0].is_primitive(),
            "(R)T",
        ),
        Kind::Setter => (void && params.len() == 2 && !params[0].is_primitive(), "(R,T)V"),
        Kind::StaticGetter => (!void && params.is_empty(), "()T"),
        Kind::StaticSetter => (void && params.len() == 1, "(T)V"),
        _ => (true, ""),
    };

    if valid {
        Ok(())
    } else {
        Err(illegal_argument!(
            "Expected type of {} for {} on {}, found {}",
            expected,
            kind,
            owner.descriptor_string(),
            ty.descriptor_string()
        ))
    }
}

impl fmt::Display for DirectMethodHandleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MethodHandleDesc[{}/{}::{}{}]",
            self.kind,
            self.owner.display_name(),
            self.name,
            self.invocation_type.display_descriptor()
        )
    }
}

impl fmt::Debug for DirectMethodHandleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DirectMethodHandleDesc({} {}.{}:{})",
            self.kind,
            self.owner.descriptor_string(),
            self.name,
            self.invocation_type.descriptor_string()
        )
    }
}

/// A method handle adapted to a different type, the result of [`MethodHandleDesc::as_type`]
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct AsTypeMethodHandleDesc {
    underlying: Box<MethodHandleDesc>,
    invocation_type: MethodTypeDesc,
}

impl AsTypeMethodHandleDesc {
    /// The handle being adapted
    #[must_use]
    pub fn underlying(&self) -> &MethodHandleDesc {
        &self.underlying
    }

    /// The type the handle is adapted to
    #[must_use]
    pub fn invocation_type(&self) -> &MethodTypeDesc {
        &self.invocation_type
    }
}

/// A nominal descriptor for a method handle
///
/// Either a direct member reference, or an adaptation of another handle to a new type.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum MethodHandleDesc {
    /// A direct member reference
    Direct(DirectMethodHandleDesc),
    /// A handle adapted to a different type
    AsType(AsTypeMethodHandleDesc),
}

impl MethodHandleDesc {
    /// Convenience for [`DirectMethodHandleDesc::of`]
    ///
    /// # Errors
    /// Same as [`DirectMethodHandleDesc::of`].
    pub fn of(
        kind: Kind,
        owner: ClassDesc,
        name: &str,
        invocation_type: MethodTypeDesc,
    ) -> Result<Self> {
        DirectMethodHandleDesc::of(kind, owner, name, invocation_type).map(Self::Direct)
    }

    /// The type of this handle as described
    ///
    /// For direct handles this is the lookup type, for adapted handles the target type.
    #[must_use]
    pub fn invocation_type(&self) -> &MethodTypeDesc {
        match self {
            MethodHandleDesc::Direct(direct) => direct.invocation_type(),
            MethodHandleDesc::AsType(adapted) => adapted.invocation_type(),
        }
    }

    /// A descriptor adapting this handle to `method_type`, or a clone of this descriptor if
    /// the type already matches
    #[must_use]
    pub fn as_type(&self, method_type: MethodTypeDesc) -> MethodHandleDesc {
        if self.invocation_type() == &method_type {
            return self.clone();
        }

        MethodHandleDesc::AsType(AsTypeMethodHandleDesc {
            underlying: Box::new(self.clone()),
            invocation_type: method_type,
        })
    }

    /// The direct handle, if this is one
    #[must_use]
    pub fn as_direct(&self) -> Option<&DirectMethodHandleDesc> {
        match self {
            MethodHandleDesc::Direct(direct) => Some(direct),
            MethodHandleDesc::AsType(_) => None,
        }
    }

    /// Resolve this descriptor to a method handle under `context`
    ///
    /// # Errors
    /// Propagates the context's linkage error for the member lookup or adaptation.
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_method_handle(self)
    }

    /// A dynamic constant that rebuilds this descriptor
    ///
    /// Adapted handles describe themselves as an invocation of
    /// `MethodHandleDesc.asType(MethodTypeDesc)` on the described underlying handle.
    #[must_use]
    pub fn describe_constable(&self) -> DynamicConstantDesc {
        match self {
            MethodHandleDesc::Direct(direct) => direct.describe_constable(),
            MethodHandleDesc::AsType(adapted) => DynamicConstantDesc::from_parts(
                descs::BSM_INVOKE.clone(),
                descs::DEFAULT_NAME,
                descs::CD_METHOD_HANDLE_DESC.clone(),
                vec![
                    ConstantDesc::from(descs::MHR_METHODHANDLEDESC_ASTYPE.clone()),
                    adapted.underlying.describe_constable().into(),
                    adapted.invocation_type.describe_constable().into(),
                ],
            ),
        }
    }
}

impl From<DirectMethodHandleDesc> for MethodHandleDesc {
    fn from(direct: DirectMethodHandleDesc) -> Self {
        MethodHandleDesc::Direct(direct)
    }
}

impl fmt::Display for MethodHandleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodHandleDesc::Direct(direct) => write!(f, "{direct}"),
            MethodHandleDesc::AsType(adapted) => write!(
                f,
                "{}.asType{}",
                adapted.underlying,
                adapted.invocation_type.display_descriptor()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn class(descriptor: &str) -> ClassDesc {
        ClassDesc::of_descriptor(descriptor).unwrap()
    }

    fn mt(descriptor: &str) -> MethodTypeDesc {
        MethodTypeDesc::of_descriptor(descriptor).unwrap()
    }

    #[test]
    fn test_method_kinds() {
        let string = class("Ljava/lang/String;");
        let is_empty = DirectMethodHandleDesc::of(
            Kind::Virtual,
            string.clone(),
            "isEmpty",
            mt("()Z"),
        )
        .unwrap();
        assert_eq!(is_empty.kind(), Kind::Virtual);
        assert_eq!(is_empty.ref_kind(), 5);
        assert!(!is_empty.is_owner_interface());
        assert_eq!(is_empty.method_name(), "isEmpty");
        assert_eq!(is_empty.lookup_descriptor(), "()Z");
        assert_eq!(is_empty.handle_type().descriptor_string(), "(Ljava/lang/String;)Z");
        assert!(is_empty.field_type().is_none());

        let list = class("Ljava/util/List;");
        let of = DirectMethodHandleDesc::of(
            Kind::InterfaceStatic,
            list,
            "of",
            mt("()Ljava/util/List;"),
        )
        .unwrap();
        assert!(of.is_owner_interface());
        assert_eq!(of.ref_kind(), 6);
    }

    #[test]
    fn test_owner_must_be_class() {
        for owner in ["I", "[Ljava/lang/String;"] {
            assert!(matches!(
                DirectMethodHandleDesc::of(Kind::Static, class(owner), "m", mt("()V")),
                Err(Error::IllegalArgument(_))
            ));
        }
    }

    #[test]
    fn test_invalid_names() {
        let owner = class("LFoo;");
        for name in ["", "a.b", "a/b", "<foo>"] {
            assert!(matches!(
                DirectMethodHandleDesc::of(Kind::Static, owner.clone(), name, mt("()V")),
                Err(Error::InvalidName { .. })
            ));
        }
    }

    #[test]
    fn test_constructor() {
        let owner = class("Ljava/util/ArrayList;");
        let ctor = DirectMethodHandleDesc::of_constructor(owner.clone(), [class("I")]).unwrap();
        assert_eq!(ctor.method_name(), "<init>");
        assert_eq!(ctor.invocation_type().descriptor_string(), "(I)V");
        assert_eq!(ctor.handle_type().descriptor_string(), "(I)Ljava/util/ArrayList;");

        let named = DirectMethodHandleDesc::of(
            Kind::Constructor,
            owner.clone(),
            "ignored",
            mt("()V"),
        )
        .unwrap();
        assert_eq!(named.method_name(), "<init>");

        assert!(matches!(
            DirectMethodHandleDesc::of(Kind::Constructor, owner, "<init>", mt("()I")),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_field_accessors() {
        let owner = class("LFoo;");
        let int = class("I");

        let getter = DirectMethodHandleDesc::of_field(
            Kind::Getter,
            owner.clone(),
            "f",
            int.clone(),
        )
        .unwrap();
        assert_eq!(getter.invocation_type().descriptor_string(), "(LFoo;)I");
        assert_eq!(getter.field_type(), Some(&int));
        assert_eq!(getter.lookup_descriptor(), "I");

        let setter = DirectMethodHandleDesc::of_field(
            Kind::Setter,
            owner.clone(),
            "f",
            int.clone(),
        )
        .unwrap();
        assert_eq!(setter.invocation_type().descriptor_string(), "(LFoo;I)V");
        assert_eq!(setter.field_type(), Some(&int));

        let static_getter =
            DirectMethodHandleDesc::of_field(
                Kind::StaticGetter,
                owner.clone(),
                "f",
                int.clone(),
            )
            .unwrap();
        assert_eq!(static_getter.invocation_type().descriptor_string(), "()I");

        let static_setter =
            DirectMethodHandleDesc::of_field(
                Kind::StaticSetter,
                owner.clone(),
                "f",
                int.clone(),
            )
            .unwrap();
        assert_eq!(static_setter.invocation_type().descriptor_string(), "(I)V");
        assert_eq!(static_setter.handle_type(), *static_setter.invocation_type());

        assert!(matches!(
            DirectMethodHandleDesc::of_field(Kind::Static, owner.clone(), "f", int.clone()),
            Err(Error::IllegalArgument(_))
        ));
        assert!(matches!(
            DirectMethodHandleDesc::of_field(Kind::Getter, owner, "f", class("V")),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_field_shapes_rejected() {
        let owner = class("LFoo;");
        for (kind, descriptor) in [
            (Kind::Getter, "()I"),
            (Kind::Getter, "(I)I"),
            (Kind::Getter, "(LFoo;)V"),
            (Kind::Setter, "(LFoo;I)I"),
            (Kind::Setter, "(II)V"),
            (Kind::Setter, "(LFoo;)V"),
            (Kind::StaticGetter, "(I)I"),
            (Kind::StaticGetter, "()V"),
            (Kind::StaticSetter, "(I)I"),
            (Kind::StaticSetter, "()V"),
        ] {
            match DirectMethodHandleDesc::of(kind, owner.clone(), "f", mt(descriptor)) {
                Err(Error::IllegalArgument(message)) => assert!(message.contains("Expected type")),
                other => panic!("{kind} {descriptor} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn test_as_type() {
        let value_of = DirectMethodHandleDesc::of(
            Kind::Static,
            class("Ljava/lang/Integer;"),
            "valueOf",
            mt("(I)Ljava/lang/Integer;"),
        )
        .unwrap();

        let same = value_of.as_type(mt("(I)Ljava/lang/Integer;"));
        assert_eq!(same, MethodHandleDesc::Direct(value_of.clone()));

        let adapted = value_of.as_type(mt("(Ljava/lang/Integer;)Ljava/lang/Integer;"));
        assert_eq!(
            adapted.invocation_type().descriptor_string(),
            "(Ljava/lang/Integer;)Ljava/lang/Integer;"
        );
        assert!(adapted.as_direct().is_none());
        assert_eq!(
            adapted.to_string(),
            "MethodHandleDesc[STATIC/Integer::valueOf(int)Integer].asType(Integer)Integer"
        );

        match &adapted {
            MethodHandleDesc::AsType(inner) => {
                assert_eq!(inner.underlying(), &MethodHandleDesc::Direct(value_of.clone()))
            }
            MethodHandleDesc::Direct(_) => panic!("expected an adapted handle"),
        }

        let back = adapted.as_type(mt("(I)Ljava/lang/Integer;"));
        assert_ne!(back, MethodHandleDesc::Direct(value_of));
    }

    #[test]
    fn test_equality() {
        let a = DirectMethodHandleDesc::of_field(
            Kind::Getter,
            class("LFoo;"),
            "f",
            class("I"),
        )
        .unwrap();
        let b =
            DirectMethodHandleDesc::of(Kind::Getter, class("LFoo;"), "f", mt("(LFoo;)I")).unwrap();
        assert_eq!(a, b);
        let c = DirectMethodHandleDesc::of_field(
            Kind::Getter,
            class("LFoo;"),
            "g",
            class("I"),
        )
        .unwrap();
        assert_ne!(a, c);
    }
}
