//! Descriptor bootstraps.
//!
//! Every descriptor can describe itself as a [`DynamicConstantDesc`] through its
//! `describe_constable` method. The functions in this module are the bootstraps those
//! self-descriptions name: given the string arguments, they rebuild the descriptor. The lookup,
//! name and type a bootstrap receives carry no information here and are not taken.
//!
//! [`rebuild`] evaluates a whole self-description, nested arguments included, without any
//! [`crate::resolve::AccessContext`].
//!
//! # Examples
//!
//! ```rust
//! use constdesc::constant::{bootstraps, ConstantDesc, MethodTypeDesc};
//!
//! let ty = MethodTypeDesc::of_descriptor("(ILjava/lang/String;)V")?;
//! let rebuilt = bootstraps::rebuild(&ty.describe_constable())?;
//! assert_eq!(rebuilt, ConstantDesc::MethodType(ty));
//! # Ok::<(), constdesc::Error>(())
//! ```

use crate::{
    constant::{
        descs, ClassDesc, ConstantDesc, DirectMethodHandleDesc, DynamicConstantDesc, EnumDesc,
        Kind, MethodHandleDesc, MethodTypeDesc, VarHandleDesc,
    },
    Result,
};

/// Rebuild a [`ClassDesc`] from its descriptor
///
/// # Errors
/// Returns [`crate::Error::MalformedDescriptor`] for a bad descriptor.
pub fn class_desc(descriptor: &str) -> Result<ClassDesc> {
    ClassDesc::of_descriptor(descriptor)
}

/// Rebuild a [`MethodTypeDesc`] from its descriptor
///
/// # Errors
/// Returns [`crate::Error::MalformedDescriptor`] for a bad descriptor.
pub fn method_type_desc(descriptor: &str) -> Result<MethodTypeDesc> {
    MethodTypeDesc::of_descriptor(descriptor)
}

/// Rebuild a [`DirectMethodHandleDesc`]
///
/// ## Arguments
/// * 'kind_name' - The [`Kind`] name, e.g. `STATIC`
/// * 'owner' - Descriptor of the owner class
/// * 'name' - The member name
/// * 'descriptor' - The lookup method descriptor
///
/// # Errors
/// Returns [`crate::Error::IllegalArgument`] for an unknown kind and otherwise the errors of
/// [`DirectMethodHandleDesc::of`].
pub fn method_handle_desc(
    kind_name: &str,
    owner: &str,
    name: &str,
    descriptor: &str,
) -> Result<DirectMethodHandleDesc> {
    DirectMethodHandleDesc::of_method_descriptor(
        Kind::from_name(kind_name)?,
        ClassDesc::of_descriptor(owner)?,
        name,
        descriptor,
    )
}

/// Rebuild a [`DynamicConstantDesc`] over a static bootstrap
///
/// ## Arguments
/// * 'owner' - Descriptor of the class declaring the bootstrap
/// * 'bootstrap_name' - The bootstrap method name
/// * 'bootstrap_descriptor' - The bootstrap method descriptor
/// * 'constant_name' - The constant name
/// * 'constant_type' - Descriptor of the constant type
/// * 'args' - The static arguments, already rebuilt
///
/// # Errors
/// Returns the construction errors of the parts.
pub fn dynamic_constant_desc<I>(
    owner: &str,
    bootstrap_name: &str,
    bootstrap_descriptor: &str,
    constant_name: &str,
    constant_type: &str,
    args: I,
) -> Result<DynamicConstantDesc>
where
    I: IntoIterator<Item = ConstantDesc>,
{
    let bootstrap = DirectMethodHandleDesc::of_method_descriptor(
        Kind::Static,
        ClassDesc::of_descriptor(owner)?,
        bootstrap_name,
        bootstrap_descriptor,
    )?;
    DynamicConstantDesc::of(
        bootstrap,
        constant_name,
        ClassDesc::of_descriptor(constant_type)?,
        args,
    )
}

/// Rebuild an [`EnumDesc`]
///
/// # Errors
/// Returns the construction errors of [`EnumDesc::of`].
pub fn enum_desc(class_descriptor: &str, constant_name: &str) -> Result<EnumDesc> {
    EnumDesc::of(ClassDesc::of_descriptor(class_descriptor)?, constant_name)
}

/// Evaluate a self-description produced by `describe_constable`
///
/// Nested self-descriptions among the arguments are evaluated first. The result compares
/// equal to the descriptor that was described.
///
/// # Errors
/// Returns [`crate::Error::IllegalArgument`] if `desc` or one of its nested arguments is not a
/// self-description, and the construction errors of the rebuilt parts.
pub fn rebuild(desc: &DynamicConstantDesc) -> Result<ConstantDesc> {
    let bootstrap = desc.bootstrap_method();
    let args = desc.bootstrap_args();

    if bootstrap == &*descs::BSM_CLASSDESC {
        expect_arity(desc, 1)?;
        Ok(class_desc(string_arg(args, 0)?)?.into())
    } else if bootstrap == &*descs::BSM_METHODTYPEDESC {
        expect_arity(desc, 1)?;
        Ok(method_type_desc(string_arg(args, 0)?)?.into())
    } else if bootstrap == &*descs::BSM_METHODHANDLEDESC {
        expect_arity(desc, 4)?;
        Ok(method_handle_desc(
            string_arg(args, 0)?,
            string_arg(args, 1)?,
            string_arg(args, 2)?,
            string_arg(args, 3)?,
        )?
        .into())
    } else if bootstrap == &*descs::BSM_ENUMDESC {
        expect_arity(desc, 2)?;
        Ok(enum_desc(string_arg(args, 0)?, string_arg(args, 1)?)?.into())
    } else if bootstrap == &*descs::BSM_DYNAMICCONSTANTDESC {
        if args.len() < 5 {
            return Err(illegal_argument!(
                "{} takes at least 5 arguments, got {}",
                bootstrap.method_name(),
                args.len()
            ));
        }
        let nested = args[5..].iter().map(nested).collect::<Result<Vec<_>>>()?;
        Ok(dynamic_constant_desc(
            string_arg(args, 0)?,
            string_arg(args, 1)?,
            string_arg(args, 2)?,
            string_arg(args, 3)?,
            string_arg(args, 4)?,
            nested,
        )?
        .into())
    } else if bootstrap == &*descs::BSM_INVOKE {
        rebuild_factory(desc)
    } else {
        Err(illegal_argument!(
            "{} is not a descriptor bootstrap",
            desc.bootstrap_method()
        ))
    }
}

/// `BSM_INVOKE` over one of the descriptor factory methods
fn rebuild_factory(desc: &DynamicConstantDesc) -> Result<ConstantDesc> {
    let args = desc.bootstrap_args();
    let factory = match args.first() {
        Some(ConstantDesc::MethodHandle(MethodHandleDesc::Direct(factory))) => factory,
        _ => return Err(illegal_argument!("{} does not invoke a method handle", desc)),
    };

    if factory == &*descs::MHR_METHODHANDLEDESC_ASTYPE {
        expect_arity(desc, 3)?;
        let handle = match nested(&args[1])? {
            ConstantDesc::MethodHandle(handle) => handle,
            other => return Err(illegal_argument!("expected a method handle, got {}", other)),
        };
        let ty = match nested(&args[2])? {
            ConstantDesc::MethodType(ty) => ty,
            other => return Err(illegal_argument!("expected a method type, got {}", other)),
        };
        Ok(handle.as_type(ty).into())
    } else if factory == &*descs::MHR_VARHANDLEDESC_OFFIELD
        || factory == &*descs::MHR_VARHANDLEDESC_OFSTATIC
    {
        expect_arity(desc, 4)?;
        let owner = class_arg(&args[1])?;
        let name = string_arg(args, 2)?;
        let ty = class_arg(&args[3])?;
        let handle = if factory == &*descs::MHR_VARHANDLEDESC_OFSTATIC {
            VarHandleDesc::of_static_field(owner, name, ty)?
        } else {
            VarHandleDesc::of_field(owner, name, ty)?
        };
        Ok(handle.into())
    } else if factory == &*descs::MHR_VARHANDLEDESC_OFARRAY {
        expect_arity(desc, 2)?;
        Ok(VarHandleDesc::of_array(class_arg(&args[1])?)?.into())
    } else {
        Err(illegal_argument!("{} is not a descriptor factory", factory))
    }
}

fn nested(arg: &ConstantDesc) -> Result<ConstantDesc> {
    match arg {
        ConstantDesc::Dynamic(desc) => rebuild(desc),
        other => Ok(other.clone()),
    }
}

fn class_arg(arg: &ConstantDesc) -> Result<ClassDesc> {
    match nested(arg)? {
        ConstantDesc::Class(class) => Ok(class),
        other => Err(illegal_argument!("expected a class descriptor, got {}", other)),
    }
}

fn string_arg(args: &[ConstantDesc], index: usize) -> Result<&str> {
    args.get(index)
        .and_then(ConstantDesc::as_str)
        .ok_or_else(|| illegal_argument!("argument {} must be a string", index))
}

fn expect_arity(desc: &DynamicConstantDesc, arity: usize) -> Result<()> {
    let found = desc.bootstrap_args().len();
    if found == arity {
        Ok(())
    } else {
        Err(illegal_argument!(
            "{} takes {} arguments, got {}",
            desc.bootstrap_method().method_name(),
            arity,
            found
        ))
    }
}
