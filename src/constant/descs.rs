//! Well-known descriptors.
//!
//! Class descriptors for the core platform types, the bootstrap methods the canonicalization
//! registry and the descriptor bootstraps rely on, and the [`NULL`] constant.
//!
//! Every constant is built lazily on first access and never fails: the descriptors are fixed
//! and known to be well-formed.

use std::sync::{Arc, LazyLock};

use crate::{
    constant::{ClassDesc, DirectMethodHandleDesc, DynamicConstantDesc, Kind, MethodTypeDesc},
    descriptor::binary_to_internal,
    Result,
};

/// Name used for dynamic constants whose name carries no information
pub const DEFAULT_NAME: &str = "_";

fn class(binary_name: &str) -> ClassDesc {
    ClassDesc::from_validated(&format!("L{};", binary_to_internal(binary_name)))
}

fn primitive(tag: &str) -> ClassDesc {
    ClassDesc::from_validated(tag)
}

fn array(component: &ClassDesc) -> ClassDesc {
    ClassDesc::from_validated(&format!("[{}", component.descriptor_string()))
}

/// Bootstrap type `(leading..., params...)return` built from known-valid parts
fn bootstrap_type(
    leading: &[&ClassDesc],
    return_type: &ClassDesc,
    params: &[&ClassDesc],
) -> MethodTypeDesc {
    let params = leading.iter().chain(params).map(|c| (*c).clone()).collect();
    MethodTypeDesc::from_validated(return_type.clone(), params)
}

fn static_method(
    owner: &ClassDesc,
    name: &str,
    return_type: &ClassDesc,
    params: &[&ClassDesc],
) -> DirectMethodHandleDesc {
    DirectMethodHandleDesc::from_validated(
        Kind::Static,
        owner.clone(),
        name,
        bootstrap_type(&[], return_type, params),
    )
}

fn constant_bootstrap(
    owner: &ClassDesc,
    name: &str,
    return_type: &ClassDesc,
    params: &[&ClassDesc],
) -> DirectMethodHandleDesc {
    DirectMethodHandleDesc::from_validated(
        Kind::Static,
        owner.clone(),
        name,
        bootstrap_type(
            &[&*CD_METHOD_HANDLES_LOOKUP, &*CD_STRING, &*CD_CLASS],
            return_type,
            params,
        ),
    )
}

// ================================================================================================
// Primitive types
// ================================================================================================

/// `int`
pub static CD_INT: LazyLock<ClassDesc> = LazyLock::new(|| primitive("I"));
/// `long`
pub static CD_LONG: LazyLock<ClassDesc> = LazyLock::new(|| primitive("J"));
/// `float`
pub static CD_FLOAT: LazyLock<ClassDesc> = LazyLock::new(|| primitive("F"));
/// `double`
pub static CD_DOUBLE: LazyLock<ClassDesc> = LazyLock::new(|| primitive("D"));
/// `short`
pub static CD_SHORT: LazyLock<ClassDesc> = LazyLock::new(|| primitive("S"));
/// `byte`
pub static CD_BYTE: LazyLock<ClassDesc> = LazyLock::new(|| primitive("B"));
/// `char`
pub static CD_CHAR: LazyLock<ClassDesc> = LazyLock::new(|| primitive("C"));
/// `boolean`
pub static CD_BOOLEAN: LazyLock<ClassDesc> = LazyLock::new(|| primitive("Z"));
/// `void`
pub static CD_VOID: LazyLock<ClassDesc> = LazyLock::new(|| primitive("V"));

// ================================================================================================
// java.lang
// ================================================================================================

/// `java.lang.Object`
pub static CD_OBJECT: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Object"));
/// `java.lang.String`
pub static CD_STRING: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.String"));
/// `java.lang.Class`
pub static CD_CLASS: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Class"));
/// `java.lang.Number`
pub static CD_NUMBER: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Number"));
/// `java.lang.Integer`
pub static CD_INTEGER: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Integer"));
/// `java.lang.Long`
pub static CD_BOXED_LONG: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Long"));
/// `java.lang.Float`
pub static CD_BOXED_FLOAT: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Float"));
/// `java.lang.Double`
pub static CD_BOXED_DOUBLE: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Double"));
/// `java.lang.Short`
pub static CD_BOXED_SHORT: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Short"));
/// `java.lang.Byte`
pub static CD_BOXED_BYTE: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Byte"));
/// `java.lang.Character`
pub static CD_CHARACTER: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Character"));
/// `java.lang.Boolean`
pub static CD_BOXED_BOOLEAN: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Boolean"));
/// `java.lang.Void`
pub static CD_BOXED_VOID: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Void"));
/// `java.lang.Throwable`
pub static CD_THROWABLE: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Throwable"));
/// `java.lang.Exception`
pub static CD_EXCEPTION: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Exception"));
/// `java.lang.Enum`
pub static CD_ENUM: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.Enum"));

// ================================================================================================
// java.lang.invoke
// ================================================================================================

/// `java.lang.invoke.VarHandle`
pub static CD_VAR_HANDLE: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.invoke.VarHandle"));
/// `java.lang.invoke.MethodHandles`
pub static CD_METHOD_HANDLES: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.invoke.MethodHandles"));
/// `java.lang.invoke.MethodHandles$Lookup`
pub static CD_METHOD_HANDLES_LOOKUP: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.invoke.MethodHandles$Lookup"));
/// `java.lang.invoke.MethodHandle`
pub static CD_METHOD_HANDLE: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.invoke.MethodHandle"));
/// `java.lang.invoke.MethodType`
pub static CD_METHOD_TYPE: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.invoke.MethodType"));
/// `java.lang.invoke.CallSite`
pub static CD_CALL_SITE: LazyLock<ClassDesc> = LazyLock::new(|| class("java.lang.invoke.CallSite"));
/// `java.lang.invoke.ConstantBootstraps`
pub static CD_CONSTANT_BOOTSTRAPS: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.invoke.ConstantBootstraps"));

// ================================================================================================
// java.util
// ================================================================================================

/// `java.util.Collection`
pub static CD_COLLECTION: LazyLock<ClassDesc> = LazyLock::new(|| class("java.util.Collection"));
/// `java.util.List`
pub static CD_LIST: LazyLock<ClassDesc> = LazyLock::new(|| class("java.util.List"));
/// `java.util.Set`
pub static CD_SET: LazyLock<ClassDesc> = LazyLock::new(|| class("java.util.Set"));
/// `java.util.Map`
pub static CD_MAP: LazyLock<ClassDesc> = LazyLock::new(|| class("java.util.Map"));

// ================================================================================================
// Descriptor types, as seen by the descriptor bootstraps
// ================================================================================================

/// `java.lang.constant.ConstantDesc`
pub static CD_CONSTANT_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.ConstantDesc"));
/// `java.lang.constant.ClassDesc`
pub static CD_CLASS_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.ClassDesc"));
/// `java.lang.constant.EnumDesc`
pub static CD_ENUM_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.EnumDesc"));
/// `java.lang.constant.MethodTypeDesc`
pub static CD_METHOD_TYPE_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.MethodTypeDesc"));
/// `java.lang.constant.MethodHandleDesc`
pub static CD_METHOD_HANDLE_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.MethodHandleDesc"));
/// `java.lang.constant.VarHandleDesc`
pub static CD_VAR_HANDLE_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.VarHandleDesc"));
/// `java.lang.constant.DynamicConstantDesc`
pub static CD_DYNAMIC_CONSTANT_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.DynamicConstantDesc"));
/// `java.lang.constant.DynamicCallSiteDesc`
pub static CD_DYNAMIC_CALL_SITE_DESC: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.DynamicCallSiteDesc"));
/// `java.lang.constant.DescBootstraps`, home of the descriptor bootstraps
pub static CD_DESC_BOOTSTRAPS: LazyLock<ClassDesc> =
    LazyLock::new(|| class("java.lang.constant.DescBootstraps"));

// ================================================================================================
// Bootstrap methods
// ================================================================================================

/// `ConstantBootstraps.primitiveClass`
pub static BSM_PRIMITIVE_CLASS: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(&*CD_CONSTANT_BOOTSTRAPS, "primitiveClass", &*CD_CLASS, &[])
});

/// `ConstantBootstraps.enumConstant`
pub static BSM_ENUM_CONSTANT: LazyLock<DirectMethodHandleDesc> =
    LazyLock::new(|| constant_bootstrap(&*CD_CONSTANT_BOOTSTRAPS, "enumConstant", &*CD_ENUM, &[]));

/// `ConstantBootstraps.nullConstant`
pub static BSM_NULL_CONSTANT: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(&*CD_CONSTANT_BOOTSTRAPS, "nullConstant", &*CD_OBJECT, &[])
});

/// `ConstantBootstraps.fieldVarHandle`, static arguments `(declaringClass, name, fieldType)`
pub static BSM_VARHANDLE_FIELD: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_CONSTANT_BOOTSTRAPS,
        "fieldVarHandle",
        &*CD_VAR_HANDLE,
        &[&*CD_CLASS, &*CD_STRING, &*CD_CLASS],
    )
});

/// `ConstantBootstraps.staticFieldVarHandle`, static arguments `(declaringClass, name, fieldType)`
pub static BSM_VARHANDLE_STATIC_FIELD: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_CONSTANT_BOOTSTRAPS,
        "staticFieldVarHandle",
        &*CD_VAR_HANDLE,
        &[&*CD_CLASS, &*CD_STRING, &*CD_CLASS],
    )
});

/// `ConstantBootstraps.arrayVarHandle`, static argument `(arrayClass)`
pub static BSM_VARHANDLE_ARRAY: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_CONSTANT_BOOTSTRAPS,
        "arrayVarHandle",
        &*CD_VAR_HANDLE,
        &[&*CD_CLASS],
    )
});

/// `ConstantBootstraps.invoke`, static arguments `(handle, args...)`
pub static BSM_INVOKE: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_CONSTANT_BOOTSTRAPS,
        "invoke",
        &*CD_OBJECT,
        &[&*CD_METHOD_HANDLE, &array(&*CD_OBJECT)],
    )
});

/// Descriptor bootstrap rebuilding a [`ClassDesc`] from its descriptor
pub static BSM_CLASSDESC: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(&*CD_DESC_BOOTSTRAPS, "classDesc", &*CD_CLASS_DESC, &[&*CD_STRING])
});

/// Descriptor bootstrap rebuilding a [`MethodTypeDesc`] from its descriptor
pub static BSM_METHODTYPEDESC: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_DESC_BOOTSTRAPS,
        "methodTypeDesc",
        &*CD_METHOD_TYPE_DESC,
        &[&*CD_STRING],
    )
});

/// Descriptor bootstrap rebuilding a [`DirectMethodHandleDesc`] from kind, owner, name, type
pub static BSM_METHODHANDLEDESC: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_DESC_BOOTSTRAPS,
        "methodHandleDesc",
        &*CD_METHOD_HANDLE_DESC,
        &[&*CD_STRING, &*CD_STRING, &*CD_STRING, &*CD_STRING],
    )
});

/// Descriptor bootstrap rebuilding a [`DynamicConstantDesc`]
pub static BSM_DYNAMICCONSTANTDESC: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_DESC_BOOTSTRAPS,
        "dynamicConstantDesc",
        &*CD_DYNAMIC_CONSTANT_DESC,
        &[
            &*CD_STRING,
            &*CD_STRING,
            &*CD_STRING,
            &*CD_STRING,
            &*CD_STRING,
            &array(&*CD_CONSTANT_DESC),
        ],
    )
});

/// Descriptor bootstrap rebuilding an [`crate::constant::EnumDesc`]
pub static BSM_ENUMDESC: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    constant_bootstrap(
        &*CD_DESC_BOOTSTRAPS,
        "enumDesc",
        &*CD_ENUM_DESC,
        &[&*CD_STRING, &*CD_STRING],
    )
});

// ================================================================================================
// Descriptor factories, used by self-descriptions that go through `BSM_INVOKE`
// ================================================================================================

/// `MethodHandleDesc.asType(MethodTypeDesc)`
pub static MHR_METHODHANDLEDESC_ASTYPE: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    DirectMethodHandleDesc::from_validated(
        Kind::InterfaceVirtual,
        CD_METHOD_HANDLE_DESC.clone(),
        "asType",
        bootstrap_type(&[], &*CD_METHOD_HANDLE_DESC, &[&*CD_METHOD_TYPE_DESC]),
    )
});

/// `VarHandleDesc.ofField(ClassDesc, String, ClassDesc)`
pub static MHR_VARHANDLEDESC_OFFIELD: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    static_method(
        &*CD_VAR_HANDLE_DESC,
        "ofField",
        &*CD_VAR_HANDLE_DESC,
        &[&*CD_CLASS_DESC, &*CD_STRING, &*CD_CLASS_DESC],
    )
});

/// `VarHandleDesc.ofStaticField(ClassDesc, String, ClassDesc)`
pub static MHR_VARHANDLEDESC_OFSTATIC: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    static_method(
        &*CD_VAR_HANDLE_DESC,
        "ofStaticField",
        &*CD_VAR_HANDLE_DESC,
        &[&*CD_CLASS_DESC, &*CD_STRING, &*CD_CLASS_DESC],
    )
});

/// `VarHandleDesc.ofArray(ClassDesc)`
pub static MHR_VARHANDLEDESC_OFARRAY: LazyLock<DirectMethodHandleDesc> = LazyLock::new(|| {
    static_method(
        &*CD_VAR_HANDLE_DESC,
        "ofArray",
        &*CD_VAR_HANDLE_DESC,
        &[&*CD_CLASS_DESC],
    )
});

// ================================================================================================
// Constants
// ================================================================================================

/// The `null` constant
///
/// Canonicalizing a null-constant dynamic constant with default name and `Object` type always
/// yields this exact instance, so it can be compared by identity with [`Arc::ptr_eq`].
pub static NULL: LazyLock<Arc<DynamicConstantDesc>> = LazyLock::new(|| {
    Arc::new(DynamicConstantDesc::from_parts(
        BSM_NULL_CONSTANT.clone(),
        DEFAULT_NAME,
        CD_OBJECT.clone(),
        Vec::new(),
    ))
});

// ================================================================================================
// Bootstrap factories
// ================================================================================================

/// Describe a static bootstrap method for a dynamic constant
///
/// The leading `(Lookup, String, Class)` parameters every constant bootstrap receives are
/// prepended to `params`.
///
/// ## Arguments
/// * 'owner' - The class declaring the bootstrap method
/// * 'name' - The bootstrap method name
/// * 'return_type' - The bootstrap return type
/// * 'params' - The types of the static bootstrap arguments
///
/// # Errors
/// Returns [`crate::Error::InvalidName`] for a bad name and [`crate::Error::IllegalArgument`]
/// for a bad owner or a `void` parameter.
pub fn of_constant_bootstrap<I>(
    owner: ClassDesc,
    name: &str,
    return_type: ClassDesc,
    params: I,
) -> Result<DirectMethodHandleDesc>
where
    I: IntoIterator<Item = ClassDesc>,
{
    let ty = MethodTypeDesc::of(return_type, params)?.insert_parameter_types(
        0,
        [
            CD_METHOD_HANDLES_LOOKUP.clone(),
            CD_STRING.clone(),
            CD_CLASS.clone(),
        ],
    )?;
    DirectMethodHandleDesc::of(Kind::Static, owner, name, ty)
}

/// Describe a static bootstrap method for an `invokedynamic` call site
///
/// The leading `(Lookup, String, MethodType)` parameters every call site bootstrap receives
/// are prepended to `params`.
///
/// # Errors
/// Returns [`crate::Error::InvalidName`] for a bad name and [`crate::Error::IllegalArgument`]
/// for a bad owner or a `void` parameter.
pub fn of_callsite_bootstrap<I>(
    owner: ClassDesc,
    name: &str,
    return_type: ClassDesc,
    params: I,
) -> Result<DirectMethodHandleDesc>
where
    I: IntoIterator<Item = ClassDesc>,
{
    let ty = MethodTypeDesc::of(return_type, params)?.insert_parameter_types(
        0,
        [
            CD_METHOD_HANDLES_LOOKUP.clone(),
            CD_STRING.clone(),
            CD_METHOD_TYPE.clone(),
        ],
    )?;
    DirectMethodHandleDesc::of(Kind::Static, owner, name, ty)
}
