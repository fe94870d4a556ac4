//! Integration tests for building, comparing and canonicalizing descriptors.
//!
//! These tests only use the public API, the way a class file writer or analyzer would: build
//! descriptors from names and descriptor strings, derive new ones, and round-trip them through
//! canonicalization and self-description.

use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
    sync::Arc,
};

use constdesc::{constant::bootstraps, prelude::*};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn test_class_descriptors_from_names() -> Result<()> {
    let string = ClassDesc::of("java.lang.String")?;
    assert_eq!(string.descriptor_string(), "Ljava/lang/String;");
    assert_eq!(string, descs::CD_STRING.clone());
    assert_eq!(string.display_name(), "String");
    assert_eq!(string.package_name()?, "java.lang");

    let entry = ClassDesc::of("java.util.Map")?.inner("Entry")?;
    assert_eq!(entry.descriptor_string(), "Ljava/util/Map$Entry;");
    assert_eq!(entry.display_name(), "Map$Entry");

    let local = ClassDesc::of_package_and_simple_name("", "Main")?;
    assert_eq!(local.descriptor_string(), "LMain;");
    assert_eq!(local.package_name()?, "");

    assert!(matches!(ClassDesc::of("java/lang/String"), Err(Error::InvalidName { .. })));
    assert!(matches!(ClassDesc::of(""), Err(Error::InvalidName { .. })));
    assert!(matches!(
        ClassDesc::of_descriptor("Ljava.lang.String;"),
        Err(Error::MalformedDescriptor { .. })
    ));
    Ok(())
}

#[test]
fn test_array_dimensions() -> Result<()> {
    let int = descs::CD_INT.clone();
    let matrix = int.array_type_of_rank(2)?;
    assert_eq!(matrix.descriptor_string(), "[[I");
    assert_eq!(matrix.display_name(), "int[][]");
    assert_eq!(matrix.component_type(), Some(int.array_type()?));
    assert_eq!(int.component_type(), None);

    let widest = int.array_type_of_rank(255)?;
    assert!(widest.is_array());
    assert!(matches!(widest.array_type(), Err(Error::IllegalArgument(_))));
    assert!(matches!(int.array_type_of_rank(0), Err(Error::IllegalArgument(_))));
    assert!(matches!(int.array_type_of_rank(-1), Err(Error::IllegalArgument(_))));
    assert!(descs::CD_VOID.array_type().is_err());
    Ok(())
}

#[test]
fn test_method_type_transformations() -> Result<()> {
    let desc = MethodTypeDesc::of_descriptor("(ILjava/lang/String;[J)V")?;
    assert_eq!(desc.parameter_count(), 3);
    assert_eq!(desc.display_descriptor(), "(int,String,long[])void");

    let changed = desc
        .change_return_type(descs::CD_OBJECT.clone())
        .change_parameter_type(0, descs::CD_LONG.clone())?;
    assert_eq!(changed.descriptor_string(), "(JLjava/lang/String;[J)Ljava/lang/Object;");

    let dropped = desc.drop_parameter_types(0, 2)?;
    assert_eq!(dropped.descriptor_string(), "([J)V");

    let inserted = dropped.insert_parameter_types(1, [descs::CD_BOOLEAN.clone()])?;
    assert_eq!(inserted.descriptor_string(), "([JZ)V");

    assert!(matches!(desc.parameter_type(3), Err(Error::IndexOutOfBounds { index: 3, length: 3 })));
    assert!(matches!(desc.drop_parameter_types(2, 1), Err(Error::IllegalArgument(_))));
    assert!(matches!(
        desc.insert_parameter_types(0, [descs::CD_VOID.clone()]),
        Err(Error::IllegalArgument(_))
    ));
    assert!(MethodTypeDesc::of_descriptor("(V)V").is_err());
    assert!(MethodTypeDesc::of_descriptor("()").is_err());
    Ok(())
}

#[test]
fn test_method_handles() -> Result<()> {
    let list = descs::CD_LIST.clone();
    let size = DirectMethodHandleDesc::of_method_descriptor(
        Kind::InterfaceVirtual,
        list.clone(),
        "size",
        "()I",
    )?;
    assert_eq!(size.ref_kind(), 9);
    assert!(size.is_owner_interface());
    assert_eq!(size.handle_type().descriptor_string(), "(Ljava/util/List;)I");

    let ctor = DirectMethodHandleDesc::of_constructor(descs::CD_OBJECT.clone(), Vec::new())?;
    assert_eq!(ctor.method_name(), "<init>");
    assert_eq!(ctor.lookup_descriptor(), "()V");
    assert_eq!(ctor.handle_type().descriptor_string(), "()Ljava/lang/Object;");

    let getter = DirectMethodHandleDesc::of_field(
        Kind::StaticGetter,
        descs::CD_INTEGER.clone(),
        "MAX_VALUE",
        descs::CD_INT.clone(),
    )?;
    assert_eq!(getter.field_type(), Some(&descs::CD_INT.clone()));
    assert_eq!(getter.lookup_descriptor(), "I");

    // Adapting to the handle's own type is the identity
    let same = getter.as_type(getter.invocation_type().clone());
    assert_eq!(same, MethodHandleDesc::Direct(getter.clone()));

    let adapted = getter.as_type(MethodTypeDesc::of_descriptor("()Ljava/lang/Object;")?);
    assert!(adapted.as_direct().is_none());
    assert_eq!(adapted.invocation_type().descriptor_string(), "()Ljava/lang/Object;");

    assert!(matches!(
        DirectMethodHandleDesc::of_method_descriptor(
            Kind::Constructor,
            list.clone(),
            "<init>",
            "()I",
        ),
        Err(Error::IllegalArgument(_))
    ));
    assert!(matches!(
        DirectMethodHandleDesc::of_method_descriptor(Kind::Static, list, "java.util", "()V"),
        Err(Error::InvalidName { .. })
    ));
    Ok(())
}

#[test]
fn test_kind_lookup() -> Result<()> {
    assert_eq!(Kind::value_of(9, true)?, Kind::InterfaceVirtual);
    assert_eq!(Kind::value_of(6, true)?, Kind::InterfaceStatic);
    assert_eq!(Kind::value_of(6, false)?, Kind::Static);
    // Falls back to the other interface flag when only one variant exists
    assert_eq!(Kind::value_of(1, true)?, Kind::Getter);
    assert_eq!(Kind::value_of(9, false)?, Kind::InterfaceVirtual);
    assert!(Kind::value_of(0, false).is_err());
    assert!(Kind::value_of(10, false).is_err());
    assert_eq!(Kind::from_name("STATIC_SETTER")?, Kind::StaticSetter);
    Ok(())
}

#[test]
fn test_canonicalization_lifts_known_bootstraps() -> Result<()> {
    let primitive = DynamicConstantDesc::of_name_and_type(
        descs::BSM_PRIMITIVE_CLASS.clone(),
        "J",
        descs::CD_CLASS.clone(),
    )?;
    let lifted = primitive.clone().try_canonicalize();
    assert_eq!(lifted, ConstantDesc::Class(descs::CD_LONG.clone()));
    assert_eq!(lifted, ConstantDesc::from(primitive.clone()));
    assert_eq!(hash_of(&lifted), hash_of(&ConstantDesc::from(primitive)));

    let color = ClassDesc::of("com.example.Color")?;
    let red = DynamicConstantDesc::of_canonical(
        descs::BSM_ENUM_CONSTANT.clone(),
        "RED",
        color.clone(),
        Vec::new(),
    )?;
    assert_eq!(red, ConstantDesc::Enum(EnumDesc::of(color, "RED")?));

    let null = DynamicConstantDesc::of_type(
        descs::BSM_NULL_CONSTANT.clone(),
        descs::CD_OBJECT.clone(),
    )
    .try_canonicalize();
    assert!(null.ptr_eq(&ConstantDesc::Dynamic(Arc::clone(&descs::NULL))));

    // Unknown bootstraps stay generic
    let custom = descs::of_constant_bootstrap(
        ClassDesc::of("com.example.Bootstraps")?,
        "make",
        descs::CD_OBJECT.clone(),
        Vec::new(),
    )?;
    let generic = DynamicConstantDesc::of_type(custom, descs::CD_OBJECT.clone());
    assert!(matches!(generic.try_canonicalize(), ConstantDesc::Dynamic(_)));
    Ok(())
}

#[test]
fn test_cross_variant_equality_in_sets() -> Result<()> {
    let point = ClassDesc::of("com.example.Point")?;
    let handle = VarHandleDesc::of_field(point.clone(), "x", descs::CD_INT.clone())?;
    let generic = handle.as_dynamic().clone();

    let mut set = HashSet::new();
    assert!(set.insert(ConstantDesc::from(handle)));
    assert!(!set.insert(ConstantDesc::from(generic)));
    let static_handle = VarHandleDesc::of_static_field(point, "x", descs::CD_INT.clone())?;
    assert!(set.insert(ConstantDesc::from(static_handle)));

    // Floats compare by bit pattern
    assert_eq!(ConstantDesc::Double(f64::NAN), ConstantDesc::Double(f64::NAN));
    assert_ne!(ConstantDesc::Float(0.0), ConstantDesc::Float(-0.0));
    assert_ne!(ConstantDesc::Int(1), ConstantDesc::Long(1));
    Ok(())
}

#[test]
fn test_self_description_round_trips() -> Result<()> {
    let color = ClassDesc::of("com.example.Color")?;
    let descriptors = vec![
        ConstantDesc::from(color.array_type()?),
        ConstantDesc::from(MethodTypeDesc::of_descriptor("(I[Ljava/lang/String;)V")?),
        ConstantDesc::from(DirectMethodHandleDesc::of_field(
            Kind::Setter,
            color.clone(),
            "ordinal",
            descs::CD_INT.clone(),
        )?),
        ConstantDesc::from(EnumDesc::of(color.clone(), "GREEN")?),
        ConstantDesc::from(VarHandleDesc::of_array(descs::CD_LONG.array_type()?)?),
        ConstantDesc::from(DynamicConstantDesc::of(
            descs::BSM_INVOKE.clone(),
            "sum",
            descs::CD_INT.clone(),
            vec![ConstantDesc::Int(1), ConstantDesc::from("two")],
        )?),
    ];

    for desc in descriptors {
        let description = desc
            .describe_constable()
            .unwrap_or_else(|| panic!("{desc} is not describable"));
        let dynamic = description
            .as_dynamic()
            .unwrap_or_else(|| panic!("{desc} was not described as a dynamic constant"));
        assert_eq!(bootstraps::rebuild(dynamic)?, desc);
    }

    // Literals describe themselves
    let literal = ConstantDesc::from("hello");
    assert_eq!(literal.describe_constable(), Some(literal));
    Ok(())
}

#[test]
fn test_display_forms() -> Result<()> {
    let point = ClassDesc::of("com.example.Point")?;
    assert_eq!(point.to_string(), "ClassDesc[Point]");
    assert_eq!(
        MethodTypeDesc::of_descriptor("(IJ)V")?.to_string(),
        "MethodTypeDesc[(int,long)void]"
    );
    assert_eq!(
        VarHandleDesc::of_static_field(point.clone(), "ORIGIN", point.clone())?.to_string(),
        "VarHandleDesc[static Point.ORIGIN:Point]"
    );
    assert_eq!(
        EnumDesc::of(ClassDesc::of("com.example.Color")?, "RED")?.to_string(),
        "EnumDesc[Color.RED]"
    );
    Ok(())
}
