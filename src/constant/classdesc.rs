//! Nominal descriptor for a class, interface, array or primitive type.

use std::{fmt, sync::Arc};

use bitflags::bitflags;

use crate::{
    constant::{descs, DynamicConstantDesc},
    descriptor::{
        array_depth, binary_to_internal, internal_to_binary, parse_field_descriptor,
        validate_binary_class_name, validate_member_name, MAX_ARRAY_DIMENSIONS,
    },
    resolve::{AccessContext, Resolver},
    Result,
};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Shape classification of a field descriptor
    pub struct DescriptorFlags: u8 {
        /// One of the eight primitive types, or `void`
        const PRIMITIVE = 0x01;
        /// The `void` pseudo-type, only valid as a return type
        const VOID = 0x02;
        /// A class or interface type (`L...;`)
        const CLASS_OR_INTERFACE = 0x04;
        /// An array type (`[...`)
        const ARRAY = 0x08;
        /// `long` or `double`, occupying two local variable / stack slots
        const WIDE = 0x10;
    }
}

/// A nominal descriptor for a class, interface, array or primitive type.
///
/// A `ClassDesc` wraps exactly one field descriptor string and is compared and hashed by that
/// string alone. It never loads or looks up anything; to obtain the live class, resolve it
/// through an [`AccessContext`].
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::ClassDesc;
///
/// let string = ClassDesc::of("java.lang.String")?;
/// assert_eq!(string.descriptor_string(), "Ljava/lang/String;");
/// assert_eq!(string.package_name()?, "java.lang");
/// assert_eq!(string.display_name(), "String");
///
/// let matrix = string.array_type_of_rank(2)?;
/// assert_eq!(matrix.descriptor_string(), "[[Ljava/lang/String;");
/// assert_eq!(matrix.display_name(), "String[][]");
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassDesc {
    descriptor: Arc<str>,
}

impl ClassDesc {
    /// Create a `ClassDesc` from a binary class name, e.g. `java.lang.String`
    ///
    /// ## Arguments
    /// * 'binary_name' - Fully qualified, dot-separated class name
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] for an unacceptable name.
    pub fn of(binary_name: &str) -> Result<Self> {
        validate_binary_class_name(binary_name)?;
        Self::of_descriptor(&format!("L{};", binary_to_internal(binary_name)))
    }

    /// Create a `ClassDesc` from a package name and an unqualified class name
    ///
    /// An empty package name denotes the unnamed package.
    ///
    /// ## Arguments
    /// * 'package_name' - Dot-separated package name, possibly empty
    /// * 'class_name' - Simple class name without any package qualification
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidName`] if either part is not acceptable.
    pub fn of_package_and_simple_name(package_name: &str, class_name: &str) -> Result<Self> {
        validate_member_name(class_name)?;
        if package_name.is_empty() {
            return Self::of(class_name);
        }

        validate_binary_class_name(package_name)?;
        Self::of(&format!("{package_name}.{class_name}"))
    }

    /// Create a `ClassDesc` from a field descriptor string, e.g. `I` or `[Ljava/lang/Object;`
    ///
    /// `V` is accepted and yields the descriptor for `void`.
    ///
    /// ## Arguments
    /// * 'descriptor' - The field descriptor
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] if the string is not a field descriptor.
    pub fn of_descriptor(descriptor: &str) -> Result<Self> {
        parse_field_descriptor(descriptor)?;
        Ok(Self::from_validated(descriptor))
    }

    /// Wrap a descriptor that is already known to conform to the grammar
    pub(crate) fn from_validated(descriptor: &str) -> Self {
        debug_assert!(parse_field_descriptor(descriptor).is_ok(), "{descriptor}");
        ClassDesc {
            descriptor: Arc::from(descriptor),
        }
    }

    /// The field descriptor string of this type
    #[must_use]
    pub fn descriptor_string(&self) -> &str {
        &self.descriptor
    }

    /// Returns `true` for the eight primitive types and `void`
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.descriptor.len() == 1
    }

    /// Returns `true` for `void`
    #[must_use]
    pub fn is_void(&self) -> bool {
        &*self.descriptor == "V"
    }

    /// Returns `true` for array types
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.descriptor.starts_with('[')
    }

    /// Returns `true` for class and interface types
    #[must_use]
    pub fn is_class_or_interface(&self) -> bool {
        self.descriptor.starts_with('L')
    }

    /// Shape classification of this descriptor
    #[must_use]
    pub fn flags(&self) -> DescriptorFlags {
        match self.descriptor.as_bytes().first() {
            Some(b'[') => DescriptorFlags::ARRAY,
            Some(b'L') => DescriptorFlags::CLASS_OR_INTERFACE,
            Some(b'V') => DescriptorFlags::PRIMITIVE | DescriptorFlags::VOID,
            Some(b'J' | b'D') => DescriptorFlags::PRIMITIVE | DescriptorFlags::WIDE,
            _ => DescriptorFlags::PRIMITIVE,
        }
    }

    /// The descriptor for an array whose component type is this type
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] if the result would have too many dimensions,
    /// or [`crate::Error::MalformedDescriptor`] for `void`.
    pub fn array_type(&self) -> Result<Self> {
        self.array_type_of_rank(1)
    }

    /// The descriptor for an array of `rank` dimensions over this type
    ///
    /// ## Arguments
    /// * 'rank' - Number of dimensions to add, at least 1
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] for a rank below 1 or if the result would
    /// exceed the class-file limit of 255 dimensions, and
    /// [`crate::Error::MalformedDescriptor`] for an array of `void`.
    pub fn array_type_of_rank(&self, rank: i32) -> Result<Self> {
        let Ok(rank) = usize::try_from(rank) else {
            return Err(illegal_argument!("rank: {}", rank));
        };
        if rank == 0 {
            return Err(illegal_argument!("rank: {}", rank));
        }

        let current = array_depth(&self.descriptor);
        if current + rank > MAX_ARRAY_DIMENSIONS {
            return Err(illegal_argument!(
                "rank {} on {} exceeds the limit of {} array dimensions",
                rank,
                self.descriptor,
                MAX_ARRAY_DIMENSIONS
            ));
        }

        Self::of_descriptor(&format!("{}{}", "[".repeat(rank), self.descriptor))
    }

    /// The component type of an array type, `None` for non-arrays
    #[must_use]
    pub fn component_type(&self) -> Option<Self> {
        self.descriptor
            .strip_prefix('[')
            .map(ClassDesc::from_validated)
    }

    /// The descriptor of a member class nested in this class
    ///
    /// ## Arguments
    /// * 'inner_name' - Unqualified name of the nested class
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalState`] unless this is a class or interface type, or
    /// [`crate::Error::InvalidName`] for an unacceptable nested name.
    pub fn inner(&self, inner_name: &str) -> Result<Self> {
        self.inner_nested(inner_name, &[])
    }

    /// The descriptor of a class nested several levels deep in this class
    ///
    /// `Outer.inner_nested("A", &["B"])` describes `Outer$A$B`.
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalState`] unless this is a class or interface type, or
    /// [`crate::Error::InvalidName`] for an unacceptable nested name.
    pub fn inner_nested(&self, first: &str, more: &[&str]) -> Result<Self> {
        if !self.is_class_or_interface() {
            return Err(crate::Error::IllegalState(format!(
                "Outer class is not a class or interface type - {}",
                self.descriptor
            )));
        }

        let mut suffix = String::new();
        for name in std::iter::once(&first).chain(more) {
            validate_member_name(name)?;
            suffix.push('$');
            suffix.push_str(name);
        }

        let body = &self.descriptor[..self.descriptor.len() - 1];
        Self::of_descriptor(&format!("{body}{suffix};"))
    }

    /// The package of a class or interface type, in binary form (empty for the unnamed package)
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalState`] for primitive and array types.
    pub fn package_name(&self) -> Result<String> {
        let Some(internal) = self.internal_name() else {
            return Err(crate::Error::IllegalState(format!(
                "Not a class or interface type - {}",
                self.descriptor
            )));
        };

        Ok(internal
            .rfind('/')
            .map(|index| internal_to_binary(&internal[..index]))
            .unwrap_or_default())
    }

    /// The internal name of a class or interface type, e.g. `java/lang/String`
    #[must_use]
    pub fn internal_name(&self) -> Option<&str> {
        self.descriptor
            .strip_prefix('L')
            .and_then(|rest| rest.strip_suffix(';'))
    }

    /// A human-readable name: `int`, `String`, `Map$Entry`, `String[][]`
    #[must_use]
    pub fn display_name(&self) -> String {
        let depth = array_depth(&self.descriptor);
        let element = &self.descriptor[depth..];

        let mut name = match element.as_bytes().first() {
            Some(b'L') => {
                let internal = &element[1..element.len() - 1];
                internal
                    .rsplit('/')
                    .next()
                    .unwrap_or(internal)
                    .to_string()
            }
            Some(tag) => primitive_name(*tag).to_string(),
            None => String::new(),
        };
        name.push_str(&"[]".repeat(depth));
        name
    }

    /// Resolve this descriptor to a class under `context`
    ///
    /// # Errors
    /// Propagates the context's linkage error, typically [`crate::Error::ClassNotFound`].
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_class(self)
    }

    /// A dynamic constant that rebuilds this descriptor through the descriptor bootstraps
    #[must_use]
    pub fn describe_constable(&self) -> DynamicConstantDesc {
        DynamicConstantDesc::from_parts(
            descs::BSM_CLASSDESC.clone(),
            descs::DEFAULT_NAME,
            descs::CD_CLASS_DESC.clone(),
            vec![self.descriptor_string().into()],
        )
    }
}

/// Java keyword for a primitive type tag
pub(crate) fn primitive_name(tag: u8) -> &'static str {
    match tag {
        b'B' => "byte",
        b'C' => "char",
        b'D' => "double",
        b'F' => "float",
        b'I' => "int",
        b'J' => "long",
        b'S' => "short",
        b'Z' => "boolean",
        b'V' => "void",
        _ => "?",
    }
}

impl fmt::Display for ClassDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDesc[{}]", self.display_name())
    }
}

impl fmt::Debug for ClassDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDesc({})", self.descriptor)
    }
}
