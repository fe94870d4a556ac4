//! Nominal descriptor for a method type.

use std::{fmt, sync::Arc};

use crate::{
    constant::{descs, ClassDesc, DynamicConstantDesc},
    descriptor::parse_method_descriptor,
    resolve::{AccessContext, Resolver},
    Error, Result,
};

/// A nominal descriptor for a method type: an ordered parameter list plus a return type.
///
/// Parameters are never `void`; the return type may be. All transforms return new instances
/// and validate their indices first.
///
/// # Examples
///
/// ```rust
/// use constdesc::constant::{descs, MethodTypeDesc};
///
/// let mt = MethodTypeDesc::of(descs::CD_INT.clone(), [descs::CD_INT.clone()])?;
/// let widened = mt.insert_parameter_types(1, [descs::CD_LONG.clone()])?;
/// assert_eq!(widened.descriptor_string(), "(IJ)I");
/// assert_eq!(widened.display_descriptor(), "(int,long)int");
/// # Ok::<(), constdesc::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MethodTypeDesc {
    return_type: ClassDesc,
    params: Arc<[ClassDesc]>,
}

impl MethodTypeDesc {
    /// Create a `MethodTypeDesc` from its return type and parameter types
    ///
    /// ## Arguments
    /// * 'return_type' - The return type, may be `void`
    /// * 'params' - The parameter types in order, none may be `void`
    ///
    /// # Errors
    /// Returns [`Error::IllegalArgument`] if a parameter is `void`.
    pub fn of<I>(return_type: ClassDesc, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClassDesc>,
    {
        let params: Arc<[ClassDesc]> = params.into_iter().collect();
        check_parameters(&params)?;
        Ok(MethodTypeDesc {
            return_type,
            params,
        })
    }

    /// Create a `MethodTypeDesc` from a method descriptor string, e.g. `(I)Ljava/lang/String;`
    ///
    /// # Errors
    /// Returns [`Error::MalformedDescriptor`] if the string is not a method descriptor.
    pub fn of_descriptor(descriptor: &str) -> Result<Self> {
        let (params, ret) = parse_method_descriptor(descriptor)?;
        Ok(MethodTypeDesc {
            return_type: ClassDesc::from_validated(ret),
            params: params.into_iter().map(ClassDesc::from_validated).collect(),
        })
    }

    pub(crate) fn from_validated(return_type: ClassDesc, params: Vec<ClassDesc>) -> Self {
        debug_assert!(check_parameters(&params).is_ok());
        MethodTypeDesc {
            return_type,
            params: params.into(),
        }
    }

    /// The return type
    #[must_use]
    pub fn return_type(&self) -> &ClassDesc {
        &self.return_type
    }

    /// Number of parameters
    #[must_use]
    pub fn parameter_count(&self) -> usize {
        self.params.len()
    }

    /// The parameter type at `index`
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] if `index >= parameter_count()`.
    pub fn parameter_type(&self, index: usize) -> Result<&ClassDesc> {
        self.params.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            length: self.params.len(),
        })
    }

    /// The parameter types as an immutable view
    #[must_use]
    pub fn parameter_list(&self) -> &[ClassDesc] {
        &self.params
    }

    /// An owned copy of the parameter types
    #[must_use]
    pub fn parameter_array(&self) -> Vec<ClassDesc> {
        self.params.to_vec()
    }

    /// A method type identical to this one except for its return type
    #[must_use]
    pub fn change_return_type(&self, return_type: ClassDesc) -> Self {
        MethodTypeDesc {
            return_type,
            params: Arc::clone(&self.params),
        }
    }

    /// A method type identical to this one except for the parameter at `index`
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] for a bad index and [`Error::IllegalArgument`] for a
    /// `void` parameter.
    pub fn change_parameter_type(&self, index: usize, param_type: ClassDesc) -> Result<Self> {
        self.parameter_type(index)?;

        let mut params = self.params.to_vec();
        params[index] = param_type;
        Self::of(self.return_type.clone(), params)
    }

    /// A method type with the parameters in `start..end` removed
    ///
    /// ## Arguments
    /// * 'start' - Index of the first removed parameter, must be below `parameter_count()`
    /// * 'end' - Index after the last removed parameter, `start == end` removes nothing
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] if `start >= parameter_count()` or
    /// `end > parameter_count()`, and [`Error::IllegalArgument`] if `start > end`.
    pub fn drop_parameter_types(&self, start: usize, end: usize) -> Result<Self> {
        let length = self.params.len();
        if start >= length {
            return Err(Error::IndexOutOfBounds {
                index: start,
                length,
            });
        }
        if end > length {
            return Err(Error::IndexOutOfBounds { index: end, length });
        }
        if start > end {
            return Err(illegal_argument!("start {} > end {}", start, end));
        }

        let params = self.params[..start]
            .iter()
            .chain(&self.params[end..])
            .cloned()
            .collect();
        Ok(MethodTypeDesc {
            return_type: self.return_type.clone(),
            params,
        })
    }

    /// A method type with `param_types` inserted before the parameter at `position`
    ///
    /// # Errors
    /// Returns [`Error::IndexOutOfBounds`] if `position > parameter_count()` and
    /// [`Error::IllegalArgument`] for a `void` parameter.
    pub fn insert_parameter_types<I>(&self, position: usize, param_types: I) -> Result<Self>
    where
        I: IntoIterator<Item = ClassDesc>,
    {
        let length = self.params.len();
        if position > length {
            return Err(Error::IndexOutOfBounds {
                index: position,
                length,
            });
        }

        let params: Vec<ClassDesc> = self.params[..position]
            .iter()
            .cloned()
            .chain(param_types)
            .chain(self.params[position..].iter().cloned())
            .collect();
        Self::of(self.return_type.clone(), params)
    }

    /// The method descriptor string, `(<params>)<return>`
    #[must_use]
    pub fn descriptor_string(&self) -> String {
        let mut descriptor = String::with_capacity(2 + self.params.len() * 8);
        descriptor.push('(');
        for param in self.params.iter() {
            descriptor.push_str(param.descriptor_string());
        }
        descriptor.push(')');
        descriptor.push_str(self.return_type.descriptor_string());
        descriptor
    }

    /// A human-readable form using display names, e.g. `(int,String)void`
    #[must_use]
    pub fn display_descriptor(&self) -> String {
        let params: Vec<String> = self.params.iter().map(ClassDesc::display_name).collect();
        format!("({}){}", params.join(","), self.return_type.display_name())
    }

    /// Resolve this descriptor to a method type under `context`
    ///
    /// # Errors
    /// Propagates the context's linkage error for any unresolvable component type.
    pub fn resolve<C: AccessContext + ?Sized>(&self, context: &C) -> Result<C::Value> {
        Resolver::new(context).resolve_method_type(self)
    }

    /// A dynamic constant that rebuilds this descriptor through the descriptor bootstraps
    #[must_use]
    pub fn describe_constable(&self) -> DynamicConstantDesc {
        DynamicConstantDesc::from_parts(
            descs::BSM_METHODTYPEDESC.clone(),
            descs::DEFAULT_NAME,
            descs::CD_METHOD_TYPE_DESC.clone(),
            vec![self.descriptor_string().into()],
        )
    }
}

fn check_parameters(params: &[ClassDesc]) -> Result<()> {
    match params.iter().position(ClassDesc::is_void) {
        Some(index) => Err(illegal_argument!(
            "void parameter at index {} not permitted",
            index
        )),
        None => Ok(()),
    }
}

impl fmt::Display for MethodTypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodTypeDesc[{}]", self.display_descriptor())
    }
}

impl fmt::Debug for MethodTypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodTypeDesc({})", self.descriptor_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(descriptor: &str) -> ClassDesc {
        ClassDesc::of_descriptor(descriptor).unwrap()
    }

    #[test]
    fn test_of_descriptor() {
        let mt = MethodTypeDesc::of_descriptor("(ILjava/lang/String;[J)V").unwrap();
        assert_eq!(mt.parameter_count(), 3);
        assert_eq!(mt.parameter_type(1).unwrap(), &class("Ljava/lang/String;"));
        assert_eq!(mt.return_type(), &class("V"));
        assert_eq!(mt.descriptor_string(), "(ILjava/lang/String;[J)V");
        assert_eq!(mt.display_descriptor(), "(int,String,long[])void");
        assert_eq!(mt.to_string(), "MethodTypeDesc[(int,String,long[])void]");

        assert!(matches!(
            mt.parameter_type(3),
            Err(Error::IndexOutOfBounds {
                index: 3,
                length: 3
            })
        ));
        assert!(MethodTypeDesc::of_descriptor("(V)V").is_err());
        assert!(MethodTypeDesc::of_descriptor("I").is_err());
    }

    #[test]
    fn test_of_rejects_void_params() {
        assert!(matches!(
            MethodTypeDesc::of(class("V"), [class("I"), class("V")]),
            Err(Error::IllegalArgument(_))
        ));
        let mt = MethodTypeDesc::of(class("V"), Vec::new()).unwrap();
        assert_eq!(mt.descriptor_string(), "()V");
    }

    #[test]
    fn test_change_types() {
        let mt = MethodTypeDesc::of_descriptor("(IJ)I").unwrap();

        let changed = mt.change_return_type(class("V"));
        assert_eq!(changed.descriptor_string(), "(IJ)V");

        let changed = mt.change_parameter_type(1, class("D")).unwrap();
        assert_eq!(changed.descriptor_string(), "(ID)I");
        for i in 0..mt.parameter_count() {
            let changed = mt.change_parameter_type(i, class("Z")).unwrap();
            for j in 0..mt.parameter_count() {
                let expected = if i == j {
                    class("Z")
                } else {
                    mt.parameter_type(j).unwrap().clone()
                };
                assert_eq!(changed.parameter_type(j).unwrap(), &expected);
            }
        }

        assert!(matches!(
            mt.change_parameter_type(2, class("D")),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            mt.change_parameter_type(0, class("V")),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_drop_parameter_types() {
        let mt = MethodTypeDesc::of_descriptor("(IJDF)V").unwrap();

        assert_eq!(mt.drop_parameter_types(1, 3).unwrap().descriptor_string(), "(IF)V");
        assert_eq!(mt.drop_parameter_types(0, 4).unwrap().descriptor_string(), "()V");
        assert_eq!(mt.drop_parameter_types(2, 2).unwrap(), mt);

        for start in 0..mt.parameter_count() {
            for end in start..=mt.parameter_count() {
                let dropped = mt.drop_parameter_types(start, end).unwrap();
                assert_eq!(dropped.parameter_count(), mt.parameter_count() - (end - start));
                let mut expected = mt.parameter_array();
                expected.drain(start..end);
                assert_eq!(dropped.parameter_list(), expected.as_slice());
            }
        }

        assert!(matches!(
            mt.drop_parameter_types(4, 4),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            mt.drop_parameter_types(0, 5),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            mt.drop_parameter_types(3, 1),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_insert_parameter_types() {
        let mt = MethodTypeDesc::of(class("I"), [class("I")]).unwrap();
        let inserted = mt.insert_parameter_types(1, [class("J")]).unwrap();
        assert_eq!(inserted.descriptor_string(), "(IJ)I");

        let front = mt.insert_parameter_types(0, [class("Z"), class("B")]).unwrap();
        assert_eq!(front.descriptor_string(), "(ZBI)I");

        assert!(matches!(
            mt.insert_parameter_types(2, [class("J")]),
            Err(Error::IndexOutOfBounds { .. })
        ));
        assert!(matches!(
            mt.insert_parameter_types(0, [class("V")]),
            Err(Error::IllegalArgument(_))
        ));
    }

    #[test]
    fn test_parameter_array_is_a_copy() {
        let mt = MethodTypeDesc::of_descriptor("(IJ)V").unwrap();
        let mut copy = mt.parameter_array();
        copy.clear();
        assert_eq!(mt.parameter_count(), 2);
    }
}
