//! Registry of well-known bootstraps and their canonical descriptor forms.

use std::sync::Arc;

use strum::{EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::constant::{
    descs, ClassDesc, ConstantDesc, DirectMethodHandleDesc, DynamicConstantDesc, EnumDesc,
    VarHandleDesc,
};

/// A bootstrap whose dynamic constants have a more specific descriptor form
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter)]
pub(crate) enum CanonicalBootstrap {
    NullConstant,
    PrimitiveClass,
    EnumConstant,
    StaticFieldVarHandle,
    FieldVarHandle,
    ArrayVarHandle,
}

impl CanonicalBootstrap {
    fn bootstrap(self) -> &'static DirectMethodHandleDesc {
        match self {
            CanonicalBootstrap::NullConstant => &*descs::BSM_NULL_CONSTANT,
            CanonicalBootstrap::PrimitiveClass => &*descs::BSM_PRIMITIVE_CLASS,
            CanonicalBootstrap::EnumConstant => &*descs::BSM_ENUM_CONSTANT,
            CanonicalBootstrap::StaticFieldVarHandle => &*descs::BSM_VARHANDLE_STATIC_FIELD,
            CanonicalBootstrap::FieldVarHandle => &*descs::BSM_VARHANDLE_FIELD,
            CanonicalBootstrap::ArrayVarHandle => &*descs::BSM_VARHANDLE_ARRAY,
        }
    }

    /// Find the registry entry for a bootstrap, compared structurally
    pub(crate) fn lookup(bootstrap: &DirectMethodHandleDesc) -> Option<Self> {
        Self::iter().find(|entry| entry.bootstrap() == bootstrap)
    }

    /// Lift `desc` to the canonical form, or hand it back in generic form
    pub(crate) fn canonicalize(self, desc: DynamicConstantDesc) -> ConstantDesc {
        // The lifted form must describe the same invocation, otherwise equality would break
        let lifted = self
            .lift(&desc)
            .filter(|lifted| lifted.dynamic_form().is_some_and(|form| *form == desc));

        match lifted {
            Some(lifted) => {
                debug!(
                    entry = ?self,
                    constant = %desc,
                    "lifted dynamic constant to canonical form"
                );
                lifted
            }
            None => {
                debug!(entry = ?self, constant = %desc, "dynamic constant kept in generic form");
                ConstantDesc::Dynamic(Arc::new(desc))
            }
        }
    }

    fn lift(self, desc: &DynamicConstantDesc) -> Option<ConstantDesc> {
        let args = desc.bootstrap_args();
        match self {
            CanonicalBootstrap::NullConstant => args
                .is_empty()
                .then(|| ConstantDesc::Dynamic(Arc::clone(&descs::NULL))),
            CanonicalBootstrap::PrimitiveClass => {
                if !args.is_empty() || desc.constant_type() != &*descs::CD_CLASS {
                    return None;
                }
                let class = ClassDesc::of_descriptor(desc.constant_name()).ok()?;
                class.is_primitive().then_some(ConstantDesc::Class(class))
            }
            CanonicalBootstrap::EnumConstant => {
                if !args.is_empty() {
                    return None;
                }
                EnumDesc::of(desc.constant_type().clone(), desc.constant_name())
                    .ok()
                    .map(ConstantDesc::Enum)
            }
            CanonicalBootstrap::StaticFieldVarHandle | CanonicalBootstrap::FieldVarHandle => {
                let [
                    ConstantDesc::Class(owner),
                    ConstantDesc::String(name),
                    ConstantDesc::Class(field_type),
                ] = args
                else {
                    return None;
                };
                if desc.constant_type() != &*descs::CD_VAR_HANDLE {
                    return None;
                }

                let handle = if self == CanonicalBootstrap::StaticFieldVarHandle {
                    VarHandleDesc::of_static_field(owner.clone(), name, field_type.clone())
                } else {
                    VarHandleDesc::of_field(owner.clone(), name, field_type.clone())
                };
                handle.ok().map(ConstantDesc::VarHandle)
            }
            CanonicalBootstrap::ArrayVarHandle => {
                let [ConstantDesc::Class(array)] = args else {
                    return None;
                };
                if desc.constant_type() != &*descs::CD_VAR_HANDLE {
                    return None;
                }
                VarHandleDesc::of_array(array.clone())
                    .ok()
                    .map(ConstantDesc::VarHandle)
            }
        }
    }
}
