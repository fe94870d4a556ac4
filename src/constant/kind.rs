//! Method handle kinds and reference kinds.

use std::sync::LazyLock;

use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, FromRepr, IntoEnumIterator};

use crate::Result;

/// The `reference_kind` tag of a `CONSTANT_MethodHandle` constant pool entry
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumIter, EnumCount, FromRepr, Display)]
#[allow(missing_docs)]
pub enum ReferenceKind {
    #[strum(serialize = "REF_getField")]
    GetField = 1,
    #[strum(serialize = "REF_getStatic")]
    GetStatic = 2,
    #[strum(serialize = "REF_putField")]
    PutField = 3,
    #[strum(serialize = "REF_putStatic")]
    PutStatic = 4,
    #[strum(serialize = "REF_invokeVirtual")]
    InvokeVirtual = 5,
    #[strum(serialize = "REF_invokeStatic")]
    InvokeStatic = 6,
    #[strum(serialize = "REF_invokeSpecial")]
    InvokeSpecial = 7,
    #[strum(serialize = "REF_newInvokeSpecial")]
    NewInvokeSpecial = 8,
    #[strum(serialize = "REF_invokeInterface")]
    InvokeInterface = 9,
}

/// The kind of a direct method handle
///
/// Each kind maps to one reference kind plus a flag telling whether the owner is an interface.
/// Names print and parse in the upper snake case used in class files and tooling
/// (`INTERFACE_VIRTUAL`).
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Debug,
    Hash,
    EnumIter,
    EnumCount,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Kind {
    /// A static method of a class
    Static,
    /// A static method of an interface
    InterfaceStatic,
    /// A virtual method of a class
    Virtual,
    /// An abstract or default method of an interface
    InterfaceVirtual,
    /// A method of a class, invoked without virtual dispatch
    Special,
    /// A method of an interface, invoked without virtual dispatch
    InterfaceSpecial,
    /// A constructor
    Constructor,
    /// An instance field read
    Getter,
    /// An instance field write
    Setter,
    /// A static field read
    StaticGetter,
    /// A static field write
    StaticSetter,
}

/// Lookup table indexed by `ref_kind * 2 + is_interface`
static KIND_TABLE: LazyLock<[Option<Kind>; 20]> = LazyLock::new(|| {
    let mut table = [None; 20];
    for kind in Kind::iter() {
        table[kind.table_index()] = Some(kind);
    }

    // Entries no kind occupies fall back to the entry with the interface bit flipped
    for index in 2..table.len() {
        if table[index].is_none() {
            table[index] = table[index ^ 1];
        }
    }
    table
});

impl Kind {
    /// The reference kind this handle kind is encoded with
    #[must_use]
    pub const fn reference_kind(self) -> ReferenceKind {
        match self {
            Kind::Static | Kind::InterfaceStatic => ReferenceKind::InvokeStatic,
            Kind::Virtual => ReferenceKind::InvokeVirtual,
            Kind::InterfaceVirtual => ReferenceKind::InvokeInterface,
            Kind::Special | Kind::InterfaceSpecial => ReferenceKind::InvokeSpecial,
            Kind::Constructor => ReferenceKind::NewInvokeSpecial,
            Kind::Getter => ReferenceKind::GetField,
            Kind::Setter => ReferenceKind::PutField,
            Kind::StaticGetter => ReferenceKind::GetStatic,
            Kind::StaticSetter => ReferenceKind::PutStatic,
        }
    }

    /// The numeric reference kind tag, 1 through 9
    #[must_use]
    pub const fn ref_kind(self) -> u8 {
        self.reference_kind() as u8
    }

    /// Returns `true` if the owner of this kind of member is an interface
    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(
            self,
            Kind::InterfaceStatic | Kind::InterfaceVirtual | Kind::InterfaceSpecial
        )
    }

    /// Returns `true` for the four field accessor kinds
    #[must_use]
    pub const fn is_field_accessor(self) -> bool {
        matches!(
            self,
            Kind::Getter | Kind::Setter | Kind::StaticGetter | Kind::StaticSetter
        )
    }

    /// Returns `true` for kinds that do not take a receiver
    #[must_use]
    pub const fn is_static(self) -> bool {
        matches!(
            self,
            Kind::Static | Kind::InterfaceStatic | Kind::StaticGetter | Kind::StaticSetter
        )
    }

    fn table_index(self) -> usize {
        usize::from(self.ref_kind()) * 2 + usize::from(self.is_interface())
    }

    /// Find the kind for a reference kind tag, assuming a non-interface owner
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] for tags outside 1 through 9.
    pub fn from_reference_kind(ref_kind: u8) -> Result<Kind> {
        Self::value_of(ref_kind, false)
    }

    /// Find the kind for a reference kind tag and owner interface flag
    ///
    /// Combinations no kind is defined for resolve to the kind with the interface flag
    /// flipped, so `(REF_invokeInterface, false)` yields [`Kind::InterfaceVirtual`] and
    /// `(REF_getField, true)` yields [`Kind::Getter`].
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] for tags outside 1 through 9.
    pub fn value_of(ref_kind: u8, is_interface: bool) -> Result<Kind> {
        let index = usize::from(ref_kind) * 2 + usize::from(is_interface);
        KIND_TABLE
            .get(index)
            .copied()
            .flatten()
            .ok_or_else(|| illegal_argument!("refKind={}", ref_kind))
    }

    /// Parse a kind from its upper snake case name, e.g. `INTERFACE_STATIC`
    ///
    /// # Errors
    /// Returns [`crate::Error::IllegalArgument`] for unknown names.
    pub fn from_name(name: &str) -> Result<Kind> {
        name.parse()
            .map_err(|_| illegal_argument!("unknown method handle kind '{}'", name))
    }
}
