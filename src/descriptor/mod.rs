//! Field and method descriptor grammar.
//!
//! This module implements the textual encoding that class files use to refer to types. It is
//! the lowest layer of the crate: pure functions with no state, used by every descriptor type
//! to validate its input before constructing anything.
//!
//! # Grammar
//!
//! ```text
//! FieldDescriptor  := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z'
//!                   | 'L' InternalName ';'
//!                   | '[' FieldDescriptor
//! MethodDescriptor := '(' FieldDescriptor* ')' ( FieldDescriptor | 'V' )
//! InternalName     := Segment ( '/' Segment )*
//! ```
//!
//! Segments are non-empty and contain none of `.`, `;`, `[` or `/`. An array descriptor may
//! carry at most [`MAX_ARRAY_DIMENSIONS`] leading `[`.
//!
//! # Names
//!
//! Besides descriptors, two kinds of names are validated here:
//! - binary class names (`java.lang.String`), see [`validate_binary_class_name`]
//! - unqualified member names (`valueOf`, `<init>`), see [`validate_member_name`]
//!
//! # Examples
//!
//! ```rust
//! use constdesc::descriptor::{parse_field_descriptor, parse_method_descriptor};
//!
//! assert!(parse_field_descriptor("[[Ljava/lang/Object;").is_ok());
//! assert!(parse_field_descriptor("Ljava.lang.Object;").is_err());
//!
//! let (params, ret) = parse_method_descriptor("(IJ)Ljava/lang/String;")?;
//! assert_eq!(params, vec!["I", "J"]);
//! assert_eq!(ret, "Ljava/lang/String;");
//! # Ok::<(), constdesc::Error>(())
//! ```

mod names;
mod parser;

pub use names::{
    binary_to_internal, internal_to_binary, validate_binary_class_name, validate_member_name,
    CLASS_INITIALIZER_NAME, CONSTRUCTOR_NAME,
};
pub use parser::{DescriptorParser, MAX_ARRAY_DIMENSIONS};

use crate::Result;

/// Parse a complete field descriptor.
///
/// `V` is accepted on its own, as `void` is a valid [`crate::constant::ClassDesc`] for method
/// return types. It is rejected as an array component.
///
/// ## Arguments
/// * 'descriptor' - The descriptor string, e.g. `[Ljava/lang/String;`
///
/// # Errors
/// Returns [`crate::Error::MalformedDescriptor`] if the input is not exactly one field descriptor.
pub fn parse_field_descriptor(descriptor: &str) -> Result<&str> {
    let mut parser = DescriptorParser::new(descriptor);
    let parsed = parser.parse_field_type(true)?;
    parser.expect_end()?;
    Ok(parsed)
}

/// Parse a complete method descriptor into parameter and return descriptor slices.
///
/// ## Arguments
/// * 'descriptor' - The descriptor string, e.g. `(I)Ljava/lang/Integer;`
///
/// # Errors
/// Returns [`crate::Error::MalformedDescriptor`] if the input is not exactly one method descriptor.
pub fn parse_method_descriptor(descriptor: &str) -> Result<(Vec<&str>, &str)> {
    DescriptorParser::new(descriptor).parse_method_descriptor()
}

/// Number of leading `[` of a (valid) field descriptor
#[must_use]
pub fn array_depth(descriptor: &str) -> usize {
    descriptor.bytes().take_while(|b| *b == b'[').count()
}
