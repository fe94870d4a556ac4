use crate::Result;

/// Special member name of instance initializers
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Special member name of the class initializer
pub const CLASS_INITIALIZER_NAME: &str = "<clinit>";

/// Check a class name in internal (slash-separated) form, as found between `L` and `;`.
///
/// Returns the reason for rejection, which callers fold into their own error.
pub(crate) fn check_internal_name(name: &str) -> std::result::Result<(), &'static str> {
    if name.is_empty() {
        return Err("empty class name");
    }
    if name.contains(['.', ';', '[']) {
        return Err("class name contains '.', ';' or '['");
    }
    if name.split('/').any(str::is_empty) {
        return Err("empty package or class segment");
    }
    Ok(())
}

/// Validate an unqualified member name (method or field).
///
/// Member names must be non-empty and must not contain `.`, `;`, `[` or `/`. Angle brackets
/// are only allowed as part of the two special method names `<init>` and `<clinit>`.
///
/// ## Arguments
/// * 'name' - The member name to check
///
/// # Errors
/// Returns [`crate::Error::InvalidName`] if the name is not acceptable.
pub fn validate_member_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(invalid_name!(name, "zero-length member name"));
    }
    if name == CONSTRUCTOR_NAME || name == CLASS_INITIALIZER_NAME {
        return Ok(name);
    }
    if name.contains(['.', ';', '[', '/']) {
        return Err(invalid_name!(
            name,
            "member name contains '.', ';', '[' or '/'"
        ));
    }
    if name.contains(['<', '>']) {
        return Err(invalid_name!(name, "member name contains '<' or '>'"));
    }
    Ok(name)
}

/// Validate a binary (dot-separated) class name such as `java.lang.String`.
///
/// Binary names must be non-empty, must not contain `/`, `;` or `[`, and must not have empty
/// segments between dots.
///
/// ## Arguments
/// * 'name' - The binary class name to check
///
/// # Errors
/// Returns [`crate::Error::InvalidName`] if the name is not acceptable.
pub fn validate_binary_class_name(name: &str) -> Result<&str> {
    if name.is_empty() {
        return Err(invalid_name!(name, "zero-length class name"));
    }
    if name.contains(['/', ';', '[']) {
        return Err(invalid_name!(name, "binary class name contains '/', ';' or '['"));
    }
    if name.split('.').any(str::is_empty) {
        return Err(invalid_name!(name, "empty package or class segment"));
    }
    Ok(name)
}

/// Convert a binary class name (`java.lang.String`) to internal form (`java/lang/String`)
#[must_use]
pub fn binary_to_internal(name: &str) -> String {
    name.replace('.', "/")
}

/// Convert an internal class name (`java/lang/String`) to binary form (`java.lang.String`)
#[must_use]
pub fn internal_to_binary(name: &str) -> String {
    name.replace('/', ".")
}
