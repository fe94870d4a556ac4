use crate::{descriptor::names::check_internal_name, Result};

/// Maximum number of array dimensions a field descriptor may carry
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Parser for field and method descriptor strings
///
/// The parser walks the input byte by byte and hands out sub-slices of the original string,
/// one per parsed field type. All structural bytes of the grammar (`(`, `)`, `[`, `L`, `;`,
/// `/`) are ASCII, so slicing at their positions always lands on a character boundary.
///
/// # Example
///
/// ```rust
/// use constdesc::descriptor::DescriptorParser;
///
/// let mut parser = DescriptorParser::new("(I[Ljava/lang/String;)V");
/// let (params, ret) = parser.parse_method_descriptor().unwrap();
/// assert_eq!(params, vec!["I", "[Ljava/lang/String;"]);
/// assert_eq!(ret, "V");
/// ```
///
/// ## Notes:
/// - The grammar follows the field and method descriptor productions of the class-file format.
/// - A parser instance is meant for a single descriptor; use the wrapper functions in
///   [`crate::descriptor`] unless you need the position of a failure.
pub struct DescriptorParser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> DescriptorParser<'a> {
    /// Create a new `DescriptorParser` over a descriptor string
    ///
    /// ## Arguments
    /// * 'input' - The descriptor string to read from
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        DescriptorParser { input, position: 0 }
    }

    /// Current byte offset into the input
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns `true` once the whole input has been consumed
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn next(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position += 1;
        Some(byte)
    }

    /// Parse one field type at the current position and return its descriptor slice
    ///
    /// ## Arguments
    /// * 'allow_void' - Accept a bare `V`, which is only legal as a method return type
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] on an unknown type tag, an unterminated or
    /// invalid class name, `void` in a disallowed position, or more than
    /// [`MAX_ARRAY_DIMENSIONS`] array dimensions.
    pub fn parse_field_type(&mut self, allow_void: bool) -> Result<&'a str> {
        let start = self.position;

        let mut dimensions = 0;
        while self.peek() == Some(b'[') {
            dimensions += 1;
            self.position += 1;
        }
        if dimensions > MAX_ARRAY_DIMENSIONS {
            return Err(malformed_error!(
                "Array descriptor with {} dimensions exceeds the limit of {} - {}",
                dimensions,
                MAX_ARRAY_DIMENSIONS,
                self.input
            ));
        }

        match self.next() {
            None => Err(malformed_error!(
                "Unexpected end of descriptor at offset {} - {}",
                self.position,
                self.input
            )),
            Some(b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z') => {
                Ok(&self.input[start..self.position])
            }
            Some(b'V') => {
                if dimensions > 0 {
                    return Err(malformed_error!("Array of void - {}", self.input));
                }
                if !allow_void {
                    return Err(malformed_error!(
                        "Void is only allowed as a return type - {}",
                        self.input
                    ));
                }
                Ok(&self.input[start..self.position])
            }
            Some(b'L') => {
                let rest = &self.input[self.position..];
                let Some(length) = rest.find(';') else {
                    return Err(malformed_error!(
                        "Class descriptor is missing its terminating ';' - {}",
                        self.input
                    ));
                };

                let internal_name = &rest[..length];
                if let Err(reason) = check_internal_name(internal_name) {
                    return Err(malformed_error!(
                        "Invalid class name '{}' ({}) - {}",
                        internal_name,
                        reason,
                        self.input
                    ));
                }

                self.position += length + 1;
                Ok(&self.input[start..self.position])
            }
            Some(other) => Err(malformed_error!(
                "Invalid type tag '{}' at offset {} - {}",
                char::from(other),
                self.position - 1,
                self.input
            )),
        }
    }

    /// Parse a complete method descriptor, `(params...)return`
    ///
    /// Returns the parameter descriptor slices in order, and the return descriptor slice.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] if the input is not exactly one method
    /// descriptor.
    pub fn parse_method_descriptor(&mut self) -> Result<(Vec<&'a str>, &'a str)> {
        if self.next() != Some(b'(') {
            return Err(malformed_error!(
                "Method descriptor must start with '(' - {}",
                self.input
            ));
        }

        let mut params = Vec::new();
        loop {
            match self.peek() {
                Some(b')') => {
                    self.position += 1;
                    break;
                }
                None => {
                    return Err(malformed_error!(
                        "Method descriptor is missing ')' - {}",
                        self.input
                    ))
                }
                Some(_) => params.push(self.parse_field_type(false)?),
            }
        }

        let ret = self.parse_field_type(true)?;
        self.expect_end()?;
        Ok((params, ret))
    }

    /// Fail unless the whole input has been consumed
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedDescriptor`] describing the trailing bytes.
    pub fn expect_end(&self) -> Result<()> {
        if self.is_done() {
            Ok(())
        } else {
            Err(malformed_error!(
                "Trailing characters '{}' after descriptor - {}",
                &self.input[self.position..],
                self.input
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn field(input: &str) -> Result<&str> {
        let mut parser = DescriptorParser::new(input);
        let parsed = parser.parse_field_type(true)?;
        parser.expect_end()?;
        Ok(parsed)
    }

    #[test]
    fn test_primitives() {
        for tag in ["B", "C", "D", "F", "I", "J", "S", "Z", "V"] {
            assert_eq!(field(tag).unwrap(), tag);
        }
        assert!(field("Q").is_err());
        assert!(field("").is_err());
    }

    #[test]
    fn test_class_types() {
        assert_eq!(field("Ljava/lang/String;").unwrap(), "Ljava/lang/String;");
        assert_eq!(field("LFoo;").unwrap(), "LFoo;");
        assert_eq!(field("Lfoo/Bar$Baz;").unwrap(), "Lfoo/Bar$Baz;");

        for bad in [
            "L;",
            "Ljava/lang/String",
            "Ljava.lang.String;",
            "Ljava/lang/String;;",
            "Lfoo//Bar;",
            "L/Foo;",
            "Lfoo/;",
            "L[I;",
        ] {
            assert!(
                matches!(field(bad), Err(Error::MalformedDescriptor { .. })),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn test_arrays() {
        assert_eq!(field("[I").unwrap(), "[I");
        assert_eq!(field("[[Ljava/lang/Object;").unwrap(), "[[Ljava/lang/Object;");
        assert!(field("[V").is_err());
        assert!(field("[").is_err());

        let deepest = format!("{}I", "[".repeat(MAX_ARRAY_DIMENSIONS));
        assert!(field(&deepest).is_ok());
        let too_deep = format!("{}I", "[".repeat(MAX_ARRAY_DIMENSIONS + 1));
        assert!(field(&too_deep).is_err());
    }

    #[test]
    fn test_void_position() {
        let mut parser = DescriptorParser::new("V");
        assert!(parser.parse_field_type(false).is_err());
    }

    #[test]
    fn test_method_descriptors() {
        let mut parser = DescriptorParser::new("()V");
        let (params, ret) = parser.parse_method_descriptor().unwrap();
        assert!(params.is_empty());
        assert_eq!(ret, "V");

        let mut parser = DescriptorParser::new("(IJLjava/lang/String;[[D)Ljava/lang/Object;");
        let (params, ret) = parser.parse_method_descriptor().unwrap();
        assert_eq!(params, vec!["I", "J", "Ljava/lang/String;", "[[D"]);
        assert_eq!(ret, "Ljava/lang/Object;");
        assert!(parser.is_done());

        for bad in ["", "V", "(V)V", "(I", "(I)", "()VV", "I)V", "()", "(Ljava/lang/String)V"] {
            let mut parser = DescriptorParser::new(bad);
            assert!(parser.parse_method_descriptor().is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn test_unicode_class_names() {
        assert_eq!(field("Lpkg/Größe;").unwrap(), "Lpkg/Größe;");
        let mut parser = DescriptorParser::new("(Lé;)Lü;");
        let (params, ret) = parser.parse_method_descriptor().unwrap();
        assert_eq!(params, vec!["Lé;"]);
        assert_eq!(ret, "Lü;");
    }
}
