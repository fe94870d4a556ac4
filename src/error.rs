use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::MalformedDescriptor {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedDescriptor {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! illegal_argument {
    ($msg:expr) => {
        crate::Error::IllegalArgument($msg.to_string())
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::IllegalArgument(format!($fmt, $($arg)*))
    };
}

macro_rules! invalid_name {
    ($name:expr, $reason:expr) => {
        crate::Error::InvalidName {
            name: $name.to_string(),
            reason: $reason,
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The variants fall into two groups. Construction-time errors are raised while a descriptor
/// is being built and always leave the caller without a (partially) constructed value.
/// Resolution-time errors are raised while a descriptor is turned into a live value through an
/// [`crate::resolve::AccessContext`], and mirror the linkage errors a virtual machine would
/// report.
///
/// # Error Categories
///
/// ## Construction Errors
/// - [`Error::MalformedDescriptor`] - A field or method descriptor string violates the grammar
/// - [`Error::InvalidName`] - A binary class name or member name is not acceptable
/// - [`Error::IllegalArgument`] - Kind/shape mismatch, bad array rank, bad arity
/// - [`Error::IllegalState`] - Operation not applicable to the shape of this descriptor
/// - [`Error::IndexOutOfBounds`] - Parameter index or range outside the parameter list
///
/// ## Linkage Errors
/// - [`Error::ClassNotFound`] - The access context cannot see or load a class
/// - [`Error::NoSuchMember`] - The owner exists, but has no matching field or method
/// - [`Error::IllegalAccess`] - The member exists, but is not accessible from the lookup class
/// - [`Error::IncompatibleClassChange`] - Static member used as instance member, or vice versa
/// - [`Error::BootstrapMethod`] - A bootstrap method failed, or is not shaped like one
///
/// ## Other
/// - [`Error::RecursionLimit`] - Nested dynamic constants exceeded the configured depth
/// - [`Error::Error`] - Free-form failure raised by user code, e.g. a bootstrap body
///
/// # Examples
///
/// ```rust
/// use constdesc::{Error, constant::ClassDesc};
///
/// match ClassDesc::of_descriptor("Ljava.lang.String;") {
///     Ok(_) => unreachable!(),
///     Err(Error::MalformedDescriptor { message, .. }) => println!("rejected: {}", message),
///     Err(e) => println!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    // Construction Errors
    /// A descriptor string could not be parsed.
    ///
    /// Raised by the field and method descriptor grammar. The error records the source
    /// location where the violation was detected.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed descriptor - {file}:{line}: {message}")]
    MalformedDescriptor {
        /// The message to be printed for the MalformedDescriptor error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A binary class name or an unqualified member name was rejected.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why the name was rejected
        reason: &'static str,
    },

    /// An argument was well-formed on its own, but not acceptable for this operation.
    #[error("Illegal argument - {0}")]
    IllegalArgument(String),

    /// The operation is not applicable to the shape of this descriptor.
    #[error("Illegal state - {0}")]
    IllegalState(String),

    /// A parameter index or range does not fit the parameter list.
    #[error("Index {index} out of bounds for length {length}")]
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// The length of the list that was indexed
        length: usize,
    },

    // Linkage Errors
    /// The access context could not find, or is not allowed to see, the described class.
    #[error("Class not found - {0}")]
    ClassNotFound(String),

    /// The owner was found, but has no member with the requested name and type.
    #[error("No such member - {owner}.{name}:{descriptor}")]
    NoSuchMember {
        /// Descriptor string of the owner class
        owner: String,
        /// Name of the missing member
        name: String,
        /// Method or field descriptor that was looked up
        descriptor: String,
    },

    /// The member exists, but is not accessible from the lookup class.
    #[error("Illegal access - {0}")]
    IllegalAccess(String),

    /// A member was found, but has the wrong kind (e.g. static accessed as instance).
    #[error("Incompatible class change - {0}")]
    IncompatibleClassChange(String),

    /// A bootstrap method failed, or its declared type is not usable as a bootstrap.
    ///
    /// Non-linkage failures raised while computing a dynamic constant or call site are
    /// wrapped in this variant, with the original failure available through
    /// [`std::error::Error::source`].
    #[error("Bootstrap method error - {message}")]
    BootstrapMethod {
        /// Description of the failing bootstrap
        message: String,
        /// The failure raised by the bootstrap, if any
        #[source]
        source: Option<Box<Error>>,
    },

    // Other
    /// Recursion limit reached.
    ///
    /// Dynamic constants may nest other dynamic constants as bootstrap arguments. The resolver
    /// bounds the nesting depth; this error carries the limit that was exceeded.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Generic error for miscellaneous failures.
    ///
    /// Access contexts and bootstrap bodies use this variant for failures that are not part of
    /// the linkage taxonomy. During dynamic constant resolution it is wrapped into
    /// [`Error::BootstrapMethod`].
    #[error("{0}")]
    Error(String),
}

impl Error {
    /// Returns `true` for errors that mirror a VM linkage error.
    ///
    /// Linkage errors propagate through bootstrap invocation unwrapped; every other failure is
    /// wrapped into [`Error::BootstrapMethod`].
    #[must_use]
    pub fn is_linkage(&self) -> bool {
        matches!(
            self,
            Error::ClassNotFound(_)
                | Error::NoSuchMember { .. }
                | Error::IllegalAccess(_)
                | Error::IncompatibleClassChange(_)
                | Error::BootstrapMethod { .. }
        )
    }

    /// Returns `true` if the failure depends on the access context that was used.
    ///
    /// A class that cannot be seen, or a member that cannot be accessed, may resolve fine under
    /// a different lookup class. Every other error means the descriptor itself is unusable.
    #[must_use]
    pub fn is_context_dependent(&self) -> bool {
        matches!(self, Error::ClassNotFound(_) | Error::IllegalAccess(_))
    }

    /// Returns `true` if this error was raised while constructing a descriptor.
    #[must_use]
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Error::MalformedDescriptor { .. }
                | Error::InvalidName { .. }
                | Error::IllegalArgument(_)
                | Error::IllegalState(_)
                | Error::IndexOutOfBounds { .. }
        )
    }
}
