//! Resolution configuration
//!
//! This module provides the options that control how descriptors are resolved: how deep
//! dynamic constants may nest, whether bootstrap signatures are checked before invocation, and
//! whether nested dynamic constants are canonicalized first.

/// Configuration for descriptor resolution
///
/// Every resolution entry point without an explicit configuration uses
/// [`ResolutionConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionConfig {
    /// Maximum nesting of dynamic constants among bootstrap arguments (default: 64)
    ///
    /// Exceeding it fails with [`crate::Error::RecursionLimit`].
    pub max_depth: usize,

    /// Check that a bootstrap takes a lookup and at least one more parameter before invoking it
    /// Mirrors the check a virtual machine performs when linking a dynamic constant
    pub check_bootstrap_signature: bool,

    /// Canonicalize nested dynamic constants before resolving them
    /// Lets well-known shapes, such as enum constants passed as bootstrap arguments, resolve
    /// through the context's dedicated lookups instead of their bootstrap
    pub canonicalize_arguments: bool,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            check_bootstrap_signature: true,
            canonicalize_arguments: false,
        }
    }
}

impl ResolutionConfig {
    /// Creates a strict configuration
    ///
    /// Checks every bootstrap signature and resolves arguments exactly as described, with a
    /// tighter nesting limit.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            check_bootstrap_signature: true,
            canonicalize_arguments: false,
        }
    }

    /// Creates a lenient configuration
    ///
    /// Leaves bootstrap signatures to the context and canonicalizes nested arguments.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_depth: 256,
            check_bootstrap_signature: false,
            canonicalize_arguments: true,
        }
    }

    /// The same configuration with a different nesting limit
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_config_presets() {
        let default = ResolutionConfig::default();
        assert_eq!(default.max_depth, 64);
        assert!(default.check_bootstrap_signature);
        assert!(!default.canonicalize_arguments);

        let strict = ResolutionConfig::strict();
        assert_eq!(strict.max_depth, 16);
        assert!(strict.check_bootstrap_signature);
        assert!(!strict.canonicalize_arguments);

        let lenient = ResolutionConfig::lenient();
        assert_eq!(lenient.max_depth, 256);
        assert!(!lenient.check_bootstrap_signature);
        assert!(lenient.canonicalize_arguments);
    }

    #[test]
    fn test_with_max_depth() {
        let config = ResolutionConfig::lenient().with_max_depth(3);
        assert_eq!(config.max_depth, 3);
        assert!(config.canonicalize_arguments);
        assert_ne!(config, ResolutionConfig::lenient());
    }
}
