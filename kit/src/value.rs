//! Value returned by generated constructor functions.

use core::fmt;

/// An error instance: which definition produced it, its severity and the
/// formatted message.
///
/// `K` is the generated id enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorValue<K> {
    pub id: K,
    pub severity: &'static str,
    pub message: String,
}

impl<K> ErrorValue<K> {
    pub fn new(id: K, severity: &'static str, message: impl Into<String>) -> Self {
        Self {
            id,
            severity,
            message: message.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> &K {
        &self.id
    }

    #[inline]
    pub fn severity(&self) -> &'static str {
        self.severity
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the severity is the given category, e.g. `"E"`.
    #[inline]
    pub fn is(&self, severity: &str) -> bool {
        self.severity == severity
    }
}

impl<K> fmt::Display for ErrorValue<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

impl<K: fmt::Debug> std::error::Error for ErrorValue<K> {}
