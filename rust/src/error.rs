//! Error handling and result types for RbTree operations.
//!
//! Structural misuse (stale handles, dereferencing the end position) never
//! causes memory unsafety. The infallible API answers it with `None` or a
//! no-op; the `try_*` entry points report it through [`RbTreeError`].

use log::warn;

use crate::types::NodeId;

/// Error type for red-black tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum RbTreeError {
    /// Key not found in the tree.
    KeyNotFound,
    /// A handle does not refer to a live element of this tree.
    InvalidHandle(String),
    /// Internal data structure integrity violation.
    DataIntegrityError(String),
    /// Arena operation failed.
    ArenaError(String),
    /// Red-black or linkage corruption detected.
    CorruptedTree(String),
    /// Memory allocation failed.
    AllocationError(String),
}

impl RbTreeError {
    /// Create an InvalidHandle error for a node id
    pub fn invalid_handle(operation: &str, id: NodeId) -> Self {
        Self::InvalidHandle(format!("{} called with handle {} which is not a live element", operation, id))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create an ArenaError with context
    pub fn arena_error(operation: &str, details: &str) -> Self {
        Self::ArenaError(format!("{} failed: {}", operation, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Create an AllocationError with context
    pub fn allocation_error(resource: &str, reason: &str) -> Self {
        Self::AllocationError(format!("Failed to allocate {}: {}", resource, reason))
    }

    /// Check if this error is an allocation error
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationError(_))
    }

    /// Check if this error reports a broken red-black invariant
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptedTree(_) | Self::DataIntegrityError(_))
    }
}

impl std::fmt::Display for RbTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RbTreeError::KeyNotFound => write!(f, "Key not found in tree"),
            RbTreeError::InvalidHandle(msg) => write!(f, "Invalid handle: {}", msg),
            RbTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            RbTreeError::ArenaError(msg) => write!(f, "Arena error: {}", msg),
            RbTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
            RbTreeError::AllocationError(msg) => write!(f, "Allocation error: {}", msg),
        }
    }
}

impl std::error::Error for RbTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, RbTreeError>;

/// Public result type for tree operations that may fail
pub type RbTreeResult<T> = Result<T, RbTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, RbTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, RbTreeError>;

/// Result extension trait for improved error handling
pub trait RbTreeResultExt<T> {
    /// Convert to an RbTreeResult with additional context
    fn with_context(self, context: &str) -> RbTreeResult<T>;

    /// Convert to an RbTreeResult with operation context
    fn with_operation(self, operation: &str) -> RbTreeResult<T>;

    /// Log error and continue with default value
    fn or_default_with_log(self) -> T
    where
        T: Default;
}

impl<T> RbTreeResultExt<T> for Result<T, RbTreeError> {
    fn with_context(self, context: &str) -> RbTreeResult<T> {
        self.map_err(|e| match e {
            RbTreeError::KeyNotFound => RbTreeError::KeyNotFound,
            RbTreeError::InvalidHandle(msg) => {
                RbTreeError::InvalidHandle(format!("{}: {}", context, msg))
            }
            RbTreeError::DataIntegrityError(msg) => RbTreeError::data_integrity(context, &msg),
            RbTreeError::ArenaError(msg) => RbTreeError::arena_error(context, &msg),
            RbTreeError::CorruptedTree(msg) => RbTreeError::corrupted_tree(context, &msg),
            RbTreeError::AllocationError(msg) => RbTreeError::allocation_error(context, &msg),
        })
    }

    fn with_operation(self, operation: &str) -> RbTreeResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }

    fn or_default_with_log(self) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                warn!("red-black tree operation failed, using default: {}", e);
                T::default()
            }
        }
    }
}
