//! Error handling and result types for UnrolledList operations.
//!
//! Mutations can only fail by running out of node storage. The remaining
//! variants are produced by the invariant checker in `validation.rs`.

/// Error type for unrolled list operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// Node storage could not be allocated.
    AllocationError(String),
    /// Element counts disagree with the recorded list size.
    DataIntegrityError(String),
    /// The node chain is malformed.
    CorruptedList(String),
    /// A cursor does not denote a live position in the list.
    InvalidCursor(String),
}

impl ListError {
    /// Create an AllocationError with context
    pub fn allocation_error(resource: &str, reason: &str) -> Self {
        Self::AllocationError(format!("Failed to allocate {}: {}", resource, reason))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedList error with context
    pub fn corrupted_list(component: &str, details: &str) -> Self {
        Self::CorruptedList(format!("{} corruption: {}", component, details))
    }

    /// Create an InvalidCursor error with context
    pub fn invalid_cursor(details: &str) -> Self {
        Self::InvalidCursor(details.to_string())
    }

    /// Check if this error is an allocation failure
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationError(_))
    }
}

impl std::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::AllocationError(msg) => write!(f, "Allocation error: {}", msg),
            ListError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            ListError::CorruptedList(msg) => write!(f, "Corrupted list: {}", msg),
            ListError::InvalidCursor(msg) => write!(f, "Invalid cursor: {}", msg),
        }
    }
}

impl std::error::Error for ListError {}

/// Result type for list operations that may fail
pub type ListResult<T> = Result<T, ListError>;

/// Result extension trait for attaching context to list errors
pub trait ListResultExt<T> {
    /// Prefix the error message with additional context
    fn with_context(self, context: &str) -> ListResult<T>;

    /// Prefix the error message with the name of the failing operation
    fn with_operation(self, operation: &str) -> ListResult<T>;
}

impl<T> ListResultExt<T> for Result<T, ListError> {
    fn with_context(self, context: &str) -> ListResult<T> {
        self.map_err(|e| match e {
            ListError::AllocationError(msg) => {
                ListError::AllocationError(format!("{}: {}", context, msg))
            }
            ListError::DataIntegrityError(msg) => ListError::data_integrity(context, &msg),
            ListError::CorruptedList(msg) => ListError::corrupted_list(context, &msg),
            ListError::InvalidCursor(msg) => {
                ListError::InvalidCursor(format!("{}: {}", context, msg))
            }
        })
    }

    fn with_operation(self, operation: &str) -> ListResult<T> {
        self.with_context(&format!("Operation '{}'", operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ListError::allocation_error("list node", "node limit of 4 reached");
        assert_eq!(
            err.to_string(),
            "Allocation error: Failed to allocate list node: node limit of 4 reached"
        );
        assert!(err.is_allocation_error());

        let err = ListError::corrupted_list("Node chain", "cycle detected");
        assert_eq!(err.to_string(), "Corrupted list: Node chain corruption: cycle detected");
        assert!(!err.is_allocation_error());
    }

    #[test]
    fn test_with_operation_keeps_variant() {
        let result: ListResult<()> = Err(ListError::invalid_cursor("offset 7 past node length 3"));
        let err = result.with_operation("remove").unwrap_err();
        assert_eq!(
            err,
            ListError::InvalidCursor("Operation 'remove': offset 7 past node length 3".to_string())
        );
    }
}
