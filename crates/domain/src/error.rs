//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`CrmError`]
//! via `#[from]`. The customer-facing messages are part of the wire contract
//! and are kept byte-for-byte stable.

use crate::id::CustomerId;

/// Top-level error returned by every port and use-case.
#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error(transparent)]
    CustomerNotFound(#[from] CustomerNotFoundError),

    #[error(transparent)]
    EmailUnavailable(#[from] EmailUnavailableError),

    /// Opaque failure from a persistence adapter.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The targeted customer does not exist.
///
/// The lookup and delete paths report it with different wording.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomerNotFoundError {
    /// Raised when loading a customer (fetch, update).
    #[error("Customer with id {id} doesn't found")]
    Lookup { id: CustomerId },

    /// Raised when deleting a customer.
    #[error("Customer with id {id} doesn't exist.")]
    Delete { id: CustomerId },
}

/// The requested email is already held by another customer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailUnavailableError {
    #[error("The email {email} unavailable.")]
    Create { email: String },

    #[error("The email \"{email}\" unavailable to update")]
    Update { email: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_lookup_not_found_message() {
        let err = CustomerNotFoundError::Lookup {
            id: CustomerId::new(5),
        };
        assert_eq!(err.to_string(), "Customer with id 5 doesn't found");
    }

    #[test]
    fn should_format_delete_not_found_message() {
        let err = CustomerNotFoundError::Delete {
            id: CustomerId::new(5),
        };
        assert_eq!(err.to_string(), "Customer with id 5 doesn't exist.");
    }

    #[test]
    fn should_format_create_email_conflict_message() {
        let err = EmailUnavailableError::Create {
            email: "smit@gmail.com".to_string(),
        };
        assert_eq!(err.to_string(), "The email smit@gmail.com unavailable.");
    }

    #[test]
    fn should_format_update_email_conflict_message() {
        let err = EmailUnavailableError::Update {
            email: "smit@bing.com".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The email \"smit@bing.com\" unavailable to update"
        );
    }

    #[test]
    fn should_keep_message_when_wrapped_in_crm_error() {
        let err: CrmError = EmailUnavailableError::Create {
            email: "a@b.c".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "The email a@b.c unavailable.");
    }
}
