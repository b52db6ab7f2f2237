//! Plan document validation.
//!
//! # Responsibilities
//! - Check referential integrity (instances reference declared resource types)
//! - Require unique, non-empty instance names
//! - Require well-formed `timeout` blocks
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Timeout keys and values are checked later by the resolver, per instance

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::PlanDocument;

/// A semantic problem in a plan document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("instance #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate instance name: {0}")]
    DuplicateInstance(String),

    #[error("instance {instance} references unknown resource type {resource_type}")]
    UnknownResourceType {
        instance: String,
        resource_type: String,
    },

    #[error("instance {instance} has a malformed timeout block: {message}")]
    MalformedTimeoutBlock { instance: String, message: String },
}

/// Validate a deserialized document.
pub fn validate_config(doc: &PlanDocument) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, instance) in doc.instances.iter().enumerate() {
        if instance.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !seen.insert(instance.name.as_str()) {
            errors.push(ValidationError::DuplicateInstance(instance.name.clone()));
        }

        if !doc.resources.contains_key(&instance.resource_type) {
            errors.push(ValidationError::UnknownResourceType {
                instance: instance.name.clone(),
                resource_type: instance.resource_type.clone(),
            });
        }

        if let Err(e) = instance.resource_config() {
            errors.push(ValidationError::MalformedTimeoutBlock {
                instance: instance.name.clone(),
                message: e.message().to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
