//! Command handlers.
//!
//! Each submodule exposes a single `execute` function that translates parsed
//! arguments into core service calls and renders the result.

pub mod completions;
pub mod destroy;
pub mod new;
pub mod resource;
pub mod route;

use apigen_core::domain::ResourceName;

use crate::error::{CliError, CliResult};

/// Parse a resource-name argument, surfacing validation failures as a
/// dedicated CLI error with name-specific suggestions.
pub(crate) fn parse_resource_name(raw: &str) -> CliResult<ResourceName> {
    ResourceName::parse(raw).map_err(|e| match e {
        apigen_core::domain::DomainError::InvalidResourceName { name, reason } => {
            CliError::InvalidResourceName { name, reason }
        }
        other => CliError::Core(other.into()),
    })
}
