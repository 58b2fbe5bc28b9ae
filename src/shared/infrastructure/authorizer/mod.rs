// Authorization port. Deciding who may do what belongs to the host; the use
// cases only ask and propagate the verdict.

use crate::shared::core::errors::ApplicationError;
use crate::shared::core::identity::{Caller, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocType {
    TimeLog,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    Create,
    Write,
}

pub trait Authorizer: Send + Sync {
    /// `owner` is the author of the document the action targets, if any.
    fn has_permission(
        &self,
        caller: &Caller,
        doctype: DocType,
        action: Action,
        owner: Option<&str>,
    ) -> bool;

    /// Restricts an operation to callers holding one of `roles`.
    fn require_any_role(&self, caller: &Caller, roles: &[Role]) -> Result<(), ApplicationError> {
        if caller.is_administrator() || caller.has_any_role(roles) {
            return Ok(());
        }
        let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
        Err(ApplicationError::permission(format!(
            "Not permitted: requires one of the roles {}",
            names.join(", ")
        )))
    }
}

pub mod in_memory;
