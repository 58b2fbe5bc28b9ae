use crate::shared::core::identity::{Caller, Role};
use crate::shared::infrastructure::authorizer::{Action, Authorizer, DocType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub doctype: DocType,
    pub action: Action,
    pub role: Role,
    /// Only applies to documents the caller authored.
    pub if_owner: bool,
}

impl Grant {
    pub fn new(doctype: DocType, action: Action, role: Role) -> Self {
        Self {
            doctype,
            action,
            role,
            if_owner: false,
        }
    }

    pub fn if_owner(mut self) -> Self {
        self.if_owner = true;
        self
    }
}

/// Static role table standing in for the host's permission engine.
#[derive(Debug, Clone)]
pub struct RoleTableAuthorizer {
    grants: Vec<Grant>,
}

impl RoleTableAuthorizer {
    pub fn new(grants: Vec<Grant>) -> Self {
        Self { grants }
    }
}

impl Default for RoleTableAuthorizer {
    fn default() -> Self {
        use Action::*;
        use DocType::*;

        let managers = [Role::TimeTrackerManager, Role::SystemManager];
        let mut grants = vec![
            Grant::new(TimeLog, Create, Role::TimeTrackerUser),
            Grant::new(TimeLog, Read, Role::TimeTrackerUser).if_owner(),
            Grant::new(TimeLog, Write, Role::TimeTrackerUser).if_owner(),
            Grant::new(TimeLog, Read, Role::HrManager),
            Grant::new(Project, Read, Role::TimeTrackerUser),
        ];
        for role in managers {
            grants.push(Grant::new(TimeLog, Create, role.clone()));
            grants.push(Grant::new(TimeLog, Read, role.clone()));
            grants.push(Grant::new(TimeLog, Write, role.clone()));
            grants.push(Grant::new(Project, Read, role));
        }
        Self::new(grants)
    }
}

impl Authorizer for RoleTableAuthorizer {
    fn has_permission(
        &self,
        caller: &Caller,
        doctype: DocType,
        action: Action,
        owner: Option<&str>,
    ) -> bool {
        if caller.is_administrator() {
            return true;
        }
        self.grants.iter().any(|grant| {
            grant.doctype == doctype
                && grant.action == action
                && caller.has_role(&grant.role)
                && (!grant.if_owner || owner.is_none() || owner == Some(caller.user.as_str()))
        })
    }
}
