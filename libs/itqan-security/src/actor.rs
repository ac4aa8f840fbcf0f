use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::tenant::TenantId;

/// Platform role of an acting user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Supervisor,
    Teacher,
    Student,
    Parent,
}

impl Role {
    /// Super admins are the only role allowed to work across academies.
    #[inline]
    #[must_use]
    pub fn is_super_admin(self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    #[inline]
    #[must_use]
    pub fn can_manage_multiple_academies(self) -> bool {
        self.is_super_admin()
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Supervisor => "supervisor",
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "supervisor" => Ok(Role::Supervisor),
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// The user performing an admin operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Actor {
    id: Uuid,
    role: Role,
    academy_id: Option<TenantId>,
}

impl Actor {
    #[must_use]
    pub fn builder(role: Role) -> ActorBuilder {
        ActorBuilder {
            id: None,
            role,
            academy_id: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Academy the actor belongs to, if any.
    #[must_use]
    pub fn academy_id(&self) -> Option<TenantId> {
        self.academy_id
    }

    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }
}

pub struct ActorBuilder {
    id: Option<Uuid>,
    role: Role,
    academy_id: Option<TenantId>,
}

impl ActorBuilder {
    #[must_use]
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn academy_id(mut self, academy_id: TenantId) -> Self {
        self.academy_id = Some(academy_id);
        self
    }

    #[must_use]
    pub fn build(self) -> Actor {
        Actor {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            role: self.role,
            academy_id: self.academy_id,
        }
    }
}
