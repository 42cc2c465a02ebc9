// actor.rs — Caller identity with the admin capability resolved up front.
//
// Workflows never re-derive roles from scattered fields; the host resolves
// who is calling once, at the boundary, and hands the engine an Actor.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The role an actor holds for the duration of one engine call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Member,
    Admin,
}

/// The authenticated caller of an engine operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: ActorRole,
}

impl Actor {
    pub fn member(id: Uuid) -> Self {
        Self {
            id,
            role: ActorRole::Member,
        }
    }

    pub fn admin(id: Uuid) -> Self {
        Self {
            id,
            role: ActorRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_capability() {
        assert!(Actor::admin(Uuid::new_v4()).is_admin());
        assert!(!Actor::member(Uuid::new_v4()).is_admin());
    }
}
