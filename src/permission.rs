/// Operator permission gate
use crate::config::PermissionConfig;
use serde::{Deserialize, Serialize};

/// Privilege an action requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privilege {
    /// Read-only actions, open to any invoker
    Public,
    /// Actions with remote effect on players or servers
    Moderator,
}

impl Privilege {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Public => "public",
            Privilege::Moderator => "moderator",
        }
    }
}

/// The operator issuing a command, as reported by the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoker {
    /// Stable platform identifier of the operator
    pub id: String,
    /// Human-readable tag. Copied byte-for-byte into audit reasons.
    pub tag: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Platform-level administrator override
    #[serde(default)]
    pub administrator: bool,
}

impl Invoker {
    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }
}

/// Decides whether an invoker may perform an action.
///
/// With no role configured the gate is open and authorizes every invoker.
/// Otherwise the invoker needs the role or the administrator override.
#[derive(Debug, Clone, Default)]
pub struct PermissionGate {
    mod_role_id: Option<String>,
}

impl PermissionGate {
    pub fn new(config: &PermissionConfig) -> Self {
        Self {
            mod_role_id: config.mod_role_id.clone(),
        }
    }

    /// Gate that authorizes everyone
    pub fn open() -> Self {
        Self { mod_role_id: None }
    }

    pub fn with_role(role_id: impl Into<String>) -> Self {
        Self {
            mod_role_id: Some(role_id.into()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.mod_role_id.is_none()
    }

    pub fn mod_role_id(&self) -> Option<&str> {
        self.mod_role_id.as_deref()
    }

    pub fn authorize(&self, invoker: &Invoker, required: Privilege) -> bool {
        if required == Privilege::Public {
            return true;
        }

        match &self.mod_role_id {
            None => true,
            Some(role_id) => invoker.has_role(role_id) || invoker.administrator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoker(roles: &[&str], administrator: bool) -> Invoker {
        Invoker {
            id: "42".to_string(),
            tag: "mod#1".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            administrator,
        }
    }

    #[test]
    fn test_open_gate_authorizes_everyone() {
        let gate = PermissionGate::open();
        assert!(gate.is_open());
        assert!(gate.authorize(&invoker(&[], false), Privilege::Moderator));
    }

    #[test]
    fn test_role_required() {
        let gate = PermissionGate::with_role("mods");
        assert!(gate.authorize(&invoker(&["mods"], false), Privilege::Moderator));
        assert!(!gate.authorize(&invoker(&["players"], false), Privilege::Moderator));
    }

    #[test]
    fn test_administrator_override() {
        let gate = PermissionGate::with_role("mods");
        assert!(gate.authorize(&invoker(&[], true), Privilege::Moderator));
    }

    #[test]
    fn test_public_actions_bypass_role() {
        let gate = PermissionGate::with_role("mods");
        assert!(gate.authorize(&invoker(&[], false), Privilege::Public));
    }

    #[test]
    fn test_from_config() {
        let gate = PermissionGate::new(&PermissionConfig {
            mod_role_id: Some("123".to_string()),
        });
        assert_eq!(gate.mod_role_id(), Some("123"));
    }
}
