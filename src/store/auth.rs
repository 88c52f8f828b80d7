//! Authentication state: users, roles, permissions, and tokens.
//!
//! Enforcement rules follow the remote store's contract: enabling requires a
//! root user holding the root role; `authenticate` is rejected while
//! enforcement is disabled; enabling or disabling invalidates every
//! outstanding token. While enforcement is on, every call except
//! `authenticate` must carry a valid token.

use std::collections::{HashMap, HashSet};

use crate::core::error::{Error, Result};
use crate::rpc::auth::Permission;

/// The role that always exists and confers full access.
const ROOT_ROLE: &str = "root";

#[derive(Debug, Clone)]
struct UserRecord {
    password: String,
    roles: HashSet<String>,
}

/// Users, roles, and token state.
#[derive(Debug, Default)]
pub struct AuthState {
    enabled: bool,
    users: HashMap<String, UserRecord>,
    roles: HashMap<String, Vec<Permission>>,
    tokens: HashMap<String, String>,
    token_counter: u64,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether enforcement is on.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Reject calls lacking a valid token while enforcement is on.
    pub fn check_token(&self, token: Option<&str>) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        match token {
            Some(t) if self.tokens.contains_key(t) => Ok(()),
            _ => Err(Error::unauthenticated("invalid or missing auth token")),
        }
    }

    /// Enable enforcement. Requires a root user holding the root role.
    pub fn enable(&mut self) -> Result<()> {
        let has_root = self
            .users
            .get("root")
            .is_some_and(|u| u.roles.contains(ROOT_ROLE));
        if !has_root {
            return Err(Error::failed_precondition(
                "root user with root role does not exist",
            ));
        }
        self.enabled = true;
        self.tokens.clear();
        Ok(())
    }

    /// Disable enforcement and invalidate every outstanding token.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.tokens.clear();
    }

    /// Authenticate a user, issuing a fresh token.
    ///
    /// Rejected with a precondition failure while enforcement is disabled.
    pub fn authenticate(&mut self, user: &str, password: &str) -> Result<String> {
        if !self.enabled {
            return Err(Error::failed_precondition(
                "authentication is not enabled",
            ));
        }
        let known = self
            .users
            .get(user)
            .is_some_and(|u| u.password == password);
        if !known {
            return Err(Error::unauthenticated("invalid user or password"));
        }

        self.token_counter += 1;
        let token = format!("token-{}", self.token_counter);
        self.tokens.insert(token.clone(), user.to_string());
        Ok(token)
    }

    pub fn user_add(&mut self, name: &str, password: &str) -> Result<()> {
        if self.users.contains_key(name) {
            return Err(Error::failed_precondition(format!(
                "user {} already exists",
                name
            )));
        }
        self.users.insert(
            name.to_string(),
            UserRecord {
                password: password.to_string(),
                roles: HashSet::new(),
            },
        );
        Ok(())
    }

    pub fn user_get(&self, name: &str) -> Result<Vec<String>> {
        let user = self
            .users
            .get(name)
            .ok_or_else(|| Error::failed_precondition(format!("user {} does not exist", name)))?;
        let mut roles: Vec<String> = user.roles.iter().cloned().collect();
        roles.sort();
        Ok(roles)
    }

    pub fn user_delete(&mut self, name: &str) -> Result<()> {
        self.users
            .remove(name)
            .ok_or_else(|| Error::failed_precondition(format!("user {} does not exist", name)))?;
        Ok(())
    }

    pub fn user_change_password(&mut self, name: &str, password: &str) -> Result<()> {
        let user = self
            .users
            .get_mut(name)
            .ok_or_else(|| Error::failed_precondition(format!("user {} does not exist", name)))?;
        user.password = password.to_string();
        Ok(())
    }

    pub fn user_list(&self) -> Vec<String> {
        let mut users: Vec<String> = self.users.keys().cloned().collect();
        users.sort();
        users
    }

    pub fn user_grant_role(&mut self, user: &str, role: &str) -> Result<()> {
        if role != ROOT_ROLE && !self.roles.contains_key(role) {
            return Err(Error::failed_precondition(format!(
                "role {} does not exist",
                role
            )));
        }
        let user = self
            .users
            .get_mut(user)
            .ok_or_else(|| Error::failed_precondition(format!("user {} does not exist", user)))?;
        user.roles.insert(role.to_string());
        Ok(())
    }

    pub fn user_revoke_role(&mut self, user: &str, role: &str) -> Result<()> {
        let user = self
            .users
            .get_mut(user)
            .ok_or_else(|| Error::failed_precondition(format!("user {} does not exist", user)))?;
        if !user.roles.remove(role) {
            return Err(Error::failed_precondition(format!(
                "role {} is not granted to the user",
                role
            )));
        }
        Ok(())
    }

    pub fn role_add(&mut self, name: &str) -> Result<()> {
        if name == ROOT_ROLE || self.roles.contains_key(name) {
            return Err(Error::failed_precondition(format!(
                "role {} already exists",
                name
            )));
        }
        self.roles.insert(name.to_string(), Vec::new());
        Ok(())
    }

    pub fn role_get(&self, name: &str) -> Result<Vec<Permission>> {
        if name == ROOT_ROLE {
            return Ok(Vec::new());
        }
        self.roles
            .get(name)
            .cloned()
            .ok_or_else(|| Error::failed_precondition(format!("role {} does not exist", name)))
    }

    pub fn role_delete(&mut self, name: &str) -> Result<()> {
        self.roles
            .remove(name)
            .ok_or_else(|| Error::failed_precondition(format!("role {} does not exist", name)))?;
        for user in self.users.values_mut() {
            user.roles.remove(name);
        }
        Ok(())
    }

    pub fn role_list(&self) -> Vec<String> {
        let mut roles: Vec<String> = self.roles.keys().cloned().collect();
        roles.push(ROOT_ROLE.to_string());
        roles.sort();
        roles.dedup();
        roles
    }

    pub fn role_grant_permission(&mut self, role: &str, permission: Permission) -> Result<()> {
        let perms = self
            .roles
            .get_mut(role)
            .ok_or_else(|| Error::failed_precondition(format!("role {} does not exist", role)))?;
        // Re-granting the same key range replaces the previous permission.
        perms.retain(|p| !(p.key == permission.key && p.range_end == permission.range_end));
        perms.push(permission);
        Ok(())
    }

    pub fn role_revoke_permission(
        &mut self,
        role: &str,
        key: &[u8],
        range_end: &[u8],
    ) -> Result<()> {
        let perms = self
            .roles
            .get_mut(role)
            .ok_or_else(|| Error::failed_precondition(format!("role {} does not exist", role)))?;
        let before = perms.len();
        perms.retain(|p| !(p.key == key && p.range_end == range_end));
        if perms.len() == before {
            return Err(Error::failed_precondition(
                "permission is not granted to the role",
            ));
        }
        Ok(())
    }
}
