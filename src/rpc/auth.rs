//! Authentication and user/role administration wire messages.

use super::kv::ResponseHeader;
use serde::{Deserialize, Serialize};

/// Authenticate request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    pub user: String,
    pub password: String,
}

/// Authenticate response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthenticateResponse {
    /// Response header.
    pub header: ResponseHeader,
    /// Opaque identity token attached to subsequent calls.
    pub token: String,
}

/// Enable authentication enforcement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthEnableRequest {}

/// Auth enable response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthEnableResponse {
    pub header: ResponseHeader,
}

/// Disable authentication enforcement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthDisableRequest {}

/// Auth disable response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthDisableResponse {
    pub header: ResponseHeader,
}

/// Permission type for key operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionType {
    /// Read permission (range, watch).
    Read,
    /// Write permission (put, delete).
    Write,
    /// Read and write permission.
    ReadWrite,
}

/// A key-range permission granted to a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    /// Permission type.
    pub perm_type: PermissionType,
    /// Key, or start of range.
    pub key: Vec<u8>,
    /// End of range (exclusive). Empty for a single key.
    pub range_end: Vec<u8>,
}

/// Add a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserAddRequest {
    pub name: String,
    pub password: String,
}

/// Fetch a user and its roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGetRequest {
    pub name: String,
}

/// User query response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGetResponse {
    pub header: ResponseHeader,
    /// Roles granted to the user.
    pub roles: Vec<String>,
}

/// Delete a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserDeleteRequest {
    pub name: String,
}

/// Change a user's password.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChangePasswordRequest {
    pub name: String,
    pub password: String,
}

/// List all users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListRequest {}

/// User list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListResponse {
    pub header: ResponseHeader,
    pub users: Vec<String>,
}

/// Grant a role to a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserGrantRoleRequest {
    pub user: String,
    pub role: String,
}

/// Revoke a role from a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRevokeRoleRequest {
    pub user: String,
    pub role: String,
}

/// Add a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleAddRequest {
    pub name: String,
}

/// Fetch a role and its permissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleGetRequest {
    pub name: String,
}

/// Role query response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleGetResponse {
    pub header: ResponseHeader,
    pub permissions: Vec<Permission>,
}

/// Delete a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleDeleteRequest {
    pub name: String,
}

/// List all roles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleListRequest {}

/// Role list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleListResponse {
    pub header: ResponseHeader,
    pub roles: Vec<String>,
}

/// Grant a key-range permission to a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleGrantPermissionRequest {
    pub role: String,
    pub permission: Permission,
}

/// Revoke a key-range permission from a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleRevokePermissionRequest {
    pub role: String,
    pub key: Vec<u8>,
    pub range_end: Vec<u8>,
}

/// Empty acknowledgement shared by administrative mutations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthAdminResponse {
    pub header: ResponseHeader,
}
