use cordial_shared::{Member, Permission, Snowflake};

use crate::cache::Guild;

/// Answers whether a member holds a capability in a guild, optionally in a
/// specific channel of it. Consulted synchronously by request preflights,
/// so implementations must not block on I/O.
pub trait PermissionResolver: Send + Sync {
    fn has_permission(
        &self,
        guild: &Guild,
        member: &Member,
        channel_id: Option<Snowflake>,
        permission: Permission,
    ) -> bool;
}

/// Guild-level role permissions: the owner holds everything, everyone else
/// holds the union of the public role and their own roles, and
/// `Administrator` implies every other permission. Channel overrides are not
/// considered.
#[derive(Copy, Clone, Debug, Default)]
pub struct RolePermissions;

impl RolePermissions {
    pub fn effective_raw(guild: &Guild, member: &Member) -> u64 {
        let public = guild
            .public_role()
            .map(|role| role.read().permissions_raw())
            .unwrap_or(0);
        guild
            .resolve_roles(member.roles())
            .iter()
            .fold(public, |raw, role| raw | role.read().permissions_raw())
    }
}

impl PermissionResolver for RolePermissions {
    fn has_permission(
        &self,
        guild: &Guild,
        member: &Member,
        _channel_id: Option<Snowflake>,
        permission: Permission,
    ) -> bool {
        if guild.owner_id() == member.user_id() {
            return true;
        }
        let raw = Self::effective_raw(guild, member);
        Permission::Administrator.is_set(raw) || permission.is_set(raw)
    }
}
