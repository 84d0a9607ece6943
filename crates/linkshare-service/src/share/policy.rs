//! Access decisions for share content and share records.

use tracing::warn;

use linkshare_core::error::AppError;
use linkshare_core::result::AppResult;
use linkshare_entity::share::ShareLink;

use crate::context::RequestContext;

/// Stateless authorization rules for share links.
///
/// Read access to content needs only the password gate. Write access needs
/// an authenticated caller on a public `change` link, and membership in a
/// non-empty allow-list unless the caller is an admin. Managing the link
/// record itself is reserved to its owner and admins.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Check that `caller` may create, modify or delete content through `link`.
    pub fn authorize_write(link: &ShareLink, caller: &RequestContext) -> AppResult<()> {
        if !link.allows_change() {
            warn!(user_id = %caller.user_id, path = %link.path, "Write to read-only share");
            return Err(AppError::forbidden("Share does not allow editing"));
        }

        if !link.allowed_users.is_empty()
            && !link.allowed_users.contains(&caller.user_id)
            && !caller.is_admin()
        {
            warn!(user_id = %caller.user_id, path = %link.path, "Write by user outside allow-list");
            return Err(AppError::forbidden("User is not allowed to edit this share"));
        }

        Ok(())
    }

    /// Whether the current requester could write through `link`.
    pub fn can_edit(link: &ShareLink, caller: Option<&RequestContext>, is_dir: bool) -> bool {
        is_dir
            && caller.is_some_and(|c| {
                link.allows_change()
                    && (link.allowed_users.is_empty()
                        || link.allowed_users.contains(&c.user_id)
                        || c.is_admin())
            })
    }

    /// Check that `caller` may edit, publish or delete the link record.
    pub fn authorize_management(link: &ShareLink, caller: &RequestContext) -> AppResult<()> {
        if link.user_id != caller.user_id && !caller.is_admin() {
            return Err(AppError::forbidden("You can only manage your own shares"));
        }
        Ok(())
    }

    /// Check that `caller` holds the share capability.
    pub fn require_share_capability(caller: &RequestContext) -> AppResult<()> {
        if !caller.can_share {
            return Err(AppError::forbidden("Sharing is not permitted for this user"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::testing;
    use linkshare_core::error::ErrorKind;
    use linkshare_core::types::UserId;
    use linkshare_entity::share::SharePermission;
    use linkshare_entity::user::UserRole;

    fn caller(role: UserRole) -> RequestContext {
        RequestContext {
            user_id: UserId::new(),
            role,
            username: "caller".into(),
            can_share: true,
            request_time: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_private_and_view_links_refuse_writes() {
        let private = testing::link("/docs");
        let mut view_only = private.clone();
        view_only.publish(SharePermission::View, vec![]);
        let user = caller(UserRole::User);
        let admin = caller(UserRole::Admin);

        for l in [private, view_only] {
            assert_eq!(
                AccessPolicy::authorize_write(&l, &user).unwrap_err().kind,
                ErrorKind::Forbidden
            );
            assert!(AccessPolicy::authorize_write(&l, &admin).is_err());
            assert!(!AccessPolicy::can_edit(&l, Some(&admin), true));
        }
    }

    #[test]
    fn test_change_link_with_empty_allow_list_admits_anyone() {
        let mut link = testing::link("/docs");
        link.publish(SharePermission::Change, vec![]);
        let user = caller(UserRole::User);

        assert!(AccessPolicy::authorize_write(&link, &user).is_ok());
        assert!(AccessPolicy::can_edit(&link, Some(&user), true));
        assert!(!AccessPolicy::can_edit(&link, Some(&user), false));
        assert!(!AccessPolicy::can_edit(&link, None, true));
    }

    #[test]
    fn test_allow_list_with_admin_bypass() {
        let member = caller(UserRole::User);
        let outsider = caller(UserRole::User);
        let admin = caller(UserRole::Admin);
        let mut link = testing::link("/docs");
        link.publish(SharePermission::Change, vec![member.user_id]);

        assert!(AccessPolicy::authorize_write(&link, &member).is_ok());
        assert!(AccessPolicy::authorize_write(&link, &admin).is_ok());
        assert_eq!(
            AccessPolicy::authorize_write(&link, &outsider).unwrap_err().kind,
            ErrorKind::Forbidden
        );
        assert!(!AccessPolicy::can_edit(&link, Some(&outsider), true));
    }

    #[test]
    fn test_management_is_owner_or_admin() {
        let owner = caller(UserRole::User);
        let link = testing::link_owned_by("/docs", owner.user_id);

        assert!(AccessPolicy::authorize_management(&link, &owner).is_ok());
        assert!(AccessPolicy::authorize_management(&link, &caller(UserRole::Admin)).is_ok());
        assert_eq!(
            AccessPolicy::authorize_management(&link, &caller(UserRole::User))
                .unwrap_err()
                .kind,
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn test_share_capability() {
        let mut user = caller(UserRole::User);
        assert!(AccessPolicy::require_share_capability(&user).is_ok());
        user.can_share = false;
        assert!(AccessPolicy::require_share_capability(&user).is_err());
    }
}
