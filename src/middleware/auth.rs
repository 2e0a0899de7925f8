use tower_sessions::Session;

use crate::{
    error::{auth::AuthError, AppError},
    middleware::session::AuthSession,
    model::auth::SessionUser,
};

/// Access requirement for a dashboard endpoint.
pub enum Permission {
    /// Any logged-in user.
    Authenticated,
    /// The session's cached guild list must carry the MANAGE_GUILD bit
    /// (0x20) for this guild.
    ManageGuild(u64),
}

/// Session-backed access guard for dashboard controllers.
///
/// The guild list is the one cached at login; a permission granted or
/// revoked on Discord afterwards is only picked up on the next login.
pub struct AuthGuard<'a> {
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    pub async fn require(&self, permissions: &[Permission]) -> Result<SessionUser, AppError> {
        let Some(user) = AuthSession::new(self.session).get_user().await? else {
            return Err(AuthError::NotAuthenticated.into());
        };

        for permission in permissions {
            match permission {
                Permission::Authenticated => {}
                Permission::ManageGuild(guild_id) => {
                    if !user.manages(*guild_id) {
                        return Err(AuthError::GuildPermissionDenied(*guild_id).into());
                    }
                }
            }
        }

        Ok(user)
    }
}
