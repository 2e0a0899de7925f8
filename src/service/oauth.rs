use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use serde::Deserialize;
use url::Url;

use crate::{
    error::{auth::AuthError, AppError},
    model::auth::{SessionGuild, SessionUser},
    state::OAuth2Client,
    util::parse::parse_u64_from_string,
};

const DISCORD_API_USER: &str = "https://discord.com/api/users/@me";
const DISCORD_API_GUILDS: &str = "https://discord.com/api/users/@me/guilds";

/// `/users/@me` payload, reduced to what the session stores.
#[derive(Debug, Deserialize)]
struct OAuthUser {
    id: String,
    username: String,
    avatar: Option<String>,
}

/// `/users/@me/guilds` entry. Permissions arrive as a stringified bitset.
#[derive(Debug, Deserialize)]
struct OAuthGuild {
    id: String,
    name: String,
    #[serde(default)]
    owner: bool,
    #[serde(default)]
    permissions: String,
}

/// Discord OAuth2 flow: login URL generation and the callback exchange,
/// including fetching the user identity and guild list cached in the
/// session for authorization checks.
pub struct DiscordAuthService<'a> {
    http_client: &'a reqwest::Client,
    oauth_client: &'a OAuth2Client,
}

impl<'a> DiscordAuthService<'a> {
    pub fn new(http_client: &'a reqwest::Client, oauth_client: &'a OAuth2Client) -> Self {
        Self {
            http_client,
            oauth_client,
        }
    }

    pub fn login_url(&self) -> (Url, CsrfToken) {
        let (authorize_url, csrf_state) = self
            .oauth_client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("identify".to_string()))
            .add_scope(Scope::new("guilds".to_string()))
            .url();

        (authorize_url, csrf_state)
    }

    /// Exchanges the authorization code and assembles the session user.
    pub async fn callback(&self, authorization_code: String) -> Result<SessionUser, AppError> {
        let token = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(authorization_code))
            .request_async(self.http_client)
            .await
            .map_err(|err| AuthError::CodeExchangeFailed(err.to_string()))?;

        let access_token = token.access_token().secret();

        let user: OAuthUser = self
            .http_client
            .get(DISCORD_API_USER)
            .bearer_auth(access_token)
            .send()
            .await?
            .json()
            .await?;

        let guilds: Vec<OAuthGuild> = self
            .http_client
            .get(DISCORD_API_GUILDS)
            .bearer_auth(access_token)
            .send()
            .await?
            .json()
            .await?;

        let guilds = guilds
            .into_iter()
            .filter_map(|guild| {
                let id = guild.id.parse::<u64>().ok()?;
                Some(SessionGuild {
                    id,
                    name: guild.name,
                    owner: guild.owner,
                    permissions: guild.permissions.parse::<u64>().unwrap_or(0),
                })
            })
            .collect();

        Ok(SessionUser {
            id: parse_u64_from_string(&user.id)?,
            username: user.username,
            avatar: user.avatar,
            guilds,
        })
    }
}
