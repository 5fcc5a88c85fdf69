use tracing::{info, warn};

use crate::{
    error::{ApiFailure, CatalogError, SUCCESS_STATUSES},
    types::AccessToken,
};

use super::CatalogClient;

impl CatalogClient {
    /// Requests a new app-level token with the client-credentials grant.
    ///
    /// On success the held token and the `Authorization` header are replaced.
    /// On a non-success status the failure is logged and the previous token,
    /// if any, stays in place.
    ///
    /// No synchronization happens here: two callers sharing one client behind
    /// a lock that is released between requests may both refresh, and the
    /// later token wins.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Upstream`] for a rejected token request, or a
    /// transport/parse error.
    pub async fn acquire_token(&mut self) -> Result<&AccessToken, CatalogError> {
        info!("Requesting access token");

        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        if !SUCCESS_STATUSES.contains(&status) {
            warn!(status, body = %body, "Token request rejected");
            return Err(CatalogError::Upstream(ApiFailure::classify(status, body)));
        }

        let token: AccessToken = serde_json::from_str(&body)?;
        self.authorization = Some(format!("Bearer {}", token.access_token));
        Ok(&*self.token.insert(token))
    }
}
