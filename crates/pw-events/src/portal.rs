// portal.rs — Signed, time-limited client portal links.
//
// Client-management projects notify their client with a link into the
// review portal. The link must work without a login, so it carries its own
// proof: a SHA-256 signature over (secret, project id, expiry) encoded
// URL-safe. Anyone holding the secret can verify; nobody without it can
// mint or extend a link.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// A link issued for one project, valid until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalLink {
    pub project_id: Uuid,
    pub url: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies portal links for a host-held secret.
pub struct PortalLinkIssuer {
    secret: Vec<u8>,
    base_url: String,
    ttl_hours: i64,
}

impl PortalLinkIssuer {
    /// Create an issuer. `base_url` should not end with a slash.
    pub fn new(secret: impl Into<Vec<u8>>, base_url: impl Into<String>, ttl_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            base_url: base_url.into(),
            ttl_hours,
        }
    }

    /// Issue a link for a project, valid for the issuer's TTL from `now`.
    pub fn issue(&self, project_id: Uuid, now: DateTime<Utc>) -> PortalLink {
        let expires_at = now + Duration::hours(self.ttl_hours);
        let token = self.sign(project_id, expires_at);
        let url = format!(
            "{}/portal/{}?expires={}&token={}",
            self.base_url,
            project_id,
            expires_at.timestamp(),
            token
        );
        PortalLink {
            project_id,
            url,
            token,
            expires_at,
        }
    }

    /// Check a presented token: not expired, signature matches.
    pub fn verify(
        &self,
        project_id: Uuid,
        expires_at: DateTime<Utc>,
        token: &str,
        now: DateTime<Utc>,
    ) -> bool {
        now <= expires_at && self.sign(project_id, expires_at) == token
    }

    fn sign(&self, project_id: Uuid, expires_at: DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.secret);
        hasher.update(project_id.as_bytes());
        hasher.update(expires_at.timestamp().to_be_bytes());
        URL_SAFE_NO_PAD.encode(hasher.finalize())
    }
}
