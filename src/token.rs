//! Single-slot access token cache with lazy, single-flight refresh.
//!
//! [`TokenCache::valid_token`] holds the slot's async mutex across the refresh, so concurrent
//! callers on a cold cache queue behind the first fetch and reuse its token instead of
//! stampeding the token endpoint. A failed fetch returns the error and leaves the slot exactly
//! as it was.

// crates.io
use serde::{Deserializer, de::Error as _};
// self
use crate::{
	_prelude::*,
	auth::Secret,
	clock::Clock,
	error::RemoteError,
	obs::{self, TokenEvent},
};

/// Safety margin subtracted from the provider's `expires_in`.
pub const EXPIRY_MARGIN: Duration = Duration::seconds(60);

/// Token endpoint payload.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenGrant {
	/// Opaque bearer token.
	pub access_token: Secret,
	/// Lifetime in seconds; the provider sends it as a string, mocks often as a number.
	#[serde(deserialize_with = "deserialize_seconds")]
	pub expires_in: i64,
}
impl TokenGrant {
	/// Decodes a 2xx token endpoint body, reporting the offending field on failure.
	pub fn parse(status: u16, body: &[u8]) -> Result<Self> {
		let mut de = serde_json::Deserializer::from_slice(body);

		serde_path_to_error::deserialize(&mut de)
			.map_err(|e| RemoteError::malformed(status, format!("{} at `{}`", e.inner(), e.path())).into())
	}
}

/// Cached token and the instant it stops being handed out.
#[derive(Clone)]
pub struct CachedToken {
	/// Bearer token value.
	pub value: Secret,
	/// First instant at which the token is treated as expired.
	pub valid_until: OffsetDateTime,
}
impl CachedToken {
	/// Caches `grant` as fetched at `now`, applying [`EXPIRY_MARGIN`].
	pub fn from_grant(grant: TokenGrant, now: OffsetDateTime) -> Self {
		let lifetime = (Duration::seconds(grant.expires_in) - EXPIRY_MARGIN).max(Duration::ZERO);

		Self { value: grant.access_token, valid_until: now.saturating_add(lifetime) }
	}

	/// Returns `true` while `now` is strictly before [`CachedToken::valid_until`].
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		now < self.valid_until
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("value", &"<redacted>")
			.field("valid_until", &self.valid_until)
			.finish()
	}
}

/// Instance-owned token slot.
#[derive(Debug, Default)]
pub struct TokenCache {
	slot: AsyncMutex<Option<CachedToken>>,
}
impl TokenCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a snapshot of the cached token, valid or not.
	pub async fn snapshot(&self) -> Option<CachedToken> {
		self.slot.lock().await.clone()
	}

	/// Replaces the slot's contents.
	pub async fn store(&self, token: CachedToken) {
		*self.slot.lock().await = Some(token);
	}

	/// Drops the cached token so the next caller refetches.
	pub async fn invalidate(&self) {
		self.slot.lock().await.take();
	}

	/// Returns the cached token when still valid, otherwise runs `fetch` and caches its grant.
	pub async fn valid_token<F, Fut>(&self, clock: &dyn Clock, fetch: F) -> Result<Secret>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<TokenGrant>>,
	{
		let mut slot = self.slot.lock().await;
		let now = clock.now();

		if let Some(current) = slot.as_ref().filter(|token| token.is_valid_at(now)) {
			obs::record_token_event(TokenEvent::Reused);

			return Ok(current.value.clone());
		}

		let grant = match fetch().await {
			Ok(grant) => grant,
			Err(e) => {
				obs::record_token_event(TokenEvent::RefreshFailed);

				return Err(e);
			},
		};
		let token = CachedToken::from_grant(grant, now);
		let value = token.value.clone();

		*slot = Some(token);

		obs::record_token_event(TokenEvent::Refreshed);

		Ok(value)
	}
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Seconds {
		Number(i64),
		Text(String),
	}

	let seconds = match Seconds::deserialize(deserializer)? {
		Seconds::Number(value) => value,
		Seconds::Text(text) => text
			.trim()
			.parse::<i64>()
			.map_err(|_| D::Error::custom(format!("expected whole seconds, found `{text}`")))?,
	};

	if seconds <= 0 {
		return Err(D::Error::custom("expires_in must be positive"));
	}

	Ok(seconds)
}
