//! Transient access tokens for HTTPS remotes.
//!
//! A token is only ever spliced into the URL handed to a single `git push`
//! invocation. Anything rendered for a person (logs, error bodies) goes
//! through [`Token::mask`] first.

use std::borrow::Cow;
use std::fmt;

use url::Url;

/// Replacement for a token in human-facing text
pub const MASK: &str = "****";

/// An access token supplied with a push request
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap a token, treating blank input as absent
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The token as it appears inside a URL
    pub fn encoded(&self) -> Cow<'_, str> {
        urlencoding::encode(&self.0)
    }

    /// Replace every occurrence of the token (plain or percent-encoded) in `text`
    pub fn mask<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let encoded = self.encoded();
        if !text.contains(self.0.as_str()) && !text.contains(encoded.as_ref()) {
            return Cow::Borrowed(text);
        }
        let masked = text.replace(encoded.as_ref(), MASK);
        Cow::Owned(masked.replace(self.0.as_str(), MASK))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({MASK})")
    }
}

/// Mask `text` when a token is present
pub fn mask<'a>(text: &'a str, token: Option<&Token>) -> Cow<'a, str> {
    match token {
        Some(token) => token.mask(text),
        None => Cow::Borrowed(text),
    }
}

/// Build the URL used for a push.
///
/// Only `https` URLs carry the token, as the user-info of the authority.
/// Everything else (SSH-style `git@host:path`, `ssh://`, local paths, or
/// anything that fails to parse) is returned unchanged.
pub fn authenticated_url(remote_url: &str, token: Option<&Token>) -> Option<String> {
    let token = token?;
    let parsed = match Url::parse(remote_url) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::debug!(error = %e, "Remote URL is not absolute, ignoring token");
            return None;
        }
    };
    if parsed.scheme() != "https" {
        tracing::debug!(scheme = parsed.scheme(), "Token ignored for non-https remote");
        return None;
    }

    // Splice textually so host, path, query and fragment stay byte-for-byte.
    let authority_start = remote_url.find("://")? + 3;
    let rest = &remote_url[authority_start..];
    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let host_start = rest[..authority_end].rfind('@').map_or(0, |at| at + 1);

    Some(format!(
        "{}{}@{}",
        &remote_url[..authority_start],
        token.encoded(),
        &rest[host_start..]
    ))
}
