//! Freeze rule resolution across configured sources

use super::rule::{FreezeDocument, FreezeRule};
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::FreezeSource;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

/// Resolve the freeze rule governing `org`/`branch`.
///
/// Sources are read in order and a later source's match replaces an
/// earlier one. Returns a default (non-frozen) rule when nothing matches.
/// A source that cannot be fetched or decoded fails the whole resolution.
pub async fn resolve(
    platform: &dyn PlatformService,
    org: &str,
    branch: &str,
    sources: &[FreezeSource],
) -> Result<FreezeRule> {
    let mut winner: Option<FreezeRule> = None;

    for source in sources {
        let document = fetch_document(platform, source).await?;
        if let Some(rule) = document.find(org, branch) {
            debug!(%source, org, branch, frozen = rule.frozen, "freeze rule matched");
            winner = Some(rule.clone());
        }
    }

    Ok(winner.unwrap_or_default())
}

/// Fetch and decode one source
async fn fetch_document(
    platform: &dyn PlatformService,
    source: &FreezeSource,
) -> Result<FreezeDocument> {
    let encoded = platform.get_file_content(source).await.map_err(|e| match e {
        Error::Fetch(_) => e,
        other => Error::Fetch(format!("{source}: {other}")),
    })?;
    decode_document(source, &encoded)
}

/// Decode a base64 YAML payload from the contents API
pub fn decode_document(source: &FreezeSource, encoded: &str) -> Result<FreezeDocument> {
    // The contents API wraps base64 at 60 columns
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::Fetch(format!("{source}: invalid base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| Error::Fetch(format!("{source}: invalid utf-8: {e}")))?;
    FreezeDocument::from_yaml(&text)
        .map_err(|e| Error::Fetch(format!("{source}: invalid freeze document: {e}")))
}
