use crate::{EntryError, FailureKind};

/// A giveaway link found on a listing, not yet fetched or classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiveawayCandidate {
    pub href: String,
}

impl GiveawayCandidate {
    /// Rejects a missing or blank `href` with [`FailureKind::MissingUrl`].
    pub fn from_href(href: Option<&str>) -> Result<Self, EntryError> {
        match href.map(str::trim) {
            Some(href) if !href.is_empty() => Ok(Self {
                href: href.to_string(),
            }),
            _ => Err(EntryError::new(FailureKind::MissingUrl, "")),
        }
    }
}
