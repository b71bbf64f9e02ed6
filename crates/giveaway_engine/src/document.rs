//! Queries against fetched pages.
//!
//! Pages are kept as owned HTML text and parsed on demand inside each query,
//! so no parsed tree ever lives across an `.await`.

use giveaway_core::{EligibilityVerdict, EntryError, GiveawayCandidate};
use scraper::{Html, Selector};
use url::Url;

const FORM_KEY_SELECTOR: &str = "#form_key";
const CANDIDATE_SELECTOR: &str = "div.post:not(.fade) > div.left > div.title > a";
const ENTER_SELECTOR: &str = "#form_enter_giveaway > a.rounded.view.submit_entry";
const VIEW_ONLY_SELECTOR: &str = "#form_enter_giveaway > a.rounded.view";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: Url,
    pub html: String,
}

impl Page {
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self {
            url,
            html: html.into(),
        }
    }

    pub fn form_key(&self) -> Option<String> {
        form_key(&self.html)
    }

    pub fn candidates(&self) -> Vec<Result<GiveawayCandidate, EntryError>> {
        candidates(&self.html)
    }

    pub fn eligibility(&self) -> EligibilityVerdict {
        classify(&self.html)
    }
}

/// The anti-forgery token carried in the `#form_key` hidden input.
pub fn form_key(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = Selector::parse(FORM_KEY_SELECTOR).ok()?;
    doc.select(&sel)
        .find_map(|input| input.value().attr("value"))
        .map(str::to_string)
}

/// Every open giveaway link in a listing, in document order. Anchors without
/// a usable `href` come back as `MissingUrl` errors in their slot.
pub fn candidates(html: &str) -> Vec<Result<GiveawayCandidate, EntryError>> {
    let doc = Html::parse_document(html);
    let Ok(sel) = Selector::parse(CANDIDATE_SELECTOR) else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(|anchor| GiveawayCandidate::from_href(anchor.value().attr("href")))
        .collect()
}

pub fn classify(html: &str) -> EligibilityVerdict {
    let doc = Html::parse_document(html);
    if matches_any(&doc, ENTER_SELECTOR) {
        EligibilityVerdict::Enterable
    } else if matches_any(&doc, VIEW_ONLY_SELECTOR) {
        EligibilityVerdict::ContributorOnly
    } else {
        EligibilityVerdict::NotEnterable
    }
}

fn matches_any(doc: &Html, selector: &str) -> bool {
    Selector::parse(selector)
        .ok()
        .is_some_and(|sel| doc.select(&sel).next().is_some())
}
