//! RON config file for the agent.
//!
//! Missing fields fall back to [`AppConfig::default`], so a file containing
//! only `(session_id: "...", titles: ["..."])` is enough.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use giveaway_core::{CommentPool, SkipReporting};
use giveaway_engine::{Credentials, DispatchSettings, RunConfig, SiteSettings, DEFAULT_SITE_URL};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comments::build_comments;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_8_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/34.0.1847.116 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("no session id: set it in the config file or GIVEAWAY_SESSION_ID")]
    MissingSessionId,
    #[error("no titles to search")]
    NoTitles,
    #[error("comment parts produce no comments")]
    NoComments,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentParts {
    pub texts: Vec<String>,
    pub punctuation: Vec<String>,
    pub smileys: Vec<String>,
}

impl Default for CommentParts {
    fn default() -> Self {
        Self {
            texts: vec!["Thanks".into(), "Thank you".into()],
            punctuation: vec![".".into(), "!".into()],
            smileys: vec![":)".into(), ":D".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session_id: String,
    pub user_agent: String,
    pub site_url: String,
    pub titles: Vec<String>,
    pub comments: CommentParts,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_concurrent_titles: Option<usize>,
    pub include_homepage: bool,
    pub report_skipped: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session_id: String::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            titles: Vec::new(),
            comments: CommentParts::default(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            max_concurrent_titles: None,
            include_homepage: false,
            report_skipped: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line overrides and validate into a [`RunConfig`].
    pub fn into_run_config(
        mut self,
        session_id: Option<String>,
        extra_titles: Vec<String>,
    ) -> Result<RunConfig, ConfigError> {
        if let Some(session_id) = session_id {
            self.session_id = session_id;
        }
        if self.session_id.trim().is_empty() {
            return Err(ConfigError::MissingSessionId);
        }

        let mut titles = self.titles;
        titles.extend(extra_titles);
        titles.retain(|title| !title.trim().is_empty());
        if titles.is_empty() && !self.include_homepage {
            return Err(ConfigError::NoTitles);
        }

        let comments = build_comments(
            &self.comments.texts,
            &self.comments.punctuation,
            &self.comments.smileys,
        );
        let comments = CommentPool::new(comments).map_err(|_| ConfigError::NoComments)?;

        let site = SiteSettings {
            base_url: self.site_url,
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..SiteSettings::default()
        };
        let dispatch = DispatchSettings {
            max_concurrent_titles: self.max_concurrent_titles,
            include_homepage: self.include_homepage,
            skip_reporting: if self.report_skipped {
                SkipReporting::Report
            } else {
                SkipReporting::Silent
            },
            ..DispatchSettings::default()
        };

        Ok(RunConfig {
            site,
            credentials: Credentials::new(self.session_id, self.user_agent),
            dispatch,
            titles,
            comments,
        })
    }
}
