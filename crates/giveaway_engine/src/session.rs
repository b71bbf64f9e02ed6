use std::fmt;
use std::sync::Arc;

use agent_logging::{agent_debug, agent_info, agent_warn};
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, RequestBuilder};
use url::Url;

use crate::form::{FormBody, FORM_CONTENT_TYPE};
use crate::transport::{map_reqwest_error, read_page};
use crate::{SessionError, SiteSettings, TransportError, TransportFailure};

pub const SESSION_COOKIE: &str = "PHPSESSID";
pub const PROBE_PATH: &str = "forum/new";

const LOGIN_REDIRECT: &str = "probe redirected, likely to the login page";

/// The opaque session credential and the client identity sent with every request.
#[derive(Clone)]
pub struct Credentials {
    pub session_id: String,
    pub user_agent: String,
}

impl Credentials {
    pub fn new(session_id: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("session_id", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// A validated connection context: cookie-bearing client plus the
/// anti-forgery token scraped from the probe page.
#[derive(Debug)]
pub struct Session {
    client: reqwest::Client,
    site_root: Url,
    identity: String,
    form_key: String,
    max_bytes: u64,
}

impl Session {
    /// Build the client seeded with the credential, then [`validate`](Self::validate) it.
    pub async fn establish(
        settings: &SiteSettings,
        credentials: &Credentials,
    ) -> Result<Session, SessionError> {
        let site_root = settings.site_root().map_err(SessionError::Transport)?;
        let client = build_client(settings, credentials, &site_root)?;
        let mut session = Session {
            client,
            site_root,
            identity: credentials.user_agent.clone(),
            form_key: String::new(),
            max_bytes: settings.max_bytes,
        };
        session.validate().await?;
        agent_info!("Session established against {}", session.site_root);
        Ok(session)
    }

    /// Probe an authenticated page. A redirect means the credential is not
    /// logged in; otherwise the page must carry a form key.
    pub async fn validate(&mut self) -> Result<(), SessionError> {
        let probe = self.site_root.join(PROBE_PATH).map_err(|err| {
            SessionError::Transport(TransportError::new(
                TransportFailure::InvalidUrl,
                err.to_string(),
            ))
        })?;
        agent_debug!("Validating session via {}", probe);

        let response = self
            .request(Method::GET, probe, None)
            .send()
            .await
            .map_err(|err| {
                if err.is_redirect() {
                    agent_warn!("Session probe redirected: {}", err);
                    SessionError::InvalidSession(LOGIN_REDIRECT.to_string())
                } else {
                    SessionError::Transport(map_reqwest_error(err))
                }
            })?;
        let page = read_page(response, self.max_bytes)
            .await
            .map_err(SessionError::Transport)?;

        self.form_key = page.form_key().ok_or(SessionError::TokenNotFound)?;
        Ok(())
    }

    pub fn form_key(&self) -> &str {
        &self.form_key
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Request with the identity header and, when a body is given, a
    /// form-encoded payload.
    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        form: Option<&FormBody>,
    ) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header(USER_AGENT, self.identity.as_str());
        match form {
            Some(form) => builder
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(form.encode()),
            None => builder,
        }
    }
}

fn build_client(
    settings: &SiteSettings,
    credentials: &Credentials,
    site_root: &Url,
) -> Result<reqwest::Client, SessionError> {
    let jar = Arc::new(Jar::default());
    jar.add_cookie_str(
        &format!("{SESSION_COOKIE}={}", credentials.session_id),
        site_root,
    );

    let probe_path = site_root
        .join(PROBE_PATH)
        .map(|url| url.path().to_string())
        .unwrap_or_default();
    let redirect_limit = settings.redirect_limit;
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        let from_probe = attempt
            .previous()
            .last()
            .is_some_and(|prev| prev.path() == probe_path);
        if from_probe {
            attempt.error(LOGIN_REDIRECT)
        } else if attempt.previous().len() >= redirect_limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    });

    let mut builder = reqwest::Client::builder()
        .cookie_provider(jar)
        .redirect(policy);
    if let Some(timeout) = settings.connect_timeout {
        builder = builder.connect_timeout(timeout);
    }
    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(|err| {
        SessionError::Transport(TransportError::new(
            TransportFailure::Network,
            err.to_string(),
        ))
    })
}
