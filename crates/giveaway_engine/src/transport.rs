use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tokio::sync::OnceCell;
use url::Url;

use agent_logging::agent_debug;

use crate::decode::decode_body;
use crate::form::FormBody;
use crate::session::{Credentials, Session};
use crate::{Page, SessionError, SiteSettings, TransportError, TransportFailure};

pub const SEARCH_PATH: &str = "ajax_gifts.php";

/// Request surface the processor and dispatcher work against.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Join a listing href onto the site root.
    fn resolve(&self, href: &str) -> Result<Url, TransportError>;

    /// The session's anti-forgery token.
    async fn form_key(&self) -> Result<String, TransportError>;

    async fn fetch_document(&self, url: &Url) -> Result<Page, TransportError>;

    async fn homepage(&self) -> Result<Page, TransportError>;

    /// Open giveaways matching `title`, as the ajax listing fragment.
    async fn search(&self, title: &str) -> Result<Page, TransportError>;

    async fn submit_form(&self, url: &Url, form: FormBody) -> Result<(), TransportError>;
}

/// [`Transport`] over one shared reqwest client. The session is established
/// on first use and reused by every request after that. A failed
/// establishment is kept too, so a bad session is probed only once.
#[derive(Debug)]
pub struct ReqwestTransport {
    settings: SiteSettings,
    credentials: Credentials,
    site_root: Url,
    session: OnceCell<Result<Session, SessionError>>,
}

impl ReqwestTransport {
    pub fn new(settings: SiteSettings, credentials: Credentials) -> Result<Self, TransportError> {
        let site_root = settings.site_root()?;
        Ok(Self {
            settings,
            credentials,
            site_root,
            session: OnceCell::new(),
        })
    }

    /// Establish (once) and return the session, or the error the first
    /// attempt ended with.
    pub async fn establish(&self) -> Result<&Session, SessionError> {
        self.session
            .get_or_init(|| Session::establish(&self.settings, &self.credentials))
            .await
            .as_ref()
            .map_err(Clone::clone)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        form: Option<&FormBody>,
        ajax: bool,
    ) -> Result<reqwest::Response, TransportError> {
        let session = self.establish().await?;
        agent_debug!("{} {}", method, url);
        let mut request = session.request(method, url, form);
        if ajax {
            request = request.header("X-Requested-With", "XMLHttpRequest");
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        check_status(&response)?;
        Ok(response)
    }

    async fn fetch_page(
        &self,
        method: Method,
        url: Url,
        form: Option<&FormBody>,
        ajax: bool,
    ) -> Result<Page, TransportError> {
        let response = self.send(method, url, form, ajax).await?;
        read_page(response, self.settings.max_bytes).await
    }

    fn join(&self, path: &str) -> Result<Url, TransportError> {
        self.site_root
            .join(path)
            .map_err(|err| TransportError::new(TransportFailure::InvalidUrl, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    fn resolve(&self, href: &str) -> Result<Url, TransportError> {
        self.join(href)
    }

    async fn form_key(&self) -> Result<String, TransportError> {
        Ok(self.establish().await?.form_key().to_string())
    }

    async fn fetch_document(&self, url: &Url) -> Result<Page, TransportError> {
        self.fetch_page(Method::GET, url.clone(), None, false).await
    }

    async fn homepage(&self) -> Result<Page, TransportError> {
        let url = self.site_root.clone();
        self.fetch_page(Method::GET, url, None, false).await
    }

    async fn search(&self, title: &str) -> Result<Page, TransportError> {
        let url = self.join(SEARCH_PATH)?;
        let form = FormBody::new().field("view", "open").field("query", title);
        self.fetch_page(Method::POST, url, Some(&form), true).await
    }

    async fn submit_form(&self, url: &Url, form: FormBody) -> Result<(), TransportError> {
        self.send(Method::POST, url.clone(), Some(&form), false)
            .await
            .map(|_| ())
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(TransportError::new(
        TransportFailure::HttpStatus(status.as_u16()),
        status.to_string(),
    ))
}

/// Stream the body up to `max_bytes` and decode it into a [`Page`].
pub(crate) async fn read_page(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Page, TransportError> {
    check_status(&response)?;

    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(TransportError::new(
                TransportFailure::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                },
                "response too large",
            ));
        }
    }

    let url = response.url().clone();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(TransportError::new(
                TransportFailure::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                },
                "response too large",
            ));
        }
        bytes.extend_from_slice(&chunk);
    }

    let html = decode_body(&bytes, content_type.as_deref())
        .map_err(|err| TransportError::new(TransportFailure::Decode, err.to_string()))?;
    Ok(Page::new(url, html))
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportFailure::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return TransportError::new(TransportFailure::Redirect, err.to_string());
    }
    TransportError::new(TransportFailure::Network, err.to_string())
}
