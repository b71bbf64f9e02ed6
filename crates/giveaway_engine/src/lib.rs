//! Giveaway engine: session, transport and the concurrent search-and-enter pipeline.
mod aggregator;
mod decode;
mod dispatcher;
mod document;
mod form;
mod handle;
mod processor;
mod session;
mod settings;
mod transport;
mod types;

pub use aggregator::OutcomeStream;
pub use decode::{decode_body, DecodeError};
pub use dispatcher::{SearchDispatcher, HOMEPAGE_TITLE};
pub use document::{candidates, classify, form_key, Page};
pub use form::{FormBody, FORM_CONTENT_TYPE};
pub use handle::{start_run, EngineHandle, RunConfig};
pub use processor::GiveawayProcessor;
pub use session::{Credentials, Session, PROBE_PATH, SESSION_COOKIE};
pub use settings::{DispatchSettings, SiteSettings, DEFAULT_SITE_URL};
pub use transport::{ReqwestTransport, Transport, SEARCH_PATH};
pub use types::{EngineEvent, RunError, SessionError, TransportError, TransportFailure};
