pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod extractor;
pub mod models;
pub mod parsers;
pub mod session;
pub mod utils;
pub mod validator;

pub use crate::config::Config;
pub use crate::error::{ErrorKind, ExportError, FetchError, ValidationError};
pub use crate::extractor::extract;
pub use crate::models::{ProductRecord, RunResult, ScrapeMode, SessionSummary, NOT_AVAILABLE};
pub use crate::session::{Session, SessionConfig};
pub use crate::utils::http::{HttpFetcher, PageSource};
pub use crate::validator::{validate, NormalizedUrl};
