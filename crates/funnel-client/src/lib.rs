//! funnel-client
//!
//! The `ChallengeBackend` seam used by the board controller, and its HTTP
//! implementation over the challenge REST API.

mod auth_context;
mod backend;
mod error;
mod http_backend;
mod retry;


pub use auth_context::AuthContext;
pub use backend::ChallengeBackend;
pub use error::{ClientError, Result as ClientResult};
pub use http_backend::HttpChallengeBackend;
pub use retry::{IsRetryable, with_retry};
