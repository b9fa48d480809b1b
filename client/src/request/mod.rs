mod error_response;
mod requester;
mod rest_action;
mod route;
pub mod routes;
mod transport;

pub use error_response::ErrorResponse;
pub use requester::{PendingResult, Requester};
pub use rest_action::RestAction;
pub use route::{CompiledRequest, CompiledRoute, Method, Route};
pub use transport::{classify, Transport, TransportResponse};

pub(crate) use rest_action::ignore_body;
