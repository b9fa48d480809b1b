use std::sync::Arc;

use serde_json::Value;

use crate::{
    client::ClientState,
    error::RequestError,
    request::{requester::PendingResult, route::CompiledRequest},
};

type Transform<T> = Box<dyn FnOnce(&ClientState, Value) -> Result<T, RequestError> + Send>;

/// An admitted outbound operation. Building one runs every local check, so
/// holding a `RestAction` means the request is valid to send; nothing is
/// sent until it is queued.
#[must_use = "a RestAction does nothing until it is queued"]
pub struct RestAction<T> {
    state: Arc<ClientState>,
    request: CompiledRequest,
    transform: Transform<T>,
}

impl<T: Send + 'static> RestAction<T> {
    pub(crate) fn new<F>(state: Arc<ClientState>, request: CompiledRequest, transform: F) -> Self
    where
        F: FnOnce(&ClientState, Value) -> Result<T, RequestError> + Send + 'static,
    {
        Self {
            state,
            request,
            transform: Box::new(transform),
        }
    }

    pub fn request(&self) -> &CompiledRequest {
        &self.request
    }

    /// Sends the request; the returned future resolves once it completes.
    pub fn queue(self) -> PendingResult<T> {
        let (sender, pending) = PendingResult::channel();
        self.submit(move |result| {
            // the caller may have dropped the PendingResult
            let _ = sender.send(result);
        });
        pending
    }

    /// Sends the request and calls exactly one of the callbacks when it
    /// completes.
    pub fn queue_with<S, F>(self, on_success: S, on_failure: F)
    where
        S: FnOnce(T) + Send + 'static,
        F: FnOnce(RequestError) + Send + 'static,
    {
        self.submit(move |result| match result {
            Ok(value) => on_success(value),
            Err(err) => on_failure(err),
        });
    }

    fn submit<C>(self, complete: C)
    where
        C: FnOnce(Result<T, RequestError>) + Send + 'static,
    {
        let Self {
            state,
            request,
            transform,
        } = self;
        let completion_state = state.clone();
        state.requester.submit(request, move |result| {
            complete(result.and_then(|body| transform(completion_state.as_ref(), body)));
        });
    }

    /// Sends the request and waits for its result.
    pub async fn complete(self) -> Result<T, RequestError> {
        self.queue().await
    }
}

/// Transform for endpoints whose success body carries nothing of interest.
pub(crate) fn ignore_body(_: &ClientState, _: Value) -> Result<(), RequestError> {
    Ok(())
}
