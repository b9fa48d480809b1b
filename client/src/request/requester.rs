use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use log::{debug, warn};
use serde_json::Value;
use tokio::{runtime::Handle, sync::oneshot};

use crate::{
    error::RequestError,
    request::{
        route::CompiledRequest,
        transport::{classify, Transport},
    },
};

/// Runs admitted requests against the transport, one task per request.
pub struct Requester {
    transport: Arc<dyn Transport>,
    runtime: Handle,
}

impl Requester {
    pub fn new(transport: Arc<dyn Transport>, runtime: Handle) -> Self {
        Self { transport, runtime }
    }

    /// Captures the runtime the caller is running on.
    pub fn from_current_runtime(transport: Arc<dyn Transport>) -> Result<Self, RequestError> {
        let runtime = Handle::try_current().map_err(|_| RequestError::NoRuntime)?;
        Ok(Self::new(transport, runtime))
    }

    /// Queues `request` and returns immediately. `complete` is called exactly
    /// once, on a runtime worker, with the classified response.
    pub(crate) fn submit<F>(&self, request: CompiledRequest, complete: F)
    where
        F: FnOnce(Result<Value, RequestError>) + Send + 'static,
    {
        let transport = self.transport.clone();
        debug!("Queueing {} (bucket {})", request, request.route.bucket());
        self.runtime.spawn(async move {
            let description = request.to_string();
            let result = classify(transport.execute(request).await);
            if let Err(err) = &result {
                warn!("{} failed: {}", description, err);
            }
            complete(result);
        });
    }
}

/// Completion of a queued request.
///
/// Resolves to the transformed success value or the classified error.
/// Dropping it abandons the result without affecting the request already in
/// flight.
pub struct PendingResult<T> {
    receiver: oneshot::Receiver<Result<T, RequestError>>,
}

impl<T> PendingResult<T> {
    pub(crate) fn channel() -> (oneshot::Sender<Result<T, RequestError>>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Self { receiver })
    }
}

impl<T> Future for PendingResult<T> {
    type Output = Result<T, RequestError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(RequestError::Canceled)))
    }
}
