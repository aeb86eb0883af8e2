use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::RequestId;

/// Holds the single live task of one kind. Starting a new task cancels the old one.
#[derive(Debug, Default)]
pub struct TaskSlot {
    live: Option<(RequestId, CancellationToken)>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels whatever is live and hands out the token for `request`.
    pub fn replace(&mut self, request: RequestId) -> CancellationToken {
        let token = CancellationToken::new();
        if let Some((_, previous)) = self.live.replace((request, token.clone())) {
            previous.cancel();
        }
        token
    }

    /// Cancels `request` if it is still the live task. Returns whether anything was cancelled.
    pub fn cancel(&mut self, request: RequestId) -> bool {
        match &self.live {
            Some((live, token)) if *live == request => {
                token.cancel();
                self.live = None;
                true
            }
            _ => false,
        }
    }

    pub fn live_request(&self) -> Option<RequestId> {
        self.live.as_ref().map(|(request, _)| *request)
    }
}

/// Waits `delay`, then drives `task` to completion. Yields `None` as soon as
/// `token` is cancelled, whether during the wait or while `task` is running.
pub async fn run_cancellable<F, T>(token: CancellationToken, delay: Duration, task: F) -> Option<T>
where
    F: Future<Output = T>,
{
    if !delay.is_zero() {
        tokio::select! {
            _ = token.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }
    }
    if token.is_cancelled() {
        return None;
    }
    tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = task => Some(output),
    }
}
