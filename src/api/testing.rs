use futures_util::future::{self, FutureExt, LocalBoxFuture};
use tokio::sync::oneshot;

use crate::errors::AppError;

/// A backend reply that has already settled.
pub fn ready<T: 'static>(result: Result<T, AppError>) -> LocalBoxFuture<'static, Result<T, AppError>> {
    future::ready(result).boxed_local()
}

/// A backend reply that settles when the matching sender fires.
pub fn pending<T: 'static>(reply: oneshot::Receiver<Result<T, AppError>>) -> LocalBoxFuture<'static, Result<T, AppError>> {
    async move { reply.await.unwrap_or_else(|_| Err(AppError::Transport("reply dropped".to_string()))) }.boxed_local()
}
