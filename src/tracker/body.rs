//! Pass-through response body that counts the bytes it forwards.

use super::PendingObservation;
use axum::body::{Bytes, HttpBody};
use http_body::{Frame, SizeHint};
use pin_project::{pin_project, pinned_drop};
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Response body decorator used by the wrapping mode.
///
/// Frames are forwarded unchanged. Data bytes are counted as they pass, and
/// the pending observation is recorded once: at end of stream, on a body
/// error, or when the body is dropped before completion.
#[pin_project(PinnedDrop)]
pub struct MeteredBody<B> {
    #[pin]
    inner: B,
    written: u64,
    pending: Option<PendingObservation>,
}

impl<B> MeteredBody<B> {
    // ---
    pub(crate) fn new(inner: B, pending: PendingObservation) -> Self {
        // ---
        Self {
            inner,
            written: 0,
            pending: Some(pending),
        }
    }
}

impl<B> HttpBody for MeteredBody<B>
where
    B: HttpBody<Data = Bytes>,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        // ---
        let this = self.project();
        let polled = ready!(this.inner.poll_frame(cx));

        match &polled {
            Some(Ok(frame)) => {
                if let Some(data) = frame.data_ref() {
                    *this.written += data.len() as u64;
                }
            }
            Some(Err(_)) | None => {
                if let Some(pending) = this.pending.take() {
                    pending.finish(*this.written);
                }
            }
        }

        Poll::Ready(polled)
    }

    fn is_end_stream(&self) -> bool {
        // ---
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        // ---
        self.inner.size_hint()
    }
}

#[pinned_drop]
impl<B> PinnedDrop for MeteredBody<B> {
    fn drop(self: Pin<&mut Self>) {
        // ---
        let this = self.project();
        if let Some(pending) = this.pending.take() {
            pending.finish(*this.written);
        }
    }
}
