//! The upload trigger: pick the selected file, post it, render the reply.
//!
//! The trigger never touches a concrete UI or HTTP client. It talks to a
//! [`View`] (where the file comes from and where results go) and a
//! [`Transport`] (how the multipart request is sent), so the same logic
//! drives the browser page, the terminal client and the tests.
//!
//! ```rust,ignore
//! let trigger = UploadTrigger::new(view, transport);
//! match trigger.trigger().await {
//!     UploadOutcome::Recognized { plate_number, .. } => println!("{plate_number}"),
//!     _ => {}
//! }
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::TransportError;
use crate::reply::decode_reply;
use crate::types::UploadOutcome;

/// Where the selected file comes from and where results are shown.
pub trait View {
    /// Handle to the selected file (in-memory bytes, a browser `File`, ...).
    type File;

    /// First selected file, if any.
    fn selected_file(&self) -> Option<Self::File>;

    /// Show the recognized plate number.
    fn set_result_text(&self, text: &str);

    /// Point the preview image at the stored upload.
    fn set_image_source(&self, url: &str);

    /// Surface a server-reported error to the user.
    fn show_error(&self, message: &str);

    /// Handle a failed request. Logged only unless the view overrides it.
    fn report_failure(&self, error: &TransportError) {
        log::error!("upload failed: {}", error);
    }

    /// Render an outcome through the methods above.
    fn present(&self, outcome: &UploadOutcome) {
        match outcome {
            UploadOutcome::Recognized {
                plate_number,
                image_path,
            } => {
                self.set_result_text(plate_number);
                self.set_image_source(image_path);
            }
            UploadOutcome::ApplicationError(message) => self.show_error(message),
            UploadOutcome::TransportError(error) => self.report_failure(error),
        }
    }
}

/// Sends the multipart `POST /upload` and hands back the raw body.
///
/// `None` means no file was selected; the request is still sent, just
/// without a `file` field.
pub trait Transport<F> {
    fn post_upload(&self, file: Option<F>) -> impl Future<Output = Result<String, TransportError>>;
}

/// What to do when invocations overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseOrdering {
    /// Render every response as it arrives; the last one to arrive wins.
    Arrival,
    /// Render only the response to the most recent invocation.
    #[default]
    Latest,
}

/// Uploads the view's selected file and renders the reply into the view.
pub struct UploadTrigger<V, T> {
    view: V,
    transport: T,
    ordering: ResponseOrdering,
    sequence: AtomicU64,
}

impl<V, T> UploadTrigger<V, T>
where
    V: View,
    T: Transport<V::File>,
{
    pub fn new(view: V, transport: T) -> Self {
        Self {
            view,
            transport,
            ordering: ResponseOrdering::default(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Set how overlapping invocations are rendered
    pub fn with_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one upload.
    ///
    /// The outcome is returned whether or not it was rendered; under
    /// [`ResponseOrdering::Latest`] a superseded outcome is dropped from
    /// the view.
    pub async fn trigger(&self) -> UploadOutcome {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let file = self.view.selected_file();
        if file.is_none() {
            log::warn!("upload #{}: no file selected, sending an empty form", ticket);
        }

        let outcome = match self.transport.post_upload(file).await {
            Ok(body) => decode_reply(&body),
            Err(e) => UploadOutcome::TransportError(e),
        };

        if self.ordering == ResponseOrdering::Latest
            && ticket != self.sequence.load(Ordering::SeqCst)
        {
            log::debug!("upload #{}: superseded by a newer upload, not rendered", ticket);
            return outcome;
        }

        self.view.present(&outcome);
        outcome
    }
}
