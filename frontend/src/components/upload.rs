//! Image upload component.
//!
//! Renders the elements the [`DomView`](crate::DomView) works on; the
//! button runs the upload trigger.

use std::rc::Rc;

use leptos::*;
use platescan_core::{UploadOutcome, UploadTrigger};

use crate::{DomView, FetchTransport, FILE_INPUT_ID, RESULT_ID, UPLOADED_IMAGE_ID, UPLOAD_URL};

#[component]
pub fn UploadSection() -> impl IntoView {
    // Shared by every click; overlapping uploads only render the latest
    let trigger = Rc::new(UploadTrigger::new(DomView, FetchTransport::new(UPLOAD_URL)));

    let on_upload = move |_| {
        let trigger = Rc::clone(&trigger);
        spawn_local(async move {
            log::info!("📤 Uploading image...");
            match trigger.trigger().await {
                UploadOutcome::Recognized { plate_number, .. } => {
                    log::info!("✅ Plate read: {}", plate_number)
                }
                UploadOutcome::ApplicationError(message) => {
                    log::warn!("Server refused upload: {}", message)
                }
                // Already logged by the view
                UploadOutcome::TransportError(_) => {}
            }
        });
    };

    view! {
        <div class="upload-section">
            <input type="file" id=FILE_INPUT_ID accept="image/*"/>
            <button class="upload-button" on:click=on_upload>
                "Upload"
            </button>

            <div id=RESULT_ID class="result">
                "Plate number: "
                <span></span>
            </div>

            <img id=UPLOADED_IMAGE_ID class="uploaded-image" alt="Uploaded image"/>
        </div>
    }
}
