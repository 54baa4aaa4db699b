//! DOM-backed view for the upload trigger.
//!
//! Elements are looked up by id on every call, so the view keeps working
//! if the component re-renders them.

use platescan_core::View;
use wasm_bindgen::JsCast;
use web_sys::{Document, File, HtmlImageElement, HtmlInputElement};

use crate::config::{FILE_INPUT_ID, RESULT_TEXT_SELECTOR, UPLOADED_IMAGE_ID};

/// Reads `#fileInput`, writes `#result span` and `#uploadedImage`,
/// and reports server errors with `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DomView;

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

impl View for DomView {
    type File = File;

    fn selected_file(&self) -> Option<File> {
        element_by_id::<HtmlInputElement>(FILE_INPUT_ID)?.files()?.get(0)
    }

    fn set_result_text(&self, text: &str) {
        match document().and_then(|d| d.query_selector(RESULT_TEXT_SELECTOR).ok().flatten()) {
            Some(span) => span.set_text_content(Some(text)),
            None => log::warn!("{} not found, plate {} not shown", RESULT_TEXT_SELECTOR, text),
        }
    }

    fn set_image_source(&self, url: &str) {
        match element_by_id::<HtmlImageElement>(UPLOADED_IMAGE_ID) {
            Some(img) => img.set_src(url),
            None => log::warn!("#{} not found", UPLOADED_IMAGE_ID),
        }
    }

    fn show_error(&self, message: &str) {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::error!("could not alert: {}", message);
        }
    }
}
