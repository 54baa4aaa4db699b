//! Application configuration.
//!
//! The page is served by the plate server itself, so the upload route is
//! relative. The element ids are the DOM contract of the upload trigger.

/// Upload endpoint, relative to the page origin.
pub const UPLOAD_URL: &str = platescan_core::UPLOAD_PATH;

/// File input holding the image to upload.
pub const FILE_INPUT_ID: &str = "fileInput";

/// Container whose `<span>` receives the plate number.
pub const RESULT_ID: &str = "result";

/// Selector of the plate number text.
pub const RESULT_TEXT_SELECTOR: &str = "#result span";

/// Image element showing the stored upload.
pub const UPLOADED_IMAGE_ID: &str = "uploadedImage";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_targets_result_container() {
        assert_eq!(RESULT_TEXT_SELECTOR, format!("#{} span", RESULT_ID));
        assert_eq!(UPLOAD_URL, "/upload");
    }
}
