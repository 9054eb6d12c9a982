//! Image capabilities: fetching image bytes and reading text out of them.

use super::error::CapabilityError;

/// The ability to fetch the bytes behind an image URL.
///
/// # Laws
///
/// - **L1 (Purity of failure)**: a failed fetch has no side effects; the
///   caller may skip the image and continue.
pub trait ImageSource {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CapabilityError>;
}

/// The ability to read text out of an image.
///
/// Implementations return the raw engine output. Cleaning is the caller's
/// job so that the same rules apply whichever engine produced the text.
pub trait TextExtractor {
    fn extract_text(&self, image: &[u8]) -> Result<String, CapabilityError>;
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>, CapabilityError> {
        (**self).fetch_image(url)
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_text(&self, image: &[u8]) -> Result<String, CapabilityError> {
        (**self).extract_text(image)
    }
}
