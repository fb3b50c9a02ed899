//! Error types for qrlocal operations

use thiserror::Error;

/// Result type alias using qrlocal's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrlocal operations
#[derive(Error, Debug)]
pub enum Error {
    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        match e {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Image(other.to_string()),
        }
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::QrEncode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::NoQrCodeFound.to_string(),
            "No QR code found in image"
        );
        assert_eq!(
            Error::Config("bad level".into()).to_string(),
            "Configuration error: bad level"
        );
    }

    #[test]
    fn test_image_io_error_maps_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = image::ImageError::IoError(io).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_qr_error_maps_to_encode() {
        let err: Error = qrcode::types::QrError::DataTooLong.into();
        assert!(matches!(err, Error::QrEncode(_)));
    }
}
