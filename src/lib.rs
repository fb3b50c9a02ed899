//! qrlocal - QR code for the local development server
//!
//! Encodes a fixed LAN URL as a QR code and writes it to `qrcode_local.png`
//! so a phone on the same network can open the server by scanning it.
//!
//! # Example
//!
//! ```no_run
//! use qrlocal::{QrEmitter, confirmation};
//!
//! fn main() -> qrlocal::Result<()> {
//!     QrEmitter::new().emit()?;
//!     println!("{}", confirmation());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod config;
pub mod emitter;
pub mod error;
pub mod logging;
pub mod qr;

// Re-exports for convenience
pub use error::{Error, Result};

pub use config::{LogRotation, LoggingOptions, QrLocalConfig};
pub use emitter::{CONFIRMATION, LOCAL_URL, OUTPUT_FILE, QrEmitter, confirmation, encode_png};
pub use qr::{QrDecoder, QrEncoder, QrPayload, RenderOptions};
