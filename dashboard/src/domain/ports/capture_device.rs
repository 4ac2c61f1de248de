//! Port for a camera able to take still photos.
//!
//! Opening the device yields a stream that holds the hardware until it is
//! stopped; callers wrap it in a guard so every exit path releases it.

use super::define_port_error;

define_port_error! {
    /// Errors raised by capture devices.
    pub enum CaptureDeviceError {
        /// No camera is present or the platform cannot reach it.
        Unavailable { message: String } =>
            "camera unavailable: {message}",
        /// The user or platform refused camera access.
        PermissionDenied { message: String } =>
            "camera permission denied: {message}",
        /// Grabbing a frame failed.
        Capture { message: String } =>
            "camera capture failed: {message}",
    }
}

/// A JPEG-encoded still taken from an open stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Encoded image bytes.
    pub jpeg: Vec<u8>,
}

/// Port for opening the camera.
#[cfg_attr(test, mockall::automock)]
pub trait CaptureDevice: Send + Sync {
    /// Open a live stream, preferring the rear-facing camera.
    fn open(&self) -> Result<Box<dyn CaptureStream>, CaptureDeviceError>;
}

/// An open camera stream.
#[cfg_attr(test, mockall::automock)]
pub trait CaptureStream: Send {
    /// Grab the current frame as a JPEG.
    fn frame(&mut self) -> Result<CapturedFrame, CaptureDeviceError>;

    /// Stop every track. Calling it more than once is harmless.
    fn stop(&mut self);
}
