//! Upload card: pick a file or photograph it, then stage it in a bucket.
//!
//! The camera is held through a [`CaptureSession`], which stops the stream
//! when dropped. Capturing, cancelling, picking a file, a successful upload
//! and unmounting the card all drop the session.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, warn};

use super::scope::ViewScope;
use super::state::DashboardPorts;
use crate::domain::ports::{CaptureDevice, CaptureDeviceError, CaptureStream, FileIntakeCommand};
use crate::domain::{Bucket, StoragePath, UploadFile};

/// Shown when upload is pressed with nothing selected.
pub const NOTHING_SELECTED: &str = "Select or photograph a file first.";
const NO_CAMERA: &str = "No camera is available on this device.";
const CAPTURE_CONTENT_TYPE: &str = "image/jpeg";

/// An open camera stream, stopped on drop.
pub struct CaptureSession {
    stream: Box<dyn CaptureStream>,
}

impl CaptureSession {
    /// Open the device.
    ///
    /// # Errors
    ///
    /// Returns the device error when the camera is missing or refused.
    pub fn open(device: &dyn CaptureDevice) -> Result<Self, CaptureDeviceError> {
        Ok(Self {
            stream: device.open()?,
        })
    }

    fn take_frame(&mut self) -> Result<Vec<u8>, CaptureDeviceError> {
        self.stream.frame().map(|frame| frame.jpeg)
    }
}

impl Drop for CaptureSession {
    fn drop(&mut self) {
        self.stream.stop();
    }
}

/// One upload card bound to a bucket.
pub struct UploadCard {
    bucket: Bucket,
    intake: Arc<dyn FileIntakeCommand>,
    device: Option<Arc<dyn CaptureDevice>>,
    clock: Arc<dyn Clock>,
    scope: ViewScope,
    selected: Option<UploadFile>,
    camera: Option<CaptureSession>,
    uploading: bool,
    message: Option<String>,
    error: Option<String>,
}

impl UploadCard {
    /// Card staging into `bucket`.
    pub fn new(ports: &DashboardPorts, bucket: Bucket) -> Self {
        Self {
            bucket,
            intake: Arc::clone(&ports.intake),
            device: ports.camera.clone(),
            clock: Arc::clone(&ports.clock),
            scope: ViewScope::new(),
            selected: None,
            camera: None,
            uploading: false,
            message: None,
            error: None,
        }
    }

    /// Scope the renderer closes on unmount.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }

    /// Target bucket.
    pub const fn bucket(&self) -> Bucket {
        self.bucket
    }

    /// Accepted formats for the file picker.
    pub const fn accept_hint(&self) -> &'static str {
        self.bucket.accept_hint()
    }

    /// Whether the platform offers a camera at all.
    pub const fn has_camera(&self) -> bool {
        self.device.is_some()
    }

    /// Whether the camera preview is live.
    pub const fn camera_open(&self) -> bool {
        self.camera.is_some()
    }

    /// Name of the file waiting to be uploaded.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_ref().map(UploadFile::name)
    }

    /// Whether an upload is in flight.
    pub const fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Success message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Take a file from the picker. Closes the camera.
    pub fn select_file(
        &mut self,
        file_name: &str,
        content_type: Option<String>,
        bytes: Vec<u8>,
    ) {
        self.camera = None;
        self.clear_messages();
        match UploadFile::new(file_name, content_type, bytes) {
            Ok(file) => self.selected = Some(file),
            Err(err) => {
                self.selected = None;
                self.error = Some(err.to_string());
            }
        }
    }

    /// Start the camera preview.
    pub fn open_camera(&mut self) {
        self.clear_messages();
        let Some(device) = self.device.as_deref() else {
            self.error = Some(NO_CAMERA.to_owned());
            return;
        };
        match CaptureSession::open(device) {
            Ok(session) => self.camera = Some(session),
            Err(err) => {
                warn!(error = %err, "opening the camera failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Photograph the current frame and select it. Closes the camera.
    pub fn capture(&mut self) {
        let Some(mut session) = self.camera.take() else {
            return;
        };
        self.clear_messages();
        let frame = session.take_frame();
        drop(session);
        let name = format!("capture-{}.jpg", self.clock.utc().timestamp_millis());
        let captured = frame
            .map_err(|err| err.to_string())
            .and_then(|jpeg| {
                UploadFile::new(name, Some(CAPTURE_CONTENT_TYPE.to_owned()), jpeg)
                    .map_err(|err| err.to_string())
            });
        match captured {
            Ok(file) => self.selected = Some(file),
            Err(message) => self.error = Some(message),
        }
    }

    /// Close the camera without capturing.
    pub fn cancel_camera(&mut self) {
        self.camera = None;
    }

    /// Stage the selected file.
    ///
    /// Returns the stored path on success so callers can show or log it.
    pub async fn upload(&mut self) -> Option<StoragePath> {
        self.clear_messages();
        let Some(file) = self.selected.as_ref() else {
            self.error = Some(NOTHING_SELECTED.to_owned());
            return None;
        };
        self.uploading = true;
        let outcome = self.intake.stage(self.bucket, file).await;
        if !self.scope.is_active() {
            return None;
        }
        self.uploading = false;
        match outcome {
            Ok(path) => {
                debug!(%path, "file staged");
                self.message = Some(self.bucket.success_message().to_owned());
                self.selected = None;
                self.camera = None;
                Some(path)
            }
            Err(err) => {
                self.error = Some(format!("Upload failed: {}", err.message()));
                None
            }
        }
    }

    fn clear_messages(&mut self) {
        self.message = None;
        self.error = None;
    }
}
