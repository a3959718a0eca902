// SPDX-License-Identifier: GPL-3.0-only
// Shared types for camera backend abstraction

//! Shared types for camera backends


/// Opaque GPU texture name, as handed out by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub i32);

impl TextureId {
    /// Raw texture name for the native call
    pub fn raw(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for TextureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tex#{}", self.0)
    }
}

/// A camera frame already bound to a texture pair
///
/// The textures belong to the rendering surface. The pipeline only borrows
/// them for a single native processing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle {
    /// Texture holding the camera image
    pub input_texture: TextureId,
    /// Texture presented after processing
    pub output_texture: TextureId,
    pub width: i32,
    pub height: i32,
}

impl FrameHandle {
    pub fn new(input_texture: TextureId, output_texture: TextureId, width: i32, height: i32) -> Self {
        Self {
            input_texture,
            output_texture,
            width,
            height,
        }
    }

    /// Both dimensions are strictly positive
    pub fn has_valid_size(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Which way the active camera faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    /// User-facing camera (selfie)
    Front,
    /// Rear-mounted camera
    #[default]
    Back,
}

impl Facing {
    pub fn from_front(front: bool) -> Self {
        if front { Facing::Front } else { Facing::Back }
    }

    pub fn is_front(self) -> bool {
        self == Facing::Front
    }

    /// The opposite facing
    pub fn toggled(self) -> Self {
        match self {
            Facing::Front => Facing::Back,
            Facing::Back => Facing::Front,
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Facing::Front => write!(f, "front"),
            Facing::Back => write!(f, "back"),
        }
    }
}

/// A camera exposed by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDescriptor {
    /// Backend-specific camera id
    pub id: String,
    /// Lens facing reported by the device
    pub facing: Facing,
    /// Stream configurations advertised by the camera
    pub stream_configs: Vec<StreamConfiguration>,
}

/// One advertised stream configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfiguration {
    /// Pixel format code
    pub format: i32,
    pub width: i32,
    pub height: i32,
    /// Input (reprocessing) streams are never used for preview
    pub is_input: bool,
}

impl StreamConfiguration {
    pub fn output(format: i32, width: i32, height: i32) -> Self {
        Self {
            format,
            width,
            height,
            is_input: false,
        }
    }
}

/// Resolution chosen for the preview stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for PreviewSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Camera device not found
    DeviceNotFound(String),
    /// Format not supported
    FormatNotSupported(String),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::DeviceNotFound(msg) => write!(f, "Device not found: {}", msg),
            BackendError::FormatNotSupported(msg) => write!(f, "Format not supported: {}", msg),
        }
    }
}

impl std::error::Error for BackendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facing_defaults_to_back() {
        assert_eq!(Facing::default(), Facing::Back);
        assert!(!Facing::default().is_front());
    }

    #[test]
    fn test_facing_toggle() {
        assert_eq!(Facing::Back.toggled(), Facing::Front);
        assert_eq!(Facing::from_front(true).toggled(), Facing::Back);
    }

    #[test]
    fn test_frame_size_validation() {
        let tex = TextureId(1);
        assert!(FrameHandle::new(tex, tex, 640, 480).has_valid_size());
        assert!(!FrameHandle::new(tex, tex, 0, 480).has_valid_size());
        assert!(!FrameHandle::new(tex, tex, 640, -1).has_valid_size());
    }
}
