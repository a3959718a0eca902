// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera preview pipeline

use crate::backends::camera::BackendError;
use crate::pipeline::SurfaceState;
use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for surface lifecycle operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Top-level error type
#[derive(Debug, Clone)]
pub enum AppError {
    /// Surface lifecycle errors
    Pipeline(PipelineError),
    /// Camera backend errors
    Backend(BackendError),
    /// Configuration errors
    Config(String),
    /// Filesystem errors
    Io(String),
}

/// Lifecycle errors raised by the render surface controller
///
/// Per-frame conditions never surface here: invalid frames are skipped and
/// missing display targets drop their report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// The camera permission collaborator did not report a grant
    PermissionDenied,
    /// Requested transition is not allowed from the current state
    InvalidTransition {
        from: SurfaceState,
        to: SurfaceState,
    },
    /// The surface has been torn down
    Destroyed,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Pipeline(e) => write!(f, "Pipeline error: {}", e),
            AppError::Backend(e) => write!(f, "Camera backend error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::PermissionDenied => write!(f, "Camera permission not granted"),
            PipelineError::InvalidTransition { from, to } => {
                write!(f, "Invalid surface transition: {} -> {}", from, to)
            }
            PipelineError::Destroyed => write!(f, "Surface already destroyed"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for PipelineError {}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        AppError::Pipeline(err)
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        AppError::Backend(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
