// SPDX-License-Identifier: GPL-3.0-only

//! Camera lookup and preview size selection

use super::types::{BackendError, BackendResult, CameraDescriptor, Facing, PreviewSize};
use crate::constants::preview::ASPECT_TOLERANCE;
use tracing::{debug, info};

/// Find the id of the first camera whose lens faces `facing`
pub fn find_camera_id(cameras: &[CameraDescriptor], facing: Facing) -> BackendResult<&str> {
    debug!(count = cameras.len(), %facing, "Looking up camera");

    cameras
        .iter()
        .find(|camera| camera.facing == facing)
        .map(|camera| camera.id.as_str())
        .ok_or_else(|| BackendError::DeviceNotFound(format!("no {} facing camera", facing)))
}

/// Pick the preview size for a camera
///
/// Among the output streams of `format`, picks the largest size that fits
/// inside the requested one and whose aspect ratio is within
/// [`ASPECT_TOLERANCE`] of the request. Returns `None` when nothing fits.
pub fn calc_preview_size(
    camera: &CameraDescriptor,
    format: i32,
    req_width: i32,
    req_height: i32,
) -> Option<PreviewSize> {
    if req_width <= 0 || req_height <= 0 {
        return None;
    }

    let aspect = req_width as f32 / req_height as f32;
    let mut best: Option<PreviewSize> = None;

    for config in &camera.stream_configs {
        if config.is_input || config.format != format || config.height <= 0 {
            continue;
        }
        if config.width > req_width || config.height > req_height {
            continue;
        }
        if (aspect - config.width as f32 / config.height as f32).abs() >= ASPECT_TOLERANCE {
            continue;
        }
        let grows = best.is_none_or(|b| b.width <= config.width && b.height <= config.height);
        if grows {
            best = Some(PreviewSize {
                width: config.width,
                height: config.height,
            });
        }
    }

    match best {
        Some(size) => info!(camera = %camera.id, %size, "Selected preview size"),
        None => debug!(camera = %camera.id, req_width, req_height, "No preview size fits"),
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::camera::types::StreamConfiguration;
    use crate::constants::preview::FORMAT_YUV_420_888;

    fn camera(id: &str, facing: Facing, configs: Vec<StreamConfiguration>) -> CameraDescriptor {
        CameraDescriptor {
            id: id.to_string(),
            facing,
            stream_configs: configs,
        }
    }

    #[test]
    fn test_find_first_matching_facing() {
        let cameras = vec![
            camera("0", Facing::Front, vec![]),
            camera("1", Facing::Back, vec![]),
            camera("2", Facing::Back, vec![]),
        ];
        assert_eq!(find_camera_id(&cameras, Facing::Back).unwrap(), "1");
        assert_eq!(find_camera_id(&cameras, Facing::Front).unwrap(), "0");
    }

    #[test]
    fn test_find_missing_facing() {
        let cameras = vec![camera("0", Facing::Back, vec![])];
        assert!(matches!(
            find_camera_id(&cameras, Facing::Front),
            Err(BackendError::DeviceNotFound(_))
        ));
    }

    #[test]
    fn test_preview_size_prefers_largest_fitting() {
        let cam = camera(
            "0",
            Facing::Back,
            vec![
                StreamConfiguration::output(FORMAT_YUV_420_888, 640, 360),
                StreamConfiguration::output(FORMAT_YUV_420_888, 3840, 2160),
                StreamConfiguration::output(FORMAT_YUV_420_888, 1280, 720),
                StreamConfiguration::output(FORMAT_YUV_420_888, 1440, 1080),
            ],
        );
        let size = calc_preview_size(&cam, FORMAT_YUV_420_888, 1920, 1080).unwrap();
        assert_eq!(size, PreviewSize { width: 1280, height: 720 });
    }

    #[test]
    fn test_preview_size_skips_inputs_and_other_formats() {
        let mut input = StreamConfiguration::output(FORMAT_YUV_420_888, 1920, 1080);
        input.is_input = true;
        let cam = camera(
            "0",
            Facing::Back,
            vec![input, StreamConfiguration::output(0x100, 1920, 1080)],
        );
        assert_eq!(calc_preview_size(&cam, FORMAT_YUV_420_888, 1920, 1080), None);
    }

    #[test]
    fn test_preview_size_rejects_non_positive_request() {
        let cam = camera(
            "0",
            Facing::Back,
            vec![StreamConfiguration::output(FORMAT_YUV_420_888, 640, 360)],
        );
        assert_eq!(calc_preview_size(&cam, FORMAT_YUV_420_888, 0, 360), None);
        assert_eq!(calc_preview_size(&cam, FORMAT_YUV_420_888, 640, -1), None);
        assert!(calc_preview_size(&cam, FORMAT_YUV_420_888, 640, 360).is_some());
    }
}
