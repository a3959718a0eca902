// SPDX-License-Identifier: GPL-3.0-only

//! Hand-off of texture pairs to the native processing stage
//!
//! The processing routine itself is opaque. It is called once per frame on
//! the render thread, blocks until it is done with the textures and
//! returns nothing the pipeline looks at. A panic inside it is not caught.

use crate::backends::camera::TextureId;

/// Raw signature of the native entry point
///
/// `(input_texture, output_texture, width, height, front_facing)`
pub type NativeProcessFrameFn = unsafe extern "C" fn(i32, i32, i32, i32, bool);

/// Per-frame processing stage
///
/// Implementations get exclusive use of both textures for the duration of
/// the call and must not keep the ids afterwards. The controller is locked
/// while the call runs, so implementations must not call back into it.
pub trait FrameProcessor: Send {
    fn process_frame(
        &mut self,
        input: TextureId,
        output: TextureId,
        width: i32,
        height: i32,
        front_facing: bool,
    );
}

impl<F> FrameProcessor for F
where
    F: FnMut(TextureId, TextureId, i32, i32, bool) + Send,
{
    fn process_frame(
        &mut self,
        input: TextureId,
        output: TextureId,
        width: i32,
        height: i32,
        front_facing: bool,
    ) {
        self(input, output, width, height, front_facing)
    }
}

/// Processor backed by a native function pointer
#[derive(Debug, Clone, Copy)]
pub struct NativeFrameProcessor {
    entry: NativeProcessFrameFn,
}

impl NativeFrameProcessor {
    /// Wrap a native entry point
    ///
    /// # Safety
    ///
    /// `entry` must be safe to call from the render thread with any texture
    /// names the rendering surface hands out while its GL context is
    /// current there.
    pub unsafe fn new(entry: NativeProcessFrameFn) -> Self {
        Self { entry }
    }
}

impl FrameProcessor for NativeFrameProcessor {
    fn process_frame(
        &mut self,
        input: TextureId,
        output: TextureId,
        width: i32,
        height: i32,
        front_facing: bool,
    ) {
        // SAFETY: the caller of `new` vouched for the entry point, and the
        // controller only calls this on the render thread.
        unsafe { (self.entry)(input.raw(), output.raw(), width, height, front_facing) }
    }
}
