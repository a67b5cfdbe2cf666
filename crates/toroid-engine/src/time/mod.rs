//! Time subsystem.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame
//! to obtain a `FrameTime` carrying delta, total elapsed time and the frame
//! index consumed by the transform update.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime, TimeSource};
