//! Hook runner adapters.

mod process;
mod recording;

pub use process::ProcessHookRunner;
pub use recording::{NoopHookRunner, RecordingHookRunner};
