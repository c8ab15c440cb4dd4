//! Sink implementations

#[cfg(feature = "console")]
pub mod console;
pub mod debug_stream;
#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use debug_stream::DebugStreamSink;
#[cfg(feature = "file")]
pub use file::TextFileSink;

pub use crate::core::{Sink, SinkFilter};
