pub mod errors;
pub mod id;
pub mod log;

pub use errors::{ContentError, HotwireError, WatchError};
pub use id::{new_correlation_id, WatchId};
pub use log::{KeyValue, Logger, NopLogger, RecordingLogger, TracingLogger};

pub type Result<T> = std::result::Result<T, HotwireError>;
