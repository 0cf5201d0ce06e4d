mod aggregator;
mod config;
mod engine;
mod error;
mod notifier;
mod pipeline;
mod ports;
#[cfg(test)]
mod testing;

pub use aggregator::{AggregateSnapshot, StateAggregator};
pub use config::{SizeCheckMode, ValidationConfig};
pub use engine::{EngineTask, FilePickEngine, LifecycleState};
pub use error::{EngineError, PortError};
pub use notifier::ChangeNotifier;
pub use pipeline::ValidationPipeline;
pub use ports::{FileReader, ImageDecoder, ValidFilesListener};
