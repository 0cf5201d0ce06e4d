mod reader;
mod selection;

pub use reader::TokioFileReader;
pub use selection::{collect_selection, raw_file_from_path};
