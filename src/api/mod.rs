pub mod index;
pub mod process;

pub use index::handle_index;
pub use process::{handle_process, ProcessForm, ProcessJsonResponse, __path_handle_process};
