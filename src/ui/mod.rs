pub mod logging;
pub mod output;
pub mod progress;
pub mod table;

pub use logging::init_logger;
pub use output::{OutputFormatter, OutputMode};
pub use progress::ProgressManager;
pub use table::{TableColumn, TableRenderer};
