pub mod item_filter;
pub mod workshop_scanner;

pub use item_filter::ItemFilter;
pub use workshop_scanner::{ScanStatistics, WorkshopItem, WorkshopScanner};
