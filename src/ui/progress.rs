use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Bar over the items whose config files are being read.
    pub fn create_item_progress(&self, total_items: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_items);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} items {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Reading config files...");
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub fn update_item_progress(pb: &ProgressBar, item_id: &str) {
    pb.inc(1);
    pb.set_message(item_id.to_string());
}

/// Clears the bar so the table that follows starts on a clean line.
pub fn finish_item_progress(pb: &ProgressBar) {
    pb.finish_and_clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_manager_returns_hidden_bars() {
        let manager = ProgressManager::new(false);

        let pb = manager.create_item_progress(10);
        assert!(pb.is_hidden());
    }

    #[test]
    fn test_item_progress_updates() {
        let pb = ProgressBar::hidden();
        pb.set_length(3);

        update_item_progress(&pb, "1865940669");
        update_item_progress(&pb, "1866016173");
        assert_eq!(pb.position(), 2);
        assert_eq!(pb.message(), "1866016173");

        finish_item_progress(&pb);
        assert!(pb.is_finished());
    }
}
