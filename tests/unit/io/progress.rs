//! Tests for pipeline progress display

#[cfg(test)]
mod tests {
    use chromarkov::io::progress::ProgressManager;
    use std::path::Path;

    // Tests the loading bar advances once per decoded image
    // Verified by skipping the increment
    #[test]
    fn test_loading_progress() {
        let mut manager = ProgressManager::new();
        manager.start_loading(3);
        manager.file_loaded(Path::new("a.png"));
        manager.file_loaded(Path::new("dir/b.png"));
        assert_eq!(manager.position(), 2);
        manager.finish();
    }

    // Tests starting a stage replaces the loading bar
    // Verified by reusing the loading bar for stages
    #[test]
    fn test_stage_resets_position() {
        let mut manager = ProgressManager::default();
        manager.start_loading(1);
        manager.file_loaded(Path::new("a.png"));
        manager.start_stage("Building palette");
        assert_eq!(manager.position(), 0);
        manager.start_stage("Generating image");
        manager.finish();
    }
}
