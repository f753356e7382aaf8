//! Tests for batch progress tracking

#[cfg(test)]
mod tests {
    use gridsnap::io::progress::ProgressManager;
    use std::path::Path;

    // Tests ProgressManager construction
    // Verified by setting wrong initial state
    #[test]
    fn test_progress_manager_new() {
        let pm = ProgressManager::new();

        assert_eq!(pm.completed(), 0);
        assert_eq!(pm.detected(), 0);
    }

    // Tests default matches new
    #[test]
    fn test_progress_manager_default() {
        let pm = ProgressManager::default();

        assert_eq!(pm.completed(), 0);
        assert_eq!(pm.detected(), 0);
    }

    // Tests completions and detections are counted separately
    // Verified by counting every completion as detected
    #[test]
    fn test_counts() {
        let mut pm = ProgressManager::new();
        pm.initialize(3);

        pm.start_file(Path::new("a.png"));
        pm.complete_file(true);
        pm.start_file(Path::new("b.png"));
        pm.complete_file(false);
        pm.start_file(Path::new("dir/c.png"));
        pm.complete_file(true);
        pm.finish();

        assert_eq!(pm.completed(), 3);
        assert_eq!(pm.detected(), 2);
    }

    // Tests re-initialization resets counters
    #[test]
    fn test_initialize_resets() {
        let mut pm = ProgressManager::new();
        pm.initialize(1);
        pm.complete_file(true);

        pm.initialize(2);

        assert_eq!(pm.completed(), 0);
        assert_eq!(pm.detected(), 0);
    }

    // Tests calls without a bar are harmless
    #[test]
    fn test_uninitialized_calls() {
        let mut pm = ProgressManager::new();

        pm.start_file(Path::new("orphan.png"));
        pm.complete_file(false);
        pm.finish();

        assert_eq!(pm.completed(), 1);
    }
}
