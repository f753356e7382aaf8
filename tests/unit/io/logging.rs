//! Tests for log level selection and subscriber installation

#[cfg(test)]
mod tests {
    use gridsnap::io::logging::{init, level_for};
    use tracing::level_filters::LevelFilter;

    // Tests verbosity flags map to increasing detail
    // Verified by ignoring the verbose count
    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(false, 0), LevelFilter::INFO);
        assert_eq!(level_for(false, 1), LevelFilter::DEBUG);
        assert_eq!(level_for(false, 2), LevelFilter::TRACE);
        assert_eq!(level_for(false, 9), LevelFilter::TRACE);
    }

    // Tests quiet wins over verbose
    #[test]
    fn test_quiet_overrides_verbose() {
        assert_eq!(level_for(true, 0), LevelFilter::WARN);
        assert_eq!(level_for(true, 3), LevelFilter::WARN);
    }

    // Tests repeated initialization keeps the first subscriber
    #[test]
    fn test_init_is_idempotent() {
        init(LevelFilter::WARN);
        init(LevelFilter::TRACE);
        tracing::warn!("logging initialized twice");
    }
}
