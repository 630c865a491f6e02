//! Tests for per-phase progress bars

#[cfg(test)]
mod tests {
    use rgbtree::io::progress::ProgressManager;

    // Tests phase bars start empty and track their own length
    // Verified by sharing one bar across phases
    #[test]
    fn test_phase_bars_independent() {
        let pm = ProgressManager::new();
        let grid = pm.phase("grid tree");
        let cube = pm.phase("cube tree");

        assert_eq!(grid.length(), Some(0));
        grid.set_length(100);
        grid.set_position(40);
        cube.set_length(10);

        assert_eq!(grid.position(), 40);
        assert_eq!(cube.position(), 0);
        assert_eq!(cube.length(), Some(10));
        assert_eq!(grid.prefix(), "grid tree");
        pm.finish();
    }

    // Tests default trait implementation
    // Verified by creating different initial states
    #[test]
    fn test_progress_manager_default() {
        let pm = ProgressManager::default();
        let bar = pm.phase("pairing");

        bar.set_length(5);
        bar.inc(5);
        bar.finish();

        assert!(bar.is_finished());
        pm.finish();
    }
}
