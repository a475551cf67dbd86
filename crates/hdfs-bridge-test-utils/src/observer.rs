use hdfs_bridge_config::ResolveObserver;
use parking_lot::Mutex;

/// Observer that keeps every note for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    notes: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> Vec<String> {
        self.notes.lock().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.notes.lock().iter().any(|note| note.contains(needle))
    }
}

impl ResolveObserver for RecordingObserver {
    fn note(&self, message: &str) {
        self.notes.lock().push(message.to_string());
    }
}
