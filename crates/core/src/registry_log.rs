/// Minimal logger for the registry so core stays host-agnostic.
/// Implement this in the CLI or adapt it from the host mod loader.
pub trait RegistryLog: Send + Sync {
    fn info(&self, msg: &str) {
        let _ = msg;
    }
    fn warn(&self, msg: &str) {
        let _ = msg;
    }
    fn error(&self, msg: &str) {
        let _ = msg;
    }
    fn debug(&self, msg: &str) {
        let _ = msg;
    }
}

/// No-op logger if you don't care about logs.
pub struct NoopLog;
impl RegistryLog for NoopLog {}
