use crate::types::HealthRes;

/// Liveness check shared by every HTTP surface.
///
/// Reports only that the process is up and serving; it does not probe the record store.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    /// Creates a new instance of HealthService.
    pub fn new() -> Self {
        Self
    }

    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Diagnostics API is alive".into(),
        }
    }
}
