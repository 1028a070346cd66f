use casting_platform::casting::{CastingService, EligibilityConfig, InMemoryCastingStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Casting service backed by a fresh process-local store.
pub(crate) fn in_memory_service(config: EligibilityConfig) -> Arc<CastingService> {
    let store = Arc::new(InMemoryCastingStore::new());
    Arc::new(CastingService::with_config(store, config))
}

/// Applies one tolerance to every numeric band.
pub(crate) fn uniform_tolerance(tolerance: i32) -> EligibilityConfig {
    EligibilityConfig {
        age_tolerance: tolerance,
        weight_tolerance: f64::from(tolerance),
        height_tolerance: f64::from(tolerance),
    }
}
