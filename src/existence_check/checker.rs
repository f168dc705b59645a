use super::config::{ExistenceCheckConfig, ExistenceCheckConfigError};
use super::existence_status::ExistenceStatus;
use super::http_lookup::HttpExistenceLookup;
use super::lookup::CuitExistenceLookup;
use crate::normalization::normalize;
use crate::observability::labels::{Labels, NO_LABEL};
use crate::secondary_validation::check_canonical;
use crate::stats::ExistenceCheckMetrics;
use crate::tokio::TOKIO_RUNTIME;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Debounced existence check bound to a single form field.
///
/// Every call to [ExistenceChecker::check] supersedes the calls still pending,
/// so only the latest value typed by the user can produce an outcome.
pub struct ExistenceChecker<L> {
    lookup: L,
    debounce: Duration,
    generation: AtomicU64,
    labels: Labels,
}

impl ExistenceChecker<HttpExistenceLookup> {
    pub fn from_config(config: ExistenceCheckConfig) -> Result<Self, ExistenceCheckConfigError> {
        let debounce = config.debounce;
        Ok(ExistenceChecker::new(HttpExistenceLookup::new(config)?, debounce))
    }
}

impl<L: CuitExistenceLookup> ExistenceChecker<L> {
    pub fn new(lookup: L, debounce: Duration) -> Self {
        ExistenceChecker {
            lookup,
            debounce,
            generation: AtomicU64::new(0),
            labels: NO_LABEL,
        }
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Checks whether `raw` is already registered, ignoring the record identified by `exclude`.
    ///
    /// Empty and locally invalid values are not looked up. Lookup failures are
    /// reported as [ExistenceStatus::Error], which does not block submission.
    pub async fn check(&self, raw: Option<&str>, exclude: Option<&str>) -> ExistenceStatus {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let metrics = ExistenceCheckMetrics::new(&self.labels);

        let cuit = normalize(raw.unwrap_or_default());
        if cuit.is_empty() || check_canonical(&cuit).is_err() {
            return ExistenceStatus::NotChecked;
        }
        let exclude = exclude.map(normalize).filter(|exclude| !exclude.is_empty());

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if self.is_stale(generation) {
            metrics.superseded.increment(1);
            return ExistenceStatus::Superseded;
        }

        metrics.requests.increment(1);
        let result = self.lookup.exists(&cuit, exclude.as_deref()).await;
        if self.is_stale(generation) {
            metrics.superseded.increment(1);
            return ExistenceStatus::Superseded;
        }

        match result {
            Ok(true) => ExistenceStatus::Exists,
            Ok(false) => ExistenceStatus::Available,
            Err(err) => {
                metrics.errors.increment(1);
                ExistenceStatus::Error(err.to_string())
            }
        }
    }

    /// Runs [ExistenceChecker::check] to completion on the shared runtime.
    /// Must not be called from within an async context.
    pub fn check_blocking(&self, raw: Option<&str>, exclude: Option<&str>) -> ExistenceStatus {
        TOKIO_RUNTIME.block_on(self.check(raw, exclude))
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::existence_check::lookup::LookupError;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};

    const DEBOUNCE: Duration = Duration::from_millis(400);

    #[derive(Default)]
    struct FakeLookup {
        registered: Vec<&'static str>,
        delay: Duration,
        fail: bool,
        calls: AtomicUsize,
        requests: Mutex<Vec<(String, Option<String>)>>,
    }

    impl FakeLookup {
        fn with_registered(registered: Vec<&'static str>) -> Self {
            FakeLookup {
                registered,
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CuitExistenceLookup for FakeLookup {
        async fn exists(&self, cuit: &str, exclude: Option<&str>) -> Result<bool, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests
                .lock()
                .unwrap()
                .push((cuit.to_string(), exclude.map(str::to_string)));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(LookupError::Transport("connection refused".to_string()));
            }
            let registered = self.registered.iter().any(|registered| *registered == cuit);
            Ok(registered && exclude != Some(cuit))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_registered_and_available_cuits() {
        let checker = ExistenceChecker::new(
            FakeLookup::with_registered(vec!["20305361160"]),
            DEBOUNCE,
        );
        assert_eq!(
            checker.check(Some("20-30536116-0"), None).await,
            ExistenceStatus::Exists
        );
        assert_eq!(
            checker.check(Some("27234567891"), None).await,
            ExistenceStatus::Available
        );
        assert_eq!(checker.lookup().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_are_normalized_before_lookup() {
        let checker = ExistenceChecker::new(
            FakeLookup::with_registered(vec!["20305361160"]),
            DEBOUNCE,
        );
        assert_eq!(
            checker
                .check(Some("20 30536116 0"), Some("20-30536116-0"))
                .await,
            ExistenceStatus::Available
        );
        let requests = checker.lookup().requests.lock().unwrap().clone();
        assert_eq!(
            requests,
            vec![("20305361160".to_string(), Some("20305361160".to_string()))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_or_empty_values_are_not_looked_up() {
        let checker = ExistenceChecker::new(FakeLookup::default(), DEBOUNCE);
        for raw in [None, Some(""), Some("2030536116"), Some("20305361169")] {
            assert_eq!(checker.check(raw, None).await, ExistenceStatus::NotChecked);
        }
        assert_eq!(checker.lookup().calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_failure_fails_open() {
        let checker = ExistenceChecker::new(
            FakeLookup {
                fail: true,
                ..Default::default()
            },
            DEBOUNCE,
        );
        let status = checker.check(Some("20305361160"), None).await;
        assert_eq!(
            status,
            ExistenceStatus::Error("Error making HTTP request: connection refused".to_string())
        );
        assert!(!status.blocks_submission());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pending_check_is_superseded_during_debounce() {
        let checker = Arc::new(ExistenceChecker::new(
            FakeLookup::with_registered(vec!["20305361160"]),
            DEBOUNCE,
        ));

        let first = {
            let checker = checker.clone();
            tokio::spawn(async move { checker.check(Some("20305361160"), None).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = checker.check(Some("27234567891"), None).await;

        assert_eq!(first.await.unwrap(), ExistenceStatus::Superseded);
        assert_eq!(second, ExistenceStatus::Available);
        // Only the latest value reached the backend
        assert_eq!(checker.lookup().calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let checker = Arc::new(ExistenceChecker::new(
            FakeLookup {
                registered: vec!["20305361160"],
                delay: Duration::from_secs(1),
                ..Default::default()
            },
            DEBOUNCE,
        ));

        let first = {
            let checker = checker.clone();
            tokio::spawn(async move { checker.check(Some("20305361160"), None).await })
        };
        // The first lookup is in flight when the value changes
        tokio::time::sleep(Duration::from_millis(600)).await;
        let second = checker.check(Some("27234567891"), None).await;

        assert_eq!(first.await.unwrap(), ExistenceStatus::Superseded);
        assert_eq!(second, ExistenceStatus::Available);
        assert_eq!(checker.lookup().calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_value_supersedes_pending_check() {
        let checker = Arc::new(ExistenceChecker::new(FakeLookup::default(), DEBOUNCE));

        let first = {
            let checker = checker.clone();
            tokio::spawn(async move { checker.check(Some("20305361160"), None).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(
            checker.check(Some("2030"), None).await,
            ExistenceStatus::NotChecked
        );
        assert_eq!(first.await.unwrap(), ExistenceStatus::Superseded);
        assert_eq!(checker.lookup().calls(), 0);
    }

    #[test]
    fn test_check_blocking() {
        let checker = ExistenceChecker::new(
            FakeLookup::with_registered(vec!["30712345671"]),
            Duration::ZERO,
        );
        assert_eq!(
            checker.check_blocking(Some("30-71234567-1"), None),
            ExistenceStatus::Exists
        );
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = ExistenceCheckConfig::default().with_endpoint(String::new());
        assert!(matches!(
            ExistenceChecker::from_config(config),
            Err(ExistenceCheckConfigError::EmptyEndpoint)
        ));
    }
}
