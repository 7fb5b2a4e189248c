use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::executor::ProbeExecutor;
use super::outcome::{ProbeError, ProbeOutcome};
use super::pool::PermitPool;
use super::target::is_valid_target;

/// Fans one probe per method out over a bounded pool of workers.
#[derive(Clone)]
pub struct Dispatcher {
    executor: Arc<dyn ProbeExecutor>,
    pool: PermitPool,
}

impl Dispatcher {
    /// `limit` is the maximum number of probes in flight; zero is raised to one.
    #[must_use]
    pub fn new(executor: Arc<dyn ProbeExecutor>, limit: usize) -> Self {
        Self {
            executor,
            pool: PermitPool::new(limit),
        }
    }

    #[must_use]
    pub const fn pool(&self) -> &PermitPool {
        &self.pool
    }

    /// Probes `target` once per entry of `methods` and returns one outcome
    /// per method, in input order.
    ///
    /// An invalid target yields a single validation outcome and no probe is
    /// issued.
    pub async fn dispatch<S>(&self, target: &str, methods: &[S]) -> Vec<ProbeOutcome>
    where
        S: AsRef<str>,
    {
        if !is_valid_target(target) {
            warn!("Rejected target '{}': invalid URL format", target);
            return vec![ProbeOutcome::validation()];
        }

        let target: Arc<str> = Arc::from(target);
        let mut handles: Vec<(String, JoinHandle<ProbeOutcome>)> =
            Vec::with_capacity(methods.len());
        for method in methods {
            let method = method.as_ref().to_owned();
            let executor = Arc::clone(&self.executor);
            let pool = self.pool.clone();
            let task_target = Arc::clone(&target);
            let task_method = method.clone();
            let handle = tokio::spawn(async move {
                let _permit = match pool.acquire().await {
                    Ok(permit) => permit,
                    Err(err) => {
                        return ProbeOutcome::failure(
                            task_method,
                            ProbeError::Interrupted {
                                detail: err.to_string(),
                            },
                        );
                    }
                };
                debug!("Probing {} with {}", task_target, task_method);
                executor.execute(&task_method, &task_target).await
            });
            handles.push((method, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (method, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("Probe task for {} did not complete: {}", method, err);
                    ProbeOutcome::failure(
                        method,
                        ProbeError::Interrupted {
                            detail: err.to_string(),
                        },
                    )
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}
