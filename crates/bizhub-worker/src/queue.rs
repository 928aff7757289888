//! Job queue abstraction for enqueuing and dequeuing background jobs.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing;
use uuid::Uuid;

use bizhub_core::error::AppError;
use bizhub_database::repositories::job::JobRepository;
use bizhub_entity::job::model::{CreateJob, Job};

/// Job queue for enqueuing and dequeuing work
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for database persistence
    repo: Arc<JobRepository>,
    /// Seconds before the first retry; doubles per attempt
    retry_base_delay_seconds: u64,
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(repo: Arc<JobRepository>, retry_base_delay_seconds: u64) -> Self {
        Self {
            repo,
            retry_base_delay_seconds,
        }
    }

    /// Enqueue a new job
    pub async fn enqueue(&self, params: CreateJob) -> Result<Job, AppError> {
        let job = self.repo.create(&params).await?;

        tracing::debug!(
            "Enqueued job: id={}, type='{}', queue='{}', priority={:?}",
            job.id,
            job.job_type,
            job.queue,
            job.priority
        );

        Ok(job)
    }

    /// Dequeue the next available job from the given queue
    pub async fn dequeue(&self, queue: &str) -> Result<Option<Job>, AppError> {
        let job = self.repo.dequeue(queue).await?;

        if let Some(ref job) = job {
            tracing::debug!(
                "Dequeued job: id={}, type='{}', queue='{}'",
                job.id,
                job.job_type,
                job.queue
            );
        }

        Ok(job)
    }

    /// Mark a job as completed successfully
    pub async fn complete(&self, job_id: Uuid) -> Result<(), AppError> {
        self.repo.complete(job_id).await?;
        tracing::debug!("Job completed: id={}", job_id);
        Ok(())
    }

    /// Mark a job as permanently failed
    pub async fn fail(&self, job_id: Uuid, error: &str) -> Result<(), AppError> {
        self.repo.fail(job_id, error).await?;
        tracing::debug!("Job failed: id={}, error='{}'", job_id, error);
        Ok(())
    }

    /// Return a job to the queue after a transient failure, backed off
    /// exponentially by attempt count.
    pub async fn retry_later(&self, job: &Job, error: &str) -> Result<(), AppError> {
        let delay = retry_delay(self.retry_base_delay_seconds, job.attempts);
        let scheduled_at = Utc::now() + delay;

        self.repo.reschedule(job.id, scheduled_at, error).await?;
        tracing::debug!(
            "Job rescheduled: id={}, attempt={}, next_run={}",
            job.id,
            job.attempts,
            scheduled_at
        );
        Ok(())
    }
}

/// Exponential backoff: `base * 2^(attempts - 1)` seconds.
///
/// `attempts` is the number of attempts already made (at least 1 when a
/// retry is being scheduled).
pub fn retry_delay(base_seconds: u64, attempts: i32) -> Duration {
    let exponent = attempts.saturating_sub(1).clamp(0, 16) as u32;
    Duration::seconds((base_seconds as i64).saturating_mul(1i64 << exponent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles_per_attempt() {
        assert_eq!(retry_delay(5, 1), Duration::seconds(5));
        assert_eq!(retry_delay(5, 2), Duration::seconds(10));
        assert_eq!(retry_delay(5, 3), Duration::seconds(20));
    }

    #[test]
    fn test_retry_delay_handles_zero_attempts() {
        assert_eq!(retry_delay(5, 0), Duration::seconds(5));
    }

    #[test]
    fn test_retry_delay_is_capped() {
        // Large attempt counts must not overflow.
        let delay = retry_delay(5, 1000);
        assert!(delay > Duration::zero());
    }
}
