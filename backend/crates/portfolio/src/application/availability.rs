//! Availability Use Case
//!
//! The current status is the latest entry of an append-only history.

use std::sync::Arc;

use crate::domain::entities::AvailabilityRecord;
use crate::domain::repository::AvailabilityRepository;
use crate::domain::value_objects::AvailabilityStatus;
use crate::error::{PortfolioError, PortfolioResult};

pub struct AvailabilityUseCase<R>
where
    R: AvailabilityRepository,
{
    repo: Arc<R>,
}

impl<R> AvailabilityUseCase<R>
where
    R: AvailabilityRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Latest status, `available` when nothing was ever recorded
    pub async fn current(&self) -> PortfolioResult<AvailabilityStatus> {
        Ok(self
            .repo
            .latest()
            .await?
            .map(|record| record.status)
            .unwrap_or_default())
    }

    /// Record a new status given as text
    pub async fn set(&self, raw_status: &str) -> PortfolioResult<AvailabilityStatus> {
        let status = raw_status
            .parse::<AvailabilityStatus>()
            .map_err(|_| PortfolioError::InvalidStatus)?;

        self.repo.append(&AvailabilityRecord::new(status)).await?;

        tracing::info!(status = %status, "Availability updated");
        Ok(status)
    }
}
