//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, SubmissionRepository, TechnologyRepository};
use crate::utils::errors::SalaryBoardError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub submissions: SubmissionRepository,
    pub technologies: TechnologyRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            submissions: SubmissionRepository::new(pool.clone()),
            technologies: TechnologyRepository::new(pool.clone()),
            pool,
        }
    }

    /// Verify the database answers queries
    pub async fn health_check(&self) -> Result<(), SalaryBoardError> {
        super::connection::health_check(&self.pool)
            .await
            .map_err(|e| SalaryBoardError::ServiceUnavailable(format!("database: {}", e)))
    }

    /// Get system statistics
    pub async fn get_system_stats(&self) -> Result<serde_json::Value, SalaryBoardError> {
        let submissions = self.submissions.count().await?;
        let technologies = self.technologies.count().await?;

        Ok(serde_json::json!({
            "submissions": { "total": submissions },
            "technologies": { "total": technologies },
            "pool": { "size": self.pool.size(), "idle": self.pool.num_idle() }
        }))
    }
}
