//! Services module
//!
//! This module contains business logic services

pub mod submission;
pub mod technology;

// Re-export commonly used services
pub use submission::SubmissionService;
pub use technology::{TechnologyNameRules, TechnologyService};

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub submission_service: SubmissionService,
    pub technology_service: TechnologyService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(database: &DatabaseService, settings: &Settings) -> Result<Self> {
        let names = TechnologyNameRules::new()?;
        let submission_service = SubmissionService::new(database.submissions.clone(), settings.api.clone(), names.clone());
        let technology_service = TechnologyService::new(database.technologies.clone(), settings.api.clone(), names);

        Ok(Self {
            submission_service,
            technology_service,
        })
    }
}
