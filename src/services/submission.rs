//! Submission service implementation
//!
//! This service validates incoming compensation reports, stores them with their
//! technologies and serves the filtered listing.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use url::Url;
use crate::config::ApiConfig;
use crate::database::repositories::SubmissionRepository;
use crate::models::{CreateSubmissionRequest, ListSubmissionsRequest, NewSubmission, Page, Submission, SubmissionQuery};
use crate::services::technology::TechnologyNameRules;
use crate::utils::errors::{SalaryBoardError, Result};
use crate::utils::helpers::{non_blank, normalize_whitespace};
use crate::utils::logging;

/// Upper bound of the salary input, in cents
pub const MAX_SALARY_IN_CENTS: i64 = 99_999_999;
pub const MAX_FIELD_LEN: usize = 200;
pub const MAX_TEXT_LEN: usize = 2000;

/// Validate and normalize a create request
///
/// Technology names come back deduplicated and sorted case-insensitively, so
/// concurrent creates lock new names in the same order.
pub fn validate_submission(request: CreateSubmissionRequest, names: &TechnologyNameRules) -> Result<NewSubmission> {
    let company_name = required_field("companyName", &request.company_name)?;
    let position = required_field("position", &request.position)?;
    let company_link = normalize_company_link(&request.company_link)?;

    if !(1..=MAX_SALARY_IN_CENTS).contains(&request.salary_in_cents) {
        return Err(SalaryBoardError::InvalidInput(format!(
            "salaryInCents must be between 1 and {}",
            MAX_SALARY_IN_CENTS
        )));
    }

    let comments = optional_text("comments", request.comments)?;
    let benefits = optional_text("benefits", request.benefits)?;

    if let Some(id) = request.technology_ids.iter().find(|id| **id < 1) {
        return Err(SalaryBoardError::InvalidInput(format!("Invalid technology id: {}", id)));
    }
    let technology_ids = request
        .technology_ids
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut technology_names = BTreeMap::new();
    for raw in &request.technology_names {
        let name = names.normalize(raw)?;
        technology_names.entry(name.to_lowercase()).or_insert(name);
    }
    let technology_names = technology_names.into_values().collect();

    Ok(NewSubmission {
        company_name,
        company_link,
        position,
        salary_in_cents: request.salary_in_cents,
        comments,
        benefits,
        technology_ids,
        technology_names,
    })
}

fn required_field(name: &str, value: &str) -> Result<String> {
    let value = normalize_whitespace(value);
    if value.is_empty() {
        return Err(SalaryBoardError::InvalidInput(format!("{} is required", name)));
    }
    if value.chars().count() > MAX_FIELD_LEN {
        return Err(SalaryBoardError::InvalidInput(format!(
            "{} must be at most {} characters",
            name, MAX_FIELD_LEN
        )));
    }
    Ok(value)
}

fn optional_text(name: &str, value: Option<String>) -> Result<Option<String>> {
    let value = non_blank(value);
    if let Some(text) = &value {
        if text.chars().count() > MAX_TEXT_LEN {
            return Err(SalaryBoardError::InvalidInput(format!(
                "{} must be at most {} characters",
                name, MAX_TEXT_LEN
            )));
        }
    }
    Ok(value)
}

/// Accept absolute http(s) URLs; a bare host gets an `https://` prefix
pub fn normalize_company_link(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SalaryBoardError::InvalidInput("companyLink is required".to_string()));
    }
    if trimmed.chars().count() > MAX_FIELD_LEN {
        return Err(SalaryBoardError::InvalidInput(format!(
            "companyLink must be at most {} characters",
            MAX_FIELD_LEN
        )));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let invalid = || SalaryBoardError::InvalidInput(format!("companyLink is not a valid URL: {:?}", trimmed));
    let url = Url::parse(&candidate).map_err(|_| invalid())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(candidate),
        _ => Err(invalid()),
    }
}

/// Submission service for creating and browsing compensation reports
#[derive(Clone)]
pub struct SubmissionService {
    repository: SubmissionRepository,
    limits: ApiConfig,
    names: TechnologyNameRules,
}

impl SubmissionService {
    /// Create a new SubmissionService instance
    pub fn new(repository: SubmissionRepository, limits: ApiConfig, names: TechnologyNameRules) -> Self {
        Self { repository, limits, names }
    }

    /// Validate and store a submission, returning it with its technologies
    pub async fn create_submission(&self, request: CreateSubmissionRequest) -> Result<Submission> {
        let submission = validate_submission(request, &self.names)?;
        debug!(
            company = %submission.company_name,
            technology_ids = submission.technology_ids.len(),
            technology_names = submission.technology_names.len(),
            "Creating submission"
        );

        let created = self.repository.create(submission).await?;

        for technology in &created.created_technologies {
            logging::log_technology_created(technology.id, &technology.name, true);
        }
        logging::log_submission_created(
            created.submission.id,
            created.submission.technologies.len(),
            created.submission.salary_in_cents,
        );

        Ok(created.submission)
    }

    /// Filtered, sorted, paginated listing
    pub async fn list_submissions(&self, request: ListSubmissionsRequest) -> Result<Page<Submission>> {
        let query = SubmissionQuery::resolve(request, &self.limits)?;
        debug!(
            page = query.page.page,
            per_page = query.page.per_page,
            sort = ?query.sort,
            filtered = !query.filter.is_empty(),
            "Listing submissions"
        );

        let (items, total) = self.repository.list(&query).await?;
        Ok(Page::new(items, total, query.page))
    }

    /// Get a single submission
    pub async fn get_submission(&self, submission_id: i64) -> Result<Submission> {
        debug!(submission_id = submission_id, "Getting submission");
        self.repository
            .find_by_id(submission_id)
            .await?
            .ok_or(SalaryBoardError::SubmissionNotFound { submission_id })
    }
}
