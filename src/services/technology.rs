//! Technology service implementation
//!
//! Name normalization, create-if-absent semantics, ranked search and the
//! paginated technology listing.

use regex::Regex;
use tracing::{debug, info};
use crate::config::ApiConfig;
use crate::database::repositories::TechnologyRepository;
use crate::models::{CreateTechnologyRequest, ListTechnologiesRequest, Page, PageRequest, SearchTechnologiesRequest, SearchTechnologiesResponse, Technology};
use crate::utils::errors::{SalaryBoardError, Result};
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging;

pub const MAX_TECHNOLOGY_NAME_LEN: usize = 50;

const NAME_PATTERN: &str = r"^[\p{L}\p{N} .+#/_()&'-]+$";

/// Normalization and character rules for technology names
#[derive(Debug, Clone)]
pub struct TechnologyNameRules {
    pattern: Regex,
}

impl TechnologyNameRules {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(NAME_PATTERN)
            .map_err(|e| SalaryBoardError::Config(format!("Invalid technology name pattern: {}", e)))?;
        Ok(Self { pattern })
    }

    /// Trim, collapse inner whitespace and check the allowed character set
    pub fn normalize(&self, raw: &str) -> Result<String> {
        let name = normalize_whitespace(raw);

        if name.is_empty() {
            return Err(SalaryBoardError::InvalidInput("Technology name is required".to_string()));
        }

        if name.chars().count() > MAX_TECHNOLOGY_NAME_LEN {
            return Err(SalaryBoardError::InvalidInput(format!(
                "Technology name must be at most {} characters",
                MAX_TECHNOLOGY_NAME_LEN
            )));
        }

        if !self.pattern.is_match(&name) {
            return Err(SalaryBoardError::InvalidInput(format!(
                "Technology name {:?} may only contain letters, digits, spaces and . + # / _ ( ) & ' -",
                name
            )));
        }

        Ok(name)
    }
}

/// Technology service for managing the shared tag catalogue
#[derive(Clone)]
pub struct TechnologyService {
    repository: TechnologyRepository,
    limits: ApiConfig,
    names: TechnologyNameRules,
}

impl TechnologyService {
    /// Create a new TechnologyService instance
    pub fn new(repository: TechnologyRepository, limits: ApiConfig, names: TechnologyNameRules) -> Self {
        Self { repository, limits, names }
    }

    /// Create a technology unless one with the same name (ignoring case) exists
    pub async fn create_technology(&self, request: CreateTechnologyRequest) -> Result<Technology> {
        let name = self.names.normalize(&request.name)?;
        debug!(name = %name, "Creating technology");

        if let Some(existing) = self.repository.find_by_name(&name).await? {
            info!(technology_id = existing.id, name = %existing.name, "Technology already exists");
            return Err(SalaryBoardError::TechnologyExists { name: existing.name });
        }

        let technology = self.repository.create(&name).await?;
        logging::log_technology_created(technology.id, &technology.name, false);

        Ok(technology)
    }

    /// Ranked autocomplete search
    pub async fn search_technologies(&self, request: SearchTechnologiesRequest) -> Result<SearchTechnologiesResponse> {
        let limit = request
            .limit
            .filter(|l| *l >= 1)
            .unwrap_or(i64::from(self.limits.default_search_limit))
            .min(i64::from(self.limits.max_search_limit));
        let q = request.q.as_deref().map(normalize_whitespace).unwrap_or_default();

        debug!(q = %q, limit = limit, "Searching technologies");
        let technologies = self.repository.search(&q, limit).await?;

        Ok(SearchTechnologiesResponse { technologies })
    }

    /// Alphabetical, paginated listing
    pub async fn list_technologies(&self, request: ListTechnologiesRequest) -> Result<Page<Technology>> {
        let page = PageRequest::resolve(
            request.page,
            request.per_page,
            self.limits.default_per_page,
            self.limits.max_per_page,
        );
        let q = request.q.as_deref().map(normalize_whitespace).filter(|q| !q.is_empty());

        let (items, total) = self.repository.list(q.as_deref(), page).await?;
        Ok(Page::new(items, total, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn rules() -> TechnologyNameRules {
        TechnologyNameRules::new().unwrap()
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(rules().normalize("  Ruby   on  Rails ").unwrap(), "Ruby on Rails");
    }

    #[test]
    fn test_normalize_accepts_common_names() {
        let rules = rules();
        for name in [
            "C++",
            "C#",
            "Node.js",
            "CI/CD",
            "scikit-learn",
            "Go",
            "Élixir",
            "k8s",
            "Amazon Web Services (AWS)",
            "R&D tooling",
            "Moody's Analytics",
        ] {
            assert_eq!(rules.normalize(name).unwrap(), name);
        }
    }

    #[test]
    fn test_normalize_rejects_invalid_names() {
        let rules = rules();
        assert_matches!(rules.normalize("   "), Err(SalaryBoardError::InvalidInput(_)));
        assert_matches!(rules.normalize("rust; DROP TABLE"), Err(SalaryBoardError::InvalidInput(_)));
        assert_matches!(rules.normalize("<script>"), Err(SalaryBoardError::InvalidInput(_)));
        assert_matches!(
            rules.normalize(&"x".repeat(MAX_TECHNOLOGY_NAME_LEN + 1)),
            Err(SalaryBoardError::InvalidInput(msg)) if msg.contains("at most")
        );
    }
}
