//! Submission listing parameters: filters, sorting and the raw query string form

use std::collections::BTreeSet;
use std::str::FromStr;
use crate::config::ApiConfig;
use crate::utils::errors::{SalaryBoardError, Result};
use crate::utils::helpers::normalize_whitespace;
use super::pagination::PageRequest;

/// Sort orders offered by the submissions listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionSort {
    #[default]
    Recent,
    Oldest,
    SalaryDesc,
    SalaryAsc,
    Alpha,
}

impl SubmissionSort {
    /// `ORDER BY` clause over the `submissions s` alias; ids break ties
    pub fn order_by(&self) -> &'static str {
        match self {
            SubmissionSort::Recent => "s.created_at DESC, s.id DESC",
            SubmissionSort::Oldest => "s.created_at ASC, s.id ASC",
            SubmissionSort::SalaryDesc => "s.salary_in_cents DESC, s.id DESC",
            SubmissionSort::SalaryAsc => "s.salary_in_cents ASC, s.id ASC",
            SubmissionSort::Alpha => "LOWER(s.company_name) ASC, s.id ASC",
        }
    }
}

impl FromStr for SubmissionSort {
    type Err = SalaryBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "recent" => Ok(SubmissionSort::Recent),
            "oldest" => Ok(SubmissionSort::Oldest),
            "salary_desc" => Ok(SubmissionSort::SalaryDesc),
            "salary_asc" => Ok(SubmissionSort::SalaryAsc),
            "alpha" | "alphabetical" => Ok(SubmissionSort::Alpha),
            other => Err(SalaryBoardError::InvalidInput(format!(
                "Unknown sort {:?}; expected one of recent, oldest, salary_desc, salary_asc, alpha",
                other
            ))),
        }
    }
}

/// Direction of the legacy `sortSalary` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = SalaryBoardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(SalaryBoardError::InvalidInput(format!(
                "Unknown sortSalary {:?}; expected asc or desc",
                other
            ))),
        }
    }
}

/// Listing parameters as sent by the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSubmissionsRequest {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub q: Option<String>,
    pub technology_ids: Vec<i64>,
    pub sort: Option<SubmissionSort>,
    pub sort_salary: Option<SortDirection>,
}

impl ListSubmissionsRequest {
    /// Parse a raw query string.
    ///
    /// Technology ids may be repeated (`technologyIds=1&technologyIds=2`), use the
    /// bracket form (`technologyIds[]=1`) or be comma separated. Unknown keys are
    /// ignored and empty values count as absent.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut request = Self::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_ref() {
                "page" => request.page = Some(parse_int("page", value)?),
                "perPage" | "per_page" => request.per_page = Some(parse_int("perPage", value)?),
                "salaryMin" | "salary_min" => request.salary_min = Some(parse_int("salaryMin", value)?),
                "salaryMax" | "salary_max" => request.salary_max = Some(parse_int("salaryMax", value)?),
                "q" | "searchQuery" => request.q = Some(value.to_string()),
                "technologyIds" | "technologyIds[]" | "technology_ids" => {
                    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                        request.technology_ids.push(parse_int("technologyIds", part)?);
                    }
                }
                "sort" => request.sort = Some(value.parse()?),
                "sortSalary" | "sort_salary" => request.sort_salary = Some(value.parse()?),
                _ => {}
            }
        }

        Ok(request)
    }

    /// The sort to apply: `sort` wins, then the legacy salary direction, then recent first
    pub fn effective_sort(&self) -> SubmissionSort {
        match (self.sort, self.sort_salary) {
            (Some(sort), _) => sort,
            (None, Some(SortDirection::Asc)) => SubmissionSort::SalaryAsc,
            (None, Some(SortDirection::Desc)) => SubmissionSort::SalaryDesc,
            (None, None) => SubmissionSort::default(),
        }
    }
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value
        .parse::<i64>()
        .map_err(|_| SalaryBoardError::InvalidInput(format!("{} must be an integer, got {:?}", name, value)))
}

/// Conjunctive predicates over submissions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    /// Trimmed, never blank
    pub search: Option<String>,
    /// Distinct; a submission matches when it has at least one of them
    pub technology_ids: Vec<i64>,
}

impl SubmissionFilter {
    pub fn is_empty(&self) -> bool {
        self.salary_min.is_none()
            && self.salary_max.is_none()
            && self.search.is_none()
            && self.technology_ids.is_empty()
    }
}

/// Fully resolved listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionQuery {
    pub page: PageRequest,
    pub filter: SubmissionFilter,
    pub sort: SubmissionSort,
}

impl SubmissionQuery {
    pub fn resolve(request: ListSubmissionsRequest, limits: &ApiConfig) -> Result<Self> {
        if let (Some(min), Some(max)) = (request.salary_min, request.salary_max) {
            if min > max {
                return Err(SalaryBoardError::InvalidInput(format!(
                    "salaryMin ({}) cannot be greater than salaryMax ({})",
                    min, max
                )));
            }
        }

        let page = PageRequest::resolve(
            request.page,
            request.per_page,
            limits.default_per_page,
            limits.max_per_page,
        );
        let sort = request.effective_sort();

        // Stored names are whitespace-collapsed, so the term must be too.
        let search = request
            .q
            .as_deref()
            .map(normalize_whitespace)
            .filter(|q| !q.is_empty());

        let technology_ids = request
            .technology_ids
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        Ok(Self {
            page,
            filter: SubmissionFilter {
                salary_min: request.salary_min,
                salary_max: request.salary_max,
                search,
                technology_ids,
            },
            sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::config::Settings;

    fn limits() -> ApiConfig {
        Settings::default().api
    }

    #[test]
    fn test_parse_full_query() {
        let request = ListSubmissionsRequest::from_query(
            "page=2&perPage=50&salaryMin=100000&salaryMax=900000&q=Acme%20Corp&technologyIds[]=3&technologyIds=1,2&sort=salary_desc",
        )
        .unwrap();

        assert_eq!(request.page, Some(2));
        assert_eq!(request.per_page, Some(50));
        assert_eq!(request.salary_min, Some(100000));
        assert_eq!(request.salary_max, Some(900000));
        assert_eq!(request.q.as_deref(), Some("Acme Corp"));
        assert_eq!(request.technology_ids, vec![3, 1, 2]);
        assert_eq!(request.sort, Some(SubmissionSort::SalaryDesc));
    }

    #[test]
    fn test_parse_encoded_bracket_key_and_empty_values() {
        let request = ListSubmissionsRequest::from_query("technologyIds%5B%5D=7&salaryMin=&q=").unwrap();
        assert_eq!(request.technology_ids, vec![7]);
        assert_eq!(request.salary_min, None);
        assert_eq!(request.q, None);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_matches!(
            ListSubmissionsRequest::from_query("perPage=ten"),
            Err(SalaryBoardError::InvalidInput(msg)) if msg.contains("perPage")
        );
        assert!(ListSubmissionsRequest::from_query("technologyIds=rust").is_err());
        assert!(ListSubmissionsRequest::from_query("sort=random").is_err());
    }

    #[test]
    fn test_effective_sort() {
        let mut request = ListSubmissionsRequest::default();
        assert_eq!(request.effective_sort(), SubmissionSort::Recent);

        request.sort_salary = Some(SortDirection::Asc);
        assert_eq!(request.effective_sort(), SubmissionSort::SalaryAsc);

        request.sort = Some(SubmissionSort::Oldest);
        assert_eq!(request.effective_sort(), SubmissionSort::Oldest);
    }

    #[test]
    fn test_resolve_normalizes() {
        let request = ListSubmissionsRequest {
            per_page: Some(1000),
            q: Some("   ".to_string()),
            technology_ids: vec![5, 2, 5, 2],
            ..Default::default()
        };
        let query = SubmissionQuery::resolve(request, &limits()).unwrap();

        assert_eq!(query.page.per_page, 100);
        assert_eq!(query.page.page, 1);
        assert_eq!(query.filter.search, None);
        assert_eq!(query.filter.technology_ids, vec![2, 5]);
        assert_eq!(query.sort, SubmissionSort::Recent);
    }

    #[test]
    fn test_resolve_collapses_search_whitespace() {
        let request = ListSubmissionsRequest::from_query("q=%20Acme%20%20%20Corp%20").unwrap();
        let query = SubmissionQuery::resolve(request, &limits()).unwrap();
        assert_eq!(query.filter.search.as_deref(), Some("Acme Corp"));
    }

    #[test]
    fn test_resolve_rejects_inverted_salary_range() {
        let request = ListSubmissionsRequest {
            salary_min: Some(500),
            salary_max: Some(100),
            ..Default::default()
        };
        assert_matches!(
            SubmissionQuery::resolve(request, &limits()),
            Err(SalaryBoardError::InvalidInput(_))
        );
    }

    #[test]
    fn test_sort_names() {
        assert_eq!("alphabetical".parse::<SubmissionSort>().unwrap(), SubmissionSort::Alpha);
        assert_eq!("SALARY_ASC".parse::<SubmissionSort>().unwrap(), SubmissionSort::SalaryAsc);
        assert!(SubmissionSort::Alpha.order_by().starts_with("LOWER(s.company_name)"));
    }
}
