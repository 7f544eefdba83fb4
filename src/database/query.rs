//! SQL construction for the submissions listing
//!
//! Every client-supplied value is bound as a parameter; only fixed fragments
//! (column lists, sort clauses) are pushed as SQL text.

use sqlx::{Postgres, QueryBuilder};
use crate::models::{SubmissionFilter, SubmissionQuery};
use crate::utils::helpers::contains_pattern;

/// Columns of `submissions s` in `SubmissionRow` order
pub const SUBMISSION_COLUMNS: &str =
    "s.id, s.company_name, s.company_link, s.position, s.salary_in_cents, s.comments, s.benefits, s.created_at";

/// Starts the `WHERE` clause on first use, then joins with `AND`
fn push_condition<'b, 'args>(
    builder: &'b mut QueryBuilder<'args, Postgres>,
    first: &mut bool,
) -> &'b mut QueryBuilder<'args, Postgres> {
    builder.push(if *first { " WHERE " } else { " AND " });
    *first = false;
    builder
}

/// Append the filter's predicates, conjunctively
pub fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &SubmissionFilter) {
    let mut first = true;

    if let Some(min) = filter.salary_min {
        push_condition(builder, &mut first)
            .push("s.salary_in_cents >= ")
            .push_bind(min);
    }

    if let Some(max) = filter.salary_max {
        push_condition(builder, &mut first)
            .push("s.salary_in_cents <= ")
            .push_bind(max);
    }

    if let Some(search) = filter.search.as_deref() {
        let pattern = contains_pattern(search);
        push_condition(builder, &mut first)
            .push("(LOWER(s.company_name) LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR LOWER(s.position) LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }

    if !filter.technology_ids.is_empty() {
        push_condition(builder, &mut first)
            .push("EXISTS (SELECT 1 FROM submission_technologies st WHERE st.submission_id = s.id AND st.technology_id = ANY(")
            .push_bind(filter.technology_ids.clone())
            .push("))");
    }
}

/// `SELECT COUNT(*)` over the filtered submissions
pub fn count_submissions(filter: &SubmissionFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM submissions s");
    push_filter(&mut builder, filter);
    builder
}

/// One sorted page of the filtered submissions
pub fn select_submissions(query: &SubmissionQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {} FROM submissions s", SUBMISSION_COLUMNS));
    push_filter(&mut builder, &query.filter);
    builder
        .push(" ORDER BY ")
        .push(query.sort.order_by())
        .push(" LIMIT ")
        .push_bind(query.page.limit())
        .push(" OFFSET ")
        .push_bind(query.page.offset());
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageRequest, SubmissionSort};

    fn query(filter: SubmissionFilter, sort: SubmissionSort) -> SubmissionQuery {
        SubmissionQuery {
            page: PageRequest { page: 3, per_page: 20 },
            filter,
            sort,
        }
    }

    #[test]
    fn test_count_without_filters() {
        let builder = count_submissions(&SubmissionFilter::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM submissions s");
    }

    #[test]
    fn test_count_with_all_filters() {
        let filter = SubmissionFilter {
            salary_min: Some(100),
            salary_max: Some(900),
            search: Some("Engineer".to_string()),
            technology_ids: vec![1, 2],
        };
        let builder = count_submissions(&filter);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM submissions s \
             WHERE s.salary_in_cents >= $1 \
             AND s.salary_in_cents <= $2 \
             AND (LOWER(s.company_name) LIKE $3 ESCAPE '\\' OR LOWER(s.position) LIKE $4 ESCAPE '\\') \
             AND EXISTS (SELECT 1 FROM submission_technologies st WHERE st.submission_id = s.id AND st.technology_id = ANY($5))"
        );
    }

    #[test]
    fn test_single_filter_starts_where_clause() {
        let filter = SubmissionFilter {
            salary_max: Some(500),
            ..Default::default()
        };
        let builder = count_submissions(&filter);
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM submissions s WHERE s.salary_in_cents <= $1");
    }

    #[test]
    fn test_select_page_with_sort() {
        let filter = SubmissionFilter {
            technology_ids: vec![4],
            ..Default::default()
        };
        let builder = select_submissions(&query(filter, SubmissionSort::SalaryAsc));
        let sql = builder.sql();

        assert!(sql.starts_with(&format!("SELECT {} FROM submissions s WHERE EXISTS", SUBMISSION_COLUMNS)));
        assert!(sql.ends_with("ORDER BY s.salary_in_cents ASC, s.id ASC LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_select_defaults_to_recent_first() {
        let builder = select_submissions(&query(SubmissionFilter::default(), SubmissionSort::default()));
        assert_eq!(
            builder.sql(),
            format!(
                "SELECT {} FROM submissions s ORDER BY s.created_at DESC, s.id DESC LIMIT $1 OFFSET $2",
                SUBMISSION_COLUMNS
            )
        );
    }
}
