//! Technology repository implementation

use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use crate::models::technology::Technology;
use crate::models::PageRequest;
use crate::utils::errors::SalaryBoardError;
use crate::utils::helpers::contains_pattern;

#[derive(Clone)]
#[derive(Debug)]
pub struct TechnologyRepository {
    pool: PgPool,
}

impl TechnologyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new technology; a case-insensitive duplicate is a conflict
    pub async fn create(&self, name: &str) -> Result<Technology, SalaryBoardError> {
        let result = sqlx::query_as::<_, Technology>(
            r#"
            INSERT INTO technologies (name, created_at)
            VALUES ($1, $2)
            RETURNING id, name, created_at
            "#
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(technology) => Ok(technology),
            Err(e) if SalaryBoardError::is_unique_violation(&e) => Err(SalaryBoardError::TechnologyExists {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Find technology by name, ignoring case
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Technology>, SalaryBoardError> {
        let technology = sqlx::query_as::<_, Technology>(
            "SELECT id, name, created_at FROM technologies WHERE LOWER(name) = LOWER($1)"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(technology)
    }

    /// Ranked substring search: exact match first, then shorter names, then alphabetical
    pub async fn search(&self, q: &str, limit: i64) -> Result<Vec<Technology>, SalaryBoardError> {
        let technologies = sqlx::query_as::<_, Technology>(
            r#"
            SELECT id, name, created_at
            FROM technologies
            WHERE LOWER(name) LIKE $1 ESCAPE '\'
            ORDER BY
                CASE WHEN LOWER(name) = $2 THEN 0 ELSE 1 END,
                LENGTH(name),
                name
            LIMIT $3
            "#
        )
        .bind(contains_pattern(q))
        .bind(q.to_lowercase())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(technologies)
    }

    /// List technologies alphabetically with pagination and an optional name filter
    pub async fn list(&self, q: Option<&str>, page: PageRequest) -> Result<(Vec<Technology>, i64), SalaryBoardError> {
        let pattern = contains_pattern(q.unwrap_or_default());

        let count: (i64,) = sqlx::query_as(
            r#"SELECT COUNT(*) FROM technologies WHERE LOWER(name) LIKE $1 ESCAPE '\'"#
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let technologies = sqlx::query_as::<_, Technology>(
            r#"
            SELECT id, name, created_at
            FROM technologies
            WHERE LOWER(name) LIKE $1 ESCAPE '\'
            ORDER BY LOWER(name) ASC, id ASC
            LIMIT $2 OFFSET $3
            "#
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((technologies, count.0))
    }

    /// Count total technologies
    pub async fn count(&self) -> Result<i64, SalaryBoardError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM technologies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

/// Get-or-create by name inside an open transaction.
///
/// Returns the technology and whether this call inserted it.
pub async fn upsert_by_name(conn: &mut PgConnection, name: &str) -> Result<(Technology, bool), SalaryBoardError> {
    let inserted = sqlx::query_as::<_, Technology>(
        r#"
        INSERT INTO technologies (name, created_at)
        VALUES ($1, $2)
        ON CONFLICT ((LOWER(name))) DO NOTHING
        RETURNING id, name, created_at
        "#
    )
    .bind(name)
    .bind(Utc::now())
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(technology) = inserted {
        return Ok((technology, true));
    }

    let existing = sqlx::query_as::<_, Technology>(
        "SELECT id, name, created_at FROM technologies WHERE LOWER(name) = LOWER($1)"
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    Ok((existing, false))
}

/// Ids among `ids` that have no technology row
pub async fn missing_ids(conn: &mut PgConnection, ids: &[i64]) -> Result<Vec<i64>, SalaryBoardError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let missing: Vec<(i64,)> = sqlx::query_as(
        r#"
        SELECT requested.id
        FROM UNNEST($1::BIGINT[]) AS requested(id)
        LEFT JOIN technologies t ON t.id = requested.id
        WHERE t.id IS NULL
        ORDER BY requested.id
        "#
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;

    Ok(missing.into_iter().map(|(id,)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_technology_repository_creation() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/salaryboard")
            .unwrap();
        let repo = TechnologyRepository::new(pool);
        assert!(!repo.pool.is_closed());
    }
}
