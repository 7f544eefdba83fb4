//! Submission repository implementation

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;
use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use crate::database::query as sql;
use crate::database::repositories::technology;
use crate::models::submission::{NewSubmission, Submission, SubmissionRow};
use crate::models::technology::Technology;
use crate::models::SubmissionQuery;
use crate::utils::errors::SalaryBoardError;
use crate::utils::logging;

/// Outcome of storing a submission
#[derive(Debug, Clone)]
pub struct CreatedSubmission {
    pub submission: Submission,
    /// Technologies inserted on the fly from `technology_names`
    pub created_technologies: Vec<Technology>,
}

#[derive(Clone)]
#[derive(Debug)]
pub struct SubmissionRepository {
    pool: PgPool,
}

impl SubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a submission and its technology links atomically.
    ///
    /// Technology names are resolved get-or-create, merged with the requested ids
    /// and deduplicated. Any unknown id aborts the transaction.
    pub async fn create(&self, submission: NewSubmission) -> Result<CreatedSubmission, SalaryBoardError> {
        let started = Instant::now();
        let result = self.create_in_transaction(submission).await;
        logging::log_database_operation("create", "submissions", elapsed_ms(started), result.is_ok());
        result
    }

    async fn create_in_transaction(&self, submission: NewSubmission) -> Result<CreatedSubmission, SalaryBoardError> {
        // Dropping `tx` without commit rolls everything back.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            INSERT INTO submissions (company_name, company_link, position, salary_in_cents, comments, benefits, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, company_name, company_link, position, salary_in_cents, comments, benefits, created_at
            "#
        )
        .bind(&submission.company_name)
        .bind(&submission.company_link)
        .bind(&submission.position)
        .bind(submission.salary_in_cents)
        .bind(&submission.comments)
        .bind(&submission.benefits)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        let mut technology_ids: BTreeSet<i64> = submission.technology_ids.iter().copied().collect();
        let mut created_technologies = Vec::new();
        for name in &submission.technology_names {
            let (technology, inserted) = technology::upsert_by_name(&mut *tx, name).await?;
            technology_ids.insert(technology.id);
            if inserted {
                created_technologies.push(technology);
            }
        }
        let technology_ids: Vec<i64> = technology_ids.into_iter().collect();

        let missing = technology::missing_ids(&mut *tx, &technology_ids).await?;
        if !missing.is_empty() {
            return Err(SalaryBoardError::TechnologyNotFound { technology_ids: missing });
        }

        if !technology_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO submission_technologies (submission_id, technology_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                "#
            )
            .bind(row.id)
            .bind(&technology_ids)
            .execute(&mut *tx)
            .await?;
        }

        let technologies = technologies_for(&mut *tx, row.id).await?;

        tx.commit().await?;

        Ok(CreatedSubmission {
            submission: Submission::from_row(row, technologies),
            created_technologies,
        })
    }

    /// Find submission by ID, with its technologies
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Submission>, SalaryBoardError> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            "SELECT id, company_name, company_link, position, salary_in_cents, comments, benefits, created_at FROM submissions WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await?;
        let technologies = technologies_for(&mut *conn, row.id).await?;

        Ok(Some(Submission::from_row(row, technologies)))
    }

    /// One page of filtered, sorted submissions plus the total number of matches
    pub async fn list(&self, query: &SubmissionQuery) -> Result<(Vec<Submission>, i64), SalaryBoardError> {
        let started = Instant::now();

        let mut count_query = sql::count_submissions(&query.filter);
        let mut page_query = sql::select_submissions(query);

        let ((total,), rows) = futures::try_join!(
            count_query.build_query_as::<(i64,)>().fetch_one(&self.pool),
            page_query.build_query_as::<SubmissionRow>().fetch_all(&self.pool),
        )?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut technologies = self.technologies_by_submission(&ids).await?;

        let submissions = rows
            .into_iter()
            .map(|row| {
                let techs = technologies.remove(&row.id).unwrap_or_default();
                Submission::from_row(row, techs)
            })
            .collect();

        logging::log_database_operation("list", "submissions", elapsed_ms(started), true);
        Ok((submissions, total))
    }

    /// Technologies of several submissions in one query, each list ordered by name
    async fn technologies_by_submission(&self, submission_ids: &[i64]) -> Result<HashMap<i64, Vec<Technology>>, SalaryBoardError> {
        let mut grouped: HashMap<i64, Vec<Technology>> = HashMap::new();
        if submission_ids.is_empty() {
            return Ok(grouped);
        }

        let rows: Vec<(i64, i64, String, chrono::DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT st.submission_id, t.id, t.name, t.created_at
            FROM submission_technologies st
            JOIN technologies t ON st.technology_id = t.id
            WHERE st.submission_id = ANY($1)
            ORDER BY t.name
            "#
        )
        .bind(submission_ids)
        .fetch_all(&self.pool)
        .await?;

        for (submission_id, id, name, created_at) in rows {
            grouped
                .entry(submission_id)
                .or_default()
                .push(Technology { id, name, created_at });
        }

        Ok(grouped)
    }

    /// Number of technology links stored for a submission
    pub async fn count_technology_links(&self, submission_id: i64) -> Result<i64, SalaryBoardError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM submission_technologies WHERE submission_id = $1"
        )
        .bind(submission_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Count total submissions
    pub async fn count(&self) -> Result<i64, SalaryBoardError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM submissions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}

/// Technologies linked to one submission, ordered by name
async fn technologies_for(conn: &mut PgConnection, submission_id: i64) -> Result<Vec<Technology>, SalaryBoardError> {
    let technologies = sqlx::query_as::<_, Technology>(
        r#"
        SELECT t.id, t.name, t.created_at
        FROM technologies t
        JOIN submission_technologies st ON t.id = st.technology_id
        WHERE st.submission_id = $1
        ORDER BY t.name
        "#
    )
    .bind(submission_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(technologies)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
