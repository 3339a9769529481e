use serde::Serialize;
use sqlx::{Pool, Sqlite, SqliteConnection};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::error::AppError;
use crate::models::{
    Assessment, AssessmentInput, DashboardStats, DbAssessment, DbFeedback, DbRecommendation,
    Feedback, PopularCourse, StoredRecommendation, agreement_rate,
};
use crate::scoring::{self, Recommendation};

/// Number of courses listed as most recommended on the dashboard.
pub const POPULAR_COURSE_LIMIT: i64 = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub assessment_id: i64,
    pub recommendations: Vec<Recommendation>,
}

fn validate_input(input: &AssessmentInput) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

async fn insert_assessment(
    conn: &mut SqliteConnection,
    input: &AssessmentInput,
) -> Result<i64, AppError> {
    let interests = &input.interests;
    let abilities = &input.abilities;

    let res = sqlx::query(
        "INSERT INTO assessments (
            name, school, strand, tvl_strand, science_interest, arts_interest,
            teaching_interest, business_interest, technology_interest, design_interest,
            sports_interest, logical_ability, creativity_ability, communication_ability,
            practical_ability, teamwork_ability
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(input.display_name())
    .bind(input.school.as_str())
    .bind(input.strand.label())
    .bind(input.tvl_strand.label())
    .bind(i64::from(interests.science))
    .bind(i64::from(interests.arts))
    .bind(i64::from(interests.teaching))
    .bind(i64::from(interests.business))
    .bind(i64::from(interests.technology))
    .bind(i64::from(interests.design))
    .bind(i64::from(interests.sports))
    .bind(i64::from(abilities.logical))
    .bind(i64::from(abilities.creativity))
    .bind(i64::from(abilities.communication))
    .bind(i64::from(abilities.practical))
    .bind(i64::from(abilities.teamwork))
    .execute(conn)
    .await
    .map_err(AppError::from_write)?;

    Ok(res.last_insert_rowid())
}

async fn insert_recommendations(
    conn: &mut SqliteConnection,
    assessment_id: i64,
    recommendations: &[Recommendation],
) -> Result<(), AppError> {
    for rec in recommendations {
        sqlx::query(
            "INSERT INTO recommendations (assessment_id, course_name, confidence_score, explanation)
             VALUES (?, ?, ?, ?)",
        )
        .bind(assessment_id)
        .bind(rec.course.name())
        .bind(rec.score)
        .bind(rec.explanation.as_str())
        .execute(&mut *conn)
        .await
        .map_err(AppError::from_write)?;
    }

    Ok(())
}

#[instrument(skip(pool))]
pub async fn create_assessment(
    pool: &Pool<Sqlite>,
    input: &AssessmentInput,
) -> Result<i64, AppError> {
    info!("Creating assessment");
    validate_input(input)?;

    let mut conn = pool.acquire().await?;
    insert_assessment(&mut conn, input).await
}

/// Stores recommendations for an existing assessment. All rows are written or
/// none are.
#[instrument(skip(pool, recommendations), fields(count = recommendations.len()))]
pub async fn add_recommendations(
    pool: &Pool<Sqlite>,
    assessment_id: i64,
    recommendations: &[Recommendation],
) -> Result<(), AppError> {
    info!("Adding recommendations");
    let mut tx = pool.begin().await?;
    insert_recommendations(&mut tx, assessment_id, recommendations).await?;
    tx.commit().await?;

    Ok(())
}

/// Scores an assessment and persists it together with its recommendations in
/// a single transaction.
#[instrument(skip(pool))]
pub async fn submit_assessment(
    pool: &Pool<Sqlite>,
    input: &AssessmentInput,
) -> Result<Submission, AppError> {
    info!("Submitting assessment");
    validate_input(input)?;

    let recommendations = scoring::recommend(input);

    let mut tx = pool.begin().await?;
    let assessment_id = insert_assessment(&mut tx, input).await?;
    insert_recommendations(&mut tx, assessment_id, &recommendations).await?;
    tx.commit().await?;

    info!(assessment_id, "Assessment stored");

    Ok(Submission {
        assessment_id,
        recommendations,
    })
}

/// Appends a rating. Repeated ratings for the same course are kept as
/// separate rows.
#[instrument(skip(pool))]
pub async fn add_feedback(
    pool: &Pool<Sqlite>,
    assessment_id: i64,
    course_name: &str,
    rating: i64,
) -> Result<i64, AppError> {
    info!("Adding feedback");
    let res = sqlx::query(
        "INSERT INTO feedback (assessment_id, course_name, rating)
         VALUES (?, ?, ?)",
    )
    .bind(assessment_id)
    .bind(course_name)
    .bind(rating)
    .execute(pool)
    .await
    .map_err(AppError::from_write)?;

    Ok(res.last_insert_rowid())
}

#[instrument(skip(pool))]
pub async fn get_assessment(pool: &Pool<Sqlite>, id: i64) -> Result<Assessment, AppError> {
    info!("Fetching assessment by ID");
    let row = sqlx::query_as::<_, DbAssessment>("SELECT * FROM assessments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(assessment) => Assessment::try_from(assessment),
        None => Err(AppError::NotFound(format!(
            "Assessment with id {} not found in database",
            id
        ))),
    }
}

#[instrument(skip(pool))]
pub async fn get_recommendations(
    pool: &Pool<Sqlite>,
    assessment_id: i64,
) -> Result<Vec<StoredRecommendation>, AppError> {
    info!("Getting recommendations for assessment");
    let rows = sqlx::query_as::<_, DbRecommendation>(
        "SELECT * FROM recommendations
         WHERE assessment_id = ?
         ORDER BY id",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(StoredRecommendation::from).collect())
}

#[instrument(skip(pool))]
pub async fn get_feedback(
    pool: &Pool<Sqlite>,
    assessment_id: i64,
) -> Result<Vec<Feedback>, AppError> {
    info!("Getting feedback for assessment");
    let rows = sqlx::query_as::<_, DbFeedback>(
        "SELECT * FROM feedback
         WHERE assessment_id = ?
         ORDER BY id",
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Feedback::try_from).collect()
}

async fn count_assessments(pool: &Pool<Sqlite>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM assessments")
        .fetch_one(pool)
        .await
}

async fn average_rating(pool: &Pool<Sqlite>) -> Result<Option<f64>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<f64>>("SELECT AVG(rating) FROM feedback")
        .fetch_one(pool)
        .await
}

async fn popular_courses(pool: &Pool<Sqlite>) -> Result<Vec<PopularCourse>, sqlx::Error> {
    sqlx::query_as::<_, PopularCourse>(
        "SELECT course_name, COUNT(*) AS count
         FROM recommendations
         GROUP BY course_name
         ORDER BY count DESC, course_name ASC
         LIMIT ?",
    )
    .bind(POPULAR_COURSE_LIMIT)
    .fetch_all(pool)
    .await
}

/// Summary figures for the dashboard. Each figure falls back to its empty
/// value when its query fails.
#[instrument(skip(pool))]
pub async fn get_dashboard_stats(pool: &Pool<Sqlite>) -> DashboardStats {
    info!("Computing dashboard stats");

    let mut stats = DashboardStats::empty();

    stats.total_assessments = count_assessments(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Assessment count unavailable, reporting 0");
        0
    });

    let average = average_rating(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Average rating unavailable, reporting 0%");
        None
    });

    stats.agreement_rate = agreement_rate(average);

    stats.popular_courses = popular_courses(pool).await.unwrap_or_else(|e| {
        warn!(error = %e, "Popular courses unavailable, reporting none");
        Vec::new()
    });

    stats
}
