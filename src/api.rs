use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::{Deserialize, Serialize, json::Json};
use sqlx::{Pool, Sqlite};
use validator::{Validate, ValidationError};

use crate::catalog::{self, CatalogEntry, Course};
use crate::db::{
    add_feedback, get_assessment, get_dashboard_stats, get_feedback, get_recommendations,
    submit_assessment,
};
use crate::error::AppError;
use crate::models::{
    Assessment, AssessmentInput, Feedback, StoredRecommendation, format_agreement_rate,
};
use crate::scoring::{Recommendation, display_confidence, explain_by_name, format_confidence};
use crate::validation::{AppErrorExt, JsonValidateExt, ValidationResponse};

#[derive(Serialize, Deserialize)]
pub struct CoursesResponse {
    pub courses: Vec<CatalogEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RecommendationResponse {
    pub course_name: String,
    pub description: String,
    pub icon: String,
    pub score: f64,
    pub confidence_percent: f64,
    pub confidence_display: String,
    pub explanation: String,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(rec: Recommendation) -> Self {
        Self {
            course_name: rec.course.name().to_string(),
            description: rec.course.description().to_string(),
            icon: rec.course.icon().to_string(),
            score: rec.score,
            confidence_percent: display_confidence(rec.score),
            confidence_display: format_confidence(rec.score),
            explanation: rec.explanation,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubmissionResponse {
    pub assessment_id: i64,
    pub recommendations: Vec<RecommendationResponse>,
}

#[derive(Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub assessment: Assessment,
    pub recommendations: Vec<StoredRecommendation>,
    pub feedback: Vec<Feedback>,
}

fn validate_course_name(name: &str) -> Result<(), ValidationError> {
    match name.parse::<Course>() {
        Ok(_) => Ok(()),
        Err(_) => {
            let mut error = ValidationError::new("unknown_course");
            error.message = Some(format!("'{}' is not in the course catalog", name).into());
            Err(error)
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct FeedbackRequest {
    #[validate(custom(function = "validate_course_name"))]
    pub course_name: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct FeedbackResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct PopularCourseResponse {
    pub course_name: String,
    pub count: i64,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardResponse {
    pub total_courses: usize,
    pub total_assessments: i64,
    pub agreement_rate: f64,
    pub agreement_rate_display: String,
    pub popular_courses: Vec<PopularCourseResponse>,
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}

#[get("/courses")]
pub fn api_get_courses() -> Json<CoursesResponse> {
    Json(CoursesResponse {
        courses: catalog::entries(),
    })
}

#[post("/assessments", data = "<assessment>")]
pub async fn api_submit_assessment(
    assessment: Json<AssessmentInput>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<SubmissionResponse>>, Custom<Json<ValidationResponse>>> {
    let validated = assessment.validate_custom()?;

    let submission = submit_assessment(db, &validated).await.validate_custom()?;

    Ok(Custom(
        Status::Created,
        Json(SubmissionResponse {
            assessment_id: submission.assessment_id,
            recommendations: submission
                .recommendations
                .into_iter()
                .map(RecommendationResponse::from)
                .collect(),
        }),
    ))
}

#[get("/assessments/<id>")]
pub async fn api_get_assessment(
    id: i64,
    db: &State<Pool<Sqlite>>,
) -> Result<Json<AssessmentResponse>, AppError> {
    let assessment = get_assessment(db, id).await?;
    let recommendations = get_recommendations(db, id)
        .await?
        .into_iter()
        .map(|mut rec| {
            // rows written without an explanation get one from the stored scores
            if rec.explanation.trim().is_empty() {
                rec.explanation =
                    explain_by_name(&rec.course_name, &assessment.interests, &assessment.abilities);
            }
            rec
        })
        .collect();
    let feedback = get_feedback(db, id).await?;

    Ok(Json(AssessmentResponse {
        assessment,
        recommendations,
        feedback,
    }))
}

#[post("/assessments/<id>/feedback", data = "<feedback>")]
pub async fn api_add_feedback(
    id: i64,
    feedback: Json<FeedbackRequest>,
    db: &State<Pool<Sqlite>>,
) -> Result<Custom<Json<FeedbackResponse>>, Custom<Json<ValidationResponse>>> {
    let validated = feedback.validate_custom()?;

    let feedback_id = add_feedback(db, id, &validated.course_name, validated.rating)
        .await
        .validate_custom()?;

    Ok(Custom(
        Status::Created,
        Json(FeedbackResponse {
            id: feedback_id,
            message: format!("Thank you for rating {}!", validated.course_name),
        }),
    ))
}

#[get("/dashboard")]
pub async fn api_dashboard(db: &State<Pool<Sqlite>>) -> Json<DashboardResponse> {
    let stats = get_dashboard_stats(db).await;

    let popular_courses = stats
        .popular_courses
        .into_iter()
        .map(|popular| {
            let course = popular.course_name.parse::<Course>().ok();
            PopularCourseResponse {
                description: course.map(|c| c.description().to_string()),
                icon: course.map(|c| c.icon().to_string()),
                course_name: popular.course_name,
                count: popular.count,
            }
        })
        .collect();

    Json(DashboardResponse {
        total_courses: stats.total_courses,
        total_assessments: stats.total_assessments,
        agreement_rate: stats.agreement_rate,
        agreement_rate_display: format_agreement_rate(stats.agreement_rate),
        popular_courses,
    })
}
