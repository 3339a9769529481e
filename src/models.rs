use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;

pub const ANONYMOUS: &str = "Anonymous";

/// Highest possible feedback rating, used to scale the agreement rate.
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "STEM")]
    Stem,
    #[serde(rename = "ABM (Accountancy, Business, & Management)")]
    Abm,
    #[serde(rename = "HUMMS (Humanities & Social Sciences)")]
    Humms,
    #[serde(rename = "GAS (General Academic Strand)")]
    Gas,
    #[serde(rename = "TVL (Technical-Vocational-Livelihood)")]
    Tvl,
}

impl Strand {
    pub const ALL: [Strand; 5] = [
        Strand::Stem,
        Strand::Abm,
        Strand::Humms,
        Strand::Gas,
        Strand::Tvl,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Strand::Stem => "STEM",
            Strand::Abm => "ABM (Accountancy, Business, & Management)",
            Strand::Humms => "HUMMS (Humanities & Social Sciences)",
            Strand::Gas => "GAS (General Academic Strand)",
            Strand::Tvl => "TVL (Technical-Vocational-Livelihood)",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strand::ALL
            .into_iter()
            .find(|strand| strand.label() == s)
            .ok_or_else(|| AppError::Internal(format!("Unknown strand '{}'", s)))
    }
}

/// Sub-strand of the TVL track. Only meaningful when the strand is TVL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TvlStrand {
    #[default]
    #[serde(rename = "Not applicable")]
    NotApplicable,
    #[serde(rename = "ICT (Information and Communications Technology)")]
    Ict,
    #[serde(rename = "HE (Home Economics)")]
    He,
    #[serde(rename = "IA (Industrial Arts)")]
    Ia,
    #[serde(rename = "AFA (Agri-Fishery Arts)")]
    Afa,
}

impl TvlStrand {
    pub const ALL: [TvlStrand; 5] = [
        TvlStrand::NotApplicable,
        TvlStrand::Ict,
        TvlStrand::He,
        TvlStrand::Ia,
        TvlStrand::Afa,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TvlStrand::NotApplicable => "Not applicable",
            TvlStrand::Ict => "ICT (Information and Communications Technology)",
            TvlStrand::He => "HE (Home Economics)",
            TvlStrand::Ia => "IA (Industrial Arts)",
            TvlStrand::Afa => "AFA (Agri-Fishery Arts)",
        }
    }
}

impl fmt::Display for TvlStrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TvlStrand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TvlStrand::ALL
            .into_iter()
            .find(|tvl| tvl.label() == s)
            .ok_or_else(|| AppError::Internal(format!("Unknown TVL strand '{}'", s)))
    }
}

/// Self-rated interests, 1 (least interested) to 5 (most interested).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Interests {
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub science: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub arts: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub teaching: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub business: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub technology: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub design: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub sports: u8,
}

/// Self-rated abilities, 1 (weak) to 5 (strong).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Abilities {
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub logical: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub creativity: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub communication: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub practical: u8,
    #[validate(range(min = 1, max = 5, message = "Must be between 1 and 5"))]
    pub teamwork: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AssessmentInput {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 200, message = "School must be at most 200 characters"))]
    pub school: String,
    pub strand: Strand,
    #[serde(default)]
    pub tvl_strand: TvlStrand,
    #[validate(nested)]
    pub interests: Interests,
    #[validate(nested)]
    pub abilities: Abilities,
}

impl AssessmentInput {
    /// Name as persisted: blank names are recorded as "Anonymous", anything
    /// else is kept exactly as submitted.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            ANONYMOUS
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: i64,
    pub name: String,
    pub school: String,
    pub strand: Strand,
    pub tvl_strand: TvlStrand,
    pub interests: Interests,
    pub abilities: Abilities,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbAssessment {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub school: Option<String>,
    pub strand: Option<String>,
    pub tvl_strand: Option<String>,
    pub science_interest: Option<i64>,
    pub arts_interest: Option<i64>,
    pub teaching_interest: Option<i64>,
    pub business_interest: Option<i64>,
    pub technology_interest: Option<i64>,
    pub design_interest: Option<i64>,
    pub sports_interest: Option<i64>,
    pub logical_ability: Option<i64>,
    pub creativity_ability: Option<i64>,
    pub communication_ability: Option<i64>,
    pub practical_ability: Option<i64>,
    pub teamwork_ability: Option<i64>,
    pub timestamp: Option<NaiveDateTime>,
}

fn stored_score(column: &str, value: Option<i64>) -> Result<u8, AppError> {
    value
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| AppError::Internal(format!("Invalid stored value for {}", column)))
}

fn stored_timestamp(table: &str, value: Option<NaiveDateTime>) -> Result<DateTime<Utc>, AppError> {
    value
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
        .ok_or_else(|| AppError::Internal(format!("Missing timestamp in {}", table)))
}

impl TryFrom<DbAssessment> for Assessment {
    type Error = AppError;

    fn try_from(db: DbAssessment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id.unwrap_or_default(),
            name: db.name.unwrap_or_default(),
            school: db.school.unwrap_or_default(),
            strand: db.strand.unwrap_or_default().parse()?,
            tvl_strand: match db.tvl_strand {
                Some(tvl) => tvl.parse()?,
                None => TvlStrand::default(),
            },
            interests: Interests {
                science: stored_score("science_interest", db.science_interest)?,
                arts: stored_score("arts_interest", db.arts_interest)?,
                teaching: stored_score("teaching_interest", db.teaching_interest)?,
                business: stored_score("business_interest", db.business_interest)?,
                technology: stored_score("technology_interest", db.technology_interest)?,
                design: stored_score("design_interest", db.design_interest)?,
                sports: stored_score("sports_interest", db.sports_interest)?,
            },
            abilities: Abilities {
                logical: stored_score("logical_ability", db.logical_ability)?,
                creativity: stored_score("creativity_ability", db.creativity_ability)?,
                communication: stored_score("communication_ability", db.communication_ability)?,
                practical: stored_score("practical_ability", db.practical_ability)?,
                teamwork: stored_score("teamwork_ability", db.teamwork_ability)?,
            },
            created_at: stored_timestamp("assessments", db.timestamp)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecommendation {
    pub id: i64,
    pub assessment_id: i64,
    pub course_name: String,
    pub confidence_score: f64,
    pub explanation: String,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbRecommendation {
    pub id: Option<i64>,
    pub assessment_id: Option<i64>,
    pub course_name: Option<String>,
    pub confidence_score: Option<f64>,
    pub explanation: Option<String>,
}

impl From<DbRecommendation> for StoredRecommendation {
    fn from(db: DbRecommendation) -> Self {
        Self {
            id: db.id.unwrap_or_default(),
            assessment_id: db.assessment_id.unwrap_or_default(),
            course_name: db.course_name.unwrap_or_default(),
            confidence_score: db.confidence_score.unwrap_or_default(),
            explanation: db.explanation.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub assessment_id: i64,
    pub course_name: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Clone, Default)]
pub struct DbFeedback {
    pub id: Option<i64>,
    pub assessment_id: Option<i64>,
    pub course_name: Option<String>,
    pub rating: Option<i64>,
    pub timestamp: Option<NaiveDateTime>,
}

impl TryFrom<DbFeedback> for Feedback {
    type Error = AppError;

    fn try_from(db: DbFeedback) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id.unwrap_or_default(),
            assessment_id: db.assessment_id.unwrap_or_default(),
            course_name: db.course_name.unwrap_or_default(),
            rating: db.rating.unwrap_or_default(),
            created_at: stored_timestamp("feedback", db.timestamp)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PopularCourse {
    pub course_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_courses: usize,
    pub total_assessments: i64,
    pub agreement_rate: f64,
    pub popular_courses: Vec<PopularCourse>,
}

impl DashboardStats {
    pub fn empty() -> Self {
        Self {
            total_courses: crate::catalog::total_courses(),
            total_assessments: 0,
            agreement_rate: 0.0,
            popular_courses: Vec::new(),
        }
    }
}

/// Average rating as a percentage of the maximum rating.
pub fn agreement_rate(average_rating: Option<f64>) -> f64 {
    match average_rating {
        Some(avg) => avg / MAX_RATING * 100.0,
        None => 0.0,
    }
}

pub fn format_agreement_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}
