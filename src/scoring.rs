//! Weighted-sum course scoring.
//!
//! Each course weighs exactly three dimensions of an assessment. Weights are
//! kept in tenths so that scores are summed as integers and equal scores
//! compare exactly equal; the public score is `tenths / 10`.

use serde::{Deserialize, Serialize};

use crate::catalog::Course;
use crate::models::{Abilities, AssessmentInput, Interests};

/// How many courses a single assessment is recommended.
pub const RECOMMENDATION_COUNT: usize = 3;

pub const FALLBACK_EXPLANATION: &str =
    "This course matches your profile based on your interests and abilities.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Science,
    Arts,
    Teaching,
    Business,
    Technology,
    Design,
    Sports,
    Logical,
    Creativity,
    Communication,
    Practical,
    Teamwork,
}

impl Dimension {
    pub fn value(&self, interests: &Interests, abilities: &Abilities) -> u8 {
        match self {
            Dimension::Science => interests.science,
            Dimension::Arts => interests.arts,
            Dimension::Teaching => interests.teaching,
            Dimension::Business => interests.business,
            Dimension::Technology => interests.technology,
            Dimension::Design => interests.design,
            Dimension::Sports => interests.sports,
            Dimension::Logical => abilities.logical,
            Dimension::Creativity => abilities.creativity,
            Dimension::Communication => abilities.communication,
            Dimension::Practical => abilities.practical,
            Dimension::Teamwork => abilities.teamwork,
        }
    }
}

/// Weights in tenths; every row sums to 10.
pub fn weights(course: Course) -> [(Dimension, u32); 3] {
    use Dimension::*;

    match course {
        Course::ComputerScience => [(Technology, 4), (Science, 3), (Logical, 3)],
        Course::InformationTechnology => [(Technology, 5), (Practical, 3), (Logical, 2)],
        Course::DataScience => [(Science, 4), (Technology, 3), (Logical, 3)],
        Course::Engineering => [(Science, 4), (Logical, 3), (Practical, 3)],
        Course::BusinessAdministration => [(Business, 4), (Communication, 3), (Teamwork, 3)],
        Course::Psychology => [(Teaching, 3), (Communication, 4), (Teamwork, 3)],
        Course::Education => [(Teaching, 5), (Communication, 3), (Teamwork, 2)],
        Course::Nursing => [(Science, 3), (Communication, 3), (Teamwork, 4)],
        Course::MultimediaArts => [(Arts, 4), (Design, 4), (Creativity, 2)],
        Course::HospitalityManagement => [(Business, 3), (Communication, 4), (Teamwork, 3)],
    }
}

fn score_tenths(course: Course, interests: &Interests, abilities: &Abilities) -> u32 {
    weights(course)
        .iter()
        .map(|(dimension, weight)| u32::from(dimension.value(interests, abilities)) * weight)
        .sum()
}

/// Raw weighted-sum score of one course. Not a probability and not bounded.
pub fn score(course: Course, interests: &Interests, abilities: &Abilities) -> f64 {
    f64::from(score_tenths(course, interests, abilities)) / 10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub course: Course,
    pub score: f64,
    pub explanation: String,
}

/// Scores every course and returns the top three, highest first.
///
/// Courses with equal scores keep catalog declaration order.
pub fn recommend(input: &AssessmentInput) -> Vec<Recommendation> {
    rank(&input.interests, &input.abilities)
}

pub fn rank(interests: &Interests, abilities: &Abilities) -> Vec<Recommendation> {
    let mut scored: Vec<(Course, u32)> = Course::ALL
        .into_iter()
        .map(|course| (course, score_tenths(course, interests, abilities)))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    scored
        .into_iter()
        .take(RECOMMENDATION_COUNT)
        .map(|(course, tenths)| Recommendation {
            course,
            score: f64::from(tenths) / 10.0,
            explanation: explain(course, interests, abilities),
        })
        .collect()
}

pub fn explain(course: Course, interests: &Interests, abilities: &Abilities) -> String {
    match course {
        Course::ComputerScience => format!(
            "Recommended because of your interest in technology ({}/5) and strong logical thinking abilities ({}/5).",
            interests.technology, abilities.logical
        ),
        Course::InformationTechnology => format!(
            "Great fit due to your technology interest ({}/5) and practical skills ({}/5).",
            interests.technology, abilities.practical
        ),
        Course::DataScience => format!(
            "Perfect match with your science interest ({}/5) and logical abilities ({}/5).",
            interests.science, abilities.logical
        ),
        Course::Engineering => format!(
            "Suits your science interest ({}/5) and practical problem-solving skills ({}/5).",
            interests.science, abilities.practical
        ),
        Course::BusinessAdministration => format!(
            "Aligns with your business interest ({}/5) and communication skills ({}/5).",
            interests.business, abilities.communication
        ),
        Course::Psychology => format!(
            "Matches your interest in helping others and strong communication abilities ({}/5).",
            abilities.communication
        ),
        Course::Education => format!(
            "Perfect for your teaching interest ({}/5) and communication skills ({}/5).",
            interests.teaching, abilities.communication
        ),
        Course::Nursing => format!(
            "Great choice given your interest in helping others and teamwork abilities ({}/5).",
            abilities.teamwork
        ),
        Course::MultimediaArts => format!(
            "Excellent match for your artistic interests ({}/5) and creativity ({}/5).",
            interests.arts, abilities.creativity
        ),
        Course::HospitalityManagement => format!(
            "Suits your business interest ({}/5) and people skills ({}/5).",
            interests.business, abilities.communication
        ),
    }
}

/// Explanation for a course given by name, falling back to a generic sentence
/// for names outside the catalog.
pub fn explain_by_name(name: &str, interests: &Interests, abilities: &Abilities) -> String {
    match name.parse::<Course>() {
        Ok(course) => explain(course, interests, abilities),
        Err(_) => FALLBACK_EXPLANATION.to_string(),
    }
}

/// Presentation-only percentage for a raw score.
pub fn display_confidence(score: f64) -> f64 {
    (score * 20.0).clamp(60.0, 95.0)
}

pub fn format_confidence(score: f64) -> String {
    format!("{:.0}%", display_confidence(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn uniform(value: u8) -> (Interests, Abilities) {
        (
            Interests {
                science: value,
                arts: value,
                teaching: value,
                business: value,
                technology: value,
                design: value,
                sports: value,
            },
            Abilities {
                logical: value,
                creativity: value,
                communication: value,
                practical: value,
                teamwork: value,
            },
        )
    }

    fn courses(recs: &[Recommendation]) -> Vec<Course> {
        recs.iter().map(|r| r.course).collect()
    }

    #[test]
    fn test_weights_sum_to_one() {
        for course in Course::ALL {
            let total: u32 = weights(course).iter().map(|(_, w)| w).sum();
            assert_eq!(total, 10, "weights for {} do not sum to 1.0", course);
        }
    }

    #[test]
    fn test_uniform_three_ranking_is_pinned() {
        let (interests, abilities) = uniform(3);
        let recs = rank(&interests, &abilities);

        assert_eq!(
            courses(&recs),
            vec![
                Course::ComputerScience,
                Course::InformationTechnology,
                Course::DataScience
            ]
        );
        assert!(recs.iter().all(|r| r.score == 3.0));
        assert_eq!(
            recs[0].explanation,
            "Recommended because of your interest in technology (3/5) and strong logical thinking abilities (3/5)."
        );
    }

    #[test]
    fn test_technology_and_logic_profile() {
        let (mut interests, mut abilities) = uniform(1);
        interests.technology = 5;
        abilities.logical = 5;

        assert_eq!(score(Course::ComputerScience, &interests, &abilities), 3.8);
        assert_eq!(score(Course::InformationTechnology, &interests, &abilities), 3.8);
        assert_eq!(score(Course::DataScience, &interests, &abilities), 3.4);

        let recs = rank(&interests, &abilities);
        assert_eq!(
            courses(&recs),
            vec![
                Course::ComputerScience,
                Course::InformationTechnology,
                Course::DataScience
            ]
        );
    }

    #[test]
    fn test_arts_profile_prefers_multimedia() {
        let (mut interests, mut abilities) = uniform(1);
        interests.arts = 5;
        interests.design = 5;
        abilities.creativity = 4;

        let recs = rank(&interests, &abilities);
        assert_eq!(recs[0].course, Course::MultimediaArts);
        assert_eq!(recs[0].score, 4.8);
        assert_eq!(
            recs[0].explanation,
            "Excellent match for your artistic interests (5/5) and creativity (4/5)."
        );
    }

    #[test]
    fn test_people_profile_ranking() {
        let (mut interests, mut abilities) = uniform(2);
        interests.teaching = 5;
        abilities.communication = 5;
        abilities.teamwork = 4;

        let recs = rank(&interests, &abilities);
        // Education 4.8, Psychology 4.7, Hospitality 3.8, Nursing 3.7
        assert_eq!(
            courses(&recs),
            vec![Course::Education, Course::Psychology, Course::HospitalityManagement]
        );
        assert_eq!(recs[0].score, 4.8);
        assert_eq!(recs[1].score, 4.7);
    }

    #[test]
    fn test_recommend_returns_three_distinct_catalog_courses() {
        for value in 1..=5 {
            for tech in 1..=5 {
                let (mut interests, abilities) = uniform(value);
                interests.technology = tech;
                let recs = rank(&interests, &abilities);

                assert_eq!(recs.len(), RECOMMENDATION_COUNT);
                let seen: HashSet<Course> = courses(&recs).into_iter().collect();
                assert_eq!(seen.len(), RECOMMENDATION_COUNT);
                assert!(recs.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }
    }

    #[test]
    fn test_recommend_is_deterministic() {
        let (mut interests, mut abilities) = uniform(4);
        interests.business = 2;
        abilities.practical = 5;

        assert_eq!(rank(&interests, &abilities), rank(&interests, &abilities));
    }

    #[test]
    fn test_explain_by_name_falls_back_for_unknown_course() {
        let (interests, abilities) = uniform(3);

        assert_eq!(
            explain_by_name("Astronomy", &interests, &abilities),
            FALLBACK_EXPLANATION
        );
        assert_eq!(
            explain_by_name("Nursing", &interests, &abilities),
            "Great choice given your interest in helping others and teamwork abilities (3/5)."
        );
    }

    #[test]
    fn test_display_confidence_is_clamped() {
        assert_eq!(display_confidence(1.0), 60.0);
        assert_eq!(display_confidence(4.0), 80.0);
        assert_eq!(display_confidence(5.0), 95.0);
        assert_eq!(format_confidence(3.5), "70%");
    }
}
