use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of college courses the system can recommend.
///
/// Variant order is the catalog declaration order and is used as the
/// tie-break when two courses score the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Course {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Engineering")]
    Engineering,
    #[serde(rename = "Business Administration")]
    BusinessAdministration,
    #[serde(rename = "Psychology")]
    Psychology,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Nursing")]
    Nursing,
    #[serde(rename = "Multimedia Arts")]
    MultimediaArts,
    #[serde(rename = "Hospitality Management")]
    HospitalityManagement,
}

impl Course {
    pub const ALL: [Course; 10] = [
        Course::ComputerScience,
        Course::InformationTechnology,
        Course::DataScience,
        Course::Engineering,
        Course::BusinessAdministration,
        Course::Psychology,
        Course::Education,
        Course::Nursing,
        Course::MultimediaArts,
        Course::HospitalityManagement,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Course::ComputerScience => "Computer Science",
            Course::InformationTechnology => "Information Technology",
            Course::DataScience => "Data Science",
            Course::Engineering => "Engineering",
            Course::BusinessAdministration => "Business Administration",
            Course::Psychology => "Psychology",
            Course::Education => "Education",
            Course::Nursing => "Nursing",
            Course::MultimediaArts => "Multimedia Arts",
            Course::HospitalityManagement => "Hospitality Management",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Course::ComputerScience => {
                "Study algorithms, programming, software development, and computational theory. Prepare for careers in software engineering, AI development, and tech innovation."
            }
            Course::InformationTechnology => {
                "Focus on practical application of technology in business environments. Learn system administration, network management, and IT support."
            }
            Course::DataScience => {
                "Combine statistics, programming, and domain expertise to extract insights from data. Work with big data, machine learning, and analytics."
            }
            Course::Engineering => {
                "Apply mathematical and scientific principles to design and build solutions. Specializations include civil, electrical, mechanical, and more."
            }
            Course::BusinessAdministration => {
                "Learn management principles, finance, marketing, and operations. Prepare for leadership roles in various industries."
            }
            Course::Psychology => {
                "Study human behavior, mental processes, and emotional well-being. Pursue careers in counseling, research, or organizational psychology."
            }
            Course::Education => {
                "Prepare to become an educator and shape future generations. Learn teaching methodologies, curriculum development, and educational psychology."
            }
            Course::Nursing => {
                "Provide healthcare services and patient care. Learn medical procedures, patient assessment, and healthcare management."
            }
            Course::MultimediaArts => {
                "Combine creativity with technology to create digital content. Learn graphic design, animation, video production, and digital marketing."
            }
            Course::HospitalityManagement => {
                "Manage hotels, restaurants, and tourism businesses. Learn customer service, operations management, and hospitality industry practices."
            }
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Course::ComputerScience => "💻",
            Course::InformationTechnology => "🖥️",
            Course::DataScience => "📊",
            Course::Engineering => "⚙️",
            Course::BusinessAdministration => "💼",
            Course::Psychology => "🧠",
            Course::Education => "📚",
            Course::Nursing => "🏥",
            Course::MultimediaArts => "🎨",
            Course::HospitalityManagement => "🏨",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCourse(pub String);

impl fmt::Display for UnknownCourse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not in the course catalog", self.0)
    }
}

impl std::error::Error for UnknownCourse {}

impl FromStr for Course {
    type Err = UnknownCourse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Course::ALL
            .into_iter()
            .find(|course| course.name() == s)
            .ok_or_else(|| UnknownCourse(s.to_string()))
    }
}

/// Number of entries in the catalog, reported on the dashboard.
pub fn total_courses() -> usize {
    Course::ALL.len()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<Course> for CatalogEntry {
    fn from(course: Course) -> Self {
        Self {
            name: course.name().to_string(),
            description: course.description().to_string(),
            icon: course.icon().to_string(),
        }
    }
}

pub fn entries() -> Vec<CatalogEntry> {
    Course::ALL.into_iter().map(CatalogEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_distinct_courses() {
        assert_eq!(total_courses(), 10);

        let mut names: Vec<&str> = Course::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_name_parses_back_to_course() {
        for course in Course::ALL {
            assert_eq!(course.name().parse::<Course>(), Ok(course));
        }

        let err = "Astronomy".parse::<Course>().unwrap_err();
        assert_eq!(err, UnknownCourse("Astronomy".to_string()));
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&Course::MultimediaArts).unwrap();
        assert_eq!(json, "\"Multimedia Arts\"");

        let course: Course = serde_json::from_str("\"Hospitality Management\"").unwrap();
        assert_eq!(course, Course::HospitalityManagement);
    }

    #[test]
    fn test_entries_keep_declaration_order() {
        let entries = entries();
        assert_eq!(entries.first().unwrap().name, "Computer Science");
        assert_eq!(entries.last().unwrap().name, "Hospitality Management");
        assert_eq!(entries[8].icon, "🎨");
    }
}
