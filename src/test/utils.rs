#[cfg(test)]
pub mod test_utils {
    use crate::database::init_schema;
    use crate::db::{add_feedback, submit_assessment};
    use crate::error::AppError;
    use crate::init_rocket;
    use crate::models::{Abilities, AssessmentInput, Interests, Strand, TvlStrand};
    use rocket::local::asynchronous::Client;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use sqlx::{Pool, Sqlite};
    use std::collections::HashMap;
    use std::str::FromStr;
    use std::sync::Once;

    static INIT: Once = Once::new();

    pub fn uniform_input(name: &str, value: u8) -> AssessmentInput {
        AssessmentInput {
            name: name.to_string(),
            school: "Riverside National High School".to_string(),
            strand: Strand::Stem,
            tvl_strand: TvlStrand::NotApplicable,
            interests: Interests {
                science: value,
                arts: value,
                teaching: value,
                business: value,
                technology: value,
                design: value,
                sports: value,
            },
            abilities: Abilities {
                logical: value,
                creativity: value,
                communication: value,
                practical: value,
                teamwork: value,
            },
        }
    }

    /// Strong technology interest and logical ability, everything else 1.
    pub fn tech_input(name: &str) -> AssessmentInput {
        let mut input = uniform_input(name, 1);
        input.interests.technology = 5;
        input.abilities.logical = 5;
        input
    }

    /// Strong teaching interest and people skills.
    pub fn teaching_input(name: &str) -> AssessmentInput {
        let mut input = uniform_input(name, 2);
        input.strand = Strand::Humms;
        input.interests.teaching = 5;
        input.abilities.communication = 5;
        input.abilities.teamwork = 4;
        input
    }

    pub struct TestFeedback {
        pub respondent: String,
        pub course_name: String,
        pub rating: i64,
    }

    #[derive(Default)]
    pub struct TestDbBuilder {
        assessments: Vec<AssessmentInput>,
        feedback: Vec<TestFeedback>,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn assessment(mut self, input: AssessmentInput) -> Self {
            self.assessments.push(input);
            self
        }

        pub fn feedback(mut self, respondent: &str, course_name: &str, rating: i64) -> Self {
            self.feedback.push(TestFeedback {
                respondent: respondent.to_string(),
                course_name: course_name.to_string(),
                rating,
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = tracing_subscriber::fmt()
                    .with_env_filter("debug")
                    .with_test_writer()
                    .try_init();
            });

            let pool = empty_pool().await?;
            init_schema(&pool).await?;

            let mut assessment_id_map: HashMap<String, i64> = HashMap::new();

            for input in &self.assessments {
                let submission = submit_assessment(&pool, input).await?;
                assessment_id_map.insert(input.display_name().to_string(), submission.assessment_id);
            }

            for feedback in &self.feedback {
                let assessment_id = assessment_id_map
                    .get(&feedback.respondent)
                    .copied()
                    .ok_or_else(|| {
                        AppError::NotFound(format!("No assessment for {}", feedback.respondent))
                    })?;

                add_feedback(&pool, assessment_id, &feedback.course_name, feedback.rating).await?;
            }

            Ok(TestDb {
                pool,
                assessment_id_map,
            })
        }
    }

    /// One connection so every query sees the same in-memory database.
    pub async fn empty_pool() -> Result<Pool<Sqlite>, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(pool)
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub assessment_id_map: HashMap<String, i64>,
    }

    impl TestDb {
        pub fn assessment_id(&self, respondent: &str) -> Option<i64> {
            self.assessment_id_map.get(respondent).copied()
        }

        pub async fn row_count(&self, table: &str) -> Result<i64, sqlx::Error> {
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&self.pool)
                .await
        }
    }

    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .assessment(tech_input("Ana"))
            .assessment(teaching_input("Ben"))
            .feedback("Ana", "Computer Science", 5)
            .feedback("Ana", "Information Technology", 4)
            .build()
            .await
            .expect("Failed to build test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.pool.clone());
        let client = Client::tracked(rocket)
            .await
            .expect("Failed to create test client");

        (client, test_db)
    }
}
