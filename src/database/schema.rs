pub const CURRENT_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS assessments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    school TEXT,
    strand TEXT,
    tvl_strand TEXT,
    science_interest INTEGER CHECK (science_interest BETWEEN 1 AND 5),
    arts_interest INTEGER CHECK (arts_interest BETWEEN 1 AND 5),
    teaching_interest INTEGER CHECK (teaching_interest BETWEEN 1 AND 5),
    business_interest INTEGER CHECK (business_interest BETWEEN 1 AND 5),
    technology_interest INTEGER CHECK (technology_interest BETWEEN 1 AND 5),
    design_interest INTEGER CHECK (design_interest BETWEEN 1 AND 5),
    sports_interest INTEGER CHECK (sports_interest BETWEEN 1 AND 5),
    logical_ability INTEGER CHECK (logical_ability BETWEEN 1 AND 5),
    creativity_ability INTEGER CHECK (creativity_ability BETWEEN 1 AND 5),
    communication_ability INTEGER CHECK (communication_ability BETWEEN 1 AND 5),
    practical_ability INTEGER CHECK (practical_ability BETWEEN 1 AND 5),
    teamwork_ability INTEGER CHECK (teamwork_ability BETWEEN 1 AND 5),
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS recommendations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    assessment_id INTEGER NOT NULL,
    course_name TEXT NOT NULL,
    confidence_score REAL,
    explanation TEXT,
    FOREIGN KEY (assessment_id) REFERENCES assessments (id)
);

CREATE TABLE IF NOT EXISTS feedback (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    assessment_id INTEGER NOT NULL,
    course_name TEXT NOT NULL,
    rating INTEGER,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (assessment_id) REFERENCES assessments (id)
);

CREATE INDEX IF NOT EXISTS idx_recommendations_assessment ON recommendations (assessment_id);
CREATE INDEX IF NOT EXISTS idx_feedback_assessment ON feedback (assessment_id);
"#;
