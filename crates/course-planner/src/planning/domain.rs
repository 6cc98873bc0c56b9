use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique course identifier such as `CS001`.
///
/// Surrounding whitespace is trimmed on every construction path, including
/// deserialization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CourseCode(pub String);

impl CourseCode {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CourseCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<CourseCode> for String {
    fn from(value: CourseCode) -> Self {
        value.0
    }
}

/// Workload tier advertised for a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[serde(alias = "Easy")]
    Easy,
    #[serde(alias = "Balanced")]
    Balanced,
    #[serde(alias = "Challenging")]
    Challenging,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Easy,
        Difficulty::Balanced,
        Difficulty::Challenging,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "balanced" => Some(Self::Balanced),
            "challenging" | "hard" => Some(Self::Challenging),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Balanced => "Balanced",
            Difficulty::Challenging => "Challenging",
        }
    }
}

/// Difficulty bias selected by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Easy,
    #[default]
    Balanced,
    Challenging,
}

impl Preference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "balanced" => Some(Self::Balanced),
            "challenging" => Some(Self::Challenging),
            _ => None,
        }
    }

    /// Points a course of the given tier earns under this preference.
    pub fn affinity(&self, difficulty: Difficulty) -> u8 {
        match (self, difficulty) {
            (Preference::Easy, Difficulty::Easy) => 3,
            (Preference::Easy, Difficulty::Balanced) => 1,
            (Preference::Easy, Difficulty::Challenging) => 0,
            (Preference::Balanced, Difficulty::Easy) => 2,
            (Preference::Balanced, Difficulty::Balanced) => 3,
            (Preference::Balanced, Difficulty::Challenging) => 2,
            (Preference::Challenging, Difficulty::Easy) => 0,
            (Preference::Challenging, Difficulty::Balanced) => 1,
            (Preference::Challenging, Difficulty::Challenging) => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Preference::Easy => "easy",
            Preference::Balanced => "balanced",
            Preference::Challenging => "challenging",
        }
    }
}

/// Prerequisite declaration: either nothing, or a non-empty ordered list of codes.
///
/// Accepts both the comma separated text form (`"CS001, CS002"`) and a JSON list
/// when deserializing. Blank entries are dropped, so `""`, `"  "` and `null` all
/// mean "no prerequisites".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<PrerequisiteSpec>", into = "Vec<CourseCode>")]
pub struct Prerequisites(Vec<CourseCode>);

impl Prerequisites {
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(text) => Self::from_codes(text.split(',')),
            None => Self::none(),
        }
    }

    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let codes = codes
            .into_iter()
            .map(CourseCode::new)
            .filter(|code| !code.0.is_empty())
            .filter(|code| seen.insert(code.clone()))
            .collect();
        Self(codes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> &[CourseCode] {
        &self.0
    }

    /// Comma separated rendering, empty when there is nothing to satisfy.
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(CourseCode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrerequisiteSpec {
    Text(String),
    Codes(Vec<String>),
}

impl From<Option<PrerequisiteSpec>> for Prerequisites {
    fn from(value: Option<PrerequisiteSpec>) -> Self {
        match value {
            None => Prerequisites::none(),
            Some(PrerequisiteSpec::Text(text)) => Prerequisites::parse(Some(&text)),
            Some(PrerequisiteSpec::Codes(codes)) => Prerequisites::from_codes(codes),
        }
    }
}

impl From<Prerequisites> for Vec<CourseCode> {
    fn from(value: Prerequisites) -> Self {
        value.0
    }
}

/// Catalog entry offered to a program in a given semester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseCode,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub credits: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub prerequisites: Prerequisites,
}

/// Course codes the student is assumed to have finished.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletedSet(BTreeSet<CourseCode>);

impl CompletedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_courses<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        Self(courses.into_iter().map(|course| course.code.clone()).collect())
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.0.contains(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseCode> {
        self.0.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for CompletedSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(CourseCode::new)
                .filter(|code| !code.0.is_empty())
                .collect(),
        )
    }
}

/// Candidate recommendation of distinct courses for one semester.
///
/// Built only through [`Plan::new`], which derives the credit total and the
/// prerequisite violation count from the members, so both always agree with
/// the course list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    courses: Vec<Course>,
    total_credits: u32,
    violation_count: usize,
    all_prerequisites_met: bool,
}

impl Plan {
    /// Returns `None` when two members share a course code.
    pub fn new(courses: Vec<Course>, completed: &CompletedSet) -> Option<Self> {
        let mut codes = BTreeSet::new();
        if !courses.iter().all(|course| codes.insert(&course.code)) {
            return None;
        }

        let total_credits = courses.iter().map(|course| course.credits).sum();
        let violation_count = courses
            .iter()
            .filter(|course| !super::prerequisites::satisfied(course, completed))
            .count();

        Some(Self {
            courses,
            total_credits,
            violation_count,
            all_prerequisites_met: violation_count == 0,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn total_credits(&self) -> u32 {
        self.total_credits
    }

    pub fn violation_count(&self) -> usize {
        self.violation_count
    }

    pub fn all_prerequisites_met(&self) -> bool {
        self.all_prerequisites_met
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn codes(&self) -> Vec<&CourseCode> {
        self.courses.iter().map(|course| &course.code).collect()
    }

    pub fn count_by_difficulty(&self, difficulty: Difficulty) -> usize {
        self.courses
            .iter()
            .filter(|course| course.difficulty == difficulty)
            .count()
    }
}

/// Plan paired with the fitness it earned during ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPlan {
    pub plan: Plan,
    pub fitness: f64,
}
