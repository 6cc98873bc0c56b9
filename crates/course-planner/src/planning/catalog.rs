use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::domain::{Course, CourseCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: u32,
    pub department_id: u32,
    pub name: String,
}

/// Read access to departments, programs, and per-semester course offerings.
pub trait CourseCatalog: Send + Sync {
    fn departments(&self) -> Result<Vec<Department>, CatalogError>;
    fn programs(&self, department_id: u32) -> Result<Vec<Program>, CatalogError>;
    /// Courses offered to a program in one semester, ordered by code.
    fn courses_for_semester(&self, program_id: u32, semester: u8)
        -> Result<Vec<Course>, CatalogError>;
    /// Every course of the program's earlier semesters, distinct by code.
    fn courses_before_semester(
        &self,
        program_id: u32,
        semester: u8,
    ) -> Result<Vec<Course>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown department {0}")]
    UnknownDepartment(u32),
    #[error("unknown program {0}")]
    UnknownProgram(u32),
    #[error("course {code} is already offered to program {program_id} in semester {semester}")]
    DuplicateOffering {
        program_id: u32,
        semester: u8,
        code: CourseCode,
    },
    #[error("course {0} must carry at least one credit")]
    ZeroCredits(CourseCode),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Catalog held entirely in memory; immutable once shared.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseCatalog {
    departments: Vec<Department>,
    programs: Vec<Program>,
    offerings: BTreeMap<(u32, u8), Vec<Course>>,
}

impl InMemoryCourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_department(&mut self, name: impl Into<String>) -> u32 {
        let id = self.departments.len() as u32 + 1;
        self.departments.push(Department {
            id,
            name: name.into(),
        });
        id
    }

    pub fn add_program(
        &mut self,
        department_id: u32,
        name: impl Into<String>,
    ) -> Result<u32, CatalogError> {
        if !self.departments.iter().any(|dept| dept.id == department_id) {
            return Err(CatalogError::UnknownDepartment(department_id));
        }

        let id = self.programs.len() as u32 + 1;
        self.programs.push(Program {
            id,
            department_id,
            name: name.into(),
        });
        Ok(id)
    }

    pub fn offer(&mut self, program_id: u32, semester: u8, course: Course) -> Result<(), CatalogError> {
        if !self.programs.iter().any(|program| program.id == program_id) {
            return Err(CatalogError::UnknownProgram(program_id));
        }
        if course.credits == 0 {
            return Err(CatalogError::ZeroCredits(course.code));
        }

        let offered = self.offerings.entry((program_id, semester)).or_default();
        if offered.iter().any(|existing| existing.code == course.code) {
            return Err(CatalogError::DuplicateOffering {
                program_id,
                semester,
                code: course.code,
            });
        }
        offered.push(course);
        Ok(())
    }

    pub fn department_id(&self, name: &str) -> Option<u32> {
        self.departments
            .iter()
            .find(|dept| dept.name == name)
            .map(|dept| dept.id)
    }

    pub fn program_id(&self, name: &str) -> Option<u32> {
        self.programs
            .iter()
            .find(|program| program.name == name)
            .map(|program| program.id)
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    pub fn offering_count(&self) -> usize {
        self.offerings.values().map(Vec::len).sum()
    }
}

impl CourseCatalog for InMemoryCourseCatalog {
    fn departments(&self) -> Result<Vec<Department>, CatalogError> {
        Ok(self.departments.clone())
    }

    fn programs(&self, department_id: u32) -> Result<Vec<Program>, CatalogError> {
        Ok(self
            .programs
            .iter()
            .filter(|program| program.department_id == department_id)
            .cloned()
            .collect())
    }

    fn courses_for_semester(
        &self,
        program_id: u32,
        semester: u8,
    ) -> Result<Vec<Course>, CatalogError> {
        let mut courses = self
            .offerings
            .get(&(program_id, semester))
            .cloned()
            .unwrap_or_default();
        courses.sort_by(|left, right| left.code.cmp(&right.code));
        Ok(courses)
    }

    fn courses_before_semester(
        &self,
        program_id: u32,
        semester: u8,
    ) -> Result<Vec<Course>, CatalogError> {
        let mut seen = BTreeSet::new();
        let mut courses = Vec::new();
        for earlier in 1..semester {
            for course in self.courses_for_semester(program_id, earlier)? {
                if seen.insert(course.code.clone()) {
                    courses.push(course);
                }
            }
        }
        Ok(courses)
    }
}
