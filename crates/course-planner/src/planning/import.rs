use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::catalog::{CatalogError, InMemoryCourseCatalog};
use super::domain::{Course, CourseCode, Difficulty, Prerequisites};

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {row}: {message}")]
    Row { row: usize, message: String },
    #[error("catalog row {row}: {source}")]
    Catalog { row: usize, source: CatalogError },
}

/// Builds an [`InMemoryCourseCatalog`] from a flat CSV export.
///
/// Expected headers: `department, program, semester, code, name, description,
/// credits, difficulty, prerequisites`. Departments and programs receive ids in
/// order of first appearance.
pub struct CatalogImporter;

impl CatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<InMemoryCourseCatalog, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<InMemoryCourseCatalog, CatalogImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut catalog = InMemoryCourseCatalog::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = index + 1;
            let record = record?;
            record.apply(row, &mut catalog)?;
        }

        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    department: String,
    program: String,
    semester: u8,
    code: String,
    name: String,
    #[serde(default)]
    description: String,
    credits: u32,
    difficulty: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    prerequisites: Option<String>,
}

impl CatalogRow {
    fn apply(self, row: usize, catalog: &mut InMemoryCourseCatalog) -> Result<(), CatalogImportError> {
        if self.code.is_empty() {
            return Err(CatalogImportError::Row {
                row,
                message: "course code is empty".to_string(),
            });
        }
        if !(1..=8).contains(&self.semester) {
            return Err(CatalogImportError::Row {
                row,
                message: format!("semester {} outside 1-8", self.semester),
            });
        }
        let difficulty =
            Difficulty::parse(&self.difficulty).ok_or_else(|| CatalogImportError::Row {
                row,
                message: format!("unknown difficulty '{}'", self.difficulty),
            })?;

        let department_id = match catalog.department_id(&self.department) {
            Some(id) => id,
            None => catalog.add_department(self.department.clone()),
        };
        let program_id = match catalog.program_id(&self.program) {
            Some(id) => id,
            None => catalog
                .add_program(department_id, self.program.clone())
                .map_err(|source| CatalogImportError::Catalog { row, source })?,
        };

        let course = Course {
            code: CourseCode::new(&self.code),
            name: self.name,
            description: self.description,
            credits: self.credits,
            difficulty,
            prerequisites: Prerequisites::parse(self.prerequisites.as_deref()),
        };

        catalog
            .offer(program_id, self.semester, course)
            .map_err(|source| CatalogImportError::Catalog { row, source })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::catalog::CourseCatalog;

    const SAMPLE: &str = "\
department,program,semester,code,name,description,credits,difficulty,prerequisites
Computer Science,CS-AI,1,CS001,Programming,Intro,3,Easy,
Computer Science,CS-AI,1,CS002,Data Structures,,4,Balanced,
Computer Science,CS-AI,2,CS010,Algorithms,,3,Challenging,\"CS001, CS002\"
Computer Science,CS-DS,1,CS001,Programming,Intro,3,Easy,
";

    #[test]
    fn import_builds_departments_programs_and_offerings() {
        let catalog = CatalogImporter::from_reader(SAMPLE.as_bytes()).expect("catalog imports");

        let departments = catalog.departments().expect("departments");
        assert_eq!(departments.len(), 1);
        let programs = catalog.programs(departments[0].id).expect("programs");
        assert_eq!(programs.len(), 2);

        let ai = catalog.program_id("CS-AI").expect("program exists");
        let second = catalog.courses_for_semester(ai, 2).expect("courses");
        assert_eq!(second.len(), 1);
        assert_eq!(
            second[0].prerequisites.codes(),
            &[CourseCode::new("CS001"), CourseCode::new("CS002")]
        );

        let completed = catalog.courses_before_semester(ai, 2).expect("history");
        assert_eq!(completed.len(), 2);
    }

    #[test]
    fn import_reports_row_for_unknown_difficulty() {
        let csv = "\
department,program,semester,code,name,description,credits,difficulty,prerequisites
CS,CS-AI,1,CS001,Programming,,3,Impossible,
";
        let error = CatalogImporter::from_reader(csv.as_bytes()).expect_err("import fails");

        match error {
            CatalogImportError::Row { row, message } => {
                assert_eq!(row, 1);
                assert!(message.contains("Impossible"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn import_rejects_duplicate_offerings() {
        let csv = "\
department,program,semester,code,name,description,credits,difficulty,prerequisites
CS,CS-AI,1,CS001,Programming,,3,Easy,
CS,CS-AI,1,CS001,Programming again,,3,Easy,
";
        let error = CatalogImporter::from_reader(csv.as_bytes()).expect_err("import fails");

        assert!(matches!(
            error,
            CatalogImportError::Catalog {
                row: 2,
                source: CatalogError::DuplicateOffering { .. }
            }
        ));
    }
}
