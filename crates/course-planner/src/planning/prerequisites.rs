use super::domain::{CompletedSet, Course, CourseCode};

/// All-or-nothing check: every declared prerequisite must already be completed.
pub fn satisfied(course: &Course, completed: &CompletedSet) -> bool {
    missing(course, completed).is_empty()
}

/// Prerequisite codes of `course` not covered by `completed`, in declaration order.
pub fn missing<'a>(course: &'a Course, completed: &CompletedSet) -> Vec<&'a CourseCode> {
    course
        .prerequisites
        .codes()
        .iter()
        .filter(|code| !completed.contains(code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::domain::{Difficulty, Prerequisites};

    fn course(code: &str, prerequisites: Option<&str>) -> Course {
        Course {
            code: CourseCode::new(code),
            name: format!("{code} course"),
            description: String::new(),
            credits: 3,
            difficulty: Difficulty::Balanced,
            prerequisites: Prerequisites::parse(prerequisites),
        }
    }

    #[test]
    fn course_without_prerequisites_is_always_satisfied() {
        let completed = CompletedSet::new();
        assert!(satisfied(&course("X1", None), &completed));
        assert!(satisfied(&course("X1", Some("")), &completed));
        assert!(satisfied(&course("X1", Some("  ,  ")), &completed));
    }

    #[test]
    fn unmet_prerequisite_blocks_course() {
        let completed = CompletedSet::new();
        let advanced = course("X4", Some("X1"));

        assert!(!satisfied(&advanced, &completed));
        assert_eq!(missing(&advanced, &completed), vec![&CourseCode::new("X1")]);
    }

    #[test]
    fn every_prerequisite_must_be_completed() {
        let completed: CompletedSet = ["CS001"].into_iter().collect();
        let partial = course("CS100", Some(" CS001 , CS002 "));
        let covered = course("CS101", Some("CS001"));

        assert!(!satisfied(&partial, &completed));
        assert_eq!(
            missing(&partial, &completed),
            vec![&CourseCode::new("CS002")]
        );
        assert!(satisfied(&covered, &completed));
    }
}
