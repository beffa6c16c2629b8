//! Store configuration: where each XML repository lives.
//!
//! # Invariants
//! - Paths are used as given; relative paths resolve against the process
//!   working directory at call time.

use crate::model::SemesterCalendar;
use crate::repo::{AssignmentXmlRepository, GradeXmlRepository, StudentXmlRepository};
use crate::service::CatalogService;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Environment variable the CLI reads for the data directory.
pub const DATA_DIR_ENV: &str = "GRADEBOOK_DATA_DIR";
/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "./data";
/// Environment variable the CLI reads for the first day of the semester.
pub const SEMESTER_START_ENV: &str = "GRADEBOOK_SEMESTER_START";

const STUDENTS_FILE_NAME: &str = "students.xml";
const ASSIGNMENTS_FILE_NAME: &str = "assignments.xml";
const GRADES_FILE_NAME: &str = "grades.xml";

/// File locations for the three repositories, plus the optional semester
/// start that enables the late-submission rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub students_path: PathBuf,
    pub assignments_path: PathBuf,
    pub grades_path: PathBuf,
    pub semester_start: Option<NaiveDate>,
}

impl StoreConfig {
    /// Places all three files under `dir` with their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            students_path: dir.join(STUDENTS_FILE_NAME),
            assignments_path: dir.join(ASSIGNMENTS_FILE_NAME),
            grades_path: dir.join(GRADES_FILE_NAME),
            semester_start: None,
        }
    }

    pub fn with_semester_start(mut self, start: NaiveDate) -> Self {
        self.semester_start = Some(start);
        self
    }

    /// Builds the XML repositories described by this config.
    pub fn open(&self) -> XmlStores {
        XmlStores {
            students: StudentXmlRepository::new(&self.students_path),
            assignments: AssignmentXmlRepository::new(&self.assignments_path),
            grades: GradeXmlRepository::new(&self.grades_path),
            calendar: self.semester_start.map(SemesterCalendar::starting),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

/// The three XML repositories of one data directory.
#[derive(Debug, Clone)]
pub struct XmlStores {
    pub students: StudentXmlRepository,
    pub assignments: AssignmentXmlRepository,
    pub grades: GradeXmlRepository,
    pub calendar: Option<SemesterCalendar>,
}

impl XmlStores {
    /// Returns a service borrowing these repositories.
    pub fn service(
        &self,
    ) -> CatalogService<'_, StudentXmlRepository, AssignmentXmlRepository, GradeXmlRepository> {
        let service = CatalogService::new(&self.students, &self.assignments, &self.grades);
        match self.calendar {
            Some(calendar) => service.with_calendar(calendar),
            None => service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;
    use chrono::NaiveDate;
    use std::path::Path;

    #[test]
    fn in_dir_uses_default_file_names() {
        let config = StoreConfig::in_dir("/tmp/gradebook");
        assert_eq!(config.students_path, Path::new("/tmp/gradebook/students.xml"));
        assert_eq!(
            config.assignments_path,
            Path::new("/tmp/gradebook/assignments.xml")
        );
        assert_eq!(config.grades_path, Path::new("/tmp/gradebook/grades.xml"));
        assert!(config.semester_start.is_none());
    }

    #[test]
    fn open_points_repositories_at_configured_paths() {
        let config = StoreConfig::in_dir("data");
        let stores = config.open();
        assert_eq!(stores.students.path(), config.students_path.as_path());
        assert_eq!(stores.grades.path(), config.grades_path.as_path());
    }

    #[test]
    fn semester_start_carries_into_stores() {
        let start = NaiveDate::from_ymd_opt(2022, 5, 2).unwrap();
        let stores = StoreConfig::in_dir("data").with_semester_start(start).open();
        let calendar = stores.calendar.expect("calendar should be set");
        assert_eq!(calendar.start(), start);
        assert!(StoreConfig::in_dir("data").open().calendar.is_none());
    }
}
