//! XML file repository.
//!
//! # Responsibility
//! - Persist one entity collection per XML file.
//! - Re-read the file on every call and rewrite it on every mutation.
//!
//! # Invariants
//! - A missing or blank file reads as an empty collection.
//! - Record order in the file is insertion order.
//! - Field values are stored as attributes, so surrounding whitespace
//!   survives a round trip unchanged.
//! - A failed mutation leaves the previous file content in place: the new
//!   document is written to a sibling temp file and renamed over the old one.
//!
//! Document shape, using students as example:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <students><student id="1" name="Ana" group="933" email="ana@uni.ro"/></students>
//! ```

use super::{RepoError, RepoResult, Repository};
use crate::model::{Assignment, Entity, Grade, Student};
use chrono::NaiveDate;
use log::{debug, error};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

pub type StudentXmlRepository = XmlRepository<Student>;
pub type AssignmentXmlRepository = XmlRepository<Assignment>;
pub type GradeXmlRepository = XmlRepository<Grade>;

/// Binds an entity to the root document type that wraps its collection.
pub trait XmlRecord: Entity {
    type Document: Serialize + DeserializeOwned;

    fn into_document(items: Vec<Self>) -> Self::Document;
    fn from_document(document: Self::Document) -> Vec<Self>;
}

/// `<students>` root element.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "students")]
pub struct StudentDocument {
    #[serde(rename = "student", default)]
    items: Vec<StudentRow>,
}

/// `<assignments>` root element.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "assignments")]
pub struct AssignmentDocument {
    #[serde(rename = "assignment", default)]
    items: Vec<AssignmentRow>,
}

/// `<grades>` root element.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "grades")]
pub struct GradeDocument {
    #[serde(rename = "grade", default)]
    items: Vec<GradeRow>,
}

// Element text is trimmed by the deserializer; attribute values are not.
#[derive(Debug, Serialize, Deserialize)]
struct StudentRow {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@group")]
    group: i32,
    #[serde(rename = "@email")]
    email: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentRow {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@description")]
    description: String,
    #[serde(rename = "@deadline_week")]
    deadline_week: i32,
    #[serde(rename = "@received_week")]
    received_week: i32,
}

#[derive(Debug, Serialize, Deserialize)]
struct GradeRow {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@student_id")]
    student_id: String,
    #[serde(rename = "@assignment_id")]
    assignment_id: String,
    #[serde(rename = "@value")]
    value: f64,
    #[serde(rename = "@date")]
    date: NaiveDate,
    #[serde(rename = "@feedback", default)]
    feedback: String,
}

impl XmlRecord for Student {
    type Document = StudentDocument;

    fn into_document(items: Vec<Self>) -> Self::Document {
        let items = items
            .into_iter()
            .map(|student| StudentRow {
                id: student.id,
                name: student.name,
                group: student.group,
                email: student.email,
            })
            .collect();
        StudentDocument { items }
    }

    fn from_document(document: Self::Document) -> Vec<Self> {
        document
            .items
            .into_iter()
            .map(|row| Student::new(row.id, row.name, row.group, row.email))
            .collect()
    }
}

impl XmlRecord for Assignment {
    type Document = AssignmentDocument;

    fn into_document(items: Vec<Self>) -> Self::Document {
        let items = items
            .into_iter()
            .map(|assignment| AssignmentRow {
                id: assignment.id,
                description: assignment.description,
                deadline_week: assignment.deadline_week,
                received_week: assignment.received_week,
            })
            .collect();
        AssignmentDocument { items }
    }

    fn from_document(document: Self::Document) -> Vec<Self> {
        document
            .items
            .into_iter()
            .map(|row| {
                Assignment::new(row.id, row.description, row.deadline_week, row.received_week)
            })
            .collect()
    }
}

impl XmlRecord for Grade {
    type Document = GradeDocument;

    fn into_document(items: Vec<Self>) -> Self::Document {
        let items = items
            .into_iter()
            .map(|grade| GradeRow {
                id: grade.id,
                student_id: grade.student_id,
                assignment_id: grade.assignment_id,
                value: grade.value,
                date: grade.date,
                feedback: grade.feedback,
            })
            .collect();
        GradeDocument { items }
    }

    fn from_document(document: Self::Document) -> Vec<Self> {
        document
            .items
            .into_iter()
            .map(|row| {
                Grade::new(row.id, row.student_id, row.assignment_id, row.value, row.date)
                    .with_feedback(row.feedback)
            })
            .collect()
    }
}

/// Repository storing one entity collection in an XML file.
#[derive(Debug, Clone)]
pub struct XmlRepository<E> {
    path: PathBuf,
    _entity: PhantomData<fn() -> E>,
}

impl<E: XmlRecord> XmlRepository<E> {
    /// Creates a repository over `path`. The file is not touched until the
    /// first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> RepoResult<Vec<E>> {
        let started_at = Instant::now();
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=repo status=ok kind={} count=0 missing=true",
                    E::KIND
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=repo status=error kind={} error_code=read_failed error={}",
                    E::KIND,
                    err
                );
                return Err(self.io_error(err));
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: E::Document = quick_xml::de::from_str(&text).map_err(|err| {
            error!(
                "event=store_load module=repo status=error kind={} error_code=decode_failed error={}",
                E::KIND,
                err
            );
            self.xml_error(err)
        })?;
        let items = E::from_document(document);

        debug!(
            "event=store_load module=repo status=ok kind={} count={} duration_ms={}",
            E::KIND,
            items.len(),
            started_at.elapsed().as_millis()
        );
        Ok(items)
    }


    fn store(&self, items: Vec<E>) -> RepoResult<()> {
        let started_at = Instant::now();
        let count = items.len();
        let body = quick_xml::se::to_string(&E::into_document(items))
            .map_err(|err| self.xml_error(err))?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;

        if let Err(err) = self.replace_file(parent, &format!("{XML_DECLARATION}\n{body}\n")) {
            error!(
                "event=store_write module=repo status=error kind={} error_code=write_failed error={}",
                E::KIND,
                err
            );
            return Err(self.io_error(err));
        }

        debug!(
            "event=store_write module=repo status=ok kind={} count={} duration_ms={}",
            E::KIND,
            count,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn replace_file(&self, parent: &Path, contents: &str) -> std::io::Result<()> {
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn xml_error(&self, err: impl std::fmt::Display) -> RepoError {
        RepoError::Xml {
            path: self.path.clone(),
            message: err.to_string(),
        }
    }
}

impl<E: XmlRecord> Repository<E> for XmlRepository<E> {
    fn find_all(&self) -> RepoResult<Vec<E>> {
        self.load()
    }

    fn find_one(&self, id: &str) -> RepoResult<Option<E>> {
        Ok(self.load()?.into_iter().find(|item| item.id() == id))
    }

    fn save(&self, entity: &E) -> RepoResult<Option<E>> {
        let mut items = self.load()?;
        if let Some(existing) = items.iter().find(|item| item.id() == entity.id()) {
            return Ok(Some(existing.clone()));
        }

        items.push(entity.clone());
        self.store(items)?;
        Ok(None)
    }

    fn update(&self, entity: &E) -> RepoResult<Option<E>> {
        let mut items = self.load()?;
        let previous = match items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => std::mem::replace(slot, entity.clone()),
            None => return Ok(None),
        };

        self.store(items)?;
        Ok(Some(previous))
    }

    fn delete(&self, id: &str) -> RepoResult<Option<E>> {
        let mut items = self.load()?;
        let removed = match items.iter().position(|item| item.id() == id) {
            Some(index) => items.remove(index),
            None => return Ok(None),
        };

        self.store(items)?;
        Ok(Some(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::StudentXmlRepository;
    use crate::model::Student;
    use crate::repo::{RepoError, Repository};
    use std::fs;

    #[test]
    fn missing_and_blank_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.xml");

        let repo = StudentXmlRepository::new(&path);
        assert!(repo.find_all().unwrap().is_empty());

        fs::write(&path, "  \n").unwrap();
        assert!(repo.find_all().unwrap().is_empty());
    }

    #[test]
    fn store_writes_declaration_and_attribute_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("students.xml");
        let repo = StudentXmlRepository::new(&path);

        repo.save(&Student::new("7", "Ana", 933, "ana@uni.ro"))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("<students>"));
        assert!(text.contains("<student "));
        assert!(text.contains(r#"name="Ana""#));
    }

    #[test]
    fn store_leaves_no_staging_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = StudentXmlRepository::new(dir.path().join("students.xml"));

        repo.save(&Student::new("1", "Ana", 1, "a@x.ro")).unwrap();
        repo.save(&Student::new("2", "Dan", 1, "d@x.ro")).unwrap();
        repo.delete("1").unwrap();

        let names = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["students.xml".to_string()]);
    }

    #[test]
    fn malformed_file_is_reported_as_xml_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.xml");
        fs::write(&path, r#"<students><student id="1""#).unwrap();

        let err = StudentXmlRepository::new(&path).find_all().unwrap_err();
        assert!(matches!(err, RepoError::Xml { .. }), "unexpected error: {err}");
    }
}
