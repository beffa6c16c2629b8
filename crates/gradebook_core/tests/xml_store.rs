use chrono::NaiveDate;
use gradebook_core::{
    Assignment, Grade, GradeXmlRepository, RepoError, Repository, ServiceError, StoreConfig,
    Student, StudentXmlRepository, ValidationError,
};
use std::fs;

#[test]
fn records_survive_reopening_the_same_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::in_dir(dir.path());

    {
        let stores = config.open();
        let service = stores.service();
        service
            .add_student(&Student::new("s1", "Ana", 933, "ana@uni.ro"))
            .unwrap();
        service
            .add_assignment(&Assignment::new("t1", "lab", 2, 1))
            .unwrap();
        service
            .add_grade(&Grade::new(
                "g1",
                "s1",
                "t1",
                7.5,
                NaiveDate::from_ymd_opt(2022, 5, 3).unwrap(),
            ))
            .unwrap();
    }

    let reopened = config.open();
    let students = reopened.students.find_all().unwrap();
    assert_eq!(students, vec![Student::new("s1", "Ana", 933, "ana@uni.ro")]);

    let grade = reopened.grades.find_one("g1").unwrap().unwrap();
    assert_eq!(grade.value, 7.5);
    assert_eq!(grade.date, NaiveDate::from_ymd_opt(2022, 5, 3).unwrap());
}

#[test]
fn find_all_preserves_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    let repo = StudentXmlRepository::new(dir.path().join("students.xml"));

    for id in ["c", "a", "b"] {
        repo.save(&Student::new(id, "n", 1, "e@x.ro")).unwrap();
    }

    let ids = repo
        .find_all()
        .unwrap()
        .into_iter()
        .map(|student| student.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn duplicate_save_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.xml");
    let repo = StudentXmlRepository::new(&path);

    repo.save(&Student::new("1", "Ana", 1, "ana@uni.ro")).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let existing = repo
        .save(&Student::new("1", "Other", 2, "other@uni.ro"))
        .unwrap();
    assert_eq!(existing.unwrap().name, "Ana");
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn deleting_last_record_leaves_readable_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let repo = GradeXmlRepository::new(dir.path().join("grades.xml"));
    let date = NaiveDate::from_ymd_opt(2023, 1, 9).unwrap();

    repo.save(&Grade::new("g1", "s1", "t1", 10.0, date)).unwrap();
    assert!(repo.delete("g1").unwrap().is_some());

    assert!(repo.find_all().unwrap().is_empty());
    assert!(repo.find_one("g1").unwrap().is_none());
}

#[test]
fn reads_hand_written_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<students>
  <student id="1" name="Ana" group="933" email="ana@uni.ro"/>
  <student id="2" name="Dan" group="0" email="dan@uni.ro"/>
</students>
"#,
    )
    .unwrap();

    let repo = StudentXmlRepository::new(&path);
    let dan = repo.find_one("2").unwrap().unwrap();
    assert_eq!(dan, Student::new("2", "Dan", 0, "dan@uni.ro"));
    assert_eq!(repo.find_all().unwrap().len(), 2);
}

#[test]
fn unreadable_path_is_reported_as_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let repo = StudentXmlRepository::new(dir.path());

    let err = repo.find_all().unwrap_err();
    assert!(matches!(err, RepoError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn padded_and_blank_text_survives_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let stores = StoreConfig::in_dir(dir.path()).open();
    let service = stores.service();

    let padded = Student::new(" 7 ", "  Ana Maria ", 933, " a@x.ro");
    assert!(service.add_student(&padded).unwrap().is_none());
    assert_eq!(service.find_student(" 7 ").unwrap(), Some(padded.clone()));
    assert!(service.find_student("7").unwrap().is_none());

    let existing = service.add_student(&padded).unwrap();
    assert_eq!(existing, Some(padded.clone()));
    assert_eq!(service.all_students().unwrap().len(), 1);

    let blank_name = Student::new("8", "   ", 1, "b@x.ro");
    service.add_student(&blank_name).unwrap();
    let reopened = StoreConfig::in_dir(dir.path()).open();
    assert_eq!(reopened.students.find_one("8").unwrap().unwrap().name, "   ");
}

#[test]
fn attribute_markup_is_escaped_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.xml");
    let repo = StudentXmlRepository::new(&path);

    let student = Student::new("1", r#"Ana "<&>" Pop"#, 1, "a@x.ro");
    repo.save(&student).unwrap();

    assert!(!fs::read_to_string(&path).unwrap().contains("<&>"));
    assert_eq!(repo.find_one("1").unwrap(), Some(student));
}

#[cfg(unix)]
#[test]
fn save_replaces_the_file_instead_of_truncating_it() {
    use std::io::Read;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.xml");
    let repo = StudentXmlRepository::new(&path);

    repo.save(&Student::new("1", "Ana", 1, "ana@uni.ro")).unwrap();
    let before = fs::read_to_string(&path).unwrap();
    let mut old_handle = fs::File::open(&path).unwrap();

    repo.save(&Student::new("2", "Dan", 2, "dan@uni.ro")).unwrap();

    let mut seen_through_old_handle = String::new();
    old_handle.read_to_string(&mut seen_through_old_handle).unwrap();
    assert_eq!(seen_through_old_handle, before);
    assert_eq!(repo.find_all().unwrap().len(), 2);
}

#[test]
fn grade_feedback_is_stored_with_the_grade() {
    let dir = tempfile::tempdir().unwrap();
    let start = NaiveDate::from_ymd_opt(2022, 5, 2).unwrap();
    let config = StoreConfig::in_dir(dir.path()).with_semester_start(start);
    let stores = config.open();
    let service = stores.service();

    service
        .add_student(&Student::new("1", "Ana", 933, "ana@uni.ro"))
        .unwrap();
    service
        .add_assignment(&Assignment::new("1", "lab", 1, 1))
        .unwrap();

    let handed_in = NaiveDate::from_ymd_opt(2022, 5, 3).unwrap();
    let grade = Grade::new("1", "1", "1", 10.0, handed_in);
    assert_eq!(service.grade_submission(&grade, "well done").unwrap(), 10.0);
    assert_eq!(service.grade_submission(&grade, "ignored").unwrap(), 10.0);

    let stored = config.open().grades.find_one("1").unwrap().unwrap();
    assert_eq!(stored.feedback, "well done");
    assert_eq!(stored.value, 10.0);

    let today = chrono::Local::now().date_naive();
    let err = service
        .grade_submission(&Grade::new("2", "1", "1", 10.0, today), "late")
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::LateSubmission { deadline: 1, .. })
    ));
    assert_eq!(stores.grades.find_all().unwrap().len(), 1);
}
