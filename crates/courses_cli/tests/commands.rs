use clap::Parser;
use courses_cli::{run, Cli, CliError};
use courses_core::{CourseDetailsDto, CourseInstanceDto, PersonDto, ServiceError, ValidationCode};
use std::path::{Path, PathBuf};

fn seed_file() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/seed.json")
}

fn run_args(db: &Path, args: &[&str]) -> Result<String, CliError> {
    let db = db.to_str().unwrap();
    let mut argv = vec!["courses_cli", "--db", db];
    argv.extend_from_slice(args);
    run(&Cli::try_parse_from(argv).unwrap())
}

fn seeded_db() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("courses.db");
    let seed = seed_file();
    run_args(&db, &["seed", seed.to_str().unwrap()]).unwrap();
    (dir, db)
}

#[test]
fn seed_reports_row_counts() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("courses.db");
    let seed = seed_file();

    let output = run_args(&db, &["seed", seed.to_str().unwrap()]).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(summary["persons"], 3);
    assert_eq!(summary["course_templates"], 3);
    assert_eq!(summary["course_instances"], 6);
    assert_eq!(summary["teacher_registrations"], 4);
}

#[test]
fn seeding_twice_fails_and_keeps_first_import() {
    let (_dir, db) = seeded_db();
    let seed = seed_file();

    let err = run_args(&db, &["seed", seed.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, CliError::Service(ServiceError::Repo(_))));

    let output = run_args(&db, &["list", "--semester", "20163"]).unwrap();
    let courses: Vec<CourseInstanceDto> = serde_json::from_str(&output).unwrap();
    assert_eq!(courses.len(), 3);
}

#[test]
fn list_uses_default_semester() {
    let (_dir, db) = seeded_db();

    let output = run_args(&db, &["list"]).unwrap();
    let courses: Vec<CourseInstanceDto> = serde_json::from_str(&output).unwrap();

    let veft = courses
        .iter()
        .find(|course| course.course_instance_id == 1337)
        .unwrap();
    assert_eq!(veft.template_id, "T-514-VEFT");
    assert_eq!(veft.main_teacher, "Daníel B. Sigurgeirsson");
    assert_eq!(courses.len(), 2);
}

#[test]
fn add_teacher_then_show_course() {
    let (_dir, db) = seeded_db();

    let output = run_args(&db, &["add-teacher", "1338", "1234567890"]).unwrap();
    let teacher: PersonDto = serde_json::from_str(&output).unwrap();
    assert_eq!(teacher.name, "Guðrún Guðmundsdóttir");

    let output = run_args(&db, &["show", "1338"]).unwrap();
    let details: CourseDetailsDto = serde_json::from_str(&output).unwrap();
    assert_eq!(details.main_teacher, "Guðrún Guðmundsdóttir");
}

#[test]
fn add_teacher_reports_rule_violations() {
    let (_dir, db) = seeded_db();

    let err = run_args(&db, &["add-teacher", "1337", "1234567890"]).unwrap_err();
    assert!(matches!(
        err,
        CliError::Service(ServiceError::Validation(
            ValidationCode::CourseAlreadyHasAMainTeacher
        ))
    ));
    assert_eq!(err.exit_code(), 1);

    let err = run_args(&db, &["add-teacher", "1337", "abc", "--assistant"]).unwrap_err();
    assert!(matches!(err, CliError::Request(_)));
}

#[test]
fn show_unknown_course_fails() {
    let (_dir, db) = seeded_db();

    let err = run_args(&db, &["show", "9999"]).unwrap_err();
    assert!(matches!(err, CliError::Service(ServiceError::NotFound { .. })));
}

#[test]
fn missing_seed_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("courses.db");

    let err = run_args(&db, &["seed", "/no/such/seed.json"]).unwrap_err();
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.exit_code(), 2);
}
