#![allow(dead_code)]

use courses_core::{
    CourseInstance, CourseTemplate, MemoryUnitOfWork, Person, TeacherRegistration, TeacherType,
};

pub const SSN_DABS: &str = "1203735289";
pub const SSN_GUNNA: &str = "1234567890";
pub const SSN_HRAFN: &str = "1245367809";
pub const INVALID_SSN: &str = "9876543210";

pub const NAME_DABS: &str = "Daníel B. Sigurgeirsson";
pub const NAME_GUNNA: &str = "Guðrún Guðmundsdóttir";
pub const NAME_HRAFN: &str = "Hrafn Loftsson";

pub const COURSEID_VEFT_20153: i64 = 1337;
pub const COURSEID_VEFT_20163: i64 = 1338;
pub const COURSEID_PROG_20153: i64 = 1340;
pub const COURSEID_PROG_20163: i64 = 1341;
pub const COURSEID_THYD_20163: i64 = 1342;
pub const COURSEID_PROG_20143: i64 = 1343;
pub const INVALID_COURSEID: i64 = 9999;

pub fn persons() -> Vec<Person> {
    vec![
        Person::new(SSN_DABS, NAME_DABS, "dabs@ru.is"),
        Person::new(SSN_GUNNA, NAME_GUNNA, "gunna@ru.is"),
        Person::new(SSN_HRAFN, NAME_HRAFN, "hrafn@ru.is"),
    ]
}

pub fn course_templates() -> Vec<CourseTemplate> {
    vec![
        CourseTemplate::new(
            "T-514-VEFT",
            "Vefþjónustur",
            "Í þessum áfanga verður fjallað um vefþj...",
        ),
        CourseTemplate::new(
            "T-111-PROG",
            "Forritun",
            "Í þessum áfanga verður fjallað um forritun...",
        ),
        CourseTemplate::new(
            "T-603-THYD",
            "Þýðendur",
            "Í þessum áfanga verður fjallað um þýðendur...",
        ),
    ]
}

pub fn course_instances() -> Vec<CourseInstance> {
    vec![
        CourseInstance::new(COURSEID_VEFT_20153, "T-514-VEFT", "20153"),
        CourseInstance::new(COURSEID_VEFT_20163, "T-514-VEFT", "20163"),
        CourseInstance::new(COURSEID_PROG_20153, "T-111-PROG", "20153"),
        CourseInstance::new(COURSEID_PROG_20143, "T-111-PROG", "20143"),
        CourseInstance::new(COURSEID_PROG_20163, "T-111-PROG", "20163"),
        CourseInstance::new(COURSEID_THYD_20163, "T-603-THYD", "20163"),
    ]
}

pub fn teacher_registrations() -> Vec<TeacherRegistration> {
    vec![
        registration(101, COURSEID_VEFT_20153, SSN_DABS, TeacherType::MainTeacher),
        registration(102, COURSEID_PROG_20163, SSN_GUNNA, TeacherType::AssistantTeacher),
        registration(103, COURSEID_PROG_20143, SSN_HRAFN, TeacherType::MainTeacher),
        registration(104, COURSEID_PROG_20143, SSN_GUNNA, TeacherType::AssistantTeacher),
    ]
}

pub fn registration(
    id: i64,
    course_instance_id: i64,
    ssn: &str,
    kind: TeacherType,
) -> TeacherRegistration {
    let mut registration = TeacherRegistration::new(course_instance_id, ssn, kind);
    registration.id = id;
    registration
}

/// Unit of work seeded with the reference courses, persons and teachers.
pub fn seeded_unit_of_work() -> MemoryUnitOfWork {
    MemoryUnitOfWork::new()
        .with_rows(persons())
        .with_rows(course_templates())
        .with_rows(course_instances())
        .with_rows(teacher_registrations())
}
