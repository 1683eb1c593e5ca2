mod common;

use common::*;
use courses_core::{
    CourseInstance, CourseInstanceDto, CoursesService, MemoryUnitOfWork, ServiceConfig,
    TeacherType,
};
use std::collections::HashSet;

fn find(courses: &[CourseInstanceDto], course_instance_id: i64) -> &CourseInstanceDto {
    courses
        .iter()
        .find(|course| course.course_instance_id == course_instance_id)
        .unwrap_or_else(|| panic!("course {course_instance_id} should be listed"))
}

#[test]
fn returns_empty_list_when_no_course_instances_exist() {
    let mut uow = seeded_unit_of_work();
    uow.set_rows(Vec::<CourseInstance>::new());
    let service = CoursesService::new(uow);

    let courses = service.list_course_instances(None).unwrap();
    assert!(courses.is_empty());
}

#[test]
fn returns_empty_list_for_semester_without_courses() {
    let service = CoursesService::new(seeded_unit_of_work());

    let courses = service.list_course_instances(Some("19991")).unwrap();
    assert!(courses.is_empty());
}

#[test]
fn absent_or_empty_semester_lists_default_semester() {
    let service = CoursesService::new(seeded_unit_of_work());

    for semester in [None, Some("")] {
        let courses = service.list_course_instances(semester).unwrap();
        assert_eq!(courses.len(), 2);

        let prog = find(&courses, COURSEID_PROG_20153);
        let veft = find(&courses, COURSEID_VEFT_20153);
        assert_eq!(prog.name, "Forritun");
        assert_eq!(veft.name, "Vefþjónustur");
        assert_eq!(prog.template_id, "T-111-PROG");
        assert_eq!(veft.template_id, "T-514-VEFT");
    }
}

#[test]
fn configured_default_semester_is_used() {
    let config = ServiceConfig {
        default_semester: "20163".to_string(),
    };
    let service = CoursesService::with_config(seeded_unit_of_work(), config);

    let ids: HashSet<i64> = service
        .list_course_instances(None)
        .unwrap()
        .into_iter()
        .map(|course| course.course_instance_id)
        .collect();
    assert_eq!(
        ids,
        HashSet::from([
            COURSEID_VEFT_20163,
            COURSEID_PROG_20163,
            COURSEID_THYD_20163
        ])
    );
}

#[test]
fn lists_all_courses_of_requested_semester() {
    let service = CoursesService::new(seeded_unit_of_work());

    let courses = service.list_course_instances(Some("20163")).unwrap();
    assert_eq!(courses.len(), 3);

    let veft = find(&courses, COURSEID_VEFT_20163);
    let prog = find(&courses, COURSEID_PROG_20163);
    let thyd = find(&courses, COURSEID_THYD_20163);
    assert_eq!(veft.name, "Vefþjónustur");
    assert_eq!(prog.name, "Forritun");
    assert_eq!(thyd.name, "Þýðendur");
    assert_eq!(veft.template_id, "T-514-VEFT");
    assert_eq!(prog.template_id, "T-111-PROG");
    assert_eq!(thyd.template_id, "T-603-THYD");
}

#[test]
fn main_teacher_name_is_resolved_for_registered_main_teacher() {
    let service = CoursesService::new(seeded_unit_of_work());

    let courses = service.list_course_instances(Some("20153")).unwrap();
    let veft = find(&courses, COURSEID_VEFT_20153);
    assert_eq!(
        veft,
        &CourseInstanceDto {
            course_instance_id: COURSEID_VEFT_20153,
            template_id: "T-514-VEFT".to_string(),
            name: "Vefþjónustur".to_string(),
            main_teacher: NAME_DABS.to_string(),
        }
    );
}

#[test]
fn main_teacher_is_empty_when_course_has_no_teachers() {
    let service = CoursesService::new(seeded_unit_of_work());

    let courses = service.list_course_instances(Some("20153")).unwrap();
    assert_eq!(find(&courses, COURSEID_PROG_20153).main_teacher, "");
}

#[test]
fn main_teacher_is_empty_when_course_only_has_assistants() {
    let service = CoursesService::new(seeded_unit_of_work());

    let courses = service.list_course_instances(Some("20163")).unwrap();
    assert_eq!(find(&courses, COURSEID_PROG_20163).main_teacher, "");
}

#[test]
fn main_teacher_ignores_coexisting_assistants() {
    let service = CoursesService::new(seeded_unit_of_work());

    let courses = service.list_course_instances(Some("20143")).unwrap();
    assert_eq!(find(&courses, COURSEID_PROG_20143).main_teacher, NAME_HRAFN);
}

#[test]
fn unresolvable_main_teacher_yields_empty_name() {
    let mut registrations = teacher_registrations();
    registrations.push(registration(
        105,
        COURSEID_THYD_20163,
        INVALID_SSN,
        TeacherType::MainTeacher,
    ));
    let mut uow = seeded_unit_of_work();
    uow.set_rows(registrations);
    let service = CoursesService::new(uow);

    let courses = service.list_course_instances(Some("20163")).unwrap();
    assert_eq!(find(&courses, COURSEID_THYD_20163).main_teacher, "");
}

#[test]
fn instances_without_template_are_left_out() {
    let mut instances = course_instances();
    instances.push(CourseInstance::new(2000, "T-999-GONE", "20153"));
    let mut uow = seeded_unit_of_work();
    uow.set_rows(instances);
    let service = CoursesService::new(uow);

    let courses = service.list_course_instances(Some("20153")).unwrap();
    assert_eq!(courses.len(), 2);
    assert!(courses.iter().all(|course| course.course_instance_id != 2000));
}

#[test]
fn listing_is_pure_and_repeatable() {
    let service = CoursesService::new(seeded_unit_of_work());

    let first = service.list_course_instances(Some("20153")).unwrap();
    let second = service.list_course_instances(Some("20153")).unwrap();
    assert_eq!(first, second);
    assert_eq!(service.unit_of_work().save_count(), 0);
}

#[test]
fn empty_store_lists_nothing() {
    let service = CoursesService::new(MemoryUnitOfWork::new());
    assert!(service.list_course_instances(None).unwrap().is_empty());
}
