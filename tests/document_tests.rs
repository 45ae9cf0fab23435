// tests/document_tests.rs

use tme_format::{Document, DocumentError, ErrorKind, LookupError, Record, parse};

const COURSE: &str = "\
jgradebook.data.Course 1 {
 name=Programmieren+1
 cp=9
 groups={10, 11}
}
jgradebook.data.Group 10 {
 name=A
}
jgradebook.data.Group 11 {
 name=B
}";

const TUTORIAL: &str = "\
jgradebook.data.Tutorial 20 {
 name=Tutorium+Mo
}";

#[test]
fn test_lookup_by_id() {
    let doc = Document::parse(COURSE).unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.get(10).unwrap().get_string("name").unwrap(), "A");
    assert!(doc.get(99).is_none());
}

#[test]
fn test_follow_references() {
    let doc = Document::parse(COURSE).unwrap();
    let course = doc.of_kind("Course").next().unwrap();
    let groups = course.get_array("groups").unwrap();

    let names: Vec<String> = groups
        .iter()
        .map(|id| {
            let id = id.as_int().unwrap();
            let group = doc.find("jgradebook.data.Group", id).unwrap();
            group.get_string("name").unwrap().into_owned()
        })
        .collect();

    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_find_checks_name() {
    let doc = Document::parse(COURSE).unwrap();

    assert_eq!(
        doc.find("jgradebook.data.Tutorial", 10).unwrap_err(),
        LookupError::MissingRecord {
            name: "jgradebook.data.Tutorial".into(),
            id: 10,
        }
    );
}

#[test]
fn test_of_kind_keeps_order() {
    let doc = Document::parse(COURSE).unwrap();
    let ids: Vec<i32> = doc.of_kind("Group").map(Record::id).collect();
    assert_eq!(ids, vec![10, 11]);
}

#[test]
fn test_parse_all_concatenates_inputs() {
    let doc = Document::parse_all([COURSE, TUTORIAL]).unwrap();

    assert_eq!(doc.len(), 4);
    assert_eq!(doc.records()[3].kind(), "Tutorial");
    assert_eq!(doc.get(20).unwrap().get_string("name").unwrap(), "Tutorium Mo");
}

#[test]
fn test_duplicate_ids_across_inputs() {
    let err = Document::parse_all([COURSE, "x 10 {\n}"]).unwrap_err();

    assert_eq!(err, DocumentError::DuplicateId(10));
    assert_eq!(err.to_string(), "Duplicated id 10");
}

#[test]
fn test_parse_error_names_input() {
    let err = Document::parse_all([TUTORIAL, "bar foo {\n}"]).unwrap_err();

    match &err {
        DocumentError::Parse { index, error } => {
            assert_eq!(*index, 1);
            assert_eq!(error.kind(), Some(ErrorKind::MissingNodeId));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "Input 2: Syntax error 'Missing node ID' in line 1");
}

#[test]
fn test_parse_all_threaded_matches_synchronous() {
    let threaded = Document::parse_all_threaded([COURSE, TUTORIAL]).unwrap();
    let synchronous = Document::parse_all([COURSE, TUTORIAL]).unwrap();

    assert_eq!(threaded.records(), synchronous.records());
    assert_eq!(threaded.get(11).unwrap().get_string("name").unwrap(), "B");
}

#[test]
fn test_parse_all_threaded_names_input() {
    let err = Document::parse_all_threaded([COURSE, "bar 1 {\n a\n}"]).unwrap_err();

    match err {
        DocumentError::Parse { index, error } => {
            assert_eq!(index, 1);
            assert_eq!(error.kind(), Some(ErrorKind::MissingAssign));
            assert_eq!(error.line(), Some(2));
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_from_records() {
    let records = parse(TUTORIAL).unwrap();
    let doc = Document::from_records(records.clone()).unwrap();
    assert_eq!(doc.into_records(), records);
}
