//! Roster rendering and student mutations against a mock backend.

mod common;

use httpmock::prelude::*;
use serde_json::json;

use campus::views::StudentsView;

use common::{gateway_for, signed_in, teacher_profile, two_students_json, viewer_profile};

#[tokio::test]
async fn viewer_sees_the_roster_without_management_controls() {
    let server = MockServer::start_async().await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/students");
            then.status(200).json_body(two_students_json());
        })
        .await;

    let gateway = gateway_for(&server, signed_in(viewer_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();
    view.refresh().await;
    list.assert_async().await;

    assert_eq!(view.roster().len(), 2);
    assert_eq!(view.roster()[0].name, "Ada Lovelace");
    assert!(!view.can_manage());
}

#[tokio::test]
async fn a_single_student_can_be_fetched_for_the_detail_panel() {
    let server = MockServer::start_async().await;
    let detail = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/students/1");
            then.status(200).json_body(json!({
                "id": 1,
                "student_id": "STU-1001",
                "name": "Ada Lovelace",
                "email": "ada@school.edu",
                "class_name": "10A"
            }));
        })
        .await;

    let gateway = gateway_for(&server, signed_in(viewer_profile()));
    let view = StudentsView::open(&gateway).unwrap();
    let student = view.fetch_student(1).await.unwrap();
    detail.assert_async().await;
    assert_eq!(student.student_id, "STU-1001");
}

#[tokio::test]
async fn failed_roster_fetch_leaves_the_list_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/students");
            then.status(500).json_body(json!({"message": "Internal server error"}));
        })
        .await;

    let gateway = gateway_for(&server, signed_in(viewer_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();
    view.refresh().await;
    assert!(view.roster().is_empty());
}

#[tokio::test]
async fn creating_a_student_posts_the_draft_and_refetches() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/students").json_body(json!({
                "student_id": "STU-1003",
                "name": "Grace Hopper",
                "email": "grace@school.edu",
                "class_name": "10B"
            }));
            then.status(201)
                .json_body(json!({"message": "Student created successfully", "id": 3}));
        })
        .await;
    let list = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/students");
            then.status(200).json_body(two_students_json());
        })
        .await;

    let gateway = gateway_for(&server, signed_in(teacher_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();
    assert!(view.can_manage());

    view.begin_create();
    assert!(view.form().open);
    let draft = view.draft_mut();
    draft.student_id = "STU-1003".to_string();
    draft.name = "Grace Hopper".to_string();
    draft.email = "grace@school.edu".to_string();
    draft.class_name = "10B".to_string();

    view.submit().await.unwrap();
    create.assert_async().await;
    list.assert_async().await;

    // Buffer cleared and the roster re-fetched after the write.
    assert!(!view.form().open);
    assert!(view.form().editing.is_none());
    assert_eq!(view.roster().len(), 2);
    assert!(view.error().is_none());
}

#[tokio::test]
async fn editing_a_student_puts_to_its_row() {
    let server = MockServer::start_async().await;
    let update = server
        .mock_async(|when, then| {
            when.method(PUT).path("/api/students/2").json_body(json!({
                "student_id": "STU-1002",
                "name": "Alan M. Turing",
                "email": "alan@school.edu",
                "class_name": "10A"
            }));
            then.status(200)
                .json_body(json!({"message": "Student updated successfully"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/students");
            then.status(200).json_body(two_students_json());
        })
        .await;

    let gateway = gateway_for(&server, signed_in(teacher_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();
    view.refresh().await;

    let student = view.roster()[1].clone();
    view.begin_edit(&student);
    assert_eq!(view.form().editing, Some(2));
    // Pre-filled from the row.
    assert_eq!(view.form().draft.name, "Alan Turing");

    view.draft_mut().name = "Alan M. Turing".to_string();
    view.submit().await.unwrap();
    update.assert_async().await;
    assert!(!view.form().open);
}

#[tokio::test]
async fn rejected_submit_keeps_the_form_and_surfaces_the_message() {
    let server = MockServer::start_async().await;
    let create = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/students");
            then.status(400).json_body(json!({"message": "Student ID already exists"}));
        })
        .await;

    let gateway = gateway_for(&server, signed_in(teacher_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();
    view.begin_create();
    view.draft_mut().student_id = "STU-1001".to_string();

    assert!(view.submit().await.is_err());
    create.assert_async().await;

    // The buffer stays put for correction; the message is verbatim.
    assert!(view.form().open);
    assert_eq!(view.form().draft.student_id, "STU-1001");
    assert_eq!(view.error(), Some("Student ID already exists"));
}

#[tokio::test]
async fn cancel_discards_the_buffer_without_a_request() {
    let server = MockServer::start_async().await;
    let any_write = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/students");
            then.status(201).json_body(json!({"message": "Student created successfully"}));
        })
        .await;

    let gateway = gateway_for(&server, signed_in(teacher_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();
    view.begin_create();
    view.draft_mut().name = "Discarded".to_string();
    view.cancel();

    assert!(!view.form().open);
    assert!(view.form().draft.name.is_empty());
    any_write.assert_hits_async(0).await;
}

#[tokio::test]
async fn delete_requires_explicit_confirmation() {
    let server = MockServer::start_async().await;
    let delete = server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/students/1");
            then.status(200)
                .json_body(json!({"message": "Student deleted successfully"}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/students");
            then.status(200).json_body(json!([]));
        })
        .await;

    let gateway = gateway_for(&server, signed_in(teacher_profile()));
    let mut view = StudentsView::open(&gateway).unwrap();

    // Declined confirmation: no request at all.
    assert!(!view.delete(1, false).await.unwrap());
    delete.assert_hits_async(0).await;

    assert!(view.delete(1, true).await.unwrap());
    delete.assert_hits_async(1).await;
    assert!(view.roster().is_empty());
}
