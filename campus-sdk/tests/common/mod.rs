//! Shared fixtures: a mock backend, canned profiles, and signed-in stores.

#![allow(dead_code)]

use httpmock::MockServer;
use serde_json::{json, Value};

use campus::{ApiGateway, Capabilities, Capability, CampusHttpClient, Role, SessionStore, UserProfile};

/// A gateway pointed at the mock server's `/api` prefix.
pub fn gateway_for(server: &MockServer, session: SessionStore) -> ApiGateway {
    let client = CampusHttpClient::builder()
        .base_url(server.url("/api"))
        .build()
        .expect("client builds");
    ApiGateway::new(client, session)
}

pub fn admin_profile() -> UserProfile {
    UserProfile {
        id: 1,
        username: "admin".to_string(),
        email: "admin@school.edu".to_string(),
        role: Role::Admin,
        permissions: all_capabilities(),
    }
}

pub fn teacher_profile() -> UserProfile {
    UserProfile {
        id: 2,
        username: "teacher".to_string(),
        email: "teacher@school.edu".to_string(),
        role: Role::Teacher,
        permissions: [
            Capability::manage_students(),
            Capability::manage_attendance(),
            Capability::manage_grades(),
            Capability::view_data(),
            Capability::view_analytics(),
        ]
        .into_iter()
        .collect(),
    }
}

pub fn viewer_profile() -> UserProfile {
    UserProfile {
        id: 3,
        username: "viewer".to_string(),
        email: "viewer@school.edu".to_string(),
        role: Role::Viewer,
        permissions: [Capability::view_data(), Capability::view_analytics()]
            .into_iter()
            .collect(),
    }
}

fn all_capabilities() -> Capabilities {
    [
        Capability::admin(),
        Capability::manage_students(),
        Capability::manage_attendance(),
        Capability::manage_grades(),
        Capability::view_data(),
        Capability::view_analytics(),
    ]
    .into_iter()
    .collect()
}

/// A memory-only store already holding a session for `profile`.
pub fn signed_in(profile: UserProfile) -> SessionStore {
    let store = SessionStore::new();
    store
        .set_session("tok-123".to_string(), profile)
        .expect("memory store never fails to persist");
    store
}

/// The JSON the backend lists for two students.
pub fn two_students_json() -> Value {
    json!([
        {
            "id": 1,
            "student_id": "STU-1001",
            "name": "Ada Lovelace",
            "email": "ada@school.edu",
            "class_name": "10A"
        },
        {
            "id": 2,
            "student_id": "STU-1002",
            "name": "Alan Turing",
            "email": "alan@school.edu",
            "class_name": "10A"
        }
    ])
}
