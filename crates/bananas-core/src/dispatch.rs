//! Request dispatcher for the dashboard's data lookups.
//!
//! Requests are JSON objects with an `action` field. Every response has the
//! shape `{ "success": bool, "message"?: string, ...data }` and the
//! dispatcher never fails: bad input becomes an unsuccessful response.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue, json};
use tracing::debug;

use crate::error::Result;
use crate::grade::SubjectRecord;

const ACTIONS: [&str; 3] = ["login", "fetch-student", "fetch-grades"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Request {
    Login { username: String, password: String },
    FetchStudent { student_id: String },
    FetchGrades { student_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Map<String, JsonValue>,
}

impl Response {
    pub fn ok(data: Map<String, JsonValue>) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: Map::new(),
        }
    }

    fn with_field(key: &str, value: JsonValue) -> Self {
        let mut data = Map::new();
        data.insert(key.to_string(), value);
        Self::ok(data)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub class: String,
}

/// Opaque store behind the dispatcher.
pub trait Directory {
    fn authenticate(&self, username: &str, password: &str) -> Option<Student>;
    fn student(&self, student_id: &str) -> Option<Student>;
    fn grades(&self, student_id: &str) -> Option<Vec<SubjectRecord>>;
}

#[derive(Debug, Clone, Deserialize)]
struct Account {
    username: String,
    password: String,
    student_id: String,
}

/// Directory backed by a JSON snapshot of accounts, students and grades.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JsonDirectory {
    accounts: Vec<Account>,
    students: Vec<Student>,
    grades: HashMap<String, Vec<SubjectRecord>>,
}

impl JsonDirectory {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Directory for JsonDirectory {
    fn authenticate(&self, username: &str, password: &str) -> Option<Student> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.username == username && a.password == password)?;
        self.student(&account.student_id)
    }

    fn student(&self, student_id: &str) -> Option<Student> {
        self.students.iter().find(|s| s.id == student_id).cloned()
    }

    fn grades(&self, student_id: &str) -> Option<Vec<SubjectRecord>> {
        self.grades.get(student_id).cloned()
    }
}

pub struct Dispatcher<D> {
    directory: D,
}

impl<D: Directory> Dispatcher<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// Handle a raw JSON request.
    pub fn handle(&self, raw: &str) -> Response {
        let value: JsonValue = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => return Response::failure(format!("Invalid request: {}", e)),
        };

        match value.get("action").and_then(JsonValue::as_str) {
            None => return Response::failure("Missing action"),
            Some(action) if !ACTIONS.contains(&action) => {
                return Response::failure(format!("Unknown action: {}", action));
            }
            Some(action) => debug!("Dispatching action {}", action),
        }

        match serde_json::from_value::<Request>(value) {
            Ok(request) => self.dispatch(&request),
            Err(e) => Response::failure(format!("Invalid request: {}", e)),
        }
    }

    pub fn dispatch(&self, request: &Request) -> Response {
        match request {
            Request::Login { username, password } => {
                match self.directory.authenticate(username, password) {
                    Some(student) => Response::with_field("student", json!(student)),
                    None => Response::failure("Invalid username or password"),
                }
            }
            Request::FetchStudent { student_id } => match self.directory.student(student_id) {
                Some(student) => Response::with_field("student", json!(student)),
                None => Response::failure(format!("Student not found: {}", student_id)),
            },
            Request::FetchGrades { student_id } => match self.directory.grades(student_id) {
                Some(grades) => Response::with_field("grades", json!(grades)),
                None => Response::failure(format!("Grades not found: {}", student_id)),
            },
        }
    }
}
