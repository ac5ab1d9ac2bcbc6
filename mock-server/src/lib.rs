use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const LOGIN_COOKIE: &str = "EmployeeVueLoginCookie";
pub const DEMO_USERNAME: &str = "admin";
pub const DEMO_PASSWORD: &str = "admin";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub retired: bool,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub struct AppState {
    employees: RwLock<BTreeMap<i64, Employee>>,
    sessions: RwLock<HashSet<String>>,
}

pub type Db = Arc<AppState>;

/// The service seeded with the demo employees.
pub fn app() -> Router {
    app_with(demo_employees())
}

pub fn app_with(employees: Vec<Employee>) -> Router {
    let state = AppState {
        employees: RwLock::new(employees.into_iter().map(|e| (e.employee_id, e)).collect()),
        sessions: RwLock::new(HashSet::new()),
    };
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/employee/list", get(list_employees))
        .route("/employee/get/{id}", get(get_employee))
        .route("/employee/set", post(set_employee))
        .with_state(Arc::new(state))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub fn demo_employees() -> Vec<Employee> {
    let employee = |id: i64, salutation: &str, first: &str, last: &str, born: &str, department: i64| Employee {
        employee_id: id,
        salutation: Some(salutation.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        date_of_birth: Some(born.to_string()),
        department_id: Some(department),
        gender: None,
        phone_number: None,
        email: None,
        retired: false,
    };
    vec![
        employee(1, "Mr.", "Peter", "Sharp", "1972-04-12", 1),
        employee(2, "Mrs.", "Emma", "White", "1985-09-30", 2),
        employee(3, "Mr.", "Fred", "Bloggs", "1968-01-05", 3),
    ]
}

/// Field metadata sent with every employee detail.
pub fn employee_meta() -> Value {
    json!([
        {"name": "EMPLOYEE_ID", "property": "employeeId", "dataType": "AUTOINC", "required": true, "readOnly": true, "disabled": true},
        {"name": "SALUTATION", "property": "salutation", "dataType": "TEXT", "maxLength": 5, "controlType": "select",
         "options": {"": "", "Mr.": "Mister", "Mrs.": "Missis", "Dr.": "Doctor"}},
        {"name": "FIRST_NAME", "property": "firstName", "dataType": "TEXT", "maxLength": 40, "required": true, "controlType": "text"},
        {"name": "LAST_NAME", "property": "lastName", "dataType": "TEXT", "maxLength": 40, "required": true, "controlType": "text"},
        {"name": "DATE_OF_BIRTH", "property": "dateOfBirth", "dataType": "DATE", "controlType": "date"},
        {"name": "DEPARTMENT_ID", "property": "departmentId", "dataType": "INTEGER", "required": true, "controlType": "select"},
        {"name": "RETIRED", "property": "retired", "dataType": "BOOL", "required": true, "controlType": "checkbox"}
    ])
}

async fn login(State(db): State<Db>, Form(input): Form<LoginForm>) -> Response {
    if input.username != DEMO_USERNAME || input.password != DEMO_PASSWORD {
        tracing::warn!(username = %input.username, "login rejected");
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let token = Uuid::new_v4().to_string();
    db.sessions.write().await.insert(token.clone());
    tracing::info!(username = %input.username, "login accepted");
    (
        [(header::SET_COOKIE, format!("{LOGIN_COOKIE}={token}; Path=/; HttpOnly"))],
        StatusCode::OK,
    )
        .into_response()
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        db.sessions.write().await.remove(&token);
    }
    (
        [(header::SET_COOKIE, format!("{LOGIN_COOKIE}=; Path=/; Max-Age=0"))],
        StatusCode::OK,
    )
        .into_response()
}

async fn list_employees(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Employee>>, StatusCode> {
    require_session(&db, &headers).await?;
    let employees = db.employees.read().await;
    Ok(Json(employees.values().cloned().collect()))
}

async fn get_employee(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    require_session(&db, &headers).await?;
    let employees = db.employees.read().await;
    let employee = employees.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({ "meta": employee_meta(), "data": employee })))
}

async fn set_employee(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, StatusCode> {
    require_session(&db, &headers).await?;
    let input: Employee = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected employee record");
        StatusCode::UNPROCESSABLE_ENTITY
    })?;
    let mut employees = db.employees.write().await;
    let stored = employees.get_mut(&input.employee_id).ok_or(StatusCode::NOT_FOUND)?;
    *stored = input;
    tracing::info!(employee_id = stored.employee_id, "employee updated");
    Ok(StatusCode::OK)
}

async fn require_session(db: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = session_token(headers).ok_or(StatusCode::UNAUTHORIZED)?;
    if db.sessions.read().await.contains(&token) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOGIN_COOKIE)
        .map(|(_, token)| token.to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn employee_serializes_camel_case() {
        let employee = demo_employees().remove(0);
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["employeeId"], 1);
        assert_eq!(json["firstName"], "Peter");
        assert_eq!(json["dateOfBirth"], "1972-04-12");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn employee_rejects_missing_names() {
        let result: Result<Employee, _> = serde_json::from_str(r#"{"employeeId":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn session_token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; EmployeeVueLoginCookie=abc; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn empty_session_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("EmployeeVueLoginCookie="));
        assert_eq!(session_token(&headers), None);
        assert_eq!(session_token(&HeaderMap::new()), None);
    }

    #[test]
    fn meta_covers_every_required_field() {
        let meta = employee_meta();
        let properties: Vec<&str> = meta
            .as_array()
            .unwrap()
            .iter()
            .filter(|m| m["required"] == true)
            .map(|m| m["property"].as_str().unwrap())
            .collect();
        assert_eq!(
            properties,
            vec!["employeeId", "firstName", "lastName", "departmentId", "retired"]
        );
    }
}
