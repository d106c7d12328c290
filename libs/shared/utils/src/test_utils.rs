use std::time::Duration;

use axum::body::Body;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{json, Value};

use shared_config::{AppConfig, WindowMode};

pub struct TestConfig {
    pub backend_url: String,
    pub request_timeout: Duration,
    pub window_mode: WindowMode,
    pub window_days: i64,
    pub utc_offset_minutes: i32,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3001".to_string(),
            request_timeout: Duration::from_secs(2),
            window_mode: WindowMode::Rolling,
            window_days: 14,
            utc_offset_minutes: 0,
        }
    }
}

impl TestConfig {
    /// Config pointed at a mock backend, typically `MockServer::uri()`.
    pub fn with_backend(url: impl Into<String>) -> Self {
        Self {
            backend_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            backend_url: self.backend_url.clone(),
            request_timeout: self.request_timeout,
            window_mode: self.window_mode,
            window_days: self.window_days,
            utc_offset_minutes: self.utc_offset_minutes,
            web_port: 0,
        }
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_time(NaiveTime::from_hms_opt(hour, minute, 0).expect("valid test time"))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("readable response body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 response body")
}

/// Canned backend payloads. The citas and obras sociales are the sample
/// data the staff panel was first prototyped with.
pub struct MockBackendResponses;

impl MockBackendResponses {
    pub fn obras_sociales() -> Value {
        json!([
            { "id": 1, "nombre": "OSDE" },
            { "id": 2, "nombre": "Swiss Medical" },
            { "id": 3, "nombre": "Galeno" }
        ])
    }

    pub fn paciente_created(id: i64) -> Value {
        json!({ "id": id })
    }

    pub fn login_success(token: &str) -> Value {
        json!({ "token": token })
    }

    pub fn error_message(message: &str) -> Value {
        json!({ "message": message })
    }

    pub fn availability(instants: &[&str]) -> Value {
        let slots: Vec<Value> = instants
            .iter()
            .map(|instant| json!({ "fechaHora": instant }))
            .collect();
        json!({ "slots": slots })
    }

    pub fn cita(id: i64, paciente: &str, email: &str, fecha_hora: &str, estado: &str) -> Value {
        json!({
            "id": id,
            "paciente": paciente,
            "email": email,
            "telefono": "+54 11 1234-5678",
            "fechaHora": fecha_hora,
            "obraSocial": "OSDE",
            "estado": estado
        })
    }

    /// Three citas; the last one is on `today` at 16:00.
    pub fn citas(today: NaiveDate) -> Value {
        json!([
            {
                "id": 1,
                "paciente": "Juan Pérez",
                "email": "juan.perez@email.com",
                "telefono": "+54 11 1234-5678",
                "fechaHora": "2025-01-09T09:00:00",
                "obraSocial": "OSDE",
                "estado": "CONFIRMADA"
            },
            {
                "id": 2,
                "paciente": "María López",
                "email": "maria.lopez@email.com",
                "telefono": "+54 11 2222-3333",
                "fechaHora": "2025-01-15T10:30:00",
                "obraSocial": "Swiss Medical",
                "estado": "SOLICITADA"
            },
            {
                "id": 3,
                "paciente": "Carlos Gómez",
                "email": "carlos.gomez@email.com",
                "telefono": "+54 11 3333-4444",
                "fechaHora": format!("{}T16:00:00", today.format("%Y-%m-%d")),
                "obraSocial": "OSDE",
                "estado": "CONFIRMADA"
            }
        ])
    }
}
