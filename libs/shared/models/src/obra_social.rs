use serde::{Deserialize, Serialize};

/// Health-insurance provider a patient is covered by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObraSocial {
    pub id: i64,
    pub nombre: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObraSocialPayload {
    pub nombre: String,
}
