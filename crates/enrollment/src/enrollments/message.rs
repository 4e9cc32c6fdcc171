use serde::{Deserialize, Serialize};

use crate::cpf;

/// Queue payload schema, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentMessage {
    pub name: String,
    pub cpf: String,
    pub age: u32,
}

impl EnrollmentMessage {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a popped payload. The producer is not trusted: the CPF checksum is re-checked and
    /// the CPF is reduced to its 11 digits, the form the store is queried by.
    pub fn decode(payload: &str) -> Result<Self, MessageError> {
        let mut message: Self = serde_json::from_str(payload)?;
        message.cpf = cpf::normalize(&message.cpf).ok_or(MessageError::InvalidCpf)?;
        Ok(message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("payload is not an enrollment message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload carries an invalid CPF")]
    InvalidCpf,
}
