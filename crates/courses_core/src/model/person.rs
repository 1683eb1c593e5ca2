//! Person reference data.

use crate::repo::Entity;
use serde::{Deserialize, Serialize};

/// A person known to the university, identified by SSN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub ssn: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Person {
    pub fn new(ssn: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            ssn: ssn.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Entity for Person {
    type Key = String;
    const NAME: &'static str = "person";

    fn key(&self) -> String {
        self.ssn.clone()
    }
}
