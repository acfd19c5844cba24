use contagion::manager::ManagerActionResult;
use rocket::serde::{Deserialize, Serialize};

#[derive(Debug, Responder)]
pub enum LoadGameError {
    #[response(status = 404)]
    NoGame(String),
    #[response(status = 401)]
    Unauthorized(String),
    #[response(status = 500)]
    Unserializable(String),
}

#[derive(Debug, Deserialize, PartialEq, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    pub(crate) success: bool,
    pub(crate) error_message: Option<String>,
}

impl ActionResponse {
    pub fn new(result: ManagerActionResult) -> Self {
        match result {
            Ok(()) => Self::new_success(),
            Err(error_message) => Self::new_failure(error_message),
        }
    }

    pub fn new_success() -> Self {
        Self {
            success: true,
            error_message: None,
        }
    }

    pub fn new_failure(error_message: String) -> Self {
        Self {
            success: false,
            error_message: Some(error_message),
        }
    }
}
