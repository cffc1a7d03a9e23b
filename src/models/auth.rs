use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
}

/// Cuerpo de `api/register`
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
}

impl RegisterResponse {
    /// Algunos backends devuelven "id|token"
    pub fn plain_token(&self) -> Option<String> {
        self.token.as_ref().map(|t| match t.split_once('|') {
            Some((_, token)) => token.to_string(),
            None => t.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_token() {
        let con_id = RegisterResponse { token: Some("12|abc".to_string()) };
        assert_eq!(con_id.plain_token().as_deref(), Some("abc"));
        let plano = RegisterResponse { token: Some("abc".to_string()) };
        assert_eq!(plano.plain_token().as_deref(), Some("abc"));
        assert_eq!(RegisterResponse { token: None }.plain_token(), None);
    }
}
