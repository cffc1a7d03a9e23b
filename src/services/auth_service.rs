// ============================================================================
// AUTH SERVICE - Validación de formularios de acceso
// ============================================================================

use crate::models::RegisterRequest;

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Por favor, rellena todos los campos.")]
    MissingFields,
    #[error("Las contraseñas no coinciden. Inténtalo de nuevo.")]
    PasswordMismatch,
    #[error("La contraseña debe tener al menos 6 caracteres.")]
    PasswordTooShort,
    #[error("La contraseña debe incluir mayúsculas, minúsculas, números y caracteres especiales.")]
    PasswordTooWeak,
    #[error("El nombre es obligatorio.")]
    MissingName,
}

fn has_special(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

/// Validación de login antes de enviar
pub fn validate_login(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

/// Validación de registro en el orden en que se muestran los errores
pub fn validate_registration(request: &RegisterRequest) -> Result<(), ValidationError> {
    let password = request.password.as_str();
    if request.username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if password != request.password_confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }

    let upper = password.chars().any(|c| c.is_ascii_uppercase());
    let lower = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    if !(upper && lower && digit && has_special(password)) {
        return Err(ValidationError::PasswordTooWeak);
    }
    Ok(())
}

/// Nombre de un establecimiento nuevo
pub fn validate_nombre(nombre: &str) -> Result<String, ValidationError> {
    let nombre = nombre.trim();
    if nombre.is_empty() {
        return Err(ValidationError::MissingName);
    }
    Ok(nombre.to_string())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordStrength {
    Debil,
    Media,
    Fuerte,
}

impl PasswordStrength {
    pub fn label(&self) -> &'static str {
        match self {
            PasswordStrength::Debil => "Débil",
            PasswordStrength::Media => "Media",
            PasswordStrength::Fuerte => "Fuerte",
        }
    }

    /// Clase CSS de la barra del medidor
    pub fn css_class(&self) -> &'static str {
        match self {
            PasswordStrength::Debil => "strength-weak",
            PasswordStrength::Media => "strength-medium",
            PasswordStrength::Fuerte => "strength-strong",
        }
    }
}

/// Requisitos mostrados bajo el campo de contraseña: (texto, cumplido)
pub fn password_checklist(password: &str) -> [(&'static str, bool); 5] {
    [
        ("Al menos 6 caracteres", password.chars().count() >= MIN_PASSWORD_LEN),
        ("Una mayúscula", password.chars().any(|c| c.is_ascii_uppercase())),
        ("Una minúscula", password.chars().any(|c| c.is_ascii_lowercase())),
        ("Un número", password.chars().any(|c| c.is_ascii_digit())),
        ("Un carácter especial", has_special(password)),
    ]
}

/// Seis criterios: longitud ≥ 6, longitud ≥ 8, mayúscula, minúscula, número, especial
pub fn password_strength(password: &str) -> PasswordStrength {
    let len = password.chars().count();
    let score = [
        len >= MIN_PASSWORD_LEN,
        len >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        has_special(password),
    ]
    .iter()
    .filter(|ok| **ok)
    .count();

    match score {
        0..=2 => PasswordStrength::Debil,
        3..=4 => PasswordStrength::Media,
        _ => PasswordStrength::Fuerte,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registro(password: &str, confirmation: &str) -> RegisterRequest {
        RegisterRequest {
            username: "ana".to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[test]
    fn test_orden_de_validacion() {
        assert_eq!(validate_registration(&registro("abc", "abd")), Err(ValidationError::PasswordMismatch));
        assert_eq!(validate_registration(&registro("Ab1!", "Ab1!")), Err(ValidationError::PasswordTooShort));
        assert_eq!(
            validate_registration(&registro("abcdef1!", "abcdef1!")),
            Err(ValidationError::PasswordTooWeak)
        );
        assert_eq!(validate_registration(&registro("Museo2025!", "Museo2025!")), Ok(()));
    }

    #[test]
    fn test_campos_vacios() {
        let mut req = registro("Museo2025!", "Museo2025!");
        req.username = "  ".to_string();
        assert_eq!(validate_registration(&req), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("ana", ""), Err(ValidationError::MissingFields));
        assert_eq!(validate_login("ana", "x"), Ok(()));
    }

    #[test]
    fn test_medidor_de_fuerza() {
        assert_eq!(password_strength(""), PasswordStrength::Debil);
        assert_eq!(password_strength("abcdef"), PasswordStrength::Debil);
        assert_eq!(password_strength("abcdef12"), PasswordStrength::Media);
        assert_eq!(password_strength("Abcdef1!"), PasswordStrength::Fuerte);
        assert_eq!(PasswordStrength::Debil.label(), "Débil");
    }

    #[test]
    fn test_checklist() {
        let checks = password_checklist("abc1");
        assert_eq!(checks.iter().filter(|(_, ok)| *ok).count(), 2);
    }

    #[test]
    fn test_validate_nombre() {
        assert_eq!(validate_nombre("  Sede Este "), Ok("Sede Este".to_string()));
        assert_eq!(validate_nombre(" "), Err(ValidationError::MissingName));
    }
}
