use validator::ValidationError;

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Field cannot be empty".into()));
    }
    Ok(())
}

/// Keeps a short prefix of a secret for log lines.
pub fn redact(secret: &str) -> String {
    if secret.chars().count() <= 5 {
        return "*****".to_string();
    }
    let prefix: String = secret.chars().take(5).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Jean Tremblay").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   \t\n").is_err());
    }

    #[test]
    fn test_redact_keeps_prefix_only() {
        assert_eq!(redact("re_abcdefghijkl"), "re_ab...");
        assert_eq!(redact("abc"), "*****");
        assert_eq!(redact(""), "*****");
    }
}
