//! Validation utilities for Stock Analytics inputs

/// Longest search term accepted by the general table
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Validate company code format (2-30 uppercase alphanumeric or underscore)
pub fn validate_company_code(code: &str) -> Result<(), &'static str> {
    if code.len() < 2 {
        return Err("Company code must be at least 2 characters");
    }
    if code.len() > 30 {
        return Err("Company code must be at most 30 characters");
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    {
        return Err("Company code must be uppercase alphanumeric or underscore only");
    }
    Ok(())
}

/// Validate a product search term
pub fn validate_search_term(term: &str) -> Result<(), &'static str> {
    if term.chars().count() > MAX_SEARCH_LENGTH {
        return Err("Search term is too long");
    }
    Ok(())
}

/// Validate an explicit upload version id
pub fn validate_version_id(version_id: i64) -> Result<(), &'static str> {
    if version_id <= 0 {
        return Err("Version id must be positive");
    }
    Ok(())
}
