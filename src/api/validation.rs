use super::ApiError;

pub fn validate_entity_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid id: {}. Id must be a positive integer",
            id
        )));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_entity_id() {
        assert!(validate_entity_id(1).is_ok());
        assert!(validate_entity_id(98765).is_ok());
        assert!(validate_entity_id(0).is_err());
        assert!(validate_entity_id(-4).is_err());
    }
}
