use crate::error::{internal::InternalError, AppError};

/// Parses a Discord snowflake stored as a string back into a u64.
///
/// Ids are persisted as strings (SQLite has no unsigned 64-bit column), so
/// every read that needs the numeric form goes through this helper.
///
/// # Arguments
/// - `value` - String representation of the id
///
/// # Returns
/// - `Ok(u64)` - Parsed id
/// - `Err(AppError)` - The stored value was not a valid u64
pub fn parse_u64_from_string(value: impl AsRef<str>) -> Result<u64, AppError> {
    let value = value.as_ref();
    value
        .parse::<u64>()
        .map_err(|source| InternalError::ParseId {
            value: value.to_string(),
            source,
        })
        .map_err(AppError::from)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_valid_snowflake() {
        assert_eq!(parse_u64_from_string("123456789").unwrap(), 123456789);
    }

    #[test]
    fn rejects_non_numeric_value() {
        assert!(parse_u64_from_string("not-an-id").is_err());
    }
}
