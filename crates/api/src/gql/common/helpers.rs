use crate::gql::error::GqlError;

pub const MAX_GROUP_NAME_CHARS: usize = 200;

/// Trim a requested group name and reject empty or oversized names.
pub fn normalize_group_name(raw: &str) -> Result<String, GqlError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(GqlError::InvalidArgument(
            "groupName must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_GROUP_NAME_CHARS {
        return Err(GqlError::InvalidArgument(format!(
            "groupName must be at most {MAX_GROUP_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}
