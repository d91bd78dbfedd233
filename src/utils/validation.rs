use crate::utils::error::{GenError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(GenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(GenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GenError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 分隔符必須是單一 ASCII 字元，且不能是換行
pub fn validate_delimiter(field_name: &str, delimiter: u8) -> Result<()> {
    if !delimiter.is_ascii() || delimiter == b'\n' || delimiter == b'\r' {
        return Err(GenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{:?}", delimiter as char),
            reason: "Delimiter must be a single ASCII character other than a line break".to_string(),
        });
    }
    Ok(())
}

/// Accepts a literal single character, the escape `\t`, or the word `tab`.
pub fn parse_delimiter(value: &str) -> std::result::Result<u8, String> {
    if matches!(value, "\\t" | "tab" | "TAB") {
        return Ok(b'\t');
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '\n' && c != '\r' => Ok(c as u8),
        (Some(_), None) => Err(format!("'{}' is not a usable ASCII delimiter", value.escape_default())),
        _ => Err(format!(
            "expected a single character, `\\t` or `tab`, got '{}'",
            value.escape_default()
        )),
    }
}
