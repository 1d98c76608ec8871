use super::{ConfigSnafu, Result};

/// If the value begins with an '@', read the preceding file path,
/// otherwise returns the value.
///
/// prefix is used to provide context in case of an error.
pub(crate) fn key_file_or_string(value: String, prefix: &str) -> Result<String> {
    Ok(match value.strip_prefix('@') {
        Some(key_file) => std::fs::read_to_string(key_file)
            .map_err(|err| {
                ConfigSnafu {
                    message: format!("Failed to read key from {key_file}: {err}"),
                    prefix,
                }
                .build()
            })?
            .trim()
            .into(),
        None => value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;

    #[test]
    fn plain_values_pass_through() {
        assert_eq!(
            key_file_or_string("hunter2".into(), "password").unwrap(),
            "hunter2"
        );
    }

    #[test]
    fn key_file_is_read_and_trimmed() {
        let path = std::env::temp_dir().join(format!("raxclouddns-{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, "s3cret\n").unwrap();

        let value = key_file_or_string(format!("@{}", path.display()), "password").unwrap();
        assert_eq!(value, "s3cret");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_key_file_is_a_config_error() {
        let err = key_file_or_string("@/nonexistent/raxclouddns".into(), "password").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().starts_with("password: "));
    }
}
