use filepick_application::{SizeCheckMode, ValidationConfig};
use filepick_domain::DomainError;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub validation: ValidationConfig,
    pub json_output: bool,
}

impl AppConfig {
    pub fn from_flags(
        max_size: Option<u64>,
        strict_size: bool,
        accept: &str,
        json_output: bool,
    ) -> Result<Self, DomainError> {
        let mut validation = ValidationConfig::default().with_accept(accept)?;
        if let Some(limit) = max_size {
            validation = validation.with_max_file_size(limit);
        }
        if strict_size {
            validation = validation.with_size_check(SizeCheckMode::Strict);
        }
        Ok(Self {
            validation,
            json_output,
        })
    }
}
