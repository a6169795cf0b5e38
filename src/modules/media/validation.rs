use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 3] = ["mp4", "avi", "mov"];
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["video/mp4", "video/x-msvideo", "video/quicktime"];

/// Upload validation configuration
#[derive(Debug, Clone)]
pub struct UploadLimits {
    pub max_file_size_mb: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self { max_file_size_mb: 100 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    BadExtension,
    BadMimeType,
    TooLarge,
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationFailure),
}

/// Stateless checks on the client-declared filename, content type and byte
/// size. The actual payload is never inspected: a forged extension or MIME
/// type passes here and only fails at playback time.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_file_size_bytes: i64,
}

impl FileValidator {
    pub fn new(limits: UploadLimits) -> Self {
        Self { max_file_size_bytes: (limits.max_file_size_mb * 1024 * 1024) as i64 }
    }

    pub fn validate(
        &self,
        filename: &str,
        content_type: &str,
        byte_size: i64,
    ) -> ValidationOutcome {
        if !self.is_valid_file_type(filename) {
            return ValidationOutcome::Invalid(ValidationFailure::BadExtension);
        }
        if !self.is_valid_mime_type(content_type) {
            return ValidationOutcome::Invalid(ValidationFailure::BadMimeType);
        }
        if byte_size <= 0 {
            return ValidationOutcome::Invalid(ValidationFailure::Empty);
        }
        if byte_size > self.max_file_size_bytes {
            return ValidationOutcome::Invalid(ValidationFailure::TooLarge);
        }
        ValidationOutcome::Valid
    }

    pub fn is_valid_file_type(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }

    pub fn is_valid_mime_type(&self, content_type: &str) -> bool {
        ALLOWED_MIME_TYPES.contains(&content_type)
    }

    pub fn is_valid_file_size(&self, byte_size: i64) -> bool {
        byte_size > 0 && byte_size <= self.max_file_size_bytes
    }

    /// Stable, user-facing rendering of the extension allow-list.
    pub fn allowed_extensions(&self) -> String {
        ALLOWED_EXTENSIONS.iter().map(|ext| ext.to_uppercase()).collect::<Vec<_>>().join(", ")
    }

    pub fn max_file_size_bytes(&self) -> i64 {
        self.max_file_size_bytes
    }

    pub fn max_file_size_formatted(&self) -> String {
        format!("{} MB", self.max_file_size_bytes / (1024 * 1024))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> FileValidator {
        FileValidator::new(UploadLimits::default())
    }

    #[test]
    fn file_type_allows_known_extensions_case_insensitively() {
        let v = validator();
        for name in ["video.mp4", "video.MP4", "video.avi", "video.mov"] {
            assert!(v.is_valid_file_type(name), "{name} should be accepted");
        }
        for name in ["video.mkv", "video.wmv", "document.pdf", "", "noextension"] {
            assert!(!v.is_valid_file_type(name), "{name} should be rejected");
        }
    }

    #[test]
    fn file_size_boundaries() {
        let v = validator();
        assert!(v.is_valid_file_size(1024));
        assert!(v.is_valid_file_size(50 * 1024 * 1024));
        assert!(v.is_valid_file_size(100 * 1024 * 1024));
        assert!(!v.is_valid_file_size(100 * 1024 * 1024 + 1));
        assert!(!v.is_valid_file_size(0));
        assert!(!v.is_valid_file_size(-1));
    }

    #[test]
    fn mime_type_allow_list() {
        let v = validator();
        for mime in ["video/mp4", "video/x-msvideo", "video/quicktime"] {
            assert!(v.is_valid_mime_type(mime), "{mime} should be accepted");
        }
        for mime in ["video/webm", "application/pdf", ""] {
            assert!(!v.is_valid_mime_type(mime), "{mime} should be rejected");
        }
    }

    #[test]
    fn validate_reports_specific_failures() {
        let v = validator();
        assert_eq!(v.validate("clip.mp4", "video/mp4", 1024), ValidationOutcome::Valid);
        assert_eq!(
            v.validate("clip.mkv", "video/mp4", 1024),
            ValidationOutcome::Invalid(ValidationFailure::BadExtension)
        );
        assert_eq!(
            v.validate("clip.mp4", "video/webm", 1024),
            ValidationOutcome::Invalid(ValidationFailure::BadMimeType)
        );
        assert_eq!(
            v.validate("clip.mp4", "video/mp4", 0),
            ValidationOutcome::Invalid(ValidationFailure::Empty)
        );
        assert_eq!(
            v.validate("clip.mp4", "video/mp4", 100 * 1024 * 1024 + 1),
            ValidationOutcome::Invalid(ValidationFailure::TooLarge)
        );
    }

    #[test]
    fn extension_and_mime_checks_are_independent() {
        let v = validator();
        // Mismatched but individually allowed pairs still pass.
        assert_eq!(v.validate("clip.avi", "video/mp4", 1), ValidationOutcome::Valid);
        assert_eq!(v.validate("clip.mp4", "video/quicktime", 1), ValidationOutcome::Valid);
    }

    #[test]
    fn allowed_extensions_is_upper_cased_and_stable() {
        let v = validator();
        let rendered = v.allowed_extensions();
        assert!(rendered.contains("MP4"));
        assert!(rendered.contains("AVI"));
        assert!(rendered.contains("MOV"));
        assert_eq!(rendered, v.allowed_extensions());
    }

    #[test]
    fn max_file_size_accessors() {
        let v = validator();
        assert_eq!(v.max_file_size_bytes(), 100 * 1024 * 1024);
        assert_eq!(v.max_file_size_formatted(), "100 MB");

        let small = FileValidator::new(UploadLimits { max_file_size_mb: 5 });
        assert_eq!(small.max_file_size_bytes(), 5 * 1024 * 1024);
        assert_eq!(small.max_file_size_formatted(), "5 MB");
        assert!(small.is_valid_file_size(5 * 1024 * 1024));
        assert!(!small.is_valid_file_size(5 * 1024 * 1024 + 1));
    }
}
