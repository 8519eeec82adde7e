//! Upload configuration and the per-file request built from it.

use crate::config::DEFAULT_FIELD_NAME;
use crate::types::UploadFile;

/// Transport-level settings shared by every file of one widget.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadOptions {
    /// Submission URL.
    pub action: String,
    /// Multipart field name of the file part.
    pub name: String,
    pub headers: Vec<(String, String)>,
    /// Extra text parts sent after the file.
    pub data: Vec<(String, String)>,
    /// Send cookies/auth on cross-origin requests.
    pub with_credentials: bool,
}

impl UploadOptions {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            name: DEFAULT_FIELD_NAME.to_string(),
            headers: Vec::new(),
            data: Vec::new(),
            with_credentials: false,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    /// Request for one file.
    pub fn request_for<F: UploadFile>(&self, file: F) -> UploadRequest<F> {
        UploadRequest {
            url: self.action.clone(),
            field: self.name.clone(),
            file,
            data: self.data.clone(),
            headers: self.headers.clone(),
            with_credentials: self.with_credentials,
        }
    }
}

/// One multipart POST, ready for a transport.
///
/// The body is always `multipart/form-data`; the boundary is chosen by
/// the transport, so `headers` never needs a content type.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadRequest<F> {
    pub url: String,
    pub field: String,
    pub file: F,
    pub data: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub with_credentials: bool,
}

/// A single part of the multipart body.
#[derive(Debug, PartialEq)]
pub enum FormPart<'a, F> {
    File {
        field: &'a str,
        file: &'a F,
        file_name: String,
    },
    Text {
        field: &'a str,
        value: &'a str,
    },
}

impl<F: UploadFile> UploadRequest<F> {
    /// Body parts in submission order: the file, then every data field.
    pub fn parts(&self) -> Vec<FormPart<'_, F>> {
        let mut parts = Vec::with_capacity(1 + self.data.len());
        parts.push(FormPart::File {
            field: &self.field,
            file: &self.file,
            file_name: self.file.name(),
        });
        parts.extend(
            self.data
                .iter()
                .map(|(field, value)| FormPart::Text {
                    field: field.as_str(),
                    value: value.as_str(),
                }),
        );
        parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Doc;

    impl UploadFile for Doc {
        fn name(&self) -> String {
            "report.pdf".into()
        }
        fn size(&self) -> u64 {
            42
        }
    }

    #[test]
    fn test_defaults() {
        let opts = UploadOptions::new("/upload");
        assert_eq!(opts.name, "file");
        assert!(!opts.with_credentials);
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn test_parts_put_file_first_then_data() {
        let req = UploadOptions::new("/upload")
            .name("attachment")
            .data("folder", "inbox")
            .data("tag", "q3")
            .header("X-Token", "abc")
            .with_credentials(true)
            .request_for(Doc);

        assert_eq!(req.url, "/upload");
        assert!(req.with_credentials);
        assert_eq!(req.headers, vec![("X-Token".to_string(), "abc".to_string())]);

        let parts = req.parts();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[0],
            FormPart::File {
                field: "attachment",
                file: &Doc,
                file_name: "report.pdf".into(),
            }
        );
        assert_eq!(
            parts[2],
            FormPart::Text {
                field: "tag",
                value: "q3",
            }
        );
    }
}
