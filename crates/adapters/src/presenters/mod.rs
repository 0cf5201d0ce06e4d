use filepick_application::AggregateSnapshot;
use filepick_domain::{ErrorKind, ValidFile, ValidatedEntry};
use serde::Serialize;
use serde_json::Value;

pub fn present_entry_row(entry: &ValidatedEntry) -> String {
    match entry {
        ValidatedEntry::Success { file, image_info } => format!(
            "ok\t{}\t{}\t{} bytes\t{}",
            file.name(),
            file.mime_type(),
            file.size(),
            dimensions_label(image_info.width, image_info.height)
        ),
        ValidatedEntry::Failure {
            file_name,
            error_kind,
        } => format!("error\t{file_name}\t{error_kind}"),
    }
}

pub fn present_valid_files(files: &[ValidFile]) -> String {
    if files.is_empty() {
        return "valid files changed: (none)".to_string();
    }
    let names: Vec<&str> = files.iter().map(|valid| valid.file.name()).collect();
    format!("valid files changed: {}", names.join(", "))
}

#[derive(Debug, Serialize)]
struct EntryReport<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorKind>,
}

#[derive(Debug, Serialize)]
struct SnapshotReport<'a> {
    files: Vec<EntryReport<'a>>,
    valid: Vec<&'a str>,
}

pub fn present_report_json(snapshot: &AggregateSnapshot) -> Result<Value, serde_json::Error> {
    let files = snapshot.current.iter().map(entry_report).collect();
    let valid = snapshot
        .valid
        .iter()
        .map(|valid| valid.file.name())
        .collect();
    serde_json::to_value(SnapshotReport { files, valid })
}

fn entry_report(entry: &ValidatedEntry) -> EntryReport<'_> {
    match entry {
        ValidatedEntry::Success { file, image_info } => EntryReport {
            name: file.name(),
            status: "ok",
            mime_type: Some(file.mime_type()),
            size: Some(file.size()),
            width: image_info.width,
            height: image_info.height,
            error: None,
        },
        ValidatedEntry::Failure {
            file_name,
            error_kind,
        } => EntryReport {
            name: file_name,
            status: "error",
            mime_type: None,
            size: None,
            width: None,
            height: None,
            error: Some(*error_kind),
        },
    }
}

fn dimensions_label(width: Option<u32>, height: Option<u32>) -> String {
    match (width, height) {
        (Some(width), Some(height)) => format!("{width}x{height}"),
        _ => "unknown size".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use filepick_domain::{ImageInfo, RawFile};
    use serde_json::json;

    use super::*;

    fn photo() -> ValidatedEntry {
        let file = RawFile::from_bytes("photo.png", "image/png", vec![0_u8; 3]).expect("file");
        ValidatedEntry::success(
            Arc::new(file),
            ImageInfo {
                width: Some(4),
                height: Some(2),
            },
        )
    }

    #[test]
    fn rows_describe_success_and_failure() {
        assert_eq!(
            present_entry_row(&photo()),
            "ok\tphoto.png\timage/png\t3 bytes\t4x2"
        );
        assert_eq!(
            present_entry_row(&ValidatedEntry::failure("notes.txt", ErrorKind::InvalidImage)),
            "error\tnotes.txt\tINVALID_IMAGE"
        );
    }

    #[test]
    fn valid_files_line_lists_names() {
        let valid: Vec<ValidFile> = photo().as_valid_file().into_iter().collect();
        assert_eq!(present_valid_files(&valid), "valid files changed: photo.png");
        assert_eq!(present_valid_files(&[]), "valid files changed: (none)");
    }

    #[test]
    fn json_report_lists_files_and_valid_names() {
        let current = vec![
            photo(),
            ValidatedEntry::failure("big.png", ErrorKind::InvalidSize),
        ];
        let snapshot = AggregateSnapshot {
            valid: filepick_domain::derive_valid_files(&current),
            current,
        };

        assert_eq!(
            present_report_json(&snapshot).expect("report"),
            json!({
                "files": [
                    {
                        "name": "photo.png",
                        "status": "ok",
                        "mime_type": "image/png",
                        "size": 3,
                        "width": 4,
                        "height": 2
                    },
                    {"name": "big.png", "status": "error", "error": "INVALID_SIZE"}
                ],
                "valid": ["photo.png"]
            })
        );
    }

    #[test]
    fn empty_snapshot_reports_empty_lists() {
        let report = present_report_json(&AggregateSnapshot::default()).expect("report");
        assert_eq!(report, json!({"files": [], "valid": []}));
    }
}
