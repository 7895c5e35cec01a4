//! Game form validation and cover file rules.
//!
//! The create and edit forms share one field set. Field-level constraints
//! are declared with `validator`; the cover image is checked separately
//! because it arrives as a multipart file rather than a text field.

use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a game name, in characters.
pub const MAX_NAME_LENGTH: usize = 250;

/// Maximum length of a game description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 2500;

/// Accepted cover image extensions (lower case, without the dot).
pub const ALLOWED_COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Maximum cover image size: 1 MiB.
pub const MAX_COVER_SIZE_BYTES: usize = 1024 * 1024;

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Text fields submitted by the create / edit forms.
///
/// Serialized back to the client when validation fails so the form can be
/// re-displayed with the previous selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct GameForm {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: String,

    #[validate(length(max = 2500, message = "Description must be at most 2500 characters"))]
    pub description: String,

    #[validate(
        required(message = "Category is required"),
        range(min = 1, message = "Category is required")
    )]
    pub category_id: Option<DbId>,

    #[validate(length(min = 1, message = "Select at least one device"))]
    pub selected_devices: Vec<DbId>,
}

impl GameForm {
    /// Selected device ids with duplicates removed, in first-seen order.
    pub fn device_ids(&self) -> Vec<DbId> {
        let mut ids = Vec::with_capacity(self.selected_devices.len());
        for &id in &self.selected_devices {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Metadata of an uploaded cover file.
#[derive(Debug, Clone, Copy)]
pub struct CoverUpload<'a> {
    pub file_name: &'a str,
    pub size: usize,
}

/// Validate a submitted form.
///
/// `cover_required` is true for creation; on edit an absent cover keeps the
/// current one. Errors are ordered by field name.
pub fn validate_game_form(
    form: &GameForm,
    cover: Option<CoverUpload<'_>>,
    cover_required: bool,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if let Err(validation) = form.validate() {
        for (field, field_errors) in validation.field_errors() {
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                errors.push(FieldError::new(field.to_string(), message));
            }
        }
    }

    if !form.name.is_empty() && form.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name must not be blank"));
    }

    match cover {
        Some(upload) => {
            if let Err(message) = validate_cover(upload) {
                errors.push(FieldError::new("cover", message));
            }
        }
        None if cover_required => errors.push(FieldError::new("cover", "Cover is required")),
        None => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        Err(errors)
    }
}

// ---------------------------------------------------------------------------
// Cover files
// ---------------------------------------------------------------------------

/// Lower-cased extension of `file_name`, if it has one.
pub fn cover_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Check extension and size of an uploaded cover.
pub fn validate_cover(upload: CoverUpload<'_>) -> Result<(), String> {
    let allowed = cover_extension(upload.file_name)
        .is_some_and(|ext| ALLOWED_COVER_EXTENSIONS.contains(&ext.as_str()));
    if !allowed {
        return Err(format!(
            "Only {} files are allowed",
            ALLOWED_COVER_EXTENSIONS
                .iter()
                .map(|e| format!(".{e}"))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    if upload.size == 0 {
        return Err("Cover file is empty".into());
    }
    if upload.size > MAX_COVER_SIZE_BYTES {
        return Err(format!(
            "Cover must not exceed {} KiB",
            MAX_COVER_SIZE_BYTES / 1024
        ));
    }
    Ok(())
}

/// Server-side file name for a stored cover: a fresh UUID plus the original
/// (lower-cased) extension.
pub fn stored_cover_name(original_file_name: &str) -> String {
    match cover_extension(original_file_name) {
        Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

/// Whether `name` is safe to join onto the covers directory.
pub fn is_safe_cover_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
