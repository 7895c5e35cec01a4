//! Multipart decoding of the create and edit game forms.

use axum::extract::Multipart;
use gamezone_core::game::{validate_game_form, CoverUpload, FieldError, GameForm};
use gamezone_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Cover file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedCover {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadedCover {
    fn as_upload(&self) -> CoverUpload<'_> {
        CoverUpload {
            file_name: &self.file_name,
            size: self.bytes.len(),
        }
    }
}

/// A decoded form submission.
#[derive(Debug, Default)]
pub struct GameSubmission {
    pub form: GameForm,
    pub cover: Option<UploadedCover>,
    /// Values that could not be decoded at all (e.g. a non-numeric device id).
    pub parse_errors: Vec<FieldError>,
}

impl GameSubmission {
    /// Run every field rule and return the combined errors, ordered by field.
    pub fn validate(&self, cover_required: bool) -> Result<(), Vec<FieldError>> {
        let mut errors = self.parse_errors.clone();
        let cover = self.cover.as_ref().map(UploadedCover::as_upload);
        if let Err(field_errors) = validate_game_form(&self.form, cover, cover_required) {
            errors.extend(field_errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(errors)
        }
    }
}

/// Decode a multipart game form.
///
/// Recognised fields: `name`, `description`, `category_id`,
/// `selected_devices` (repeated, `selected_devices[]` also accepted) and the
/// `cover` file. Unknown fields are ignored. A cover part with no file name
/// and no content counts as absent, which is what browsers send when the
/// file input is left empty.
pub async fn read_game_form(mut multipart: Multipart) -> AppResult<GameSubmission> {
    let mut submission = GameSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "cover" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if file_name.is_empty() && data.is_empty() {
                    continue;
                }
                submission.cover = Some(UploadedCover {
                    file_name,
                    bytes: data.to_vec(),
                });
            }
            "name" | "description" | "category_id" | "selected_devices"
            | "selected_devices[]" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                apply_text_field(&mut submission, &name, &text);
            }
            _ => {} // ignore unknown fields
        }
    }

    Ok(submission)
}

fn apply_text_field(submission: &mut GameSubmission, name: &str, value: &str) {
    match name {
        "name" => submission.form.name = value.to_string(),
        "description" => submission.form.description = value.to_string(),
        // An unparsable category is reported as missing by the form rules.
        "category_id" => submission.form.category_id = parse_id(value),
        _ => {
            let value = value.trim();
            if value.is_empty() {
                return;
            }
            match parse_id(value) {
                Some(id) => submission.form.selected_devices.push(id),
                None => submission.parse_errors.push(FieldError::new(
                    "selected_devices",
                    format!("Invalid device id '{value}'"),
                )),
            }
        }
    }
}

fn parse_id(value: &str) -> Option<DbId> {
    value.trim().parse().ok()
}
