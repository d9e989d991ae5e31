use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::api::error;
use crate::constants::{MSG_FILE_TOO_LARGE, MSG_INVALID_BODY, MSG_NOT_AN_IMAGE, MSG_TOO_MANY_FILES};
use crate::modules::mailer::EmailAttachment;
use crate::modules::submission::model::{
    SubmissionForm, UploadConfig, UploadedFile, FIELD_IMAGE,
};

const MAX_TEXT_FIELD_SIZE: usize = 64 * 1024;

/// Temporary files written for one request. Every file is removed either by
/// [`TempUploads::cleanup`] or, failing that, when the guard is dropped.
#[derive(Debug, Default)]
pub struct TempUploads {
    files: Vec<UploadedFile>,
}

impl TempUploads {
    #[cfg(test)]
    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Reads every stored file into an attachment. Unreadable files are skipped.
    pub async fn to_attachments(&self) -> Vec<EmailAttachment> {
        if self.is_empty() {
            return Vec::new();
        }
        let mut attachments = Vec::with_capacity(self.files.len());
        for file in &self.files {
            match tokio::fs::read(&file.path).await {
                Ok(content) => {
                    tracing::debug!("Attaching {} ({} bytes)", file.original_name, file.size);
                    attachments.push(EmailAttachment {
                        filename: file.original_name.clone(),
                        content,
                        content_type: file.mime_type.clone(),
                    })
                }
                Err(e) => {
                    tracing::error!("Error reading uploaded file {}: {}", file.path.display(), e)
                }
            }
        }
        attachments
    }

    /// Removes every stored file from disk.
    pub async fn cleanup(mut self) {
        for file in self.files.drain(..) {
            if let Err(e) = tokio::fs::remove_file(&file.path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::error!("Error cleaning up file {}: {}", file.path.display(), e);
                }
            }
        }
    }
}

impl Drop for TempUploads {
    // Last resort for error and cancellation paths that never reached `cleanup`.
    fn drop(&mut self) {
        for file in self.files.drain(..) {
            let _ = std::fs::remove_file(&file.path);
        }
    }
}

/// Splits a multipart body into form fields and image files stored under
/// `config.upload_dir`. On error, files written so far are removed before returning.
pub async fn read_multipart(
    mut payload: Multipart,
    config: &UploadConfig,
    allow_attachments: bool,
) -> Result<(SubmissionForm, TempUploads), error::SystemError> {
    let mut form = SubmissionForm::default();
    let mut uploads = TempUploads::default();

    while let Some(mut field) = payload.try_next().await? {
        let Some(name) = field.name().map(str::to_string) else {
            drain(&mut field).await?;
            continue;
        };

        if name != FIELD_IMAGE {
            let value = read_text(&mut field).await?;
            form.set_field(&name, value);
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        // Browsers send an empty part when no file was chosen.
        if !allow_attachments || filename.is_empty() {
            drain(&mut field).await?;
            continue;
        }

        if uploads.len() >= config.max_files {
            return Err(error::SystemError::bad_request(MSG_TOO_MANY_FILES));
        }

        let mime_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .filter(|m| m != "application/octet-stream")
            .or_else(|| mime_guess::from_path(&filename).first().map(|m| m.essence_str().to_string()))
            .unwrap_or_default();

        if !mime_type.starts_with("image/") {
            return Err(error::SystemError::bad_request(MSG_NOT_AN_IMAGE));
        }

        save_file(&mut field, &mut uploads, config, filename, mime_type).await?;
    }

    tracing::debug!("Multipart body parsed with {} uploaded file(s)", uploads.len());
    Ok((form, uploads))
}

/// Generate unique filename
fn generate_filename(original_filename: &str) -> String {
    let extension =
        Path::new(original_filename).extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let uuid = Uuid::now_v7();
    if extension.is_empty() {
        uuid.to_string()
    } else {
        format!("{}.{}", uuid, extension)
    }
}

async fn save_file(
    field: &mut Field,
    uploads: &mut TempUploads,
    config: &UploadConfig,
    original_name: String,
    mime_type: String,
) -> Result<(), error::SystemError> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let path = config.upload_dir.join(generate_filename(&original_name));

    // Registered before the first byte so that a failed write is still cleaned up.
    uploads.files.push(UploadedFile { path: path.clone(), original_name, mime_type, size: 0 });
    let mut file = tokio::fs::File::create(&path).await?;

    let mut size = 0usize;
    while let Some(chunk) = field.try_next().await? {
        size += chunk.len();
        if size > config.max_file_size {
            return Err(error::SystemError::bad_request(MSG_FILE_TOO_LARGE));
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    if let Some(entry) = uploads.files.last_mut() {
        entry.size = size;
        tracing::info!("Stored upload {} ({} bytes, {})", entry.original_name, size, entry.mime_type);
    }
    Ok(())
}

async fn read_text(field: &mut Field) -> Result<String, error::SystemError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await? {
        if bytes.len() + chunk.len() > MAX_TEXT_FIELD_SIZE {
            return Err(error::SystemError::bad_request(MSG_INVALID_BODY));
        }
        bytes.extend_from_slice(&chunk);
    }
    String::from_utf8(bytes).map_err(|_| error::SystemError::bad_request(MSG_INVALID_BODY))
}

async fn drain(field: &mut Field) -> Result<(), error::SystemError> {
    while field.try_next().await?.is_some() {}
    Ok(())
}
