use uuid::Uuid;

/// Used when the uploaded part carries no filename.
const FALLBACK_NAME: &str = "foto";

/// Strip the characters that must never reach the upload directory name:
/// spaces, colons and backslashes.
pub fn sanitize_filename(original: &str) -> String {
    original
        .chars()
        .filter(|c| !matches!(c, ' ' | ':' | '\\'))
        .collect()
}

/// Build the stored photo name: a random UUID, a dash, then the sanitized
/// original filename. The prefix keeps concurrent uploads from colliding.
pub fn upload_filename(original: Option<&str>) -> String {
    let original = original.unwrap_or(FALLBACK_NAME);
    format!("{}-{}", Uuid::new_v4(), sanitize_filename(original))
}
