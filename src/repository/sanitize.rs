// Filename sanitation for client-supplied names.

/// Reduces a client-supplied filename to a safe flat name.
///
/// Only the last path component is kept (both separator styles), runs of
/// characters outside `[A-Za-z0-9._-]` collapse to a single `_`, and
/// leading/trailing dots and underscores are trimmed. The result can
/// therefore never escape the store root or hide as a dotfile. Returns
/// `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or("");

    let mut cleaned = String::with_capacity(base.len());
    let mut last_was_replaced = false;
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
            cleaned.push(c);
            last_was_replaced = false;
        } else if !last_was_replaced {
            cleaned.push('_');
            last_was_replaced = true;
        }
    }

    let trimmed = cleaned.trim_matches(['.', '_']);
    if trimmed.is_empty() || trimmed.chars().all(|c| matches!(c, '.' | '_' | '-')) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_plain_names() {
        assert_eq!(sanitize_filename("cat.png"), Some("cat.png".to_string()));
        assert_eq!(
            sanitize_filename("IMG_2024-01-01.jpeg"),
            Some("IMG_2024-01-01.jpeg".to_string())
        );
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(
            sanitize_filename("../../etc/passwd.png"),
            Some("passwd.png".to_string())
        );
        assert_eq!(
            sanitize_filename("C:\\Users\\me\\cat.png"),
            Some("cat.png".to_string())
        );
        assert_eq!(
            sanitize_filename("/absolute/path/dog.gif"),
            Some("dog.gif".to_string())
        );
    }

    #[test]
    fn collapses_unsafe_runs() {
        assert_eq!(
            sanitize_filename("my  holiday photo.png"),
            Some("my_holiday_photo.png".to_string())
        );
        assert_eq!(
            sanitize_filename("füße?.jpg"),
            Some("f_e_.jpg".to_string())
        );
    }

    #[test]
    fn rejects_degenerate_names() {
        assert_eq!(sanitize_filename(""), None);
        assert_eq!(sanitize_filename("   "), None);
        assert_eq!(sanitize_filename(".."), None);
        assert_eq!(sanitize_filename("...."), None);
        assert_eq!(sanitize_filename("___"), None);
        assert_eq!(sanitize_filename("dir/"), None);
    }

    #[test]
    fn trims_edge_dots_and_underscores() {
        assert_eq!(
            sanitize_filename(".hidden.png"),
            Some("hidden.png".to_string())
        );
        assert_eq!(sanitize_filename("_cat.png_"), Some("cat.png".to_string()));
    }
}
