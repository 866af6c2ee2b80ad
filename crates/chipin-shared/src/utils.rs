//! Utility functions

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        match local.chars().count() {
            0 => format!("***{}", domain),
            1 | 2 => format!("{}***{}", local.chars().next().unwrap_or('*'), domain),
            _ => format!("{}***{}", local.chars().take(2).collect::<String>(), domain),
        }
    } else {
        "***".to_string()
    }
}

/// Strips trailing slashes so paths can be appended with a leading `/`.
pub fn trim_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("bob@example.com"), "bo***@example.com");
        assert_eq!(mask_email("b@example.com"), "b***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_trim_base_url() {
        assert_eq!(trim_base_url("http://localhost:8080/"), "http://localhost:8080");
        assert_eq!(trim_base_url("http://localhost:8080"), "http://localhost:8080");
    }
}
