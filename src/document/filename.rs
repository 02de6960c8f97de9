//! Output file naming

/// Longest customer or PO token kept in a file name
pub const MAX_TOKEN_LEN: usize = 60;

/// Reduce free text to a file-name-safe token: spaces become underscores,
/// anything outside `[A-Za-z0-9_-]` is dropped, and the result is truncated
pub fn sanitize_token(s: &str) -> String {
    s.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_TOKEN_LEN)
        .collect()
}

/// `Customer-PO-YYYY-MM-DD.pdf`, or `Quote-YYYY-MM-DD.pdf` when both tokens are empty
pub fn build_file_name(customer: &str, po: &str, date: &str) -> String {
    let customer = sanitize_token(customer);
    let po = sanitize_token(po);
    if customer.is_empty() && po.is_empty() {
        return format!("Quote-{}.pdf", date);
    }
    let customer = if customer.is_empty() { "Customer".to_string() } else { customer };
    let po = if po.is_empty() { "PO".to_string() } else { po };
    format!("{}-{}-{}.pdf", customer, po, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_file_name() {
        assert_eq!(
            build_file_name("ACME Roofing", "PO123", "2025-08-19"),
            "ACME_Roofing-PO123-2025-08-19.pdf"
        );
    }

    #[test]
    fn test_fallback_file_name() {
        assert_eq!(build_file_name("", "", "2025-08-19"), "Quote-2025-08-19.pdf");
        assert_eq!(build_file_name("  ", "#!", "2025-08-19"), "Quote-2025-08-19.pdf");
    }

    #[test]
    fn test_single_token_gets_placeholder() {
        assert_eq!(build_file_name("Jones", "", "2025-01-02"), "Jones-PO-2025-01-02.pdf");
        assert_eq!(build_file_name("", "77", "2025-01-02"), "Customer-77-2025-01-02.pdf");
    }

    #[test]
    fn test_sanitize_token() {
        assert_eq!(sanitize_token("O'Brien & Sons, LLC"), "OBrien__Sons_LLC");
        assert_eq!(sanitize_token("Zoë"), "Zo");
        assert_eq!(sanitize_token(&"x".repeat(100)).len(), MAX_TOKEN_LEN);
    }
}
