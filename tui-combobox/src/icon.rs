//! Icon name to glyph lookup

/// Glyph for a named icon
pub fn glyph(name: &str) -> Option<&'static str> {
    match name {
        "triangleDown" => Some("▼"),
        "triangleUp" => Some("▲"),
        _ => None,
    }
}

/// Glyph for the trigger, with a plain-text fallback
pub(crate) fn trigger_glyph(is_open: bool) -> &'static str {
    let (name, fallback) = if is_open {
        ("triangleUp", "^")
    } else {
        ("triangleDown", "v")
    };
    glyph(name).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(glyph("triangleDown"), Some("▼"));
        assert_eq!(glyph("triangleUp"), Some("▲"));
        assert_eq!(glyph("sparkle"), None);
    }

    #[test]
    fn test_trigger_follows_open_state() {
        assert_eq!(trigger_glyph(false), "▼");
        assert_eq!(trigger_glyph(true), "▲");
    }
}
