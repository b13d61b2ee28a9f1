//! Stroke color tokens to peniko colors.

use peniko::Color;
use peniko::color::{Srgb, parse_color as parse_css_color};
use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// Tokens already reported by [`color_or_black`].
static REPORTED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();

/// Parse a CSS color token: hex, `rgb()`/`hsl()` and the other CSS color
/// functions, or any named color including `transparent`.
pub fn parse_color(s: &str) -> Option<Color> {
    parse_css_color(&s.trim().to_ascii_lowercase())
        .ok()
        .map(|color| color.to_alpha_color::<Srgb>())
}

/// Like [`parse_color`], but unknown tokens draw in black.
///
/// Each distinct unknown token is logged once per process.
pub fn color_or_black(s: &str) -> Color {
    parse_color(s).unwrap_or_else(|| {
        if first_report(s) {
            log::warn!("Unrecognized color {s:?}, drawing in black");
        }
        Color::BLACK
    })
}

fn first_report(token: &str) -> bool {
    let reported = REPORTED.get_or_init(|| Mutex::new(HashSet::new()));
    match reported.lock() {
        Ok(mut seen) => seen.insert(token.to_string()),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(s: &str) -> Option<[u8; 4]> {
        parse_color(s).map(|c| {
            let c = c.to_rgba8();
            [c.r, c.g, c.b, c.a]
        })
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(rgba("#ff0000"), Some([255, 0, 0, 255]));
        assert_eq!(rgba("#00f"), Some([0, 0, 255, 255]));
        assert_eq!(rgba(" #11223380 "), Some([0x11, 0x22, 0x33, 0x80]));
        assert_eq!(rgba("#FFFF00"), Some([255, 255, 0, 255]));
    }

    #[test]
    fn test_named() {
        assert_eq!(rgba("Blue"), Some([0, 0, 255, 255]));
        assert_eq!(rgba("grey"), rgba("gray"));
        assert_eq!(rgba("rebeccapurple"), Some([102, 51, 153, 255]));
        assert_eq!(rgba("transparent").map(|c| c[3]), Some(0));
    }

    #[test]
    fn test_color_functions() {
        assert_eq!(rgba("rgb(255, 0, 0)"), Some([255, 0, 0, 255]));
        assert_eq!(rgba("rgba(0, 0, 255, 0.5)").map(|c| c[2]), Some(255));
        assert_eq!(rgba("hsl(120, 100%, 50%)"), Some([0, 255, 0, 255]));
        assert_ne!(color_or_black("rgb(255, 0, 0)"), Color::BLACK);
    }

    #[test]
    fn test_invalid() {
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#gg0000"), None);
        assert_eq!(parse_color("#ééé"), None);
        assert_eq!(parse_color("not-a-color"), None);
        assert_eq!(color_or_black("nope"), Color::BLACK);
    }

    #[test]
    fn test_unknown_token_reported_once() {
        assert!(first_report("chartreux"));
        assert!(!first_report("chartreux"));
        assert!(first_report("chartreuse-ish"));
        assert_eq!(color_or_black("chartreux"), Color::BLACK);
    }
}
