//! Inline-style resolution
//!
//! The headless environment has no cascade; the computed style of an
//! element is derived from its inline `style` attribute plus the `hidden`
//! attribute. This covers the three properties visibility decisions need.

/// The subset of computed style the core inspects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    /// `display: none`, or the `hidden` attribute
    pub display_none: bool,

    /// `visibility: hidden` or `visibility: collapse`
    pub visibility_hidden: bool,

    /// Effective opacity, 1.0 when unspecified
    pub opacity: f32,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display_none: false,
            visibility_hidden: false,
            opacity: 1.0,
        }
    }
}

impl ComputedStyle {
    /// Whether this element's own style keeps it observable
    #[must_use]
    pub fn visible_self(&self) -> bool {
        !self.display_none && !self.visibility_hidden && self.opacity > 0.0
    }
}

/// Resolve the computed style from an inline `style` attribute
#[must_use]
pub(crate) fn compute(style_attr: Option<&str>, hidden_attr: bool) -> ComputedStyle {
    let mut style = ComputedStyle {
        display_none: hidden_attr,
        ..ComputedStyle::default()
    };

    let Some(inline) = style_attr else {
        return style;
    };

    for declaration in inline.split(';') {
        let Some((prop, value)) = declaration.split_once(':') else {
            continue;
        };
        let prop = prop.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();

        match prop.as_str() {
            "display" => {
                if value == "none" {
                    style.display_none = true;
                }
            }
            "visibility" => {
                if value == "hidden" || value == "collapse" {
                    style.visibility_hidden = true;
                }
            }
            "opacity" => {
                if let Ok(v) = value.parse::<f32>() {
                    style.opacity = v.clamp(0.0, 1.0);
                }
            }
            _ => {}
        }
    }

    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_visible() {
        let style = compute(None, false);
        assert!(style.visible_self());
        assert!((style.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn display_none_detected() {
        let style = compute(Some("color: red; display: none"), false);
        assert!(style.display_none);
        assert!(!style.visible_self());
    }

    #[test]
    fn hidden_attribute_maps_to_display_none() {
        let style = compute(None, true);
        assert!(style.display_none);
    }

    #[test]
    fn visibility_hidden_detected() {
        let style = compute(Some("visibility:hidden"), false);
        assert!(style.visibility_hidden);
    }

    #[test]
    fn zero_opacity_is_not_visible() {
        let style = compute(Some("opacity: 0"), false);
        assert!(!style.visible_self());
    }

    #[test]
    fn malformed_declarations_ignored() {
        let style = compute(Some("display; ; opacity: potato; visibility"), false);
        assert!(style.visible_self());
    }
}
