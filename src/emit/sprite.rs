//! Sprite sheet and standalone SVG rendering.

use crate::icon::NormalizedIcon;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// `xmlns:xlink` declaration when any body uses `xlink:` attributes.
fn xlink_decl<'a>(mut bodies: impl Iterator<Item = &'a str>) -> &'static str {
    if bodies.any(|body| body.contains("xlink:")) {
        r#" xmlns:xlink="http://www.w3.org/1999/xlink""#
    } else {
        ""
    }
}

/// Render the sprite sheet: one hidden `<svg>` with a `<symbol>` per icon.
///
/// Icons must already be ordered by id.
pub fn render_sprite(icons: &[NormalizedIcon]) -> String {
    let xlink = xlink_decl(icons.iter().map(|icon| icon.body.as_str()));
    let mut out = format!(r#"<svg xmlns="{SVG_NS}"{xlink} style="display:none">"#);
    out.push('\n');
    for icon in icons {
        out.push_str(&format!(
            r#"<symbol id="{}" viewBox="{}">{}</symbol>"#,
            icon.id, icon.view_box, icon.body
        ));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

/// Render one icon as a standalone SVG file, sized to the surrounding text.
pub fn render_standalone(icon: &NormalizedIcon) -> String {
    let xlink = xlink_decl(std::iter::once(icon.body.as_str()));
    format!(
        r#"<svg xmlns="{SVG_NS}"{xlink} viewBox="{}" width="1em" height="1em">{}</svg>"#,
        icon.view_box, icon.body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::BoundingBox;

    fn icon(id: &str, body: &str) -> NormalizedIcon {
        NormalizedIcon {
            id: id.to_string(),
            view_box: BoundingBox::FALLBACK,
            body: body.to_string(),
            is_default: false,
        }
    }

    #[test]
    fn test_sprite() {
        let sprite = render_sprite(&[icon("i-mdi-home", "<path/>"), icon("l-logo", "<g/>")]);
        assert_eq!(
            sprite,
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" style="display:none">"#,
                "\n",
                r#"<symbol id="i-mdi-home" viewBox="0 0 24 24"><path/></symbol>"#,
                "\n",
                r#"<symbol id="l-logo" viewBox="0 0 24 24"><g/></symbol>"#,
                "\n</svg>\n"
            )
        );
    }

    #[test]
    fn test_empty_sprite_is_well_formed() {
        assert_eq!(
            render_sprite(&[]),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" style=\"display:none\">\n</svg>\n"
        );
    }

    #[test]
    fn test_standalone() {
        assert_eq!(
            render_standalone(&icon("l-logo", "<path/>")),
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="1em" height="1em"><path/></svg>"#
        );
    }

    #[test]
    fn test_xlink_declared_when_used() {
        let body = r##"<use xlink:href="#a"/>"##;
        assert!(render_standalone(&icon("x", body)).contains(XLINK_NS));
        assert!(render_sprite(&[icon("x", body)]).contains(XLINK_NS));
        assert!(!render_sprite(&[icon("x", "<path/>")]).contains(XLINK_NS));
    }
}
