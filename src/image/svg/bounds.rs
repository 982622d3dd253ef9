//! SVG bounding box calculation.
//!
//! Computes the visual extents of an icon body including stroke width, used
//! when neither the collection nor the file gives explicit dimensions.

use usvg::{Node, Rect, Tree};

/// Calculate the stroke-inclusive bounding box of an icon body.
///
/// The body is wrapped in a bare `<svg>` root so no viewBox clips or scales
/// the geometry. Returns `None` when the body does not parse or draws nothing.
pub fn body_bounds(body: &str) -> Option<Rect> {
    let source = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">{body}</svg>"#
    );
    let tree = Tree::from_str(&source, &usvg::Options::default()).ok()?;

    let mut bounds: Option<Rect> = None;
    traverse_group(tree.root(), &mut bounds);
    bounds
}

/// Recursively traverse a group and its children, accumulating bounds
fn traverse_group(group: &usvg::Group, bounds: &mut Option<Rect>) {
    for node in group.children() {
        match node {
            Node::Group(nested) => traverse_group(nested, bounds),
            _ => *bounds = merge_bounds(*bounds, node.abs_stroke_bounding_box()),
        }
    }
}

/// Merge two bounding boxes into their union
fn merge_bounds(a: Option<Rect>, b: Rect) -> Option<Rect> {
    match a {
        Some(existing) => {
            let min_x = existing.x().min(b.x());
            let min_y = existing.y().min(b.y());
            let max_x = existing.right().max(b.right());
            let max_y = existing.bottom().max(b.bottom());

            Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
        }
        None => Some(b),
    }
}
