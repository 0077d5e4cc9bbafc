use super::content_model::ContentNode;
use crate::fx::FxError;

/// Rewrites every text leaf under `node` with `replace`.
///
/// Pre-order, depth-first, left to right. Elements whose kind satisfies
/// `is_excluded` are skipped together with their whole subtree. The walk
/// stops at the first replacement error; leaves visited before it keep
/// their new text.
pub fn walk_text_nodes<E, F>(node: &mut ContentNode, is_excluded: &E, replace: &mut F) -> Result<(), FxError>
where
    E: Fn(&str) -> bool,
    F: FnMut(&str) -> Result<String, FxError>,
{
    match node {
        ContentNode::Text(text) => {
            let replaced = replace(&text.data)?;
            if replaced != text.data {
                text.data = replaced;
            }
        }
        ContentNode::Element(element) => {
            if is_excluded(&element.kind) {
                log::trace!("Skipping excluded <{}> subtree", element.kind);
                return Ok(());
            }
            for child in element.children.iter_mut() {
                walk_text_nodes(child, is_excluded, replace)?;
            }
        }
        ContentNode::Other(_) => {}
    }
    Ok(())
}
