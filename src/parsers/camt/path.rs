use roxmltree::Node;

use super::types::normalize_whitespace;

/// Slash-separated child-element lookups relative to a node, matched on local names
/// so that namespace prefixes do not matter.
pub(super) trait NodePath<'a, 'input: 'a> {
    /// First element reached by following `path`.
    fn find(&self, path: &str) -> Option<Node<'a, 'input>>;

    /// Every element reached by following `path`, in document order.
    fn filter(&self, path: &str) -> Vec<Node<'a, 'input>>;

    /// Whitespace-normalized text of the element at `path`; `None` if it is absent.
    fn text_at(&self, path: &str) -> Option<String> {
        self.find(path)
            .map(|node| normalize_whitespace(node.text().unwrap_or_default()))
    }

    /// Like [`NodePath::text_at`], trying each path in turn.
    fn text_at_any(&self, paths: &[&str]) -> Option<String> {
        paths.iter().find_map(|path| self.text_at(path))
    }
}

impl<'a, 'input: 'a> NodePath<'a, 'input> for Node<'a, 'input> {
    fn find(&self, path: &str) -> Option<Node<'a, 'input>> {
        path.split('/')
            .try_fold(*self, |node, name| child_elements(node, name).next())
    }

    fn filter(&self, path: &str) -> Vec<Node<'a, 'input>> {
        path.split('/').fold(vec![*self], |nodes, name| {
            nodes
                .into_iter()
                .flat_map(|node| child_elements(node, name))
                .collect()
        })
    }
}

fn child_elements<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}
