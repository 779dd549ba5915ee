use termtree::Tree;
use tracing::instrument;

use crate::domain::forest::{Forest, NodeRef};

/// Conversion of a forest into a printable `termtree`.
pub trait TreeDisplay<R> {
    /// Build a tree under a synthetic `root` label, one branch per root node.
    fn to_tree<F>(&self, root: &str, label: F) -> Tree<String>
    where
        F: Fn(NodeRef<'_, R>) -> String;
}

impl<R> TreeDisplay<R> for Forest<R> {
    #[instrument(level = "debug", skip(self, label))]
    fn to_tree<F>(&self, root: &str, label: F) -> Tree<String>
    where
        F: Fn(NodeRef<'_, R>) -> String,
    {
        fn build_tree<R, F>(node: NodeRef<'_, R>, label: &F) -> Tree<String>
        where
            F: Fn(NodeRef<'_, R>) -> String,
        {
            let leaves: Vec<_> = node.children().map(|c| build_tree(c, label)).collect();
            Tree::new(label(node)).with_leaves(leaves)
        }

        let leaves: Vec<_> = self.roots().map(|r| build_tree(r, &label)).collect();
        Tree::new(root.to_string()).with_leaves(leaves)
    }
}
