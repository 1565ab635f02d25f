//! Scene attachment.

/// The active scene. Nodes are drawn in attachment order.
pub trait Scene {
    /// Add the node identified by `node` on top of the scene.
    fn attach(&mut self, node: &str);

    /// Remove the node identified by `node`. Unknown nodes are ignored.
    fn detach(&mut self, node: &str);
}
