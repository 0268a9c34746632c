//! Shorthand constructors for common node shapes.

use crate::anchor::Direction;
use crate::node::Node;
use crate::view::ViewHandle;

/// A plain node that grows with `weight`.
pub fn flex(weight: f32) -> Node {
    Node::new().flex(weight)
}

/// Children laid out left to right.
pub fn row(children: impl IntoIterator<Item = Node>) -> Node {
    Node::directional(Direction::Row, children)
}

/// Children laid out top to bottom.
pub fn column(children: impl IntoIterator<Item = Node>) -> Node {
    Node::directional(Direction::Column, children)
}

/// A square fixed-size gap.
pub fn spacer(size: f32) -> Node {
    Node::new().width(size).height(size).labelled("Spacer")
}

/// Center `view` (and/or `child`) inside all available space.
///
/// ```text
/// column [ flex(1)
///          row [ flex(1), content, flex(1) ]
///          flex(1) ]
/// ```
pub fn center(view: Option<ViewHandle>, child: Option<Node>) -> Node {
    let mut content = Node::new();
    if let Some(view) = view {
        content = content.view(view);
    }
    if let Some(child) = child {
        content = content.child(child);
    }
    let body = column([flex(1.0), row([flex(1.0), content, flex(1.0)]), flex(1.0)]);
    flex(1.0).child(body).labelled("Center")
}
