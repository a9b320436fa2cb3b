/// One entry of the menu tree.
///
/// Children are borrowed slices, so a whole tree can be a `static` and be
/// shared by any number of screens without copying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuNode<'a, P> {
    /// Navigable entry; choosing it shows `children`.
    Group {
        title: &'a str,
        children: &'a [MenuNode<'a, P>],
    },
    /// Leaf entry; choosing it hands `payload` to the selection handler.
    Action { title: &'a str, payload: P },
    /// Label that does nothing when chosen.
    Noop { title: &'a str },
}

impl<'a, P> MenuNode<'a, P> {
    pub const fn group(title: &'a str, children: &'a [MenuNode<'a, P>]) -> Self {
        MenuNode::Group { title, children }
    }

    pub const fn action(title: &'a str, payload: P) -> Self {
        MenuNode::Action { title, payload }
    }

    pub const fn noop(title: &'a str) -> Self {
        MenuNode::Noop { title }
    }

    pub fn title(&self) -> &'a str {
        match self {
            MenuNode::Group { title, .. }
            | MenuNode::Action { title, .. }
            | MenuNode::Noop { title } => *title,
        }
    }

    /// Children of a group; empty for leaves.
    pub fn children(&self) -> &'a [MenuNode<'a, P>] {
        match self {
            MenuNode::Group { children, .. } => *children,
            MenuNode::Action { .. } | MenuNode::Noop { .. } => &[],
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, MenuNode::Group { .. })
    }
}
