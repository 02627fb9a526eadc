//! The tree a parse produces.
//!
//! Every node has the same three parts:
//! - a `name`, empty for array elements and anonymous bodies
//! - a `value`, empty for structs and arrays
//! - ordered `children`
//!
//! So `key value` is `Node { name: "key", value: "value", children: [] }`,
//! `[a b]` is an unnamed node with two unnamed children valued `a` and `b`,
//! and `dog {}` is a node named `dog` with nothing else.

/// A node in an infofile tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    /// The node's name, empty if it has none.
    pub name: String,
    /// The node's value, empty if it has none.
    pub value: String,
    /// Child nodes, in source order.
    pub children: Vec<Node>,
}

impl Node {
    /// A node with a name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A node with a name and a value.
    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Append a child.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Reset to an empty, unnamed node.
    pub fn clear(&mut self) {
        self.name.clear();
        self.value.clear();
        self.children.clear();
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The first child called `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The first child called `name`, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Get a descendant by path.
    ///
    /// Path segments are separated by `.` and look up the first child with
    /// that name. Use `[n]` to pick the n-th child regardless of its name.
    /// The empty path is the node itself.
    pub fn get(&self, path: &str) -> Option<&Node> {
        if path.is_empty() {
            return Some(self);
        }

        let (segment, rest) = split_path(path);
        let child = match index_segment(segment) {
            Some(index) => self.children.get(index?)?,
            None => self.child(segment)?,
        };
        child.get(rest)
    }

    /// Get a descendant by path, mutably.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut Node> {
        if path.is_empty() {
            return Some(self);
        }

        let (segment, rest) = split_path(path);
        let child = match index_segment(segment) {
            Some(index) => self.children.get_mut(index?)?,
            None => self.child_mut(segment)?,
        };
        child.get_mut(rest)
    }
}

/// For a `[n]` segment, `Some` with the parsed index (`None` if it is not a
/// number). `None` for a name segment.
fn index_segment(segment: &str) -> Option<Option<usize>> {
    let inner = segment.strip_prefix('[')?.strip_suffix(']')?;
    Some(inner.parse().ok())
}

fn split_path(path: &str) -> (&str, &str) {
    if path.starts_with('[')
        && let Some(end) = path.find(']')
    {
        let rest = &path[end + 1..];
        return (&path[..=end], rest.strip_prefix('.').unwrap_or(rest));
    }

    match (path.find('.'), path.find('[')) {
        (Some(d), Some(b)) if b < d => (&path[..b], &path[b..]),
        (Some(d), _) => (&path[..d], &path[d + 1..]),
        (None, Some(b)) => (&path[..b], &path[b..]),
        (None, None) => (path, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        let mut server = Node::new("server");
        server.add_child(Node::with_value("host", "localhost"));
        server.add_child(Node::with_value("port", "8080"));

        let mut ports = Node::new("ports");
        ports.add_child(Node::with_value("", "80"));
        ports.add_child(Node::with_value("", "443"));

        let mut root = Node::default();
        root.add_child(server);
        root.add_child(ports);
        root
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("foo"), ("foo", ""));
        assert_eq!(split_path("foo.bar.baz"), ("foo", "bar.baz"));
        assert_eq!(split_path("[0].foo"), ("[0]", "foo"));
        assert_eq!(split_path("foo[1]"), ("foo", "[1]"));
    }

    #[test]
    fn test_get_by_name() {
        let root = sample();
        assert_eq!(root.get("server.port").map(|n| n.value.as_str()), Some("8080"));
        assert!(root.get("server.missing").is_none());
        assert_eq!(root.get(""), Some(&root));
    }

    #[test]
    fn test_get_by_index() {
        let root = sample();
        assert_eq!(root.get("ports[1]").map(|n| n.value.as_str()), Some("443"));
        assert_eq!(root.get("[0].host").map(|n| n.value.as_str()), Some("localhost"));
        assert!(root.get("ports[2]").is_none());
        assert!(root.get("ports[x]").is_none());
    }

    #[test]
    fn test_get_mut() {
        let mut root = sample();
        if let Some(port) = root.get_mut("server.port") {
            port.value = "9090".into();
        }
        assert_eq!(root.get("server.port").map(|n| n.value.as_str()), Some("9090"));
    }

    #[test]
    fn test_first_child_wins() {
        let mut root = Node::default();
        root.add_child(Node::with_value("a", "1"));
        root.add_child(Node::with_value("a", "2"));
        assert_eq!(root.child("a").map(|n| n.value.as_str()), Some("1"));
        assert_eq!(root.child_count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut root = sample();
        root.name = "named".into();
        root.clear();
        assert_eq!(root, Node::default());
        assert!(root.is_leaf());
    }
}
