use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    In,  // <
    Out, // >
}

impl fmt::Display for RedirectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectKind::In => write!(f, "<"),
            RedirectKind::Out => write!(f, ">"),
        }
    }
}

/// Command tree for one input line. Every node owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A program invocation. An empty `argv` does nothing.
    Simple { argv: Vec<String> },
    /// Rebinds stdin or stdout to `target`, then runs `inner` in the same process.
    Redirect {
        kind: RedirectKind,
        target: String,
        inner: Box<Node>,
    },
    /// `left`'s stdout feeds `right`'s stdin.
    Pipeline { left: Box<Node>, right: Box<Node> },
}

impl Node {
    pub fn simple<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Simple {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    pub fn redirect(kind: RedirectKind, target: impl Into<String>, inner: Node) -> Self {
        Node::Redirect {
            kind,
            target: target.into(),
            inner: Box::new(inner),
        }
    }

    pub fn pipeline(left: Node, right: Node) -> Self {
        Node::Pipeline {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Argument lists of every simple command, left to right.
    pub fn argv_lists(&self) -> Vec<&[String]> {
        let mut lists = Vec::new();
        self.collect_argv(&mut lists);
        lists
    }

    fn collect_argv<'a>(&'a self, lists: &mut Vec<&'a [String]>) {
        match self {
            Node::Simple { argv } => lists.push(argv),
            Node::Redirect { inner, .. } => inner.collect_argv(lists),
            Node::Pipeline { left, right } => {
                left.collect_argv(lists);
                right.collect_argv(lists);
            }
        }
    }
}

// Redirections print after the words they wrap, outermost first, so a tree
// produced by the parser prints back into a line that parses to the same tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Simple { argv } => write!(f, "{}", argv.join(" ")),
            Node::Redirect { .. } => {
                let mut redirections = Vec::new();
                let mut node = self;
                while let Node::Redirect {
                    kind,
                    target,
                    inner,
                } = node
                {
                    redirections.push((kind, target));
                    node = inner.as_ref();
                }
                write!(f, "{}", node)?;
                for (kind, target) in redirections {
                    write!(f, " {} {}", kind, target)?;
                }
                Ok(())
            }
            Node::Pipeline { left, right } => write!(f, "{} | {}", left, right),
        }
    }
}
