//! Visitor framework
//!
//!     A [`NodeVisitor`] maps node variants to handler closures and dispatches on the
//!     runtime variant of each node it is given. Handlers receive the visitor itself, so
//!     recursion into children is explicit: a handler decides whether, when and in what
//!     order to visit what it holds.
//!
//!     Nodes without a handler go to the fallback, which by default returns
//!     `R::default()`. An optional after-visit hook runs after every dispatch, handled or
//!     not, and may replace the result.
//!
//!     Two flavors are in use:
//!
//!     - value-producing, `NodeVisitor<S, R>`, such as the printer in [print] and the
//!       snapshot builder;
//!     - side-effecting, [`ActionVisitor<S>`], which returns `()` and threads its effects
//!       through the state `S`.
//!
//!     `Tagged` nodes can be routed by tag with [`NodeVisitor::on_tag`]; a tag without a
//!     handler falls back to the `Tagged` variant handler, then to the fallback.

pub mod print;

use crate::pratt::ast::{AstNode, BlockNode, NodeKind, NodeVariant, VariantPayload};
use std::collections::HashMap;

type Handler<S, R> = Box<dyn Fn(&NodeVisitor<S, R>, &mut S, &AstNode) -> R>;
type AfterVisit<S, R> = Box<dyn Fn(&AstNode, &mut S, R) -> R>;

pub struct NodeVisitor<S, R> {
    handlers: HashMap<NodeVariant, Handler<S, R>>,
    tag_handlers: HashMap<String, Handler<S, R>>,
    fallback: Handler<S, R>,
    after_visit: Option<AfterVisit<S, R>>,
}

/// A visitor run for its effects on `S`.
pub type ActionVisitor<S> = NodeVisitor<S, ()>;

impl<S: 'static, R: Default + 'static> NodeVisitor<S, R> {
    pub fn new() -> Self {
        Self::with_fallback(|_, _, _| R::default())
    }
}

impl<S: 'static, R: Default + 'static> Default for NodeVisitor<S, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: 'static, R: 'static> NodeVisitor<S, R> {
    /// A visitor whose unhandled nodes go to `fallback`.
    pub fn with_fallback(fallback: impl Fn(&Self, &mut S, &AstNode) -> R + 'static) -> Self {
        Self {
            handlers: HashMap::new(),
            tag_handlers: HashMap::new(),
            fallback: Box::new(fallback),
            after_visit: None,
        }
    }

    /// Register a handler for the variant whose payload is `N`.
    ///
    /// Replaces any handler previously registered for that variant.
    pub fn on<N: VariantPayload>(
        &mut self,
        handler: impl Fn(&Self, &mut S, &N) -> R + 'static,
    ) -> &mut Self {
        self.handlers.insert(
            N::VARIANT,
            Box::new(move |visitor: &Self, state: &mut S, node: &AstNode| match N::project(
                node.kind(),
            ) {
                Some(payload) => handler(visitor, state, payload),
                None => (visitor.fallback)(visitor, state, node),
            }),
        );
        self
    }

    /// Register a handler that receives the whole node, range included.
    pub fn on_node(
        &mut self,
        variant: NodeVariant,
        handler: impl Fn(&Self, &mut S, &AstNode) -> R + 'static,
    ) -> &mut Self {
        self.handlers.insert(variant, Box::new(handler));
        self
    }

    /// Register a handler for `Tagged` nodes carrying `tag`.
    pub fn on_tag(
        &mut self,
        tag: impl Into<String>,
        handler: impl Fn(&Self, &mut S, &AstNode) -> R + 'static,
    ) -> &mut Self {
        self.tag_handlers.insert(tag.into(), Box::new(handler));
        self
    }

    pub fn set_fallback(
        &mut self,
        fallback: impl Fn(&Self, &mut S, &AstNode) -> R + 'static,
    ) -> &mut Self {
        self.fallback = Box::new(fallback);
        self
    }

    /// Install a hook that runs after every dispatch and may transform the result.
    pub fn after_visit(&mut self, hook: impl Fn(&AstNode, &mut S, R) -> R + 'static) -> &mut Self {
        self.after_visit = Some(Box::new(hook));
        self
    }

    pub fn has_handler(&self, variant: NodeVariant) -> bool {
        self.handlers.contains_key(&variant)
    }

    /// Dispatch `node` to its handler, or to the fallback.
    pub fn visit(&self, state: &mut S, node: &AstNode) -> R {
        let handler = match node.kind() {
            NodeKind::Tagged(tagged) => self
                .tag_handlers
                .get(&tagged.tag)
                .or_else(|| self.handlers.get(&NodeVariant::Tagged)),
            kind => self.handlers.get(&kind.variant()),
        };
        let result = match handler {
            Some(handler) => handler(self, state, node),
            None => (self.fallback)(self, state, node),
        };
        match &self.after_visit {
            Some(hook) => hook(node, state, result),
            None => result,
        }
    }

    /// Visit the direct children of `node` in stored order.
    pub fn visit_children(&self, state: &mut S, node: &AstNode) -> Vec<R> {
        node.children()
            .into_iter()
            .map(|child| self.visit(state, child))
            .collect()
    }
}

impl<S: 'static> NodeVisitor<S, ()> {
    /// An action visitor that visits the statements of a `Block` in order.
    pub fn actions() -> Self {
        let mut visitor = Self::new();
        visitor.on::<BlockNode>(|visitor, state, block| {
            for child in &block.children {
                visitor.visit(state, child);
            }
        });
        visitor
    }

    /// An action visitor whose fallback descends into every child, so handlers only
    /// need to be registered for the variants of interest.
    pub fn walking() -> Self {
        Self::with_fallback(|visitor, state, node| {
            visitor.visit_children(state, node);
        })
    }
}
