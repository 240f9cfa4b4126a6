//! # Text Components
//!
//! This module defines the tree-shaped intermediate representation for the
//! text pipeline: the [`Component`] capability, the [`RenderContext`] that
//! carries the ambient separator, the [`Fragment`] leaf, and the composite
//! shapes that combine children without rendering them eagerly.
//!
//! ## Key Components
//!
//! - **`Component`**: Any value that can answer "what is my rendered value?".
//!   The answer is `Option<String>`; `None` is the *absent* result, distinct
//!   from an empty string. Absent subtrees are skipped during joining rather
//!   than contributing empty segments.
//! - **`RenderContext`**: The per-traversal context holding the ambient
//!   separator as a scoped stack. The separator is pushed and popped around a
//!   subtree by join-family modifiers, never stored on a node itself.
//! - **`Fragment`**: A leaf holding a literal string, or an explicitly-absent
//!   placeholder.
//! - **`Sequence`**: An ordered tuple of children built by appending one
//!   child at a time. Children render in declaration order and non-absent
//!   results are joined with the ambient separator.
//! - **`Choice`**: A two-armed tagged union produced by conditional branches;
//!   rendering forwards unconditionally to the active arm.
//! - **`ListOf`**: A homogeneous ordered collection produced by iteration;
//!   joins like `Sequence`.
//! - **`Erased`**: A boxed type-erasure wrapper used when two branches of a
//!   conditional have different static shapes. Purely a type boundary; it
//!   forwards all operations to the wrapped value.
//!
//! Combinators are pure data construction and have no failure modes.
//! Rendering is referentially transparent: rendering the same tree twice
//! yields the same result.

/// Default separator used when none has been pushed onto the context.
const DEFAULT_SEPARATOR: &str = "\n";

/// Ambient, scoped rendering state threaded through a traversal.
///
/// The only contextual input to rendering is the active separator. It is
/// maintained as a stack: join-family modifiers push a separator before
/// rendering their subtree and pop it afterwards, so nested joins use
/// different separators without interfering with each other or with outer
/// context.
#[derive(Debug, Clone)]
pub struct RenderContext {
    separators: Vec<String>,
}

impl RenderContext {
    /// Create a context with the default `"\n"` separator.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create a context with an explicit initial separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separators: vec![separator.into()],
        }
    }

    /// The currently active separator.
    pub fn separator(&self) -> &str {
        self.separators
            .last()
            .map(String::as_str)
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Push a separator scoped to the subtree about to be rendered.
    pub(crate) fn push_separator(&mut self, separator: impl Into<String>) {
        self.separators.push(separator.into());
    }

    /// Pop the innermost separator, restoring the enclosing scope.
    pub(crate) fn pop_separator(&mut self) {
        self.separators.pop();
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A composable piece of text.
///
/// Implementors answer with their rendered value: `Some(text)` for content,
/// `None` for the absent result. Absent is distinct from `Some("")`: absent
/// subtrees contribute nothing to a parent's join, not even a separator.
pub trait Component {
    /// Render this component under the given ambient context.
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String>;
}

/// Render an ordered run of children, joining non-absent results with the
/// ambient separator.
///
/// The separator is inserted between already-accumulated content and each new
/// piece, never before the first piece and never after the last. If every child
/// is absent the whole run is absent.
pub(crate) fn join_children<'a, I>(children: I, ctx: &mut RenderContext) -> Option<String>
where
    I: IntoIterator<Item = &'a dyn Component>,
{
    let mut accumulated: Option<String> = None;
    for child in children {
        if let Some(piece) = child.render_with(ctx) {
            match accumulated.as_mut() {
                Some(buffer) => {
                    buffer.push_str(ctx.separator());
                    buffer.push_str(&piece);
                }
                None => accumulated = Some(piece),
            }
        }
    }
    accumulated
}

/// A terminal node holding a literal string, or an explicitly-absent leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(Option<String>);

impl Fragment {
    /// Create a fragment holding a literal.
    pub fn new(text: impl Into<String>) -> Self {
        Self(Some(text.into()))
    }

    /// Create an explicitly-absent fragment.
    ///
    /// Absent fragments are skipped entirely during joining.
    pub fn absent() -> Self {
        Self(None)
    }

    /// Whether this fragment is absent.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl Component for Fragment {
    fn render_with(&self, _ctx: &mut RenderContext) -> Option<String> {
        self.0.clone()
    }
}

/// An ordered, append-built run of heterogeneous children.
///
/// Arity grows one child at a time; children are never re-ordered, and the
/// first-appended child renders first.
#[derive(Default)]
pub struct Sequence {
    children: Vec<Box<dyn Component>>,
}

impl Sequence {
    /// Create an empty sequence (the unit case).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one more child, returning the extended sequence.
    pub fn append(mut self, child: impl Component + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// The number of children appended so far.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether no children have been appended.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Component for Sequence {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        join_children(self.children.iter().map(AsRef::as_ref), ctx)
    }
}

/// Identifies the active arm of a [`Choice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    First,
    Second,
}

/// A two-armed tagged union produced by conditional branches.
///
/// Rendering forwards unconditionally to the active arm; the choice itself
/// injects no separator.
pub enum Choice {
    First(Box<dyn Component>),
    Second(Box<dyn Component>),
}

impl Choice {
    /// Wrap a value as the first arm.
    pub fn first(value: impl Component + 'static) -> Self {
        Self::First(Box::new(value))
    }

    /// Wrap a value as the second arm.
    pub fn second(value: impl Component + 'static) -> Self {
        Self::Second(Box::new(value))
    }

    /// Wrap a value tagged with an explicit branch.
    pub fn select(branch: Branch, value: impl Component + 'static) -> Self {
        match branch {
            Branch::First => Self::first(value),
            Branch::Second => Self::second(value),
        }
    }

    /// The branch this choice is tagged with.
    pub fn branch(&self) -> Branch {
        match self {
            Self::First(_) => Branch::First,
            Self::Second(_) => Branch::Second,
        }
    }
}

impl Component for Choice {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        match self {
            Self::First(arm) | Self::Second(arm) => arm.render_with(ctx),
        }
    }
}

/// A homogeneous ordered collection of children produced by iteration.
///
/// Rendering maps each element, drops absent results, and joins the rest in
/// original order with the ambient separator.
#[derive(Default)]
pub struct ListOf {
    elements: Vec<Box<dyn Component>>,
}

impl ListOf {
    /// Create a list from pre-boxed elements.
    pub fn new(elements: Vec<Box<dyn Component>>) -> Self {
        Self { elements }
    }

    /// Create a list by boxing each element of an iterator.
    pub fn of<C, I>(elements: I) -> Self
    where
        C: Component + 'static,
        I: IntoIterator<Item = C>,
    {
        Self {
            elements: elements
                .into_iter()
                .map(|element| Box::new(element) as Box<dyn Component>)
                .collect(),
        }
    }

    /// The number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Component for ListOf {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        join_children(self.elements.iter().map(AsRef::as_ref), ctx)
    }
}

impl FromIterator<Box<dyn Component>> for ListOf {
    fn from_iter<I: IntoIterator<Item = Box<dyn Component>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A type-erased wrapper around any concrete component.
///
/// Used exactly at the points where static type inference cannot unify two
/// branch shapes. There is no behavioral difference from the wrapped value.
pub struct Erased(Box<dyn Component>);

impl Erased {
    /// Erase a concrete component behind the common capability.
    pub fn new(component: impl Component + 'static) -> Self {
        Self(Box::new(component))
    }
}

impl Component for Erased {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.0.render_with(ctx)
    }
}

impl Component for &str {
    fn render_with(&self, _ctx: &mut RenderContext) -> Option<String> {
        Some((*self).to_string())
    }
}

impl Component for String {
    fn render_with(&self, _ctx: &mut RenderContext) -> Option<String> {
        Some(self.clone())
    }
}

/// `None` renders as absent, so optional content composes directly.
impl<C: Component> Component for Option<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.as_ref().and_then(|component| component.render_with(ctx))
    }
}

/// A plain `Vec` joins like [`ListOf`].
impl<C: Component> Component for Vec<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        join_children(self.iter().map(|child| child as &dyn Component), ctx)
    }
}

impl Component for Box<dyn Component> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        (**self).render_with(ctx)
    }
}
