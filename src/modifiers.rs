//! # Rendering Modifiers
//!
//! Combinators that adjust how a subtree is flattened. They fall into three
//! families:
//!
//! - **Join-family** ([`Joined`], [`Line`], [`Lines`]): push a separator onto
//!   the ambient context around the wrapped subtree and pop it once the
//!   subtree is fully rendered. Nested joins therefore use different
//!   separators without interfering with each other or with outer context.
//! - **Delimiter-family** ([`Delimited`], [`Quoted`]): wrap the rendered
//!   child in opening/closing text. An absent child stays absent, so no bare
//!   delimiters are emitted.
//! - **Line-family** ([`MapLines`], [`Prefixed`], [`Suffixed`],
//!   [`Indented`]): render the child to a string first, split on `'\n'`,
//!   apply a per-line transform under a [`LineSelection`] rule, and rejoin
//!   with `'\n'`. A transform returning `None` for a line deletes that line
//!   entirely.
//!
//! The [`ComponentExt`] extension trait provides method-chaining access to
//! all of these, so composition reads left to right.

use crate::component::{Component, Erased, RenderContext};

/// Joins the wrapped subtree's children with an explicit separator.
///
/// The separator is scoped: it applies to joins inside `content` and is
/// popped back to the enclosing separator once `content` has rendered.
pub struct Joined<C> {
    separator: String,
    content: C,
}

impl<C: Component> Joined<C> {
    /// Join `content`'s children with `separator`.
    pub fn new(separator: impl Into<String>, content: C) -> Self {
        Self {
            separator: separator.into(),
            content,
        }
    }
}

impl<C: Component> Component for Joined<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        ctx.push_separator(self.separator.clone());
        let rendered = self.content.render_with(ctx);
        ctx.pop_separator();
        rendered
    }
}

/// Concatenates its children into a single output line.
///
/// Equivalent to joining with the empty separator: children render flush
/// against each other regardless of the enclosing separator.
pub struct Line<C> {
    content: C,
}

impl<C: Component> Line<C> {
    pub fn new(content: C) -> Self {
        Self { content }
    }
}

impl<C: Component> Component for Line<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        ctx.push_separator("");
        let rendered = self.content.render_with(ctx);
        ctx.pop_separator();
        rendered
    }
}

/// Joins children as lines with configurable vertical spacing.
///
/// `spacing` is the number of newline characters between consecutive
/// children: `1` stacks them directly, `2` leaves one blank line between
/// each pair, and so on.
pub struct Lines<C> {
    spacing: usize,
    content: C,
}

impl<C: Component> Lines<C> {
    /// Stack children directly, one per line.
    pub fn new(content: C) -> Self {
        Self::spaced(1, content)
    }

    /// Stack children with `spacing` newlines between them.
    pub fn spaced(spacing: usize, content: C) -> Self {
        Self { spacing, content }
    }
}

impl<C: Component> Component for Lines<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        ctx.push_separator("\n".repeat(self.spacing));
        let rendered = self.content.render_with(ctx);
        ctx.pop_separator();
        rendered
    }
}

/// Wraps the rendered child in opening and closing text.
pub struct Delimited<C> {
    opening: String,
    closing: String,
    content: C,
}

impl<C: Component> Delimited<C> {
    pub fn new(opening: impl Into<String>, closing: impl Into<String>, content: C) -> Self {
        Self {
            opening: opening.into(),
            closing: closing.into(),
            content,
        }
    }

    /// Wrap in `(` and `)`.
    pub fn parentheses(content: C) -> Self {
        Self::new("(", ")", content)
    }

    /// Wrap in `[` and `]`.
    pub fn brackets(content: C) -> Self {
        Self::new("[", "]", content)
    }

    /// Wrap in `{` and `}`.
    pub fn braces(content: C) -> Self {
        Self::new("{", "}", content)
    }
}

impl<C: Component> Component for Delimited<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.content
            .render_with(ctx)
            .map(|rendered| format!("{}{}{}", self.opening, rendered, self.closing))
    }
}

/// Wraps the rendered child in a quote character.
pub struct Quoted<C> {
    quote: char,
    content: C,
}

impl<C: Component> Quoted<C> {
    /// Quote with an arbitrary character.
    pub fn new(quote: char, content: C) -> Self {
        Self { quote, content }
    }

    /// Quote with `"`.
    pub fn double(content: C) -> Self {
        Self::new('"', content)
    }

    /// Quote with `'`.
    pub fn single(content: C) -> Self {
        Self::new('\'', content)
    }
}

impl<C: Component> Component for Quoted<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.content
            .render_with(ctx)
            .map(|rendered| format!("{}{}{}", self.quote, rendered, self.quote))
    }
}

/// Selects which lines a line-family modifier applies to.
///
/// Lines outside the selection pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSelection {
    /// Every line, including blank ones.
    All,
    /// Only lines with content.
    NotEmpty,
    /// Only blank lines.
    Empty,
}

impl LineSelection {
    fn matches(self, line: &str) -> bool {
        match self {
            Self::All => true,
            Self::NotEmpty => !line.is_empty(),
            Self::Empty => line.is_empty(),
        }
    }
}

/// Split rendered text into lines, transform the selected ones, rejoin.
///
/// A transform returning `None` deletes the line; unselected lines pass
/// through unchanged.
fn transform_lines<F>(text: &str, selection: LineSelection, transform: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut kept: Vec<String> = Vec::new();
    for line in text.split('\n') {
        if selection.matches(line) {
            if let Some(mapped) = transform(line) {
                kept.push(mapped);
            }
        } else {
            kept.push(line.to_string());
        }
    }
    kept.join("\n")
}

/// Applies an arbitrary per-line transform to the rendered child.
pub struct MapLines<C, F> {
    selection: LineSelection,
    transform: F,
    content: C,
}

impl<C, F> MapLines<C, F>
where
    C: Component,
    F: Fn(&str) -> Option<String>,
{
    pub fn new(content: C, selection: LineSelection, transform: F) -> Self {
        Self {
            selection,
            transform,
            content,
        }
    }
}

impl<C, F> Component for MapLines<C, F>
where
    C: Component,
    F: Fn(&str) -> Option<String>,
{
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.content
            .render_with(ctx)
            .map(|rendered| transform_lines(&rendered, self.selection, &self.transform))
    }
}

/// Prepends a prefix to each selected line of the rendered child.
pub struct Prefixed<C> {
    prefix: String,
    selection: LineSelection,
    content: C,
}

impl<C: Component> Prefixed<C> {
    /// Prefix every line.
    pub fn new(prefix: impl Into<String>, content: C) -> Self {
        Self::selecting(prefix, LineSelection::All, content)
    }

    /// Prefix only the selected lines.
    pub fn selecting(prefix: impl Into<String>, selection: LineSelection, content: C) -> Self {
        Self {
            prefix: prefix.into(),
            selection,
            content,
        }
    }
}

impl<C: Component> Component for Prefixed<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.content.render_with(ctx).map(|rendered| {
            transform_lines(&rendered, self.selection, |line| {
                Some(format!("{}{}", self.prefix, line))
            })
        })
    }
}

/// Appends a suffix to each selected line of the rendered child.
pub struct Suffixed<C> {
    suffix: String,
    selection: LineSelection,
    content: C,
}

impl<C: Component> Suffixed<C> {
    /// Suffix every line.
    pub fn new(suffix: impl Into<String>, content: C) -> Self {
        Self::selecting(suffix, LineSelection::All, content)
    }

    /// Suffix only the selected lines.
    pub fn selecting(suffix: impl Into<String>, selection: LineSelection, content: C) -> Self {
        Self {
            suffix: suffix.into(),
            selection,
            content,
        }
    }
}

impl<C: Component> Component for Suffixed<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        self.content.render_with(ctx).map(|rendered| {
            transform_lines(&rendered, self.selection, |line| {
                Some(format!("{}{}", line, self.suffix))
            })
        })
    }
}

/// Indents each non-blank line of the rendered child with tabs.
///
/// Blank lines are left untouched so spacing never gains trailing tabs.
pub struct Indented<C> {
    depth: usize,
    content: C,
}

impl<C: Component> Indented<C> {
    /// Indent by one tab per level of `depth`.
    pub fn new(depth: usize, content: C) -> Self {
        Self { depth, content }
    }
}

impl<C: Component> Component for Indented<C> {
    fn render_with(&self, ctx: &mut RenderContext) -> Option<String> {
        let indent = "\t".repeat(self.depth);
        self.content.render_with(ctx).map(|rendered| {
            transform_lines(&rendered, LineSelection::NotEmpty, |line| {
                Some(format!("{}{}", indent, line))
            })
        })
    }
}

/// A leaf rendering a single tab character.
pub struct Tab;

impl Component for Tab {
    fn render_with(&self, _ctx: &mut RenderContext) -> Option<String> {
        Some("\t".to_string())
    }
}

/// Method-chaining access to the modifier combinators.
pub trait ComponentExt: Component + Sized {
    /// Join this subtree's children with `separator`.
    fn joined(self, separator: impl Into<String>) -> Joined<Self> {
        Joined::new(separator, self)
    }

    /// Wrap the rendered value in opening and closing text.
    fn delimited(self, opening: impl Into<String>, closing: impl Into<String>) -> Delimited<Self> {
        Delimited::new(opening, closing, self)
    }

    /// Wrap the rendered value in double quotes.
    fn quoted(self) -> Quoted<Self> {
        Quoted::double(self)
    }

    /// Prefix every rendered line.
    fn prefixed(self, prefix: impl Into<String>) -> Prefixed<Self> {
        Prefixed::new(prefix, self)
    }

    /// Suffix every rendered line.
    fn suffixed(self, suffix: impl Into<String>) -> Suffixed<Self> {
        Suffixed::new(suffix, self)
    }

    /// Transform selected rendered lines; `None` deletes a line.
    fn map_lines<F>(self, selection: LineSelection, transform: F) -> MapLines<Self, F>
    where
        F: Fn(&str) -> Option<String>,
    {
        MapLines::new(self, selection, transform)
    }

    /// Indent non-blank rendered lines by `depth` tabs.
    fn indented(self, depth: usize) -> Indented<Self> {
        Indented::new(depth, self)
    }

    /// Erase the concrete type behind the common capability.
    fn erased(self) -> Erased
    where
        Self: 'static,
    {
        Erased::new(self)
    }
}

impl<C: Component + Sized> ComponentExt for C {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Fragment, ListOf, Sequence};
    use crate::render::{render, render_separated};

    #[test]
    fn test_joined_uses_scoped_separator() {
        let joined = Sequence::new().append("a").append("b").joined(", ");
        assert_eq!(render(&joined), "a, b");
    }

    #[test]
    fn test_nested_joins_do_not_leak_separators() {
        let inner = Sequence::new().append("x").append("y").joined(",");
        let outer = Sequence::new().append("start").append(inner).append("end");
        assert_eq!(render(&outer), "start\nx,y\nend");
    }

    #[test]
    fn test_line_concatenates_children() {
        let doc = Sequence::new()
            .append("foo")
            .append(Line::new(Sequence::new().append(Tab).append("bar")))
            .append("baz");
        assert_eq!(render(&doc), "foo\n\tbar\nbaz");
    }

    #[test]
    fn test_lines_spacing_inserts_blank_lines() {
        let lines = Lines::spaced(2, Sequence::new().append("a").append("b"));
        assert_eq!(render(&lines), "a\n\nb");
    }

    #[test]
    fn test_lines_default_spacing() {
        let lines = Lines::new(Sequence::new().append("a").append("b"));
        assert_eq!(render(&lines), "a\nb");
    }

    #[test]
    fn test_delimited_wraps_content() {
        let delimited = Delimited::parentheses(Fragment::new("inner"));
        assert_eq!(render(&delimited), "(inner)");
    }

    #[test]
    fn test_delimited_absent_stays_absent() {
        let delimited = Delimited::brackets(Fragment::absent());
        let sequence = Sequence::new().append("a").append(delimited).append("b");
        // No bare `[]` appears, and no stray separator either.
        assert_eq!(render(&sequence), "a\nb");
    }

    #[test]
    fn test_quoted_line_inside_outer_join() {
        // Quote boundaries isolate separator scope: the quoted line
        // concatenates its children while the outer join uses "-".
        let quoted = Quoted::double(Line::new(Sequence::new().append("bar").append("baz")));
        let outer = Sequence::new().append("foo").append(quoted).append("qux");
        assert_eq!(render_separated(&outer, "-"), "foo-\"barbaz\"-qux");
    }

    #[test]
    fn test_quoted_single() {
        let quoted = Quoted::single(Fragment::new("word"));
        assert_eq!(render(&quoted), "'word'");
    }

    #[test]
    fn test_map_lines_not_empty_skips_blank_lines() {
        let lines = Lines::spaced(2, Sequence::new().append("a").append("b"));
        let mapped = lines.map_lines(LineSelection::NotEmpty, |line| Some(format!("- {}", line)));
        assert_eq!(render(&mapped), "- a\n\n- b");
    }

    #[test]
    fn test_map_lines_none_deletes_line() {
        let content = Fragment::new("keep\ndrop\nkeep");
        let mapped = content.map_lines(LineSelection::All, |line| {
            if line == "drop" {
                None
            } else {
                Some(line.to_string())
            }
        });
        assert_eq!(render(&mapped), "keep\nkeep");
    }

    #[test]
    fn test_map_lines_empty_selection_targets_blank_lines() {
        let content = Fragment::new("a\n\nb");
        let mapped = content.map_lines(LineSelection::Empty, |_| Some("---".to_string()));
        assert_eq!(render(&mapped), "a\n---\nb");
    }

    #[test]
    fn test_prefixed_all_lines() {
        let prefixed = Fragment::new("one\ntwo").prefixed("> ");
        assert_eq!(render(&prefixed), "> one\n> two");
    }

    #[test]
    fn test_prefixed_selecting_not_empty() {
        let prefixed = Prefixed::selecting("# ", LineSelection::NotEmpty, Fragment::new("a\n\nb"));
        assert_eq!(render(&prefixed), "# a\n\n# b");
    }

    #[test]
    fn test_suffixed_all_lines() {
        let suffixed = Fragment::new("one\ntwo").suffixed(";");
        assert_eq!(render(&suffixed), "one;\ntwo;");
    }

    #[test]
    fn test_indented_skips_blank_lines() {
        let indented = Fragment::new("a\n\nb").indented(2);
        assert_eq!(render(&indented), "\t\ta\n\n\t\tb");
    }

    #[test]
    fn test_tab_renders_tab_character() {
        assert_eq!(render(&Tab), "\t");
    }

    #[test]
    fn test_list_of_with_joined_modifier() {
        let list = ListOf::of(vec!["x", "y", "z"]).joined(" | ");
        assert_eq!(render(&list), "x | y | z");
    }
}
