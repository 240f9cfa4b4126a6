//! # Rendering
//!
//! The traversal entry points that flatten a composed component tree into a
//! final string. Rendering is a pure, synchronous computation: no I/O, no
//! concurrency, no hidden mutable state. The only contextual input is the
//! ambient separator carried by [`RenderContext`], which join-family
//! modifiers scope to subtrees.
//!
//! Absent results propagate internally and are skipped during joining; they
//! collapse to the empty string only here, at the externally-visible
//! boundary.

use crate::component::{Component, RenderContext};

/// Flatten a component tree into a string with the default `"\n"` separator.
///
/// Never fails. A fully-absent tree renders as the empty string.
pub fn render<C: Component + ?Sized>(component: &C) -> String {
    render_separated(component, "\n")
}

/// Flatten a component tree with an explicit initial separator.
pub fn render_separated<C: Component + ?Sized>(component: &C, separator: &str) -> String {
    let mut ctx = RenderContext::with_separator(separator);
    component.render_with(&mut ctx).unwrap_or_default()
}
