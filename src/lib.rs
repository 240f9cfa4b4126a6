//! # Treecompose Library
//!
//! This library provides declarative composition of hierarchical text and
//! binary artifacts: strings assembled from nested fragments, and file or
//! directory trees assembled from nested file and folder declarations. Both
//! are produced through the same "compose, then flatten" pipeline.
//!
//! ## Quick Example
//!
//! ```
//! use treecompose::{render, Line, Sequence, Tab};
//!
//! // Compose a small document from nested fragments
//! let doc = Sequence::new()
//!     .append("fn main() {")
//!     .append(Line::new(Sequence::new().append(Tab).append("println!(\"hi\");")))
//!     .append("}");
//!
//! // Flatten it with the default "\n" separator
//! assert_eq!(render(&doc), "fn main() {\n\tprintln!(\"hi\");\n}");
//! ```
//!
//! ## Core Concepts
//!
//! The library is built around a few key concepts:
//!
//! - **Components (`component`)**: The tree-shaped intermediate representation
//!   for text. Leaves hold literals; composites (`Sequence`, `Choice`,
//!   `ListOf`, `Erased`) combine children without rendering them eagerly.
//! - **Modifiers (`modifiers`)**: Combinators that adjust how a subtree is
//!   flattened, such as joining with a scoped separator, quoting, indenting,
//!   or applying line-based transforms.
//! - **Rendering (`render`)**: The traversal that flattens a component tree
//!   into a single string, joining non-absent results with the ambient
//!   separator.
//! - **Data components (`data`)**: The byte-buffer analog of the text
//!   pipeline. The same composite shapes concatenate byte fragments, and
//!   [`flatten`] resolves the tree to a `Vec<u8>`, typically feeding binary
//!   file content.
//! - **Entries (`entry`, `tree`)**: The file-pipeline analog. File and folder
//!   nodes serialize to an ordered list of [`Entry`] records, each carrying a
//!   name, permissions, and a file or directory payload.
//! - **Disk Writing (`writer`)**: Consumes a serialized entry list, validates
//!   it (root location, sibling-name uniqueness), and materializes it on disk
//!   with concurrent sibling writes and cooperative cancellation.
//!
//! ## Execution Flow
//!
//! Both pipelines follow the same high-level steps:
//!
//! 1.  **Compose**: Build a tree of components or entry nodes with the
//!     combinators. Composition is pure data construction and never fails.
//! 2.  **Flatten**: Call [`render`] for text, [`flatten`] for bytes, or
//!     [`serialize`] for entries. Rendering is referentially transparent;
//!     the only contextual input is the ambient separator, scoped to
//!     subtrees by join-family modifiers.
//! 3.  **Write** (file pipeline only): Hand the entry list to a
//!     [`DiskWriter`], which validates the whole tree before the first byte
//!     is written and then fans out sibling writes concurrently.
//!
//! By keeping composition, flattening, and I/O in distinct layers, the
//! library lets callers reuse the same composed tree for in-memory rendering,
//! interchange (JSON), and on-disk materialization.

pub mod component;
pub mod data;
pub mod entry;
pub mod error;
pub mod modifiers;
pub mod permissions;
pub mod render;
pub mod tree;
pub mod writer;

#[cfg(test)]
mod render_proptest;

pub use component::{Branch, Choice, Component, Erased, Fragment, ListOf, RenderContext, Sequence};
pub use data::{
    flatten, DataChoice, DataComponent, DataFragment, DataList, DataSequence, ErasedData,
};
pub use entry::{Entry, FileContent, Payload};
pub use error::{Error, Result};
pub use modifiers::{
    ComponentExt, Delimited, Indented, Joined, Line, LineSelection, Lines, MapLines, Prefixed,
    Quoted, Suffixed, Tab,
};
pub use permissions::Permissions;
pub use render::{render, render_separated};
pub use tree::{
    serialize, EntryChoice, EntryList, EntryNode, EntrySequence, ErasedEntry, File, Folder,
};
pub use writer::{write, write_sync, DiskWriter};
