//! # File-Tree Composition
//!
//! The file-pipeline analog of the text components: a tree of entry nodes
//! that flattens to an ordered list of [`Entry`] records instead of a
//! string. The shapes mirror the text pipeline exactly (leaves, an
//! append-built sequence, a two-armed choice, an iteration list, and a
//! type-erasure wrapper), but the value at each node is a list of entries,
//! so sequences and lists concatenate rather than join (directory and file
//! entries are discrete records, not joined text).
//!
//! ## Key Components
//!
//! - **`EntryNode`**: the capability: "what entries do I serialize to?".
//!   Serialization is pure and infallible; all failure detection happens
//!   later, in the writer.
//! - **`File`** / **`Folder`**: leaf builders carrying name, permissions,
//!   and content or children. A folder's payload is its fully-serialized
//!   child list, so directory trees serialize recursively.
//! - **`EntrySequence`**, **`EntryChoice`**, **`EntryList`**,
//!   **`ErasedEntry`**: the composite shapes.
//! - **`serialize`**: the top-level entry point.

use crate::component::Branch;
use crate::data::{self, DataComponent};
use crate::entry::{Entry, FileContent};
use crate::permissions::Permissions;

/// A composable unit of the file pipeline.
pub trait EntryNode {
    /// The ordered entry list this node serializes to.
    fn entries(&self) -> Vec<Entry>;
}

/// Flatten an entry-node tree into an ordered list of resolved entries.
///
/// Pure and synchronous; nothing touches the filesystem until the list is
/// handed to a [`DiskWriter`](crate::writer::DiskWriter).
pub fn serialize<N: EntryNode + ?Sized>(node: &N) -> Vec<Entry> {
    node.entries()
}

/// A declared file: name, optional extension, content, permissions.
#[derive(Debug, Clone)]
pub struct File {
    name: String,
    extension: Option<String>,
    permissions: Permissions,
    content: FileContent,
}

impl File {
    /// Declare a UTF-8 text file.
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: None,
            permissions: Permissions::FILE_DEFAULT,
            content: FileContent::Text(content.into()),
        }
    }

    /// Declare a binary file.
    pub fn binary(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            extension: None,
            permissions: Permissions::FILE_DEFAULT,
            content: FileContent::Bytes(bytes),
        }
    }

    /// Declare a binary file from a composed data tree, flattened here.
    pub fn data(name: impl Into<String>, node: &(impl DataComponent + ?Sized)) -> Self {
        Self::binary(name, data::flatten(node))
    }

    /// Attach an extension, appended to the name as `name.extension`.
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Replace the file's permissions.
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// The full on-disk name, including the extension when present.
    pub fn full_name(&self) -> String {
        match &self.extension {
            Some(extension) => format!("{}.{}", self.name, extension),
            None => self.name.clone(),
        }
    }
}

impl EntryNode for File {
    fn entries(&self) -> Vec<Entry> {
        vec![Entry::file(self.full_name(), self.content.clone()).with_permissions(self.permissions)]
    }
}

/// A declared directory with ordered child nodes.
pub struct Folder {
    name: String,
    permissions: Permissions,
    children: Vec<Box<dyn EntryNode>>,
}

impl Folder {
    /// Declare an empty folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: Permissions::DIRECTORY_DEFAULT,
            children: Vec::new(),
        }
    }

    /// Append one child node.
    pub fn child(mut self, child: impl EntryNode + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    /// Replace the folder's permissions.
    pub fn permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }
}

impl EntryNode for Folder {
    fn entries(&self) -> Vec<Entry> {
        let children = self
            .children
            .iter()
            .flat_map(|child| child.entries())
            .collect();
        vec![Entry::directory(self.name.clone(), children).with_permissions(self.permissions)]
    }
}

/// An ordered, append-built run of entry nodes; serializes to the
/// concatenation of its children's entry lists.
#[derive(Default)]
pub struct EntrySequence {
    children: Vec<Box<dyn EntryNode>>,
}

impl EntrySequence {
    /// Create an empty sequence (the unit case).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one more child, returning the extended sequence.
    pub fn append(mut self, child: impl EntryNode + 'static) -> Self {
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

impl EntryNode for EntrySequence {
    fn entries(&self) -> Vec<Entry> {
        self.children
            .iter()
            .flat_map(|child| child.entries())
            .collect()
    }
}

/// A two-armed tagged union of entry nodes; serialization forwards
/// unconditionally to the active arm.
pub enum EntryChoice {
    First(Box<dyn EntryNode>),
    Second(Box<dyn EntryNode>),
}

impl EntryChoice {
    /// Wrap a node as the first arm.
    pub fn first(node: impl EntryNode + 'static) -> Self {
        Self::First(Box::new(node))
    }

    /// Wrap a node as the second arm.
    pub fn second(node: impl EntryNode + 'static) -> Self {
        Self::Second(Box::new(node))
    }

    /// Wrap a node tagged with an explicit branch.
    pub fn select(branch: Branch, node: impl EntryNode + 'static) -> Self {
        match branch {
            Branch::First => Self::first(node),
            Branch::Second => Self::second(node),
        }
    }
}

impl EntryNode for EntryChoice {
    fn entries(&self) -> Vec<Entry> {
        match self {
            Self::First(arm) | Self::Second(arm) => arm.entries(),
        }
    }
}

/// A homogeneous ordered collection of entry nodes produced by iteration.
#[derive(Default)]
pub struct EntryList {
    elements: Vec<Box<dyn EntryNode>>,
}

impl EntryList {
    /// Create a list from pre-boxed elements.
    pub fn new(elements: Vec<Box<dyn EntryNode>>) -> Self {
        Self { elements }
    }

    /// Create a list by boxing each element of an iterator.
    pub fn of<N, I>(elements: I) -> Self
    where
        N: EntryNode + 'static,
        I: IntoIterator<Item = N>,
    {
        Self {
            elements: elements
                .into_iter()
                .map(|element| Box::new(element) as Box<dyn EntryNode>)
                .collect(),
        }
    }
}

impl EntryNode for EntryList {
    fn entries(&self) -> Vec<Entry> {
        self.elements
            .iter()
            .flat_map(|element| element.entries())
            .collect()
    }
}

/// A type-erased wrapper around any concrete entry node.
pub struct ErasedEntry(Box<dyn EntryNode>);

impl ErasedEntry {
    /// Erase a concrete node behind the common capability.
    pub fn new(node: impl EntryNode + 'static) -> Self {
        Self(Box::new(node))
    }
}

impl EntryNode for ErasedEntry {
    fn entries(&self) -> Vec<Entry> {
        self.0.entries()
    }
}

/// A pre-resolved entry serializes to itself.
impl EntryNode for Entry {
    fn entries(&self) -> Vec<Entry> {
        vec![self.clone()]
    }
}

/// `None` serializes to no entries, so optional declarations compose
/// directly.
impl<N: EntryNode> EntryNode for Option<N> {
    fn entries(&self) -> Vec<Entry> {
        self.as_ref().map(EntryNode::entries).unwrap_or_default()
    }
}

/// A plain `Vec` concatenates like [`EntryList`].
impl<N: EntryNode> EntryNode for Vec<N> {
    fn entries(&self) -> Vec<Entry> {
        self.iter().flat_map(EntryNode::entries).collect()
    }
}

impl EntryNode for Box<dyn EntryNode> {
    fn entries(&self) -> Vec<Entry> {
        (**self).entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Payload;

    #[test]
    fn test_file_leaf_serializes_to_single_entry() {
        let file = File::text("README", "sup").extension("md");
        let entries = serialize(&file);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "README.md");
        assert_eq!(
            entries[0].payload,
            Payload::File(FileContent::Text("sup".to_string()))
        );
    }

    #[test]
    fn test_file_without_extension_keeps_name() {
        let file = File::text("Makefile", "all:");
        assert_eq!(file.full_name(), "Makefile");
    }

    #[test]
    fn test_file_from_composed_data_tree() {
        use crate::data::{DataFragment, DataSequence};

        let payload = DataSequence::new()
            .append(DataFragment::new(vec![0x89u8]))
            .append("PNG")
            .append(DataFragment::absent())
            .append(DataFragment::new(vec![0x0Du8, 0x0A]));
        let file = File::data("image", &payload).extension("png");
        let entries = serialize(&file);

        assert_eq!(entries[0].name, "image.png");
        assert_eq!(
            entries[0].payload,
            Payload::File(FileContent::Bytes(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A]))
        );
    }

    #[test]
    fn test_file_permissions_carried_through() {
        let file = File::text("run", "#!/bin/sh").permissions(Permissions::EXECUTABLE);
        let entries = serialize(&file);
        assert_eq!(entries[0].permissions, Permissions::EXECUTABLE);
    }

    #[test]
    fn test_folder_serializes_recursively() {
        let folder = Folder::new("foo")
            .child(File::text("README", "sup").extension("md"))
            .child(Folder::new("bar").child(File::text("tweet", "X")));
        let entries = serialize(&folder);
        assert_eq!(entries.len(), 1);

        let Payload::Directory(children) = &entries[0].payload else {
            panic!("expected a directory payload");
        };
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "README.md");
        assert_eq!(children[1].name, "bar");
        assert!(children[1].is_directory());
    }

    #[test]
    fn test_entry_sequence_concatenates_in_order() {
        let sequence = EntrySequence::new()
            .append(File::text("a.txt", "a"))
            .append(File::text("b.txt", "b"));
        let entries = serialize(&sequence);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[1].name, "b.txt");
    }

    #[test]
    fn test_entry_choice_forwards_active_arm() {
        let first = EntryChoice::first(File::text("yes.txt", "y"));
        let second = EntryChoice::second(File::text("no.txt", "n"));
        assert_eq!(serialize(&first)[0].name, "yes.txt");
        assert_eq!(serialize(&second)[0].name, "no.txt");
    }

    #[test]
    fn test_entry_choice_select() {
        let choice = EntryChoice::select(Branch::Second, File::text("picked.txt", "p"));
        assert_eq!(serialize(&choice)[0].name, "picked.txt");
    }

    #[test]
    fn test_entry_list_from_iteration() {
        let list = EntryList::of((1..=3).map(|n| File::text(format!("file{}.txt", n), "x")));
        let entries = serialize(&list);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2].name, "file3.txt");
    }

    #[test]
    fn test_erased_entry_forwards() {
        let erased = ErasedEntry::new(Folder::new("dir").child(File::text("f", "c")));
        let entries = serialize(&erased);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_directory());
    }

    #[test]
    fn test_option_node_none_serializes_to_nothing() {
        let none: Option<File> = None;
        assert!(serialize(&none).is_empty());
        let some = Some(File::text("x", "y"));
        assert_eq!(serialize(&some).len(), 1);
    }

    #[test]
    fn test_pre_resolved_entry_is_its_own_node() {
        let entry = Entry::text_file("direct.txt", "content");
        assert_eq!(serialize(&entry), vec![entry.clone()]);
    }

    #[test]
    fn test_serialization_is_pure() {
        let folder = Folder::new("twice").child(File::text("f.txt", "c"));
        assert_eq!(serialize(&folder), serialize(&folder));
    }
}
