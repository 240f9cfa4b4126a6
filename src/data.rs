//! # Data Components
//!
//! The byte-buffer analog of the text components: a tree of data nodes that
//! flattens to a single `Vec<u8>` instead of a string. The shapes mirror
//! the text pipeline exactly (a leaf, an append-built sequence, a two-armed
//! choice, an iteration list, and a type-erasure wrapper), but byte runs
//! are concatenated rather than joined (there is no separator concept for
//! raw bytes).
//!
//! Absent propagates the same way as in the text pipeline: an absent child
//! contributes nothing, an all-absent composite is itself absent, and
//! absent collapses to an empty buffer only at the top-level [`flatten`]
//! boundary. A composed data tree typically ends up as binary file content
//! via [`File::data`](crate::tree::File::data).

use crate::component::Branch;

/// A composable run of bytes.
///
/// Implementors answer with their resolved bytes: `Some(bytes)` for
/// content, `None` for the absent result. Absent is distinct from
/// `Some(vec![])`.
pub trait DataComponent {
    /// The bytes this node resolves to.
    fn resolve(&self) -> Option<Vec<u8>>;
}

/// Flatten a data-component tree into its final byte buffer.
///
/// Never fails; absent collapses to an empty buffer only at this top-level
/// boundary.
pub fn flatten<D: DataComponent + ?Sized>(node: &D) -> Vec<u8> {
    node.resolve().unwrap_or_default()
}

/// Concatenate the non-absent results of an ordered run of children.
///
/// If every child is absent the whole run is absent.
fn concat_children<'a, I>(children: I) -> Option<Vec<u8>>
where
    I: IntoIterator<Item = &'a dyn DataComponent>,
{
    let mut accumulated: Option<Vec<u8>> = None;
    for child in children {
        if let Some(piece) = child.resolve() {
            accumulated.get_or_insert_with(Vec::new).extend_from_slice(&piece);
        }
    }
    accumulated
}

/// A terminal node holding a literal byte buffer, or an explicitly-absent
/// leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataFragment(Option<Vec<u8>>);

impl DataFragment {
    /// Create a fragment holding literal bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Some(bytes.into()))
    }

    /// Create an explicitly-absent fragment.
    pub fn absent() -> Self {
        Self(None)
    }

    /// Whether this fragment is absent.
    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }
}

impl DataComponent for DataFragment {
    fn resolve(&self) -> Option<Vec<u8>> {
        self.0.clone()
    }
}

/// An ordered, append-built run of heterogeneous children; resolves to the
/// concatenation of its children's bytes.
#[derive(Default)]
pub struct DataSequence {
    children: Vec<Box<dyn DataComponent>>,
}

impl DataSequence {
    /// Create an empty sequence (the unit case).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one more child, returning the extended sequence.
    pub fn append(mut self, child: impl DataComponent + 'static) -> Self {
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

impl DataComponent for DataSequence {
    fn resolve(&self) -> Option<Vec<u8>> {
        concat_children(self.children.iter().map(AsRef::as_ref))
    }
}

/// A two-armed tagged union produced by conditional branches; resolution
/// forwards unconditionally to the active arm.
pub enum DataChoice {
    First(Box<dyn DataComponent>),
    Second(Box<dyn DataComponent>),
}

impl DataChoice {
    /// Wrap a value as the first arm.
    pub fn first(value: impl DataComponent + 'static) -> Self {
        Self::First(Box::new(value))
    }

    /// Wrap a value as the second arm.
    pub fn second(value: impl DataComponent + 'static) -> Self {
        Self::Second(Box::new(value))
    }

    /// Wrap a value tagged with an explicit branch.
    pub fn select(branch: Branch, value: impl DataComponent + 'static) -> Self {
        match branch {
            Branch::First => Self::first(value),
            Branch::Second => Self::second(value),
        }
    }
}

impl DataComponent for DataChoice {
    fn resolve(&self) -> Option<Vec<u8>> {
        match self {
            Self::First(arm) | Self::Second(arm) => arm.resolve(),
        }
    }
}

/// A homogeneous ordered collection of children produced by iteration;
/// concatenates like [`DataSequence`].
#[derive(Default)]
pub struct DataList {
    elements: Vec<Box<dyn DataComponent>>,
}

impl DataList {
    /// Create a list from pre-boxed elements.
    pub fn new(elements: Vec<Box<dyn DataComponent>>) -> Self {
        Self { elements }
    }

    /// Create a list by boxing each element of an iterator.
    pub fn of<D, I>(elements: I) -> Self
    where
        D: DataComponent + 'static,
        I: IntoIterator<Item = D>,
    {
        Self {
            elements: elements
                .into_iter()
                .map(|element| Box::new(element) as Box<dyn DataComponent>)
                .collect(),
        }
    }
}

impl DataComponent for DataList {
    fn resolve(&self) -> Option<Vec<u8>> {
        concat_children(self.elements.iter().map(AsRef::as_ref))
    }
}

/// A type-erased wrapper around any concrete data component.
pub struct ErasedData(Box<dyn DataComponent>);

impl ErasedData {
    /// Erase a concrete component behind the common capability.
    pub fn new(component: impl DataComponent + 'static) -> Self {
        Self(Box::new(component))
    }
}

impl DataComponent for ErasedData {
    fn resolve(&self) -> Option<Vec<u8>> {
        self.0.resolve()
    }
}

impl DataComponent for &[u8] {
    fn resolve(&self) -> Option<Vec<u8>> {
        Some(self.to_vec())
    }
}

/// Text composes into the data pipeline as its UTF-8 bytes.
impl DataComponent for &str {
    fn resolve(&self) -> Option<Vec<u8>> {
        Some(self.as_bytes().to_vec())
    }
}

impl DataComponent for String {
    fn resolve(&self) -> Option<Vec<u8>> {
        Some(self.as_bytes().to_vec())
    }
}

/// `None` resolves as absent, so optional content composes directly.
impl<D: DataComponent> DataComponent for Option<D> {
    fn resolve(&self) -> Option<Vec<u8>> {
        self.as_ref().and_then(DataComponent::resolve)
    }
}

impl DataComponent for Box<dyn DataComponent> {
    fn resolve(&self) -> Option<Vec<u8>> {
        (**self).resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_resolves_literal() {
        let fragment = DataFragment::new(vec![1u8, 2, 3]);
        assert_eq!(fragment.resolve(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_fragment_absent_resolves_none() {
        let fragment = DataFragment::absent();
        assert!(fragment.is_absent());
        assert_eq!(fragment.resolve(), None);
    }

    #[test]
    fn test_empty_buffer_is_not_absent() {
        let fragment = DataFragment::new(Vec::new());
        assert_eq!(fragment.resolve(), Some(Vec::new()));
    }

    #[test]
    fn test_sequence_concatenates_in_declaration_order() {
        let sequence = DataSequence::new()
            .append(DataFragment::new(vec![0u8, 1]))
            .append(DataFragment::new(vec![2u8]))
            .append(DataFragment::new(vec![3u8, 4]));
        assert_eq!(sequence.resolve(), Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_sequence_skips_absent_children() {
        let sequence = DataSequence::new()
            .append(DataFragment::new(vec![0xCAu8]))
            .append(DataFragment::absent())
            .append(DataFragment::new(vec![0xFEu8]));
        assert_eq!(sequence.resolve(), Some(vec![0xCA, 0xFE]));
    }

    #[test]
    fn test_sequence_all_absent_is_absent() {
        let sequence = DataSequence::new()
            .append(DataFragment::absent())
            .append(DataFragment::absent());
        assert_eq!(sequence.resolve(), None);
    }

    #[test]
    fn test_empty_sequence_is_absent() {
        let sequence = DataSequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.resolve(), None);
    }

    #[test]
    fn test_flatten_collapses_absent_to_empty() {
        assert_eq!(flatten(&DataFragment::absent()), Vec::<u8>::new());
        assert_eq!(flatten(&DataFragment::new(vec![9u8])), vec![9]);
    }

    #[test]
    fn test_choice_forwards_active_arm() {
        let first = DataChoice::first(DataFragment::new(vec![1u8]));
        let second = DataChoice::second(DataFragment::new(vec![2u8]));
        assert_eq!(first.resolve(), Some(vec![1]));
        assert_eq!(second.resolve(), Some(vec![2]));
    }

    #[test]
    fn test_choice_select_tags_branch() {
        let choice = DataChoice::select(Branch::Second, DataFragment::new(vec![7u8]));
        assert_eq!(choice.resolve(), Some(vec![7]));
    }

    #[test]
    fn test_list_concatenates_elements() {
        let list = DataList::of((0u8..4).map(|n| DataFragment::new(vec![n])));
        assert_eq!(list.resolve(), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_erased_forwards_to_wrapped_value() {
        let erased = ErasedData::new(
            DataSequence::new()
                .append(DataFragment::new(vec![1u8]))
                .append(DataFragment::new(vec![2u8])),
        );
        assert_eq!(erased.resolve(), Some(vec![1, 2]));
    }

    #[test]
    fn test_text_resolves_as_utf8_bytes() {
        let sequence = DataSequence::new()
            .append("PK")
            .append(DataFragment::new(vec![3u8, 4]));
        assert_eq!(sequence.resolve(), Some(vec![b'P', b'K', 3, 4]));
    }

    #[test]
    fn test_option_component_none_is_absent() {
        let none: Option<DataFragment> = None;
        let some = Some(DataFragment::new(vec![5u8]));
        assert_eq!(none.resolve(), None);
        assert_eq!(some.resolve(), Some(vec![5]));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let sequence = DataSequence::new()
            .append(DataFragment::new(vec![1u8]))
            .append("tail");
        assert_eq!(sequence.resolve(), sequence.resolve());
    }
}
