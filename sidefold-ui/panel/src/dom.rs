use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use crate::errors::DomError;

/// Opaque handle of an element inside a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element events a listener can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Click,
}

/// Element tree facility used by the panel for every visual side effect.
///
/// Mutations against elements that are not part of the tree fail with
/// [`DomError::UnknownElement`]; traversal simply returns `None`.
pub trait Dom {
    /// Create a detached element with the given tag.
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn add_class(&mut self, el: ElementId, class: &str) -> Result<(), DomError>;

    fn remove_class(
        &mut self,
        el: ElementId,
        class: &str,
    ) -> Result<(), DomError>;

    fn set_style(
        &mut self,
        el: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError>;

    fn remove_style(
        &mut self,
        el: ElementId,
        property: &str,
    ) -> Result<(), DomError>;

    /// Return the inline value of a style property, if set.
    fn style(&self, el: ElementId, property: &str) -> Option<&str>;

    fn parent(&self, el: ElementId) -> Option<ElementId>;

    fn next_sibling(&self, el: ElementId) -> Option<ElementId>;

    fn previous_sibling(&self, el: ElementId) -> Option<ElementId>;

    /// Attach `child` as the last child of `parent`, detaching it first if it
    /// already has a parent.
    fn append_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), DomError>;

    /// Detach `child` from `parent` and drop it with all its descendants.
    fn remove_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), DomError>;

    /// Route `kind` events on `el` to the named owner.
    fn listen(
        &mut self,
        el: ElementId,
        kind: DomEventKind,
        owner: &str,
    ) -> Result<(), DomError>;
}

#[derive(Debug)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
    listeners: Vec<(DomEventKind, String)>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            classes: BTreeSet::new(),
            styles: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }
}

/// In-memory element tree backing the panel in hosts and tests.
#[derive(Debug, Default)]
pub struct RetainedDom {
    nodes: HashMap<ElementId, Node>,
    next_id: u64,
}

impl RetainedDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether the element is still part of the tree.
    pub fn contains(&self, el: ElementId) -> bool {
        self.nodes.contains_key(&el)
    }

    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.nodes.get(&el).map(|node| node.tag.as_str())
    }

    pub fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.nodes
            .get(&el)
            .is_some_and(|node| node.classes.contains(class))
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.nodes
            .get(&el)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Return every element carrying `class`, in id order.
    pub fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        let mut found: Vec<ElementId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.classes.contains(class))
            .map(|(id, _)| *id)
            .collect();
        found.sort();
        found
    }

    /// Return the owner registered for `kind` events on `el`.
    pub fn listener_owner(
        &self,
        el: ElementId,
        kind: DomEventKind,
    ) -> Option<&str> {
        self.nodes.get(&el).and_then(|node| {
            node.listeners
                .iter()
                .find(|(listener_kind, _)| *listener_kind == kind)
                .map(|(_, owner)| owner.as_str())
        })
    }

    fn node_mut(&mut self, el: ElementId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(&el).ok_or(DomError::UnknownElement(el))
    }

    fn sibling_at(&self, el: ElementId, offset: isize) -> Option<ElementId> {
        let parent = self.nodes.get(&el)?.parent?;
        let siblings = &self.nodes.get(&parent)?.children;
        let index = siblings.iter().position(|id| *id == el)?;
        let target = index.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.nodes.get(&id).and_then(|node| node.parent);
        }
        false
    }

    fn drop_subtree(&mut self, el: ElementId) {
        let Some(node) = self.nodes.remove(&el) else {
            return;
        };
        for child in node.children {
            self.drop_subtree(child);
        }
    }
}

impl Dom for RetainedDom {
    fn create_element(&mut self, tag: &str) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.nodes.insert(id, Node::new(tag));
        id
    }

    fn add_class(&mut self, el: ElementId, class: &str) -> Result<(), DomError> {
        self.node_mut(el)?.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(
        &mut self,
        el: ElementId,
        class: &str,
    ) -> Result<(), DomError> {
        self.node_mut(el)?.classes.remove(class);
        Ok(())
    }

    fn set_style(
        &mut self,
        el: ElementId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.node_mut(el)?
            .styles
            .insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn remove_style(
        &mut self,
        el: ElementId,
        property: &str,
    ) -> Result<(), DomError> {
        self.node_mut(el)?.styles.remove(property);
        Ok(())
    }

    fn style(&self, el: ElementId, property: &str) -> Option<&str> {
        self.nodes
            .get(&el)
            .and_then(|node| node.styles.get(property))
            .map(String::as_str)
    }

    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.nodes.get(&el).and_then(|node| node.parent)
    }

    fn next_sibling(&self, el: ElementId) -> Option<ElementId> {
        self.sibling_at(el, 1)
    }

    fn previous_sibling(&self, el: ElementId) -> Option<ElementId> {
        self.sibling_at(el, -1)
    }

    fn append_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), DomError> {
        if !self.contains(parent) {
            return Err(DomError::UnknownElement(parent));
        }
        if !self.contains(child) {
            return Err(DomError::UnknownElement(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::Cycle(child));
        }

        if let Some(previous) = self.parent(child) {
            let node = self.node_mut(previous)?;
            node.children.retain(|id| *id != child);
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn remove_child(
        &mut self,
        parent: ElementId,
        child: ElementId,
    ) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }

        self.node_mut(parent)?.children.retain(|id| *id != child);
        self.drop_subtree(child);
        Ok(())
    }

    fn listen(
        &mut self,
        el: ElementId,
        kind: DomEventKind,
        owner: &str,
    ) -> Result<(), DomError> {
        self.node_mut(el)?.listeners.push((kind, owner.to_string()));
        Ok(())
    }
}
