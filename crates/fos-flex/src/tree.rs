//! Layout Tree
//!
//! Arena of styled nodes. Nodes are addressed by [`NodeId`]; a node owns
//! the ordered list of its children and keeps its parent only as a back
//! reference for dirty propagation.

use fos_style::Style;

use crate::layout::LayoutState;
use crate::{Layout, LayoutConfig, LayoutError, Measure};

/// Node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A node in the layout tree
#[derive(Debug)]
pub(crate) struct Node {
    pub style: Style,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub measure: Option<Box<dyn Measure>>,
    /// Style or structure changed since the last completed layout
    pub dirty: bool,
    pub state: LayoutState,
    /// Rounded result handed out to callers
    pub layout: Layout,
}

impl Node {
    fn new(style: Style) -> Self {
        Self {
            style,
            children: Vec::new(),
            parent: None,
            measure: None,
            dirty: true,
            state: LayoutState::default(),
            layout: Layout::default(),
        }
    }
}

/// Layout tree - arena of flex nodes
#[derive(Debug, Default)]
pub struct LayoutTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) config: LayoutConfig,
    /// Incremented once per layout pass
    pub(crate) generation: u32,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(64),
            config,
            generation: 0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration. Every node is marked dirty.
    pub fn set_config(&mut self, config: LayoutConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        for node in &mut self.nodes {
            node.dirty = true;
            node.state.cache.clear();
        }
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a detached node
    pub fn new_node(&mut self, style: Style) -> Result<NodeId, LayoutError> {
        style.validate()?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(style));
        Ok(id)
    }

    /// Create a leaf whose content size comes from `measure`
    pub fn new_leaf_with_measure(
        &mut self,
        style: Style,
        measure: impl Measure + 'static,
    ) -> Result<NodeId, LayoutError> {
        let id = self.new_node(style)?;
        self.nodes[id.0].measure = Some(Box::new(measure));
        Ok(id)
    }

    /// Create a node and append `children` to it in order
    pub fn new_with_children(
        &mut self,
        style: Style,
        children: &[NodeId],
    ) -> Result<NodeId, LayoutError> {
        for &child in children {
            if self.get(child)?.parent.is_some() {
                return Err(LayoutError::AlreadyParented(child));
            }
        }
        let id = self.new_node(style)?;
        for &child in children {
            self.append_child(id, child)?;
        }
        Ok(id)
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Append a child node to a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let index = self.child_count(parent)?;
        self.insert_child(parent, index, child)
    }

    /// Insert a child at `index`, clamped to the number of children
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), LayoutError> {
        let parent_node = self.get(parent)?;
        if parent_node.measure.is_some() {
            return Err(LayoutError::MeasuredNodeChildren(parent));
        }
        if self.get(child)?.parent.is_some() {
            return Err(LayoutError::AlreadyParented(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(LayoutError::WouldCycle { parent, child });
        }

        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        self.mark_dirty_unchecked(parent);
        Ok(())
    }

    /// Detach a child from its parent
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        self.get(child)?;
        let children = &mut self.get_mut(parent)?.children;
        let Some(index) = children.iter().position(|&c| c == child) else {
            return Err(LayoutError::NotAChild { parent, child });
        };
        children.remove(index);
        self.nodes[child.0].parent = None;
        self.mark_dirty_unchecked(parent);
        Ok(())
    }

    /// Children of a node in order
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], LayoutError> {
        Ok(&self.get(id)?.children)
    }

    pub fn child_count(&self, id: NodeId) -> Result<usize, LayoutError> {
        Ok(self.get(id)?.children.len())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, LayoutError> {
        Ok(self.get(id)?.parent)
    }

    // ========================================================================
    // Style and measurement
    // ========================================================================

    pub fn style(&self, id: NodeId) -> Result<&Style, LayoutError> {
        Ok(&self.get(id)?.style)
    }

    /// Replace a node's style. An unchanged style leaves the node clean.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), LayoutError> {
        let node = self.get(id)?;
        style.validate()?;
        if node.style == style {
            return Ok(());
        }
        self.nodes[id.0].style = style;
        self.mark_dirty_unchecked(id);
        Ok(())
    }

    /// Edit a node's style in place
    pub fn update_style(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Style),
    ) -> Result<(), LayoutError> {
        let mut style = *self.style(id)?;
        edit(&mut style);
        self.set_style(id, style)
    }

    /// Give a childless node a measure capability
    pub fn set_measure(&mut self, id: NodeId, measure: impl Measure + 'static) -> Result<(), LayoutError> {
        let node = self.get_mut(id)?;
        if !node.children.is_empty() {
            return Err(LayoutError::MeasuredNodeChildren(id));
        }
        node.measure = Some(Box::new(measure));
        self.mark_dirty_unchecked(id);
        Ok(())
    }

    /// Remove a node's measure capability
    pub fn clear_measure(&mut self, id: NodeId) -> Result<(), LayoutError> {
        if self.get_mut(id)?.measure.take().is_some() {
            self.mark_dirty_unchecked(id);
        }
        Ok(())
    }

    pub fn has_measure(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.get(id)?.measure.is_some())
    }

    // ========================================================================
    // Dirty state and results
    // ========================================================================

    /// Force a node to be laid out again, e.g. after its measured content
    /// changed.
    pub fn mark_dirty(&mut self, id: NodeId) -> Result<(), LayoutError> {
        self.get(id)?;
        self.mark_dirty_unchecked(id);
        Ok(())
    }

    pub fn is_dirty(&self, id: NodeId) -> Result<bool, LayoutError> {
        Ok(self.get(id)?.dirty)
    }

    /// Rounded layout of a node from the last pass
    pub fn layout(&self, id: NodeId) -> Result<&Layout, LayoutError> {
        let node = self.get(id)?;
        if node.dirty {
            return Err(LayoutError::DirtyLayout(id));
        }
        Ok(&node.layout)
    }

    /// Layout of a node before pixel-grid rounding
    pub fn unrounded_layout(&self, id: NodeId) -> Result<Layout, LayoutError> {
        let node = self.get(id)?;
        if node.dirty {
            return Err(LayoutError::DirtyLayout(id));
        }
        Ok(node.state.to_layout())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn get(&self, id: NodeId) -> Result<&Node, LayoutError> {
        self.nodes.get(id.0).ok_or(LayoutError::InvalidNode(id))
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, LayoutError> {
        self.nodes.get_mut(id.0).ok_or(LayoutError::InvalidNode(id))
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<(), LayoutError> {
        self.get(id).map(|_| ())
    }

    /// `ancestor` is `id` or one of its ancestors
    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    /// Mark a node and its ancestors dirty, dropping their cached results.
    ///
    /// Stops at the first ancestor that is already dirty: its own
    /// ancestors were marked when it was.
    fn mark_dirty_unchecked(&mut self, id: NodeId) {
        tracing::trace!("{:?} marked dirty", id);
        let node = &mut self.nodes[id.0];
        node.dirty = true;
        node.state.cache.clear();

        let mut current = node.parent;
        while let Some(parent) = current {
            let node = &mut self.nodes[parent.0];
            if node.dirty {
                break;
            }
            node.dirty = true;
            node.state.cache.clear();
            current = node.parent;
        }
    }
}
