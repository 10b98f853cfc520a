//! Focus navigation graph
//!
//! Directional neighbor links between focusable controls, stored as a table
//! indexed by [`ControlId`]. The table is rebuilt from scratch on every
//! structural change (category switch, new display data); it is never patched.

use std::fmt;

/// Handle to a focusable control allocated by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u32);

impl ControlId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Control({})", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// (towards previous, towards next)
    fn directions(self) -> (Direction, Direction) {
        match self {
            Axis::Vertical => (Direction::Up, Direction::Down),
            Axis::Horizontal => (Direction::Left, Direction::Right),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub up: Option<ControlId>,
    pub down: Option<ControlId>,
    pub left: Option<ControlId>,
    pub right: Option<ControlId>,
}

impl Neighbors {
    pub fn get(&self, direction: Direction) -> Option<ControlId> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    fn slot(&mut self, direction: Direction) -> &mut Option<ControlId> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// What is currently focusable, in display order.
#[derive(Debug, Clone, Default)]
pub struct NavigationLayout {
    /// Category tabs, left to right. Empty when there are no tabs.
    pub tabs: Vec<ControlId>,
    /// Tab of the category being displayed.
    pub active_tab: Option<ControlId>,
    pub close: Option<ControlId>,
    /// Setting controls of the active category, top to bottom.
    pub elements: Vec<ControlId>,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationGraph {
    links: Vec<Neighbors>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the full graph for `layout`.
    ///
    /// Content elements form a vertical chain without wrap-around and never get
    /// left/right links. With tabs, every tab leads down to the first element and
    /// the first element leads up to the active tab; the tab row is a wrapping
    /// horizontal chain. Without tabs, the close control closes the loop:
    /// close.down = first and first.up = close. Either way the close control
    /// sits below the last element: last.down = close, close.up = last.
    pub fn build(layout: &NavigationLayout) -> Self {
        let mut graph = Self::new();

        graph.link_chain(&layout.tabs, Axis::Horizontal, true);
        graph.link_chain(&layout.elements, Axis::Vertical, false);

        let (Some(&first), Some(&last)) = (layout.elements.first(), layout.elements.last()) else {
            return graph;
        };

        if !layout.tabs.is_empty() {
            for &tab in &layout.tabs {
                graph.set_link(tab, Direction::Down, first);
            }
            if let Some(active) = layout.active_tab {
                graph.set_link(first, Direction::Up, active);
            }
        } else if let Some(close) = layout.close {
            graph.set_link(close, Direction::Down, first);
            graph.set_link(first, Direction::Up, close);
        }

        if let Some(close) = layout.close {
            graph.set_link(last, Direction::Down, close);
            graph.set_link(close, Direction::Up, last);
        }

        graph
    }

    /// Link `ids` in order along `axis`: each id's next neighbor is the
    /// following id and its previous neighbor the preceding one. With `wrap`,
    /// the ends are joined as well.
    pub fn link_chain(&mut self, ids: &[ControlId], axis: Axis, wrap: bool) {
        let (previous, next) = axis.directions();

        for pair in ids.windows(2) {
            self.set_link(pair[0], next, pair[1]);
            self.set_link(pair[1], previous, pair[0]);
        }

        if wrap && ids.len() > 1 {
            let first = ids[0];
            let last = ids[ids.len() - 1];
            self.set_link(last, next, first);
            self.set_link(first, previous, last);
        }
    }

    pub fn set_link(&mut self, from: ControlId, direction: Direction, to: ControlId) {
        if from.index() >= self.links.len() {
            self.links.resize(from.index() + 1, Neighbors::default());
        }
        *self.links[from.index()].slot(direction) = Some(to);
    }

    pub fn neighbors(&self, id: ControlId) -> Neighbors {
        self.links.get(id.index()).copied().unwrap_or_default()
    }

    pub fn neighbor(&self, id: ControlId, direction: Direction) -> Option<ControlId> {
        self.neighbors(id).get(direction)
    }

    /// Whether any link points at `id`.
    pub fn is_reachable(&self, id: ControlId) -> bool {
        self.links.iter().any(|n| {
            [n.up, n.down, n.left, n.right]
                .into_iter()
                .flatten()
                .any(|target| target == id)
        })
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(range: std::ops::Range<u32>) -> Vec<ControlId> {
        range.map(ControlId::new).collect()
    }

    #[test]
    fn test_vertical_chain_without_wrap() {
        let elements = ids(0..3);
        let mut graph = NavigationGraph::new();
        graph.link_chain(&elements, Axis::Vertical, false);

        assert_eq!(graph.neighbor(elements[0], Direction::Up), None);
        assert_eq!(graph.neighbor(elements[0], Direction::Down), Some(elements[1]));
        assert_eq!(graph.neighbor(elements[1], Direction::Up), Some(elements[0]));
        assert_eq!(graph.neighbor(elements[2], Direction::Down), None);
        assert_eq!(graph.neighbor(elements[1], Direction::Left), None);
    }

    #[test]
    fn test_horizontal_chain_with_wrap() {
        let tabs = ids(0..3);
        let mut graph = NavigationGraph::new();
        graph.link_chain(&tabs, Axis::Horizontal, true);

        assert_eq!(graph.neighbor(tabs[2], Direction::Right), Some(tabs[0]));
        assert_eq!(graph.neighbor(tabs[0], Direction::Left), Some(tabs[2]));
        assert_eq!(graph.neighbor(tabs[0], Direction::Up), None);
    }

    #[test]
    fn test_single_id_chain_has_no_self_links() {
        let mut graph = NavigationGraph::new();
        graph.link_chain(&ids(0..1), Axis::Horizontal, true);
        assert_eq!(graph.neighbors(ControlId::new(0)), Neighbors::default());
    }

    #[test]
    fn test_tabs_link_to_first_element() {
        let layout = NavigationLayout {
            tabs: ids(1..3),
            active_tab: Some(ControlId::new(2)),
            close: Some(ControlId::new(0)),
            elements: ids(3..6),
        };
        let graph = NavigationGraph::build(&layout);

        let first = layout.elements[0];
        let last = layout.elements[2];
        for &tab in &layout.tabs {
            assert_eq!(graph.neighbor(tab, Direction::Down), Some(first));
        }
        assert_eq!(graph.neighbor(first, Direction::Up), Some(ControlId::new(2)));

        let close = ControlId::new(0);
        assert_eq!(graph.neighbor(last, Direction::Down), Some(close));
        assert_eq!(graph.neighbor(close, Direction::Up), Some(last));
        assert_eq!(graph.neighbor(close, Direction::Down), None);
        for &element in &layout.elements {
            assert_eq!(graph.neighbor(element, Direction::Left), None);
            assert_eq!(graph.neighbor(element, Direction::Right), None);
        }
    }

    #[test]
    fn test_close_anchor_without_tabs() {
        let close = ControlId::new(0);
        let layout = NavigationLayout {
            close: Some(close),
            elements: ids(1..4),
            ..NavigationLayout::default()
        };
        let graph = NavigationGraph::build(&layout);

        let first = layout.elements[0];
        let last = layout.elements[2];
        assert_eq!(graph.neighbor(close, Direction::Down), Some(first));
        assert_eq!(graph.neighbor(close, Direction::Up), Some(last));
        assert_eq!(graph.neighbor(first, Direction::Up), Some(close));
        assert_eq!(graph.neighbor(last, Direction::Down), Some(close));
    }

    #[test]
    fn test_single_element_loops_through_anchor() {
        let close = ControlId::new(0);
        let only = ControlId::new(1);
        let layout = NavigationLayout {
            close: Some(close),
            elements: vec![only],
            ..NavigationLayout::default()
        };
        let graph = NavigationGraph::build(&layout);

        assert_eq!(graph.neighbor(only, Direction::Up), Some(close));
        assert_eq!(graph.neighbor(only, Direction::Down), Some(close));
        assert_eq!(graph.neighbor(close, Direction::Up), Some(only));
        assert_eq!(graph.neighbor(close, Direction::Down), Some(only));
    }

    #[test]
    fn test_no_elements_only_links_tabs() {
        let layout = NavigationLayout {
            tabs: ids(1..3),
            active_tab: Some(ControlId::new(1)),
            close: Some(ControlId::new(0)),
            elements: Vec::new(),
        };
        let graph = NavigationGraph::build(&layout);

        assert_eq!(graph.neighbor(ControlId::new(1), Direction::Down), None);
        assert_eq!(
            graph.neighbor(ControlId::new(1), Direction::Right),
            Some(ControlId::new(2))
        );
        assert!(!graph.is_reachable(ControlId::new(0)));
    }
}
