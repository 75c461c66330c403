//! Binary space partitioning of polygon soups, the engine behind the boolean
//! operations on [`CSG`](crate::csg::CSG) solids.

use crate::plane::Plane;
use crate::polygon::Polygon;

/// One node of a BSP tree.
///
/// `polygons` holds every polygon lying in `plane`. Polygons strictly in front
/// of the plane live in the `front` subtree, those behind it in `back`. A node
/// without a plane is an empty tree.
#[derive(Debug, Clone)]
pub struct Node<S: Clone> {
    pub plane: Option<Plane>,
    pub front: Option<Box<Node<S>>>,
    pub back: Option<Box<Node<S>>>,
    pub polygons: Vec<Polygon<S>>,
}

/// Polygons sorted against a splitting plane.
struct Partition<S: Clone> {
    coplanar_front: Vec<Polygon<S>>,
    coplanar_back: Vec<Polygon<S>>,
    front: Vec<Polygon<S>>,
    back: Vec<Polygon<S>>,
}

impl<S: Clone> Partition<S> {
    fn of(plane: &Plane, polygons: &[Polygon<S>]) -> Self {
        let mut parts = Partition {
            coplanar_front: Vec::new(),
            coplanar_back: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
        };
        for polygon in polygons {
            let (cf, cb, f, b) = plane.split_polygon(polygon);
            parts.coplanar_front.extend(cf);
            parts.coplanar_back.extend(cb);
            parts.front.extend(f);
            parts.back.extend(b);
        }
        parts
    }
}

impl<S: Clone> Default for Node<S> {
    fn default() -> Self {
        Node {
            plane: None,
            front: None,
            back: None,
            polygons: Vec::new(),
        }
    }
}

impl<S: Clone> Node<S> {
    /// Tree over `polygons`; an empty slice gives an empty tree.
    pub fn new(polygons: &[Polygon<S>]) -> Self {
        let mut node = Node::default();
        node.build(polygons);
        node
    }

    fn children_mut(&mut self) -> impl Iterator<Item = &mut Box<Node<S>>> {
        self.front.iter_mut().chain(self.back.iter_mut())
    }

    /// Turn the solid inside out: flip every polygon and plane and swap the
    /// subtrees.
    pub fn invert(&mut self) {
        self.polygons.iter_mut().for_each(Polygon::flip);
        if let Some(plane) = self.plane.as_mut() {
            plane.flip();
        }
        self.children_mut().for_each(|child| child.invert());
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// The parts of `polygons` outside the solid this tree bounds.
    pub fn clip_polygons(&self, polygons: &[Polygon<S>]) -> Vec<Polygon<S>> {
        let Some(plane) = self.plane.as_ref() else {
            return polygons.to_vec();
        };

        let parts = Partition::of(plane, polygons);
        // Coplanar pieces facing the same way as the plane count as outside.
        let mut front = parts.coplanar_front;
        front.extend(parts.front);
        let mut back = parts.coplanar_back;
        back.extend(parts.back);

        let mut kept = match &self.front {
            Some(node) => node.clip_polygons(&front),
            None => front,
        };
        // Behind a leaf plane is inside.
        if let Some(node) = &self.back {
            kept.extend(node.clip_polygons(&back));
        }
        kept
    }

    /// Drop the parts of this tree's polygons that lie inside `other`.
    pub fn clip_to(&mut self, other: &Node<S>) {
        self.polygons = other.clip_polygons(&self.polygons);
        self.children_mut().for_each(|child| child.clip_to(other));
    }

    /// Every polygon in the tree, node polygons before front before back.
    pub fn all_polygons(&self) -> Vec<Polygon<S>> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<Polygon<S>>) {
        out.extend(self.polygons.iter().cloned());
        for child in self.front.iter().chain(self.back.iter()) {
            child.collect_into(out);
        }
    }

    /// Insert `polygons` into the tree, splitting them where they straddle a
    /// node plane. The first polygon's plane splits a node that has none yet.
    pub fn build(&mut self, polygons: &[Polygon<S>]) {
        let Some(first) = polygons.first() else {
            return;
        };
        let plane = self.plane.get_or_insert_with(|| first.plane.clone()).clone();

        let parts = Partition::of(&plane, polygons);
        self.polygons.extend(parts.coplanar_front);
        self.polygons.extend(parts.coplanar_back);

        for (child, list) in [(&mut self.front, parts.front), (&mut self.back, parts.back)] {
            if !list.is_empty() {
                child.get_or_insert_with(Box::default).build(&list);
            }
        }
    }
}
