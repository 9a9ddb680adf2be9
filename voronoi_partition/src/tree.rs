// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partition arena: units, insertion, layer resolution and nearest-feature queries.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use smallvec::SmallVec;

use crate::adapter::DimensionAdapter;
use crate::bounds::UnitBounds;
use crate::direction::{Direction, Directions, Quadrant};
use crate::error::PartitionError;
use crate::feature::{Feature, WeightedFeature};
use crate::settings::PartitionSettings;

/// Below this many features in the query's quadrant, a fragment searches its
/// whole subtree instead of descending further.
const SECTOR_SEARCH_THRESHOLD: usize = 5;

/// Identifier for an allocated unit of a [`Voronoi`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnitId(u32);

impl UnitId {
    const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "Unit ids are intentionally 32-bit; a tree never holds 2^32 units."
    )]
    const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A quadrant of a fragment that has never been populated.
///
/// Empty units are never stored. Their geometry is derived on demand from
/// the parent fragment, so looking at them allocates nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EmptyUnit {
    parent: UnitId,
    quadrant: Quadrant,
}

impl EmptyUnit {
    /// The fragment this quadrant belongs to.
    pub fn parent(self) -> UnitId {
        self.parent
    }

    /// Which quadrant of the parent this is.
    pub fn quadrant(self) -> Quadrant {
        self.quadrant
    }
}

/// Reference to a unit, allocated or not.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnitRef {
    /// A fragment or chunk stored in the arena.
    Allocated(UnitId),
    /// A quadrant that was never populated.
    Empty(EmptyUnit),
}

impl From<UnitId> for UnitRef {
    fn from(id: UnitId) -> Self {
        Self::Allocated(id)
    }
}

/// Kind of a unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Interior unit with up to four lazily created quadrants.
    Fragment,
    /// Leaf unit storing features.
    Chunk,
    /// Never populated quadrant.
    Empty,
}

#[derive(Clone, Debug)]
enum Node<D, T> {
    Fragment {
        quadrants: [Option<UnitId>; 4],
        feature_count: usize,
    },
    Chunk {
        features: Vec<Feature<D, T>>,
    },
}

impl<D, T> Node<D, T> {
    const fn fragment() -> Self {
        Self::Fragment {
            quadrants: [None; 4],
            feature_count: 0,
        }
    }
}

#[derive(Clone, Debug)]
struct Unit<D, T> {
    parent: Option<UnitId>,
    bounds: UnitBounds<D>,
    node: Node<D, T>,
}

/// Snapshot of the shape of a partition, for diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartitionStats {
    /// Allocated fragments, including the root.
    pub fragments: usize,
    /// Allocated chunks.
    pub chunks: usize,
    /// Stored features.
    pub features: usize,
    /// Deepest layer of any allocated unit (the root is layer 0).
    pub max_layer: usize,
}

/// A lazily subdivided quad-partition answering nearest-feature queries.
///
/// The root covers `settings.center ± settings.radius` and splits into four
/// quadrants, each of which splits again until a unit's side length no longer
/// exceeds `settings.min_leaf_size`. Interior units are *fragments*, leaves
/// are *chunks*. Quadrants are only allocated when a feature is inserted into
/// them (or [`chunk_at`][Self::chunk_at] asks for them); untouched quadrants
/// are reported as [empty units][UnitKind::Empty].
///
/// Nearest-feature queries descend towards the query point while the
/// quadrant holding it is dense, search locally, and then look one hop across
/// every border the local winner is closer to than it is to the query point.
/// The border check is measured from the local winner, not from the query,
/// so the answer is an approximation: it may miss the true nearest feature,
/// even for uniformly distributed features.
///
/// ## Example
///
/// ```rust
/// use kurbo::Point;
/// use voronoi_partition::{EuclideanAdapter, Feature, PartitionSettings, Voronoi};
///
/// let settings = PartitionSettings::new(1000, Point::ZERO, 16);
/// let mut voronoi = Voronoi::create(settings, EuclideanAdapter);
/// voronoi.add_feature(Feature::new(Point::new(-10.0, 0.0), "west"));
/// voronoi.add_feature(Feature::new(Point::new(10.0, 0.0), "east"));
///
/// let nearest = voronoi.closest_feature(Point::new(3.0, 1.0)).unwrap();
/// assert_eq!(*nearest.feature().payload(), "east");
/// ```
pub struct Voronoi<A: DimensionAdapter, T> {
    settings: PartitionSettings<A::Dim>,
    adapter: A,
    units: Vec<Unit<A::Dim, T>>,
}

impl<A: DimensionAdapter, T> Debug for Voronoi<A, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("Voronoi")
            .field("settings", &self.settings)
            .field("fragments", &stats.fragments)
            .field("chunks", &stats.chunks)
            .field("features", &stats.features)
            .field("max_layer", &stats.max_layer)
            .finish_non_exhaustive()
    }
}

impl<A: DimensionAdapter, T> Voronoi<A, T> {
    /// Create an empty partition.
    ///
    /// # Panics
    ///
    /// Panics if the settings do not [validate][PartitionSettings::validate].
    pub fn create(settings: PartitionSettings<A::Dim>, adapter: A) -> Self {
        match Self::try_create(settings, adapter) {
            Ok(voronoi) => voronoi,
            Err(err) => panic!("{err}"),
        }
    }

    /// Create an empty partition, rejecting invalid settings.
    pub fn try_create(
        settings: PartitionSettings<A::Dim>,
        adapter: A,
    ) -> Result<Self, PartitionError> {
        settings.validate()?;
        let bounds = UnitBounds::around(&adapter, settings.center, settings.root_size());
        Ok(Self {
            units: vec![Unit {
                parent: None,
                bounds,
                node: Node::fragment(),
            }],
            settings,
            adapter,
        })
    }

    /// Settings the partition was created with.
    pub fn settings(&self) -> &PartitionSettings<A::Dim> {
        &self.settings
    }

    /// Adapter used for all coordinate math.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Read handle for the root fragment.
    pub fn root(&self) -> UnitView<'_, A, T> {
        self.view(UnitRef::Allocated(UnitId::ROOT))
    }

    /// Read handle for any unit of this partition.
    ///
    /// # Panics
    ///
    /// Panics if the reference was not produced by this partition.
    pub fn unit(&self, unit: impl Into<UnitRef>) -> UnitView<'_, A, T> {
        self.view(unit.into())
    }

    /// Insert a feature, allocating the units on its path as needed.
    ///
    /// Features outside the domain are kept in the border chunk nearest to
    /// them.
    pub fn add_feature(&mut self, feature: Feature<A::Dim, T>) {
        self.insert_from(UnitId::ROOT, feature);
    }

    /// Insert a feature below `unit`, returning the chunk that stored it.
    ///
    /// The feature is routed inside `unit` even if it lies outside its bounds.
    /// Empty units cannot hold features.
    pub fn add_feature_in(
        &mut self,
        unit: UnitRef,
        feature: Feature<A::Dim, T>,
    ) -> Result<UnitId, PartitionError> {
        match unit {
            UnitRef::Allocated(id) => Ok(self.insert_from(id, feature)),
            UnitRef::Empty(_) => Err(PartitionError::UnsupportedOperation("add_feature")),
        }
    }

    /// Reserve room for at least `additional` more units.
    pub fn reserve(&mut self, additional: usize) {
        self.units.reserve(additional);
    }

    /// The chunk responsible for `point`, allocating it if needed.
    pub fn chunk_at(&mut self, point: A::Dim) -> UnitId {
        self.descend_allocating(UnitId::ROOT, point)
    }

    /// The chunk below `unit` responsible for `point`, allocating it if needed.
    pub fn chunk_in(&mut self, unit: UnitRef, point: A::Dim) -> Result<UnitId, PartitionError> {
        match unit {
            UnitRef::Allocated(id) => Ok(self.descend_allocating(id, point)),
            UnitRef::Empty(_) => Err(PartitionError::UnsupportedOperation("chunk_at")),
        }
    }

    /// The feature nearest to `point`, or `None` if the partition is empty.
    pub fn closest_feature(&self, point: A::Dim) -> Option<WeightedFeature<'_, A::Dim, T>> {
        self.root().closest_feature(point)
    }

    /// Total number of stored features.
    pub fn feature_count(&self) -> usize {
        self.count_in(UnitRef::Allocated(UnitId::ROOT))
    }

    /// Whether no feature has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.feature_count() == 0
    }

    /// The unit `count` layers below the root on the path to `point`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is deeper than the chunk level.
    pub fn retrieve_layer_unit(&self, point: A::Dim, count: usize) -> UnitView<'_, A, T> {
        self.root().retrieve_layer_unit(point, count)
    }

    /// Upper left and lower right corners of the whole domain.
    pub fn bounds(&self) -> (A::Dim, A::Dim) {
        self.root().bounds()
    }

    /// Count units and features, and find the deepest layer.
    pub fn stats(&self) -> PartitionStats {
        let mut stats = PartitionStats::default();
        // Children are always pushed after their parent, so one forward pass
        // sees every parent's layer before its children.
        let mut layers = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            let layer = unit.parent.map_or(0, |p| layers[p.idx()] + 1);
            layers.push(layer);
            stats.max_layer = stats.max_layer.max(layer);
            match &unit.node {
                Node::Fragment { .. } => stats.fragments += 1,
                Node::Chunk { features } => {
                    stats.chunks += 1;
                    stats.features += features.len();
                }
            }
        }
        stats
    }

    fn view(&self, unit: UnitRef) -> UnitView<'_, A, T> {
        let bounds = match unit {
            UnitRef::Allocated(id) => Cow::Borrowed(&self.units[id.idx()].bounds),
            UnitRef::Empty(empty) => Cow::Owned(
                self.units[empty.parent.idx()]
                    .bounds
                    .quadrant(&self.adapter, empty.quadrant),
            ),
        };
        UnitView {
            tree: self,
            unit,
            bounds,
        }
    }

    fn kind_of(&self, unit: UnitRef) -> UnitKind {
        match unit {
            UnitRef::Allocated(id) => match self.units[id.idx()].node {
                Node::Fragment { .. } => UnitKind::Fragment,
                Node::Chunk { .. } => UnitKind::Chunk,
            },
            UnitRef::Empty(_) => UnitKind::Empty,
        }
    }

    fn count_in(&self, unit: UnitRef) -> usize {
        match unit {
            UnitRef::Allocated(id) => match &self.units[id.idx()].node {
                Node::Fragment { feature_count, .. } => *feature_count,
                Node::Chunk { features } => features.len(),
            },
            UnitRef::Empty(_) => 0,
        }
    }

    fn parent_of(&self, unit: UnitRef) -> Option<UnitId> {
        match unit {
            UnitRef::Allocated(id) => self.units[id.idx()].parent,
            UnitRef::Empty(empty) => Some(empty.parent),
        }
    }

    /// Quadrant of fragment `id`, or the empty view of it if not allocated.
    fn quadrant_or_empty(&self, id: UnitId, quadrant: Quadrant) -> UnitRef {
        match &self.units[id.idx()].node {
            Node::Fragment { quadrants, .. } => match quadrants[quadrant.slot()] {
                Some(child) => UnitRef::Allocated(child),
                None => UnitRef::Empty(EmptyUnit {
                    parent: id,
                    quadrant,
                }),
            },
            Node::Chunk { .. } => unreachable!("chunks have no quadrants"),
        }
    }

    fn route(&self, id: UnitId, point: A::Dim) -> Quadrant {
        self.units[id.idx()].bounds.quadrant_of(&self.adapter, point)
    }

    fn descend_allocating(&mut self, from: UnitId, point: A::Dim) -> UnitId {
        let mut id = from;
        loop {
            let (quadrant, existing) = match &self.units[id.idx()].node {
                Node::Chunk { .. } => return id,
                Node::Fragment { quadrants, .. } => {
                    let quadrant = self.route(id, point);
                    (quadrant, quadrants[quadrant.slot()])
                }
            };
            id = match existing {
                Some(child) => child,
                None => self.allocate_quadrant(id, quadrant),
            };
        }
    }

    fn allocate_quadrant(&mut self, parent: UnitId, quadrant: Quadrant) -> UnitId {
        let bounds = self.units[parent.idx()]
            .bounds
            .quadrant(&self.adapter, quadrant);
        let node = if bounds.size() > f64::from(self.settings.min_leaf_size) {
            Node::fragment()
        } else {
            Node::Chunk {
                features: Vec::new(),
            }
        };
        let id = UnitId::new(self.units.len());
        self.units.push(Unit {
            parent: Some(parent),
            bounds,
            node,
        });
        if let Node::Fragment { quadrants, .. } = &mut self.units[parent.idx()].node {
            debug_assert!(
                quadrants[quadrant.slot()].is_none(),
                "quadrant {quadrant:?} allocated twice"
            );
            quadrants[quadrant.slot()] = Some(id);
        }
        id
    }

    fn insert_from(&mut self, from: UnitId, feature: Feature<A::Dim, T>) -> UnitId {
        let chunk = self.descend_allocating(from, feature.position());
        let Node::Chunk { features } = &mut self.units[chunk.idx()].node else {
            unreachable!("descent always ends in a chunk");
        };
        features.push(feature);

        let mut ancestor = self.units[chunk.idx()].parent;
        while let Some(id) = ancestor {
            let unit = &mut self.units[id.idx()];
            if let Node::Fragment { feature_count, .. } = &mut unit.node {
                *feature_count += 1;
            }
            ancestor = unit.parent;
        }
        chunk
    }

    fn visit_features<'a, F>(&'a self, unit: UnitRef, mut f: F)
    where
        F: FnMut(&'a Feature<A::Dim, T>),
    {
        let UnitRef::Allocated(start) = unit else {
            return;
        };
        let mut stack: SmallVec<[UnitId; 16]> = SmallVec::new();
        stack.push(start);
        while let Some(id) = stack.pop() {
            match &self.units[id.idx()].node {
                Node::Chunk { features } => features.iter().for_each(&mut f),
                Node::Fragment { quadrants, .. } => {
                    // Reversed so that quadrants are visited in slot order.
                    stack.extend(quadrants.iter().rev().flatten().copied());
                }
            }
        }
    }

    fn nearest_in<'a>(
        &'a self,
        unit: UnitRef,
        point: A::Dim,
    ) -> Option<WeightedFeature<'a, A::Dim, T>> {
        let mut best: Option<WeightedFeature<'a, A::Dim, T>> = None;
        self.visit_features(unit, |feature| {
            let weighted = WeightedFeature::weigh(&self.adapter, point, feature);
            if best.is_none_or(|b| weighted < b) {
                best = Some(weighted);
            }
        });
        best
    }
}

impl<A: DimensionAdapter, T> Extend<Feature<A::Dim, T>> for Voronoi<A, T> {
    fn extend<I: IntoIterator<Item = Feature<A::Dim, T>>>(&mut self, iter: I) {
        for feature in iter {
            self.add_feature(feature);
        }
    }
}

/// Read handle for one unit of a [`Voronoi`].
///
/// Views are cheap to create. For [empty units][UnitKind::Empty] the bounds
/// are computed when the view is made; allocated units borrow theirs.
pub struct UnitView<'a, A: DimensionAdapter, T> {
    tree: &'a Voronoi<A, T>,
    unit: UnitRef,
    bounds: Cow<'a, UnitBounds<A::Dim>>,
}

impl<A: DimensionAdapter, T> Debug for UnitView<'_, A, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UnitView")
            .field("unit", &self.unit)
            .field("kind", &self.kind())
            .field("center", &self.center())
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

impl<'a, A: DimensionAdapter, T> UnitView<'a, A, T> {
    /// Reference to this unit.
    pub fn id(&self) -> UnitRef {
        self.unit
    }

    /// Fragment, chunk or empty.
    pub fn kind(&self) -> UnitKind {
        self.tree.kind_of(self.unit)
    }

    /// The enclosing fragment, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        let parent = self.tree.parent_of(self.unit)?;
        Some(self.tree.view(UnitRef::Allocated(parent)))
    }

    /// One quadrant of this unit, or `None` unless this is a fragment.
    ///
    /// Quadrants that were never populated are returned as empty units.
    pub fn quadrant(&self, quadrant: Quadrant) -> Option<Self> {
        match self.unit {
            UnitRef::Allocated(id) if self.kind() == UnitKind::Fragment => {
                Some(self.tree.view(self.tree.quadrant_or_empty(id, quadrant)))
            }
            _ => None,
        }
    }

    /// Center of the unit.
    pub fn center(&self) -> A::Dim {
        self.bounds.center()
    }

    /// Side length of the unit.
    pub fn size(&self) -> f64 {
        self.bounds.size()
    }

    /// Whether no feature is stored in or below this unit.
    pub fn is_empty(&self) -> bool {
        self.feature_count() == 0
    }

    /// Number of features stored in or below this unit.
    pub fn feature_count(&self) -> usize {
        self.tree.count_in(self.unit)
    }

    /// Features stored in or below this unit.
    pub fn features(&self) -> impl Iterator<Item = &'a Feature<A::Dim, T>> {
        let mut out = Vec::with_capacity(self.feature_count());
        self.tree.visit_features(self.unit, |f| out.push(f));
        out.into_iter()
    }

    /// Upper left (north west) corner.
    pub fn corner_upper_left(&self) -> A::Dim {
        self.bounds.corner_upper_left(&self.tree.adapter)
    }

    /// Lower right (south east) corner.
    pub fn corner_lower_right(&self) -> A::Dim {
        self.bounds.corner_lower_right(&self.tree.adapter)
    }

    /// Upper left and lower right corners.
    ///
    /// The right and upper borders are exclusive; see [`contains`][Self::contains].
    pub fn bounds(&self) -> (A::Dim, A::Dim) {
        (self.corner_upper_left(), self.corner_lower_right())
    }

    /// Whether `point` lies inside the unit.
    ///
    /// South and west borders are inclusive, north and east borders exclusive,
    /// so the four quadrants of a fragment never overlap and leave no gaps.
    pub fn contains(&self, point: A::Dim) -> bool {
        self.bounds.contains(&self.tree.adapter, point)
    }

    /// Corner (diagonal directions) or edge midpoint (others) of the unit.
    pub fn border_point(&self, direction: Direction) -> A::Dim {
        self.bounds.border_point(&self.tree.adapter, direction)
    }

    /// Distance from `point` to a corner, or to the line of an edge.
    pub fn border_distance(&self, direction: Direction, point: A::Dim) -> f64 {
        self.bounds
            .border_distance(&self.tree.adapter, direction, point)
    }

    /// Borders strictly closer to `point` than `threshold`.
    pub fn borders_closer_than(&self, point: A::Dim, threshold: f64) -> Directions {
        self.bounds
            .borders_closer_than(&self.tree.adapter, point, threshold)
    }

    /// Smallest [`border_distance`][Self::border_distance] over all directions.
    pub fn nearest_border_distance(&self, point: A::Dim) -> f64 {
        self.bounds
            .nearest_border_distance(&self.tree.adapter, point)
    }

    /// Layer of this unit; the root is layer 0.
    ///
    /// An empty unit reports the layer of the fragment it belongs to.
    pub fn layer_count(&self) -> usize {
        let mut layer = 0;
        let mut ancestor = match self.unit {
            UnitRef::Allocated(id) => self.tree.units[id.idx()].parent,
            UnitRef::Empty(empty) => return self.tree.unit(empty.parent).layer_count(),
        };
        while let Some(id) = ancestor {
            layer += 1;
            ancestor = self.tree.units[id.idx()].parent;
        }
        layer
    }

    /// The unit `count` layers below this one on the path to `point`.
    ///
    /// Never populated quadrants along the way are returned as empty units.
    ///
    /// # Panics
    ///
    /// Panics if the path reaches a chunk before `count` layers were walked.
    pub fn retrieve_layer_unit(&self, point: A::Dim, count: usize) -> Self {
        match self.try_retrieve_layer_unit(point, count) {
            Ok(view) => view,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible [`retrieve_layer_unit`][Self::retrieve_layer_unit].
    pub fn try_retrieve_layer_unit(
        &self,
        point: A::Dim,
        count: usize,
    ) -> Result<Self, PartitionError> {
        let tree = self.tree;
        let mut unit = self.unit;
        let mut remaining = count;
        while remaining > 0 {
            let UnitRef::Allocated(id) = unit else {
                break;
            };
            match tree.units[id.idx()].node {
                Node::Chunk { .. } => {
                    return Err(PartitionError::OutOfRange {
                        requested: remaining,
                    });
                }
                Node::Fragment { .. } => {
                    unit = tree.quadrant_or_empty(id, tree.route(id, point));
                    remaining -= 1;
                }
            }
        }
        Ok(tree.view(unit))
    }

    /// The unit of the same layer just across `direction`.
    ///
    /// The border point is stepped half a unit across the border, which lands
    /// on the center of the adjacent unit whatever the unit size.
    /// Returns `None` when the border is also a border of the whole domain.
    pub fn neighbor(&self, direction: Direction) -> Option<Self> {
        let tree = self.tree;
        let adapter = &tree.adapter;
        let (dx, dz) = direction.step();
        let half = self.size() / 2.0;
        let border = self.border_point(direction);
        let target = adapter.with_z(
            adapter.with_x(border, adapter.x(border) + f64::from(dx) * half),
            adapter.z(border) + f64::from(dz) * half,
        );
        if self.contains(target) {
            return Some(tree.view(self.unit));
        }

        let mut layer = 1;
        let mut ancestor = tree.parent_of(self.unit);
        while let Some(id) = ancestor {
            let view = tree.view(UnitRef::Allocated(id));
            if view.contains(target) {
                let found = view.try_retrieve_layer_unit(target, layer);
                debug_assert!(
                    found.is_ok(),
                    "every layer above an existing unit is made of fragments"
                );
                return found.ok();
            }
            ancestor = tree.units[id.idx()].parent;
            layer += 1;
        }
        None
    }

    /// All features of this unit weighted against `point`, nearest first.
    ///
    /// Features at equal distance keep their storage order.
    pub fn weight_features(&self, point: A::Dim) -> Vec<WeightedFeature<'a, A::Dim, T>> {
        let adapter = &self.tree.adapter;
        let mut weighted: Vec<_> = self
            .features()
            .map(|f| WeightedFeature::weigh(adapter, point, f))
            .collect();
        weighted.sort();
        weighted
    }

    /// The feature nearest to `point`, or `None` if there is none.
    ///
    /// A fragment descends into the quadrant holding `point` as long as that
    /// quadrant holds at least a handful of features; otherwise it searches
    /// its own subtree. The unit finally searched also looks one hop across
    /// every border its local winner is closer to than to `point`.
    ///
    /// # Panics
    ///
    /// Panics on an empty unit.
    pub fn closest_feature(&self, point: A::Dim) -> Option<WeightedFeature<'a, A::Dim, T>> {
        match self.try_closest_feature(point) {
            Ok(found) => found,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible [`closest_feature`][Self::closest_feature].
    pub fn try_closest_feature(
        &self,
        point: A::Dim,
    ) -> Result<Option<WeightedFeature<'a, A::Dim, T>>, PartitionError> {
        let tree = self.tree;
        let mut unit = self.unit;
        loop {
            let UnitRef::Allocated(id) = unit else {
                return Err(PartitionError::UnsupportedOperation("closest_feature"));
            };
            if let Node::Chunk { .. } = tree.units[id.idx()].node {
                break;
            }
            let sector = tree.quadrant_or_empty(id, tree.route(id, point));
            if tree.count_in(sector) < SECTOR_SEARCH_THRESHOLD {
                break;
            }
            unit = sector;
        }
        Ok(tree.view(unit).closest_across_borders(point))
    }

    fn closest_across_borders(&self, point: A::Dim) -> Option<WeightedFeature<'a, A::Dim, T>> {
        let tree = self.tree;
        let local = tree.nearest_in(self.unit, point)?;

        let position = local.feature().position();
        let threshold = tree.adapter.distance(position, point);
        let borders = self.borders_closer_than(position, threshold);

        let mut neighbors: SmallVec<[UnitRef; 8]> = SmallVec::new();
        for direction in borders.directions() {
            let Some(neighbor) = self.neighbor(direction) else {
                continue;
            };
            let id = neighbor.id();
            if id != self.unit && !neighbors.contains(&id) {
                neighbors.push(id);
            }
        }

        let mut best: Option<WeightedFeature<'a, A::Dim, T>> = None;
        for unit in neighbors {
            if let Some(candidate) = tree.nearest_in(unit, point)
                && best.is_none_or(|b| candidate < b)
            {
                best = Some(candidate);
            }
        }

        match best {
            Some(other) if local.distance_squared() > other.distance_squared() => Some(other),
            _ => Some(local),
        }
    }
}
