/// Axis-aligned bounding box in integer surface units.
///
/// Bounds are inclusive on all four edges: a box covers
/// `[x, x + width] x [y, y + height]`. Zero-area boxes are legal and only
/// contain their edge points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Aabb {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Aabb {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn sized(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn top_left(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn top_right(&self) -> (i32, i32) {
        (self.right(), self.y)
    }

    pub fn bottom_left(&self) -> (i32, i32) {
        (self.x, self.bottom())
    }

    pub fn bottom_right(&self) -> (i32, i32) {
        (self.right(), self.bottom())
    }

    pub fn corners(&self) -> [(i32, i32); 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_left(),
            self.bottom_right(),
        ]
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Whether the boxes share at least one point, edges included.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Grows the box in place so that `(x, y)` lies inside it.
    ///
    /// At most one side moves per axis; a point already inside is a no-op.
    pub fn expand_to_contain_point(&mut self, x: i32, y: i32) -> &mut Self {
        if self.contains(x, y) {
            return self;
        }
        if x < self.x {
            self.width += self.x - x;
            self.x = x;
        } else if x > self.right() {
            self.width = x - self.x;
        }
        if y < self.y {
            self.height += self.y - y;
            self.y = y;
        } else if y > self.bottom() {
            self.height = y - self.y;
        }
        self
    }

    pub fn expand_to_contain_aabb(&mut self, other: &Aabb) -> &mut Self {
        for (x, y) in other.corners() {
            self.expand_to_contain_point(x, y);
        }
        self
    }

    /// Returns a translated copy; `self` is left untouched.
    pub fn translate(&self, dx: i32, dy: i32) -> Aabb {
        Aabb::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// The box grown by `margin` on every side.
    pub fn outset(&self, margin: i32) -> Aabb {
        Aabb::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }
}

/// Either a single box or a collection, for flattening appends.
#[derive(Clone, Debug)]
pub enum Region<'a> {
    Box(Aabb),
    Collection(&'a AabbCollection),
}

impl From<Aabb> for Region<'_> {
    fn from(aabb: Aabb) -> Self {
        Region::Box(aabb)
    }
}

impl<'a> From<&'a AabbCollection> for Region<'a> {
    fn from(coll: &'a AabbCollection) -> Self {
        Region::Collection(coll)
    }
}

/// Ordered union of independent boxes forming one clickable region.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AabbCollection {
    boxes: Vec<Aabb>,
}

impl AabbCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_regions<'a, I>(regions: I) -> Self
    where
        I: IntoIterator<Item = Region<'a>>,
    {
        Self::new().append(regions)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Aabb> {
        self.boxes.iter()
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.boxes.iter().any(|b| b.contains(x, y))
    }

    pub fn intersects(&self, aabb: &Aabb) -> bool {
        self.boxes.iter().any(|b| b.intersects(aabb))
    }

    /// Returns `self ++ regions`, flattening nested collections. The receiver is
    /// never modified.
    pub fn append<'a, I>(&self, regions: I) -> AabbCollection
    where
        I: IntoIterator<Item = Region<'a>>,
    {
        let mut boxes = self.boxes.clone();
        for region in regions {
            match region {
                Region::Box(b) => boxes.push(b),
                Region::Collection(c) => boxes.extend_from_slice(&c.boxes),
            }
        }
        AabbCollection { boxes }
    }

    pub fn with_box(&self, aabb: Aabb) -> AabbCollection {
        self.append([Region::Box(aabb)])
    }

    pub fn with_collection(&self, other: &AabbCollection) -> AabbCollection {
        self.append([Region::Collection(other)])
    }

    pub fn translate(&self, dx: i32, dy: i32) -> AabbCollection {
        AabbCollection {
            boxes: self.boxes.iter().map(|b| b.translate(dx, dy)).collect(),
        }
    }

    /// Smallest single box enclosing every member, if any.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.boxes.split_first()?;
        let mut out = *first;
        for b in rest {
            out.expand_to_contain_aabb(b);
        }
        Some(out)
    }
}

impl From<Aabb> for AabbCollection {
    fn from(aabb: Aabb) -> Self {
        AabbCollection { boxes: vec![aabb] }
    }
}

impl<'a> IntoIterator for &'a AabbCollection {
    type Item = &'a Aabb;
    type IntoIter = std::slice::Iter<'a, Aabb>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/geom.rs"]
mod tests;
