use std::f32::consts::PI;

use glam::{Mat2, Vec2};

use crate::{
    collision::aabb::BoundingBox,
    core::types::MassProperties,
    error::ShapeError,
    utils::math::{cross, rotation},
};

/// Upper bound on the number of polygon vertices.
pub const MAX_POLYGON_VERTICES: usize = 64;

/// Squared edge length (and doubled area) below which geometry is degenerate.
const GEOMETRY_EPSILON: f32 = 1e-10;

/// Discriminant used to index the narrow-phase dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle = 0,
    Polygon = 1,
}

/// Solid disc centred on the body position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self, ShapeError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// Convex polygon stored in local space around its centroid.
///
/// Vertices wind counter-clockwise and `normals[i]` is the outward unit
/// normal of the edge `vertices[i] -> vertices[(i + 1) % n]`. The
/// orientation matrix mirrors the owning body's angle so the narrow phase
/// can move between local and world space without touching the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
    orientation: Mat2,
}

impl Polygon {
    /// Axis-aligned rectangle of the given full width and height.
    pub fn rectangle(width: f32, height: f32) -> Result<Self, ShapeError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ShapeError::InvalidDimensions { width, height });
        }
        let hw = width * 0.5;
        let hh = height * 0.5;
        Ok(Self {
            vertices: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
            normals: vec![Vec2::NEG_Y, Vec2::X, Vec2::Y, Vec2::NEG_X],
            orientation: Mat2::IDENTITY,
        })
    }

    /// Regular polygon with `sides` vertices on a circle of `radius`.
    pub fn regular(sides: usize, radius: f32) -> Result<Self, ShapeError> {
        if sides < 3 {
            return Err(ShapeError::TooFewVertices { count: sides });
        }
        if sides > MAX_POLYGON_VERTICES {
            return Err(ShapeError::TooManyVertices {
                count: sides,
                max: MAX_POLYGON_VERTICES,
            });
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ShapeError::InvalidRadius(radius));
        }
        let step = 2.0 * PI / sides as f32;
        let vertices = (0..sides)
            .map(|i| Vec2::from_angle(step * i as f32) * radius)
            .collect();
        Self::from_ccw_vertices(vertices)
    }

    /// Builds the convex hull of an arbitrary point cloud.
    ///
    /// Interior and collinear points are discarded; the surviving hull is
    /// re-centred on its centroid.
    pub fn from_points(points: &[Vec2]) -> Result<Self, ShapeError> {
        if points.len() < 3 {
            return Err(ShapeError::TooFewVertices {
                count: points.len(),
            });
        }
        if points.len() > MAX_POLYGON_VERTICES {
            return Err(ShapeError::TooManyVertices {
                count: points.len(),
                max: MAX_POLYGON_VERTICES,
            });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ShapeError::NonFiniteVertex { index });
        }

        let hull = convex_hull(points);
        if hull.len() < 3 {
            return Err(ShapeError::DegenerateHull);
        }
        Self::from_ccw_vertices(hull)
    }

    fn from_ccw_vertices(mut vertices: Vec<Vec2>) -> Result<Self, ShapeError> {
        let n = vertices.len();
        let mut normals = Vec::with_capacity(n);
        for i in 0..n {
            let face = vertices[(i + 1) % n] - vertices[i];
            if face.length_squared() < GEOMETRY_EPSILON {
                return Err(ShapeError::ZeroLengthEdge { index: i });
            }
            normals.push(Vec2::new(face.y, -face.x).normalize());
        }

        let (area, centroid) = area_and_centroid(&vertices);
        if area <= GEOMETRY_EPSILON {
            return Err(ShapeError::DegenerateHull);
        }
        for v in &mut vertices {
            *v -= centroid;
        }

        Ok(Self {
            vertices,
            normals,
            orientation: Mat2::IDENTITY,
        })
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn orientation(&self) -> Mat2 {
        self.orientation
    }

    pub fn set_orientation(&mut self, angle: f32) {
        self.orientation = rotation(angle);
    }

    /// Local vertex furthest along `direction` (local space).
    pub fn support(&self, direction: Vec2) -> Vec2 {
        let mut best = self.vertices[0];
        let mut best_projection = best.dot(direction);
        for &v in &self.vertices[1..] {
            let projection = v.dot(direction);
            if projection > best_projection {
                best_projection = projection;
                best = v;
            }
        }
        best
    }

    /// Vertex `index` transformed to world space for a body at `position`.
    pub fn world_vertex(&self, index: usize, position: Vec2) -> Vec2 {
        self.orientation * self.vertices[index] + position
    }

    /// Index of the vertex following `index`, wrapping around.
    pub fn next_index(&self, index: usize) -> usize {
        if index + 1 == self.vertices.len() {
            0
        } else {
            index + 1
        }
    }

    pub fn area(&self) -> f32 {
        area_and_centroid(&self.vertices).0
    }

    fn mass_properties(&self, density: f32) -> MassProperties {
        const INV3: f32 = 1.0 / 3.0;
        let mut area = 0.0;
        let mut inertia = 0.0;
        for (i, &p1) in self.vertices.iter().enumerate() {
            let p2 = self.vertices[self.next_index(i)];
            let d = cross(p1, p2);
            area += 0.5 * d;
            let int_x2 = p1.x * p1.x + p2.x * p1.x + p2.x * p2.x;
            let int_y2 = p1.y * p1.y + p2.y * p1.y + p2.y * p2.y;
            inertia += 0.25 * INV3 * d * (int_x2 + int_y2);
        }
        MassProperties {
            mass: density * area,
            inertia: density * inertia,
        }
    }
}

/// Collision geometry owned by a rigid body.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self, ShapeError> {
        Circle::new(radius).map(Shape::Circle)
    }

    pub fn rectangle(width: f32, height: f32) -> Result<Self, ShapeError> {
        Polygon::rectangle(width, height).map(Shape::Polygon)
    }

    pub fn polygon(points: &[Vec2]) -> Result<Self, ShapeError> {
        Polygon::from_points(points).map(Shape::Polygon)
    }

    pub fn regular_polygon(sides: usize, radius: f32) -> Result<Self, ShapeError> {
        Polygon::regular(sides, radius).map(Shape::Polygon)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Shape::Circle(circle) => Some(circle),
            Shape::Polygon(_) => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            Shape::Circle(_) => None,
        }
    }

    pub fn area(&self) -> f32 {
        match self {
            Shape::Circle(circle) => PI * circle.radius * circle.radius,
            Shape::Polygon(polygon) => polygon.area(),
        }
    }

    /// Mass and rotational inertia about the centroid for a given density.
    pub fn mass_properties(&self, density: f32) -> MassProperties {
        match self {
            Shape::Circle(circle) => {
                let mass = PI * circle.radius * circle.radius * density;
                MassProperties {
                    mass,
                    inertia: mass * circle.radius * circle.radius,
                }
            }
            Shape::Polygon(polygon) => polygon.mass_properties(density),
        }
    }

    /// World-space bounding box for a body at `position`.
    pub fn bounding_box(&self, position: Vec2) -> BoundingBox {
        match self {
            Shape::Circle(circle) => {
                BoundingBox::from_center_half_extents(position, Vec2::splat(circle.radius))
            }
            Shape::Polygon(polygon) => {
                let corners =
                    (0..polygon.vertex_count()).map(|i| polygon.world_vertex(i, position));
                // Polygons always carry at least three vertices.
                BoundingBox::from_points(corners)
                    .unwrap_or_else(|| BoundingBox::new(position, position))
            }
        }
    }

    /// Keeps the local orientation matrix in sync with the body angle.
    pub fn set_orientation(&mut self, angle: f32) {
        if let Shape::Polygon(polygon) = self {
            polygon.set_orientation(angle);
        }
    }
}

/// Andrew's monotone chain; returns the hull counter-clockwise without
/// collinear points.
fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    let turn = |o: Vec2, a: Vec2, b: Vec2| cross(a - o, b - o);

    let mut lower: Vec<Vec2> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Vec2> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn area_and_centroid(vertices: &[Vec2]) -> (f32, Vec2) {
    let n = vertices.len();
    let mut area = 0.0;
    let mut centroid = Vec2::ZERO;
    for i in 0..n {
        let p1 = vertices[i];
        let p2 = vertices[(i + 1) % n];
        let triangle_area = 0.5 * cross(p1, p2);
        area += triangle_area;
        centroid += (p1 + p2) * (triangle_area / 3.0);
    }
    if area.abs() <= GEOMETRY_EPSILON {
        return (area, Vec2::ZERO);
    }
    (area, centroid / area)
}
