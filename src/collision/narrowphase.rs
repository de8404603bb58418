use glam::Vec2;

use crate::{
    collision::{
        clipping::{clip_segment, ClipPlane},
        contact::ContactManifold,
    },
    config::DEFAULT_EPSILON,
    core::{
        rigidbody::RigidBody,
        shape::{Circle, Polygon, Shape},
    },
    utils::math::{approx_zero, non_positive},
};

/// Signature shared by every entry of the dispatch table.
type CollideFn = fn(&mut ContactManifold, &RigidBody, &RigidBody, f32);

/// Shape-pair routines indexed by `[kind_a][kind_b]`.
const DISPATCH: [[CollideFn; 2]; 2] = [
    [circle_to_circle, circle_to_polygon],
    [polygon_to_circle, polygon_to_polygon],
];

const BIAS_RELATIVE: f32 = 0.95;
const BIAS_ABSOLUTE: f32 = 0.01;

/// Narrow phase producing contact manifolds for body pairs.
#[derive(Debug, Clone, Copy)]
pub struct NarrowPhase {
    pub epsilon: f32,
}

impl Default for NarrowPhase {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl NarrowPhase {
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Builds the manifold for `a` against `b`. A manifold with zero
    /// contacts means the shapes do not touch.
    pub fn collide(&self, a: &RigidBody, b: &RigidBody) -> ContactManifold {
        let mut manifold = ContactManifold::new(a.id, b.id);
        let routine = DISPATCH[a.shape().kind() as usize][b.shape().kind() as usize];
        routine(&mut manifold, a, b, self.epsilon);
        manifold
    }
}

fn circle_of(body: &RigidBody) -> &Circle {
    match body.shape() {
        Shape::Circle(circle) => circle,
        Shape::Polygon(_) => unreachable!("dispatch table routed a polygon into a circle slot"),
    }
}

fn polygon_of(body: &RigidBody) -> &Polygon {
    match body.shape() {
        Shape::Polygon(polygon) => polygon,
        Shape::Circle(_) => unreachable!("dispatch table routed a circle into a polygon slot"),
    }
}

fn circle_to_circle(m: &mut ContactManifold, a: &RigidBody, b: &RigidBody, epsilon: f32) {
    let ra = circle_of(a).radius();
    let rb = circle_of(b).radius();

    let offset = b.position - a.position;
    let radius = ra + rb;
    let dist_sq = offset.length_squared();
    if dist_sq >= radius * radius {
        return;
    }

    let distance = dist_sq.sqrt();
    if approx_zero(distance, epsilon) {
        // Coincident centres: any axis works, pick +x.
        m.penetration = ra;
        m.normal = Vec2::X;
        m.push_contact(a.position);
    } else {
        m.penetration = radius - distance;
        m.normal = offset / distance;
        m.push_contact(m.normal * ra + a.position);
    }
}

fn circle_to_polygon(m: &mut ContactManifold, a: &RigidBody, b: &RigidBody, epsilon: f32) {
    let radius = circle_of(a).radius();
    let polygon = polygon_of(b);
    let rotation = polygon.orientation();

    // Circle centre in polygon space.
    let center = rotation.transpose() * (a.position - b.position);

    let mut separation = f32::MIN;
    let mut face = 0;
    for (i, (&vertex, &normal)) in polygon.vertices().iter().zip(polygon.normals()).enumerate() {
        let s = normal.dot(center - vertex);
        if s > radius {
            return;
        }
        if s > separation {
            separation = s;
            face = i;
        }
    }

    let v1 = polygon.vertices()[face];
    let v2 = polygon.vertices()[polygon.next_index(face)];

    if non_positive(separation, epsilon) {
        m.normal = -(rotation * polygon.normals()[face]);
        m.penetration = radius;
        m.push_contact(m.normal * radius + a.position);
        return;
    }

    m.penetration = radius - separation;

    let dot1 = (center - v1).dot(v2 - v1);
    let dot2 = (center - v2).dot(v1 - v2);

    if non_positive(dot1, epsilon) {
        if center.distance_squared(v1) > radius * radius {
            return;
        }
        m.normal = (rotation * (v1 - center)).normalize_or_zero();
        m.push_contact(rotation * v1 + b.position);
    } else if non_positive(dot2, epsilon) {
        if center.distance_squared(v2) > radius * radius {
            return;
        }
        m.normal = (rotation * (v2 - center)).normalize_or_zero();
        m.push_contact(rotation * v2 + b.position);
    } else {
        let face_normal = polygon.normals()[face];
        if (center - v1).dot(face_normal) > radius {
            return;
        }
        m.normal = -(rotation * face_normal);
        m.push_contact(m.normal * radius + a.position);
    }
}

fn polygon_to_circle(m: &mut ContactManifold, a: &RigidBody, b: &RigidBody, epsilon: f32) {
    circle_to_polygon(m, b, a, epsilon);
    m.normal = -m.normal;
}

/// Face of `a` with the largest signed separation from `b`, as
/// `(separation, face_index)`. A negative value is a penetration depth.
pub fn find_axis_least_penetration(a: &RigidBody, b: &RigidBody) -> (f32, usize) {
    let pa = polygon_of(a);
    let pb = polygon_of(b);
    let b_inv = pb.orientation().transpose();

    let mut best_distance = f32::MIN;
    let mut best_index = 0;
    for (i, (&vertex, &normal)) in pa.vertices().iter().zip(pa.normals()).enumerate() {
        // Face normal and vertex of A expressed in B's space.
        let n = b_inv * (pa.orientation() * normal);
        let support = pb.support(-n);
        let v = b_inv * (pa.orientation() * vertex + a.position - b.position);

        let d = n.dot(support - v);
        if d > best_distance {
            best_distance = d;
            best_index = i;
        }
    }
    (best_distance, best_index)
}

/// World-space endpoints of the face of `incident` most anti-parallel to
/// the reference face normal.
pub fn find_incident_face(
    reference: &RigidBody,
    incident: &RigidBody,
    reference_index: usize,
) -> [Vec2; 2] {
    let ref_poly = polygon_of(reference);
    let inc_poly = polygon_of(incident);

    let world_normal = ref_poly.orientation() * ref_poly.normals()[reference_index];
    let reference_normal = inc_poly.orientation().transpose() * world_normal;

    let mut incident_face = 0;
    let mut min_dot = f32::MAX;
    for (i, normal) in inc_poly.normals().iter().enumerate() {
        let dot = reference_normal.dot(*normal);
        if dot < min_dot {
            min_dot = dot;
            incident_face = i;
        }
    }

    [
        inc_poly.world_vertex(incident_face, incident.position),
        inc_poly.world_vertex(inc_poly.next_index(incident_face), incident.position),
    ]
}

/// `a ≥ b` with a bias that keeps the reference face stable across frames.
pub fn bias_greater_than(a: f32, b: f32, epsilon: f32) -> bool {
    a >= b * BIAS_RELATIVE + a * BIAS_ABSOLUTE - epsilon
}

fn polygon_to_polygon(m: &mut ContactManifold, a: &RigidBody, b: &RigidBody, epsilon: f32) {
    let (penetration_a, face_a) = find_axis_least_penetration(a, b);
    if penetration_a >= -epsilon {
        return;
    }
    let (penetration_b, face_b) = find_axis_least_penetration(b, a);
    if penetration_b >= -epsilon {
        return;
    }

    let (reference, incident, reference_index, flip) =
        if bias_greater_than(penetration_a, penetration_b, epsilon) {
            (a, b, face_a, false)
        } else {
            (b, a, face_b, true)
        };

    let mut incident_face = find_incident_face(reference, incident, reference_index);

    let ref_poly = polygon_of(reference);
    let v1 = ref_poly.world_vertex(reference_index, reference.position);
    let v2 = ref_poly.world_vertex(ref_poly.next_index(reference_index), reference.position);

    let side_normal = (v2 - v1).normalize();
    let ref_face_normal = Vec2::new(side_normal.y, -side_normal.x);
    let ref_offset = ref_face_normal.dot(v1);

    // Trim the incident face to the reference face's side planes.
    let negative_side = ClipPlane::new(-side_normal, -side_normal.dot(v1));
    if clip_segment(negative_side, &mut incident_face, epsilon) < 2 {
        return;
    }
    let positive_side = ClipPlane::new(side_normal, side_normal.dot(v2));
    if clip_segment(positive_side, &mut incident_face, epsilon) < 2 {
        return;
    }

    m.normal = if flip { -ref_face_normal } else { ref_face_normal };

    let mut depth = 0.0;
    for point in incident_face {
        let separation = ref_face_normal.dot(point) - ref_offset;
        if non_positive(separation, epsilon) {
            m.push_contact(point);
            depth -= separation;
        }
    }
    if m.contact_count() > 0 {
        m.penetration = (depth / m.contact_count() as f32).max(0.0);
    }
}
