use glam::Vec2;

/// Half-plane `normal · p ≤ offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlane {
    pub normal: Vec2,
    pub offset: f32,
}

impl ClipPlane {
    pub fn new(normal: Vec2, offset: f32) -> Self {
        Self { normal, offset }
    }

    pub fn signed_distance(&self, point: Vec2) -> f32 {
        self.normal.dot(point) - self.offset
    }
}

/// Clips the segment `face` against `plane`, writing the kept points back
/// into `face` and returning how many survived.
///
/// A point is kept when its signed distance is `≤ epsilon`. The crossing
/// point is added only when exactly one endpoint is kept, so the result
/// holds at most two points. Entries past the returned count are stale.
pub fn clip_segment(plane: ClipPlane, face: &mut [Vec2; 2], epsilon: f32) -> usize {
    let mut out = [Vec2::ZERO; 3];
    let mut count = 0;

    let d1 = plane.signed_distance(face[0]);
    let d2 = plane.signed_distance(face[1]);
    let inside1 = d1 <= epsilon;
    let inside2 = d2 <= epsilon;

    if inside1 {
        out[count] = face[0];
        count += 1;
    }
    if inside2 {
        out[count] = face[1];
        count += 1;
    }
    if inside1 != inside2 {
        let alpha = (d1 / (d1 - d2)).clamp(0.0, 1.0);
        out[count] = face[0] + (face[1] - face[0]) * alpha;
        count += 1;
    }

    assert!(count <= 2, "segment clip produced {count} points");

    face[..count].copy_from_slice(&out[..count]);
    count
}
