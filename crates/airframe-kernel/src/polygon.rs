//! Convex planar polygons and plane splitting.

use crate::math::{Point3, Vec3, PLANE_EPSILON};

/// An oriented plane `normal · p = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing to the front side.
    pub normal: Vec3,
    /// Signed distance from the origin along `normal`.
    pub w: f64,
}

/// Where a vertex or polygon lies relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Side {
    Coplanar = 0,
    Front = 1,
    Back = 2,
    Spanning = 3,
}

impl Side {
    fn from_bits(bits: u8) -> Self {
        match bits {
            0 => Self::Coplanar,
            1 => Self::Front,
            2 => Self::Back,
            _ => Self::Spanning,
        }
    }
}

/// Output buckets for [`Plane::split_polygon`].
#[derive(Debug, Default)]
pub(crate) struct Split {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

impl Plane {
    /// Plane through three points, oriented by their counter-clockwise order.
    ///
    /// Returns `None` for collinear or coincident points.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let n = (b - a).cross(&(c - a));
        let len = n.norm();
        if !len.is_finite() || len < f64::EPSILON {
            return None;
        }
        let normal = n / len;
        Some(Self {
            normal,
            w: normal.dot(&a.coords),
        })
    }

    /// Reverse the orientation.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Signed distance from the plane.
    pub fn distance(&self, p: &Point3) -> f64 {
        self.normal.dot(&p.coords) - self.w
    }

    fn side_of(&self, p: &Point3) -> Side {
        let t = self.distance(p);
        if t < -PLANE_EPSILON {
            Side::Back
        } else if t > PLANE_EPSILON {
            Side::Front
        } else {
            Side::Coplanar
        }
    }

    /// Classify `polygon` against this plane, splitting it if it spans.
    ///
    /// Coplanar polygons go to `coplanar_front` or `coplanar_back` depending on
    /// whether their normal agrees with this plane's.
    pub(crate) fn split_polygon(&self, polygon: Polygon, out: &mut Split) {
        let sides: Vec<Side> = polygon.vertices.iter().map(|v| self.side_of(v)).collect();
        let combined = sides.iter().fold(0u8, |acc, s| acc | *s as u8);

        match Side::from_bits(combined) {
            Side::Coplanar => {
                if self.normal.dot(&polygon.plane.normal) > 0.0 {
                    out.coplanar_front.push(polygon);
                } else {
                    out.coplanar_back.push(polygon);
                }
            }
            Side::Front => out.front.push(polygon),
            Side::Back => out.back.push(polygon),
            Side::Spanning => {
                let n = polygon.vertices.len();
                let mut front = Vec::with_capacity(n + 1);
                let mut back = Vec::with_capacity(n + 1);
                for i in 0..n {
                    let j = (i + 1) % n;
                    let (si, sj) = (sides[i], sides[j]);
                    let (vi, vj) = (polygon.vertices[i], polygon.vertices[j]);
                    if si != Side::Back {
                        front.push(vi);
                    }
                    if si != Side::Front {
                        back.push(vi);
                    }
                    if (si as u8 | sj as u8) == Side::Spanning as u8 {
                        let t = (self.w - self.normal.dot(&vi.coords))
                            / self.normal.dot(&(vj - vi));
                        let v = vi + (vj - vi) * t;
                        front.push(v);
                        back.push(v);
                    }
                }
                if front.len() >= 3 {
                    out.front.push(Polygon::with_plane(front, polygon.plane));
                }
                if back.len() >= 3 {
                    out.back.push(Polygon::with_plane(back, polygon.plane));
                }
            }
        }
    }
}

/// A convex planar polygon with counter-clockwise (outward-facing) winding.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Vertices in winding order.
    pub vertices: Vec<Point3>,
    /// Supporting plane.
    pub plane: Plane,
}

impl Polygon {
    /// Create a polygon from at least three non-collinear leading vertices.
    pub fn new(vertices: Vec<Point3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(&vertices[0], &vertices[1], &vertices[2])?;
        Some(Self { vertices, plane })
    }

    fn with_plane(vertices: Vec<Point3>, plane: Plane) -> Self {
        Self { vertices, plane }
    }

    /// Reverse winding and plane orientation.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: &Vec3) {
        for v in &mut self.vertices {
            *v += *offset;
        }
        self.plane.w += self.plane.normal.dot(offset);
    }

    /// Fan triangulation as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        (1..self.vertices.len() - 1)
            .map(move |i| [self.vertices[0], self.vertices[i], self.vertices[i + 1]])
    }
}
