//! Derived state rebuilt after every load.
//!
//! Steps run in a fixed order, each reading only what earlier steps wrote:
//! endpoint membership, polygon concavity, platform pairing, side
//! back-references, line heights. Out-of-range indexes are treated as "none";
//! nothing here fails.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::Level;
use crate::map::{Line, Platform, Point, Polygon, Side};

/// `index` as a list position, if it addresses an element of a list of `len`
pub fn checked(index: i16, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

/// Which polygons and lines touch each point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointMembership {
    pub polygons: Vec<BTreeSet<usize>>,
    pub lines: Vec<BTreeSet<usize>>,
}

impl EndpointMembership {
    pub fn build(point_count: usize, lines: &[Line], polygons: &[Polygon]) -> Self {
        let mut membership = Self {
            polygons: vec![BTreeSet::new(); point_count],
            lines: vec![BTreeSet::new(); point_count],
        };

        for (p, polygon) in polygons.iter().enumerate() {
            for &vertex in polygon.vertices() {
                if let Some(v) = checked(vertex, point_count) {
                    membership.polygons[v].insert(p);
                }
            }
        }
        for (l, line) in lines.iter().enumerate() {
            for endpoint in line.endpoint_indexes {
                if let Some(e) = checked(endpoint, point_count) {
                    membership.lines[e].insert(l);
                }
            }
        }
        membership
    }
}

/// Any left turn while walking the stored (clockwise) vertex order makes
/// the polygon concave. Straight runs do not. Fewer than three vertices,
/// or a vertex outside the point list, count as concave.
pub fn is_concave(points: &[Point], polygon: &Polygon) -> bool {
    let vertices = polygon.vertices();
    if vertices.len() < 3 {
        return true;
    }

    let mut corners = Vec::with_capacity(vertices.len());
    for &vertex in vertices {
        match checked(vertex, points.len()) {
            Some(v) => corners.push(points[v]),
            None => return true,
        }
    }

    let n = corners.len();
    (0..n).any(|i| {
        let a = corners[i];
        let b = corners[(i + 1) % n];
        let c = corners[(i + 2) % n];
        let (ux, uy) = (i64::from(b.x) - i64::from(a.x), i64::from(b.y) - i64::from(a.y));
        let (vx, vy) = (i64::from(c.x) - i64::from(b.x), i64::from(c.y) - i64::from(b.y));
        ux * vy - uy * vx < 0
    })
}

/// Point every platform-typed polygon at its platform record, creating a
/// default door for polygons that have none. Returns how many were created.
pub fn pair_platforms(polygons: &mut [Polygon], platforms: &mut Vec<Platform>) -> usize {
    let mut created = 0;
    for (p, polygon) in polygons.iter_mut().enumerate() {
        if !polygon.is_platform() {
            continue;
        }
        let existing = platforms
            .iter()
            .position(|platform| usize::try_from(platform.polygon_index).ok() == Some(p));
        let index = match existing {
            Some(index) => index,
            None => {
                trace!(polygon = p, "creating platform for unpaired polygon");
                platforms.push(Platform {
                    polygon_index: p as i16,
                    ..Platform::default()
                });
                created += 1;
                platforms.len() - 1
            }
        };
        polygon.permutation = index as i16;
    }
    created
}

/// Clear every side's owner, then take it from the lines that declare the side
pub fn relink_sides(lines: &[Line], sides: &mut [Side]) {
    for side in sides.iter_mut() {
        side.line_index = -1;
        side.polygon_index = -1;
    }

    for (l, line) in lines.iter().enumerate() {
        let declared = [
            (line.clockwise_polygon_side_index, line.clockwise_polygon_owner),
            (line.counterclockwise_polygon_side_index, line.counterclockwise_polygon_owner),
        ];
        for (side_index, owner) in declared {
            match checked(side_index, sides.len()) {
                Some(s) => {
                    sides[s].line_index = l as i16;
                    sides[s].polygon_index = owner;
                }
                None if side_index >= 0 => {
                    trace!(line = l, side = side_index, "line declares a missing side");
                }
                None => {}
            }
        }
    }
}

/// Highest floor and lowest ceiling across the line's owners (0 without
/// owners); variable-elevation lines are solid when the two meet.
pub fn update_line_heights(lines: &mut [Line], polygons: &[Polygon]) {
    for line in lines.iter_mut() {
        let owners: Vec<&Polygon> = line
            .owners()
            .into_iter()
            .filter_map(|owner| checked(owner, polygons.len()).map(|p| &polygons[p]))
            .collect();

        line.highest_adjacent_floor = owners.iter().map(|p| p.floor_height).max().unwrap_or(0);
        line.lowest_adjacent_ceiling = owners.iter().map(|p| p.ceiling_height).min().unwrap_or(0);

        if line.variable_elevation() {
            line.set_solid(line.highest_adjacent_floor >= line.lowest_adjacent_ceiling);
        }
    }
}

pub fn reconcile(level: &mut Level) {
    let membership = EndpointMembership::build(level.points.len(), &level.lines, &level.polygons);
    level.endpoint_polygons = membership.polygons;
    level.endpoint_lines = membership.lines;

    let mut concave = 0;
    for polygon in level.polygons.iter_mut() {
        polygon.concave = is_concave(&level.points, polygon);
        concave += usize::from(polygon.concave);
    }

    let created = pair_platforms(&mut level.polygons, &mut level.platforms);
    relink_sides(&level.lines, &mut level.sides);
    update_line_heights(&mut level.lines, &level.polygons);

    debug!(concave, platforms_created = created, "reconciled level");
}
