use glam::Vec2;

use crate::world::HouseInfo;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchPoint {
    pub position: Vec2,
    pub visited: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct House {
    pub center: Vec2,
    pub size: Vec2,
    /// Where the agent entered, pushed outward. Starts at the center.
    pub door_location: Vec2,
    pub visited: bool,
    pub time_inside: f32,
    pub time_since_visit: f32,
    pub search_points: Vec<SearchPoint>,
}

impl House {
    pub fn from_sighting(info: &HouseInfo, fov_range: f32) -> Self {
        Self {
            center: info.center,
            size: info.size,
            door_location: info.center,
            visited: false,
            time_inside: 0.0,
            time_since_visit: 0.0,
            search_points: layout_search_points(info.center, info.size, fov_range),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size * 0.5;
        let offset = (point - self.center).abs();
        offset.x <= half.x && offset.y <= half.y
    }

    pub fn has_door(&self) -> bool {
        self.door_location != self.center
    }

    pub fn has_unvisited_search_point(&self) -> bool {
        self.search_points.iter().any(|point| !point.visited)
    }

    /// Closest unvisited search point. Ties keep the first point.
    pub fn closest_unvisited_search_point(&self, from: Vec2) -> Option<usize> {
        let mut closest: Option<(usize, f32)> = None;
        for (index, point) in self.search_points.iter().enumerate() {
            if point.visited {
                continue;
            }
            let distance = point.position.distance_squared(from);
            if closest.is_none_or(|(_, best)| distance < best) {
                closest = Some((index, distance));
            }
        }
        closest.map(|(index, _)| index)
    }

    /// Marks the house and all of its search points visited.
    pub fn mark_visited(&mut self) {
        self.visited = true;
        self.time_since_visit = 0.0;
        for point in &mut self.search_points {
            point.visited = true;
        }
    }

    /// Forgets every visit so the house is searched again.
    pub fn reset_visits(&mut self) {
        self.visited = false;
        self.time_inside = 0.0;
        self.time_since_visit = 0.0;
        for point in &mut self.search_points {
            point.visited = false;
        }
    }
}

/// Lays out `max(1, floor(size / (2 * fov)))` points per axis, centred in
/// equal sub-rectangles of the footprint.
pub fn layout_search_points(center: Vec2, size: Vec2, fov_range: f32) -> Vec<SearchPoint> {
    let per_axis = |extent: f32| -> usize {
        if fov_range <= 0.0 {
            return 1;
        }
        ((extent / (2.0 * fov_range)).floor() as usize).max(1)
    };
    let columns = per_axis(size.x);
    let rows = per_axis(size.y);
    let step = Vec2::new(size.x / columns as f32, size.y / rows as f32);
    let origin = center - size * 0.5 + step * 0.5;

    let mut points = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            points.push(SearchPoint {
                position: origin + Vec2::new(column as f32 * step.x, row as f32 * step.y),
                visited: false,
            });
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_house_gets_one_centered_point() {
        let points = layout_search_points(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0), 20.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn large_house_gets_a_grid_inside_the_footprint() {
        let house = House::from_sighting(&HouseInfo::new(Vec2::ZERO, Vec2::new(80.0, 40.0)), 10.0);
        assert_eq!(house.search_points.len(), 4 * 2);
        assert!(house.search_points.iter().all(|p| house.contains(p.position)));
        assert_eq!(house.search_points[0].position, Vec2::new(-30.0, -10.0));
    }

    #[test]
    fn closest_unvisited_point_skips_visited_ones() {
        let mut house = House::from_sighting(&HouseInfo::new(Vec2::ZERO, Vec2::new(80.0, 20.0)), 10.0);
        assert_eq!(house.closest_unvisited_search_point(Vec2::new(-40.0, 0.0)), Some(0));

        house.search_points[0].visited = true;
        assert_eq!(house.closest_unvisited_search_point(Vec2::new(-40.0, 0.0)), Some(1));

        house.mark_visited();
        assert_eq!(house.closest_unvisited_search_point(Vec2::ZERO), None);
        assert!(!house.has_unvisited_search_point());

        house.reset_visits();
        assert!(!house.visited);
        assert!(house.has_unvisited_search_point());
    }
}
