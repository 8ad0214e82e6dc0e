//! Pointer input → surface-local pixel coordinates.
//!
//! Mouse and touch samples are folded into one point. The mapping is a
//! plain 1:1 offset from the surface's rendered box: if the box is drawn at
//! a different size than the mask, coordinates are used as they are.

use crate::types::StrokePoint;

/// One finger on a touch screen, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub client_x: f32,
    pub client_y: f32,
}

/// A raw pointer sample as delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Mouse { client_x: f32, client_y: f32 },
    Touch { touches: Vec<TouchPoint> },
}

impl PointerEvent {
    pub fn mouse(client_x: f32, client_y: f32) -> Self {
        PointerEvent::Mouse { client_x, client_y }
    }

    pub fn touch(client_x: f32, client_y: f32) -> Self {
        PointerEvent::Touch { touches: vec![TouchPoint { client_x, client_y }] }
    }

    /// Client position of the pointer that drives scratching: the mouse,
    /// or the first finger. A touch event without fingers has none.
    pub fn client_position(&self) -> Option<(f32, f32)> {
        match self {
            PointerEvent::Mouse { client_x, client_y } => Some((*client_x, *client_y)),
            PointerEvent::Touch { touches } => {
                touches.first().map(|t| (t.client_x, t.client_y))
            }
        }
    }
}

/// Where the surface is currently drawn, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// True when the client point lands on the drawn surface.
    pub fn contains(&self, client_x: f32, client_y: f32) -> bool {
        client_x >= self.left
            && client_y >= self.top
            && client_x < self.left + self.width
            && client_y < self.top + self.height
    }
}

/// Map a pointer event to surface-local pixels.
pub fn map_to_surface(event: &PointerEvent, bounds: &BoundingBox) -> Option<StrokePoint> {
    let (client_x, client_y) = event.client_position()?;
    Some(StrokePoint::new(client_x - bounds.left, client_y - bounds.top))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_is_offset_by_box_origin() {
        let bounds = BoundingBox::new(100.0, 40.0, 250.0, 250.0);
        let p = map_to_surface(&PointerEvent::mouse(130.5, 90.0), &bounds).unwrap();
        assert_eq!(p, StrokePoint::new(30.5, 50.0));
    }

    #[test]
    fn touch_uses_first_finger() {
        let bounds = BoundingBox::new(10.0, 10.0, 100.0, 100.0);
        let ev = PointerEvent::Touch {
            touches: vec![
                TouchPoint { client_x: 20.0, client_y: 30.0 },
                TouchPoint { client_x: 90.0, client_y: 90.0 },
            ],
        };
        assert_eq!(map_to_surface(&ev, &bounds), Some(StrokePoint::new(10.0, 20.0)));
    }

    #[test]
    fn touch_without_fingers_maps_to_nothing() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let ev = PointerEvent::Touch { touches: Vec::new() };
        assert_eq!(map_to_surface(&ev, &bounds), None);
    }

    #[test]
    fn points_outside_the_box_still_map() {
        // No clamping here; the eraser ignores off-surface pixels.
        let bounds = BoundingBox::new(50.0, 50.0, 10.0, 10.0);
        let p = map_to_surface(&PointerEvent::mouse(0.0, 0.0), &bounds).unwrap();
        assert_eq!(p, StrokePoint::new(-50.0, -50.0));
        assert!(!bounds.contains(0.0, 0.0));
    }

    #[test]
    fn no_scaling_is_applied() {
        // Box drawn at twice the buffer size: coordinates pass through as-is.
        let bounds = BoundingBox::new(0.0, 0.0, 500.0, 500.0);
        let p = map_to_surface(&PointerEvent::mouse(400.0, 300.0), &bounds).unwrap();
        assert_eq!(p, StrokePoint::new(400.0, 300.0));
    }

    #[test]
    fn contains_is_half_open() {
        let bounds = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(9.9, 9.9));
        assert!(!bounds.contains(10.0, 5.0));
        assert!(!bounds.contains(5.0, -0.1));
    }
}
