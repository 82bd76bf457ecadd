use crate::geometry::Point;
use crate::hit_test::{self, Zone};
use crate::selection::{MARGIN, MIN_HEIGHT, MIN_WIDTH, SelectionRect};
use crate::viewport::ViewportState;

/// Edges taking part in a resize. Corner handles set two, mid-edge handles
/// one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeEdges {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
}

fn edges_for(zone: Zone) -> ResizeEdges {
    let (north, south, east, west) = match zone {
        Zone::TopLeft => (true, false, false, true),
        Zone::BottomLeft => (false, true, false, true),
        Zone::TopRight => (true, false, true, false),
        Zone::BottomRight => (false, true, true, false),
        Zone::Left => (false, false, false, true),
        Zone::Right => (false, false, true, false),
        Zone::Top => (true, false, false, false),
        Zone::Bottom => (false, true, false, false),
        Zone::Interior => (false, false, false, false),
    };
    ResizeEdges {
        north,
        south,
        east,
        west,
    }
}

/// Interaction mode while a pointer button is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Moving,
    Resizing(ResizeEdges),
}

/// Surface-local pointer input, already translated to display coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up,
    Leave,
}

/// Result of feeding one pointer event through the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Update {
    pub rect: SelectionRect,
    /// True when the rectangle was mutated and the overlay needs a repaint.
    pub changed: bool,
    /// Hovered zone, reported only for moves while idle.
    pub hover: Option<Zone>,
}

/// Drives the selection rectangle from pointer events.
///
/// Deltas are incremental: the anchor advances to the pointer position
/// whenever an axis accepts its update, so a rejected step does not
/// accumulate into the next one.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragController {
    state: DragState,
    anchor: Point,
}

impl DragController {
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Apply one event against `rect`, returning the updated rectangle.
    /// Release and surface exit both reset to idle unconditionally.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        rect: SelectionRect,
        viewport: &ViewportState,
    ) -> Update {
        match event {
            PointerEvent::Down(p) => self.press(p, rect),
            PointerEvent::Move(p) => match self.state {
                DragState::Idle => Update {
                    rect,
                    changed: false,
                    hover: hit_test::hover_zone(p, &rect),
                },
                DragState::Moving => self.translate(p, rect, viewport),
                DragState::Resizing(edges) => self.resize(p, edges, rect, viewport),
            },
            PointerEvent::Up | PointerEvent::Leave => {
                self.state = DragState::Idle;
                Update {
                    rect,
                    changed: false,
                    hover: None,
                }
            }
        }
    }

    fn press(&mut self, p: Point, rect: SelectionRect) -> Update {
        self.anchor = p;
        self.state = match hit_test::press_zone(p, &rect) {
            None => DragState::Idle,
            Some(Zone::Interior) => DragState::Moving,
            Some(zone) => DragState::Resizing(edges_for(zone)),
        };
        Update {
            rect,
            changed: false,
            hover: None,
        }
    }

    /// Translate the whole rectangle. Each axis is accepted or rejected
    /// atomically; the anchor follows the pointer either way.
    fn translate(&mut self, p: Point, mut rect: SelectionRect, viewport: &ViewportState) -> Update {
        let dx = p.x - self.anchor.x;
        let dy = p.y - self.anchor.y;
        let mut changed = false;

        if rect.left + dx - 4 > 0 && rect.left + dx + rect.width + 4 < viewport.display_width {
            rect.left += dx;
            changed |= dx != 0;
        }
        if rect.top + dy - 4 > 0 && rect.top + dy + rect.height + 4 < viewport.display_height {
            rect.top += dy;
            changed |= dy != 0;
        }
        self.anchor = p;

        Update {
            rect,
            changed,
            hover: None,
        }
    }

    /// Apply the active edges independently; one edge rejecting its update
    /// does not block the other.
    fn resize(
        &mut self,
        p: Point,
        edges: ResizeEdges,
        mut rect: SelectionRect,
        viewport: &ViewportState,
    ) -> Update {
        let mut changed = false;
        if edges.west {
            changed |= self.resize_west(p, &mut rect);
        } else if edges.east {
            changed |= self.resize_east(p, &mut rect, viewport);
        }
        if edges.north {
            changed |= self.resize_north(p, &mut rect);
        } else if edges.south {
            changed |= self.resize_south(p, &mut rect, viewport);
        }

        Update {
            rect,
            changed,
            hover: None,
        }
    }

    fn resize_west(&mut self, p: Point, rect: &mut SelectionRect) -> bool {
        let dx = p.x - self.anchor.x;
        if dx > 0 && rect.width - dx < MIN_WIDTH {
            return false;
        }
        if rect.left + dx < MARGIN {
            // Pin to the margin and absorb the overshoot into the width, so
            // shrinking continues smoothly against the boundary.
            rect.width += rect.left - MARGIN;
            rect.left = MARGIN;
        } else {
            rect.left += dx;
            rect.width -= dx;
        }
        self.anchor.x = p.x;
        dx != 0
    }

    fn resize_north(&mut self, p: Point, rect: &mut SelectionRect) -> bool {
        let dy = p.y - self.anchor.y;
        if dy > 0 && rect.height - dy < MIN_HEIGHT {
            return false;
        }
        if rect.top + dy < MARGIN {
            rect.height += rect.top - MARGIN;
            rect.top = MARGIN;
        } else {
            rect.top += dy;
            rect.height -= dy;
        }
        self.anchor.y = p.y;
        dy != 0
    }

    fn resize_east(&mut self, p: Point, rect: &mut SelectionRect, viewport: &ViewportState) -> bool {
        let dx = p.x - self.anchor.x;
        if dx < 0 && rect.width + dx < MIN_WIDTH {
            return false;
        }
        let mut changed = false;
        if rect.left + rect.width + dx + 4 < viewport.display_width {
            rect.width += dx;
            changed = dx != 0;
        }
        self.anchor.x = p.x;
        changed
    }

    fn resize_south(&mut self, p: Point, rect: &mut SelectionRect, viewport: &ViewportState) -> bool {
        let dy = p.y - self.anchor.y;
        if dy < 0 && rect.height + dy < MIN_HEIGHT {
            return false;
        }
        let mut changed = false;
        if rect.top + rect.height + dy + 4 < viewport.display_height {
            rect.height += dy;
            changed = dy != 0;
        }
        self.anchor.y = p.y;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_a() -> (ViewportState, SelectionRect) {
        let viewport = ViewportState::fit(400, 300, 1000.0, 800.0);
        let rect = SelectionRect::initial(&viewport);
        assert_eq!(
            rect,
            SelectionRect {
                left: 41,
                top: 31,
                width: 328,
                height: 248,
            }
        );
        (viewport, rect)
    }

    fn drag(
        controller: &mut DragController,
        viewport: &ViewportState,
        mut rect: SelectionRect,
        events: &[PointerEvent],
    ) -> SelectionRect {
        for &event in events {
            rect = controller.handle(event, rect, viewport).rect;
        }
        rect
    }

    #[test]
    fn west_handle_drag_moves_left_edge_only() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();
        let handle = Point::new(41, 155);

        let rect = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(handle),
                PointerEvent::Move(Point::new(31, 155)),
            ],
        );

        assert_eq!(
            rect,
            SelectionRect {
                left: 31,
                top: 31,
                width: 338,
                height: 248,
            }
        );
    }

    #[test]
    fn west_overshoot_is_absorbed_into_width() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();
        let handle = Point::new(41, 155);

        let rect = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(handle),
                PointerEvent::Move(Point::new(1, 155)),
            ],
        );

        // Nominal left would be 1; pinned at the margin with the four-unit
        // overshoot taken out of the width.
        assert_eq!(
            rect,
            SelectionRect {
                left: 5,
                top: 31,
                width: 364,
                height: 248,
            }
        );
    }

    #[test]
    fn pinned_west_edge_does_not_grow_width_further() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();

        let rect = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(Point::new(41, 155)),
                PointerEvent::Move(Point::new(1, 155)),
                PointerEvent::Move(Point::new(-30, 155)),
            ],
        );

        assert_eq!(rect.left, 5);
        assert_eq!(rect.width, 364);
    }

    #[test]
    fn shrink_below_minimum_is_rejected_without_consuming_the_delta() {
        let viewport = ViewportState::fit(400, 300, 1000.0, 800.0);
        let rect = SelectionRect {
            left: 100,
            top: 100,
            width: 50,
            height: 60,
        };
        let mut controller = DragController::default();
        let handle = Point::new(150, 130);

        let after = drag(
            &mut controller,
            &viewport,
            rect,
            &[PointerEvent::Down(handle), PointerEvent::Move(Point::new(145, 130))],
        );
        assert_eq!(after, rect);

        // The rejected step left the anchor in place, so pulling back out by
        // ten units grows from the original edge.
        let after = drag(&mut controller, &viewport, after, &[PointerEvent::Move(Point::new(160, 130))]);
        assert_eq!(after.width, 60);
    }

    #[test]
    fn east_growth_stops_at_the_far_margin() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();
        let handle = Point::new(369, 155);

        let after = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(handle),
                PointerEvent::Move(Point::new(419, 155)),
            ],
        );

        // 41 + 328 + 50 + 4 is past the display width, so the whole step is
        // blocked.
        assert_eq!(after.width, 328);

        // The anchor still advanced: a partial pull back shrinks from the
        // current edge instead of replaying the blocked delta.
        let after = drag(
            &mut controller,
            &viewport,
            after,
            &[PointerEvent::Move(Point::new(405, 155))],
        );
        assert_eq!(after.width, 328 + (405 - 419));
    }

    #[test]
    fn move_rejection_is_atomic_per_axis() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();

        let after = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(Point::new(200, 150)),
                PointerEvent::Move(Point::new(210, 200)),
            ],
        );

        // dy = 50 would push the bottom past the margin; dx = 10 fits.
        assert_eq!(after.left, 51);
        assert_eq!(after.top, 31);
        assert_eq!((after.width, after.height), (328, 248));
    }

    #[test]
    fn move_anchor_advances_even_when_an_axis_rejects() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();

        let after = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(Point::new(200, 150)),
                // Rejected: would cross the right margin.
                PointerEvent::Move(Point::new(250, 150)),
                // Measured from the advanced anchor, dx is -10.
                PointerEvent::Move(Point::new(240, 150)),
            ],
        );

        assert_eq!(after.left, 31);
        assert_eq!(after.top, 31);
    }

    #[test]
    fn corner_resize_applies_axes_independently() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();

        let after = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(Point::new(41, 31)),
                PointerEvent::Move(Point::new(31, 261)),
            ],
        );

        // dy = 230 would shrink the height below the minimum and is
        // rejected; dx = -10 still widens through the west edge.
        assert_eq!(
            after,
            SelectionRect {
                left: 31,
                top: 31,
                width: 338,
                height: 248,
            }
        );
    }

    #[test]
    fn click_outside_the_rectangle_is_a_no_op() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();

        let after = drag(
            &mut controller,
            &viewport,
            rect,
            &[
                PointerEvent::Down(Point::new(400, 300)),
                PointerEvent::Move(Point::new(200, 150)),
            ],
        );

        assert_eq!(after, rect);
        assert_eq!(controller.state(), DragState::Idle);
    }

    #[test]
    fn release_and_surface_exit_both_reset_to_idle() {
        let (viewport, rect) = scenario_a();

        for terminator in [PointerEvent::Up, PointerEvent::Leave] {
            let mut controller = DragController::default();
            let after = drag(
                &mut controller,
                &viewport,
                rect,
                &[
                    PointerEvent::Down(Point::new(200, 150)),
                    PointerEvent::Move(Point::new(210, 160)),
                    terminator,
                    PointerEvent::Move(Point::new(300, 200)),
                ],
            );

            assert_eq!(controller.state(), DragState::Idle);
            // The move after the terminator is advisory only.
            assert_eq!(after.left, 51);
            assert_eq!(after.top, 41);
        }
    }

    #[test]
    fn idle_moves_report_the_hovered_zone() {
        let (viewport, rect) = scenario_a();
        let mut controller = DragController::default();

        let update = controller.handle(PointerEvent::Move(Point::new(41, 31)), rect, &viewport);
        assert_eq!(update.hover, Some(Zone::TopLeft));
        assert!(!update.changed);

        let update = controller.handle(PointerEvent::Move(Point::new(200, 150)), rect, &viewport);
        assert_eq!(update.hover, Some(Zone::Interior));
    }

    #[test]
    fn accepted_updates_always_preserve_the_bounds() {
        let (viewport, mut rect) = scenario_a();
        let mut controller = DragController::default();

        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = |bound: i32| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((seed >> 33) as i32).rem_euclid(bound)
        };

        for step in 0..5000 {
            let event = match next(8) {
                0 => PointerEvent::Down(Point::new(
                    next(viewport.display_width),
                    next(viewport.display_height),
                )),
                1 => PointerEvent::Up,
                2 => PointerEvent::Leave,
                _ => PointerEvent::Move(Point::new(
                    next(viewport.display_width + 80) - 40,
                    next(viewport.display_height + 80) - 40,
                )),
            };
            rect = controller.handle(event, rect, &viewport).rect;
            assert!(rect.in_bounds(&viewport), "step {step}: {rect:?}");
        }
    }
}
