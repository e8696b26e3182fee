use crate::error::Result;
use crate::geometry::{Geometry, Point, sector_at};
use crate::interaction::{Hub, Interaction, Response, Selection, Variant};
use std::time::Instant;

/// Selects whatever sector the pointer is over and commits it immediately.
#[derive(Debug, Clone, Default)]
pub struct HoverController {
    hovered: bool,
}

impl HoverController {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Interaction for HoverController {
    fn variant(&self) -> Variant {
        Variant::Hover
    }

    fn activate(&mut self, sel: &mut Selection) -> Response {
        self.reset();
        if sel.is_open() {
            sel.close();
        } else {
            sel.open();
        }
        Response::redraw()
    }

    fn pointer_moved(
        &mut self,
        sel: &mut Selection,
        geometry: &Geometry,
        at: Point,
    ) -> Result<Response> {
        if !sel.is_open() {
            return Ok(Response::none());
        }
        let index = sector_at(geometry.offset_of(at), sel.level().count());
        let changed = !self.hovered || index != sel.index();

        sel.select(index as f64);
        sel.commit_selected()?;
        self.hovered = true;

        Ok(if changed {
            Response::redraw()
        } else {
            Response::none()
        })
    }

    fn pressed(
        &mut self,
        _sel: &mut Selection,
        _geometry: &Geometry,
        _at: Point,
        _now: Instant,
    ) -> Result<Response> {
        Ok(Response::none())
    }

    // a click on the open wheel closes it; the selection stays as hovered
    fn released(
        &mut self,
        sel: &mut Selection,
        _geometry: &Geometry,
        _at: Point,
        _now: Instant,
    ) -> Result<Response> {
        Ok(self.activate(sel))
    }

    fn hub(&self, sel: &Selection) -> Hub {
        Hub::Caption(
            self.hovered
                .then(|| sel.selected_label().ok().cloned())
                .flatten(),
        )
    }

    fn reset(&mut self) {
        self.hovered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionSet;

    fn open_five() -> (HoverController, Selection, Geometry) {
        let mut sel = Selection::new(OptionSet::flat(["a", "b", "c", "d", "e"])).unwrap();
        let mut hover = HoverController::new();
        hover.activate(&mut sel);
        (hover, sel, Geometry::new(200.0))
    }

    #[test]
    fn top_maps_to_first_and_bottom_to_third() {
        let (mut hover, mut sel, g) = open_five();

        hover
            .pointer_moved(&mut sel, &g, Point::new(101.0, 5.0))
            .unwrap();
        assert_eq!(sel.index(), 0);
        assert_eq!(sel.value().as_str(), "a");

        hover
            .pointer_moved(&mut sel, &g, Point::new(100.0, 195.0))
            .unwrap();
        assert_eq!(sel.index(), 2);
        assert_eq!(sel.value().as_str(), "c");
    }

    #[test]
    fn value_tracks_hover_live() {
        let (mut hover, mut sel, g) = open_five();
        // 3 o'clock is in the second sector of five
        let r = hover
            .pointer_moved(&mut sel, &g, Point::new(190.0, 100.0))
            .unwrap();
        assert!(r.redraw);
        assert_eq!(sel.value().as_str(), "b");

        let again = hover
            .pointer_moved(&mut sel, &g, Point::new(191.0, 101.0))
            .unwrap();
        assert!(!again.redraw);
    }

    #[test]
    fn ignored_while_closed() {
        let mut sel = Selection::new(OptionSet::flat(["a", "b"])).unwrap();
        let mut hover = HoverController::new();
        let g = Geometry::new(200.0);
        let r = hover
            .pointer_moved(&mut sel, &g, Point::new(100.0, 195.0))
            .unwrap();
        assert_eq!(r, Response::none());
        assert_eq!(sel.value().as_str(), "a");
    }

    #[test]
    fn click_toggles_without_changing_value() {
        let (mut hover, mut sel, g) = open_five();
        hover
            .pointer_moved(&mut sel, &g, Point::new(100.0, 195.0))
            .unwrap();
        hover
            .released(&mut sel, &g, Point::new(100.0, 195.0), Instant::now())
            .unwrap();
        assert!(!sel.is_open());
        assert_eq!(sel.value().as_str(), "c");

        hover.activate(&mut sel);
        assert!(sel.is_open());
        assert_eq!(sel.index(), 0);
        assert_eq!(sel.value().as_str(), "c");
    }

    #[test]
    fn hub_caption_appears_after_first_hover() {
        let (mut hover, mut sel, g) = open_five();
        assert_eq!(hover.hub(&sel), Hub::Caption(None));
        hover
            .pointer_moved(&mut sel, &g, Point::new(50.0, 20.0))
            .unwrap();
        assert_eq!(hover.hub(&sel), Hub::Caption(Some("e".into())));
    }
}
