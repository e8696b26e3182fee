//! The state shared by both controllers and the trait they implement.

use crate::error::Result;
use crate::geometry::{Geometry, Point};
use crate::options::{Descent, Label, OptionSet, normalize};
use serde_with::DeserializeFromStr;
use std::time::{Duration, Instant};
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Variant {
    /// Pointer position picks the sector; the value follows it live.
    #[default]
    Hover,
    /// Press and hold the hub, release to spin, settle to pick or descend.
    Spin,
}

impl Variant {
    pub fn default_size(&self) -> f64 {
        match self {
            Self::Hover => 200.0,
            Self::Spin => 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Call back once before the next paint.
    NextFrame { epoch: u64 },
    After { delay: Duration, epoch: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Response {
    pub redraw: bool,
    pub schedule: Option<Schedule>,
}

impl Response {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            schedule: None,
        }
    }

    pub fn next_frame(epoch: u64) -> Self {
        Self {
            redraw: true,
            schedule: Some(Schedule::NextFrame { epoch }),
        }
    }

    pub fn after(delay: Duration, epoch: u64) -> Self {
        Self {
            redraw: true,
            schedule: Some(Schedule::After { delay, epoch }),
        }
    }
}

/// What the hub shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hub {
    Caption(Option<Label>),
    Button { pressed: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Descended,
    Committed,
}

#[derive(Debug, Clone)]
pub struct Selection {
    root: OptionSet,
    level: OptionSet,
    path: Vec<Label>,
    index: usize,
    open: bool,
    committed: Label,
    epoch: u64,
}

impl Selection {
    pub fn new(root: OptionSet) -> Result<Self> {
        root.validate()?;
        let committed = root.label_at(0.0)?.clone();
        Ok(Self {
            level: root.clone(),
            root,
            path: Vec::new(),
            index: 0,
            open: false,
            committed,
            epoch: 0,
        })
    }

    pub fn level(&self) -> &OptionSet {
        &self.level
    }

    /// Categories descended since the widget opened.
    pub fn path(&self) -> &[Label] {
        &self.path
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn value(&self) -> &Label {
        &self.committed
    }

    /// Bumped whenever scheduled callbacks from before must stop acting.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn selected_label(&self) -> Result<&Label> {
        self.level.label_at(self.index as f64)
    }

    pub fn open(&mut self) {
        self.level = self.root.clone();
        self.path.clear();
        self.index = 0;
        self.open = true;
        self.epoch += 1;
        log::debug!("roulette opened with {} options", self.level.count());
    }

    pub fn close(&mut self) {
        self.open = false;
        self.epoch += 1;
        log::debug!("roulette closed on '{}'", self.committed);
    }

    pub fn select(&mut self, index: f64) {
        self.index = normalize(index, self.level.count());
    }

    pub fn commit_selected(&mut self) -> Result<()> {
        self.committed = self.selected_label()?.clone();
        Ok(())
    }

    /// Descends into the selected category, or commits and closes on a leaf level.
    pub fn settle(&mut self) -> Result<Settled> {
        let chosen = self.selected_label()?.clone();
        let next = match self.level.descend(self.index as f64)? {
            Descent::Level(sub) => Some(sub.clone()),
            Descent::Leaf(_) => None,
        };
        match next {
            Some(sub) => {
                log::debug!("descending into '{}'", chosen);
                self.path.push(chosen);
                self.level = sub;
                self.index = 0;
                self.epoch += 1;
                Ok(Settled::Descended)
            }
            None => {
                log::debug!("committed '{}'", chosen);
                self.committed = chosen;
                self.close();
                Ok(Settled::Committed)
            }
        }
    }
}

/// One way of turning pointer input into a selection.
pub trait Interaction {
    fn variant(&self) -> Variant;

    /// The generic "activate" click outside the hub.
    fn activate(&mut self, sel: &mut Selection) -> Response {
        if sel.is_open() {
            return Response::none();
        }
        self.reset();
        sel.open();
        Response::redraw()
    }

    fn pointer_moved(
        &mut self,
        _sel: &mut Selection,
        _geometry: &Geometry,
        _at: Point,
    ) -> Result<Response> {
        Ok(Response::none())
    }

    fn pressed(
        &mut self,
        sel: &mut Selection,
        geometry: &Geometry,
        at: Point,
        now: Instant,
    ) -> Result<Response>;

    fn released(
        &mut self,
        sel: &mut Selection,
        geometry: &Geometry,
        at: Point,
        now: Instant,
    ) -> Result<Response>;

    /// Delivered for a [`Schedule`] whose epoch is still current.
    fn tick(&mut self, _sel: &mut Selection, _now: Instant) -> Result<Response> {
        Ok(Response::none())
    }

    fn hub(&self, sel: &Selection) -> Hub;

    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_level() -> OptionSet {
        OptionSet::category([
            ("A", OptionSet::flat(["x", "y"])),
            ("B", OptionSet::flat(["z"])),
        ])
    }

    #[test]
    fn new_commits_first_root_label() {
        let sel = Selection::new(two_level()).unwrap();
        assert_eq!(sel.value().as_str(), "A");
        assert!(!sel.is_open());
    }

    #[test]
    fn new_rejects_empty_options() {
        assert!(Selection::new(OptionSet::Flat(Vec::new())).is_err());
    }

    #[test]
    fn open_reseeds_level_and_index() {
        let mut sel = Selection::new(two_level()).unwrap();
        sel.open();
        sel.select(1.0);
        sel.settle().unwrap();
        assert_eq!(sel.path(), &[Label::new("B")]);
        sel.open();
        assert_eq!(sel.level(), &two_level());
        assert_eq!(sel.index(), 0);
        assert!(sel.path().is_empty());
    }

    #[test]
    fn settle_descends_then_commits() {
        let mut sel = Selection::new(two_level()).unwrap();
        sel.open();
        let before = sel.epoch();
        assert_eq!(sel.settle().unwrap(), Settled::Descended);
        assert_eq!(sel.level(), &OptionSet::flat(["x", "y"]));
        assert_eq!(sel.value().as_str(), "A");
        assert!(sel.epoch() > before);

        sel.select(1.0);
        assert_eq!(sel.settle().unwrap(), Settled::Committed);
        assert_eq!(sel.value().as_str(), "y");
        assert!(!sel.is_open());
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("Spin".parse::<Variant>().unwrap(), Variant::Spin);
        assert_eq!("HOVER".parse::<Variant>().unwrap(), Variant::Hover);
        let v: Variant = serde_json::from_str("\"spin\"").unwrap();
        assert_eq!(v, Variant::Spin);
        assert_eq!(Variant::Spin.to_string(), "spin");
    }
}
