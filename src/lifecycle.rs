//! Resetting toolbar state when a game starts or game settings change.

use bevy::prelude::*;

use crate::context::{GameYear, GuiContext, LocalCompany};
use crate::pickers::DepotDirection;
use crate::rail::{RailType, SignalType, StationClassId};
use crate::settings::DefaultRailType;
use crate::toolbar::systems::GuiParams;
use crate::toolbar::{RailToolbarSet, RailToolbarState};

/// Message: a game was started or loaded, toolbar state starts fresh
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewGameStarted;

/// Message: the electrified railway setting was toggled
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElrailToggled {
    pub disabled: bool,
}

impl RailToolbarState {
    /// Picker defaults for a new game.
    pub fn initialize_rail_gui(&mut self) {
        self.depot.direction = DepotDirection::Auto;
        self.depot.reset_rotation();
        self.station.station_class = StationClassId::DEFAULT;
        self.station.station_type = 0;
    }

    /// Pick the rail type the toolbar opens with.
    pub fn set_default_rail_gui(&mut self, cx: &mut GuiContext) {
        let first = || cx.railtypes.first_available().unwrap_or_default();
        let railtype = match cx.settings.default_rail_type {
            DefaultRailType::First => first(),
            DefaultRailType::Last => cx.railtypes.last_available().unwrap_or_default(),
            DefaultRailType::MostUsed => most_used_railtype(cx).unwrap_or_else(first),
        };
        debug!("Default rail type is {}", railtype.0);
        self.last_built_railtype = railtype;
        self.modify_railtype(railtype);
    }

    /// Show `railtype` on an open toolbar without reopening it.
    pub fn modify_railtype(&mut self, railtype: RailType) {
        if self.open {
            self.railtype = railtype;
        }
    }

    /// Semaphores before the configured year, electric signals after.
    pub fn reset_signal_variant(&mut self, cx: &GuiContext) {
        let before = self.signal.variant;
        self.signal
            .reset_variant(cx.year, cx.settings.semaphore_build_before);
        if before != self.signal.variant {
            debug!("Signal variant now {:?}", self.signal.variant);
        }
    }

    /// Rail type and signal defaults for a new game.
    pub fn initialize_rail_gui_state(&mut self, cx: &mut GuiContext) {
        self.set_default_rail_gui(cx);
        self.signal.convert = false;
        self.signal.signal_type = SignalType::PbsOneway;
        self.reset_signal_variant(cx);
    }

    /// Electric rail vanishes when electrification is switched off.
    pub fn reinit_after_toggle_elrail(&mut self, disabled: bool) {
        if disabled && self.last_built_railtype == RailType::ELECTRIC {
            self.last_built_railtype = RailType::RAIL;
            self.railtype = RailType::RAIL;
        }
    }
}

/// Rail type laid on most tiles; ties go to the lowest id.
fn most_used_railtype(cx: &GuiContext) -> Option<RailType> {
    cx.engine
        .rail_type_census()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .max_by(|(a_type, a), (b_type, b)| a.cmp(b).then(b_type.cmp(a_type)))
        .map(|(railtype, _)| railtype)
}

pub fn handle_new_game(
    mut reader: MessageReader<NewGameStarted>,
    company: Res<LocalCompany>,
    mut gui: GuiParams,
) {
    for _ in reader.read() {
        let (toolbar, mut cx) = gui.split();
        toolbar.initialize_rail_gui();
        if company.0.is_none() {
            debug!("Spectating, rail type defaults skipped");
            continue;
        }
        toolbar.initialize_rail_gui_state(&mut cx);
    }
}

pub fn handle_elrail_toggle(
    mut reader: MessageReader<ElrailToggled>,
    mut toolbar: ResMut<RailToolbarState>,
) {
    for msg in reader.read() {
        toolbar.reinit_after_toggle_elrail(msg.disabled);
    }
}

pub fn follow_game_year(mut gui: GuiParams) {
    let (toolbar, cx) = gui.split();
    toolbar.reset_signal_variant(&cx);
}

/// Plugin that resets toolbar defaults at game start and on setting changes
pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<NewGameStarted>()
            .add_message::<ElrailToggled>()
            .add_systems(
                Update,
                (
                    handle_new_game,
                    handle_elrail_toggle,
                    follow_game_year.run_if(resource_changed::<GameYear>),
                )
                    .chain()
                    .before(RailToolbarSet::Toolbar)
                    .after(RailToolbarSet::Input),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TrackBits;
    use crate::rail::SignalVariant;
    use crate::test_utils::{TestGui, tile};

    #[test]
    fn most_used_railtype_wins() {
        let mut gui = TestGui::new();
        gui.settings.default_rail_type = DefaultRailType::MostUsed;
        gui.engine
            .lay_rail_with(tile(1, 1), TrackBits::X, RailType::ELECTRIC);
        gui.engine
            .lay_rail_with(tile(2, 1), TrackBits::X, RailType::ELECTRIC);
        gui.engine.lay_rail(tile(5, 5), TrackBits::Y);

        gui.run(|toolbar, cx| toolbar.set_default_rail_gui(cx));
        assert_eq!(gui.toolbar.last_built_railtype, RailType::ELECTRIC);
        assert_eq!(gui.toolbar.railtype, RailType::ELECTRIC);
    }

    #[test]
    fn empty_map_falls_back_to_first_available() {
        let mut gui = TestGui::new();
        gui.settings.default_rail_type = DefaultRailType::MostUsed;
        gui.railtypes.set_available(RailType::RAIL, false);
        gui.run(|toolbar, cx| toolbar.set_default_rail_gui(cx));
        assert_eq!(gui.toolbar.last_built_railtype, RailType::ELECTRIC);
    }

    #[test]
    fn last_available_skips_unavailable_types() {
        let mut gui = TestGui::new();
        gui.settings.default_rail_type = DefaultRailType::Last;
        gui.run(|toolbar, cx| toolbar.set_default_rail_gui(cx));
        assert_eq!(gui.toolbar.last_built_railtype, RailType::ELECTRIC);
    }

    #[test]
    fn closed_toolbar_only_remembers_the_type() {
        let mut gui = TestGui::new();
        gui.toolbar.open = false;
        gui.settings.default_rail_type = DefaultRailType::Last;
        gui.run(|toolbar, cx| toolbar.set_default_rail_gui(cx));
        assert_eq!(gui.toolbar.railtype, RailType::RAIL);
        assert_eq!(gui.toolbar.last_built_railtype, RailType::ELECTRIC);
    }

    #[test]
    fn initial_state_picks_variant_by_year() {
        let mut gui = TestGui::new();
        gui.settings.semaphore_build_before = 1975;
        gui.toolbar.signal.convert = true;
        gui.year = 1960;
        gui.run(|toolbar, cx| toolbar.initialize_rail_gui_state(cx));
        assert!(!gui.toolbar.signal.convert);
        assert_eq!(gui.toolbar.signal.signal_type, SignalType::PbsOneway);
        assert_eq!(gui.toolbar.signal.variant, SignalVariant::Semaphore);

        gui.year = 1980;
        gui.run(|toolbar, cx| toolbar.reset_signal_variant(cx));
        assert_eq!(gui.toolbar.signal.variant, SignalVariant::Electric);
    }

    #[test]
    fn disabling_elrail_drops_electric() {
        let mut gui = TestGui::new();
        gui.toolbar.railtype = RailType::ELECTRIC;
        gui.toolbar.last_built_railtype = RailType::ELECTRIC;
        gui.toolbar.reinit_after_toggle_elrail(false);
        assert_eq!(gui.toolbar.railtype, RailType::ELECTRIC);
        gui.toolbar.reinit_after_toggle_elrail(true);
        assert_eq!(gui.toolbar.railtype, RailType::RAIL);
        assert_eq!(gui.toolbar.last_built_railtype, RailType::RAIL);
    }

    #[test]
    fn new_game_resets_depot_direction() {
        let mut app = crate::test_utils::toolbar_test_app();
        {
            let mut toolbar = app.world_mut().resource_mut::<RailToolbarState>();
            toolbar.depot.direction = DepotDirection::Fixed(crate::map::DiagDirection::Ne);
            toolbar.station.station_class = StationClassId(7);
        }
        app.world_mut().write_message(NewGameStarted);
        app.update();

        let toolbar = app.world().resource::<RailToolbarState>();
        assert_eq!(toolbar.depot.direction, DepotDirection::Auto);
        assert_eq!(toolbar.station.station_class, StationClassId::DEFAULT);
        assert_eq!(toolbar.signal.signal_type, SignalType::PbsOneway);
    }
}
