//! The scene panel of the cube-mapping sample.

use egui::{ComboBox, Context, Window};
use skypick_core::{PickResult, SkyboxPreset, Vec3};

/// Title of the scene panel window.
pub const PANEL_TITLE: &str = "Static Cube Mapping";

/// Widget state owned by the app and handed to [`build_scene_panel`] every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneUiState {
    /// Skybox shown in the combo box.
    pub skybox: SkyboxPreset,
}

impl SceneUiState {
    /// Creates state with `skybox` selected.
    pub fn new(skybox: SkyboxPreset) -> Self {
        Self { skybox }
    }

    /// Sets the selection. Returns the preset if it differs from the previous one.
    pub fn select(&mut self, preset: SkyboxPreset) -> Option<SkyboxPreset> {
        if self.skybox == preset {
            None
        } else {
            self.skybox = preset;
            Some(preset)
        }
    }
}

/// "Current Object: ..." line.
pub fn object_label(pick: &PickResult) -> String {
    format!("Current Object: {}", pick.target.name())
}

/// "Current Coord: x,y,z" line. Shows zeros when the pick has no coordinate.
pub fn coordinate_label(coordinate: Option<Vec3>) -> String {
    let c = coordinate.unwrap_or(Vec3::ZERO);
    format!("Current Coord: {:.3},{:.3},{:.3}", c.x, c.y, c.z)
}

/// Builds the scene panel.
///
/// The combo box offers only `presets`, the skyboxes that have a loaded source.
/// Returns the newly selected skybox when the combo box changed.
pub fn build_scene_panel(
    ctx: &Context,
    state: &mut SceneUiState,
    pick: &PickResult,
    presets: &[SkyboxPreset],
) -> Option<SkyboxPreset> {
    let mut changed = None;

    Window::new(PANEL_TITLE)
        .default_pos([10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(object_label(pick));
            ui.label(coordinate_label(pick.coordinate));
            ui.separator();

            let mut selected = state.skybox;
            ComboBox::from_label("Skybox")
                .selected_text(selected.name())
                .show_ui(ui, |ui| {
                    for &preset in presets {
                        ui.selectable_value(&mut selected, preset, preset.name());
                    }
                });
            changed = state.select(selected);
        });

    if let Some(preset) = changed {
        log::debug!("skybox changed to {preset}");
    }
    changed
}

#[cfg(test)]
mod tests {
    use skypick_core::PickTarget;

    use super::*;

    #[test]
    fn test_coordinate_label_formats_three_decimals() {
        assert_eq!(
            coordinate_label(Some(Vec3::new(2.0, -3.5, 1.0))),
            "Current Coord: 2.000,-3.500,1.000"
        );
    }

    #[test]
    fn test_coordinate_label_without_hit() {
        assert_eq!(coordinate_label(None), "Current Coord: 0.000,0.000,0.000");
    }

    #[test]
    fn test_object_label() {
        let pick = PickResult {
            target: PickTarget::Ground,
            hit: true,
            coordinate: Some(Vec3::ZERO),
        };
        assert_eq!(object_label(&pick), "Current Object: Ground");
        assert_eq!(object_label(&PickResult::none()), "Current Object: None");
    }

    #[test]
    fn test_select_reports_only_changes() {
        let mut state = SceneUiState::default();
        assert_eq!(state.skybox, SkyboxPreset::Daylight);
        assert_eq!(state.select(SkyboxPreset::Daylight), None);
        assert_eq!(state.select(SkyboxPreset::Desert), Some(SkyboxPreset::Desert));
        assert_eq!(state.skybox, SkyboxPreset::Desert);
    }

    #[test]
    fn test_panel_runs_headless() {
        let ctx = Context::default();
        let mut state = SceneUiState::new(SkyboxPreset::Sunset);
        let mut changed = Some(SkyboxPreset::Daylight);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changed =
                build_scene_panel(ctx, &mut state, &PickResult::none(), &SkyboxPreset::ALL);
        });
        assert_eq!(changed, None);
        assert_eq!(state.skybox, SkyboxPreset::Sunset);
    }

    #[test]
    fn test_panel_with_subset_of_presets() {
        let ctx = Context::default();
        let mut state = SceneUiState::new(SkyboxPreset::Daylight);
        let mut changed = Some(SkyboxPreset::Desert);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            changed = build_scene_panel(
                ctx,
                &mut state,
                &PickResult::none(),
                &[SkyboxPreset::Daylight],
            );
        });
        assert_eq!(changed, None);
        assert_eq!(state.skybox, SkyboxPreset::Daylight);
    }
}
