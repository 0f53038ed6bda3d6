use plotly::common::Anchor;
use plotly::layout::update_menu::{Button, ButtonMethod, UpdateMenu, UpdateMenuType};
use serde::Serialize;
use serde_json::json;

use super::visibility::{Preset, TraceIndex, unit_mode_visibility};
use crate::data::model::EcgUnit;

// ---------------------------------------------------------------------------
// Secondary axis relayout
// ---------------------------------------------------------------------------

/// Right-hand axis settings sent with each unit-menu option.
#[derive(Debug, Clone, Serialize)]
pub struct SecondaryAxisUpdate {
    pub title: String,
    pub overlaying: &'static str,
    pub side: &'static str,
    pub showgrid: bool,
}

impl SecondaryAxisUpdate {
    pub fn for_unit(unit: EcgUnit) -> Self {
        SecondaryAxisUpdate {
            title: secondary_axis_title(unit),
            overlaying: "y",
            side: "right",
            showgrid: false,
        }
    }
}

/// Title of the right-hand axis, which carries ECG and the CM reference.
pub fn secondary_axis_title(unit: EcgUnit) -> String {
    format!("ECG ({}) / CM (μV)", unit.label())
}

// ---------------------------------------------------------------------------
// Dropdowns
// ---------------------------------------------------------------------------

/// Channel-group dropdown: each option replaces the whole visibility vector.
pub fn preset_menu(index: &TraceIndex) -> UpdateMenu {
    let buttons = Preset::ALL
        .iter()
        .map(|&p| {
            Button::new()
                .label(p.label())
                .method(ButtonMethod::Update)
                .args(json!([{ "visible": index.preset(p) }]))
        })
        .collect();

    dropdown(1.20, buttons)
}

/// ECG unit dropdown.
///
/// Visibility is precomputed from `current`, the state at build time, so
/// non-ECG traces keep whatever visibility they were built with.
pub fn unit_menu(index: &TraceIndex, current: &[bool]) -> UpdateMenu {
    let buttons = [EcgUnit::MilliVolt, EcgUnit::MicroVolt]
        .into_iter()
        .map(|unit| {
            Button::new()
                .label(&format!("ECG in {}", unit.label()))
                .method(ButtonMethod::Update)
                .args(json!([
                    { "visible": unit_mode_visibility(current, index, unit) },
                    { "yaxis2": SecondaryAxisUpdate::for_unit(unit) },
                ]))
        })
        .collect();

    dropdown(1.08, buttons)
}

/// Both menus, preset above unit toggle, right-aligned over the plot.
pub fn build_menus(index: &TraceIndex, current: &[bool]) -> Vec<UpdateMenu> {
    vec![preset_menu(index), unit_menu(index, current)]
}

fn dropdown(y: f64, buttons: Vec<Button>) -> UpdateMenu {
    UpdateMenu::new()
        .ty(UpdateMenuType::Dropdown)
        .x(1.0)
        .x_anchor(Anchor::Right)
        .y(y)
        .y_anchor(Anchor::Top)
        .show_active(true)
        .buttons(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ClassifiedChannels, DerivedSeries};
    use serde_json::Value;

    fn index() -> TraceIndex {
        let s = |l: &str| DerivedSeries {
            label: l.to_string(),
            values: vec![],
        };
        TraceIndex::from_channels(&ClassifiedChannels {
            eeg: vec![s("Fz")],
            reference: vec![s("CM")],
            ecg_mv: vec![s("mv")],
            ecg_uv: vec![s("uv")],
        })
    }

    fn to_json(menu: &UpdateMenu) -> Value {
        serde_json::to_value(menu).unwrap()
    }

    #[test]
    fn preset_menu_carries_three_vectors() {
        let idx = index();
        let menu = to_json(&preset_menu(&idx));
        let buttons = menu["buttons"].as_array().unwrap();

        let labels: Vec<&str> = buttons.iter().map(|b| b["label"].as_str().unwrap()).collect();
        assert_eq!(labels, ["All", "EEG only", "ECG+CM only"]);
        assert_eq!(buttons[0]["method"], "update");
        assert_eq!(buttons[0]["args"][0]["visible"], json!([true, true, true, true]));
        assert_eq!(buttons[1]["args"][0]["visible"], json!([true, false, false, false]));
        assert_eq!(buttons[2]["args"][0]["visible"], json!([false, true, true, false]));
        assert_eq!(menu["y"], json!(1.2));
    }

    #[test]
    fn unit_menu_swaps_ecg_and_relabels_axis() {
        let idx = index();
        let initial = idx.initial_visibility();
        let menu = to_json(&unit_menu(&idx, &initial));
        let buttons = menu["buttons"].as_array().unwrap();

        assert_eq!(buttons[0]["label"], "ECG in mV");
        assert_eq!(buttons[0]["args"][0]["visible"], json!([true, true, true, false]));
        assert_eq!(buttons[0]["args"][1]["yaxis2"]["title"], "ECG (mV) / CM (μV)");

        assert_eq!(buttons[1]["label"], "ECG in μV");
        assert_eq!(buttons[1]["args"][0]["visible"], json!([true, true, false, true]));
        assert_eq!(buttons[1]["args"][1]["yaxis2"]["title"], "ECG (μV) / CM (μV)");
        assert_eq!(buttons[1]["args"][1]["yaxis2"]["overlaying"], "y");
        assert_eq!(buttons[1]["args"][1]["yaxis2"]["showgrid"], false);
    }
}
