use super::model::{ChannelRole, ClassifiedChannels, DerivedSeries, EcgUnit, SignalTable};

// ---------------------------------------------------------------------------
// Static channel tables
// ---------------------------------------------------------------------------

/// Name of the time axis column.
pub const TIME_COLUMN: &str = "Time";

/// Canonical 10-20 scalp electrodes.
pub const EEG_CHANNELS: [&str; 21] = [
    "Fz", "Cz", "P3", "C3", "F3", "F4", "C4", "P4", "Fp1", "Fp2", "T3", "T4", "T5", "T6", "O1",
    "O2", "F7", "F8", "A1", "A2", "Pz",
];

/// Periorbital leads that carry ECG, mapped to their display names.
pub const ECG_CHANNELS: [(&str, &str); 2] = [("X1:LEOG", "ECG_Left"), ("X2:REOG", "ECG_Right")];

/// Common-mode reference column and its trace label.
pub const REFERENCE_CHANNEL: &str = "CM";
pub const REFERENCE_LABEL: &str = "CM (μV, reference)";

/// Telemetry / status / event fields that never reach classification.
pub const IGNORE_EXACT: [&str; 6] = [
    "Trigger",
    "Time_Offset",
    "ADC_Status",
    "ADC_Sequence",
    "Event",
    "Comments",
];
pub const IGNORE_PREFIXES: [&str; 1] = ["X3:"];

// ---------------------------------------------------------------------------
// Column rules
// ---------------------------------------------------------------------------

/// Whether a column is dropped before classification.
pub fn is_ignored(name: &str) -> bool {
    IGNORE_EXACT.contains(&name) || IGNORE_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Display name for an ECG lead, if `name` is one.
pub fn ecg_display_name(name: &str) -> Option<&'static str> {
    ECG_CHANNELS
        .iter()
        .find(|(raw, _)| *raw == name)
        .map(|(_, nice)| *nice)
}

/// Role of a column, decided from its name alone.
pub fn classify(name: &str) -> ChannelRole {
    if is_ignored(name) {
        ChannelRole::Ignored
    } else if EEG_CHANNELS.contains(&name) {
        ChannelRole::Eeg
    } else if ecg_display_name(name).is_some() {
        ChannelRole::EcgRaw
    } else if name == REFERENCE_CHANNEL {
        ChannelRole::Reference
    } else {
        ChannelRole::Ignored
    }
}

/// Trace label for an ECG lead in the given unit, e.g. `ECG_Left (μV)`.
pub fn ecg_label(display_name: &str, unit: EcgUnit) -> String {
    format!("{display_name} ({})", unit.label())
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Partition the table's columns into role groups and derive both ECG units.
///
/// Columns that match no role are skipped without error; the caller decides
/// whether an empty result is fatal.
pub fn split_roles(table: &SignalTable) -> ClassifiedChannels {
    let mut out = ClassifiedChannels::default();

    for col in &table.columns {
        let role = classify(&col.name);
        log::debug!("Column '{}' classified as {role}", col.name);
        match role {
            ChannelRole::Eeg => out.eeg.push(DerivedSeries {
                label: col.name.clone(),
                values: col.values.clone(),
            }),
            ChannelRole::Reference => out.reference.push(DerivedSeries {
                label: REFERENCE_LABEL.to_string(),
                values: col.values.clone(),
            }),
            ChannelRole::EcgRaw => {
                let nice = ecg_display_name(&col.name).unwrap_or(col.name.as_str());
                for (unit, group) in [
                    (EcgUnit::MilliVolt, &mut out.ecg_mv),
                    (EcgUnit::MicroVolt, &mut out.ecg_uv),
                ] {
                    group.push(DerivedSeries {
                        label: ecg_label(nice, unit),
                        values: col.values.iter().map(|v| v * unit.scale()).collect(),
                    });
                }
            }
            ChannelRole::Ignored => {}
        }
    }

    out
}
