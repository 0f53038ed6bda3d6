use crate::data::model::{ClassifiedChannels, EcgUnit};

// ---------------------------------------------------------------------------
// Trace groups
// ---------------------------------------------------------------------------

/// Which classified group a trace was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceGroup {
    Eeg,
    Reference,
    EcgMv,
    EcgUv,
}

/// Group of every trace, in the order traces are added to the chart:
/// EEG, then reference, then ECG in mV, then ECG in μV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceIndex {
    groups: Vec<TraceGroup>,
}

impl TraceIndex {
    pub fn from_channels(channels: &ClassifiedChannels) -> Self {
        let groups = [
            (TraceGroup::Eeg, channels.eeg.len()),
            (TraceGroup::Reference, channels.reference.len()),
            (TraceGroup::EcgMv, channels.ecg_mv.len()),
            (TraceGroup::EcgUv, channels.ecg_uv.len()),
        ]
        .into_iter()
        .flat_map(|(g, n)| std::iter::repeat(g).take(n))
        .collect();
        TraceIndex { groups }
    }

    /// Total number of traces.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, trace: usize) -> Option<TraceGroup> {
        self.groups.get(trace).copied()
    }

    /// Positions of the traces belonging to `group`.
    pub fn indices(&self, group: TraceGroup) -> Vec<usize> {
        self.groups
            .iter()
            .enumerate()
            .filter(|(_, g)| **g == group)
            .map(|(i, _)| i)
            .collect()
    }

    /// Default state: everything visible except ECG in μV, so mV is the
    /// starting unit.
    pub fn initial_visibility(&self) -> Vec<bool> {
        self.mask(|g| g != TraceGroup::EcgUv)
    }

    /// Full visibility vector for a channel-group preset.
    pub fn preset(&self, preset: Preset) -> Vec<bool> {
        match preset {
            Preset::All => self.mask(|_| true),
            Preset::EegOnly => self.mask(|g| g == TraceGroup::Eeg),
            // μV traces stay hidden here whatever the unit menu says
            Preset::EcgAndReference => {
                self.mask(|g| matches!(g, TraceGroup::Reference | TraceGroup::EcgMv))
            }
        }
    }

    fn mask(&self, f: impl Fn(TraceGroup) -> bool) -> Vec<bool> {
        self.groups.iter().map(|g| f(*g)).collect()
    }
}

// ---------------------------------------------------------------------------
// Menu options
// ---------------------------------------------------------------------------

/// Options of the channel-group menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    All,
    EegOnly,
    EcgAndReference,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::All, Preset::EegOnly, Preset::EcgAndReference];

    pub fn label(self) -> &'static str {
        match self {
            Preset::All => "All",
            Preset::EegOnly => "EEG only",
            Preset::EcgAndReference => "ECG+CM only",
        }
    }
}

/// Visibility after switching the ECG unit.
///
/// EEG and reference entries are copied from `current`; the two ECG groups
/// are overwritten so exactly one unit is shown.
pub fn unit_mode_visibility(current: &[bool], index: &TraceIndex, unit: EcgUnit) -> Vec<bool> {
    current
        .iter()
        .enumerate()
        .map(|(i, &vis)| match (index.group(i), unit) {
            (Some(TraceGroup::EcgMv), EcgUnit::MilliVolt) => true,
            (Some(TraceGroup::EcgMv), EcgUnit::MicroVolt) => false,
            (Some(TraceGroup::EcgUv), EcgUnit::MilliVolt) => false,
            (Some(TraceGroup::EcgUv), EcgUnit::MicroVolt) => true,
            _ => vis,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DerivedSeries;

    fn series(label: &str) -> DerivedSeries {
        DerivedSeries {
            label: label.to_string(),
            values: vec![0.0],
        }
    }

    /// 2 EEG, 1 CM, 2 ECG leads (4 ECG traces).
    fn index() -> TraceIndex {
        TraceIndex::from_channels(&ClassifiedChannels {
            eeg: vec![series("Fz"), series("Cz")],
            reference: vec![series("CM")],
            ecg_mv: vec![series("L mV"), series("R mV")],
            ecg_uv: vec![series("L uV"), series("R uV")],
        })
    }

    #[test]
    fn traces_are_ordered_by_group() {
        let idx = index();
        assert_eq!(idx.len(), 7);
        assert_eq!(idx.indices(TraceGroup::Eeg), vec![0, 1]);
        assert_eq!(idx.indices(TraceGroup::Reference), vec![2]);
        assert_eq!(idx.indices(TraceGroup::EcgMv), vec![3, 4]);
        assert_eq!(idx.indices(TraceGroup::EcgUv), vec![5, 6]);
        assert_eq!(idx.group(7), None);
    }

    #[test]
    fn default_shows_mv_only() {
        assert_eq!(
            index().initial_visibility(),
            vec![true, true, true, true, true, false, false]
        );
    }

    #[test]
    fn presets() {
        let idx = index();
        assert_eq!(idx.preset(Preset::All), vec![true; 7]);

        let eeg = idx.preset(Preset::EegOnly);
        assert_eq!(eeg.iter().filter(|v| **v).count(), 2);
        assert_eq!(eeg, vec![true, true, false, false, false, false, false]);

        assert_eq!(
            idx.preset(Preset::EcgAndReference),
            vec![false, false, true, true, true, false, false]
        );
    }

    #[test]
    fn unit_toggle_preserves_non_ecg_state() {
        let idx = index();
        let current = vec![false, true, false, true, true, false, false];

        assert_eq!(
            unit_mode_visibility(&current, &idx, EcgUnit::MicroVolt),
            vec![false, true, false, false, false, true, true]
        );
        assert_eq!(
            unit_mode_visibility(&current, &idx, EcgUnit::MilliVolt),
            vec![false, true, false, true, true, false, false]
        );
    }

    #[test]
    fn empty_index_gives_empty_vectors() {
        let idx = TraceIndex::from_channels(&ClassifiedChannels::default());
        assert_eq!(idx.len(), 0);
        assert!(idx.preset(Preset::All).is_empty());
        assert!(unit_mode_visibility(&[], &idx, EcgUnit::MicroVolt).is_empty());
    }
}
