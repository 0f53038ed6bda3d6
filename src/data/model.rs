use std::fmt;

// ---------------------------------------------------------------------------
// SignalTable – the loaded recording
// ---------------------------------------------------------------------------

/// One named data column, aligned row-by-row with the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    /// Numeric values; cells that failed coercion are `NaN`.
    pub values: Vec<f64>,
}

/// The recording after validation: a sorted time axis plus every column that
/// survived the ignore rules, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    /// Time axis in seconds, non-decreasing.
    pub time: Vec<f64>,
    pub columns: Vec<Column>,
}

impl SignalTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Ordered list of data column names (excludes the time column).
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

// ---------------------------------------------------------------------------
// ChannelRole – what a column means
// ---------------------------------------------------------------------------

/// Semantic role of a non-time column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
    /// Standard 10-20 scalp electrode.
    Eeg,
    /// Periorbital lead that is relabelled as ECG.
    EcgRaw,
    /// Common-mode reference channel.
    Reference,
    Ignored,
}

impl fmt::Display for ChannelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelRole::Eeg => write!(f, "EEG"),
            ChannelRole::EcgRaw => write!(f, "ECG"),
            ChannelRole::Reference => write!(f, "CM"),
            ChannelRole::Ignored => write!(f, "ignored"),
        }
    }
}

// ---------------------------------------------------------------------------
// ECG units and derived series
// ---------------------------------------------------------------------------

/// Display unit of an ECG trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcgUnit {
    MilliVolt,
    MicroVolt,
}

impl EcgUnit {
    /// Label used in trace names and axis titles.
    pub fn label(self) -> &'static str {
        match self {
            EcgUnit::MilliVolt => "mV",
            EcgUnit::MicroVolt => "μV",
        }
    }

    /// Multiplier applied to the raw (mV) samples.
    pub fn scale(self) -> f64 {
        match self {
            EcgUnit::MilliVolt => 1.0,
            EcgUnit::MicroVolt => 1000.0,
        }
    }
}

/// A named series ready to become one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    /// Trace label, e.g. `ECG_Left (mV)`.
    pub label: String,
    pub values: Vec<f64>,
}

/// Output of the column classifier: every productive column grouped by role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedChannels {
    /// EEG columns, input order.
    pub eeg: Vec<DerivedSeries>,
    /// Reference columns; labels are already the fixed display name.
    pub reference: Vec<DerivedSeries>,
    pub ecg_mv: Vec<DerivedSeries>,
    pub ecg_uv: Vec<DerivedSeries>,
}

impl ClassifiedChannels {
    /// Number of raw ECG columns that fed the two unit groups.
    pub fn ecg_raw_count(&self) -> usize {
        self.ecg_mv.len()
    }

    /// True when no column landed in a productive role.
    pub fn is_empty(&self) -> bool {
        self.eeg.is_empty() && self.reference.is_empty() && self.ecg_mv.is_empty()
    }

    /// Total number of traces the scene will contain.
    pub fn trace_count(&self) -> usize {
        self.eeg.len() + self.reference.len() + self.ecg_mv.len() + self.ecg_uv.len()
    }
}
