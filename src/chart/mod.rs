/// Chart layer: turns classified channels into a plotly scene.
///
/// `visibility` holds the pure trace-group and preset logic, `menus` turns it
/// into dropdowns, and `plot` assembles traces, axes and layout.

pub mod menus;
pub mod plot;
pub mod visibility;
