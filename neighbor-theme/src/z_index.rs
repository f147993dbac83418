//! Stacking order of layered surfaces.
//!
//! Values are spaced so that a surface can be slotted between two layers
//! without renumbering the rest.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::merge::{Merge, merge_fields};

/// Caller supplied z-index options.
#[derive(Builder, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned", default, setter(into, strip_option))]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct ZIndexOptions {
    pub mobile_stepper: Option<u32>,
    pub fab: Option<u32>,
    pub speed_dial: Option<u32>,
    pub drawer: Option<u32>,
    pub modal: Option<u32>,
    pub snackbar: Option<u32>,
    pub tooltip: Option<u32>,
}

merge_fields!(ZIndexOptions {
    mobile_stepper,
    fab,
    speed_dial,
    drawer,
    modal,
    snackbar,
    tooltip,
});

/// Resolved z-index layers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ZIndex {
    pub mobile_stepper: u32,
    pub fab: u32,
    pub speed_dial: u32,
    pub drawer: u32,
    pub modal: u32,
    pub snackbar: u32,
    pub tooltip: u32,
}

impl Default for ZIndex {
    fn default() -> Self {
        Self {
            mobile_stepper: 1000,
            fab: 1050,
            speed_dial: 1050,
            drawer: 1200,
            modal: 1300,
            snackbar: 1400,
            tooltip: 1500,
        }
    }
}

fn overwrite(slot: &mut u32, value: Option<u32>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Merge<ZIndexOptions> for ZIndex {
    fn merge_from(&mut self, overlay: ZIndexOptions) {
        overwrite(&mut self.mobile_stepper, overlay.mobile_stepper);
        overwrite(&mut self.fab, overlay.fab);
        overwrite(&mut self.speed_dial, overlay.speed_dial);
        overwrite(&mut self.drawer, overlay.drawer);
        overwrite(&mut self.modal, overlay.modal);
        overwrite(&mut self.snackbar, overlay.snackbar);
        overwrite(&mut self.tooltip, overlay.tooltip);
    }
}

impl ZIndex {
    /// Converts back into options.
    pub fn to_options(&self) -> ZIndexOptions {
        ZIndexOptions {
            mobile_stepper: Some(self.mobile_stepper),
            fab: Some(self.fab),
            speed_dial: Some(self.speed_dial),
            drawer: Some(self.drawer),
            modal: Some(self.modal),
            snackbar: Some(self.snackbar),
            tooltip: Some(self.tooltip),
        }
    }
}

/// Builds z-index layers from partial options.
pub fn create_z_index(options: ZIndexOptions) -> ZIndex {
    let mut z_index = ZIndex::default();
    z_index.merge_from(options);
    z_index
}
