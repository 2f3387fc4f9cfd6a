//! Knob pages and the control source the engine reads once per block.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::bit_hash::fuegoize;
use crate::graph::{frog::DRIVE_DEFAULT_KNOBS, marbles::MARBLES_DEFAULT_KNOBS, tone::ToneStage};

/// Knobs on each page, including the fuegoization knob.
pub const KNOBS_PER_PAGE: usize = 8;
/// Knobs that drive parameters on each page.
pub const PARAMS_PER_PAGE: usize = 7;
/// Slot of the fuegoization knob on every page.
pub const FUEG_INDEX: usize = 7;

/// The three knob pages of the instrument.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Filter,
    Drive,
    Marbles,
}

impl PageId {
    pub const ALL: [PageId; 3] = [PageId::Filter, PageId::Drive, PageId::Marbles];

    pub fn name(&self) -> &'static str {
        match self {
            PageId::Filter => "filter",
            PageId::Drive => "drive",
            PageId::Marbles => "marbles",
        }
    }

    /// Cycle to the next page, wrapping around.
    pub fn next(&self) -> PageId {
        match self {
            PageId::Filter => PageId::Drive,
            PageId::Drive => PageId::Marbles,
            PageId::Marbles => PageId::Filter,
        }
    }
}

/// Where the engine gets its knob values from.
///
/// Called once per block per parameter. Values are expected in [0, 1]; the
/// engine clamps whatever comes back.
pub trait ControlSource {
    fn get_param(&self, page: PageId, index: usize) -> f32;
}

/// One page of eight knobs: seven parameters and FUEG.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobPage {
    values: [f32; KNOBS_PER_PAGE],
}

impl KnobPage {
    /// Page with the given parameter knobs and FUEG at zero.
    pub fn new(params: [f32; PARAMS_PER_PAGE]) -> Self {
        let mut values = [0.0; KNOBS_PER_PAGE];
        values[..PARAMS_PER_PAGE].copy_from_slice(&params);
        Self { values }
    }

    /// Raw knob value. Out-of-range indices read as 0.
    pub fn get(&self, index: usize) -> f32 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Set a knob, clamped to [0, 1]. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value.clamp(0.0, 1.0);
        }
    }

    /// Knob value after fuegoization by this page's FUEG knob.
    pub fn param(&self, index: usize) -> f32 {
        if index >= PARAMS_PER_PAGE {
            return self.get(index);
        }
        fuegoize(self.values[index], self.values[FUEG_INDEX], index)
    }
}

/// The default control surface: three pages of knobs held in memory.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnobPages {
    pub filter: KnobPage,
    pub drive: KnobPage,
    pub marbles: KnobPage,
}

impl KnobPages {
    /// Power-up knob positions for a tone stage.
    pub fn for_stage<T: ToneStage>() -> Self {
        Self {
            filter: KnobPage::new(T::DEFAULT_KNOBS),
            drive: KnobPage::new(DRIVE_DEFAULT_KNOBS),
            marbles: KnobPage::new(MARBLES_DEFAULT_KNOBS),
        }
    }

    pub fn page(&self, page: PageId) -> &KnobPage {
        match page {
            PageId::Filter => &self.filter,
            PageId::Drive => &self.drive,
            PageId::Marbles => &self.marbles,
        }
    }

    pub fn page_mut(&mut self, page: PageId) -> &mut KnobPage {
        match page {
            PageId::Filter => &mut self.filter,
            PageId::Drive => &mut self.drive,
            PageId::Marbles => &mut self.marbles,
        }
    }

    pub fn set(&mut self, page: PageId, index: usize, value: f32) {
        self.page_mut(page).set(index, value);
    }
}

impl ControlSource for KnobPages {
    fn get_param(&self, page: PageId, index: usize) -> f32 {
        self.page(page).param(index)
    }
}

/// Read the seven parameter knobs of a page, clamped to [0, 1].
pub fn read_page<C: ControlSource + ?Sized>(controls: &C, page: PageId) -> [f32; PARAMS_PER_PAGE] {
    std::array::from_fn(|i| controls.get_param(page, i).clamp(0.0, 1.0))
}
