use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::consts;

const MARGIN: i32 = 8;
const TITLE_HEIGHT: u32 = 16;
const SLIDER_HEIGHT: u32 = 34;
const BUTTON_HEIGHT: u32 = 22;
const GAP: i32 = 6;

/// Containers on the page, addressed by their element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    FrequencySliderContainer,
    VolumeSliderContainer,
    PlayButtonContainer,
    Status,
}

impl ElementId {
    pub const ALL: [ElementId; 4] = [
        ElementId::FrequencySliderContainer,
        ElementId::VolumeSliderContainer,
        ElementId::PlayButtonContainer,
        ElementId::Status,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ElementId::FrequencySliderContainer => "frequency-slider-container",
            ElementId::VolumeSliderContainer => "volume-slider-container",
            ElementId::PlayButtonContainer => "play-button-container",
            ElementId::Status => "status",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == id)
    }

    /// Where the container sits on the page.
    pub fn area(self) -> Rectangle {
        let width = consts::WIDTH - 2 * MARGIN as u32;
        let mut y = MARGIN + TITLE_HEIGHT as i32;

        let (height, index) = match self {
            ElementId::FrequencySliderContainer => (SLIDER_HEIGHT, 0),
            ElementId::VolumeSliderContainer => (SLIDER_HEIGHT, 1),
            ElementId::PlayButtonContainer => (BUTTON_HEIGHT, 2),
            ElementId::Status => (consts::HEIGHT - Self::status_top() as u32 - MARGIN as u32, 3),
        };

        let heights = [SLIDER_HEIGHT, SLIDER_HEIGHT, BUTTON_HEIGHT];
        for h in heights.iter().take(index) {
            y += *h as i32 + GAP;
        }

        Rectangle::new(Point::new(MARGIN, y), Size::new(width, height))
    }

    fn status_top() -> i32 {
        MARGIN + TITLE_HEIGHT as i32 + 2 * (SLIDER_HEIGHT as i32 + GAP) + BUTTON_HEIGHT as i32 + GAP
    }
}

impl core::fmt::Display for ElementId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area of the page title.
pub fn title_area() -> Rectangle {
    Rectangle::new(
        Point::new(MARGIN, MARGIN),
        Size::new(consts::WIDTH - 2 * MARGIN as u32, TITLE_HEIGHT),
    )
}
