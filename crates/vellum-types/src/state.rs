//! Control-state snapshots.
//!
//! A [`ControlState`] captures everything that affects a control's rendered
//! appearance (kind, presentation, flags, value, animation frame) but not its
//! size or position. Widget policy layers build one per paint call; once
//! built it is never mutated, so it can be cloned into cache keys safely.

use serde::Deserialize;

/// The kind of control a native rasterizer is asked to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    PushButton,
    BevelButton,
    CheckBox,
    RadioButton,
    ComboBox,
    PopupButton,
    ScrollBarTrack,
    ScrollBarThumb,
    SliderTrack,
    SliderThumb,
    ProgressBar,
    MenuItem,
    MenuBar,
    TabButton,
    TextField,
    TreeDisclosure,
    FrameTitleBar,
}

impl WidgetKind {
    /// Every widget kind, in declaration order.
    pub const ALL: [WidgetKind; 17] = [
        WidgetKind::PushButton,
        WidgetKind::BevelButton,
        WidgetKind::CheckBox,
        WidgetKind::RadioButton,
        WidgetKind::ComboBox,
        WidgetKind::PopupButton,
        WidgetKind::ScrollBarTrack,
        WidgetKind::ScrollBarThumb,
        WidgetKind::SliderTrack,
        WidgetKind::SliderThumb,
        WidgetKind::ProgressBar,
        WidgetKind::MenuItem,
        WidgetKind::MenuBar,
        WidgetKind::TabButton,
        WidgetKind::TextField,
        WidgetKind::TreeDisclosure,
        WidgetKind::FrameTitleBar,
    ];
}

/// Interaction state of the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Presentation {
    #[default]
    Active,
    Inactive,
    Disabled,
    Pressed,
    Rollover,
}

/// Size class of the control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlSize {
    Mini,
    Small,
    #[default]
    Regular,
    Large,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Direction of an arrow, disclosure triangle, or slider tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// Immutable snapshot of a control's visual state.
///
/// The numeric value is stored as normalized `f32` bits so the whole
/// snapshot can be `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlState {
    pub kind: WidgetKind,
    pub presentation: Presentation,
    pub size: ControlSize,
    pub orientation: Orientation,
    pub direction: Direction,
    pub focused: bool,
    pub animating: bool,
    pub is_default: bool,
    value_bits: u32,
    pub frame: Option<u32>,
}

impl ControlState {
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            presentation: Presentation::Active,
            size: ControlSize::Regular,
            orientation: Orientation::Horizontal,
            direction: Direction::None,
            focused: false,
            animating: false,
            is_default: false,
            value_bits: 0f32.to_bits(),
            frame: None,
        }
    }

    /// The numeric value, always in `[0, 1]`.
    pub fn value(&self) -> f32 {
        f32::from_bits(self.value_bits)
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_size(mut self, size: ControlSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Set the numeric value. NaN maps to 0, everything else is clamped
    /// into `[0, 1]`, and `-0.0` is folded into `0.0`.
    pub fn with_value(mut self, value: f32) -> Self {
        let v = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, 1.0)
        };
        // `-0.0 + 0.0 == +0.0`
        self.value_bits = (v + 0.0).to_bits();
        self
    }

    /// Mark the state as one frame of an animation. Animating states are
    /// never cached.
    pub fn with_frame(mut self, frame: u32) -> Self {
        self.animating = true;
        self.frame = Some(frame);
        self
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }
}
