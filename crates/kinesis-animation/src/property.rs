use kinesis_core::{CornerRadii, SceneNode};

/// Node properties an animation may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimatedProperty {
    Opacity,
    ScrollX,
    ScrollY,
    /// All four corners at once.
    BorderRadius,
    BorderWidth,
    FontSize,
    RotationAngle,
    /// Parent-relative layout position.
    X,
    Y,
}

impl AnimatedProperty {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "opacity" => Some(AnimatedProperty::Opacity),
            "scrollX" => Some(AnimatedProperty::ScrollX),
            "scrollY" => Some(AnimatedProperty::ScrollY),
            "borderRadius" => Some(AnimatedProperty::BorderRadius),
            "borderWidth" => Some(AnimatedProperty::BorderWidth),
            "fontSize" => Some(AnimatedProperty::FontSize),
            "_rotationAngle" => Some(AnimatedProperty::RotationAngle),
            "x" => Some(AnimatedProperty::X),
            "y" => Some(AnimatedProperty::Y),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AnimatedProperty::Opacity => "opacity",
            AnimatedProperty::ScrollX => "scrollX",
            AnimatedProperty::ScrollY => "scrollY",
            AnimatedProperty::BorderRadius => "borderRadius",
            AnimatedProperty::BorderWidth => "borderWidth",
            AnimatedProperty::FontSize => "fontSize",
            AnimatedProperty::RotationAngle => "_rotationAngle",
            AnimatedProperty::X => "x",
            AnimatedProperty::Y => "y",
        }
    }

    /// Current value; the top-left corner stands in for the border radius.
    pub fn read(self, node: &SceneNode) -> f32 {
        match self {
            AnimatedProperty::Opacity => node.opacity,
            AnimatedProperty::ScrollX => node.scroll_x,
            AnimatedProperty::ScrollY => node.scroll_y,
            AnimatedProperty::BorderRadius => node.border_radii.top_left,
            AnimatedProperty::BorderWidth => node.border_width,
            AnimatedProperty::FontSize => node.font_size,
            AnimatedProperty::RotationAngle => node.rotation_angle,
            AnimatedProperty::X => node.layout.x,
            AnimatedProperty::Y => node.layout.y,
        }
    }

    pub fn write(self, node: &mut SceneNode, value: f32) {
        match self {
            AnimatedProperty::Opacity => node.opacity = value,
            AnimatedProperty::ScrollX => node.scroll_x = value,
            AnimatedProperty::ScrollY => node.scroll_y = value,
            AnimatedProperty::BorderRadius => node.border_radii = CornerRadii::uniform(value),
            AnimatedProperty::BorderWidth => node.border_width = value,
            AnimatedProperty::FontSize => node.font_size = value,
            AnimatedProperty::RotationAngle => node.rotation_angle = value,
            AnimatedProperty::X => node.layout.x = value,
            AnimatedProperty::Y => node.layout.y = value,
        }
    }
}
