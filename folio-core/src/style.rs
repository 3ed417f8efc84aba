use serde::{Deserialize, Serialize};

/// Animatable properties written onto one element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub opacity: f64,
    pub scale: f64,
    pub rotation_deg: f64,
    /// Vertical offset relative to the element's own height.
    pub y_percent: f64,
    pub y_px: f64,
    pub x_px: f64,
    pub skew_x_deg: f64,
    pub blur_px: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Style {
    pub const IDENTITY: Style = Style {
        opacity: 1.0,
        scale: 1.0,
        rotation_deg: 0.0,
        y_percent: 0.0,
        y_px: 0.0,
        x_px: 0.0,
        skew_x_deg: 0.0,
        blur_px: 0.0,
    };

    pub const HIDDEN: Style = Style {
        opacity: 0.0,
        ..Style::IDENTITY
    };

    pub fn with_opacity(self, opacity: f64) -> Self {
        Style { opacity, ..self }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Style { scale, ..self }
    }

    pub fn with_rotation(self, rotation_deg: f64) -> Self {
        Style {
            rotation_deg,
            ..self
        }
    }

    pub fn with_y_percent(self, y_percent: f64) -> Self {
        Style { y_percent, ..self }
    }

    pub fn with_y_px(self, y_px: f64) -> Self {
        Style { y_px, ..self }
    }

    pub fn with_x_px(self, x_px: f64) -> Self {
        Style { x_px, ..self }
    }

    pub fn with_skew_x(self, skew_x_deg: f64) -> Self {
        Style { skew_x_deg, ..self }
    }

    pub fn with_blur(self, blur_px: f64) -> Self {
        Style { blur_px, ..self }
    }

    pub fn lerp(&self, to: &Style, t: f64) -> Style {
        if t == 1.0 {
            return *to;
        }
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Style {
            opacity: mix(self.opacity, to.opacity),
            scale: mix(self.scale, to.scale),
            rotation_deg: mix(self.rotation_deg, to.rotation_deg),
            y_percent: mix(self.y_percent, to.y_percent),
            y_px: mix(self.y_px, to.y_px),
            x_px: mix(self.x_px, to.x_px),
            skew_x_deg: mix(self.skew_x_deg, to.skew_x_deg),
            blur_px: mix(self.blur_px, to.blur_px),
        }
    }

    /// CSS `transform` value.
    pub fn css_transform(&self) -> String {
        let mut out = format!(
            "translateY({:.3}%) translateY({:.2}px) scale({:.4}) rotate({:.2}deg)",
            self.y_percent, self.y_px, self.scale, self.rotation_deg
        );
        if self.x_px != 0.0 || self.skew_x_deg != 0.0 {
            out.push_str(&format!(
                " translateX({:.2}px) skewX({:.2}deg)",
                self.x_px, self.skew_x_deg
            ));
        }
        out
    }

    pub fn css_opacity(&self) -> String {
        format!("{:.4}", self.opacity.clamp(0.0, 1.0))
    }

    pub fn css_filter(&self) -> String {
        if self.blur_px <= 0.0 {
            "none".to_string()
        } else {
            format!("blur({:.2}px)", self.blur_px)
        }
    }

    /// `(property, value)` pairs ready for `style.setProperty`.
    pub fn css_properties(&self) -> [(&'static str, String); 3] {
        [
            ("transform", self.css_transform()),
            ("opacity", self.css_opacity()),
            ("filter", self.css_filter()),
        ]
    }
}
