//! Piecewise-linear color gradients.

/// An RGB color stop at a position in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: f64,
    pub rgb: [u8; 3],
}

const fn anchor(position: f64, rgb: [u8; 3]) -> Anchor {
    Anchor { position, rgb }
}

/// Blue, cyan, green, yellow, red at even spacing.
pub const JET_ANCHORS: [Anchor; 5] = [
    anchor(0.0, [0x00, 0x00, 0xff]),
    anchor(0.25, [0x00, 0xff, 0xff]),
    anchor(0.5, [0x00, 0xff, 0x00]),
    anchor(0.75, [0xff, 0xff, 0x00]),
    anchor(1.0, [0xff, 0x00, 0x00]),
];

/// Interpolation table over sorted anchors.
#[derive(Debug, Clone, Copy)]
pub struct ColorGradient {
    anchors: &'static [Anchor],
}

impl ColorGradient {
    pub const fn jet() -> Self {
        Self {
            anchors: &JET_ANCHORS,
        }
    }

    /// Color at `t`, clamped to `[0, 1]`; NaN maps to the first anchor.
    pub fn sample(&self, t: f64) -> [u8; 3] {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let first = self.anchors[0];
        if t <= first.position {
            return first.rgb;
        }
        for pair in self.anchors.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let f = (t - lo.position) / (hi.position - lo.position);
                return [
                    lerp(lo.rgb[0], hi.rgb[0], f),
                    lerp(lo.rgb[1], hi.rgb[1], f),
                    lerp(lo.rgb[2], hi.rgb[2], f),
                ];
            }
        }
        self.anchors[self.anchors.len() - 1].rgb
    }

    /// `#rrggbb` at `t`.
    pub fn hex(&self, t: f64) -> String {
        let [r, g, b] = self.sample(t);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Default for ColorGradient {
    fn default() -> Self {
        Self::jet()
    }
}

fn lerp(from: u8, to: u8, f: f64) -> u8 {
    let value = f64::from(from) + (f64::from(to) - f64::from(from)) * f;
    value.round().clamp(0.0, 255.0) as u8
}
