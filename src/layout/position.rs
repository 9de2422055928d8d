use crate::foundation::{
    core::{Dimensions, PixelOffset},
    error::{StampError, StampResult},
};

/// Symbolic placement of a stamp on the canvas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Repeat the stamp across the whole canvas; position is ignored.
    Tile,
    /// The explicit position in the configuration is authoritative.
    Custom,
}

impl Anchor {
    pub const ALL: [Anchor; 11] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterLeft,
        Anchor::Center,
        Anchor::CenterRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
        Anchor::Tile,
        Anchor::Custom,
    ];

    pub fn is_tile(self) -> bool {
        self == Anchor::Tile
    }

    pub fn is_custom(self) -> bool {
        self == Anchor::Custom
    }

    pub fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::CenterLeft => "center-left",
            Anchor::Center => "center",
            Anchor::CenterRight => "center-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
            Anchor::Tile => "tile",
            Anchor::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Anchor {
    type Err = StampError;

    /// Accepts `top-left`, `top_left`, `TOP_LEFT` and `TopLeft` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        Anchor::ALL
            .into_iter()
            .find(|a| a.name().replace('-', "") == key)
            .ok_or_else(|| StampError::validation(format!("unknown anchor '{s}'")))
    }
}

/// Map an anchor onto pixel coordinates for a stamp of `stamp` size on a `canvas`.
///
/// Origin is top-left, x grows right and y grows down. The returned `y` is the *bottom* edge
/// (text baseline) of the stamp box, not its top. All halving uses integer division with no
/// correction for odd sizes, so centred placement may sit one pixel off true centre.
///
/// [`Anchor::Tile`] and [`Anchor::Custom`] carry no placement of their own and resolve like
/// [`Anchor::Center`]. Results are not clamped: a stamp larger than the canvas yields negative
/// coordinates.
pub fn resolve(anchor: Anchor, canvas: Dimensions, stamp: Dimensions) -> PixelOffset {
    let (cw, ch) = (canvas.width_i32(), canvas.height_i32());
    let (sw, sh) = (stamp.width_i32(), stamp.height_i32());

    let left = 0;
    let center_x = (cw / 2) - (sw / 2);
    let right = cw - sw;

    let top = sh;
    let center_y = (ch / 2) + (sh / 2);
    let bottom = ch;

    let (x, y) = match anchor {
        Anchor::TopLeft => (left, top),
        Anchor::TopCenter => (center_x, top),
        Anchor::TopRight => (right, top),
        Anchor::CenterLeft => (left, center_y),
        Anchor::CenterRight => (right, center_y),
        Anchor::BottomLeft => (left, bottom),
        Anchor::BottomCenter => (center_x, bottom),
        Anchor::BottomRight => (right, bottom),
        Anchor::Center | Anchor::Tile | Anchor::Custom => (center_x, center_y),
    };
    PixelOffset::new(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/position.rs"]
mod tests;
