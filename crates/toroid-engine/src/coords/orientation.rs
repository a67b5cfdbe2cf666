use glam::Mat4;

/// Rotation of the presented surface relative to the display's native
/// orientation.
///
/// Content drawn to the presented surface must be counter-rotated so it
/// appears upright. Offscreen targets are never rotated.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DisplayOrientation {
    #[default]
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl DisplayOrientation {
    /// Clip-space correction applied after the projection.
    ///
    /// Entries are exact so the identity case leaves the projection
    /// bit-for-bit unchanged.
    pub fn correction(self) -> Mat4 {
        match self {
            DisplayOrientation::Identity => Mat4::IDENTITY,
            DisplayOrientation::Rotate90 => Mat4::from_cols_array(&[
                0.0, 1.0, 0.0, 0.0, //
                -1.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]),
            DisplayOrientation::Rotate180 => Mat4::from_cols_array(&[
                -1.0, 0.0, 0.0, 0.0, //
                0.0, -1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]),
            DisplayOrientation::Rotate270 => Mat4::from_cols_array(&[
                0.0, -1.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn quarter_turns_compose_to_identity() {
        let q = DisplayOrientation::Rotate90.correction();
        assert_eq!(q * q * q * q, Mat4::IDENTITY);
        assert_eq!(q * q, DisplayOrientation::Rotate180.correction());
        assert_eq!(q * DisplayOrientation::Rotate270.correction(), Mat4::IDENTITY);
    }

    #[test]
    fn rotate90_turns_x_into_y() {
        let v = DisplayOrientation::Rotate90.correction() * Vec4::new(1.0, 0.0, 0.5, 1.0);
        assert_eq!(v, Vec4::new(0.0, 1.0, 0.5, 1.0));
    }
}
