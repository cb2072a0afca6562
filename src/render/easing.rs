//! Easing curves for the entry transition.

/// Curve applied to linear fade progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic ease-out: `1 - (1-t)²`. Matches the `ease-out` timing of
    /// the injected style rule.
    #[default]
    EaseOut,
}

impl Easing {
    /// Apply the curve. Input is clamped to `[0.0, 1.0]`.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut] {
            assert!((easing.apply(0.0)).abs() < f32::EPSILON);
            assert!((easing.apply(1.0) - 1.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(Easing::EaseOut.apply(0.5) > Easing::Linear.apply(0.5));
        assert!((Easing::EaseOut.apply(0.5) - 0.75).abs() < f32::EPSILON);
    }
}
