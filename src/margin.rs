use core::fmt;
use core::str::FromStr;

use crate::Rect;

/// A single root-margin component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarginLength {
    Px(f64),
    /// Percentage of the root's width (left/right) or height (top/bottom).
    Percent(f64),
}

impl MarginLength {
    pub fn resolve(&self, basis: f64) -> f64 {
        match *self {
            Self::Px(v) => v,
            Self::Percent(p) => basis * p / 100.0,
        }
    }
}

impl fmt::Display for MarginLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RootMarginError {
    #[error("root margin must have between 1 and 4 components, got {0}")]
    ComponentCount(usize),
    #[error("invalid root margin component `{0}` (expected a px or % length)")]
    InvalidComponent(alloc::string::String),
}

/// A parsed CSS-margin-like root margin, expanded to four sides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootMargin {
    pub top: MarginLength,
    pub right: MarginLength,
    pub bottom: MarginLength,
    pub left: MarginLength,
}

impl Default for RootMargin {
    fn default() -> Self {
        let zero = MarginLength::Px(0.0);
        Self {
            top: zero,
            right: zero,
            bottom: zero,
            left: zero,
        }
    }
}

impl RootMargin {
    /// Grows (or, for negative lengths, shrinks) `root` by this margin.
    pub fn expand(&self, root: Rect) -> Rect {
        let top = self.top.resolve(root.height);
        let right = self.right.resolve(root.width);
        let bottom = self.bottom.resolve(root.height);
        let left = self.left.resolve(root.width);
        Rect::new(
            root.x - left,
            root.y - top,
            root.width + left + right,
            root.height + top + bottom,
        )
    }
}

fn parse_component(token: &str) -> Result<MarginLength, RootMarginError> {
    let invalid = || RootMarginError::InvalidComponent(token.into());
    let lower = token.to_ascii_lowercase();
    // `f64::from_str` also accepts `nan`/`inf`, which are not CSS lengths.
    let number = |num: &str| match num.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid()),
    };
    if let Some(num) = lower.strip_suffix("px") {
        return number(num).map(MarginLength::Px);
    }
    if let Some(num) = lower.strip_suffix('%') {
        return number(num).map(MarginLength::Percent);
    }
    // A unitless length is only valid when it is zero.
    match number(&lower) {
        Ok(v) if v == 0.0 => Ok(MarginLength::Px(0.0)),
        _ => Err(invalid()),
    }
}

impl FromStr for RootMargin {
    type Err = RootMarginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [MarginLength::Px(0.0); 4];
        let mut n = 0usize;
        for token in s.split_ascii_whitespace() {
            if n == 4 {
                return Err(RootMarginError::ComponentCount(
                    s.split_ascii_whitespace().count(),
                ));
            }
            parts[n] = parse_component(token)?;
            n += 1;
        }

        // CSS shorthand expansion: top, right, bottom, left.
        let [a, b, c, d] = parts;
        let (top, right, bottom, left) = match n {
            1 => (a, a, a, a),
            2 => (a, b, a, b),
            3 => (a, b, c, b),
            4 => (a, b, c, d),
            _ => return Err(RootMarginError::ComponentCount(n)),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
