use serde::{Deserialize, Serialize};

pub const COLOR_BUCKETS: f64 = 5.0;
pub const COLOR_INTERVAL: f64 = 100.0 / COLOR_BUCKETS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Cf,
    C1,
    C2,
    C3,
    C4,
    C5,
}

impl ColorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorClass::C1 => "c1",
            ColorClass::C2 => "c2",
            ColorClass::C3 => "c3",
            ColorClass::C4 => "c4",
            ColorClass::C5 => "c5",
            ColorClass::Cf => "cf",
        }
    }

    /// c1 = 1 .. c5 = 5; the fallback class ranks 0.
    pub fn rank(self) -> u8 {
        match self {
            ColorClass::Cf => 0,
            ColorClass::C1 => 1,
            ColorClass::C2 => 2,
            ColorClass::C3 => 3,
            ColorClass::C4 => 4,
            ColorClass::C5 => 5,
        }
    }
}

impl std::fmt::Display for ColorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn class_order() -> &'static [ColorClass] {
    &[
        ColorClass::C1,
        ColorClass::C2,
        ColorClass::C3,
        ColorClass::C4,
        ColorClass::C5,
        ColorClass::Cf,
    ]
}

/// Buckets a score by its distance from the item maximum, in 20% quintiles.
/// Upper band edges are inclusive, so a score exactly at a boundary lands in
/// the better class.
pub fn get_color_class(score: f64, max_score: f64) -> ColorClass {
    let distance_from_max = ((max_score - score) / max_score) * 100.0;

    if !distance_from_max.is_finite() || distance_from_max < 0.0 {
        return ColorClass::Cf;
    }
    if distance_from_max <= COLOR_INTERVAL {
        ColorClass::C5
    } else if distance_from_max <= COLOR_INTERVAL * 2.0 {
        ColorClass::C4
    } else if distance_from_max <= COLOR_INTERVAL * 3.0 {
        ColorClass::C3
    } else if distance_from_max <= COLOR_INTERVAL * 4.0 {
        ColorClass::C2
    } else if distance_from_max <= COLOR_INTERVAL * 5.0 {
        ColorClass::C1
    } else {
        ColorClass::Cf
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/color.rs"]
mod tests;
