use serde::{Deserialize, Serialize};

/// Weight threshold at and above which a face renders bold.
pub const BOLD_THRESHOLD: u16 = 600;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Thin,
    Light,
    Lighter,
    #[default]
    Regular,
    Medium,
    Bold,
    Bolder,
    Black,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    ///
    /// `bolder` and `lighter` are relative keywords in the markup; they are
    /// pinned to 700 and 300 because the target model only knows bold/not bold.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light | FontWeight::Lighter => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold | FontWeight::Bolder => 700,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.numeric_value() >= BOLD_THRESHOLD
    }

    /// Parse a font weight from a string (e.g., "bold", "400")
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "thin" => Ok(FontWeight::Thin),
            "light" => Ok(FontWeight::Light),
            "lighter" => Ok(FontWeight::Lighter),
            "regular" | "normal" => Ok(FontWeight::Regular),
            "medium" => Ok(FontWeight::Medium),
            "bold" => Ok(FontWeight::Bold),
            "bolder" => Ok(FontWeight::Bolder),
            "black" => Ok(FontWeight::Black),
            other => other
                .parse::<u16>()
                .map(FontWeight::Numeric)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    pub fn is_italic(&self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::Oblique)
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            "oblique" | "backslant" => Ok(FontStyle::Oblique),
            _ => Err(format!("Invalid font style: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_threshold() {
        assert!(FontWeight::parse("600").unwrap().is_bold());
        assert!(FontWeight::parse("bold").unwrap().is_bold());
        assert!(FontWeight::parse("bolder").unwrap().is_bold());
        assert!(!FontWeight::parse("599").unwrap().is_bold());
        assert!(!FontWeight::parse("normal").unwrap().is_bold());
        assert!(FontWeight::parse("heavy-ish").is_err());
    }
}
