use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "left" | "start" | "inside" => Ok(TextAlign::Left),
            "right" | "end" | "outside" => Ok(TextAlign::Right),
            "center" => Ok(TextAlign::Center),
            "justify" => Ok(TextAlign::Justify),
            _ => Err(format!("Invalid text alignment: '{}'", s)),
        }
    }
}

/// Text decoration as the renderer spells it. `None` is the explicit off
/// value used to cancel an inherited decoration; it serializes as `false`,
/// like the other switched-off text properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDecoration {
    Underline,
    LineThrough,
    Overline,
    None,
}

impl TextDecoration {
    pub fn is_on(&self) -> bool {
        !matches!(self, TextDecoration::None)
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "underline" => Ok(TextDecoration::Underline),
            "line-through" => Ok(TextDecoration::LineThrough),
            "overline" => Ok(TextDecoration::Overline),
            "none" | "no-underline" | "no-line-through" | "no-overline" => {
                Ok(TextDecoration::None)
            }
            _ => Err(format!("Invalid text decoration: '{}'", s)),
        }
    }

    fn name(&self) -> Option<&'static str> {
        match self {
            TextDecoration::Underline => Some("underline"),
            TextDecoration::LineThrough => Some("lineThrough"),
            TextDecoration::Overline => Some("overline"),
            TextDecoration::None => None,
        }
    }
}

impl Serialize for TextDecoration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.name() {
            Some(name) => serializer.serialize_str(name),
            None => serializer.serialize_bool(false),
        }
    }
}

impl<'de> Deserialize<'de> for TextDecoration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecorationDef {
            Flag(bool),
            Name(String),
        }

        match DecorationDef::deserialize(deserializer)? {
            DecorationDef::Flag(false) => Ok(TextDecoration::None),
            DecorationDef::Flag(true) => Err(de::Error::custom("decoration must be a name or false")),
            DecorationDef::Name(name) => match name.as_str() {
                "underline" => Ok(TextDecoration::Underline),
                "lineThrough" => Ok(TextDecoration::LineThrough),
                "overline" => Ok(TextDecoration::Overline),
                other => Err(de::Error::custom(format!("unknown decoration '{}'", other))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switched_off_decoration_serializes_as_false() {
        assert_eq!(serde_json::to_string(&TextDecoration::None).unwrap(), "false");
        assert_eq!(serde_json::to_string(&TextDecoration::LineThrough).unwrap(), "\"lineThrough\"");
        let off: TextDecoration = serde_json::from_str("false").unwrap();
        assert_eq!(off, TextDecoration::None);
        let on: TextDecoration = serde_json::from_str("\"underline\"").unwrap();
        assert_eq!(on, TextDecoration::Underline);
        assert!(serde_json::from_str::<TextDecoration>("\"none\"").is_err());
    }
}
